//! Form-builder editing state for FormForge.
//!
//! This crate provides:
//! - [`BuilderStore`] - Canvas fields, selection, theme, load and save
//! - [`HistoryManager`] - Bounded undo/redo of [`EditorSnapshot`]s
//! - [`KeyChord`] / [`EditorCommand`] - Keyboard shortcuts
//! - [`ControlSynchronizer`] - Keeps preview controls in step with the canvas
//! - [`EditorSession`] - Store, preview controls, and preview rules together
//! - [`Notifier`] - User-facing messages

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod config;
pub mod history;
pub mod notify;
pub mod session;
pub mod store;
pub mod sync;

pub use command::{EditorCommand, KeyChord};
pub use config::{BuilderConfig, DEFAULT_HISTORY_CAPACITY};
pub use history::{EditorSnapshot, HistoryManager};
pub use notify::{Level, Notification, Notifier, RecordingNotifier, TracingNotifier};
pub use session::EditorSession;
pub use store::BuilderStore;
pub use sync::{ControlSynchronizer, SyncReport};
