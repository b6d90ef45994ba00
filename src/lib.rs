//! FormForge - Conditional rule engine and form-builder editing core
//!
//! This crate re-exports all layers of the FormForge system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: formforge_runtime    - Form sessions, serialization, CLI
//! Layer 3: formforge_builder    - Editing store, undo/redo, control sync
//! Layer 2: formforge_engine     - Condition evaluation, controls, rule engine
//! Layer 1: formforge_model      - Fields, rules, validations, schemas
//! Layer 0: formforge_foundation - Core types (FieldValue, FieldId, Error)
//! ```

pub use formforge_builder as builder;
pub use formforge_engine as engine;
pub use formforge_foundation as foundation;
pub use formforge_model as model;
pub use formforge_runtime as runtime;
