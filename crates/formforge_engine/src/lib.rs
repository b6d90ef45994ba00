//! Rule evaluation and live controls for FormForge.
//!
//! This crate provides:
//! - [`evaluate`] - Recursive condition-tree evaluation
//! - [`ComparisonPolicy`] - Typed or lenient leaf comparison
//! - [`Control`] / [`Controls`] / [`FormGroup`] - Live controls and their value-change stream
//! - [`Validator`] - Compiled field validators
//! - [`RuleEngine`] - Applies rule actions on every value change
//! - [`TeardownSignal`] - Ends a subscription

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod compare;
pub mod control;
pub mod evaluate;
pub mod group;
pub mod rule;
pub mod teardown;
pub mod validate;

pub use compare::{ComparisonPolicy, compare};
pub use control::{Control, Controls};
pub use evaluate::{evaluate, evaluate_all};
pub use group::{FormGroup, SubscriptionId, ValueHandler};
pub use rule::{ApplyReport, EngineConfig, RuleEngine};
pub use teardown::TeardownSignal;
pub use validate::{ValidationError, Validator, validators_for};
