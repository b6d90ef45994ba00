//! Cross-layer integration tests for FormForge
//!
//! Tests that verify correct interaction between multiple crates.

mod lifecycle;
