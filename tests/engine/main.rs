//! Integration tests for Layer 2: Engine
//!
//! Tests for condition evaluation, rule application, and validation.

mod evaluation;
mod rules;
