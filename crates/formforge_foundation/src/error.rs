//! Error types for the FormForge core.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::id::FieldId;

/// The main error type for FormForge operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a field not found error.
    #[must_use]
    pub fn field_not_found(id: FieldId) -> Self {
        Self::new(ErrorKind::FieldNotFound(id))
    }

    /// Creates a duplicate field id error.
    #[must_use]
    pub fn duplicate_field_id(id: FieldId) -> Self {
        Self::new(ErrorKind::DuplicateFieldId(id))
    }

    /// Creates an empty form error.
    #[must_use]
    pub fn empty_form() -> Self {
        Self::new(ErrorKind::EmptyForm)
    }

    /// Creates an invalid submission error listing the offending fields.
    #[must_use]
    pub fn invalid_submission(fields: Vec<FieldId>) -> Self {
        Self::new(ErrorKind::InvalidSubmission { fields })
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization(message.into()))
    }

    /// Creates an I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io(message.into()))
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// No field with this id exists on the canvas.
    #[error("field not found: {0}")]
    FieldNotFound(FieldId),

    /// A field id appears more than once in one canvas.
    #[error("duplicate field id: {0}")]
    DuplicateFieldId(FieldId),

    /// Saving was attempted with no fields on the canvas.
    #[error("cannot save an empty form")]
    EmptyForm,

    /// A submission was attempted while some enabled controls are invalid.
    #[error("invalid submission: {} field(s) failed validation", fields.len())]
    InvalidSubmission {
        /// Fields that failed validation, in canvas order.
        fields: Vec<FieldId>,
    },

    /// Encoding or decoding a schema failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Reading or writing a file failed.
    #[error("i/o error: {0}")]
    Io(String),

    /// Caller-supplied text could not be understood.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation that failed (e.g. `"duplicate_field"`).
    pub operation: Option<String>,
    /// Source file or schema name.
    pub source: Option<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the operation name.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(op) = &self.operation {
            write!(f, "in {op}")?;
        }
        if let Some(source) = &self.source {
            if self.operation.is_some() {
                write!(f, " ")?;
            }
            write!(f, "at {source}")?;
        }
        Ok(())
    }
}
