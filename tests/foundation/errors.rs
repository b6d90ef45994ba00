//! Integration tests for error types
//!
//! Tests error kinds, messages, and context.

use formforge_foundation::{Error, ErrorContext, ErrorKind, FieldId};

#[test]
fn messages_name_the_field() {
    let err = Error::field_not_found(FieldId::new("email"));
    assert_eq!(err.to_string(), "field not found: email");

    let err = Error::duplicate_field_id(FieldId::new("a"));
    assert_eq!(err.to_string(), "duplicate field id: a");
}

#[test]
fn invalid_submission_lists_fields() {
    let err = Error::invalid_submission(vec![FieldId::new("a"), FieldId::new("b")]);
    match &err.kind {
        ErrorKind::InvalidSubmission { fields } => assert_eq!(fields.len(), 2),
        other => panic!("unexpected kind: {other:?}"),
    }
    assert!(err.to_string().contains("2 field(s)"));
}

#[test]
fn context_is_attached() {
    let err = Error::empty_form().with_context(
        ErrorContext::new()
            .with_operation("prepare_save")
            .with_source("Signup"),
    );
    let context = err.context.as_ref().map(ToString::to_string);
    assert_eq!(context.as_deref(), Some("in prepare_save at Signup"));
    assert_eq!(err.to_string(), "cannot save an empty form");
}

#[test]
fn io_and_serialization_kinds() {
    assert!(matches!(Error::io("disk").kind, ErrorKind::Io(_)));
    assert!(matches!(
        Error::serialization("bad").kind,
        ErrorKind::Serialization(_)
    ));
    assert!(matches!(
        Error::invalid_input("x").kind,
        ErrorKind::InvalidInput(_)
    ));
}

#[test]
fn errors_are_std_errors() {
    fn takes(_: &dyn std::error::Error) {}
    takes(&Error::empty_form());
}
