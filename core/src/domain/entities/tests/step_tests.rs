//! Unit tests for the step enum

use crate::domain::entities::Step;

#[test]
fn test_default_step_is_email_entry() {
    assert_eq!(Step::default(), Step::EmailEntry);
}

#[test]
fn test_only_contact_display_is_terminal() {
    assert!(!Step::EmailEntry.is_terminal());
    assert!(!Step::CodeEntry.is_terminal());
    assert!(Step::ContactDisplay.is_terminal());
}

#[test]
fn test_step_serializes_as_snake_case() {
    let json = serde_json::to_string(&Step::ContactDisplay).unwrap();
    assert_eq!(json, "\"contact_display\"");
    assert_eq!(Step::CodeEntry.to_string(), "code_entry");
}
