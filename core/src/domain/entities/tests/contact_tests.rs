//! Unit tests for the contact record

use serde_json::json;

use crate::domain::entities::Contact;

#[test]
fn test_contact_deserializes_from_arbitrary_mapping() {
    let contact: Contact = serde_json::from_value(json!({
        "Name": "Jane Doe",
        "Email": "jane@example.com",
        "Phone": null,
        "AccountId": 42
    }))
    .unwrap();

    assert_eq!(contact.len(), 4);
    assert_eq!(contact.get_str("Name"), Some("Jane Doe"));
    assert_eq!(contact.get("AccountId"), Some(&json!(42)));
    assert_eq!(contact.get_str("Phone"), None);
}

#[test]
fn test_contact_serializes_transparently() {
    let contact = Contact::new().with_field("Name", "Jane Doe");
    assert_eq!(serde_json::to_value(&contact).unwrap(), json!({"Name": "Jane Doe"}));
}

#[test]
fn test_empty_contact() {
    let contact = Contact::default();
    assert!(contact.is_empty());
    assert_eq!(contact.fields().count(), 0);
}
