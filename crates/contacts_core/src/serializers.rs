//! Display projections of domain contacts.
//!
//! Pure, stateless conversions used by presentation code; no business
//! rules live here.

use crate::model::contact::{Contact, ContactId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Flat display row for one contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<&Contact> for ContactRecord {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id.clone(),
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
        }
    }
}

pub fn contact_to_record(contact: &Contact) -> ContactRecord {
    ContactRecord::from(contact)
}

pub fn contacts_to_records(contacts: &[Contact]) -> Vec<ContactRecord> {
    contacts.iter().map(ContactRecord::from).collect()
}

/// Plain `{id, name, email, phone}` mapping.
pub fn contact_to_value(contact: &Contact) -> Value {
    serde_json::json!({
        "id": contact.id,
        "name": contact.name,
        "email": contact.email,
        "phone": contact.phone,
    })
}

#[cfg(test)]
mod tests {
    use super::{contact_to_record, contact_to_value, contacts_to_records};
    use crate::model::contact::Contact;

    #[test]
    fn value_has_exactly_the_four_display_fields() {
        let contact = Contact::with_id("c-1", "Alice", "alice@example.com", "");
        let value = contact_to_value(&contact);

        let object = value.as_object().expect("mapping");
        assert_eq!(object.len(), 4);
        assert_eq!(value["id"], "c-1");
        assert_eq!(value["phone"], "");
    }

    #[test]
    fn records_preserve_input_order() {
        let contacts = vec![
            Contact::with_id("a", "A", "a@example.com", ""),
            Contact::with_id("b", "B", "b@example.com", ""),
        ];
        let ids: Vec<_> = contacts_to_records(&contacts)
            .into_iter()
            .map(|record| record.id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn record_matches_plain_mapping() {
        let contact = Contact::with_id("c-1", "Alice", "alice@example.com", "555-0100");
        let record = contact_to_record(&contact);

        assert_eq!(record.id, contact.id);
        assert_eq!(
            serde_json::to_value(&record).expect("record serializes"),
            contact_to_value(&contact)
        );
    }
}
