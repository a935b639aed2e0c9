//! Contact domain events and their topic names.
//!
//! # Invariants
//! - Each operation has exactly one publish site (the use case).
//! - Payload keys are `contact` for created/updated and `contact_id` for
//!   deleted.

use crate::model::contact::{Contact, ContactId};
use serde::{Deserialize, Serialize};

pub const CONTACT_CREATED: &str = "ContactCreated";
pub const CONTACT_UPDATED: &str = "ContactUpdated";
pub const CONTACT_DELETED: &str = "ContactDeleted";

/// Payload carried on the contact event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContactEvent {
    Created { contact: Contact },
    Updated { contact: Contact },
    Deleted { contact_id: ContactId },
}

impl ContactEvent {
    /// Topic this event is published under.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Created { .. } => CONTACT_CREATED,
            Self::Updated { .. } => CONTACT_UPDATED,
            Self::Deleted { .. } => CONTACT_DELETED,
        }
    }

    /// Contact carried by created/updated events.
    pub fn contact(&self) -> Option<&Contact> {
        match self {
            Self::Created { contact } | Self::Updated { contact } => Some(contact),
            Self::Deleted { .. } => None,
        }
    }

    /// Id of the contact this event concerns.
    pub fn contact_id(&self) -> &str {
        match self {
            Self::Created { contact } | Self::Updated { contact } => contact.id.as_str(),
            Self::Deleted { contact_id } => contact_id.as_str(),
        }
    }
}
