//! Contact domain model.
//!
//! # Responsibility
//! - Define the single entity shared by every client variant.
//! - Provide the in-place update helper used by the update use case.
//!
//! # Invariants
//! - `id` is assigned once at construction; the crate never reassigns it.
//! - `name`, `email` and `phone` may be blank; the entity does not validate
//!   their format.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a contact.
///
/// Kept as a string alias: ids cross UI boundaries as opaque text, and
/// lookups with arbitrary (possibly unknown) ids must stay representable.
pub type ContactId = String;

/// Canonical contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Generated at construction. The field stays public for plain struct
    /// access; nothing in the crate reassigns it.
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Partial field replacement for [`Contact::update`].
///
/// `None` keeps the current value, `Some` replaces it (blank included).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactPatch {
    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = Some(value.into());
        self
    }

    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    pub fn phone(mut self, value: impl Into<String>) -> Self {
        self.phone = Some(value.into());
        self
    }

    /// Returns whether applying this patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

impl Contact {
    /// Creates a new contact with a generated v4 UUID id.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, email, phone)
    }

    /// Creates a contact with a caller-provided id.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(
        id: impl Into<ContactId>,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Applies `patch` in place. The id is never touched.
    pub fn update(&mut self, patch: ContactPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
    }

    /// Presence check applied by input forms before `create_contact`.
    ///
    /// Core use cases never call this; blank contacts are valid domain state.
    pub fn validate_presence(&self) -> Result<(), ContactValidationError> {
        if self.name.trim().is_empty() {
            return Err(ContactValidationError::MissingName);
        }
        if self.email.trim().is_empty() {
            return Err(ContactValidationError::MissingEmail);
        }
        Ok(())
    }
}

/// Presence-check failures reported by [`Contact::validate_presence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactValidationError {
    MissingName,
    MissingEmail,
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingName => write!(f, "contact name is required"),
            Self::MissingEmail => write!(f, "contact email is required"),
        }
    }
}

impl Error for ContactValidationError {}
