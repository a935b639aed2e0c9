//! Contact use cases.
//!
//! # Responsibility
//! - Express each application operation as one small, testable unit.
//! - Be the single publish site for the event each operation emits.
//!
//! # Invariants
//! - Use cases never validate input; blank fields are accepted.
//! - Delete/update publish only when a stored record was actually affected.

use crate::events::bus::EventBus;
use crate::events::contact_event::ContactEvent;
use crate::model::contact::{Contact, ContactPatch};
use crate::repo::contact_repo::ContactRepository;
use log::info;
use std::sync::Arc;

/// Bus carrying contact events.
pub type ContactEventBus = EventBus<ContactEvent>;

/// Shared repository handle used by the use cases.
pub type SharedContactRepository = Arc<dyn ContactRepository>;

fn publish(bus: &ContactEventBus, event: ContactEvent) {
    bus.publish(event.name(), &event);
}

#[derive(Clone)]
pub struct CreateContactUseCase {
    repo: SharedContactRepository,
    bus: ContactEventBus,
}

impl CreateContactUseCase {
    pub fn new(repo: SharedContactRepository, bus: ContactEventBus) -> Self {
        Self { repo, bus }
    }

    /// Persists a new contact with a generated id and publishes
    /// `ContactCreated`.
    pub fn execute(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Contact {
        let saved = self.repo.save(&Contact::new(name, email, phone));
        info!(
            "event=contact_created module=usecase status=ok id={}",
            saved.id
        );
        publish(
            &self.bus,
            ContactEvent::Created {
                contact: saved.clone(),
            },
        );
        saved
    }
}

#[derive(Clone)]
pub struct GetAllContactsUseCase {
    repo: SharedContactRepository,
}

impl GetAllContactsUseCase {
    pub fn new(repo: SharedContactRepository) -> Self {
        Self { repo }
    }

    pub fn execute(&self) -> Vec<Contact> {
        self.repo.get_all()
    }
}

#[derive(Clone)]
pub struct GetContactUseCase {
    repo: SharedContactRepository,
}

impl GetContactUseCase {
    pub fn new(repo: SharedContactRepository) -> Self {
        Self { repo }
    }

    pub fn execute(&self, id: &str) -> Option<Contact> {
        self.repo.get_by_id(id)
    }
}

#[derive(Clone)]
pub struct UpdateContactUseCase {
    repo: SharedContactRepository,
    bus: ContactEventBus,
}

impl UpdateContactUseCase {
    pub fn new(repo: SharedContactRepository, bus: ContactEventBus) -> Self {
        Self { repo, bus }
    }

    /// Applies `patch` to the stored contact and publishes `ContactUpdated`.
    ///
    /// Returns `None` without publishing when `id` is unknown, including when
    /// the record was deleted before the patch could land.
    pub fn execute(&self, id: &str, patch: ContactPatch) -> Option<Contact> {
        let Some(updated) = self.repo.update(id, patch) else {
            info!("event=contact_updated module=usecase status=skipped reason=not_found id={id}");
            return None;
        };
        info!(
            "event=contact_updated module=usecase status=ok id={}",
            updated.id
        );
        publish(
            &self.bus,
            ContactEvent::Updated {
                contact: updated.clone(),
            },
        );
        Some(updated)
    }
}

#[derive(Clone)]
pub struct DeleteContactUseCase {
    repo: SharedContactRepository,
    bus: ContactEventBus,
}

impl DeleteContactUseCase {
    pub fn new(repo: SharedContactRepository, bus: ContactEventBus) -> Self {
        Self { repo, bus }
    }

    /// Removes the contact and publishes `ContactDeleted` when it existed.
    ///
    /// Returns whether a record was removed.
    pub fn execute(&self, id: &str) -> bool {
        if !self.repo.delete(id) {
            info!("event=contact_deleted module=usecase status=skipped reason=not_found id={id}");
            return false;
        }

        info!("event=contact_deleted module=usecase status=ok id={id}");
        publish(
            &self.bus,
            ContactEvent::Deleted {
                contact_id: id.to_string(),
            },
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ContactEventBus, CreateContactUseCase, DeleteContactUseCase, SharedContactRepository,
        UpdateContactUseCase,
    };
    use crate::events::contact_event::{ContactEvent, CONTACT_DELETED, CONTACT_UPDATED};
    use crate::model::contact::ContactPatch;
    use crate::repo::contact_repo::InMemoryContactRepository;
    use std::sync::{Arc, Mutex};

    fn fixture() -> (SharedContactRepository, ContactEventBus) {
        let repo: SharedContactRepository = Arc::new(InMemoryContactRepository::new());
        (repo, ContactEventBus::new())
    }

    fn record(bus: &ContactEventBus, topic: &str) -> Arc<Mutex<Vec<ContactEvent>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        bus.subscribe(topic, move |event: &ContactEvent| {
            sink.lock().unwrap().push(event.clone());
        });
        seen
    }

    #[test]
    fn create_accepts_blank_fields() {
        let (repo, bus) = fixture();
        let created = CreateContactUseCase::new(Arc::clone(&repo), bus).execute("", "", "");

        assert!(!created.id.is_empty());
        assert_eq!(repo.get_by_id(&created.id), Some(created));
    }

    #[test]
    fn delete_unknown_id_publishes_nothing() {
        let (repo, bus) = fixture();
        let seen = record(&bus, CONTACT_DELETED);

        let removed = DeleteContactUseCase::new(repo, bus).execute("missing");

        assert!(!removed);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn update_patches_stored_contact_and_publishes() {
        let (repo, bus) = fixture();
        let seen = record(&bus, CONTACT_UPDATED);
        let created = CreateContactUseCase::new(Arc::clone(&repo), bus.clone()).execute(
            "Alice",
            "alice@example.com",
            "555-0100",
        );

        let updated = UpdateContactUseCase::new(Arc::clone(&repo), bus)
            .execute(&created.id, ContactPatch::default().phone("555-0199"))
            .expect("known id should update");

        assert_eq!(updated.phone, "555-0199");
        assert_eq!(updated.name, "Alice");
        assert_eq!(repo.get_by_id(&created.id), Some(updated.clone()));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![ContactEvent::Updated { contact: updated }]
        );
    }

    #[test]
    fn update_unknown_id_returns_none() {
        let (repo, bus) = fixture();
        let seen = record(&bus, CONTACT_UPDATED);

        let outcome = UpdateContactUseCase::new(repo, bus)
            .execute("missing", ContactPatch::default().name("Ghost"));

        assert!(outcome.is_none());
        assert!(seen.lock().unwrap().is_empty());
    }
}
