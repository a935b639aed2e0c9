//! Contact manager facade.
//!
//! # Responsibility
//! - Wire one repository, one bus and the use cases into the single object
//!   UI layers talk to.
//! - Offer default wiring (in-memory repository, fresh bus) and demo seeding.
//!
//! # Invariants
//! - The manager never publishes on its own; each operation publishes once,
//!   from its use case.
//! - Clones share the same repository and bus. Hosts construct one manager
//!   and pass it to every consumer explicitly.

use crate::config::CoreConfig;
use crate::events::bus::Subscription;
use crate::events::contact_event::ContactEvent;
use crate::model::contact::{Contact, ContactPatch};
use crate::repo::contact_repo::InMemoryContactRepository;
use crate::service::use_cases::{
    ContactEventBus, CreateContactUseCase, DeleteContactUseCase, GetAllContactsUseCase,
    GetContactUseCase, SharedContactRepository, UpdateContactUseCase,
};
use log::info;
use std::sync::Arc;

/// Fixed demo contacts inserted by [`ContactManager::seed_data`].
pub const DEMO_CONTACTS: [(&str, &str, &str); 2] = [
    ("Alice Smith", "alice@example.com", "+1-555-0100"),
    ("Bob Johnson", "bob@example.com", "+1-555-0101"),
];

#[derive(Clone)]
pub struct ContactManager {
    repo: SharedContactRepository,
    bus: ContactEventBus,
    create_uc: CreateContactUseCase,
    list_uc: GetAllContactsUseCase,
    get_uc: GetContactUseCase,
    update_uc: UpdateContactUseCase,
    delete_uc: DeleteContactUseCase,
}

impl ContactManager {
    pub fn new(repo: SharedContactRepository, bus: ContactEventBus) -> Self {
        Self {
            create_uc: CreateContactUseCase::new(Arc::clone(&repo), bus.clone()),
            list_uc: GetAllContactsUseCase::new(Arc::clone(&repo)),
            get_uc: GetContactUseCase::new(Arc::clone(&repo)),
            update_uc: UpdateContactUseCase::new(Arc::clone(&repo), bus.clone()),
            delete_uc: DeleteContactUseCase::new(Arc::clone(&repo), bus.clone()),
            repo,
            bus,
        }
    }

    /// Builds a manager over a fresh in-memory repository and a fresh bus.
    pub fn create() -> Self {
        Self::with_parts(None, None)
    }

    /// Builds a manager, defaulting whichever part is not supplied.
    pub fn with_parts(
        repo: Option<SharedContactRepository>,
        bus: Option<ContactEventBus>,
    ) -> Self {
        let repo = repo.unwrap_or_else(|| {
            Arc::new(InMemoryContactRepository::new()) as SharedContactRepository
        });
        Self::new(repo, bus.unwrap_or_default())
    }

    /// Builds the default manager and seeds demo data when configured.
    pub fn from_config(config: &CoreConfig) -> Self {
        let manager = Self::create();
        if config.seed_demo_data {
            manager.seed_data();
        }
        manager
    }

    /// Inserts the fixed demo contacts. Demo/test aid only.
    pub fn seed_data(&self) {
        for (name, email, phone) in DEMO_CONTACTS {
            self.create_contact(name, email, phone);
        }
        info!(
            "event=seed_data module=manager status=ok count={}",
            DEMO_CONTACTS.len()
        );
    }

    /// Creates a contact; `phone` may be empty.
    pub fn create_contact(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Contact {
        self.create_uc.execute(name, email, phone)
    }

    pub fn get_all_contacts(&self) -> Vec<Contact> {
        self.list_uc.execute()
    }

    pub fn get_contact(&self, id: &str) -> Option<Contact> {
        self.get_uc.execute(id)
    }

    /// Applies `patch` to a stored contact; `None` when `id` is unknown.
    pub fn update_contact(&self, id: &str, patch: ContactPatch) -> Option<Contact> {
        self.update_uc.execute(id, patch)
    }

    /// Deletes a contact. Returns `true` only when a record was removed,
    /// which is also the only case that publishes `ContactDeleted`.
    pub fn delete_contact(&self, id: &str) -> bool {
        self.delete_uc.execute(id)
    }

    /// Registers `callback` for `event_name` on the shared bus.
    pub fn subscribe_to_events(
        &self,
        event_name: &str,
        callback: impl Fn(&ContactEvent) + Send + Sync + 'static,
    ) -> Subscription {
        self.bus.subscribe(event_name, callback)
    }

    pub fn event_bus(&self) -> &ContactEventBus {
        &self.bus
    }

    pub fn repository(&self) -> &SharedContactRepository {
        &self.repo
    }
}
