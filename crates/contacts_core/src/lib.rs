//! Core domain logic for the contact manager.
//! Every UI client variant talks to this crate through `ContactManager`.

pub mod config;
pub mod events;
pub mod logging;
pub mod model;
pub mod projection;
pub mod repo;
pub mod serializers;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use events::bus::{ErrorSink, EventBus, SubscriberFailure, SubscriberId, Subscription};
pub use events::contact_event::{ContactEvent, CONTACT_CREATED, CONTACT_DELETED, CONTACT_UPDATED};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::contact::{Contact, ContactId, ContactPatch, ContactValidationError};
pub use projection::ContactListProjection;
pub use repo::contact_repo::{ContactRepository, InMemoryContactRepository};
pub use serializers::{contact_to_record, contact_to_value, contacts_to_records, ContactRecord};
pub use service::contact_manager::{ContactManager, DEMO_CONTACTS};
pub use service::use_cases::{
    ContactEventBus, CreateContactUseCase, DeleteContactUseCase, GetAllContactsUseCase,
    GetContactUseCase, SharedContactRepository, UpdateContactUseCase,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
