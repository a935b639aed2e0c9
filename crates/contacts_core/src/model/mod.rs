//! Contact domain model.
//!
//! # Responsibility
//! - Define the value types passed between repository, use cases and UI.
//!
//! # Invariants
//! - Every contact is identified by a stable `ContactId`.
//! - Deletion is a hard removal; nothing else references a contact.

pub mod contact;
