//! Repository layer abstractions and implementations.
//!
//! # Responsibility
//! - Define the data access contract used by the use cases.
//! - Keep storage details out of service orchestration.
//!
//! # Invariants
//! - Repository values cross the boundary by clone in both directions.

pub mod contact_repo;
