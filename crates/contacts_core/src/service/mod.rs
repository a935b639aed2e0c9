//! Core use cases and the manager facade.
//!
//! # Responsibility
//! - Orchestrate repository calls and event publication per operation.
//! - Keep UI layers decoupled from storage and bus wiring.

pub mod contact_manager;
pub mod use_cases;
