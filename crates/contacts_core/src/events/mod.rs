//! Event bus and contact event catalogue.
//!
//! # Responsibility
//! - Provide the in-process bus UI layers observe.
//! - Name the topics and payload shapes the core publishes.

pub mod bus;
pub mod contact_event;
