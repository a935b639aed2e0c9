//! Contact repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Provide the storage-agnostic CRUD surface the use cases depend on.
//! - Keep the authoritative copy of every contact inside the repository.
//!
//! # Invariants
//! - Callers only ever receive clones; mutating a returned value never
//!   changes stored state.
//! - `save` is an upsert keyed by `Contact::id`.
//! - `update` only touches records that still exist; it never re-inserts.
//! - Not-found is `None`/`false`, never an error.

use crate::model::contact::{Contact, ContactId, ContactPatch};
use indexmap::IndexMap;
use log::debug;
use parking_lot::ReentrantMutex;
use std::cell::RefCell;

/// Repository interface for contact persistence.
pub trait ContactRepository: Send + Sync {
    fn get_by_id(&self, id: &str) -> Option<Contact>;
    fn get_all(&self) -> Vec<Contact>;
    /// Stores a copy of `contact`, replacing any record with the same id,
    /// and returns a copy of what was stored.
    fn save(&self, contact: &Contact) -> Contact;
    /// Applies `patch` to the stored record for `id` in one step and returns
    /// a copy of the result. Returns `None` when no record exists.
    fn update(&self, id: &str, patch: ContactPatch) -> Option<Contact>;
    /// Removes the record for `id`. Returns whether a record was removed.
    fn delete(&self, id: &str) -> bool;
}

/// Process-memory repository; list order is insertion order.
///
/// Every call holds the lock for its whole body, so each call is atomic
/// with respect to the others. There are no multi-call transactions.
#[derive(Debug, Default)]
pub struct InMemoryContactRepository {
    store: ReentrantMutex<RefCell<IndexMap<ContactId, Contact>>>,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.store.lock().borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ContactRepository for InMemoryContactRepository {
    fn get_by_id(&self, id: &str) -> Option<Contact> {
        let guard = self.store.lock();
        let store = guard.borrow();
        store.get(id).cloned()
    }

    fn get_all(&self) -> Vec<Contact> {
        let guard = self.store.lock();
        let store = guard.borrow();
        store.values().cloned().collect()
    }

    fn save(&self, contact: &Contact) -> Contact {
        let guard = self.store.lock();
        let mut store = guard.borrow_mut();
        let replaced = store.insert(contact.id.clone(), contact.clone()).is_some();
        debug!(
            "event=contact_saved module=repo status=ok id={} replaced={replaced}",
            contact.id
        );
        contact.clone()
    }

    fn update(&self, id: &str, patch: ContactPatch) -> Option<Contact> {
        let guard = self.store.lock();
        let mut store = guard.borrow_mut();
        let Some(stored) = store.get_mut(id) else {
            debug!("event=contact_patched module=repo status=skipped reason=not_found id={id}");
            return None;
        };
        stored.update(patch);
        debug!("event=contact_patched module=repo status=ok id={id}");
        Some(stored.clone())
    }

    fn delete(&self, id: &str) -> bool {
        let guard = self.store.lock();
        let mut store = guard.borrow_mut();
        // shift_remove keeps the remaining records in insertion order.
        let removed = store.shift_remove(id).is_some();
        debug!("event=contact_removed module=repo status=ok id={id} removed={removed}");
        removed
    }
}
