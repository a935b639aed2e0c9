//! Live contact list kept in sync with manager events.
//!
//! # Responsibility
//! - Give presentation code a ready list of display rows that follows
//!   created/updated/deleted events without re-fetching.
//!
//! # Invariants
//! - At most one row per contact id.
//! - After `detach` (or drop) the projection receives no further events.

use crate::events::bus::Subscription;
use crate::events::contact_event::{
    ContactEvent, CONTACT_CREATED, CONTACT_DELETED, CONTACT_UPDATED,
};
use crate::serializers::{contacts_to_records, ContactRecord};
use crate::service::contact_manager::ContactManager;
use log::debug;
use parking_lot::Mutex;
use std::sync::Arc;

type Rows = Arc<Mutex<Vec<ContactRecord>>>;

pub struct ContactListProjection {
    rows: Rows,
    subscriptions: Vec<Subscription>,
}

impl ContactListProjection {
    /// Subscribes to contact events and loads the current list.
    pub fn attach(manager: &ContactManager) -> Self {
        let rows: Rows = Arc::new(Mutex::new(Vec::new()));
        let subscriptions = [CONTACT_CREATED, CONTACT_UPDATED, CONTACT_DELETED]
            .into_iter()
            .map(|topic| {
                let rows = Arc::clone(&rows);
                manager.subscribe_to_events(topic, move |event| apply(&rows, event))
            })
            .collect();

        // Subscribed first and loaded under the rows lock: events racing with
        // the load queue behind it and re-apply idempotently.
        {
            let mut guard = rows.lock();
            *guard = contacts_to_records(&manager.get_all_contacts());
            debug!(
                "event=projection_attached module=projection status=ok rows={}",
                guard.len()
            );
        }

        Self {
            rows,
            subscriptions,
        }
    }

    /// Snapshot of the current rows.
    pub fn rows(&self) -> Vec<ContactRecord> {
        self.rows.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stops following events. Idempotent.
    pub fn detach(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
    }
}

impl Drop for ContactListProjection {
    fn drop(&mut self) {
        self.detach();
    }
}

fn apply(rows: &Mutex<Vec<ContactRecord>>, event: &ContactEvent) {
    let mut rows = rows.lock();
    let position = rows.iter().position(|row| row.id == event.contact_id());
    match (event, position) {
        (ContactEvent::Created { contact }, None) => rows.push(contact.into()),
        (ContactEvent::Created { contact } | ContactEvent::Updated { contact }, Some(index)) => {
            rows[index] = contact.into();
        }
        (ContactEvent::Updated { .. }, None) => {}
        (ContactEvent::Deleted { .. }, Some(index)) => {
            rows.remove(index);
        }
        (ContactEvent::Deleted { .. }, None) => {}
    }
}
