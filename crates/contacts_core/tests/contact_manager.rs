use contacts_core::{
    Contact, ContactEvent, ContactEventBus, ContactListProjection, ContactManager, ContactPatch,
    ContactRepository, InMemoryContactRepository, SharedContactRepository, CONTACT_CREATED,
    CONTACT_DELETED, CONTACT_UPDATED,
};
use std::sync::{Arc, Mutex};

/// Repository whose record disappears right before each patch is applied,
/// the way a delete from another thread would land.
struct DeletedBeforeUpdate {
    inner: InMemoryContactRepository,
}

impl ContactRepository for DeletedBeforeUpdate {
    fn get_by_id(&self, id: &str) -> Option<Contact> {
        self.inner.get_by_id(id)
    }

    fn get_all(&self) -> Vec<Contact> {
        self.inner.get_all()
    }

    fn save(&self, contact: &Contact) -> Contact {
        self.inner.save(contact)
    }

    fn update(&self, id: &str, patch: ContactPatch) -> Option<Contact> {
        self.inner.delete(id);
        self.inner.update(id, patch)
    }

    fn delete(&self, id: &str) -> bool {
        self.inner.delete(id)
    }
}

fn manager_with_parts() -> (ContactManager, SharedContactRepository) {
    let repo: SharedContactRepository = Arc::new(InMemoryContactRepository::new());
    let manager = ContactManager::new(Arc::clone(&repo), ContactEventBus::new());
    (manager, repo)
}

fn record(manager: &ContactManager, topic: &str) -> Arc<Mutex<Vec<ContactEvent>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    manager.subscribe_to_events(topic, move |event| sink.lock().unwrap().push(event.clone()));
    seen
}

#[test]
fn create_publishes_once_and_lists_the_contact() {
    let (manager, _) = manager_with_parts();
    let created = record(&manager, CONTACT_CREATED);

    let alice = manager.create_contact("Alice", "alice@example.com", "555-0100");

    let events = created.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].contact().map(|c| c.name.as_str()), Some("Alice"));

    let all = manager.get_all_contacts();
    assert_eq!(all.len(), 1);
    assert!(!all[0].id.is_empty());
    assert_eq!(all[0].id, alice.id);
    assert_eq!(all[0].name, "Alice");
    assert_eq!(all[0].email, "alice@example.com");
    assert_eq!(all[0].phone, "555-0100");
}

#[test]
fn delete_existing_contact_returns_true_and_publishes_id() {
    let (manager, _) = manager_with_parts();
    let deleted = record(&manager, CONTACT_DELETED);
    manager.create_contact("Alice", "alice@example.com", "");
    let bob = manager.create_contact("Bob", "bob@example.com", "");

    assert!(manager.delete_contact(&bob.id));

    let remaining = manager.get_all_contacts();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "Alice");

    let events = deleted.lock().unwrap();
    assert_eq!(
        *events,
        vec![ContactEvent::Deleted {
            contact_id: bob.id.clone()
        }]
    );
    let payload = serde_json::to_value(&events[0]).unwrap();
    assert_eq!(payload["contact_id"], bob.id.as_str());
}

#[test]
fn delete_unknown_contact_returns_false_without_event() {
    let (manager, _) = manager_with_parts();
    let deleted = record(&manager, CONTACT_DELETED);
    let alice = manager.create_contact("Alice", "alice@example.com", "");

    assert!(!manager.delete_contact("does-not-exist"));

    assert!(deleted.lock().unwrap().is_empty());
    assert_eq!(manager.get_all_contacts(), vec![alice]);
}

#[test]
fn unsubscribed_callback_is_not_invoked() {
    let (manager, _) = manager_with_parts();
    let hits = Arc::new(Mutex::new(0));
    let subscription = {
        let hits = Arc::clone(&hits);
        manager.subscribe_to_events(CONTACT_CREATED, move |_| *hits.lock().unwrap() += 1)
    };

    subscription.unsubscribe();
    manager.create_contact("Alice", "alice@example.com", "");

    assert_eq!(*hits.lock().unwrap(), 0);
}

#[test]
fn supplied_repository_is_used_by_the_manager() {
    let repo: SharedContactRepository = Arc::new(InMemoryContactRepository::new());
    repo.save(&Contact::with_id("pre-1", "Existing", "existing@example.com", ""));

    let manager = ContactManager::with_parts(Some(Arc::clone(&repo)), None);

    assert_eq!(manager.get_contact("pre-1").unwrap().name, "Existing");
    manager.create_contact("Alice", "alice@example.com", "");
    assert_eq!(repo.get_all().len(), 2);
}

#[test]
fn blank_fields_are_accepted_by_the_core() {
    let (manager, _) = manager_with_parts();
    let blank = manager.create_contact("", "", "");

    assert!(blank.validate_presence().is_err());
    assert_eq!(manager.get_all_contacts(), vec![blank]);
}

#[test]
fn update_goes_through_repository_and_publishes() {
    let (manager, repo) = manager_with_parts();
    let updated_events = record(&manager, CONTACT_UPDATED);
    let alice = manager.create_contact("Alice", "alice@example.com", "");

    let updated = manager
        .update_contact(&alice.id, ContactPatch::default().phone("555-0142"))
        .unwrap();

    assert_eq!(updated.id, alice.id);
    assert_eq!(repo.get_by_id(&alice.id).unwrap().phone, "555-0142");
    assert_eq!(updated_events.lock().unwrap().len(), 1);
    assert!(manager
        .update_contact("does-not-exist", ContactPatch::default().name("Ghost"))
        .is_none());
}

#[test]
fn projection_tracks_seeded_manager() {
    let manager = ContactManager::create();
    manager.seed_data();
    let projection = ContactListProjection::attach(&manager);
    assert_eq!(projection.len(), 2);

    let carol = manager.create_contact("Carol", "carol@example.com", "");
    let first_id = projection.rows()[0].id.clone();
    manager.delete_contact(&first_id);

    let names: Vec<_> = projection.rows().into_iter().map(|row| row.name).collect();
    assert_eq!(names, vec!["Bob Johnson".to_string(), carol.name]);
}

#[test]
fn update_racing_a_delete_does_not_resurrect_the_contact() {
    let repo: SharedContactRepository = Arc::new(DeletedBeforeUpdate {
        inner: InMemoryContactRepository::new(),
    });
    let manager = ContactManager::new(Arc::clone(&repo), ContactEventBus::new());
    let updated_events = record(&manager, CONTACT_UPDATED);
    let alice = manager.create_contact("Alice", "alice@example.com", "");

    let outcome = manager.update_contact(&alice.id, ContactPatch::default().name("Alice2"));

    assert!(outcome.is_none());
    assert!(repo.get_all().is_empty());
    assert!(manager.get_contact(&alice.id).is_none());
    assert!(updated_events.lock().unwrap().is_empty());
}

#[test]
fn repository_accessor_exposes_the_shared_store() {
    let (manager, repo) = manager_with_parts();
    let alice = manager.create_contact("Alice", "alice@example.com", "");

    assert!(Arc::ptr_eq(manager.repository(), &repo));
    assert_eq!(manager.repository().get_by_id(&alice.id), Some(alice));
}
