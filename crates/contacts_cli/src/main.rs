//! CLI smoke entry point.
//!
//! # Responsibility
//! - Wire a `ContactManager` the way a UI client does (config, factory,
//!   subscriptions) and walk through create/list/delete.
//! - Keep output deterministic apart from generated ids.

use contacts_core::{
    core_version, init_logging_from_config, Contact, ContactEvent, ContactListProjection,
    ContactManager, CoreConfig, CONTACT_CREATED, CONTACT_DELETED,
};
use log::info;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match CoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("contacts_cli: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("contacts_cli: {err}");
        return ExitCode::FAILURE;
    }

    println!("contacts_core version={}", core_version());
    let manager = ContactManager::from_config(&config);
    run_demo(&manager);
    ExitCode::SUCCESS
}

fn run_demo(manager: &ContactManager) {
    let created = manager.subscribe_to_events(CONTACT_CREATED, |event: &ContactEvent| {
        if let Some(contact) = event.contact() {
            println!("[event] created {} ({})", contact.name, contact.id);
        }
    });
    let deleted = manager.subscribe_to_events(CONTACT_DELETED, |event: &ContactEvent| {
        println!("[event] deleted {}", event.contact_id());
    });
    let projection = ContactListProjection::attach(manager);

    let draft = Contact::new("Carol White", "carol@example.com", "");
    match draft.validate_presence() {
        Ok(()) => {
            manager.create_contact(draft.name, draft.email, draft.phone);
        }
        Err(err) => println!("[form] rejected: {err}"),
    }
    if let Err(err) = Contact::new("", "nobody@example.com", "").validate_presence() {
        println!("[form] rejected: {err}");
    }
    let dave = manager.create_contact("Dave Brown", "dave@example.com", "+1-555-0102");

    print_contacts(&manager.get_all_contacts());

    println!("delete {} -> {}", dave.id, manager.delete_contact(&dave.id));
    println!(
        "delete does-not-exist -> {}",
        manager.delete_contact("does-not-exist")
    );
    println!("projection rows={}", projection.len());

    created.unsubscribe();
    deleted.unsubscribe();
    info!("event=demo_finished module=cli status=ok");
}

fn print_contacts(contacts: &[Contact]) {
    println!("contacts ({}):", contacts.len());
    for contact in contacts {
        println!(
            " - {}: {} | {} | {}",
            contact.id, contact.name, contact.email, contact.phone
        );
    }
}
