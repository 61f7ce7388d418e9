use tests::{Fixture, Seed};

use pretty_assertions::assert_eq;
use roster::{
    model::{Country, Customer},
    Actor, Db, Driver, Entity, Record, Shared,
};

use std::{
    sync::{Arc, Mutex},
    thread,
};

fn assert_sync_send<T: Send + Sync>(_: &T) {}

#[test]
fn connect_from_url() {
    tests::init_logging();

    let db = Db::builder().connect("sqlite::memory:").unwrap();
    assert_eq!(db.driver().url(), "sqlite::memory:");
    assert_eq!(db.schema().tables.len(), 6);

    db.push_schema().unwrap();
    let count = Country::factory()
        .count(&mut *db.connection(), &Country::all_items())
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn unsupported_scheme_is_rejected() {
    let err = Db::builder().connect("postgresql://localhost/roster").unwrap_err();
    assert!(err.is_invalid_connection_url());

    let err = Db::builder().connect("not a url").unwrap_err();
    assert!(err.is_invalid_connection_url());
}

#[test]
fn sqlite_url_needs_a_database() {
    let err = Db::builder().connect("sqlite:").unwrap_err();
    assert!(err.is_invalid_connection_url());
}

#[test]
fn statements_before_schema_push_are_rejected() {
    let db = Db::builder().connect("sqlite::memory:").unwrap();
    let err = Country::factory()
        .load(&mut *db.connection(), &Country::all_items())
        .unwrap_err();
    assert!(err.is_statement());
}

#[test]
fn db_is_shared_across_threads() {
    let fixture = Fixture::seeded();
    assert_sync_send(&fixture.db);

    thread::scope(|scope| {
        for index in 0..4 {
            let db = &fixture.db;
            scope.spawn(move || {
                let actor = Actor::new(format!("worker-{index}"));
                let mut country = Record::<Country>::new(&actor);
                country.set_name(&actor, format!("Country {index}")).unwrap();
                Country::factory()
                    .save(&mut *db.connection(), &mut country, &actor, false)
                    .unwrap();
            });
        }
    });

    let count = Country::factory()
        .count(&mut *fixture.cx(), &Country::all_items())
        .unwrap();
    assert_eq!(count, Seed::COUNTRIES.len() as u64 + 4);
}

#[test]
fn shared_record_is_edited_under_its_lock() {
    let fixture = Fixture::seeded();
    let customer: Shared<Customer> = Arc::new(Mutex::new(fixture.get::<Customer>(2)));
    assert_sync_send(&customer);

    thread::scope(|scope| {
        let customer = &customer;
        let actor = &fixture.actor;
        scope.spawn(move || {
            let mut customer = customer.lock().unwrap();
            customer.set_active(actor, true).unwrap();
        });
    });

    let mut customer = customer.lock().unwrap();
    assert!(customer.is_modified());
    fixture.save(&mut *customer);

    let reloaded = fixture.get::<Customer>(2);
    assert!(reloaded.active);
    assert_eq!(reloaded.last_modified_by(), "tester");
}
