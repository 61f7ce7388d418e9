use tests::{Fixture, Seed};

use pretty_assertions::assert_eq;
use roster::{
    model::{Country, Customer},
    Actor, ChangeEvent, Entity, Record, Reference, RowState, SaveOutcome,
};

#[test]
fn insert_then_load_round_trips() {
    let fixture = Fixture::seeded();
    let mut customer = Customer::factory().create_new(&fixture.actor);
    customer.set_name(&fixture.actor, "Grace").unwrap();
    customer.set_address(&fixture.actor, Reference::key(3)).unwrap();
    customer.set_active(&fixture.actor, false).unwrap();

    let outcome = Customer::factory()
        .save(&mut *fixture.cx(), &mut customer, &fixture.actor, false)
        .unwrap();

    assert_eq!(outcome, SaveOutcome::Inserted);
    assert_eq!(customer.row_state(), RowState::Unmodified);
    let primary_key = customer.primary_key().unwrap();
    assert!(primary_key > 0);

    let loaded = fixture.get::<Customer>(primary_key);
    assert_eq!(loaded.data(), customer.data());
    assert_eq!(loaded.audit(), customer.audit());
    assert_eq!(loaded.created_by(), "tester");
}

#[test]
fn generated_keys_increase() {
    let fixture = Fixture::empty();
    let mut keys = vec![];

    for name in ["A", "B", "C"] {
        let mut country = Record::<Country>::new(&fixture.actor);
        country.set_name(&fixture.actor, name).unwrap();
        fixture.save(&mut country);
        keys.push(country.primary_key().unwrap());
    }

    assert_eq!(keys, [1, 2, 3]);
}

#[test]
fn loaded_records_are_unmodified_and_quiet() {
    let fixture = Fixture::seeded();
    let countries = Country::factory()
        .load(&mut *fixture.cx(), &Country::all_items())
        .unwrap();

    assert_eq!(countries.len(), Seed::COUNTRIES.len());
    for country in &countries {
        assert_eq!(country.row_state(), RowState::Unmodified);
        assert_eq!(country.created_by(), Seed::ACTOR);
    }
}

#[test]
fn mutations_mark_modified_exactly_once() {
    let fixture = Fixture::seeded();
    let mut country = fixture.get::<Country>(2);
    let events = country.subscribe();

    country.set_name(&fixture.actor, "Kanada").unwrap();
    country.set_name(&fixture.actor, "Canada, eh").unwrap();
    country.set_name(&fixture.actor, "Canada").unwrap();

    assert_eq!(country.row_state(), RowState::Modified);
    assert_eq!(country.last_modified_by(), "tester");

    let transitions: Vec<_> = events
        .try_iter()
        .filter(|event| matches!(event, ChangeEvent::RowState { .. }))
        .collect();
    assert_eq!(
        transitions,
        [ChangeEvent::RowState {
            old: RowState::Unmodified,
            new: RowState::Modified,
        }]
    );
}

#[test]
fn update_writes_changes() {
    let fixture = Fixture::seeded();
    let mut country = fixture.get::<Country>(3);
    country.set_name(&fixture.actor, "Estados Unidos Mexicanos").unwrap();

    let outcome = Country::factory()
        .save(&mut *fixture.cx(), &mut country, &fixture.actor, false)
        .unwrap();

    assert_eq!(outcome, SaveOutcome::Updated);
    assert_eq!(country.row_state(), RowState::Unmodified);

    let loaded = fixture.get::<Country>(3);
    assert_eq!(loaded.name, "Estados Unidos Mexicanos");
    assert_eq!(loaded.created_by(), Seed::ACTOR);
    assert_eq!(loaded.last_modified_by(), "tester");
}

#[test]
fn unchanged_save_is_skipped_unless_forced() {
    let mut fixture = Fixture::seeded();
    let mut country = fixture.get::<Country>(1);
    fixture.log.clear();

    let outcome = Country::factory()
        .save(&mut *fixture.cx(), &mut country, &fixture.actor, false)
        .unwrap();
    assert_eq!(outcome, SaveOutcome::Unchanged);
    assert!(fixture.log.is_empty());

    let editor = Actor::new("editor");
    let outcome = Country::factory()
        .save(&mut *fixture.cx(), &mut country, &editor, true)
        .unwrap();
    assert_eq!(outcome, SaveOutcome::Updated);
    assert!(fixture.log.has_exec_sql());
    assert_eq!(country.last_modified_by(), "editor");
    assert_eq!(country.created_by(), Seed::ACTOR);

    assert_eq!(fixture.get::<Country>(1).last_modified_by(), "editor");
}

#[test]
fn delete_requires_a_persisted_record() {
    let fixture = Fixture::seeded();
    let mut fresh = Record::<Country>::new(&fixture.actor);

    let err = Country::factory()
        .delete(&mut *fixture.cx(), &mut fresh)
        .unwrap_err();
    assert!(err.is_state_error());
    assert_eq!(fresh.row_state(), RowState::New);
}

#[test]
fn deleted_records_stay_deleted_until_reset() {
    let fixture = Fixture::empty();
    let mut country = Record::<Country>::new(&fixture.actor);
    country.set_name(&fixture.actor, "Atlantis").unwrap();
    fixture.save(&mut country);
    let first_key = country.primary_key().unwrap();

    Country::factory()
        .delete(&mut *fixture.cx(), &mut country)
        .unwrap();
    assert_eq!(country.row_state(), RowState::Deleted);
    assert!(Country::factory()
        .load_by_primary_key(&mut *fixture.cx(), first_key)
        .unwrap()
        .is_none());

    let err = Country::factory()
        .delete(&mut *fixture.cx(), &mut country)
        .unwrap_err();
    assert!(err.is_state_error());

    let err = Country::factory()
        .save(&mut *fixture.cx(), &mut country, &fixture.actor, true)
        .unwrap_err();
    assert!(err.is_state_error());

    let err = country.set_name(&fixture.actor, "Lemuria").unwrap_err();
    assert!(err.is_state_error());

    assert!(country.reset_row_state(&fixture.actor));
    assert_eq!(country.row_state(), RowState::New);
    assert_eq!(country.primary_key(), None);

    fixture.save(&mut country);
    assert_ne!(country.primary_key(), Some(first_key));
    assert_eq!(fixture.get::<Country>(country.primary_key().unwrap()).name, "Atlantis");
}

#[test]
fn update_of_vanished_row_is_a_consistency_fault() {
    let fixture = Fixture::seeded();
    let mut stale = fixture.get::<Country>(3);
    let mut other = fixture.get::<Country>(3);

    Country::factory()
        .delete(&mut *fixture.cx(), &mut other)
        .unwrap();

    stale.set_name(&fixture.actor, "Gone").unwrap();
    let err = Country::factory()
        .save(&mut *fixture.cx(), &mut stale, &fixture.actor, false)
        .unwrap_err();
    assert!(err.is_consistency_fault());
    assert_eq!(stale.row_state(), RowState::Modified);

    let err = Country::factory()
        .delete(&mut *fixture.cx(), &mut stale)
        .unwrap_err();
    assert!(err.is_consistency_fault());
}

#[test]
fn refresh_discards_changes_with_one_event() {
    let fixture = Fixture::seeded();
    let mut country = fixture.get::<Country>(4);
    country.set_name(&fixture.actor, "Great Britain").unwrap();
    let events = country.subscribe();

    Country::factory()
        .refresh(&mut *fixture.cx(), &mut country)
        .unwrap();

    assert_eq!(country.name, "United Kingdom");
    assert_eq!(country.row_state(), RowState::Unmodified);
    assert_eq!(events.try_iter().collect::<Vec<_>>(), [ChangeEvent::Hydrated]);
}

#[test]
fn refresh_of_missing_row_fails() {
    let fixture = Fixture::seeded();
    let mut country = fixture.get::<Country>(3);
    let mut copy = country.clone();
    Country::factory()
        .delete(&mut *fixture.cx(), &mut copy)
        .unwrap();

    let err = Country::factory()
        .refresh(&mut *fixture.cx(), &mut country)
        .unwrap_err();
    assert!(err.is_consistency_fault());
}

#[test]
fn reject_changes_restores_stored_values() {
    let fixture = Fixture::seeded();
    let mut customer = fixture.get::<Customer>(1);
    let stored = customer.data().clone();
    let audit = customer.audit().clone();

    customer.set_name(&fixture.actor, "Alicia").unwrap();
    customer.set_active(&fixture.actor, false).unwrap();
    let events = customer.subscribe();

    assert!(customer.reject_changes().unwrap());
    assert_eq!(customer.data(), &stored);
    assert_eq!(customer.audit(), &audit);
    assert_eq!(customer.row_state(), RowState::Unmodified);

    let names: Vec<_> = events.try_iter().filter_map(|event| event.name()).collect();
    assert!(names.contains(&"customerName"));
    assert!(names.contains(&"active"));
    assert!(names.contains(&"rowState"));
    assert!(!customer.reject_changes().unwrap());
}

#[test]
fn declared_lengths_are_enforced_before_writing() {
    let mut fixture = Fixture::seeded();

    let mut country = Record::<Country>::new(&fixture.actor);
    country.set_name(&fixture.actor, &"x".repeat(51)).unwrap();
    let err = Country::factory()
        .save(&mut *fixture.cx(), &mut country, &fixture.actor, false)
        .unwrap_err();
    assert!(err.is_statement());
    assert_eq!(
        err.to_string(),
        "statement error: country.country holds 51 characters, at most 50 allowed"
    );
    assert_eq!(country.row_state(), RowState::New);
    assert_eq!(country.primary_key(), None);

    let mut canada = fixture.get::<Country>(2);
    fixture.log.clear();
    canada.set_name(&fixture.actor, &"é".repeat(50)).unwrap();
    fixture.save(&mut canada);
    assert!(fixture.log.has_exec_sql());

    canada.set_name(&fixture.actor, &"é".repeat(51)).unwrap();
    let err = Country::factory()
        .save(&mut *fixture.cx(), &mut canada, &fixture.actor, false)
        .unwrap_err();
    assert!(err.is_statement());
    assert_eq!(canada.row_state(), RowState::Modified);
    assert_eq!(fixture.get::<Country>(2).name, "é".repeat(50));
}
