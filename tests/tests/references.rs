use tests::Fixture;

use pretty_assertions::assert_eq;
use roster::{
    model::{Address, Appointment, City, Country, Customer},
    Entity, Fidelity, Record, Reference, RowState,
};

#[test]
fn city_bound_to_country_resolves_after_reload() {
    let fixture = Fixture::seeded();
    let mut city = Record::<City>::new(&fixture.actor);
    city.set_name(&fixture.actor, "Munich").unwrap();
    city.set_country(&fixture.actor, Reference::key(5)).unwrap();
    fixture.save(&mut city);

    let primary_key = city.primary_key().unwrap();
    assert!(primary_key > 0);
    assert_eq!(city.row_state(), RowState::Unmodified);

    let mut reloaded = fixture.get::<City>(primary_key);
    assert_eq!(reloaded.country.fidelity(), Fidelity::Partial);

    let country = reloaded
        .data()
        .country
        .clone()
        .ensure_partial(&mut *fixture.cx())
        .unwrap()
        .map(|country| country.name.clone());
    assert_eq!(country.as_deref(), Some("Germany"));

    // The partial copy joined in with the city carries no audit data
    let partial = reloaded.country.partial().unwrap();
    assert_eq!(partial.primary_key(), Some(5));
    assert_eq!(partial.created_by(), "");

    let unchanged = reloaded.set_country(&fixture.actor, Reference::key(5)).unwrap();
    assert!(!unchanged);
}

#[test]
fn ensure_is_idempotent_and_upgrades() {
    let fixture = Fixture::seeded();
    let mut country = Reference::<Country>::key(2);

    let name = country
        .ensure_partial(&mut *fixture.cx())
        .unwrap()
        .map(|country| country.name.clone());
    assert_eq!(name.as_deref(), Some("Canada"));
    assert_eq!(country.fidelity(), Fidelity::Full);
    assert_eq!(fixture.log.queries(), 1);

    country.ensure_partial(&mut *fixture.cx()).unwrap();
    country.ensure_full(&mut *fixture.cx()).unwrap();
    assert_eq!(fixture.log.queries(), 1);
    assert_eq!(country.full().unwrap().created_by(), "seed");
}

#[test]
fn partial_upgrades_to_full_without_changing_identity() {
    let fixture = Fixture::seeded();
    let city = fixture.get::<City>(3);
    let mut country = city.data().country.clone();
    assert_eq!(country.fidelity(), Fidelity::Partial);

    let before = country.clone();
    let full = country.ensure_full(&mut *fixture.cx()).unwrap().unwrap();
    assert_eq!(full.primary_key(), Some(4));
    assert_eq!(full.name, "United Kingdom");
    assert_eq!(country.fidelity(), Fidelity::Full);
    assert_eq!(country, before);
}

#[test]
fn missing_target_is_a_soft_miss() {
    let fixture = Fixture::seeded();
    let mut country = Reference::<Country>::key(99);

    let resolved = country.ensure_full(&mut *fixture.cx()).unwrap();
    assert!(resolved.is_none());
    assert!(country.is_empty());
    assert_eq!(country.primary_key(), None);

    let mut empty = Reference::<Country>::empty();
    assert!(empty.ensure_partial(&mut *fixture.cx()).unwrap().is_none());
}

#[test]
fn nested_joins_hydrate_partial_chain() {
    let fixture = Fixture::seeded();
    let customer = fixture.get::<Customer>(6);

    let address = customer.address.partial().unwrap();
    assert_eq!(address.address1, "4 Unter den Linden");

    let city = address.city.partial().unwrap();
    assert_eq!(city.name, "Berlin");

    let country = city.country.partial().unwrap();
    assert_eq!(country.name, "Germany");
    assert_eq!(country.primary_key(), Some(5));
}

#[test]
fn references_beyond_the_join_tree_keep_only_the_key() {
    let fixture = Fixture::seeded();
    let appointment = fixture.get::<Appointment>(1);

    let customer = appointment.customer.partial().unwrap();
    assert_eq!(customer.name, "Alice");
    assert_eq!(customer.address.fidelity(), Fidelity::Key);
    assert_eq!(customer.address.primary_key(), Some(7));

    let user = appointment.user.partial().unwrap();
    assert_eq!(user.user_name, "admin");
    assert_eq!(user.password, "");
}

#[test]
fn key_and_loaded_references_are_equal() {
    let fixture = Fixture::seeded();
    let address = fixture.get::<Address>(3);
    let loaded = Reference::from(address);

    assert_eq!(loaded, Reference::key(3));
    assert_ne!(loaded, Reference::key(4));
    assert_ne!(loaded, Reference::empty());
    assert_eq!(Reference::<Address>::empty(), Reference::empty());
}

#[test]
fn dangling_foreign_key_is_rejected_by_storage() {
    let fixture = Fixture::seeded();
    let mut city = Record::<City>::new(&fixture.actor);
    city.set_name(&fixture.actor, "Nowhere").unwrap();
    city.set_country(&fixture.actor, Reference::key(42)).unwrap();

    let err = City::factory()
        .save(&mut *fixture.cx(), &mut city, &fixture.actor, false)
        .unwrap_err();
    assert!(err.is_statement());
    assert_eq!(city.row_state(), RowState::New);
    assert_eq!(city.primary_key(), None);
}

#[test]
fn saved_records_carry_joined_reference_data() {
    let fixture = Fixture::seeded();
    let mut zoe = Record::<Customer>::new(&fixture.actor);
    zoe.set_name(&fixture.actor, "Zoe").unwrap();
    zoe.set_address(&fixture.actor, Reference::key(7)).unwrap();
    assert_eq!(zoe.address.fidelity(), Fidelity::Key);
    fixture.save(&mut zoe);

    // 7 Oxford St is in London
    assert_eq!(zoe.address.fidelity(), Fidelity::Partial);
    assert_eq!(zoe.row_state(), RowState::Unmodified);
    for filter in [Customer::city_id_is(3), Customer::country_id_is(4)] {
        let stored = Customer::factory()
            .load(&mut *fixture.cx(), &filter)
            .unwrap()
            .into_iter()
            .any(|customer| customer.primary_key() == zoe.primary_key());
        assert!(stored, "{filter:?}");
        assert!(filter.matches(&zoe), "{filter:?}");
    }

    // Updates pick up the new address the same way
    zoe.set_address(&fixture.actor, Reference::key(4)).unwrap();
    assert!(!Customer::city_id_is(4).matches(&zoe));
    fixture.save(&mut zoe);
    assert!(Customer::city_id_is(4).matches(&zoe));
    assert!(Customer::country_id_is(5).matches(&zoe));

    // The accepted copy holds the joined data too
    zoe.set_name(&fixture.actor, "Zoey").unwrap();
    assert!(zoe.reject_changes().unwrap());
    assert_eq!(zoe.name, "Zoe");
    assert!(Customer::city_id_is(4).matches(&zoe));
}
