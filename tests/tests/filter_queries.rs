use tests::{Fixture, Seed};

use pretty_assertions::assert_eq;
use roster::{
    model::{Appointment, City, Customer, User, UserStatus},
    Entity, Filter, Record, Value,
};

/// Customer names, sorted. Unordered loads make no promise about row order.
fn names(customers: &[Record<Customer>]) -> Vec<&str> {
    let mut names: Vec<_> = customers.iter().map(|customer| customer.name.as_str()).collect();
    names.sort_unstable();
    names
}

#[test]
fn and_filter_renders_both_equalities_in_order() {
    let mut fixture = Fixture::seeded();
    let filter = Customer::active_is(true).and(Customer::address_id_is(7));

    let customers = Customer::factory()
        .load(&mut *fixture.cx(), &filter)
        .unwrap();

    assert_eq!(names(&customers), ["Alice", "Dave"]);

    let op = fixture.log.pop_op();
    assert!(
        op.sql()
            .contains("WHERE \"customer\".\"active\" = ?1 AND \"customer\".\"addressId\" = ?2"),
        "{}",
        op.sql()
    );
    assert_eq!(op.params(), [Value::Bool(true), Value::I32(7)]);
}

#[test]
fn sql_and_predicate_select_the_same_rows() {
    let fixture = Fixture::seeded();
    let mirror = Customer::factory()
        .load(&mut *fixture.cx(), &Customer::all_items())
        .unwrap();
    assert_eq!(mirror.len(), Seed::CUSTOMERS.len());

    let filters = [
        Customer::active_is(true),
        Customer::active_is(false).or(Customer::address_id_is(1)),
        Customer::active_is(true).and(Customer::address_id_is(7)),
        Customer::NAME.like("%a%"),
        Customer::NAME.ge("Carol").and(Customer::ACTIVE.ne(false)),
        Customer::city_id_is(3),
        Customer::country_id_is(5),
        Filter::primary_key_is_not(2),
        Filter::created_by_is(Seed::ACTOR),
        Filter::modified_by_is("nobody"),
    ];

    for filter in filters {
        let loaded = Customer::factory()
            .load(&mut *fixture.cx(), &filter)
            .unwrap();
        let expected: Vec<_> = mirror
            .iter()
            .filter(|customer| filter.matches(customer))
            .cloned()
            .collect();

        assert_eq!(names(&loaded), names(&expected), "{filter:?}");
        assert_eq!(
            Customer::factory().count(&mut *fixture.cx(), &filter).unwrap(),
            expected.len() as u64,
            "{filter:?}"
        );
    }
}

#[test]
fn joined_columns_filter_through_the_join_tree() {
    let fixture = Fixture::seeded();

    // Addresses 3 and 7 are in London
    let customers = Customer::factory()
        .load(&mut *fixture.cx(), &Customer::city_id_is(3))
        .unwrap();
    assert_eq!(names(&customers), ["Alice", "Bob", "Dave"]);

    let customers = Customer::factory()
        .load(&mut *fixture.cx(), &Customer::country_id_is(5))
        .unwrap();
    assert_eq!(names(&customers), ["Frank"]);
}

#[test]
fn ordering_and_first() {
    let fixture = Fixture::seeded();

    let customers = Customer::factory()
        .load_ordered(
            &mut *fixture.cx(),
            &Customer::active_is(true),
            &[Customer::NAME.desc()],
        )
        .unwrap();
    let ordered: Vec<_> = customers.iter().map(|customer| customer.name.as_str()).collect();
    assert_eq!(ordered, ["Frank", "Dave", "Carol", "Alice"]);

    let first = Customer::factory()
        .load_first(&mut *fixture.cx(), &Filter::all(), &[Customer::NAME.asc()])
        .unwrap()
        .unwrap();
    assert_eq!(first.name, "Alice");

    let none = Customer::factory()
        .load_first(&mut *fixture.cx(), &Customer::name_is("Zed"), &[])
        .unwrap();
    assert!(none.is_none());
}

#[test]
fn user_status_filters_on_the_physical_column() {
    let mut fixture = Fixture::seeded();

    let users = User::factory()
        .load(&mut *fixture.cx(), &User::status_is(UserStatus::Normal))
        .unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].user_name, "jdoe");
    assert_eq!(users[0].password, "hash-of-jdoe");

    let sql = fixture.log.pop_op().sql().to_string();
    assert!(sql.contains("\"user\".\"active\" AS \"status\""), "{sql}");
    assert!(sql.contains("WHERE \"user\".\"active\" = ?1"), "{sql}");
}

#[test]
fn appointments_in_range() {
    let fixture = Fixture::seeded();
    let filter = Appointment::in_range(Seed::at(4, 12), Seed::at(5, 12));

    let appointments = Appointment::factory()
        .load_ordered(&mut *fixture.cx(), &filter, &[Appointment::START.asc()])
        .unwrap();
    let titles: Vec<_> = appointments
        .iter()
        .map(|appointment| appointment.title.as_str())
        .collect();
    assert_eq!(titles, ["Review", "Planning"]);

    for appointment in &appointments {
        assert!(filter.matches(appointment));
    }

    let count = Appointment::factory()
        .count(&mut *fixture.cx(), &Appointment::user_id_is(2))
        .unwrap();
    assert_eq!(count, 2);
}

#[test]
fn all_items_counts_everything() {
    let fixture = Fixture::seeded();

    let count = City::factory()
        .count(&mut *fixture.cx(), &City::all_items())
        .unwrap();
    assert_eq!(count, Seed::CITIES.len() as u64);
}

/// Loads every `E`, then checks that each filter selects the same keys in
/// SQL as it does over the loaded rows in memory.
#[track_caller]
fn assert_sql_agrees_with_memory<E: Entity>(fixture: &Fixture, filters: Vec<Filter<E>>) {
    let mirror = E::factory()
        .load(&mut *fixture.cx(), &E::all_items())
        .unwrap();

    for filter in filters {
        let mut loaded: Vec<_> = E::factory()
            .load(&mut *fixture.cx(), &filter)
            .unwrap()
            .iter()
            .map(|record| record.primary_key())
            .collect();
        loaded.sort_unstable();

        let mut expected: Vec<_> = mirror
            .iter()
            .filter(|record| filter.matches(record))
            .map(|record| record.primary_key())
            .collect();
        expected.sort_unstable();

        assert_eq!(loaded, expected, "{filter:?}");
    }
}

#[test]
fn timestamp_ranges_agree_in_sql_and_memory() {
    let fixture = Fixture::seeded();

    assert_sql_agrees_with_memory(
        &fixture,
        vec![
            Appointment::START.ge(Seed::at(4, 12)),
            Appointment::START.ge(Seed::at(4, 9)).and(Appointment::START.lt(Seed::at(5, 10))),
            Appointment::START.le(Seed::at(5, 10)),
            Appointment::END.gt(Seed::at(8, 16)),
            Appointment::END.eq(Seed::at(4, 16)),
            Appointment::in_range(Seed::at(4, 12), Seed::at(5, 12)),
            Appointment::customer_id_is(1).or(Appointment::user_id_is(1)),
            Filter::created_before(Seed::at(1, 0)),
            Filter::created_after(Seed::at(1, 0)),
        ],
    );

    let count = Appointment::factory()
        .count(&mut *fixture.cx(), &Appointment::START.le(Seed::at(5, 10)))
        .unwrap();
    assert_eq!(count, 3);
}

#[test]
fn bool_ranges_and_patterns_agree_in_sql_and_memory() {
    let fixture = Fixture::seeded();

    assert_sql_agrees_with_memory(
        &fixture,
        vec![
            Customer::ACTIVE.gt(false),
            Customer::ACTIVE.lt(true),
            Customer::ACTIVE.le(false).and(Customer::NAME.like("%b%")),
            Customer::ACTIVE.ge(true).and(Customer::NAME.like("_a%")),
            Customer::NAME.like("%RI%"),
            Customer::NAME.like("E%").or(Customer::ACTIVE.ne(true)),
        ],
    );

    let active = Customer::factory()
        .count(&mut *fixture.cx(), &Customer::ACTIVE.gt(false))
        .unwrap();
    assert_eq!(active, 4);

    let pattern = Customer::factory()
        .load(&mut *fixture.cx(), &Customer::ACTIVE.ge(true).and(Customer::NAME.like("_a%")))
        .unwrap();
    assert_eq!(names(&pattern), ["Carol", "Dave"]);
}
