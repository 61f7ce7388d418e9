use tests::Fixture;

use pretty_assertions::assert_eq;
use roster::{
    model::{Address, City, Country, Customer, User},
    Entity, Record, RowState,
};

#[test]
fn dependency_messages_count_referring_rows() {
    let fixture = Fixture::seeded();

    let country = fixture.get::<Country>(1);
    assert_eq!(
        Country::factory()
            .delete_dependency_message(&mut *fixture.cx(), &country)
            .unwrap(),
        "1 city refers to this country"
    );

    let country = fixture.get::<Country>(3);
    assert_eq!(
        Country::factory()
            .delete_dependency_message(&mut *fixture.cx(), &country)
            .unwrap(),
        ""
    );

    let city = fixture.get::<City>(1);
    assert_eq!(
        City::factory()
            .delete_dependency_message(&mut *fixture.cx(), &city)
            .unwrap(),
        "2 addresses refer to this city"
    );

    let address = fixture.get::<Address>(7);
    assert_eq!(
        Address::factory()
            .delete_dependency_message(&mut *fixture.cx(), &address)
            .unwrap(),
        "3 customers refer to this address"
    );

    let customer = fixture.get::<Customer>(1);
    assert_eq!(
        Customer::factory()
            .delete_dependency_message(&mut *fixture.cx(), &customer)
            .unwrap(),
        "2 appointments refer to this customer"
    );

    let user = fixture.get::<User>(3);
    assert_eq!(
        User::factory()
            .delete_dependency_message(&mut *fixture.cx(), &user)
            .unwrap(),
        ""
    );
}

#[test]
fn new_records_have_no_dependents() {
    let fixture = Fixture::seeded();
    let country = Record::<Country>::new(&fixture.actor);

    let message = Country::factory()
        .delete_dependency_message(&mut *fixture.cx(), &country)
        .unwrap();
    assert_eq!(message, "");
}

#[test]
fn save_conflicts_report_duplicate_names() {
    let fixture = Fixture::seeded();

    let mut customer = Record::<Customer>::new(&fixture.actor);
    customer.set_name(&fixture.actor, "Carol").unwrap();
    assert_eq!(
        Customer::factory()
            .save_conflict_message(&mut *fixture.cx(), &customer)
            .unwrap(),
        "a customer named \"Carol\" already exists"
    );

    // A stored record does not conflict with itself
    let carol = fixture.get::<Customer>(3);
    assert_eq!(
        Customer::factory()
            .save_conflict_message(&mut *fixture.cx(), &carol)
            .unwrap(),
        ""
    );

    let mut user = Record::<User>::new(&fixture.actor);
    user.set_user_name(&fixture.actor, "jdoe").unwrap();
    assert_eq!(
        User::factory()
            .save_conflict_message(&mut *fixture.cx(), &user)
            .unwrap(),
        "a user named \"jdoe\" already exists"
    );
}

#[test]
fn ignoring_a_conflict_fails_in_storage() {
    let fixture = Fixture::seeded();
    let mut user = Record::<User>::new(&fixture.actor);
    user.set_user_name(&fixture.actor, "admin").unwrap();
    user.set_password(&fixture.actor, "x").unwrap();

    let err = User::factory()
        .save(&mut *fixture.cx(), &mut user, &fixture.actor, false)
        .unwrap_err();
    assert!(err.is_statement());
}

#[test]
fn countries_without_dependents_can_be_deleted() {
    let fixture = Fixture::seeded();

    let mut mexico = fixture.get::<Country>(3);
    Country::factory().delete(&mut *fixture.cx(), &mut mexico).unwrap();

    let mut canada = fixture.get::<Country>(2);
    let err = Country::factory()
        .delete(&mut *fixture.cx(), &mut canada)
        .unwrap_err();
    assert!(err.is_statement());
    assert!(canada.is_persisted());
    assert_eq!(mexico.row_state(), RowState::Deleted);
}
