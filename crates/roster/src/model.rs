//! The scheduling entities: countries, cities, addresses, customers, users
//! and their appointments.

mod address;
pub use address::Address;

mod appointment;
pub use appointment::Appointment;

mod city;
pub use city::City;

mod country;
pub use country::Country;

mod customer;
pub use customer::Customer;

mod user;
pub use user::{User, UserStatus};

use crate::entity::cached;

use chrono::{NaiveDateTime, Timelike};
use roster_core::{Error, Result, Schema};
use roster_sql::{Select, SelectBuilder};

use std::sync::OnceLock;

/// The registry of every entity table, built on first use.
pub fn schema() -> Result<&'static Schema> {
    static SCHEMA: OnceLock<Result<Schema>> = OnceLock::new();

    cached(&SCHEMA, || {
        let mut builder = Schema::builder();
        let country = country::declare(&mut builder)?;
        let city = city::declare(&mut builder, country)?;
        let address = address::declare(&mut builder, city)?;
        let customer = customer::declare(&mut builder, address)?;
        let user = user::declare(&mut builder)?;
        appointment::declare(&mut builder, customer, user)?;
        builder.build()
    })
}

fn select(
    cell: &'static OnceLock<Result<Select>>,
    declare: impl FnOnce(&'static Schema) -> SelectBuilder<'static>,
) -> Result<&'static Select> {
    cached(cell, || declare(schema()?).build())
}

fn unknown_column(table: &str, column: &str) -> Error {
    Error::invalid_schema(format!("`{table}` has no writable column `{column}`"))
}

/// Explains why a row cannot be deleted while others refer to it.
fn dependency_message(count: u64, singular: &str, plural: &str, target: &str) -> String {
    match count {
        0 => String::new(),
        1 => format!("1 {singular} refers to this {target}"),
        n => format!("{n} {plural} refer to this {target}"),
    }
}

/// Timestamps are stored with whole-second precision.
fn whole_seconds(at: NaiveDateTime) -> NaiveDateTime {
    at.with_nanosecond(0).unwrap_or(at)
}
