use super::{
    address::Address, appointment::Appointment, dependency_message, unknown_column,
};
use crate::{Accessor, Actor, Entity, Filter, Record, Reference};

use roster_core::{
    schema::{Builder, Column, TableId},
    stmt::{ColumnRef, Type, Value},
    Connection, Result, Schema,
};
use roster_sql::{Row, Select};

use std::sync::OnceLock;

const TABLE: &str = "customer";

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub name: String,
    pub address: Reference<Address>,
    pub active: bool,
}

impl Customer {
    pub const NAME: Accessor<Customer, String> =
        Accessor::new(ColumnRef::new(TABLE, "customerName"), |record| record.name.clone());

    pub const ADDRESS_ID: Accessor<Customer, Option<i32>> =
        Accessor::new(ColumnRef::new(TABLE, "addressId"), |record| {
            record.address.primary_key()
        });

    pub const ACTIVE: Accessor<Customer, bool> =
        Accessor::new(ColumnRef::new(TABLE, "active"), |record| record.active);

    /// Reads through the joined address. Loads and saves both bring the
    /// address in, so only records whose address changed since then miss.
    pub const CITY_ID: Accessor<Customer, Option<i32>> =
        Accessor::new(ColumnRef::new("address", "cityId"), |record| {
            record.address.partial().and_then(|address| address.city.primary_key())
        });

    pub const COUNTRY_ID: Accessor<Customer, Option<i32>> =
        Accessor::new(ColumnRef::new("city", "countryId"), |record| {
            record
                .address
                .partial()
                .and_then(|address| address.city.partial())
                .and_then(|city| city.country.primary_key())
        });

    pub fn name_is(name: &str) -> Filter<Customer> {
        Self::NAME.eq(name)
    }

    pub fn address_id_is(address_id: i32) -> Filter<Customer> {
        Self::ADDRESS_ID.eq(address_id)
    }

    pub fn active_is(active: bool) -> Filter<Customer> {
        Self::ACTIVE.eq(active)
    }

    pub fn city_id_is(city_id: i32) -> Filter<Customer> {
        Self::CITY_ID.eq(city_id)
    }

    pub fn country_id_is(country_id: i32) -> Filter<Customer> {
        Self::COUNTRY_ID.eq(country_id)
    }
}

impl Default for Customer {
    fn default() -> Self {
        Self {
            name: String::new(),
            address: Reference::empty(),
            active: true,
        }
    }
}

pub(super) fn declare(builder: &mut Builder, address: TableId) -> Result<TableId> {
    builder
        .table(TABLE, "customerId")
        .unique("customerName", Type::String)
        .max_length(45)
        .foreign_key("addressId", address)
        .column("active", Type::Bool)
        .audit_columns()
        .finish()
}

impl Entity for Customer {
    const TABLE: &'static str = TABLE;
    const PRIMARY_KEY: &'static str = "customerId";

    fn schema() -> Result<&'static Schema> {
        super::schema()
    }

    fn select() -> Result<&'static Select> {
        static SELECT: OnceLock<Result<Select>> = OnceLock::new();
        super::select(&SELECT, |schema| {
            Select::builder(schema, TABLE).join(Address::join("addressId"))
        })
    }

    fn column_value(&self, column: &Column) -> Result<Value> {
        match column.name.as_str() {
            "customerName" => Ok(Value::from(&self.name)),
            "addressId" => Ok(Value::from(&self.address)),
            "active" => Ok(Value::from(self.active)),
            name => Err(unknown_column(TABLE, name)),
        }
    }

    fn from_row(row: &Row<'_>) -> Result<Self> {
        Ok(Self {
            name: row.get("customerName")?,
            address: Reference::hydrate(row.get("addressId")?, row, "address")?,
            active: row.get("active")?,
        })
    }

    fn save_conflict_message(cx: &mut dyn Connection, record: &Record<Self>) -> Result<String> {
        let mut filter = Customer::name_is(&record.name);
        if let Some(primary_key) = record.primary_key() {
            filter = filter.and(Filter::primary_key_is_not(primary_key));
        }

        if Customer::factory().count(cx, &filter)? > 0 {
            Ok(format!("a customer named \"{}\" already exists", record.name))
        } else {
            Ok(String::new())
        }
    }

    fn delete_dependency_message(cx: &mut dyn Connection, record: &Record<Self>) -> Result<String> {
        let Some(primary_key) = record.primary_key() else {
            return Ok(String::new());
        };

        let count = Appointment::factory().count(cx, &Appointment::customer_id_is(primary_key))?;
        Ok(dependency_message(count, "appointment", "appointments", "customer"))
    }
}

impl Record<Customer> {
    pub fn set_name(&mut self, actor: &Actor, name: impl Into<String>) -> Result<bool> {
        self.set(actor, "customerName", |customer| &mut customer.name, name.into())
    }

    pub fn set_address(&mut self, actor: &Actor, address: impl Into<Reference<Address>>) -> Result<bool> {
        self.set(actor, "addressId", |customer| &mut customer.address, address.into())
    }

    pub fn set_active(&mut self, actor: &Actor, active: bool) -> Result<bool> {
        self.set(actor, "active", |customer| &mut customer.active, active)
    }
}
