use super::{city::City, customer::Customer, dependency_message, unknown_column};
use crate::{Accessor, Actor, Entity, Filter, Record, Reference};

use roster_core::{
    schema::{Builder, Column, TableId},
    stmt::{ColumnRef, Type, Value},
    Connection, Result, Schema,
};
use roster_sql::{Join, Row, Select};

use std::sync::OnceLock;

const TABLE: &str = "address";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    pub address1: String,
    pub address2: String,
    pub city: Reference<City>,
    pub postal_code: String,
    pub phone: String,
}

impl Address {
    pub const CITY_ID: Accessor<Address, Option<i32>> =
        Accessor::new(ColumnRef::new(TABLE, "cityId"), |record| record.city.primary_key());

    pub fn city_id_is(city_id: i32) -> Filter<Address> {
        Self::CITY_ID.eq(city_id)
    }

    /// Joins the address with its city and country in below a table
    /// holding `address_id`.
    pub(super) fn join(address_id: &str) -> Join {
        Join::left(address_id, TABLE, "addressId").join(City::join("cityId"))
    }
}

pub(super) fn declare(builder: &mut Builder, city: TableId) -> Result<TableId> {
    builder
        .table(TABLE, "addressId")
        .column("address", Type::String)
        .max_length(50)
        .column("address2", Type::String)
        .max_length(50)
        .foreign_key("cityId", city)
        .column("postalCode", Type::String)
        .max_length(10)
        .column("phone", Type::String)
        .max_length(20)
        .audit_columns()
        .finish()
}

impl Entity for Address {
    const TABLE: &'static str = TABLE;
    const PRIMARY_KEY: &'static str = "addressId";

    fn schema() -> Result<&'static Schema> {
        super::schema()
    }

    fn select() -> Result<&'static Select> {
        static SELECT: OnceLock<Result<Select>> = OnceLock::new();
        super::select(&SELECT, |schema| {
            Select::builder(schema, TABLE).join(City::join("cityId"))
        })
    }

    fn column_value(&self, column: &Column) -> Result<Value> {
        match column.name.as_str() {
            "address" => Ok(Value::from(&self.address1)),
            "address2" => Ok(Value::from(&self.address2)),
            "cityId" => Ok(Value::from(&self.city)),
            "postalCode" => Ok(Value::from(&self.postal_code)),
            "phone" => Ok(Value::from(&self.phone)),
            name => Err(unknown_column(TABLE, name)),
        }
    }

    fn from_row(row: &Row<'_>) -> Result<Self> {
        Ok(Self {
            address1: row.get("address")?,
            address2: row.get("address2")?,
            city: Reference::hydrate(row.get("cityId")?, row, "city")?,
            postal_code: row.get("postalCode")?,
            phone: row.get("phone")?,
        })
    }

    fn delete_dependency_message(cx: &mut dyn Connection, record: &Record<Self>) -> Result<String> {
        let Some(primary_key) = record.primary_key() else {
            return Ok(String::new());
        };

        let count = Customer::factory().count(cx, &Customer::address_id_is(primary_key))?;
        Ok(dependency_message(count, "customer", "customers", "address"))
    }
}

impl Record<Address> {
    pub fn set_address1(&mut self, actor: &Actor, value: impl Into<String>) -> Result<bool> {
        self.set(actor, "address", |address| &mut address.address1, value.into())
    }

    pub fn set_address2(&mut self, actor: &Actor, value: impl Into<String>) -> Result<bool> {
        self.set(actor, "address2", |address| &mut address.address2, value.into())
    }

    pub fn set_city(&mut self, actor: &Actor, city: impl Into<Reference<City>>) -> Result<bool> {
        self.set(actor, "cityId", |address| &mut address.city, city.into())
    }

    pub fn set_postal_code(&mut self, actor: &Actor, value: impl Into<String>) -> Result<bool> {
        self.set(actor, "postalCode", |address| &mut address.postal_code, value.into())
    }

    pub fn set_phone(&mut self, actor: &Actor, value: impl Into<String>) -> Result<bool> {
        self.set(actor, "phone", |address| &mut address.phone, value.into())
    }
}
