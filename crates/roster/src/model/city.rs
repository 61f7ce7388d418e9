use super::{address::Address, country::Country, dependency_message, unknown_column};
use crate::{Accessor, Actor, Entity, Filter, Record, Reference};

use roster_core::{
    schema::{Builder, Column, TableId},
    stmt::{ColumnRef, Type, Value},
    Connection, Result, Schema,
};
use roster_sql::{Join, Row, Select};

use std::sync::OnceLock;

const TABLE: &str = "city";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct City {
    pub name: String,
    pub country: Reference<Country>,
}

impl City {
    pub const NAME: Accessor<City, String> =
        Accessor::new(ColumnRef::new(TABLE, "city"), |record| record.name.clone());

    pub const COUNTRY_ID: Accessor<City, Option<i32>> =
        Accessor::new(ColumnRef::new(TABLE, "countryId"), |record| record.country.primary_key());

    pub fn name_is(name: &str) -> Filter<City> {
        Self::NAME.eq(name)
    }

    pub fn country_id_is(country_id: i32) -> Filter<City> {
        Self::COUNTRY_ID.eq(country_id)
    }

    /// Joins the city's country in below a table holding `city_id`.
    pub(super) fn join(city_id: &str) -> Join {
        Join::left(city_id, TABLE, "cityId").join(Join::left("countryId", "country", "countryId"))
    }
}

pub(super) fn declare(builder: &mut Builder, country: TableId) -> Result<TableId> {
    builder
        .table(TABLE, "cityId")
        .column("city", Type::String)
        .max_length(50)
        .foreign_key("countryId", country)
        .audit_columns()
        .finish()
}

impl Entity for City {
    const TABLE: &'static str = TABLE;
    const PRIMARY_KEY: &'static str = "cityId";

    fn schema() -> Result<&'static Schema> {
        super::schema()
    }

    fn select() -> Result<&'static Select> {
        static SELECT: OnceLock<Result<Select>> = OnceLock::new();
        super::select(&SELECT, |schema| {
            Select::builder(schema, TABLE).join(Join::left("countryId", "country", "countryId"))
        })
    }

    fn column_value(&self, column: &Column) -> Result<Value> {
        match column.name.as_str() {
            "city" => Ok(Value::from(&self.name)),
            "countryId" => Ok(Value::from(&self.country)),
            name => Err(unknown_column(TABLE, name)),
        }
    }

    fn from_row(row: &Row<'_>) -> Result<Self> {
        Ok(Self {
            name: row.get("city")?,
            country: Reference::hydrate(row.get("countryId")?, row, "country")?,
        })
    }

    fn delete_dependency_message(cx: &mut dyn Connection, record: &Record<Self>) -> Result<String> {
        let Some(primary_key) = record.primary_key() else {
            return Ok(String::new());
        };

        let count = Address::factory().count(cx, &Address::city_id_is(primary_key))?;
        Ok(dependency_message(count, "address", "addresses", "city"))
    }
}

impl Record<City> {
    pub fn set_name(&mut self, actor: &Actor, name: impl Into<String>) -> Result<bool> {
        self.set(actor, "city", |city| &mut city.name, name.into())
    }

    pub fn set_country(&mut self, actor: &Actor, country: impl Into<Reference<Country>>) -> Result<bool> {
        self.set(actor, "countryId", |city| &mut city.country, country.into())
    }
}
