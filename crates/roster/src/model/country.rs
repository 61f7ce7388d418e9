use super::{city::City, dependency_message, unknown_column};
use crate::{Accessor, Actor, Entity, Filter, Record};

use roster_core::{
    schema::{Builder, Column, TableId},
    stmt::{ColumnRef, Type, Value},
    Connection, Result, Schema,
};
use roster_sql::{Row, Select};

use std::sync::OnceLock;

const TABLE: &str = "country";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Country {
    pub name: String,
}

impl Country {
    pub const NAME: Accessor<Country, String> =
        Accessor::new(ColumnRef::new(TABLE, "country"), |record| record.name.clone());

    pub fn name_is(name: &str) -> Filter<Country> {
        Self::NAME.eq(name)
    }
}

pub(super) fn declare(builder: &mut Builder) -> Result<TableId> {
    builder
        .table(TABLE, "countryId")
        .column("country", Type::String)
        .max_length(50)
        .audit_columns()
        .finish()
}

impl Entity for Country {
    const TABLE: &'static str = TABLE;
    const PRIMARY_KEY: &'static str = "countryId";

    fn schema() -> Result<&'static Schema> {
        super::schema()
    }

    fn select() -> Result<&'static Select> {
        static SELECT: OnceLock<Result<Select>> = OnceLock::new();
        super::select(&SELECT, |schema| Select::builder(schema, TABLE))
    }

    fn column_value(&self, column: &Column) -> Result<Value> {
        match column.name.as_str() {
            "country" => Ok(Value::from(&self.name)),
            name => Err(unknown_column(TABLE, name)),
        }
    }

    fn from_row(row: &Row<'_>) -> Result<Self> {
        Ok(Self {
            name: row.get("country")?,
        })
    }

    fn delete_dependency_message(cx: &mut dyn Connection, record: &Record<Self>) -> Result<String> {
        let Some(primary_key) = record.primary_key() else {
            return Ok(String::new());
        };

        let count = City::factory().count(cx, &City::country_id_is(primary_key))?;
        Ok(dependency_message(count, "city", "cities", "country"))
    }
}

impl Record<Country> {
    pub fn set_name(&mut self, actor: &Actor, name: impl Into<String>) -> Result<bool> {
        self.set(actor, "country", |country| &mut country.name, name.into())
    }
}
