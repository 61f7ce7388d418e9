use super::{customer::Customer, unknown_column, user::User, whole_seconds};
use crate::{Accessor, Actor, Entity, Filter, Record, Reference};

use chrono::NaiveDateTime;
use roster_core::{
    schema::{Builder, Column, TableId},
    stmt::{ColumnRef, Type, Value},
    Result, Schema,
};
use roster_sql::{Join, Row, Select};

use std::sync::OnceLock;

const TABLE: &str = "appointment";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Appointment {
    pub customer: Reference<Customer>,
    pub user: Reference<User>,
    pub title: String,
    pub description: String,
    pub location: String,
    pub contact: String,
    pub kind: String,
    pub url: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Appointment {
    pub const CUSTOMER_ID: Accessor<Appointment, Option<i32>> =
        Accessor::new(ColumnRef::new(TABLE, "customerId"), |record| {
            record.customer.primary_key()
        });

    pub const USER_ID: Accessor<Appointment, Option<i32>> =
        Accessor::new(ColumnRef::new(TABLE, "userId"), |record| record.user.primary_key());

    pub const START: Accessor<Appointment, NaiveDateTime> =
        Accessor::new(ColumnRef::new(TABLE, "start"), |record| record.start);

    pub const END: Accessor<Appointment, NaiveDateTime> =
        Accessor::new(ColumnRef::new(TABLE, "end"), |record| record.end);

    pub fn customer_id_is(customer_id: i32) -> Filter<Appointment> {
        Self::CUSTOMER_ID.eq(customer_id)
    }

    pub fn user_id_is(user_id: i32) -> Filter<Appointment> {
        Self::USER_ID.eq(user_id)
    }

    pub fn starts_before(at: NaiveDateTime) -> Filter<Appointment> {
        Self::START.lt(at)
    }

    pub fn ends_after(at: NaiveDateTime) -> Filter<Appointment> {
        Self::END.gt(at)
    }

    /// Appointments overlapping the half-open range `[start, end)`.
    pub fn in_range(start: NaiveDateTime, end: NaiveDateTime) -> Filter<Appointment> {
        Self::starts_before(end).and(Self::ends_after(start))
    }
}

pub(super) fn declare(builder: &mut Builder, customer: TableId, user: TableId) -> Result<TableId> {
    builder
        .table(TABLE, "appointmentId")
        .foreign_key("customerId", customer)
        .foreign_key("userId", user)
        .column("title", Type::String)
        .max_length(255)
        .column("description", Type::String)
        .column("location", Type::String)
        .column("contact", Type::String)
        .column("type", Type::String)
        .column("url", Type::String)
        .max_length(255)
        .column("start", Type::DateTime)
        .column("end", Type::DateTime)
        .audit_columns()
        .finish()
}

impl Entity for Appointment {
    const TABLE: &'static str = TABLE;
    const PRIMARY_KEY: &'static str = "appointmentId";

    fn schema() -> Result<&'static Schema> {
        super::schema()
    }

    fn select() -> Result<&'static Select> {
        static SELECT: OnceLock<Result<Select>> = OnceLock::new();
        super::select(&SELECT, |schema| {
            Select::builder(schema, TABLE)
                .join(Join::left("customerId", "customer", "customerId"))
                .join(Join::left("userId", "user", "userId"))
        })
    }

    fn column_value(&self, column: &Column) -> Result<Value> {
        match column.name.as_str() {
            "customerId" => Ok(Value::from(&self.customer)),
            "userId" => Ok(Value::from(&self.user)),
            "title" => Ok(Value::from(&self.title)),
            "description" => Ok(Value::from(&self.description)),
            "location" => Ok(Value::from(&self.location)),
            "contact" => Ok(Value::from(&self.contact)),
            "type" => Ok(Value::from(&self.kind)),
            "url" => Ok(Value::from(&self.url)),
            "start" => Ok(Value::from(self.start)),
            "end" => Ok(Value::from(self.end)),
            name => Err(unknown_column(TABLE, name)),
        }
    }

    fn from_row(row: &Row<'_>) -> Result<Self> {
        Ok(Self {
            customer: Reference::hydrate(row.get("customerId")?, row, "customerName")?,
            user: Reference::hydrate(row.get("userId")?, row, "userName")?,
            title: row.get("title")?,
            description: row.get("description")?,
            location: row.get("location")?,
            contact: row.get("contact")?,
            kind: row.get("type")?,
            url: row.get("url")?,
            start: row.get("start")?,
            end: row.get("end")?,
        })
    }
}

impl Record<Appointment> {
    pub fn set_customer(&mut self, actor: &Actor, customer: impl Into<Reference<Customer>>) -> Result<bool> {
        self.set(actor, "customerId", |appointment| &mut appointment.customer, customer.into())
    }

    pub fn set_user(&mut self, actor: &Actor, user: impl Into<Reference<User>>) -> Result<bool> {
        self.set(actor, "userId", |appointment| &mut appointment.user, user.into())
    }

    pub fn set_title(&mut self, actor: &Actor, title: impl Into<String>) -> Result<bool> {
        self.set(actor, "title", |appointment| &mut appointment.title, title.into())
    }

    pub fn set_description(&mut self, actor: &Actor, value: impl Into<String>) -> Result<bool> {
        self.set(actor, "description", |appointment| &mut appointment.description, value.into())
    }

    pub fn set_location(&mut self, actor: &Actor, value: impl Into<String>) -> Result<bool> {
        self.set(actor, "location", |appointment| &mut appointment.location, value.into())
    }

    pub fn set_contact(&mut self, actor: &Actor, value: impl Into<String>) -> Result<bool> {
        self.set(actor, "contact", |appointment| &mut appointment.contact, value.into())
    }

    pub fn set_kind(&mut self, actor: &Actor, value: impl Into<String>) -> Result<bool> {
        self.set(actor, "type", |appointment| &mut appointment.kind, value.into())
    }

    pub fn set_url(&mut self, actor: &Actor, value: impl Into<String>) -> Result<bool> {
        self.set(actor, "url", |appointment| &mut appointment.url, value.into())
    }

    pub fn set_start(&mut self, actor: &Actor, start: NaiveDateTime) -> Result<bool> {
        self.set(actor, "start", |appointment| &mut appointment.start, whole_seconds(start))
    }

    pub fn set_end(&mut self, actor: &Actor, end: NaiveDateTime) -> Result<bool> {
        self.set(actor, "end", |appointment| &mut appointment.end, whole_seconds(end))
    }
}
