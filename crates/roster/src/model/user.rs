use super::{appointment::Appointment, dependency_message, unknown_column};
use crate::{Accessor, Actor, Entity, Filter, Record};

use roster_core::{
    schema::{Builder, Column, TableId},
    stmt::{ColumnRef, Type, Value},
    Connection, Error, Result, Schema,
};
use roster_sql::{Row, Select};

use std::{fmt, sync::OnceLock};

const TABLE: &str = "user";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub user_name: String,

    /// Stored password hash. Not loaded when the user is only joined in.
    pub password: String,

    pub status: UserStatus,
}

/// Access level of a user, stored as a small integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UserStatus {
    Inactive,
    #[default]
    Normal,
    Admin,
}

impl UserStatus {
    pub fn code(self) -> i32 {
        match self {
            UserStatus::Inactive => 0,
            UserStatus::Normal => 1,
            UserStatus::Admin => 2,
        }
    }

    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(UserStatus::Inactive),
            1 => Ok(UserStatus::Normal),
            2 => Ok(UserStatus::Admin),
            _ => Err(Error::type_conversion(Value::from(code), "UserStatus")),
        }
    }
}

impl From<UserStatus> for Value {
    fn from(status: UserStatus) -> Self {
        Value::from(status.code())
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UserStatus::Inactive => "inactive",
            UserStatus::Normal => "normal",
            UserStatus::Admin => "admin",
        })
    }
}

impl User {
    pub const USER_NAME: Accessor<User, String> =
        Accessor::new(ColumnRef::new(TABLE, "userName"), |record| record.user_name.clone());

    pub const STATUS: Accessor<User, UserStatus> =
        Accessor::new(ColumnRef::new(TABLE, "status"), |record| record.status);

    pub fn user_name_is(user_name: &str) -> Filter<User> {
        Self::USER_NAME.eq(user_name)
    }

    pub fn status_is(status: UserStatus) -> Filter<User> {
        Self::STATUS.eq(status)
    }
}

pub(super) fn declare(builder: &mut Builder) -> Result<TableId> {
    builder
        .table(TABLE, "userId")
        .unique("userName", Type::String)
        .max_length(50)
        .crypto_hash("password")
        .max_length(50)
        .column("status", Type::I32)
        .physical_name("active")
        .audit_columns()
        .finish()
}

impl Entity for User {
    const TABLE: &'static str = TABLE;
    const PRIMARY_KEY: &'static str = "userId";

    fn schema() -> Result<&'static Schema> {
        super::schema()
    }

    fn select() -> Result<&'static Select> {
        static SELECT: OnceLock<Result<Select>> = OnceLock::new();
        super::select(&SELECT, |schema| Select::builder(schema, TABLE))
    }

    fn column_value(&self, column: &Column) -> Result<Value> {
        match column.name.as_str() {
            "userName" => Ok(Value::from(&self.user_name)),
            "password" => Ok(Value::from(&self.password)),
            "status" => Ok(Value::from(self.status)),
            name => Err(unknown_column(TABLE, name)),
        }
    }

    fn from_row(row: &Row<'_>) -> Result<Self> {
        Ok(Self {
            user_name: row.get("userName")?,
            password: row.get_if_selected("password")?.unwrap_or_default(),
            status: UserStatus::from_code(row.get("status")?)?,
        })
    }

    fn save_conflict_message(cx: &mut dyn Connection, record: &Record<Self>) -> Result<String> {
        let mut filter = User::user_name_is(&record.user_name);
        if let Some(primary_key) = record.primary_key() {
            filter = filter.and(Filter::primary_key_is_not(primary_key));
        }

        if User::factory().count(cx, &filter)? > 0 {
            Ok(format!("a user named \"{}\" already exists", record.user_name))
        } else {
            Ok(String::new())
        }
    }

    fn delete_dependency_message(cx: &mut dyn Connection, record: &Record<Self>) -> Result<String> {
        let Some(primary_key) = record.primary_key() else {
            return Ok(String::new());
        };

        let count = Appointment::factory().count(cx, &Appointment::user_id_is(primary_key))?;
        Ok(dependency_message(count, "appointment", "appointments", "user"))
    }
}

impl Record<User> {
    pub fn set_user_name(&mut self, actor: &Actor, user_name: impl Into<String>) -> Result<bool> {
        self.set(actor, "userName", |user| &mut user.user_name, user_name.into())
    }

    pub fn set_password(&mut self, actor: &Actor, password: impl Into<String>) -> Result<bool> {
        self.set(actor, "password", |user| &mut user.password, password.into())
    }

    pub fn set_status(&mut self, actor: &Actor, status: UserStatus) -> Result<bool> {
        self.set(actor, "status", |user| &mut user.status, status)
    }
}
