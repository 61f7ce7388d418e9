use super::{now, Actor};

use chrono::NaiveDateTime;
use roster_core::{
    schema::{AuditField, Table},
    stmt::{Load, Value},
    Error, Result,
};
use roster_sql::Row;

/// Who created and last modified a record, and when.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Audit {
    pub create_date: NaiveDateTime,
    pub created_by: String,
    pub last_modified_date: NaiveDateTime,
    pub last_modified_by: String,
}

impl Audit {
    /// All four fields set to the current time and `actor`.
    pub(crate) fn stamp(actor: &Actor) -> Self {
        let now = now();
        Self {
            create_date: now,
            created_by: actor.name().to_string(),
            last_modified_date: now,
            last_modified_by: actor.name().to_string(),
        }
    }

    pub fn value(&self, field: AuditField) -> Value {
        match field {
            AuditField::CreateDate => Value::datetime(self.create_date),
            AuditField::CreatedBy => Value::from(&self.created_by),
            AuditField::LastModifiedDate => Value::datetime(self.last_modified_date),
            AuditField::LastModifiedBy => Value::from(&self.last_modified_by),
        }
    }

    /// Reads the audit columns of the root table of `row`.
    pub(crate) fn from_row(table: &Table, row: &Row<'_>) -> Result<Self> {
        let read = |field: AuditField| -> Result<Value> {
            let alias = table
                .audit_column(field)
                .and_then(|column| row.select().root_alias(column.id))
                .ok_or_else(|| {
                    Error::invalid_statement(format!(
                        "query on `{}` does not select the `{}` audit column",
                        table.name,
                        field.column_name()
                    ))
                })?;
            row.get(alias)
        };

        Ok(Self {
            create_date: Load::load(read(AuditField::CreateDate)?)?,
            created_by: Load::load(read(AuditField::CreatedBy)?)?,
            last_modified_date: Load::load(read(AuditField::LastModifiedDate)?)?,
            last_modified_by: Load::load(read(AuditField::LastModifiedBy)?)?,
        })
    }
}
