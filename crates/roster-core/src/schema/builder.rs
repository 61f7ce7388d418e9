use super::{AuditField, Column, ColumnCategory, ColumnId, Schema, Table, TableId};
use crate::{stmt::Type, Error, Result};

use indexmap::IndexMap;

/// Assembles a [`Schema`] one table at a time.
///
/// ```
/// use roster_core::{schema::Schema, stmt::Type};
///
/// let mut builder = Schema::builder();
/// let country = builder
///     .table("country", "countryId")
///     .column("country", Type::String)
///     .max_length(50)
///     .audit_columns()
///     .finish()
///     .unwrap();
///
/// builder
///     .table("city", "cityId")
///     .column("city", Type::String)
///     .foreign_key("countryId", country)
///     .audit_columns()
///     .finish()
///     .unwrap();
///
/// let schema = builder.build().unwrap();
/// assert_eq!(schema.tables.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    tables: IndexMap<String, Table>,
}

/// Declares the columns of a single table.
///
/// Column modifiers (`max_length`, `nullable`, `physical_name`) apply to the
/// most recently declared column. Problems are reported by [`finish`].
///
/// [`finish`]: TableBuilder::finish
#[derive(Debug)]
pub struct TableBuilder<'a> {
    schema: &'a mut Builder,
    table: Table,
    error: Option<Error>,
}

impl Builder {
    /// Starts a table whose first column is the auto-increment key.
    pub fn table(&mut self, name: &str, primary_key: &str) -> TableBuilder<'_> {
        let id = TableId(self.tables.len());
        let pk = ColumnId { table: id, index: 0 };

        let mut error = None;
        if self.tables.contains_key(&name.to_ascii_lowercase()) {
            error = Some(Error::invalid_schema(format!(
                "table `{name}` is declared twice"
            )));
        }

        TableBuilder {
            schema: self,
            table: Table {
                id,
                name: name.to_string(),
                columns: vec![Column {
                    id: pk,
                    name: primary_key.to_string(),
                    physical_name: primary_key.to_string(),
                    ty: Type::I32,
                    category: ColumnCategory::PrimaryKey,
                    max_length: None,
                    nullable: false,
                }],
                primary_key: pk,
            },
            error,
        }
    }

    pub fn build(self) -> Result<Schema> {
        Ok(Schema {
            tables: self.tables.into_values().collect(),
        })
    }
}

impl TableBuilder<'_> {
    /// Adds a data column.
    pub fn column(self, name: &str, ty: Type) -> Self {
        self.push(name, ty, ColumnCategory::Data)
    }

    /// Adds a data column whose values must be unique.
    pub fn unique(self, name: &str, ty: Type) -> Self {
        self.push(name, ty, ColumnCategory::UniqueKey)
    }

    /// Adds a column holding a password or similar hash.
    pub fn crypto_hash(self, name: &str) -> Self {
        self.push(name, Type::String, ColumnCategory::CryptoHash)
    }

    /// Adds a column referencing the primary key of `target`.
    pub fn foreign_key(mut self, name: &str, target: TableId) -> Self {
        if target.0 >= self.schema.tables.len() {
            self.fail(format!(
                "foreign key `{}.{name}` references an undeclared table",
                self.table.name
            ));
        }
        self.push(name, Type::I32, ColumnCategory::ForeignKey(target))
    }

    /// Adds the four standard audit columns.
    pub fn audit_columns(mut self) -> Self {
        for field in AuditField::ALL {
            self = self.push(field.column_name(), field.ty(), ColumnCategory::Audit(field));
            if field.ty() == Type::String {
                self = self.max_length(40);
            }
        }
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        if let Some(column) = self.table.columns.last_mut() {
            column.max_length = Some(max_length);
        }
        self
    }

    pub fn nullable(mut self) -> Self {
        if let Some(column) = self.table.columns.last_mut() {
            column.nullable = true;
        }
        self
    }

    /// Stores the last column under a different database name than its
    /// logical name.
    pub fn physical_name(mut self, name: &str) -> Self {
        let clash = self
            .table
            .columns
            .iter()
            .any(|column| column.physical_name.eq_ignore_ascii_case(name));

        if clash {
            self.fail(format!(
                "column `{}.{name}` is declared twice",
                self.table.name
            ));
        } else if let Some(column) = self.table.columns.last_mut() {
            column.physical_name = name.to_string();
        }
        self
    }

    /// Registers the table and returns its identifier.
    pub fn finish(self) -> Result<TableId> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let id = self.table.id;
        self.schema
            .tables
            .insert(self.table.name.to_ascii_lowercase(), self.table);
        Ok(id)
    }

    fn push(mut self, name: &str, ty: Type, category: ColumnCategory) -> Self {
        let clash = self.table.columns.iter().any(|column| {
            column.name.eq_ignore_ascii_case(name) || column.physical_name.eq_ignore_ascii_case(name)
        });

        if clash {
            self.fail(format!(
                "column `{}.{name}` is declared twice",
                self.table.name
            ));
            return self;
        }

        let id = ColumnId {
            table: self.table.id,
            index: self.table.columns.len(),
        };

        self.table.columns.push(Column {
            id,
            name: name.to_string(),
            physical_name: name.to_string(),
            ty,
            category,
            max_length: None,
            nullable: false,
        });
        self
    }

    fn fail(&mut self, message: String) {
        if self.error.is_none() {
            self.error = Some(Error::invalid_schema(message));
        }
    }
}
