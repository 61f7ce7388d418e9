use super::TableId;
use crate::stmt;

use std::fmt;

#[derive(Debug, PartialEq)]
pub struct Column {
    /// Uniquely identifies the column in the schema.
    pub id: ColumnId,

    /// Logical name, used as the natural result alias.
    pub name: String,

    /// The name of the column in the database.
    pub physical_name: String,

    /// The scalar type of the column's values.
    pub ty: stmt::Type,

    pub category: ColumnCategory,

    /// Upper bound on the length of string values, when the column has one.
    pub max_length: Option<usize>,

    /// Whether or not the column is nullable
    pub nullable: bool,
}

#[derive(PartialEq, Eq, Clone, Copy, Hash)]
pub struct ColumnId {
    pub table: TableId,
    pub index: usize,
}

/// What a column is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnCategory {
    /// The table's auto-increment key.
    PrimaryKey,

    /// References the primary key of another table.
    ForeignKey(TableId),

    /// One of the four tracked create/modify columns.
    Audit(AuditField),

    /// Ordinary entity data.
    Data,

    /// Entity data that must be unique across the table.
    UniqueKey,

    /// A stored hash. Never shown through joins.
    CryptoHash,
}

/// The standard audit columns every entity table carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditField {
    CreateDate,
    CreatedBy,
    LastModifiedDate,
    LastModifiedBy,
}

impl Column {
    pub fn is_primary_key(&self) -> bool {
        matches!(self.category, ColumnCategory::PrimaryKey)
    }

    pub fn is_audit(&self) -> bool {
        matches!(self.category, ColumnCategory::Audit(_))
    }

    pub fn audit_field(&self) -> Option<AuditField> {
        match self.category {
            ColumnCategory::Audit(field) => Some(field),
            _ => None,
        }
    }

    /// The table this column points at, for foreign keys.
    pub fn references(&self) -> Option<TableId> {
        match self.category {
            ColumnCategory::ForeignKey(table) => Some(table),
            _ => None,
        }
    }

    /// Part of the reduced subset selected when the owning table is only
    /// joined in for display.
    pub fn is_joined_data(&self) -> bool {
        !matches!(
            self.category,
            ColumnCategory::PrimaryKey | ColumnCategory::Audit(_) | ColumnCategory::CryptoHash
        )
    }

    pub fn is_updatable(&self) -> bool {
        !matches!(
            self.category,
            ColumnCategory::PrimaryKey
                | ColumnCategory::Audit(AuditField::CreateDate)
                | ColumnCategory::Audit(AuditField::CreatedBy)
        )
    }
}

impl AuditField {
    pub const ALL: [AuditField; 4] = [
        AuditField::CreateDate,
        AuditField::CreatedBy,
        AuditField::LastModifiedDate,
        AuditField::LastModifiedBy,
    ];

    /// Conventional column name.
    pub fn column_name(self) -> &'static str {
        match self {
            AuditField::CreateDate => "createDate",
            AuditField::CreatedBy => "createdBy",
            AuditField::LastModifiedDate => "lastUpdate",
            AuditField::LastModifiedBy => "lastUpdateBy",
        }
    }

    pub fn ty(self) -> stmt::Type {
        match self {
            AuditField::CreateDate | AuditField::LastModifiedDate => stmt::Type::DateTime,
            AuditField::CreatedBy | AuditField::LastModifiedBy => stmt::Type::String,
        }
    }
}

impl From<&Column> for ColumnId {
    fn from(value: &Column) -> Self {
        value.id
    }
}

impl fmt::Debug for ColumnId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ColumnId({}/{})", self.table.0, self.index)
    }
}
