use super::{JoinClause, Select, SelectColumn, SelectTable};

use roster_core::{
    schema::{Column, Schema, Table},
    Error, Result,
};

use indexmap::IndexMap;

/// Declares a SELECT over a root table and a tree of joins.
///
/// Nothing is resolved until [`build`](SelectBuilder::build), which walks the
/// tree depth-first, assigns result aliases and rejects every ambiguity it
/// finds.
#[derive(Debug)]
pub struct SelectBuilder<'a> {
    schema: &'a Schema,
    root: TableSpec,
}

/// A join from a column of the enclosing table to a column of `table`.
#[derive(Debug, Clone)]
pub struct Join {
    kind: JoinKind,
    parent_column: String,
    column: String,
    spec: TableSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
}

/// Which columns a table contributes to the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Columns {
    /// Every column. Used when the rows are loaded as full records.
    Full,

    /// Every column except the key, audit and hash columns. Used for tables
    /// joined in only to show data about a referenced row.
    ForJoinedData,

    /// Exactly these columns, by logical name.
    Only(Vec<String>),
}

#[derive(Debug, Clone)]
struct TableSpec {
    table: String,
    alias: Option<String>,
    columns: Columns,

    /// Logical column name to explicit result alias
    column_aliases: Vec<(String, String)>,

    joins: Vec<Join>,
}

impl<'a> SelectBuilder<'a> {
    pub fn new(schema: &'a Schema, table: &str) -> Self {
        Self {
            schema,
            root: TableSpec::new(table, Columns::Full),
        }
    }

    /// Sets the root table's alias. Defaults to the table name.
    pub fn alias(mut self, alias: &str) -> Self {
        self.root.alias = Some(alias.to_string());
        self
    }

    pub fn columns(mut self, columns: Columns) -> Self {
        self.root.columns = columns;
        self
    }

    /// Gives a root column an explicit result alias.
    pub fn column_alias(mut self, column: &str, alias: &str) -> Self {
        self.root
            .column_aliases
            .push((column.to_string(), alias.to_string()));
        self
    }

    pub fn join(mut self, join: Join) -> Self {
        self.root.joins.push(join);
        self
    }

    /// Resolves the declaration into an immutable [`Select`].
    pub fn build(self) -> Result<Select> {
        let mut select = Select {
            tables: vec![],
            columns: vec![],
            positions: IndexMap::new(),
        };

        let table = self.resolve_table(&self.root.table)?;
        self.add_table(&mut select, table, &self.root, None)?;

        Ok(select)
    }

    fn add_table(
        &self,
        select: &mut Select,
        table: &Table,
        spec: &TableSpec,
        join: Option<JoinClause>,
    ) -> Result<()> {
        let alias = spec.alias.clone().unwrap_or_else(|| table.name.clone());

        if let Some(existing) = select
            .tables
            .iter()
            .find(|existing| existing.alias.eq_ignore_ascii_case(&alias))
        {
            return Err(Error::invalid_statement(format!(
                "table alias `{alias}` for `{}` collides with table `{}`; \
                 give the join a distinct alias",
                table.name, existing.name
            )));
        }

        let index = select.tables.len();
        select.tables.push(SelectTable {
            table: table.id,
            name: table.name.clone(),
            alias: alias.clone(),
            join,
            columns: table
                .columns
                .iter()
                .map(|column| (column.name.to_ascii_lowercase(), column.physical_name.clone()))
                .collect(),
        });

        let columns = self.pick_columns(table, &spec.columns)?;
        if columns.is_empty() {
            return Err(Error::invalid_statement(format!(
                "table `{alias}` contributes no columns to the query"
            )));
        }

        for (name, _) in &spec.column_aliases {
            if !columns.iter().any(|column| column.name.eq_ignore_ascii_case(name)) {
                return Err(Error::invalid_statement(format!(
                    "alias given for `{alias}.{name}`, which is not selected"
                )));
            }
        }

        for column in columns {
            let result_alias = spec
                .column_aliases
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(&column.name))
                .map(|(_, result_alias)| result_alias.clone())
                .unwrap_or_else(|| column.name.clone());

            let key = result_alias.to_ascii_lowercase();
            if let Some(&other) = select.positions.get(&key) {
                let other = &select.columns[other];
                return Err(Error::invalid_statement(format!(
                    "column alias `{result_alias}` of `{alias}.{}` collides with `{}.{}`; \
                     an explicit alias is required",
                    column.name, select.tables[other.table].alias, other.name
                )));
            }

            select.positions.insert(key, select.columns.len());
            select.columns.push(SelectColumn {
                table: index,
                column: column.id,
                name: column.physical_name.clone(),
                alias: result_alias,
                ty: column.ty,
            });
        }

        for join in &spec.joins {
            let child = self.resolve_table(&join.spec.table)?;
            let parent_column = table.resolve_column(&join.parent_column).map_err(invalid)?;
            let child_column = child.resolve_column(&join.column).map_err(invalid)?;

            if parent_column.ty != child_column.ty {
                return Err(Error::invalid_statement(format!(
                    "cannot join `{alias}.{}` ({}) to `{}.{}` ({})",
                    parent_column.name,
                    parent_column.ty,
                    child.name,
                    child_column.name,
                    child_column.ty
                )));
            }

            let clause = JoinClause {
                kind: join.kind,
                parent: index,
                parent_column: parent_column.physical_name.clone(),
                column: child_column.physical_name.clone(),
            };

            self.add_table(select, child, &join.spec, Some(clause))?;
        }

        Ok(())
    }

    fn pick_columns<'t>(&self, table: &'t Table, columns: &Columns) -> Result<Vec<&'t Column>> {
        Ok(match columns {
            Columns::Full => table.columns.iter().collect(),
            Columns::ForJoinedData => table
                .columns
                .iter()
                .filter(|column| column.is_joined_data())
                .collect(),
            Columns::Only(names) => names
                .iter()
                .map(|name| table.resolve_column(name).map_err(invalid))
                .collect::<Result<_>>()?,
        })
    }

    fn resolve_table(&self, name: &str) -> Result<&'a Table> {
        self.schema.resolve_table(name).map_err(invalid)
    }
}

/// Metadata lookups that fail while building a query are statement errors.
fn invalid(err: Error) -> Error {
    Error::invalid_statement(err.to_string())
}

impl Join {
    pub fn inner(parent_column: &str, table: &str, column: &str) -> Self {
        Self::new(JoinKind::Inner, parent_column, table, column)
    }

    pub fn left(parent_column: &str, table: &str, column: &str) -> Self {
        Self::new(JoinKind::Left, parent_column, table, column)
    }

    pub fn right(parent_column: &str, table: &str, column: &str) -> Self {
        Self::new(JoinKind::Right, parent_column, table, column)
    }

    pub fn full(parent_column: &str, table: &str, column: &str) -> Self {
        Self::new(JoinKind::Full, parent_column, table, column)
    }

    fn new(kind: JoinKind, parent_column: &str, table: &str, column: &str) -> Self {
        Self {
            kind,
            parent_column: parent_column.to_string(),
            column: column.to_string(),
            spec: TableSpec::new(table, Columns::ForJoinedData),
        }
    }

    /// Sets the joined table's alias. Defaults to the table name.
    pub fn alias(mut self, alias: &str) -> Self {
        self.spec.alias = Some(alias.to_string());
        self
    }

    /// Defaults to [`Columns::ForJoinedData`].
    pub fn columns(mut self, columns: Columns) -> Self {
        self.spec.columns = columns;
        self
    }

    pub fn column_alias(mut self, column: &str, alias: &str) -> Self {
        self.spec
            .column_aliases
            .push((column.to_string(), alias.to_string()));
        self
    }

    /// Nests a join below this one.
    pub fn join(mut self, join: Join) -> Self {
        self.spec.joins.push(join);
        self
    }
}

impl JoinKind {
    pub fn as_sql(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL JOIN",
        }
    }
}

impl TableSpec {
    fn new(table: &str, columns: Columns) -> Self {
        Self {
            table: table.to_string(),
            alias: None,
            columns,
            column_aliases: vec![],
            joins: vec![],
        }
    }
}

impl Columns {
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Columns::Only(names.into_iter().map(Into::into).collect())
    }
}
