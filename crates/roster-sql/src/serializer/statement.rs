use super::{
    condition::{Order, Where},
    ty::ColumnType,
    Comma, Formatter, Ident, Params, Qualified, ToSql,
};

use crate::{
    stmt::{CreateTable, Delete, Insert, Query, Statement, Update},
    Select,
};

use roster_core::{
    schema::{Column, ColumnCategory},
    stmt::Value,
};

impl ToSql for &Statement<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        match self {
            Statement::Query(stmt) => stmt.to_sql(f),
            Statement::Count(stmt) => Count(stmt).to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
            Statement::Delete(stmt) => stmt.to_sql(f),
            Statement::CreateTable(stmt) => stmt.to_sql(f),
        }
    }
}

struct Count<'a>(&'a Query<'a>);

/// The FROM clause with every join of the tree.
struct FromClause<'a>(&'a Select);

/// `<name>` or `<name> AS <alias>` when the two differ.
struct Aliased<'a>(&'a str, &'a str);

struct Assignment<'a>(&'a Column, &'a Value);

struct ColumnDef<'a>(&'a CreateTable<'a>, &'a Column);

impl ToSql for &Query<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let select = self.select;
        let columns = select.columns().iter().map(|column| {
            let table = &select.tables()[column.table];
            ResultColumn(&table.alias, &column.name, &column.alias)
        });

        fmt!(f, "SELECT " Comma(columns) " FROM " FromClause(select));
        filter(f, self);

        if !self.order_by.is_empty() {
            let order_by = self
                .order_by
                .iter()
                .map(|order_by| Order { select, order_by });
            fmt!(f, " ORDER BY " Comma(order_by));
        }

        if let Some(limit) = self.limit {
            fmt!(f, " LIMIT " limit);
        }
    }
}

impl ToSql for Count<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        fmt!(f, "SELECT COUNT(*) FROM " FromClause(self.0.select));
        filter(f, self.0);
    }
}

fn filter<T: Params>(f: &mut Formatter<'_, T>, query: &Query<'_>) {
    if let Some(condition) = query.filter {
        let condition = Where {
            select: query.select,
            condition,
            nested: false,
        };
        fmt!(f, " WHERE " condition);
    }
}

/// `"table"."column" [AS "alias"]`
struct ResultColumn<'a>(&'a str, &'a str, &'a str);

impl ToSql for ResultColumn<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        fmt!(f, Qualified(self.0, self.1));
        if self.1 != self.2 {
            fmt!(f, " AS " Ident(self.2));
        }
    }
}

impl ToSql for FromClause<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let tables = self.0.tables();

        for table in tables {
            let Some(join) = &table.join else {
                fmt!(f, Aliased(&table.name, &table.alias));
                continue;
            };

            let parent = &tables[join.parent];
            fmt!(
                f,
                " " join.kind.as_sql() " " Aliased(&table.name, &table.alias)
                " ON " Qualified(&parent.alias, &join.parent_column)
                " = " Qualified(&table.alias, &join.column)
            );
        }
    }
}

impl ToSql for Aliased<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        fmt!(f, Ident(self.0));
        if self.0 != self.1 {
            fmt!(f, " AS " Ident(self.1));
        }
    }
}

impl ToSql for &Insert<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let columns = self
            .values
            .iter()
            .map(|(column, _)| Ident(&column.physical_name));
        let values = self.values.iter().map(|(_, value)| value);

        fmt!(
            f,
            "INSERT INTO " Ident(&self.table.name) " (" Comma(columns) ") VALUES (" Comma(values) ")"
        );
    }
}

impl ToSql for &Update<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let assignments = self
            .assignments
            .iter()
            .map(|(column, value)| Assignment(column, value));
        let pk = Ident(&self.table.primary_key_column().physical_name);
        let key = &self.key;

        fmt!(
            f,
            "UPDATE " Ident(&self.table.name) " SET " Comma(assignments) " WHERE " pk " = " key
        );
    }
}

impl ToSql for Assignment<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        fmt!(f, Ident(&self.0.physical_name) " = " self.1);
    }
}

impl ToSql for &Delete<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let pk = Ident(&self.table.primary_key_column().physical_name);
        let key = &self.key;

        fmt!(f, "DELETE FROM " Ident(&self.table.name) " WHERE " pk " = " key);
    }
}

impl ToSql for &CreateTable<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let columns = self.table.columns.iter().map(|column| ColumnDef(self, column));

        fmt!(f, "CREATE TABLE " Ident(&self.table.name) " (" Comma(columns) ")");
    }
}

impl ToSql for ColumnDef<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let ColumnDef(stmt, column) = self;

        fmt!(f, Ident(&column.physical_name) " " ColumnType(column));

        if column.is_primary_key() {
            return;
        }

        if !column.nullable {
            fmt!(f, " NOT NULL");
        }

        if column.category == ColumnCategory::UniqueKey {
            fmt!(f, " UNIQUE");
        }

        if let Some(target) = column.references() {
            let target = stmt.schema.table(target);
            let pk = Ident(&target.primary_key_column().physical_name);
            fmt!(f, " REFERENCES " Ident(&target.name) " (" pk ")");
        }
    }
}
