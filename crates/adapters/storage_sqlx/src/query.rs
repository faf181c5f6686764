//! SQL text generation for every table.
//!
//! A [`QueryBuilder`] is configured once with the [`Dialect`] of the
//! connected backend and then renders list, get, create, update and remove
//! statements for any [`Table`]. Predicate values are always bound, never
//! spliced into the SQL; only the integer page bounds are inlined.

use std::fmt::Write as _;

use sqlx::any::AnyRow;
use sqlx::{AnyPool, FromRow};

use mudstore_domain::page::Page;

/// SQL flavour of the connected backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Sqlite,
    Postgres,
}

impl Dialect {
    /// Detect the dialect from the scheme of a connection URL.
    ///
    /// Returns `None` for any scheme other than `sqlite`, `postgres` or
    /// `postgresql`.
    #[must_use]
    pub fn from_url(url: &str) -> Option<Self> {
        let (scheme, _) = url.split_once(':')?;
        match scheme {
            "sqlite" => Some(Self::Sqlite),
            "postgres" | "postgresql" => Some(Self::Postgres),
            _ => None,
        }
    }

    /// Append the placeholder for the `index`-th (1-based) bound value.
    fn placeholder(self, sql: &mut String, index: usize) {
        match self {
            Self::Sqlite => sql.push('?'),
            Self::Postgres => {
                let _ = write!(sql, "${index}");
            }
        }
    }

    /// Expression yielding the current time as RFC 3339 text in UTC.
    fn now(self) -> &'static str {
        match self {
            Self::Sqlite => "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
            Self::Postgres => {
                r#"to_char(now() AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS.US"Z"')"#
            }
        }
    }

    /// `LIMIT` value meaning "no limit", needed where the backend does not
    /// accept `OFFSET` on its own.
    fn unbounded_limit(self) -> Option<&'static str> {
        match self {
            Self::Sqlite => Some("-1"),
            Self::Postgres => None,
        }
    }
}

/// Shape of a table: its name and the columns a change writes.
///
/// Every table also has `id`, `created` and `updated`, which the backend
/// fills in.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Table {
    pub name: &'static str,
    pub writable: &'static [&'static str],
}

impl Table {
    /// Comma-separated list of every column, in read order.
    fn columns(&self) -> String {
        let mut columns = String::from("id");
        for column in self.writable {
            columns.push_str(", ");
            columns.push_str(column);
        }
        columns.push_str(", created, updated");
        columns
    }
}

/// An equality predicate on one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Predicate {
    pub column: &'static str,
    pub value: String,
}

impl Predicate {
    pub(crate) fn new(column: &'static str, value: impl ToString) -> Self {
        Self {
            column,
            value: value.to_string(),
        }
    }
}

/// A filter that can be rendered into a list query.
///
/// Predicates must come back in a fixed order for a given filter value so
/// equal filters render identical SQL.
pub(crate) trait ListFilter {
    fn predicates(&self) -> Vec<Predicate>;

    fn page(&self) -> Page;
}

/// Rendered SQL together with the values to bind, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Statement {
    pub sql: String,
    pub binds: Vec<String>,
}

impl Statement {
    /// Bind every value and fetch all decoded rows.
    pub(crate) async fn fetch_all<T>(self, pool: &AnyPool) -> Result<Vec<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, AnyRow> + Send + Unpin,
    {
        let Self { sql, binds } = self;
        let mut query = sqlx::query_as::<_, T>(&sql);
        for value in binds {
            query = query.bind(value);
        }
        query.fetch_all(pool).await
    }
}

/// Statements that only depend on the table, rendered once per storage.
#[derive(Debug, Clone)]
pub(crate) struct Statements {
    pub get: String,
    pub create: String,
    pub update: String,
    pub remove: String,
}

impl Statements {
    pub(crate) fn new(queries: QueryBuilder, table: &Table) -> Self {
        Self {
            get: queries.get_query(table),
            create: queries.create_query(table),
            update: queries.update_query(table),
            remove: queries.remove_query(table),
        }
    }
}

/// Renders dialect-specific SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryBuilder {
    dialect: Dialect,
}

impl QueryBuilder {
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    #[must_use]
    pub fn dialect(self) -> Dialect {
        self.dialect
    }

    /// `SELECT ... WHERE a = ? AND b = ? ORDER BY created, id LIMIT n OFFSET m`.
    ///
    /// `LIMIT` is only emitted for a non-zero limit and `OFFSET` only for a
    /// non-zero offset.
    pub(crate) fn list_query(self, table: &Table, filter: &impl ListFilter) -> Statement {
        let mut sql = format!("SELECT {} FROM {}", table.columns(), table.name);
        let mut binds = Vec::new();

        for (index, predicate) in filter.predicates().into_iter().enumerate() {
            sql.push_str(if index == 0 { " WHERE " } else { " AND " });
            sql.push_str(predicate.column);
            sql.push_str(" = ");
            self.dialect.placeholder(&mut sql, index + 1);
            binds.push(predicate.value);
        }

        sql.push_str(" ORDER BY created, id");

        let page = filter.page().clamped();
        if page.limit > 0 {
            let _ = write!(sql, " LIMIT {}", page.limit);
        } else if page.offset > 0 {
            if let Some(unbounded) = self.dialect.unbounded_limit() {
                let _ = write!(sql, " LIMIT {unbounded}");
            }
        }
        if page.offset > 0 {
            let _ = write!(sql, " OFFSET {}", page.offset);
        }

        Statement { sql, binds }
    }

    /// `SELECT ... WHERE id = ?`.
    pub(crate) fn get_query(self, table: &Table) -> String {
        let mut sql = format!("SELECT {} FROM {} WHERE id = ", table.columns(), table.name);
        self.dialect.placeholder(&mut sql, 1);
        sql
    }

    /// `INSERT` of the writable columns, returning the stored row.
    pub(crate) fn create_query(self, table: &Table) -> String {
        let mut sql = format!("INSERT INTO {} ({}) VALUES (", table.name, table.writable.join(", "));
        for index in 1..=table.writable.len() {
            if index > 1 {
                sql.push_str(", ");
            }
            self.dialect.placeholder(&mut sql, index);
        }
        let _ = write!(sql, ") RETURNING {}", table.columns());
        sql
    }

    /// `UPDATE` of the writable columns plus `updated`, keyed by the last
    /// bound value, returning the stored row.
    pub(crate) fn update_query(self, table: &Table) -> String {
        let mut sql = format!("UPDATE {} SET ", table.name);
        for (index, column) in table.writable.iter().enumerate() {
            let _ = write!(sql, "{column} = ");
            self.dialect.placeholder(&mut sql, index + 1);
            sql.push_str(", ");
        }
        let _ = write!(sql, "updated = {} WHERE id = ", self.dialect.now());
        self.dialect.placeholder(&mut sql, table.writable.len() + 1);
        let _ = write!(sql, " RETURNING {}", table.columns());
        sql
    }

    /// `DELETE ... WHERE id = ?`.
    pub(crate) fn remove_query(self, table: &Table) -> String {
        let mut sql = format!("DELETE FROM {} WHERE id = ", table.name);
        self.dialect.placeholder(&mut sql, 1);
        sql
    }
}
