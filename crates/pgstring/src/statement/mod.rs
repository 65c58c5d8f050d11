//! Fluent statement assembly with named parameters.
//!
//! A [`Statement`] is SQL text plus a [`BindingTable`]. Every clause method
//! takes the statement by value, appends text, merges bindings, and returns
//! the new statement. Clone a statement to derive several statements from a
//! shared base.
//!
//! Placeholders are written as `@name` and always have a matching key in the
//! binding table. Clause order is up to the caller: no SQL validation is done.
//!
//! # Example
//!
//! ```ignore
//! use pgstring::{Record, insert_into, update};
//!
//! #[derive(Record)]
//! struct User {
//!     #[db = "id,primarykey"]
//!     id: i64,
//!     #[db = "name,notnull"]
//!     name: String,
//! }
//!
//! let user = User { id: 7, name: "alice".into() };
//!
//! let (sql, args) = insert_into("users")
//!     .columns(&user)
//!     .values(&user)
//!     .returning_columns(["id"])
//!     .build()?;
//! assert_eq!(sql, "INSERT INTO users (id, name) VALUES (@id, @name) RETURNING id");
//!
//! let (sql, _) = update("users").set(&user).where_("id = @id").build()?;
//! assert_eq!(sql, "UPDATE users SET id = @id, name = @name WHERE id = @id");
//! ```
//!
//! # Errors
//!
//! Operations that need a record and receive something else put the
//! statement in an error state. Every later operation is a no-op and
//! [`Statement::build`] returns the first error.

mod clause;
mod dml;
mod positional;
mod table;

pub use positional::{PositionalQuery, to_positional};
pub use table::TableOption;

use crate::config::Config;
use crate::error::{PgResult, PgStringError};
use crate::record::{BindingTable, Record, RecordValue, ValueType};
use crate::value::Value;
use std::fmt;

/// Extra bindings for WHERE / AND / HAVING clauses.
#[derive(Debug, Clone)]
pub enum Args {
    /// Merged as-is.
    Map(BindingTable),
    /// Must hold a record, which is run through the binder.
    Value(Value),
}

impl From<BindingTable> for Args {
    fn from(table: BindingTable) -> Self {
        Args::Map(table)
    }
}

impl From<Value> for Args {
    fn from(value: Value) -> Self {
        Args::Value(value)
    }
}

impl From<RecordValue> for Args {
    fn from(record: RecordValue) -> Self {
        Args::Value(Value::Record(record))
    }
}

impl From<std::collections::HashMap<String, Value>> for Args {
    fn from(map: std::collections::HashMap<String, Value>) -> Self {
        Args::Map(map.into())
    }
}

impl From<std::collections::BTreeMap<String, Value>> for Args {
    fn from(map: std::collections::BTreeMap<String, Value>) -> Self {
        Args::Map(map.into())
    }
}

impl Args {
    /// Resolve to a binding table.
    pub fn into_bindings(self, operation: &'static str) -> PgResult<BindingTable> {
        match self {
            Args::Map(table) => Ok(table),
            Args::Value(Value::Record(record)) => Ok(record.bindings()),
            Args::Value(other) => Err(PgStringError::unsupported(operation, other.kind_name())),
        }
    }
}

/// SQL text under construction plus its named parameter values.
#[derive(Debug, Clone, Default)]
pub struct Statement {
    sql: String,
    /// Column list from the most recent column-declaring step.
    columns: Vec<String>,
    args: BindingTable,
    error: Option<PgStringError>,
    config: Config,
}

impl Statement {
    /// A statement starting with the given text.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            ..Self::default()
        }
    }

    /// Replace the configuration used by later operations.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> Config {
        self.config
    }

    /// The text assembled so far.
    ///
    /// On a statement in the error state this is the text up to the failing
    /// operation; use [`build`](Self::build) to get text only on success.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn args(&self) -> &BindingTable {
        &self.args
    }

    /// Column names recorded by the last column-declaring operation.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn error(&self) -> Option<&PgStringError> {
        self.error.as_ref()
    }

    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }

    /// Finish the statement: the SQL text and its bindings, or the first error.
    pub fn build(self) -> PgResult<(String, BindingTable)> {
        if let Some(err) = self.error {
            return Err(err);
        }
        tracing::debug!(
            target: "pgstring",
            sql = %self.sql,
            arg_count = self.args.len(),
            "statement built"
        );
        Ok((self.sql, self.args))
    }

    /// Rewrite `@name` placeholders as `$1, $2, ...` for positional drivers.
    pub fn to_positional(&self) -> PgResult<PositionalQuery> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        to_positional(&self.sql, &self.args)
    }

    // ── internals ──────────────────────────────────────────────────────────

    /// Run `f` unless the statement already failed.
    fn then(mut self, f: impl FnOnce(&mut Self) -> PgResult<()>) -> Self {
        if self.error.is_none() {
            if let Err(err) = f(&mut self) {
                self.fail(err);
            }
        }
        self
    }

    fn fail(&mut self, err: PgStringError) {
        tracing::warn!(target: "pgstring", error = %err, sql = %self.sql, "statement failed");
        self.error = Some(err);
    }

    fn push(&mut self, fragment: fmt::Arguments<'_>) {
        use std::fmt::Write;
        let _ = self.sql.write_fmt(fragment);
    }

    fn has_where(&self) -> bool {
        self.sql.contains(" WHERE ")
    }

    /// Keyword that introduces a new condition under the configured policy.
    fn where_keyword(&self) -> &'static str {
        match self.config.repeated_where {
            crate::config::RepeatedWhere::Conjoin if self.has_where() => "AND",
            _ => "WHERE",
        }
    }

    fn merge_args(&mut self, args: Args, operation: &'static str) -> PgResult<()> {
        let bindings = args.into_bindings(operation)?;
        self.args.merge(bindings);
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Require a record value for `operation`.
fn expect_record<'a>(value: &'a Value, operation: &'static str) -> PgResult<&'a RecordValue> {
    value
        .as_record()
        .ok_or_else(|| PgStringError::unsupported(operation, value.kind_name()))
}

// ── entry points ───────────────────────────────────────────────────────────

/// `INSERT INTO <table>`
pub fn insert_into(table: &str) -> Statement {
    Statement::new(format!("INSERT INTO {table}"))
}

/// `SELECT <columns of R>`, bound to the record's values.
pub fn select<R: Record>(record: &R) -> Statement {
    let bindings = record.bindings();
    let columns: Vec<String> = R::columns().iter().map(|f| f.column.to_string()).collect();
    Statement {
        sql: format!("SELECT {}", columns.join(", ")),
        columns,
        args: bindings,
        ..Statement::default()
    }
}

/// `SELECT a, b, ...` from explicit column names.
pub fn select_columns<I, S>(columns: I) -> Statement
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let columns: Vec<String> = columns.into_iter().map(|c| c.as_ref().to_string()).collect();
    Statement {
        sql: format!("SELECT {}", columns.join(", ")),
        columns,
        ..Statement::default()
    }
}

/// `SELECT <expr>` with a raw select list.
pub fn select_expr(expr: &str) -> Statement {
    Statement::new(format!("SELECT {expr}"))
}

/// `SELECT *`
pub fn select_all() -> Statement {
    Statement::new("SELECT *")
}

/// `UPDATE <table>`
pub fn update(table: &str) -> Statement {
    Statement::new(format!("UPDATE {table}"))
}

/// `DELETE`; follow with [`Statement::from`].
pub fn delete() -> Statement {
    Statement::new("DELETE")
}

/// Start from raw SQL text.
pub fn raw_sql(query: impl Into<String>) -> Statement {
    Statement::new(query)
}

/// `CREATE TABLE` for a record type, with the default configuration.
pub fn create_table<R: Record>(table: &str, option: Option<TableOption>) -> Statement {
    Config::default().create_table::<R>(table, option)
}

/// `CREATE TABLE` from an option token such as `"IF_NOT_EXISTS"`.
///
/// Unrecognized tokens fall back to a plain `CREATE TABLE`.
pub fn create_table_with_token<R: Record>(table: &str, token: &str) -> Statement {
    create_table::<R>(table, TableOption::from_token(token))
}

/// `CREATE TABLE` for a dynamically described type.
///
/// A type that is not a record leaves the statement in the error state.
pub fn create_table_for(table: &str, ty: &ValueType, option: Option<TableOption>) -> Statement {
    Config::default().create_table_for(table, ty, option)
}
