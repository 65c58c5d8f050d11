//! # pgstring
//!
//! Struct-to-SQL mapping and fluent statement assembly for PostgreSQL.
//!
//! ## Features
//!
//! - **Field introspection**: column names and constraints come from field
//!   annotations (`#[db = "id,primarykey"]`), with `#[json]` / serde renames as
//!   a fallback
//! - **Named parameters**: every record value is bound under its column name and
//!   referenced as `@name` in the generated text
//! - **Type mapping**: `CREATE TABLE` column types derived from field types
//! - **Driver ready**: `to_positional()` rewrites `@name` into `$n` and hands
//!   back `ToSql` parameters for tokio-postgres
//!
//! No connection handling and no SQL validation: the output is text plus a
//! binding table.
//!
//! ## Example
//!
//! ```ignore
//! use pgstring::prelude::*;
//!
//! #[derive(Record)]
//! struct User {
//!     #[db = "id,primarykey"]
//!     id: i32,
//!     #[db = "name,notnull,unique"]
//!     name: String,
//!     #[db = "-"]
//!     session: Option<String>,
//! }
//!
//! // CREATE TABLE
//! let ddl = create_table::<User>("users", Some(TableOption::IfNotExists)).build()?;
//!
//! // INSERT
//! let user = User { id: 1, name: "alice".into(), session: None };
//! let (sql, args) = insert_into("users").columns(&user).values(&user).build()?;
//! assert_eq!(sql, "INSERT INTO users (id, name) VALUES (@id, @name)");
//!
//! // Positional form for tokio-postgres
//! let query = update("users").set(&user).where_("id = @id").to_positional()?;
//! client.execute(query.sql(), &query.params_ref()).await?;
//! ```

// Lets `#[derive(Record)]` output refer to `::pgstring` inside this crate too.
extern crate self as pgstring;

pub mod config;
pub mod error;
pub mod prelude;
pub mod record;
pub mod registry;
pub mod statement;
pub mod types;
pub mod value;

pub use config::{Config, ConstraintMatch, RepeatedWhere};
pub use error::{PgResult, PgStringError};
pub use record::{
    Annotation, BindingTable, ConstraintFlags, FieldDef, FieldDescriptor, Record, RecordDef,
    RecordValue, ValueType, bind, bind_record, bind_value, column_names, describe_field,
    resolve_columns, resolve_columns_with,
};
pub use statement::{
    Args, PositionalQuery, Statement, TableOption, create_table, create_table_for,
    create_table_with_token, delete, insert_into, raw_sql, select, select_all, select_columns,
    select_expr, to_positional, update,
};
pub use types::map_type;
pub use value::{ToValue, Value};

// Re-exported for `#[derive(Record)]` registration.
pub use inventory;

#[cfg(feature = "derive")]
pub use pgstring_derive::Record;
