//! Convenient imports for typical `pgstring` usage.
//!
//! ```ignore
//! use pgstring::prelude::*;
//! ```

pub use crate::{
    Args, BindingTable, Config, PgResult, PgStringError, Record, Statement, TableOption, ToValue,
    Value, create_table, delete, insert_into, raw_sql, select, select_all, select_columns,
    select_expr, update,
};
