//! CREATE TABLE assembly.

use super::Statement;
use crate::config::Config;
use crate::record::{ValueType, resolve_columns_with};
use crate::types::map_type;

/// Preamble selected for a table definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableOption {
    /// `CREATE TABLE IF NOT EXISTS`
    IfNotExists,
    /// `DROP TABLE IF EXISTS t;` then `CREATE TABLE`
    Drop,
    /// `DROP TABLE IF EXISTS t CASCADE;` then `CREATE TABLE`
    DropCascade,
}

impl TableOption {
    pub const IF_NOT_EXISTS: &'static str = "IF_NOT_EXISTS";
    pub const DROP: &'static str = "DROP";
    pub const DROP_CASCADE: &'static str = "DROP_CASCADE";

    /// Parse an option token. Unknown tokens yield `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            Self::IF_NOT_EXISTS => Some(Self::IfNotExists),
            Self::DROP => Some(Self::Drop),
            Self::DROP_CASCADE => Some(Self::DropCascade),
            _ => None,
        }
    }

    pub const fn as_token(self) -> &'static str {
        match self {
            Self::IfNotExists => Self::IF_NOT_EXISTS,
            Self::Drop => Self::DROP,
            Self::DropCascade => Self::DROP_CASCADE,
        }
    }
}

impl Statement {
    pub(crate) fn define_table(
        config: Config,
        table: &str,
        ty: &ValueType,
        option: Option<TableOption>,
    ) -> Statement {
        let base = Statement::default().with_config(config);
        base.then(|s| {
            let fields = resolve_columns_with(ty, config.constraint_match)?;

            let mut definitions = Vec::with_capacity(fields.len() + 1);
            let mut primary_keys = Vec::new();
            for field in &fields {
                let mut definition = format!("{} {}", field.column, map_type(&field.value_type));
                if field.constraints.not_null {
                    definition.push_str(" NOT NULL");
                }
                if field.constraints.unique {
                    definition.push_str(" UNIQUE");
                }
                if field.constraints.primary_key {
                    primary_keys.push(field.column);
                }
                definitions.push(definition);
            }
            if !primary_keys.is_empty() {
                definitions.push(format!("PRIMARY KEY ({})", primary_keys.join(", ")));
            }

            match option {
                Some(TableOption::IfNotExists) => {
                    s.push(format_args!("CREATE TABLE IF NOT EXISTS {table} (\n"));
                }
                Some(TableOption::Drop) => {
                    s.push(format_args!("DROP TABLE IF EXISTS {table};\nCREATE TABLE {table} (\n"));
                }
                Some(TableOption::DropCascade) => s.push(format_args!(
                    "DROP TABLE IF EXISTS {table} CASCADE;\nCREATE TABLE {table} (\n"
                )),
                None => s.push(format_args!("CREATE TABLE {table} (\n")),
            }
            s.push(format_args!("    {}\n)", definitions.join(",\n    ")));

            tracing::debug!(
                target: "pgstring",
                table,
                columns = fields.len(),
                primary_keys = primary_keys.len(),
                "table definition assembled"
            );
            s.columns = fields.iter().map(|f| f.column.to_string()).collect();
            Ok(())
        })
    }
}
