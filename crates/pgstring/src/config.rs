//! Statement assembly configuration.

use crate::record::Record;
use crate::record::ValueType;
use crate::statement::{Statement, TableOption};
use serde::Deserialize;

/// How constraint flags are read from a primary annotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintMatch {
    /// Substring match against the whole annotation (default).
    ///
    /// `"primarykey"` anywhere in the annotation sets the flag, including inside
    /// the column-name segment: `unique_code` is flagged UNIQUE.
    #[default]
    Substring,
    /// Each segment after the column name is trimmed and compared exactly.
    Segment,
}

/// What happens when a WHERE-introducing clause runs on a statement that
/// already has a WHERE.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatedWhere {
    /// Append another `WHERE` keyword (default). The result is malformed SQL
    /// and left to the caller.
    #[default]
    Append,
    /// Append `AND` instead.
    Conjoin,
}

/// Configuration carried by every [`Statement`].
///
/// # Example
///
/// ```rust
/// use pgstring::{Config, ConstraintMatch, RepeatedWhere};
///
/// let config = Config::new()
///     .constraint_match(ConstraintMatch::Segment)
///     .repeated_where(RepeatedWhere::Conjoin);
///
/// let stmt = pgstring::raw_sql("SELECT * FROM users")
///     .with_config(config)
///     .where_("a = 1")
///     .where_("b = 2");
/// assert_eq!(stmt.sql(), "SELECT * FROM users WHERE a = 1 AND b = 2");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub constraint_match: ConstraintMatch,
    pub repeated_where: RepeatedWhere,
}

impl Config {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the constraint flag matching policy.
    pub fn constraint_match(mut self, mode: ConstraintMatch) -> Self {
        self.constraint_match = mode;
        self
    }

    /// Set the repeated WHERE policy.
    pub fn repeated_where(mut self, policy: RepeatedWhere) -> Self {
        self.repeated_where = policy;
        self
    }

    /// Tokenize annotations and join repeated WHERE clauses with `AND`.
    pub fn strict(self) -> Self {
        self.constraint_match(ConstraintMatch::Segment)
            .repeated_where(RepeatedWhere::Conjoin)
    }

    /// `CREATE TABLE` for a record type under this configuration.
    pub fn create_table<R: Record>(self, table: &str, option: Option<TableOption>) -> Statement {
        Statement::define_table(self, table, &R::value_type(), option)
    }

    /// `CREATE TABLE` for a dynamically described type under this configuration.
    ///
    /// A type that is not a record leaves the statement in the error state.
    pub fn create_table_for(
        self,
        table: &str,
        ty: &ValueType,
        option: Option<TableOption>,
    ) -> Statement {
        Statement::define_table(self, table, ty, option)
    }
}
