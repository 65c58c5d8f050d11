//! Filtering, joining, grouping and paging clauses.

use super::{Args, Statement};
use crate::value::Value;

impl Statement {
    /// ` FROM <table>`
    #[allow(clippy::should_implement_trait)]
    pub fn from(self, table: &str) -> Self {
        self.then(|s| {
            s.push(format_args!(" FROM {table}"));
            Ok(())
        })
    }

    /// ` WHERE <condition>`
    ///
    /// A second call appends a second `WHERE` unless the statement is
    /// configured with [`RepeatedWhere::Conjoin`](crate::RepeatedWhere::Conjoin).
    pub fn where_(self, condition: &str) -> Self {
        self.then(|s| {
            let keyword = s.where_keyword();
            s.push(format_args!(" {keyword} {condition}"));
            Ok(())
        })
    }

    /// ` WHERE <condition>` and merge `args` into the bindings.
    pub fn where_args(self, condition: &str, args: impl Into<Args>) -> Self {
        let args = args.into();
        self.where_(condition).then(|s| s.merge_args(args, "where"))
    }

    /// ` AND <condition>`, or ` WHERE <condition>` when there is no WHERE yet.
    pub fn and_where(self, condition: &str) -> Self {
        if !self.has_where() {
            return self.where_(condition);
        }
        self.then(|s| {
            s.push(format_args!(" AND {condition}"));
            Ok(())
        })
    }

    /// [`and_where`](Self::and_where) and merge `args` into the bindings.
    pub fn and_where_args(self, condition: &str, args: impl Into<Args>) -> Self {
        let args = args.into();
        self.and_where(condition).then(|s| s.merge_args(args, "and_where"))
    }

    /// ` HAVING <condition>`
    pub fn having(self, condition: &str) -> Self {
        self.then(|s| {
            s.push(format_args!(" HAVING {condition}"));
            Ok(())
        })
    }

    /// ` HAVING <condition>` and merge `args` into the bindings.
    pub fn having_args(self, condition: &str, args: impl Into<Args>) -> Self {
        let args = args.into();
        self.having(condition).then(|s| s.merge_args(args, "having"))
    }

    /// `<column> IN (@<column>_in_0, @<column>_in_1, ...)`
    ///
    /// Joined with `AND` when the statement already has a WHERE, otherwise
    /// introduced with `WHERE`. An empty list renders `IN (NULL)`.
    ///
    /// Keys are numbered from zero on every call, so a second list on the
    /// same column rebinds `@<column>_in_0, ...` and both IN clauses see the
    /// second list's values. Overwritten keys are logged at `warn`.
    pub fn in_list<I, V>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.then(|s| {
            let mut placeholders = Vec::new();
            for (i, value) in values.into_iter().enumerate() {
                let key = format!("{column}_in_{i}");
                placeholders.push(format!("@{key}"));
                if s.args.insert(key.clone(), value).is_some() {
                    tracing::warn!(
                        target: "pgstring",
                        key = %key,
                        "IN list rebinds an existing parameter"
                    );
                }
            }
            let list = if placeholders.is_empty() {
                "NULL".to_string()
            } else {
                placeholders.join(", ")
            };

            let keyword = if s.has_where() { "AND" } else { "WHERE" };
            s.push(format_args!(" {keyword} {column} IN ({list})"));
            Ok(())
        })
    }

    /// ` WHERE <column> BETWEEN @<column>_start AND @<column>_end`
    pub fn between(self, column: &str, start: impl Into<Value>, end: impl Into<Value>) -> Self {
        let (start, end) = (start.into(), end.into());
        self.then(|s| {
            let keyword = s.where_keyword();
            s.push(format_args!(
                " {keyword} {column} BETWEEN @{column}_start AND @{column}_end"
            ));
            s.args.insert(format!("{column}_start"), start);
            s.args.insert(format!("{column}_end"), end);
            Ok(())
        })
    }

    /// ` WHERE <column> LIKE @<column>_pattern`
    pub fn like(self, column: &str, pattern: impl Into<Value>) -> Self {
        let pattern = pattern.into();
        self.then(|s| {
            let keyword = s.where_keyword();
            s.push(format_args!(" {keyword} {column} LIKE @{column}_pattern"));
            s.args.insert(format!("{column}_pattern"), pattern);
            Ok(())
        })
    }

    /// ` <join_type> JOIN <table> ON <condition>`
    pub fn join(self, join_type: &str, table: &str, condition: &str) -> Self {
        self.then(|s| {
            s.push(format_args!(" {join_type} JOIN {table} ON {condition}"));
            Ok(())
        })
    }

    pub fn inner_join(self, table: &str, condition: &str) -> Self {
        self.join("INNER", table, condition)
    }

    pub fn left_join(self, table: &str, condition: &str) -> Self {
        self.join("LEFT", table, condition)
    }

    pub fn right_join(self, table: &str, condition: &str) -> Self {
        self.join("RIGHT", table, condition)
    }

    pub fn full_outer_join(self, table: &str, condition: &str) -> Self {
        self.join("FULL OUTER", table, condition)
    }

    /// ` ORDER BY <clause>`
    pub fn order_by(self, clause: &str) -> Self {
        self.then(|s| {
            s.push(format_args!(" ORDER BY {clause}"));
            Ok(())
        })
    }

    /// ` GROUP BY <clause>`
    pub fn group_by(self, clause: &str) -> Self {
        self.then(|s| {
            s.push(format_args!(" GROUP BY {clause}"));
            Ok(())
        })
    }

    /// ` LIMIT <n>`
    pub fn limit(self, limit: i64) -> Self {
        self.then(|s| {
            s.push(format_args!(" LIMIT {limit}"));
            Ok(())
        })
    }

    /// ` OFFSET <n>`
    pub fn offset(self, offset: i64) -> Self {
        self.then(|s| {
            s.push(format_args!(" OFFSET {offset}"));
            Ok(())
        })
    }

    /// Turn a leading `SELECT` into `SELECT DISTINCT`. Other statements are
    /// left unchanged.
    pub fn distinct(self) -> Self {
        self.then(|s| {
            if s.sql.starts_with("SELECT") {
                s.sql = s.sql.replacen("SELECT", "SELECT DISTINCT", 1);
            }
            Ok(())
        })
    }
}
