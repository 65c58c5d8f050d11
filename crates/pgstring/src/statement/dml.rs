//! INSERT / UPDATE building blocks and RETURNING / ON CONFLICT.

use super::{Statement, expect_record};
use crate::record::{Record, resolve_record};
use crate::value::Value;

impl Statement {
    /// ` (c1, c2, ...)` from the mapped columns of a record.
    ///
    /// The column list is kept for a following [`values`](Self::values).
    pub fn columns(self, record: impl Into<Value>) -> Self {
        let value = record.into();
        self.then(|s| {
            let record = expect_record(&value, "columns")?;
            let columns: Vec<String> = resolve_record(record.def(), s.config.constraint_match)
                .into_iter()
                .map(|f| f.column.to_string())
                .collect();
            s.push(format_args!(" ({})", columns.join(", ")));
            s.columns = columns;
            Ok(())
        })
    }

    /// ` VALUES (@c1, @c2, ...)` using the column list of the preceding
    /// [`columns`](Self::columns) call, and bind the record's values.
    pub fn values(self, record: impl Into<Value>) -> Self {
        let value = record.into();
        self.then(|s| {
            let record = expect_record(&value, "values")?;
            s.args.merge(record.bindings());
            let placeholders: Vec<String> = s.columns.iter().map(|c| format!("@{c}")).collect();
            s.push(format_args!(" VALUES ({})", placeholders.join(", ")));
            Ok(())
        })
    }

    /// ` SET a = @a, b = @b, ...` sorted by column name, and bind the
    /// record's values.
    ///
    /// The sorted column list replaces the one kept by earlier steps.
    pub fn set(self, record: impl Into<Value>) -> Self {
        let value = record.into();
        self.then(|s| {
            let bindings = expect_record(&value, "set")?.bindings();
            let columns: Vec<String> = bindings.keys().map(str::to_string).collect();
            let setters: Vec<String> = columns.iter().map(|c| format!("{c} = @{c}")).collect();
            s.push(format_args!(" SET {}", setters.join(", ")));
            s.columns = columns;
            s.args.merge(bindings);
            Ok(())
        })
    }

    /// ` RETURNING <columns of R>`
    pub fn returning<R: Record>(self, _record: &R) -> Self {
        let columns: Vec<&str> = R::columns().iter().map(|f| f.column).collect();
        self.returning_expr(&columns.join(", "))
    }

    /// ` RETURNING a, b, ...`
    pub fn returning_columns<I, S>(self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns: Vec<String> = columns.into_iter().map(|c| c.as_ref().to_string()).collect();
        self.returning_expr(&columns.join(", "))
    }

    /// ` RETURNING <expr>`
    pub fn returning_expr(self, expr: &str) -> Self {
        self.then(|s| {
            s.push(format_args!(" RETURNING {expr}"));
            Ok(())
        })
    }

    /// ` RETURNING *`
    pub fn returning_all(self) -> Self {
        self.returning_expr("*")
    }

    /// ` ON CONFLICT <target>`, or bare ` ON CONFLICT` for an empty target.
    pub fn on_conflict(self, target: &str) -> Self {
        self.then(|s| {
            if target.is_empty() {
                s.push(format_args!(" ON CONFLICT"));
            } else {
                s.push(format_args!(" ON CONFLICT {target}"));
            }
            Ok(())
        })
    }

    /// ` DO NOTHING`
    pub fn do_nothing(self) -> Self {
        self.then(|s| {
            s.push(format_args!(" DO NOTHING"));
            Ok(())
        })
    }

    /// ` DO UPDATE`; follow with [`set`](Self::set).
    pub fn do_update(self) -> Self {
        self.then(|s| {
            s.push(format_args!(" DO UPDATE"));
            Ok(())
        })
    }
}
