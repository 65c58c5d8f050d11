//! Binding tables: column name → value.

use super::resolve::resolve_record;
use super::{Record, RecordDef, RecordValue};
use crate::config::ConstraintMatch;
use crate::error::{PgResult, PgStringError};
use crate::value::Value;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Named parameter values of a statement.
///
/// Keys are unique; inserting an existing key overwrites its value. Iteration
/// is in key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BindingTable {
    entries: BTreeMap<String, Value>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` to `name`, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(name.into(), value.into())
    }

    /// Chainable [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merge `other` into this table. Keys from `other` win on collision.
    pub fn merge(&mut self, other: BindingTable) {
        self.entries.extend(other.entries);
    }

    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.entries
    }
}

impl From<BTreeMap<String, Value>> for BindingTable {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self { entries }
    }
}

impl From<std::collections::HashMap<String, Value>> for BindingTable {
    fn from(entries: std::collections::HashMap<String, Value>) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for BindingTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for BindingTable {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for BindingTable {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Bind a record instance.
///
/// One entry per column reported by the resolver for the same type, holding
/// a copy of the field value.
pub fn bind<R: Record>(record: &R) -> BindingTable {
    bind_values(R::record_def(), &record.values())
}

/// Bind a record snapshot.
pub fn bind_record(record: &RecordValue) -> BindingTable {
    bind_values(record.def(), record.values())
}

fn bind_values(def: &'static RecordDef, values: &[Value]) -> BindingTable {
    resolve_record(def, ConstraintMatch::default())
        .into_iter()
        .map(|field| {
            let value = values.get(field.index).cloned().unwrap_or(Value::Null);
            (field.column, value)
        })
        .collect()
}

/// Bind a dynamic value, which must hold a record.
pub fn bind_value(value: &Value) -> PgResult<BindingTable> {
    match value {
        Value::Record(record) => Ok(bind_record(record)),
        other => Err(PgStringError::unsupported("bind", other.kind_name())),
    }
}
