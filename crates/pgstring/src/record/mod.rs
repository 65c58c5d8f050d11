//! Record metadata and the field-introspection engine.
//!
//! A record type registers its shape once, as a static [`RecordDef`], either
//! through `#[derive(Record)]` or by hand. Everything else is derived from that
//! table on demand:
//!
//! - [`resolve_columns`]: which fields take part in SQL mapping, under which
//!   column name and with which constraints
//! - [`bind`]: the name → value table for one record instance
//! - [`map_type`](crate::map_type): the SQL column type of a field
//!
//! # Example
//!
//! ```ignore
//! use pgstring::Record;
//!
//! #[derive(Record)]
//! struct User {
//!     #[db = "id,primarykey"]
//!     id: i32,
//!     #[db = "name,notnull,unique"]
//!     name: String,
//!     #[db = "-"]
//!     cache: Vec<u8>,
//! }
//!
//! let cols = User::columns();
//! assert_eq!(cols.len(), 2);
//! ```

mod bind;
mod resolve;
mod tag;

pub use bind::{BindingTable, bind, bind_record, bind_value};
pub use resolve::{
    FieldDescriptor, column_names, describe_field, resolve_columns, resolve_columns_with,
    resolve_record,
};
pub use tag::{Annotation, ConstraintFlags};

use crate::config::ConstraintMatch;
use crate::value::Value;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Declared value kind of a field.
///
/// Built at compile time by `#[derive(Record)]`, so every variant is usable in
/// a `static` descriptor table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueType {
    Text,
    Bool,
    Int32,
    Int64,
    Float32,
    Float64,
    Timestamp,
    /// Array of the inner type.
    Array(&'static ValueType),
    /// A record type with its own descriptor table.
    Record(&'static RecordDef),
    /// Anything else, carrying the declared type name.
    Other(&'static str),
}

impl ValueType {
    pub fn is_record(&self) -> bool {
        matches!(self, ValueType::Record(_))
    }

    /// Human readable type name.
    pub fn describe(&self) -> String {
        match self {
            ValueType::Text => "text".to_string(),
            ValueType::Bool => "bool".to_string(),
            ValueType::Int32 => "i32".to_string(),
            ValueType::Int64 => "i64".to_string(),
            ValueType::Float32 => "f32".to_string(),
            ValueType::Float64 => "f64".to_string(),
            ValueType::Timestamp => "timestamp".to_string(),
            ValueType::Array(inner) => format!("array of {}", inner.describe()),
            ValueType::Record(def) => def.name.to_string(),
            ValueType::Other(name) => (*name).to_string(),
        }
    }
}

/// Statically registered description of one declared field.
///
/// # Example
///
/// ```rust
/// use pgstring::{FieldDef, RecordDef, ValueType};
///
/// static POINT_FIELDS: [FieldDef; 3] = [
///     FieldDef::new("x", ValueType::Float64).db("x,notnull"),
///     FieldDef::new("y", ValueType::Float64).json("y_pos,omitempty"),
///     FieldDef::new("scratch", ValueType::Other("Vec<u8>")).private(),
/// ];
/// static POINT: RecordDef = RecordDef::new("Point", &POINT_FIELDS);
///
/// assert_eq!(POINT.fields.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDef {
    /// Identifier as declared on the record.
    pub name: &'static str,
    /// Primary annotation (`name,primarykey,notnull,unique` or `-`).
    pub db: Option<&'static str>,
    /// Secondary annotation, consulted only for naming and exclusion.
    pub json: Option<&'static str>,
    pub value_type: ValueType,
    /// Non-exported fields never take part in mapping.
    pub exported: bool,
}

impl FieldDef {
    pub const fn new(name: &'static str, value_type: ValueType) -> Self {
        Self {
            name,
            db: None,
            json: None,
            value_type,
            exported: true,
        }
    }

    pub const fn db(mut self, annotation: &'static str) -> Self {
        self.db = Some(annotation);
        self
    }

    pub const fn json(mut self, annotation: &'static str) -> Self {
        self.json = Some(annotation);
        self
    }

    pub const fn private(mut self) -> Self {
        self.exported = false;
        self
    }
}

/// Descriptor table of a record type.
#[derive(Debug, PartialEq)]
pub struct RecordDef {
    /// Type name of the record.
    pub name: &'static str,
    /// Fields in declaration order.
    pub fields: &'static [FieldDef],
}

impl RecordDef {
    pub const fn new(name: &'static str, fields: &'static [FieldDef]) -> Self {
        Self { name, fields }
    }

    /// Resolve the mapped columns of this record.
    pub fn columns(&'static self, mode: ConstraintMatch) -> Vec<FieldDescriptor> {
        resolve_record(self, mode)
    }
}

/// A record type with a static descriptor table.
///
/// Usually implemented with `#[derive(Record)]`.
pub trait Record {
    /// The descriptor table of this type.
    fn record_def() -> &'static RecordDef
    where
        Self: Sized;

    /// One value per entry of `record_def().fields`, in the same order.
    ///
    /// Excluded or non-exported fields may report [`Value::Null`].
    fn values(&self) -> Vec<Value>;

    fn value_type() -> ValueType
    where
        Self: Sized,
    {
        ValueType::Record(Self::record_def())
    }

    /// Mapped columns, using the default constraint matching policy.
    fn columns() -> Vec<FieldDescriptor>
    where
        Self: Sized,
    {
        resolve_record(Self::record_def(), ConstraintMatch::default())
    }

    /// Name → value table of this instance.
    fn bindings(&self) -> BindingTable
    where
        Self: Sized,
    {
        bind(self)
    }

    /// Owned snapshot of this instance.
    fn to_record_value(&self) -> RecordValue
    where
        Self: Sized,
    {
        RecordValue::new(Self::record_def(), self.values())
    }
}

/// An owned snapshot of a record instance.
///
/// Values are copied when the snapshot is taken, so mutating the source
/// afterwards does not affect it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValue {
    def: &'static RecordDef,
    values: Vec<Value>,
}

impl RecordValue {
    pub fn new(def: &'static RecordDef, values: Vec<Value>) -> Self {
        debug_assert_eq!(
            def.fields.len(),
            values.len(),
            "record `{}` reported a value count that does not match its fields",
            def.name
        );
        Self { def, values }
    }

    pub fn def(&self) -> &'static RecordDef {
        self.def
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value of the field at `index` in `def().fields`.
    pub fn value_at(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn bindings(&self) -> BindingTable {
        bind_record(self)
    }
}

impl Serialize for RecordValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let bindings = self.bindings();
        let mut map = serializer.serialize_map(Some(bindings.len()))?;
        for (name, value) in bindings.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl From<RecordValue> for Value {
    fn from(record: RecordValue) -> Self {
        Value::Record(record)
    }
}

#[cfg(test)]
mod tests;
