//! Bound values.
//!
//! [`Value`] is the dynamically typed value stored in a
//! [`BindingTable`](crate::BindingTable). It covers the scalar kinds the type
//! mapper knows about, arrays, JSON, UUIDs and whole record snapshots.

use crate::record::RecordValue;
use bytes::BytesMut;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};
use uuid::Uuid;

/// A value bound to a named parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Text(String),
    /// Timestamp without time zone.
    Timestamp(NaiveDateTime),
    /// Timestamp with time zone, normalized to UTC.
    TimestampTz(DateTime<Utc>),
    Uuid(Uuid),
    Json(serde_json::Value),
    Array(Vec<Value>),
    /// A snapshot of a record instance.
    Record(RecordValue),
}

impl Value {
    /// Short name of the value kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int16(_) => "i16",
            Value::Int32(_) => "i32",
            Value::Int64(_) => "i64",
            Value::Float32(_) => "f32",
            Value::Float64(_) => "f64",
            Value::Text(_) => "text",
            Value::Timestamp(_) => "timestamp",
            Value::TimestampTz(_) => "timestamptz",
            Value::Uuid(_) => "uuid",
            Value::Json(_) => "json",
            Value::Array(_) => "array",
            Value::Record(_) => "record",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the record snapshot if this value holds one.
    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }
}

/// Conversion of a Rust value into a [`Value`].
///
/// `#[derive(Record)]` calls this for every mapped field, so any field type
/// that is read by the binder needs an implementation.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

macro_rules! impl_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::$variant(self.clone())
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_scalar! {
    bool => Bool,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    String => Text,
    NaiveDateTime => Timestamp,
    DateTime<Utc> => TimestampTz,
    Uuid => Uuid,
    serde_json::Value => Json,
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(v) => v.to_sql_checked(ty, out),
            Value::Int16(v) => v.to_sql_checked(ty, out),
            Value::Int32(v) => v.to_sql_checked(ty, out),
            Value::Int64(v) => v.to_sql_checked(ty, out),
            Value::Float32(v) => v.to_sql_checked(ty, out),
            Value::Float64(v) => v.to_sql_checked(ty, out),
            Value::Text(v) => v.to_sql_checked(ty, out),
            Value::Timestamp(v) => v.to_sql_checked(ty, out),
            Value::TimestampTz(v) => v.to_sql_checked(ty, out),
            Value::Uuid(v) => v.to_sql_checked(ty, out),
            Value::Json(v) => v.to_sql_checked(ty, out),
            Value::Array(items) => items.to_sql_checked(ty, out),
            Value::Record(record) => serde_json::to_value(record)?.to_sql_checked(ty, out),
        }
    }

    // The concrete variant decides; a mismatch surfaces as a WrongType error
    // from the inner `to_sql_checked` call.
    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(Value::from(1i32), Value::Int32(1));
        assert_eq!(Value::from(1i64), Value::Int64(1));
        assert_eq!(Value::from("a"), Value::Text("a".to_string()));
        assert_eq!(Value::from(Some(true)), Value::Bool(true));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(
            Value::from(vec![1i64, 2]),
            Value::Array(vec![Value::Int64(1), Value::Int64(2)])
        );
    }

    #[test]
    fn test_to_value_through_references() {
        let s = String::from("x");
        let r = &s;
        assert_eq!(r.to_value(), Value::Text("x".to_string()));
        assert_eq!(Some(3i16).to_value(), Value::Int16(3));
        assert_eq!(
            vec![Some(1.5f64), None].to_value(),
            Value::Array(vec![Value::Float64(1.5), Value::Null])
        );
    }

    #[test]
    fn test_kind_name() {
        assert_eq!(Value::Null.kind_name(), "null");
        assert_eq!(Value::from(7i64).kind_name(), "i64");
        assert_eq!(Value::from(vec!["a"]).kind_name(), "array");
        assert!(Value::Null.is_null());
        assert!(Value::from(1i32).as_record().is_none());
    }

    #[test]
    fn test_serialize_untagged() {
        let json = serde_json::to_value(Value::Array(vec![
            Value::Int32(1),
            Value::Text("a".into()),
            Value::Null,
        ]))
        .unwrap();
        assert_eq!(json, serde_json::json!([1, "a", null]));
    }

    #[test]
    fn test_to_sql_null_and_scalar() {
        let mut buf = BytesMut::new();
        let null = Value::Null.to_sql_checked(&Type::INT4, &mut buf).unwrap();
        assert!(matches!(null, IsNull::Yes));

        let mut buf = BytesMut::new();
        let res = Value::Int32(42).to_sql_checked(&Type::INT4, &mut buf).unwrap();
        assert!(matches!(res, IsNull::No));
        assert_eq!(&buf[..], &42i32.to_be_bytes());
    }

    #[test]
    fn test_to_sql_wrong_type_is_rejected() {
        let mut buf = BytesMut::new();
        assert!(Value::Int32(1).to_sql_checked(&Type::TEXT, &mut buf).is_err());
    }
}
