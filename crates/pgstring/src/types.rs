//! Field type → PostgreSQL column type.

use crate::record::ValueType;
use std::borrow::Cow;

/// Fallback for anything without a dedicated column type.
pub const FALLBACK_SQL_TYPE: &str = "TEXT";

/// Map a field's value type to a column type token.
///
/// Never fails: unknown types map to `TEXT`. Arrays map their element type
/// and append `[]`; only one level is unwrapped, so an array of arrays maps
/// to `TEXT[]`.
///
/// ```rust
/// use pgstring::{ValueType, map_type};
///
/// assert_eq!(map_type(&ValueType::Int64), "BIGINT");
/// assert_eq!(map_type(&ValueType::Array(&ValueType::Text)), "TEXT[]");
/// assert_eq!(map_type(&ValueType::Other("Money")), "TEXT");
/// ```
pub fn map_type(ty: &ValueType) -> Cow<'static, str> {
    match ty {
        ValueType::Array(element) => Cow::Owned(format!("{}[]", scalar_type(element))),
        other => Cow::Borrowed(scalar_type(other)),
    }
}

fn scalar_type(ty: &ValueType) -> &'static str {
    match ty {
        ValueType::Text => "TEXT",
        ValueType::Bool => "BOOLEAN",
        ValueType::Int32 => "INTEGER",
        ValueType::Int64 => "BIGINT",
        ValueType::Float32 => "REAL",
        ValueType::Float64 => "DOUBLE PRECISION",
        ValueType::Timestamp => "TIMESTAMP",
        ValueType::Array(_) | ValueType::Record(_) | ValueType::Other(_) => FALLBACK_SQL_TYPE,
    }
}
