//! Column resolution: which fields map to which columns.

use super::tag::{Annotation, ConstraintFlags};
use super::{FieldDef, RecordDef, ValueType};
use crate::config::ConstraintMatch;
use crate::error::{PgResult, PgStringError};

/// The mapping of one declared field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDescriptor {
    /// Position of the field in [`RecordDef::fields`].
    pub index: usize,
    /// Identifier as declared on the record.
    pub name: &'static str,
    /// Resolved column name; never empty.
    pub column: &'static str,
    /// The field's annotation excludes it from every generated statement.
    pub excluded: bool,
    /// Constraints from the primary annotation.
    pub constraints: ConstraintFlags,
    pub value_type: ValueType,
}

/// Describe one field. Returns `None` for non-exported fields.
///
/// Naming precedence is primary annotation, then secondary annotation, then
/// the declared name. An annotation whose first segment is blank does not
/// name the column and passes to the next source. The field is excluded when
/// the annotation that would name it is `-`. Constraints only ever come from
/// the primary annotation.
pub fn describe_field(
    index: usize,
    field: &'static FieldDef,
    mode: ConstraintMatch,
) -> Option<FieldDescriptor> {
    if !field.exported {
        return None;
    }

    let primary = field.db.filter(|s| !s.is_empty()).map(Annotation::parse);
    let secondary = field.json.filter(|s| !s.is_empty()).map(Annotation::parse);

    let naming = primary
        .filter(|a| a.name().is_some())
        .or_else(|| secondary.filter(|a| a.name().is_some()));

    let excluded = naming.is_some_and(|a| a.is_excluded());
    let column = naming.and_then(|a| a.name()).unwrap_or(field.name);
    let constraints = primary.map(|a| a.constraints(mode)).unwrap_or_default();

    Some(FieldDescriptor {
        index,
        name: field.name,
        column,
        excluded,
        constraints,
        value_type: field.value_type,
    })
}

/// Mapped columns of a record, in declaration order.
///
/// Non-exported and excluded fields are left out.
pub fn resolve_record(def: &'static RecordDef, mode: ConstraintMatch) -> Vec<FieldDescriptor> {
    let columns: Vec<FieldDescriptor> = def
        .fields
        .iter()
        .enumerate()
        .filter_map(|(index, field)| describe_field(index, field, mode))
        .filter(|d| !d.excluded)
        .collect();

    tracing::trace!(
        target: "pgstring",
        record = def.name,
        fields = def.fields.len(),
        columns = columns.len(),
        "resolved record columns"
    );
    columns
}

/// Mapped columns of a described type, with the default constraint policy.
///
/// Fails with [`PgStringError::UnsupportedInput`] when `ty` is not a record.
pub fn resolve_columns(ty: &ValueType) -> PgResult<Vec<FieldDescriptor>> {
    resolve_columns_with(ty, ConstraintMatch::default())
}

/// Like [`resolve_columns`] with an explicit constraint policy.
pub fn resolve_columns_with(
    ty: &ValueType,
    mode: ConstraintMatch,
) -> PgResult<Vec<FieldDescriptor>> {
    match ty {
        ValueType::Record(def) => Ok(resolve_record(def, mode)),
        other => Err(PgStringError::unsupported(
            "resolve_columns",
            other.describe(),
        )),
    }
}

/// Column names of resolved fields.
pub fn column_names(fields: &[FieldDescriptor]) -> Vec<&'static str> {
    fields.iter().map(|f| f.column).collect()
}
