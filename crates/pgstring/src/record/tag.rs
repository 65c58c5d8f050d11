//! Field annotation mini-language.
//!
//! An annotation is a comma-separated list of segments. The first segment is
//! the column-name override, or `-` to exclude the field. Later segments name
//! constraints: `primarykey`, `notnull`, `unique`.

use crate::config::ConstraintMatch;

const PRIMARY_KEY: &str = "primarykey";
const NOT_NULL: &str = "notnull";
const UNIQUE: &str = "unique";

/// Sentinel that excludes a field from mapping.
pub const EXCLUDE: &str = "-";

/// Constraints declared by a primary annotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstraintFlags {
    pub primary_key: bool,
    pub not_null: bool,
    pub unique: bool,
}

impl ConstraintFlags {
    pub fn is_empty(&self) -> bool {
        !(self.primary_key || self.not_null || self.unique)
    }
}

/// A parsed field annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotation<'a> {
    raw: &'a str,
    name: &'a str,
}

impl<'a> Annotation<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let name = raw.split(',').next().unwrap_or_default();
        Self { raw, name }
    }

    /// The full annotation text.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// Column-name override; `None` when the first segment is blank.
    pub fn name(&self) -> Option<&'a str> {
        (!self.name.is_empty()).then_some(self.name)
    }

    pub fn is_excluded(&self) -> bool {
        self.name == EXCLUDE
    }

    /// Constraint flags under the given matching policy.
    pub fn constraints(&self, mode: ConstraintMatch) -> ConstraintFlags {
        match mode {
            ConstraintMatch::Substring => ConstraintFlags {
                primary_key: self.raw.contains(PRIMARY_KEY),
                not_null: self.raw.contains(NOT_NULL),
                unique: self.raw.contains(UNIQUE),
            },
            ConstraintMatch::Segment => {
                let mut flags = ConstraintFlags::default();
                for segment in self.raw.split(',').skip(1).map(str::trim) {
                    match segment {
                        PRIMARY_KEY => flags.primary_key = true,
                        NOT_NULL => flags.not_null = true,
                        UNIQUE => flags.unique = true,
                        _ => {}
                    }
                }
                flags
            }
        }
    }
}
