//! Process-wide registry of derived record types.
//!
//! `#[derive(Record)]` submits a [`RecordRegistration`] for every non-generic
//! record through the `inventory` crate, so descriptor tables can be looked up
//! by type name without naming the type.

use crate::record::RecordDef;

/// Registration entry submitted by `#[derive(Record)]`.
pub struct RecordRegistration {
    /// Returns the descriptor table of the registered type.
    pub def_fn: fn() -> &'static RecordDef,
}

impl RecordRegistration {
    pub const fn new(def_fn: fn() -> &'static RecordDef) -> Self {
        Self { def_fn }
    }
}

inventory::collect!(RecordRegistration);

/// All registered record descriptor tables, in unspecified order.
pub fn records() -> impl Iterator<Item = &'static RecordDef> {
    inventory::iter::<RecordRegistration>
        .into_iter()
        .map(|reg| (reg.def_fn)())
}

/// Find a registered record by type name.
pub fn find(name: &str) -> Option<&'static RecordDef> {
    records().find(|def| def.name == name)
}
