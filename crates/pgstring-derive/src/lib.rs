//! Derive macro for pgstring
//!
//! Provides `#[derive(Record)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attrs;
mod record;
mod syn_types;

/// Derive `Record` for a struct with named fields.
///
/// # Example
///
/// ```ignore
/// use pgstring::Record;
///
/// #[derive(Record)]
/// struct User {
///     #[db = "id,primarykey"]
///     id: i64,
///     #[db = "name,notnull,unique"]
///     name: String,
///     #[json = "email_address"]
///     email: Option<String>,
///     #[db = "-"]
///     session: SessionHandle,
/// }
/// ```
///
/// # Attributes
///
/// - `#[db = "column,primarykey,notnull,unique"]` - Column name and constraints
/// - `#[db = "-"]` - Exclude the field
/// - `#[json = "name"]` - Fallback column name when `#[db]` gives none
///
/// Without `#[json]`, `#[serde(rename = "...")]` and `#[serde(skip)]` are used
/// as the fallback instead.
///
/// # Generated
///
/// - `impl Record`, backed by a static descriptor table
/// - `ToValue`, plus `From<T>` / `From<&T>` for `Value` and `Args`
/// - Registration in `pgstring::registry` (non-generic types only)
#[proc_macro_derive(Record, attributes(db, json))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
