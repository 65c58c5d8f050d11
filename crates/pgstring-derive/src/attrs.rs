//! Field attribute parsing for the Record derive.
//!
//! Reads `#[db = "..."]` and `#[json = "..."]`, and falls back to
//! `#[serde(rename = "...")]` / `#[serde(skip)]` for the secondary annotation.

use syn::{Expr, ExprLit, Lit, Meta, Result};

/// Annotations declared on one field.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct FieldAttrs {
    pub db: Option<String>,
    pub json: Option<String>,
}

impl FieldAttrs {
    pub(crate) fn from_field(field: &syn::Field) -> Result<Self> {
        let mut attrs = FieldAttrs::default();
        let mut serde = SerdeAttrs::default();

        for attr in &field.attrs {
            if attr.path().is_ident("db") {
                attrs.db = Some(string_value(&attr.meta, "db")?);
            } else if attr.path().is_ident("json") {
                attrs.json = Some(string_value(&attr.meta, "json")?);
            } else if attr.path().is_ident("serde") {
                // Malformed serde attributes are serde's to report.
                let _ = serde.read(attr);
            }
        }

        if attrs.json.is_none() {
            attrs.json = serde.as_annotation();
        }
        Ok(attrs)
    }

    /// Mirrors the resolver: the annotation that names the column decides
    /// exclusion. Excluded fields are never read.
    pub(crate) fn is_excluded(&self) -> bool {
        let first_segment = |a: &Option<String>| {
            a.as_deref()
                .and_then(|s| s.split(',').next())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        first_segment(&self.db)
            .or_else(|| first_segment(&self.json))
            .is_some_and(|name| name == "-")
    }
}

fn string_value(meta: &Meta, name: &str) -> Result<String> {
    if let Meta::NameValue(nv) = meta {
        if let Expr::Lit(ExprLit {
            lit: Lit::Str(lit), ..
        }) = &nv.value
        {
            return Ok(lit.value());
        }
    }
    Err(syn::Error::new_spanned(
        meta,
        format!("expected #[{name} = \"...\"]"),
    ))
}

#[derive(Default)]
struct SerdeAttrs {
    rename: Option<String>,
    skip: bool,
}

impl SerdeAttrs {
    fn read(&mut self, attr: &syn::Attribute) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                if meta.input.peek(syn::Token![=]) {
                    let lit: syn::LitStr = meta.value()?.parse()?;
                    self.rename = Some(lit.value());
                } else {
                    // rename(serialize = "...", deserialize = "...")
                    meta.parse_nested_meta(|inner| {
                        let lit: syn::LitStr = inner.value()?.parse()?;
                        if inner.path.is_ident("serialize") {
                            self.rename = Some(lit.value());
                        }
                        Ok(())
                    })?;
                }
            } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                self.skip = true;
            } else if meta.input.peek(syn::Token![=]) {
                let _: Expr = meta.value()?.parse()?;
            } else if meta.input.peek(syn::token::Paren) {
                let content;
                syn::parenthesized!(content in meta.input);
                let _: proc_macro2::TokenStream = content.parse()?;
            }
            Ok(())
        })
    }

    fn as_annotation(&self) -> Option<String> {
        if self.skip {
            Some("-".to_string())
        } else {
            self.rename.clone()
        }
    }
}
