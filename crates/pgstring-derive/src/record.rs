//! Record derive macro implementation

use crate::attrs::FieldAttrs;
use crate::syn_types::infer_type;
use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Result, parse_quote};

struct FieldSpec<'a> {
    ident: &'a syn::Ident,
    ty: &'a syn::Type,
    attrs: FieldAttrs,
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let name_str = name.to_string();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Record can only be derived for structs",
            ));
        }
    };

    let specs = fields
        .iter()
        .map(|field| {
            Ok(FieldSpec {
                // Named fields always carry an ident.
                ident: field
                    .ident
                    .as_ref()
                    .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?,
                ty: &field.ty,
                attrs: FieldAttrs::from_field(field)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let field_count = specs.len();
    let field_defs = specs.iter().map(|spec| {
        let field_name = spec.ident.unraw().to_string();
        let value_type = infer_type(spec.ty).to_value_type();
        let db = spec.attrs.db.as_ref().map(|db| quote!(.db(#db)));
        let json = spec.attrs.json.as_ref().map(|json| quote!(.json(#json)));
        quote! {
            pgstring::FieldDef::new(#field_name, #value_type) #db #json
        }
    });

    let value_exprs = specs.iter().map(|spec| {
        let ident = spec.ident;
        if spec.attrs.is_excluded() {
            quote!(pgstring::Value::Null)
        } else {
            quote!(pgstring::ToValue::to_value(&self.#ident))
        }
    });

    // Generic records need their mapped field types to be convertible.
    let mut generics = input.generics.clone();
    if !generics.params.is_empty() {
        let where_clause = generics.make_where_clause();
        for spec in specs.iter().filter(|s| !s.attrs.is_excluded()) {
            let ty = spec.ty;
            where_clause
                .predicates
                .push(parse_quote!(#ty: pgstring::ToValue));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut ref_generics = generics.clone();
    ref_generics.params.insert(0, parse_quote!('__pgstring_ref));
    let (ref_impl_generics, _, _) = ref_generics.split_for_impl();

    let registration = if input.generics.params.is_empty() {
        quote! {
            pgstring::inventory::submit! {
                pgstring::registry::RecordRegistration::new(
                    <#name as pgstring::Record>::record_def
                )
            }
        }
    } else {
        quote!()
    };

    Ok(quote! {
        const _: () = {
            static FIELDS: [pgstring::FieldDef; #field_count] = [
                #(#field_defs),*
            ];
            static DEF: pgstring::RecordDef = pgstring::RecordDef::new(#name_str, &FIELDS);

            impl #impl_generics pgstring::Record for #name #ty_generics #where_clause {
                fn record_def() -> &'static pgstring::RecordDef {
                    &DEF
                }

                fn values(&self) -> ::std::vec::Vec<pgstring::Value> {
                    ::std::vec![#(#value_exprs),*]
                }
            }

            impl #impl_generics pgstring::ToValue for #name #ty_generics #where_clause {
                fn to_value(&self) -> pgstring::Value {
                    pgstring::Value::Record(pgstring::Record::to_record_value(self))
                }
            }

            impl #impl_generics ::std::convert::From<#name #ty_generics> for pgstring::Value #where_clause {
                fn from(record: #name #ty_generics) -> Self {
                    pgstring::ToValue::to_value(&record)
                }
            }

            impl #ref_impl_generics ::std::convert::From<&'__pgstring_ref #name #ty_generics> for pgstring::Value #where_clause {
                fn from(record: &'__pgstring_ref #name #ty_generics) -> Self {
                    pgstring::ToValue::to_value(record)
                }
            }

            impl #impl_generics ::std::convert::From<#name #ty_generics> for pgstring::Args #where_clause {
                fn from(record: #name #ty_generics) -> Self {
                    pgstring::Args::Value(pgstring::ToValue::to_value(&record))
                }
            }

            impl #ref_impl_generics ::std::convert::From<&'__pgstring_ref #name #ty_generics> for pgstring::Args #where_clause {
                fn from(record: &'__pgstring_ref #name #ty_generics) -> Self {
                    pgstring::Args::Value(pgstring::ToValue::to_value(record))
                }
            }

            #registration
        };
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_enums_and_tuple_structs() {
        let input: DeriveInput = parse_quote! {
            enum Status { Active, Inactive }
        };
        assert!(expand(input).is_err());

        let input: DeriveInput = parse_quote! {
            struct Pair(i32, i32);
        };
        assert!(expand(input).is_err());

        let input: DeriveInput = parse_quote! {
            struct Marker;
        };
        assert!(expand(input).is_err());
    }

    #[test]
    fn test_excluded_fields_are_not_read() {
        let input: DeriveInput = parse_quote! {
            struct User {
                #[db = "id,primarykey"]
                id: i64,
                #[db = "-"]
                handle: Handle,
            }
        };
        let tokens = expand(input).unwrap().to_string();
        assert!(tokens.contains("self . id"));
        assert!(!tokens.contains("self . handle"));
        assert!(tokens.contains("inventory :: submit"));
    }

    #[test]
    fn test_generic_records_are_not_registered() {
        let input: DeriveInput = parse_quote! {
            struct Wrapper<T> {
                value: T,
            }
        };
        let tokens = expand(input).unwrap().to_string();
        assert!(!tokens.contains("inventory"));
        assert!(tokens.contains("T : pgstring :: ToValue"));
    }
}
