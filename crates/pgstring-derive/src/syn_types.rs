//! Type helper utilities for syn type analysis.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

/// Extract the inner type T from Option<T>, or return None if not an Option type.
///
/// Recognizes `Option<T>`, `std::option::Option<T>`, and `core::option::Option<T>`.
pub fn option_inner(ty: &syn::Type) -> Option<&syn::Type> {
    single_generic_arg(ty, "Option")
}

/// Extract the inner type T from Vec<T>, or return None if not a Vec type.
///
/// Recognizes `Vec<T>` and `std::vec::Vec<T>`.
pub fn vec_inner(ty: &syn::Type) -> Option<&syn::Type> {
    single_generic_arg(ty, "Vec")
}

fn single_generic_arg<'a>(ty: &'a syn::Type, wrapper: &str) -> Option<&'a syn::Type> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    let seg = type_path.path.segments.last()?;
    if seg.ident != wrapper {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &seg.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    let syn::GenericArgument::Type(inner) = args.args.first()? else {
        return None;
    };
    Some(inner)
}

/// Value type of a field, inferred from its declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferredType {
    Text,
    Bool,
    Int32,
    Int64,
    Float32,
    Float64,
    Timestamp,
    Array(Box<InferredType>),
    Other(String),
}

const TIMESTAMP_TYPES: &[&str] = &[
    "DateTime",
    "NaiveDateTime",
    "OffsetDateTime",
    "PrimitiveDateTime",
    "SystemTime",
];

pub fn infer_type(ty: &syn::Type) -> InferredType {
    if let Some(inner) = option_inner(ty) {
        return infer_type(inner);
    }
    if let Some(inner) = vec_inner(ty) {
        return InferredType::Array(Box::new(infer_type(inner)));
    }
    match ty {
        syn::Type::Reference(reference) => infer_type(&reference.elem),
        syn::Type::Paren(paren) => infer_type(&paren.elem),
        syn::Type::Group(group) => infer_type(&group.elem),
        syn::Type::Path(path) if path.qself.is_none() => {
            let Some(last) = path.path.segments.last() else {
                return InferredType::Other(type_name(ty));
            };
            let ident = last.ident.to_string();
            match ident.as_str() {
                "String" | "str" => InferredType::Text,
                "bool" => InferredType::Bool,
                "i32" => InferredType::Int32,
                "i64" => InferredType::Int64,
                "f32" => InferredType::Float32,
                "f64" => InferredType::Float64,
                name if TIMESTAMP_TYPES.contains(&name) => InferredType::Timestamp,
                _ => InferredType::Other(type_name(ty)),
            }
        }
        _ => InferredType::Other(type_name(ty)),
    }
}

fn type_name(ty: &syn::Type) -> String {
    ty.to_token_stream().to_string().replace(' ', "")
}

impl InferredType {
    /// `pgstring::ValueType` constant expression for this type.
    pub fn to_value_type(&self) -> TokenStream {
        match self {
            InferredType::Text => quote!(pgstring::ValueType::Text),
            InferredType::Bool => quote!(pgstring::ValueType::Bool),
            InferredType::Int32 => quote!(pgstring::ValueType::Int32),
            InferredType::Int64 => quote!(pgstring::ValueType::Int64),
            InferredType::Float32 => quote!(pgstring::ValueType::Float32),
            InferredType::Float64 => quote!(pgstring::ValueType::Float64),
            InferredType::Timestamp => quote!(pgstring::ValueType::Timestamp),
            InferredType::Array(inner) => {
                let inner = inner.to_value_type();
                quote!(pgstring::ValueType::Array(&#inner))
            }
            InferredType::Other(name) => quote!(pgstring::ValueType::Other(#name)),
        }
    }
}
