//! `#[derive(XmlBind)]`, re-exported by `xb_bind`.
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

static XML_ATTRIBUTE_NAME: &str = "xml";

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod bean;
mod enum_value;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// Implements `TypedBean`, `Bean` and `XmlValue` for a struct with named
/// fields (or a unit struct), and `XmlValue` for a unit-only enum.
///
/// See `xb_bind::XmlBind` for the supported `#[xml(...)]` attributes.
#[proc_macro_derive(XmlBind, attributes(xml))]
pub fn derive_xml_bind(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let result = match &ast.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(_) | Fields::Unit => bean::impl_bean(&ast, &data.fields),
            Fields::Unnamed(fields) => Err(syn::Error::new_spanned(
                fields,
                "`XmlBind` needs named fields; tuple structs have no field names to bind",
            )),
        },
        Data::Enum(data) => enum_value::impl_enum_value(&ast, data),
        Data::Union(data) => Err(syn::Error::new(
            data.union_token.span,
            "`XmlBind` cannot be derived for unions",
        )),
    };

    result.unwrap_or_else(syn::Error::into_compile_error).into()
}
