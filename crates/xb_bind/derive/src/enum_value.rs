use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataEnum, DeriveInput, Fields};

use crate::attributes::VariantAttributes;

/// Generates `XmlValue` for a unit-only enum; variants travel as their names.
pub(crate) fn impl_enum_value(ast: &DeriveInput, data: &DataEnum) -> syn::Result<TokenStream> {
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(ast, "`XmlBind` enums need at least one variant"));
    }

    let mut idents = Vec::with_capacity(data.variants.len());
    let mut names = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "`XmlBind` enums can only have unit variants",
            ));
        }
        let attrs = VariantAttributes::parse(&variant.attrs)?;
        let name = match attrs.rename {
            Some(lit) => lit.value(),
            None => variant.ident.to_string(),
        };
        if names.contains(&name) {
            return Err(syn::Error::new_spanned(variant, format!("duplicate variant name `{name}`")));
        }
        idents.push(&variant.ident);
        names.push(name);
    }

    let xb_bind_path = crate::path::xb_bind();
    let value_ = crate::path::value_(&xb_bind_path);
    let value_type_ = crate::path::value_type_(&xb_bind_path);
    let scalar_type_ = crate::path::scalar_type_(&xb_bind_path);
    let xml_value_ = crate::path::xml_value_(&xb_bind_path);
    let bind_error_ = crate::path::bind_error_(&xb_bind_path);

    let ident = &ast.ident;
    let type_name = ident.to_string();
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #xml_value_ for #ident #ty_generics #where_clause {
            const VALUE_TYPE: #value_type_ = #value_type_::Scalar(#scalar_type_::Enum(&[#(#names),*]));

            fn to_value(&self) -> ::core::option::Option<#value_> {
                let name: &'static str = match self {
                    #(Self::#idents => #names,)*
                };
                ::core::option::Option::Some(#value_::Str(::core::convert::Into::into(name)))
            }

            fn from_value(value: #value_) -> ::core::result::Result<Self, #bind_error_> {
                match value {
                    #value_::Str(text) => match text.as_str() {
                        #(#names => ::core::result::Result::Ok(Self::#idents),)*
                        _ => ::core::result::Result::Err(#bind_error_::coercion_failure(#type_name, text)),
                    },
                    _ => ::core::result::Result::Err(#bind_error_::coercion_failure(#type_name, "non-text value")),
                }
            }
        }
    })
}
