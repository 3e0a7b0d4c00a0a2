use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Fields, GenericParam, parse_quote};

use crate::attributes::{FieldAttributes, TypeAttributes};

struct BoundField<'a> {
    field: &'a syn::Field,
    attrs: FieldAttributes,
}

/// Generates `TypedBean`, `Bean` and `XmlValue` for a struct.
pub(crate) fn impl_bean(ast: &DeriveInput, fields: &Fields) -> syn::Result<TokenStream> {
    let type_attrs = TypeAttributes::parse(&ast.attrs)?;

    let mut bound = Vec::new();
    for field in fields {
        let attrs = FieldAttributes::parse(&field.attrs)?;
        if attrs.skip.is_none() {
            bound.push(BoundField { field, attrs });
        }
    }

    let xb_bind_path = crate::path::xb_bind();
    let accessor_ = crate::path::accessor_(&xb_bind_path);
    let annotations_ = crate::path::annotations_(&xb_bind_path);
    let bean_ = crate::path::bean_(&xb_bind_path);
    let typed_bean_ = crate::path::typed_bean_(&xb_bind_path);
    let bean_info_ = crate::path::bean_info_(&xb_bind_path);
    let value_ = crate::path::value_(&xb_bind_path);
    let value_type_ = crate::path::value_type_(&xb_bind_path);
    let xml_value_ = crate::path::xml_value_(&xb_bind_path);
    let bind_error_ = crate::path::bind_error_(&xb_bind_path);
    let box_ = crate::path::box_(&xb_bind_path);

    let ident = &ast.ident;
    let type_name = ident.to_string();
    let root = match &type_attrs.root {
        Some(lit) => quote!(#lit),
        None => quote!(#type_name),
    };

    // Every type parameter must itself be bindable.
    let mut generics = ast.generics.clone();
    let is_generic = generics
        .params
        .iter()
        .any(|p| matches!(p, GenericParam::Type(_)));
    for param in generics.params.iter_mut() {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(#xml_value_));
        }
    }
    generics
        .make_where_clause()
        .predicates
        .push(parse_quote!(Self: ::core::default::Default + ::core::clone::Clone + ::core::marker::Send + ::core::marker::Sync + 'static));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let accessors = bound.iter().map(|b| {
        let ty = &b.field.ty;
        let name = field_name(b.field);
        let annotations = b.attrs.to_tokens(&annotations_);
        quote! {
            #accessor_::new::<#ty>(#name).with_annotations(#annotations)
        }
    });

    let len = bound.len();
    let build_info = quote! {
        let accessors: [#accessor_; #len] = [#(#accessors),*];
        #bean_info_::new::<Self>(#type_name, #root, accessors)
    };

    let cell_tokens = if is_generic {
        let cell = crate::path::generic_bean_info_cell_(&xb_bind_path);
        quote! {
            static CELL: #cell = #cell::new();
            CELL.get_or_insert::<Self>(|| {
                #build_info
            })
        }
    } else {
        let cell = crate::path::bean_info_cell_(&xb_bind_path);
        quote! {
            static CELL: #cell = #cell::new();
            CELL.get_or_init(|| {
                #build_info
            })
        }
    };

    let read_arms = bound.iter().enumerate().map(|(index, b)| {
        let member = b.field.ident.as_ref();
        let ty = &b.field.ty;
        quote! {
            #index => <#ty as #xml_value_>::to_value(&self.#member),
        }
    });

    let write_arms = bound.iter().enumerate().map(|(index, b)| {
        let member = b.field.ident.as_ref();
        let ty = &b.field.ty;
        quote! {
            #index => {
                self.#member = <#ty as #xml_value_>::from_value(value)?;
                ::core::result::Result::Ok(())
            }
        }
    });

    let auto_register = get_auto_register_impl(&type_attrs, is_generic, ident, &xb_bind_path);

    Ok(quote! {
        impl #impl_generics #typed_bean_ for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #bean_info_ {
                #cell_tokens
            }
        }

        impl #impl_generics #bean_ for #ident #ty_generics #where_clause {
            #[inline]
            fn bean_info(&self) -> &'static #bean_info_ {
                <Self as #typed_bean_>::type_info()
            }

            fn read_field(&self, index: usize) -> ::core::option::Option<#value_> {
                match index {
                    #(#read_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            #[allow(unused_variables, reason = "structs without fields ignore the value")]
            fn write_field(
                &mut self,
                index: usize,
                value: #value_,
            ) -> ::core::result::Result<(), #bind_error_> {
                match index {
                    #(#write_arms)*
                    _ => ::core::result::Result::Err(#bind_error_::unsupported(
                        ::core::concat!("no field with this index in `", #type_name, "`"),
                    )),
                }
            }

            #[inline]
            fn clone_bean(&self) -> #box_<dyn #bean_> {
                #box_::new(::core::clone::Clone::clone(self))
            }
        }

        impl #impl_generics #xml_value_ for #ident #ty_generics #where_clause {
            const VALUE_TYPE: #value_type_ = #value_type_::Bean(<Self as #typed_bean_>::type_info);

            #[inline]
            fn to_value(&self) -> ::core::option::Option<#value_> {
                ::core::option::Option::Some(#value_::Object(
                    #box_::new(::core::clone::Clone::clone(self)),
                ))
            }

            #[inline]
            fn from_value(value: #value_) -> ::core::result::Result<Self, #bind_error_> {
                value.into_bean::<Self>()
            }
        }

        #auto_register
    })
}

// Raw identifiers bind under their plain name.
fn field_name(field: &syn::Field) -> String {
    field
        .ident
        .as_ref()
        .map(|ident| ident.to_string().trim_start_matches("r#").to_owned())
        .unwrap_or_default()
}

/// Generates the `inventory` submission of `#[xml(auto_register)]`.
#[cfg(feature = "auto_register")]
fn get_auto_register_impl(
    attrs: &TypeAttributes,
    is_generic: bool,
    ident: &syn::Ident,
    xb_bind_path: &syn::Path,
) -> TokenStream {
    let Some(span) = attrs.auto_register else {
        return crate::utils::empty();
    };
    // Invalid for generic types.
    if is_generic {
        return syn::Error::new(span, "`auto_register` is not supported on generic types")
            .into_compile_error();
    }
    let auto_register_ = crate::path::auto_register_(xb_bind_path);
    quote::quote_spanned! { span =>
        #auto_register_::inventory::submit! {
            #auto_register_::__AutoRegisterFunc(
                #auto_register_::__register::<#ident>
            )
        }
    }
}

#[cfg(not(feature = "auto_register"))]
fn get_auto_register_impl(
    _: &TypeAttributes,
    _: bool,
    _: &syn::Ident,
    _: &syn::Path,
) -> TokenStream {
    crate::utils::empty()
}
