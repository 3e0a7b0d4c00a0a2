//! Paths into `xb_bind` used by the generated code.
//!
//! Kept in one place so generated code follows `xb_bind` when items move.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the path to the `xb_bind` crate as seen from the caller.
///
/// 1. Crates depending on `xb_bind` get `::xb_bind`.
/// 2. Crates depending on `xb_core` get `::xb_core::bind`.
/// 3. Otherwise `::xb_bind`, which `xb_bind` itself supports through
///    `extern crate self as xb_bind`.
///
/// Reading the manifest is not cheap, so the result is passed around
/// instead of being looked up again.
pub(crate) fn xb_bind() -> syn::Path {
    xb_macro_utils::Manifest::crate_path("xb_bind")
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn accessor_(xb_bind_path: &syn::Path) -> TokenStream {
    quote! { #xb_bind_path::info::Accessor }
}

#[inline(always)]
pub(crate) fn annotations_(xb_bind_path: &syn::Path) -> TokenStream {
    quote! { #xb_bind_path::info::Annotations }
}

#[inline(always)]
pub(crate) fn bean_(xb_bind_path: &syn::Path) -> TokenStream {
    quote! { #xb_bind_path::info::Bean }
}

#[inline(always)]
pub(crate) fn typed_bean_(xb_bind_path: &syn::Path) -> TokenStream {
    quote! { #xb_bind_path::info::TypedBean }
}

#[inline(always)]
pub(crate) fn bean_info_(xb_bind_path: &syn::Path) -> TokenStream {
    quote! { #xb_bind_path::info::BeanInfo }
}

#[inline(always)]
pub(crate) fn bean_info_cell_(xb_bind_path: &syn::Path) -> TokenStream {
    quote! { #xb_bind_path::info::BeanInfoCell }
}

#[inline(always)]
pub(crate) fn generic_bean_info_cell_(xb_bind_path: &syn::Path) -> TokenStream {
    quote! { #xb_bind_path::info::GenericBeanInfoCell }
}

#[inline(always)]
pub(crate) fn value_(xb_bind_path: &syn::Path) -> TokenStream {
    quote! { #xb_bind_path::value::Value }
}

#[inline(always)]
pub(crate) fn value_type_(xb_bind_path: &syn::Path) -> TokenStream {
    quote! { #xb_bind_path::value::ValueType }
}

#[inline(always)]
pub(crate) fn scalar_type_(xb_bind_path: &syn::Path) -> TokenStream {
    quote! { #xb_bind_path::value::ScalarType }
}

#[inline(always)]
pub(crate) fn xml_value_(xb_bind_path: &syn::Path) -> TokenStream {
    quote! { #xb_bind_path::value::XmlValue }
}

#[inline(always)]
pub(crate) fn bind_error_(xb_bind_path: &syn::Path) -> TokenStream {
    quote! { #xb_bind_path::BindError }
}

#[inline(always)]
pub(crate) fn box_(xb_bind_path: &syn::Path) -> TokenStream {
    quote! { #xb_bind_path::__macro_exports::Box }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(xb_bind_path: &syn::Path) -> TokenStream {
    quote! { #xb_bind_path::__macro_exports::auto_register }
}
