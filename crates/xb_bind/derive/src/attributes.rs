//! Parsing of `#[xml(...)]` attributes.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Attribute, LitStr};

use crate::XML_ATTRIBUTE_NAME;

fn xml_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|a| a.path().is_ident(XML_ATTRIBUTE_NAME))
}

fn set_once<T>(slot: &mut Option<T>, value: T, meta: &syn::meta::ParseNestedMeta) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("duplicate xml attribute"));
    }
    *slot = Some(value);
    Ok(())
}

// -----------------------------------------------------------------------------
// Type attributes

/// Type level: `#[xml(root = "...", auto_register)]`.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub root: Option<LitStr>,
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in xml_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("root") {
                    let lit: LitStr = meta.value()?.parse()?;
                    if lit.value().is_empty() {
                        return Err(syn::Error::new(lit.span(), "root label cannot be empty"));
                    }
                    set_once(&mut this.root, lit, &meta)
                } else if meta.path.is_ident("auto_register") {
                    set_once(&mut this.auto_register, meta.path.require_ident()?.span(), &meta)
                } else {
                    Err(meta.error("expected `root` or `auto_register`"))
                }
            })?;
        }
        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// Field attributes

/// Field level binding annotations.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub tag: Option<LitStr>,
    pub text_if_empty: Option<LitStr>,
    pub element: Option<LitStr>,
    pub attribute: Option<LitStr>,
    pub text: Option<Span>,
    pub raw: Option<Span>,
    pub flat: Option<Span>,
    pub write_only: Option<Span>,
    pub skip: Option<Span>,
}

impl FieldAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in xml_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                let path = &meta.path;
                if path.is_ident("tag") {
                    set_once(&mut this.tag, meta.value()?.parse()?, &meta)
                } else if path.is_ident("text_if_empty") {
                    set_once(&mut this.text_if_empty, meta.value()?.parse()?, &meta)
                } else if path.is_ident("element") {
                    set_once(&mut this.element, meta.value()?.parse()?, &meta)
                } else if path.is_ident("attribute") {
                    set_once(&mut this.attribute, meta.value()?.parse()?, &meta)
                } else if path.is_ident("text") {
                    set_once(&mut this.text, path.require_ident()?.span(), &meta)
                } else if path.is_ident("raw") {
                    set_once(&mut this.raw, path.require_ident()?.span(), &meta)
                } else if path.is_ident("flat") {
                    set_once(&mut this.flat, path.require_ident()?.span(), &meta)
                } else if path.is_ident("write_only") {
                    set_once(&mut this.write_only, path.require_ident()?.span(), &meta)
                } else if path.is_ident("skip") {
                    set_once(&mut this.skip, path.require_ident()?.span(), &meta)
                } else {
                    Err(meta.error(
                        "expected one of `tag`, `text_if_empty`, `element`, `attribute`, \
                         `text`, `raw`, `flat`, `write_only`, `skip`",
                    ))
                }
            })?;
        }

        if let (Some(skip), true) = (this.skip, this.has_binding_annotations()) {
            return Err(syn::Error::new(skip, "`skip` cannot be combined with binding annotations"));
        }
        if let (Some(text), Some(_)) = (this.text, &this.tag) {
            return Err(syn::Error::new(text, "`text` and `tag` are mutually exclusive"));
        }
        Ok(this)
    }

    fn has_binding_annotations(&self) -> bool {
        self.tag.is_some()
            || self.text_if_empty.is_some()
            || self.element.is_some()
            || self.attribute.is_some()
            || self.text.is_some()
            || self.raw.is_some()
            || self.flat.is_some()
            || self.write_only.is_some()
    }

    /// Generates the `Annotations` builder chain.
    ///
    /// ```ignore
    /// _path_::Annotations::new().with_tag("list").text()
    /// ```
    pub fn to_tokens(&self, annotations_: &TokenStream) -> TokenStream {
        let mut tokens = quote! { #annotations_::new() };
        let lits = [
            (&self.tag, quote!(with_tag)),
            (&self.text_if_empty, quote!(with_text_if_empty)),
            (&self.element, quote!(with_element)),
            (&self.attribute, quote!(with_attribute)),
        ];
        for (lit, method) in lits {
            if let Some(lit) = lit {
                tokens.extend(quote! { .#method(#lit) });
            }
        }
        let flags = [
            (self.text, quote!(text)),
            (self.raw, quote!(raw)),
            (self.flat, quote!(flat)),
            (self.write_only, quote!(write_only)),
        ];
        for (flag, method) in flags {
            if flag.is_some() {
                tokens.extend(quote! { .#method() });
            }
        }
        tokens
    }
}

// -----------------------------------------------------------------------------
// Variant attributes

/// Variant level: `#[xml(rename = "...")]`.
#[derive(Default)]
pub(crate) struct VariantAttributes {
    pub rename: Option<LitStr>,
}

impl VariantAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in xml_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    set_once(&mut this.rename, meta.value()?.parse()?, &meta)
                } else {
                    Err(meta.error("expected `rename`"))
                }
            })?;
        }
        Ok(this)
    }
}
