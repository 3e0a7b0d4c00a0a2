//! Field bindings: how one accessor maps onto a tree.
//!
//! ## Menu
//!
//! - [`Binding`]: the closed set of field bindings, dispatched by `match`.
//!   - [`AttributeBinding`]: a scalar as an attribute of the host element.
//!   - [`TextBinding`]: a scalar as the text content of the host element.
//!   - [`TagBinding`]: a value wrapped in a child element with a declared label.
//!   - [`RawBinding`]: `Element` values copied from and to matching children.
//!   - [`CollectionBinding`]: a list wrapped in an element named after the field.
//! - [`ValueBinding`]: how a value is laid out inside a wrapper element.
//! - [`NodeRef`]: a borrowed candidate node (attribute, element or text).
//! - [`TypeBindings`]: the resolved bindings of one bean type.
//!
//! Every binding upholds the same contract: whatever `serialize` writes into a
//! host element is matched by `is_bound_to`, and `deserialize` rebuilds the
//! value from those nodes with a single coercion pass.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use xb_node::{Attribute, Content, Element};

use crate::BindError;
use crate::info::{Accessor, Bean, BeanInfo};

// -----------------------------------------------------------------------------
// Modules

mod attribute;
mod collection;
mod group;
mod raw;
mod resolve;
mod tag;
mod text;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use attribute::AttributeBinding;
pub use collection::CollectionBinding;
pub use raw::RawBinding;
pub use resolve::resolve;
pub use tag::TagBinding;
pub use text::TextBinding;
pub use value::ValueBinding;

pub(crate) use group::group_contents;

// -----------------------------------------------------------------------------
// NodeRef

/// A borrowed node of a tree, as offered to a binding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Attribute(&'a Attribute),
    Element(&'a Element),
    Text(&'a str),
}

impl<'a> NodeRef<'a> {
    /// Borrows a child content.
    #[inline]
    pub fn from_content(content: &'a Content) -> Self {
        match content {
            Content::Element(e) => Self::Element(e),
            Content::Text(t) => Self::Text(t),
        }
    }

    #[inline]
    pub fn as_element(&self) -> Option<&'a Element> {
        match *self {
            Self::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Returns `true` for text nodes holding only whitespace.
    #[inline]
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Self::Text(t) if t.trim().is_empty())
    }

    /// Short description used in error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Attribute(a) => alloc::format!("attribute `{}`", a.name()),
            Self::Element(e) => alloc::format!("element <{}>", e.name()),
            Self::Text(_) => String::from("text"),
        }
    }
}

/// Borrows every child of `element`.
#[inline]
pub(crate) fn children_of(element: &Element) -> Vec<NodeRef<'_>> {
    element.children().iter().map(NodeRef::from_content).collect()
}

// -----------------------------------------------------------------------------
// Binding

/// The binding of one field.
///
/// Built by [`resolve`] and cached per type by the
/// [`BindingRegistry`](crate::registry::BindingRegistry).
#[derive(Debug)]
pub enum Binding {
    Attribute(AttributeBinding),
    Text(TextBinding),
    Tag(TagBinding),
    Raw(RawBinding),
    Collection(CollectionBinding),
}

impl Binding {
    /// The accessor this binding reads and writes through.
    pub fn accessor(&self) -> &'static Accessor {
        match self {
            Self::Attribute(b) => b.accessor(),
            Self::Text(b) => b.accessor(),
            Self::Tag(b) => b.accessor(),
            Self::Raw(b) => b.accessor(),
            Self::Collection(b) => b.accessor(),
        }
    }

    /// Writes the field of `host` into `context`. Absent values write nothing.
    pub fn serialize(&self, host: &dyn Bean, context: &mut Element) -> Result<(), BindError> {
        match self {
            Self::Attribute(b) => b.serialize(host, context),
            Self::Text(b) => b.serialize(host, context),
            Self::Tag(b) => b.serialize(host, context),
            Self::Raw(b) => b.serialize(host, context),
            Self::Collection(b) => b.serialize(host, context),
        }
    }

    /// Rebuilds the field of `host` from the nodes accepted by [`is_bound_to`](Self::is_bound_to).
    pub fn deserialize(&self, host: &mut dyn Bean, candidates: &[NodeRef<'_>]) -> Result<(), BindError> {
        match self {
            Self::Attribute(b) => b.deserialize(host, candidates),
            Self::Text(b) => b.deserialize(host, candidates),
            Self::Tag(b) => b.deserialize(host, candidates),
            Self::Raw(b) => b.deserialize(host, candidates),
            Self::Collection(b) => b.deserialize(host, candidates),
        }
    }

    /// Returns `true` if `node` belongs to this field.
    pub fn is_bound_to(&self, node: &NodeRef<'_>) -> bool {
        match self {
            Self::Attribute(b) => b.is_bound_to(node),
            Self::Text(b) => b.is_bound_to(node),
            Self::Tag(b) => b.is_bound_to(node),
            Self::Raw(b) => b.is_bound_to(node),
            Self::Collection(b) => b.is_bound_to(node),
        }
    }

    /// Returns `true` if the binding must run even without candidates.
    ///
    /// Only a single, non-optional raw node is required; every other field
    /// keeps its current value when nothing in the tree matches it.
    pub fn is_required(&self) -> bool {
        match self {
            Self::Raw(b) => b.is_required(),
            _ => false,
        }
    }
}

// -----------------------------------------------------------------------------
// TypeBindings

/// The bindings of every field of one bean type, in declaration order.
pub struct TypeBindings {
    info: &'static BeanInfo,
    bindings: Box<[Binding]>,
}

impl TypeBindings {
    /// Resolves a binding for each accessor of `info`.
    pub fn resolve(info: &'static BeanInfo) -> Result<Self, BindError> {
        let bindings = info
            .accessors()
            .iter()
            .map(|accessor| resolve(info, accessor))
            .collect::<Result<Box<[_]>, _>>()?;
        Ok(Self { info, bindings })
    }

    #[inline]
    pub fn info(&self) -> &'static BeanInfo {
        self.info
    }

    #[inline]
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Binding of the field at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Binding> {
        self.bindings.get(index)
    }

    /// Binding of the field named `name`.
    pub fn by_name(&self, name: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.accessor().name() == name)
    }
}

impl fmt::Debug for TypeBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeBindings")
            .field("type", &self.info.type_path())
            .field("bindings", &self.bindings)
            .finish()
    }
}
