use alloc::vec::Vec;

use xb_node::Element;

use crate::binding::NodeRef;
use crate::info::{Accessor, Bean, BeanInfo, TypedBean};
use crate::registry::BindingRegistry;
use crate::BindError;

/// Converts whole beans to and from trees.
///
/// - Serialization creates an element labeled by the bean root and applies
///   every field binding in declaration order: attributes land on the root,
///   child elements follow declaration order.
/// - Deserialization hands each binding the attributes and children it is
///   bound to. Fields with nothing to read keep their current value, so
///   [`deserialize_into`](Self::deserialize_into) merges a tree into an
///   existing bean.
///
/// Bindings are resolved once per type through [`BindingRegistry::global`].
///
/// # Examples
///
/// ```
/// use xb_bind::{XmlBind, XmlSerializer};
/// use xb_node::Element;
///
/// #[derive(XmlBind, Default, Clone, Debug, PartialEq)]
/// #[xml(root = "window")]
/// struct Window {
///     width: u32,
///     height: u32,
///     #[xml(tag = "title")]
///     title: String,
/// }
///
/// let mut window = Window { width: 800, height: 600, title: "main".into() };
/// let tree = XmlSerializer::serialize(&window).unwrap();
/// assert_eq!(tree.to_string(), r#"<window width="800" height="600"><title>main</title></window>"#);
///
/// // Partial merge: only `width` changes.
/// let patch = Element::new("window").with_attribute("width", "1024");
/// XmlSerializer::deserialize_into(&mut window, &patch).unwrap();
/// assert_eq!(window, Window { width: 1024, height: 600, title: "main".into() });
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlSerializer;

impl XmlSerializer {
    /// Serializes `value` into a new element.
    #[inline]
    pub fn serialize<T: TypedBean>(value: &T) -> Result<Element, BindError> {
        Self::serialize_bean(value)
    }

    /// Serializes a bean of any type into a new element.
    pub fn serialize_bean(bean: &dyn Bean) -> Result<Element, BindError> {
        let info = bean.bean_info();
        let bindings = BindingRegistry::global().bindings(info)?;

        let mut root = Element::new(info.root());
        for binding in bindings.bindings() {
            let accessor = binding.accessor();
            if accessor.annotations().is_write_only() {
                continue;
            }
            log::trace!("serialize `{}.{}`", info.type_name(), accessor.name());
            binding
                .serialize(bean, &mut root)
                .map_err(|err| in_field(err, info, accessor))?;
        }
        Ok(root)
    }

    /// Builds a default `T` and fills it from `element`.
    #[inline]
    pub fn deserialize<T: TypedBean>(element: &Element) -> Result<T, BindError> {
        let mut value = T::default();
        Self::deserialize_into(&mut value, element)?;
        Ok(value)
    }

    /// Fills `value` from `element`, keeping the fields `element` says nothing about.
    #[inline]
    pub fn deserialize_into<T: TypedBean>(value: &mut T, element: &Element) -> Result<(), BindError> {
        Self::deserialize_bean_into(value, element)
    }

    /// Fills a bean of any type from `element`.
    ///
    /// On error, fields handled before the failing one keep their new value.
    pub fn deserialize_bean_into(bean: &mut dyn Bean, element: &Element) -> Result<(), BindError> {
        let info = bean.bean_info();
        let bindings = BindingRegistry::global().bindings(info)?;

        // Blank text around child elements is layout, not content.
        let mixed = element.elements().next().is_some();
        let nodes: Vec<NodeRef<'_>> = element
            .attributes()
            .iter()
            .map(NodeRef::Attribute)
            .chain(element.children().iter().map(NodeRef::from_content))
            .filter(|node| !(mixed && node.is_blank_text()))
            .collect();

        for binding in bindings.bindings() {
            let candidates: Vec<NodeRef<'_>> = nodes
                .iter()
                .filter(|node| binding.is_bound_to(node))
                .copied()
                .collect();
            if candidates.is_empty() && !binding.is_required() {
                continue;
            }
            let accessor = binding.accessor();
            log::trace!(
                "deserialize `{}.{}` from {} node(s)",
                info.type_name(),
                accessor.name(),
                candidates.len()
            );
            binding
                .deserialize(bean, &candidates)
                .map_err(|err| in_field(err, info, accessor))?;
        }
        Ok(())
    }
}

// Only records the path in debug builds with the `debug` feature.
#[inline]
fn in_field(err: BindError, info: &BeanInfo, accessor: &Accessor) -> BindError {
    #[cfg(all(debug_assertions, feature = "debug"))]
    {
        err.in_field(info.type_name(), accessor.name())
    }
    #[cfg(not(all(debug_assertions, feature = "debug")))]
    {
        let _ = (info, accessor);
        err
    }
}
