use crate::binding::{
    AttributeBinding, Binding, CollectionBinding, RawBinding, TagBinding, TextBinding,
};
use crate::info::{Accessor, BeanInfo};
use crate::value::ValueType;
use crate::BindError;

/// Picks the binding of `accessor`, a field of `info`.
///
/// In order of priority:
///
/// 1. `raw`, or an `Element` value type: [`RawBinding`], labeled by `tag`.
/// 2. an explicit `tag`: [`TagBinding`].
/// 3. a list value type: [`CollectionBinding`].
/// 4. a scalar with `text`: [`TextBinding`].
/// 5. any other scalar: [`AttributeBinding`].
///
/// A raw, nested bean or node field without a tag name fails with
/// `AnnotationMissing`. Lists of optional items fail with `ShapeMismatch`.
pub fn resolve(info: &'static BeanInfo, accessor: &'static Accessor) -> Result<Binding, BindError> {
    let annotations = accessor.annotations();
    let ty = accessor.value_type();
    let missing = || BindError::annotation_missing(info.type_name(), accessor.name());

    if has_optional_items(ty) {
        return Err(BindError::shape_mismatch(alloc::format!(
            "list field `{}` cannot hold optional items, found `{ty}`",
            accessor.name()
        )));
    }

    if annotations.is_raw() || ty.is_node_like() {
        if !ty.is_node_like() {
            return Err(BindError::shape_mismatch(alloc::format!(
                "raw field `{}` must hold `Element` values, found `{ty}`",
                accessor.name()
            )));
        }
        let tag = annotations.tag().filter(|t| !t.is_empty()).ok_or_else(missing)?;
        return Ok(Binding::Raw(RawBinding::new(accessor, tag)));
    }

    if let Some(tag) = annotations.tag() {
        if tag.is_empty() {
            return Err(missing());
        }
        return Ok(Binding::Tag(TagBinding::new(accessor, tag)));
    }

    match ty.unwrap_option() {
        ValueType::List(_) => Ok(Binding::Collection(CollectionBinding::new(accessor))),
        ValueType::Scalar(_) if annotations.is_text() => Ok(Binding::Text(TextBinding::new(accessor))),
        ValueType::Scalar(_) => Ok(Binding::Attribute(AttributeBinding::new(accessor))),
        _ if annotations.is_text() => Err(BindError::shape_mismatch(alloc::format!(
            "text field `{}` must hold a scalar, found `{ty}`",
            accessor.name()
        ))),
        ValueType::Bean(_) | ValueType::Node | ValueType::Option(_) => Err(missing()),
    }
}

// A `None` list item has no representation in a tree.
fn has_optional_items(ty: &ValueType) -> bool {
    match ty {
        ValueType::Option(inner) => has_optional_items(inner),
        ValueType::List(item) => item.is_option() || has_optional_items(item),
        ValueType::Scalar(_) | ValueType::Node | ValueType::Bean(_) => false,
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::resolve;
    use crate::binding::Binding;
    use crate::info::{Accessor, Annotations, TypedBean};
    use crate::{BindErrorKind, XmlBind};
    use xb_node::Element;

    #[derive(XmlBind, Default, Clone)]
    struct Inner {
        v: u8,
    }

    #[derive(XmlBind, Default, Clone)]
    struct Host {
        plain: u32,
        #[xml(text)]
        body: String,
        #[xml(tag = "name")]
        name: String,
        items: Vec<String>,
        #[xml(tag = "raw")]
        raw: Element,
        #[xml(tag = "inner")]
        inner: Inner,
    }

    fn kind_of(name: &str) -> &'static str {
        let info = Host::type_info();
        let accessor = info.accessor(name).unwrap();
        match resolve(info, accessor).unwrap() {
            Binding::Attribute(_) => "attribute",
            Binding::Text(_) => "text",
            Binding::Tag(_) => "tag",
            Binding::Raw(_) => "raw",
            Binding::Collection(_) => "collection",
        }
    }

    #[test]
    fn priority_order() {
        assert_eq!(kind_of("plain"), "attribute");
        assert_eq!(kind_of("body"), "text");
        assert_eq!(kind_of("name"), "tag");
        assert_eq!(kind_of("items"), "collection");
        assert_eq!(kind_of("raw"), "raw");
        assert_eq!(kind_of("inner"), "tag");
    }

    #[test]
    fn bean_without_tag_is_missing_annotation() {
        #[derive(XmlBind, Default, Clone)]
        struct Bad {
            inner: Inner,
        }
        let info = Bad::type_info();
        let err = resolve(info, &info.accessors()[0]).unwrap_err();
        assert_eq!(
            *err.kind(),
            BindErrorKind::AnnotationMissing { type_name: "Bad", field: "inner" }
        );
    }

    #[test]
    fn raw_needs_tag_and_node_type() {
        #[derive(XmlBind, Default, Clone)]
        struct Bad {
            #[xml(raw)]
            node: Element,
            #[xml(raw, tag = "n")]
            number: u8,
        }
        let info = Bad::type_info();
        assert!(matches!(
            resolve(info, &info.accessors()[0]).unwrap_err().kind(),
            BindErrorKind::AnnotationMissing { .. }
        ));
        assert!(matches!(
            resolve(info, &info.accessors()[1]).unwrap_err().kind(),
            BindErrorKind::ShapeMismatch(_)
        ));
    }

    #[test]
    fn empty_tag_is_missing_annotation() {
        static ACCESSOR: Accessor =
            Accessor::new::<String>("name").with_annotations(Annotations::new().with_tag(""));
        let err = resolve(Host::type_info(), &ACCESSOR).unwrap_err();
        assert!(matches!(err.kind(), BindErrorKind::AnnotationMissing { .. }));
    }

    #[test]
    fn optional_list_items_are_rejected() {
        #[derive(XmlBind, Default, Clone)]
        struct Bad {
            #[xml(tag = "list")]
            items: Vec<Option<String>>,
            nested: Option<Vec<Vec<Option<u8>>>>,
            fine: Option<Vec<u8>>,
        }
        let info = Bad::type_info();
        for accessor in &info.accessors()[..2] {
            assert!(matches!(
                resolve(info, accessor).unwrap_err().kind(),
                BindErrorKind::ShapeMismatch(_)
            ));
        }
        assert!(matches!(resolve(info, &info.accessors()[2]), Ok(Binding::Collection(_))));
    }
}
