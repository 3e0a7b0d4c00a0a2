use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use xb_node::{Content, Element};

use crate::binding::{NodeRef, children_of};
use crate::info::{Annotations, BeanInfo};
use crate::value::{ScalarType, Value, ValueType};
use crate::{BindError, XmlSerializer};

/// Label of list elements holding scalars or nested lists.
pub const DEFAULT_ELEMENT: &str = "item";

/// How a value is laid out as the content of an element.
///
/// - `Primitive`: text.
/// - `Node`: a copy of the held element.
/// - `Bean`: one element labeled by the bean root, filled through the facade.
/// - `List`: one element per item. Beans and nodes are written as they are;
///   other items are wrapped in an element labeled `element` (default `item`).
#[derive(Debug, Clone)]
pub enum ValueBinding {
    Primitive(ScalarType),
    Node,
    Bean(fn() -> &'static BeanInfo),
    List {
        element: Option<&'static str>,
        item: Box<ValueBinding>,
    },
}

impl ValueBinding {
    /// Builds the value binding of a declared type.
    pub fn new(ty: &ValueType, annotations: &Annotations) -> Self {
        match ty {
            ValueType::Option(inner) => Self::new(inner, annotations),
            ValueType::Scalar(scalar) => Self::Primitive(*scalar),
            ValueType::Node => Self::Node,
            ValueType::Bean(info) => Self::Bean(*info),
            ValueType::List(elem) => Self::List {
                element: annotations.element(),
                item: Box::new(Self::new(elem, &Annotations::new())),
            },
        }
    }

    /// Label of the elements holding list items; `None` accepts any label.
    ///
    /// Always `None` for non-list bindings.
    pub fn item_label(&self) -> Option<&'static str> {
        match self {
            Self::List { element, item } => match **item {
                Self::Bean(info) => Some(info().root()),
                Self::Node => None,
                _ => Some(element.unwrap_or(DEFAULT_ELEMENT)),
            },
            _ => None,
        }
    }

    /// Writes `value` as a sequence of contents.
    pub fn serialize(&self, value: &Value) -> Result<Vec<Content>, BindError> {
        match (self, value) {
            (Self::Primitive(_), value) => match value.to_text() {
                Some(text) if text.is_empty() => Ok(Vec::new()),
                Some(text) => Ok(alloc::vec![Content::Text(text)]),
                None => Err(BindError::shape_mismatch(alloc::format!(
                    "expected a scalar, found {}",
                    value.describe()
                ))),
            },
            (Self::Node, Value::Node(node)) => Ok(alloc::vec![Content::Element(node.clone())]),
            (Self::Bean(_), Value::Object(bean)) => {
                let element = XmlSerializer::serialize_bean(&**bean)?;
                Ok(alloc::vec![Content::Element(element)])
            }
            (Self::List { element, item }, Value::List(items)) => {
                let label = element.unwrap_or(DEFAULT_ELEMENT);
                items
                    .iter()
                    .map(|value| Self::serialize_item(item, label, value))
                    .collect()
            }
            (_, value) => Err(BindError::shape_mismatch(alloc::format!(
                "cannot write {} as {}",
                value.describe(),
                self.describe()
            ))),
        }
    }

    fn serialize_item(item: &Self, label: &'static str, value: &Value) -> Result<Content, BindError> {
        match item {
            Self::Bean(_) | Self::Node => item
                .serialize(value)?
                .into_iter()
                .next()
                .ok_or_else(|| BindError::shape_mismatch("list item produced no element")),
            _ => {
                let mut wrapper = Element::new(label);
                wrapper.extend(item.serialize(value)?);
                Ok(Content::Element(wrapper))
            }
        }
    }

    /// Rebuilds a value from `nodes`, merging into `existing`: beans of the
    /// same type are filled in place and lists get the new items appended.
    ///
    /// The result still needs to be converted to the declared type.
    pub fn deserialize(&self, existing: Option<Value>, nodes: &[NodeRef<'_>]) -> Result<Value, BindError> {
        match self {
            Self::Primitive(_) => {
                let mut text = String::new();
                for node in nodes {
                    match node {
                        NodeRef::Text(t) => text.push_str(t),
                        other => {
                            return Err(BindError::shape_mismatch(alloc::format!(
                                "expected text, found {}",
                                other.describe()
                            )));
                        }
                    }
                }
                Ok(Value::Str(text))
            }
            Self::Node => match elements_of(nodes)?.as_slice() {
                [element] => Ok(Value::Node((*element).clone())),
                elements => Err(BindError::shape_mismatch(alloc::format!(
                    "expected one element, found {}",
                    elements.len()
                ))),
            },
            Self::Bean(info) => {
                let info = info();
                let existing = existing.and_then(|value| match value {
                    Value::Object(bean) if bean.bean_info().type_id() == info.type_id() => Some(bean),
                    _ => None,
                });
                match elements_of(nodes)?.as_slice() {
                    [] => Ok(Value::Object(existing.unwrap_or_else(|| info.create()))),
                    [element] => {
                        let mut bean = existing.unwrap_or_else(|| info.create());
                        XmlSerializer::deserialize_bean_into(&mut *bean, element)?;
                        Ok(Value::Object(bean))
                    }
                    elements => Err(BindError::shape_mismatch(alloc::format!(
                        "expected one <{}> element, found {}",
                        info.root(),
                        elements.len()
                    ))),
                }
            }
            Self::List { item, .. } => {
                // New items are appended to the current ones.
                let mut items = match existing {
                    Some(Value::List(items)) => items,
                    _ => Vec::new(),
                };

                // A lone text node, such as the `text_if_empty` substitute,
                // is one scalar item even when blank.
                if let [NodeRef::Text(text)] = nodes
                    && matches!(**item, Self::Primitive(_))
                {
                    items.push(Value::Str(text.to_string()));
                    return Ok(Value::List(items));
                }

                let label = self.item_label();
                for node in nodes {
                    match node {
                        NodeRef::Element(element) => {
                            if label.is_some_and(|label| element.name() != label) {
                                log::trace!("skip <{}> while reading a list", element.name());
                                continue;
                            }
                            items.push(item.deserialize_item(element)?);
                        }
                        NodeRef::Text(text) if text.trim().is_empty() => {}
                        NodeRef::Text(text) if matches!(**item, Self::Primitive(_)) => {
                            items.push(Value::Str(text.to_string()));
                        }
                        other => {
                            return Err(BindError::shape_mismatch(alloc::format!(
                                "expected list items, found {}",
                                other.describe()
                            )));
                        }
                    }
                }
                Ok(Value::List(items))
            }
        }
    }

    fn deserialize_item(&self, element: &Element) -> Result<Value, BindError> {
        match self {
            Self::Node => Ok(Value::Node(element.clone())),
            Self::Bean(_) => self.deserialize(None, &[NodeRef::Element(element)]),
            Self::Primitive(_) | Self::List { .. } => self.deserialize(None, &children_of(element)),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Primitive(scalar) => scalar.to_string(),
            Self::Node => String::from("Element"),
            Self::Bean(info) => info().type_name().to_string(),
            Self::List { item, .. } => alloc::format!("Vec<{}>", item.describe()),
        }
    }
}

// Elements among `nodes`, ignoring blank text.
fn elements_of<'a>(nodes: &[NodeRef<'a>]) -> Result<Vec<&'a Element>, BindError> {
    let mut elements = Vec::new();
    for node in nodes {
        match node {
            NodeRef::Element(element) => elements.push(*element),
            node if node.is_blank_text() => {}
            other => {
                return Err(BindError::shape_mismatch(alloc::format!(
                    "expected an element, found {}",
                    other.describe()
                )));
            }
        }
    }
    Ok(elements)
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::ValueBinding;
    use crate::binding::NodeRef;
    use crate::info::Annotations;
    use crate::value::{Value, XmlValue};
    use xb_node::{Content, Element};

    #[test]
    fn list_of_strings_uses_item_label() {
        let binding = ValueBinding::new(&<Vec<String> as XmlValue>::VALUE_TYPE, &Annotations::new());
        assert_eq!(binding.item_label(), Some("item"));

        let value = Value::List(vec![Value::Str("a".into()), Value::Str(String::new())]);
        let contents = binding.serialize(&value).unwrap();
        assert_eq!(
            contents,
            [
                Content::Element(Element::new("item").with_text("a")),
                Content::Element(Element::new("item")),
            ]
        );
    }

    #[test]
    fn list_reads_items_and_skips_blank_text() {
        let binding = ValueBinding::new(
            &<Vec<u32> as XmlValue>::VALUE_TYPE,
            &Annotations::new().with_element("n"),
        );
        let one = Element::new("n").with_text("1");
        let two = Element::new("n").with_text("2");
        let nodes = [
            NodeRef::Text("\n  "),
            NodeRef::Element(&one),
            NodeRef::Text("\n  "),
            NodeRef::Element(&two),
        ];
        let value = binding.deserialize(None, &nodes).unwrap();
        let Value::List(items) = value else { panic!("expected a list") };
        let texts: Vec<_> = items.iter().filter_map(Value::to_text).collect();
        assert_eq!(texts, ["1", "2"]);
    }

    #[test]
    fn list_appends_to_existing_items() {
        let binding = ValueBinding::new(&<Vec<String> as XmlValue>::VALUE_TYPE, &Annotations::new());
        let a = Element::new("item").with_text("a");
        let existing = Value::List(vec![Value::Str("x".into())]);
        let value = binding.deserialize(Some(existing), &[NodeRef::Element(&a)]).unwrap();
        let Value::List(items) = value else { panic!("expected a list") };
        let texts: Vec<_> = items.iter().filter_map(Value::to_text).collect();
        assert_eq!(texts, ["x", "a"]);
    }

    #[test]
    fn lone_text_is_one_item() {
        let binding = ValueBinding::new(&<Vec<String> as XmlValue>::VALUE_TYPE, &Annotations::new());
        let value = binding.deserialize(None, &[NodeRef::Text("")]).unwrap();
        assert!(matches!(value, Value::List(items) if items.len() == 1));

        let nodes = ValueBinding::new(&<Vec<xb_node::Element> as XmlValue>::VALUE_TYPE, &Annotations::new());
        let value = nodes.deserialize(None, &[NodeRef::Text("")]).unwrap();
        assert!(matches!(value, Value::List(items) if items.is_empty()));
    }

    #[test]
    fn primitive_rejects_elements() {
        let binding = ValueBinding::new(&<String as XmlValue>::VALUE_TYPE, &Annotations::new());
        let child = Element::new("x");
        assert!(binding.deserialize(None, &[NodeRef::Element(&child)]).is_err());
        let text = binding.deserialize(None, &[NodeRef::Text("a"), NodeRef::Text("b")]).unwrap();
        assert_eq!(text.to_text().as_deref(), Some("ab"));
    }

    #[test]
    fn node_requires_exactly_one_element() {
        let binding = ValueBinding::Node;
        let a = Element::new("a");
        assert!(binding.deserialize(None, &[]).is_err());
        assert!(binding.deserialize(None, &[NodeRef::Element(&a), NodeRef::Element(&a)]).is_err());
        assert!(matches!(
            binding.deserialize(None, &[NodeRef::Element(&a)]),
            Ok(Value::Node(node)) if node == a
        ));
    }
}
