use alloc::vec::Vec;

use xb_node::Element;

use crate::binding::NodeRef;
use crate::info::{Accessor, Bean};
use crate::value::{Value, ValueType};
use crate::BindError;

/// `Element` values copied from, and to, the children labeled by the tag.
///
/// A list field takes every matching child. A single field takes exactly one,
/// unless it is optional, in which case a missing child keeps the field as is.
#[derive(Debug)]
pub struct RawBinding {
    accessor: &'static Accessor,
    tag: &'static str,
    array: bool,
    optional: bool,
}

impl RawBinding {
    pub fn new(accessor: &'static Accessor, tag: &'static str) -> Self {
        let ty = accessor.value_type();
        Self {
            accessor,
            tag,
            array: ty.is_list(),
            optional: matches!(ty, ValueType::Option(_)),
        }
    }

    #[inline]
    pub fn accessor(&self) -> &'static Accessor {
        self.accessor
    }

    #[inline]
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        self.array
    }

    /// A single, non-optional node must be present in the input.
    #[inline]
    pub fn is_required(&self) -> bool {
        !self.array && !self.optional
    }

    fn copy(&self, node: &Element) -> Result<Element, BindError> {
        if node.name() != self.tag {
            return Err(BindError::shape_mismatch(alloc::format!(
                "raw field `{}` holds <{}>, expected <{}>",
                self.accessor.name(),
                node.name(),
                self.tag
            )));
        }
        Ok(node.clone())
    }

    pub fn serialize(&self, host: &dyn Bean, context: &mut Element) -> Result<(), BindError> {
        match self.accessor.read(host)? {
            None => {}
            Some(Value::Node(node)) => context.push(self.copy(&node)?),
            Some(Value::List(items)) => {
                for item in &items {
                    match item {
                        Value::Node(node) => context.push(self.copy(node)?),
                        other => return Err(self.not_a_node(other)),
                    }
                }
            }
            Some(other) => return Err(self.not_a_node(&other)),
        }
        Ok(())
    }

    pub fn deserialize(&self, host: &mut dyn Bean, candidates: &[NodeRef<'_>]) -> Result<(), BindError> {
        let nodes = candidates
            .iter()
            .filter_map(NodeRef::as_element)
            .collect::<Vec<_>>();

        let value = if self.array {
            Value::List(nodes.into_iter().map(|n| Value::Node(n.clone())).collect())
        } else {
            match nodes.as_slice() {
                [node] => Value::Node((*node).clone()),
                _ => {
                    return Err(BindError::shape_mismatch(alloc::format!(
                        "expected one <{}> element, found {}",
                        self.tag,
                        nodes.len()
                    )));
                }
            }
        };
        self.accessor.write(host, value)
    }

    #[inline]
    pub fn is_bound_to(&self, node: &NodeRef<'_>) -> bool {
        matches!(node, NodeRef::Element(e) if e.name() == self.tag)
    }

    #[cold]
    fn not_a_node(&self, value: &Value) -> BindError {
        BindError::shape_mismatch(alloc::format!(
            "raw field `{}` holds {}, expected elements",
            self.accessor.name(),
            value.describe()
        ))
    }
}
