use xb_node::Element;

use crate::binding::{NodeRef, ValueBinding, group_contents};
use crate::convert::convert;
use crate::info::{Accessor, Bean};
use crate::value::Value;
use crate::BindError;

/// A value wrapped in a child element labeled by the declared tag.
///
/// ```text
/// <host>
///     <tag>…value content…</tag>
/// </host>
/// ```
#[derive(Debug)]
pub struct TagBinding {
    accessor: &'static Accessor,
    tag: &'static str,
    value: ValueBinding,
}

impl TagBinding {
    pub fn new(accessor: &'static Accessor, tag: &'static str) -> Self {
        Self {
            accessor,
            tag,
            value: ValueBinding::new(accessor.value_type(), accessor.annotations()),
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
    pub fn value(&self) -> &ValueBinding {
        &self.value
    }

    pub fn serialize(&self, host: &dyn Bean, context: &mut Element) -> Result<(), BindError> {
        let Some(value) = self.accessor.read(host)? else {
            return Ok(());
        };
        if matches!(&value, Value::List(items) if items.is_empty()) {
            return Ok(());
        }
        let mut wrapper = Element::new(self.tag);
        wrapper.extend(self.value.serialize(&value)?);
        context.push(wrapper);
        Ok(())
    }

    pub fn deserialize(&self, host: &mut dyn Bean, candidates: &[NodeRef<'_>]) -> Result<(), BindError> {
        let contents = group_contents(candidates, self.accessor.annotations().text_if_empty())?;
        let existing = self.accessor.read_existing(host);
        let value = self.value.deserialize(existing, &contents)?;
        let value = convert(value, self.accessor.value_type())?;
        self.accessor.write(host, value)
    }

    #[inline]
    pub fn is_bound_to(&self, node: &NodeRef<'_>) -> bool {
        matches!(node, NodeRef::Element(e) if e.name() == self.tag)
    }
}
