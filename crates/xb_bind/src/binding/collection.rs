use xb_node::Element;

use crate::binding::{NodeRef, ValueBinding, group_contents};
use crate::convert::convert;
use crate::info::{Accessor, Bean};
use crate::value::Value;
use crate::BindError;

/// A list without a declared tag.
///
/// By default the items are wrapped in an element named after the field.
/// A `flat` collection writes its items straight into the host and takes
/// every child carrying the item label.
#[derive(Debug)]
pub struct CollectionBinding {
    accessor: &'static Accessor,
    value: ValueBinding,
    flat: bool,
}

impl CollectionBinding {
    pub fn new(accessor: &'static Accessor) -> Self {
        Self {
            accessor,
            value: ValueBinding::new(accessor.value_type(), accessor.annotations()),
            flat: accessor.annotations().is_flat(),
        }
    }

    #[inline]
    pub fn accessor(&self) -> &'static Accessor {
        self.accessor
    }

    /// Label of the wrapper element; `None` for flat collections.
    #[inline]
    pub fn wrapper(&self) -> Option<&'static str> {
        (!self.flat).then_some(self.accessor.name())
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
        let contents = self.value.serialize(&value)?;
        match self.wrapper() {
            Some(name) => {
                let mut wrapper = Element::new(name);
                wrapper.extend(contents);
                context.push(wrapper);
            }
            None => context.extend(contents),
        }
        Ok(())
    }

    pub fn deserialize(&self, host: &mut dyn Bean, candidates: &[NodeRef<'_>]) -> Result<(), BindError> {
        let existing = self.accessor.read_existing(host);
        let value = if self.flat {
            self.value.deserialize(existing, candidates)?
        } else {
            let contents = group_contents(candidates, self.accessor.annotations().text_if_empty())?;
            self.value.deserialize(existing, &contents)?
        };
        let value = convert(value, self.accessor.value_type())?;
        self.accessor.write(host, value)
    }

    pub fn is_bound_to(&self, node: &NodeRef<'_>) -> bool {
        let NodeRef::Element(element) = node else {
            return false;
        };
        match self.wrapper() {
            Some(name) => element.name() == name,
            None => self.value.item_label().is_none_or(|label| element.name() == label),
        }
    }
}
