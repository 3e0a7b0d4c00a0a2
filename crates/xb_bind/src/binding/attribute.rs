use alloc::string::ToString;

use xb_node::Element;

use crate::binding::NodeRef;
use crate::convert::convert;
use crate::info::{Accessor, Bean};
use crate::value::Value;
use crate::BindError;

/// A scalar written as `name="value"` on the host element.
///
/// The attribute is named after the field unless renamed with `attribute`.
#[derive(Debug)]
pub struct AttributeBinding {
    accessor: &'static Accessor,
    name: &'static str,
}

impl AttributeBinding {
    pub fn new(accessor: &'static Accessor) -> Self {
        let name = accessor.annotations().attribute().unwrap_or(accessor.name());
        Self { accessor, name }
    }

    #[inline]
    pub fn accessor(&self) -> &'static Accessor {
        self.accessor
    }

    /// Name of the attribute.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn serialize(&self, host: &dyn Bean, context: &mut Element) -> Result<(), BindError> {
        let Some(value) = self.accessor.read(host)? else {
            return Ok(());
        };
        let text = value.to_text().ok_or_else(|| {
            BindError::shape_mismatch(alloc::format!(
                "attribute `{}` cannot hold {}",
                self.name,
                value.describe()
            ))
        })?;
        context.set_attribute(self.name, text);
        Ok(())
    }

    pub fn deserialize(&self, host: &mut dyn Bean, candidates: &[NodeRef<'_>]) -> Result<(), BindError> {
        let [NodeRef::Attribute(attribute)] = candidates else {
            return Err(BindError::shape_mismatch(alloc::format!(
                "expected exactly one attribute `{}`, found {} candidates",
                self.name,
                candidates.len()
            )));
        };
        let value = convert(Value::Str(attribute.value().to_string()), self.accessor.value_type())?;
        self.accessor.write(host, value)
    }

    #[inline]
    pub fn is_bound_to(&self, node: &NodeRef<'_>) -> bool {
        matches!(node, NodeRef::Attribute(a) if a.name() == self.name)
    }
}
