use alloc::string::String;

use xb_node::{Content, Element};

use crate::binding::NodeRef;
use crate::convert::convert;
use crate::info::{Accessor, Bean};
use crate::value::Value;
use crate::BindError;

/// A scalar written as the text content of the host element.
#[derive(Debug)]
pub struct TextBinding {
    accessor: &'static Accessor,
}

impl TextBinding {
    #[inline]
    pub fn new(accessor: &'static Accessor) -> Self {
        Self { accessor }
    }

    #[inline]
    pub fn accessor(&self) -> &'static Accessor {
        self.accessor
    }

    pub fn serialize(&self, host: &dyn Bean, context: &mut Element) -> Result<(), BindError> {
        let Some(value) = self.accessor.read(host)? else {
            return Ok(());
        };
        let text = value.to_text().ok_or_else(|| {
            BindError::shape_mismatch(alloc::format!("text cannot hold {}", value.describe()))
        })?;
        // An empty run still marks `Some("")` of an optional field.
        if !text.is_empty() || self.accessor.value_type().is_option() {
            context.push(Content::Text(text));
        }
        Ok(())
    }

    pub fn deserialize(&self, host: &mut dyn Bean, candidates: &[NodeRef<'_>]) -> Result<(), BindError> {
        let mut text = String::new();
        for node in candidates {
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
        let value = convert(Value::Str(text), self.accessor.value_type())?;
        self.accessor.write(host, value)
    }

    #[inline]
    pub fn is_bound_to(&self, node: &NodeRef<'_>) -> bool {
        matches!(node, NodeRef::Text(_))
    }
}
