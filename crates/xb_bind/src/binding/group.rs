use alloc::vec::Vec;

use crate::BindError;
use crate::binding::{NodeRef, children_of};

/// Collects the content of the wrapper elements bound to a tag or collection.
///
/// - one wrapper: its children;
/// - several wrappers: they must share one label, and their children are
///   concatenated in encounter order;
/// - no content at all: a single text node holding `text_if_empty`.
///
/// Candidates that are not elements are a shape mismatch.
pub(crate) fn group_contents<'a>(
    candidates: &[NodeRef<'a>],
    text_if_empty: &'static str,
) -> Result<Vec<NodeRef<'a>>, BindError> {
    let mut wrappers = Vec::with_capacity(candidates.len());
    for node in candidates {
        match node.as_element() {
            Some(element) => wrappers.push(element),
            None => {
                return Err(BindError::shape_mismatch(alloc::format!(
                    "expected a wrapper element, found {}",
                    node.describe()
                )));
            }
        }
    }

    let Some((first, rest)) = wrappers.split_first() else {
        return Err(BindError::shape_mismatch("no wrapper element to read from"));
    };

    let mut contents = children_of(first);
    for other in rest {
        if other.name() != first.name() {
            return Err(BindError::shape_mismatch(alloc::format!(
                "cannot group <{}> with <{}>",
                other.name(),
                first.name()
            )));
        }
        contents.extend(children_of(other));
    }

    if contents.is_empty() {
        contents.push(NodeRef::Text(text_if_empty));
    }
    Ok(contents)
}

// -----------------------------------------------------------------------------
// Tests
