use alloc::string::String;
use alloc::vec::Vec;

use thiserror::Error;
use xb_bind::BindError;

/// An error raised while creating or ordering extensions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExtensionError {
    /// No bean type is registered under the implementation name.
    #[error("unknown extension implementation `{0}`")]
    UnknownImplementation(String),

    /// The instance could not be filled from the extension element.
    #[error("cannot deserialize extension `{implementation}`")]
    Bind {
        implementation: String,
        #[source]
        source: BindError,
    },

    /// The instance exists but is not of the requested type.
    #[error("extension `{implementation}` is not a `{expected}`")]
    TypeMismatch {
        implementation: String,
        expected: &'static str,
    },

    /// An `order` attribute could not be parsed.
    #[error("invalid loading order `{0}`")]
    InvalidOrder(String),

    /// `before`/`after` constraints form a cycle among these items.
    #[error("loading order cycle among {}", .0.join(", "))]
    Cycle(Vec<String>),
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::ExtensionError;
    use alloc::string::ToString;
    use alloc::vec;
    use core::error::Error;
    use xb_bind::BindError;

    #[test]
    fn display() {
        let err = ExtensionError::Cycle(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "loading order cycle among a, b");

        let err = ExtensionError::Bind {
            implementation: "Foo".into(),
            source: BindError::shape_mismatch("two <raw> elements"),
        };
        assert_eq!(err.to_string(), "cannot deserialize extension `Foo`");
        assert!(err.source().is_some());
    }
}
