use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use thiserror::Error;

// -----------------------------------------------------------------------------
// Error kind

/// The kind of [`BindError`], along with some kind-specific information.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BindErrorKind {
    /// A field needs a tag name (nested tag, raw subtree or nested bean) but declares none.
    #[error("field `{field}` of `{type_name}` requires a tag name annotation")]
    AnnotationMissing {
        type_name: &'static str,
        field: &'static str,
    },

    /// The candidate nodes do not have the shape the binding requires.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A value could not be converted to the declared field type.
    #[error("cannot convert {found} to `{expected}`")]
    CoercionFailure { expected: String, found: String },

    /// A binding was asked for an operation it does not support.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

// -----------------------------------------------------------------------------
// Error

/// An error raised while resolving bindings or converting between beans and trees.
///
/// With the `debug` feature (in debug builds) the serializer records the
/// `Type.field` path that was being processed when the error was raised,
/// outermost field first.
///
/// # Example
///
/// ```
/// use xb_bind::{BindError, BindErrorKind};
///
/// let err = BindError::shape_mismatch("expected one <raw> element, found 0");
/// assert!(matches!(err.kind(), BindErrorKind::ShapeMismatch(_)));
/// assert!(err.path().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindError {
    kind: BindErrorKind,
    path: Vec<String>,
}

impl BindError {
    /// Creates an error without path information.
    #[inline]
    pub const fn new(kind: BindErrorKind) -> Self {
        Self {
            kind,
            path: Vec::new(),
        }
    }

    #[cold]
    pub fn annotation_missing(type_name: &'static str, field: &'static str) -> Self {
        Self::new(BindErrorKind::AnnotationMissing { type_name, field })
    }

    #[cold]
    pub fn shape_mismatch(message: impl Into<String>) -> Self {
        Self::new(BindErrorKind::ShapeMismatch(message.into()))
    }

    #[cold]
    pub fn coercion_failure(expected: impl fmt::Display, found: impl fmt::Display) -> Self {
        Self::new(BindErrorKind::CoercionFailure {
            expected: alloc::format!("{expected}"),
            found: alloc::format!("{found}"),
        })
    }

    #[cold]
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(BindErrorKind::UnsupportedOperation(message.into()))
    }

    /// Returns the kind of [`BindError`].
    #[inline]
    pub fn kind(&self) -> &BindErrorKind {
        &self.kind
    }

    /// Returns the recorded field path, outermost first.
    ///
    /// Always empty unless the `debug` feature is active.
    #[inline]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Records that the error happened inside `type_name.field`.
    ///
    /// Called while unwinding, so the innermost field is pushed first.
    #[inline]
    pub fn in_field(mut self, type_name: &str, field: &str) -> Self {
        self.path.insert(0, alloc::format!("{type_name}.{field}"));
        self
    }
}

impl From<BindErrorKind> for BindError {
    #[inline]
    fn from(kind: BindErrorKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.path.is_empty() {
            write!(f, " (at `{}`)", self.path.join(" > "))?;
        }
        Ok(())
    }
}

impl core::error::Error for BindError {}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{BindError, BindErrorKind};
    use alloc::string::ToString;

    #[test]
    fn display_includes_path() {
        let err = BindError::coercion_failure("u8", "`300`")
            .in_field("Inner", "value")
            .in_field("Outer", "inner");
        assert_eq!(err.path(), ["Outer.inner", "Inner.value"]);
        assert_eq!(
            err.to_string(),
            "cannot convert `300` to `u8` (at `Outer.inner > Inner.value`)"
        );
    }

    #[test]
    fn kind_display() {
        let err = BindError::annotation_missing("Foo", "raw");
        assert_eq!(
            err.to_string(),
            "field `raw` of `Foo` requires a tag name annotation"
        );
        assert!(matches!(
            BindError::unsupported("x").kind(),
            BindErrorKind::UnsupportedOperation(_)
        ));
    }
}
