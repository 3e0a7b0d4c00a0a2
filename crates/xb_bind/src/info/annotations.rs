// -----------------------------------------------------------------------------
// Annotations

/// The binding annotations declared on a field.
///
/// Built with `const` builder methods so accessors can be assembled in
/// generated code without allocation.
///
/// # Example
///
/// ```
/// use xb_bind::info::Annotations;
///
/// const LIST: Annotations = Annotations::new().with_tag("list").with_text_if_empty("none");
///
/// assert_eq!(LIST.tag(), Some("list"));
/// assert_eq!(LIST.text_if_empty(), "none");
/// assert!(!LIST.is_raw());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Annotations {
    tag: Option<&'static str>,
    text_if_empty: &'static str,
    element: Option<&'static str>,
    attribute: Option<&'static str>,
    text: bool,
    raw: bool,
    flat: bool,
    write_only: bool,
}

impl Annotations {
    /// No annotations: the field binds as an attribute named after the field.
    #[inline]
    pub const fn new() -> Self {
        Self {
            tag: None,
            text_if_empty: "",
            element: None,
            attribute: None,
            text: false,
            raw: false,
            flat: false,
            write_only: false,
        }
    }

    /// Wraps the value in a child element labeled `tag`.
    #[inline]
    pub const fn with_tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Text substituted when a tag is present but has no content.
    #[inline]
    pub const fn with_text_if_empty(mut self, text: &'static str) -> Self {
        self.text_if_empty = text;
        self
    }

    /// Label of each list element.
    #[inline]
    pub const fn with_element(mut self, element: &'static str) -> Self {
        self.element = Some(element);
        self
    }

    /// Attribute name used instead of the field name.
    #[inline]
    pub const fn with_attribute(mut self, name: &'static str) -> Self {
        self.attribute = Some(name);
        self
    }

    /// Binds a scalar to the host's text content.
    #[inline]
    pub const fn text(mut self) -> Self {
        self.text = true;
        self
    }

    /// Binds `Element` values as copies of matching child subtrees.
    #[inline]
    pub const fn raw(mut self) -> Self {
        self.raw = true;
        self
    }

    /// Writes list elements directly under the host instead of inside a wrapper.
    #[inline]
    pub const fn flat(mut self) -> Self {
        self.flat = true;
        self
    }

    /// The field is only filled from input and never written out.
    #[inline]
    pub const fn write_only(mut self) -> Self {
        self.write_only = true;
        self
    }

    #[inline]
    pub const fn tag(&self) -> Option<&'static str> {
        self.tag
    }

    #[inline]
    pub const fn text_if_empty(&self) -> &'static str {
        self.text_if_empty
    }

    #[inline]
    pub const fn element(&self) -> Option<&'static str> {
        self.element
    }

    #[inline]
    pub const fn attribute(&self) -> Option<&'static str> {
        self.attribute
    }

    #[inline]
    pub const fn is_text(&self) -> bool {
        self.text
    }

    #[inline]
    pub const fn is_raw(&self) -> bool {
        self.raw
    }

    #[inline]
    pub const fn is_flat(&self) -> bool {
        self.flat
    }

    #[inline]
    pub const fn is_write_only(&self) -> bool {
        self.write_only
    }
}
