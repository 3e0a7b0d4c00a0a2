use alloc::string::String;
use alloc::vec::Vec;

// -----------------------------------------------------------------------------
// Attribute

/// A `name="value"` pair attached to an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    name: String,
    value: String,
}

impl Attribute {
    /// Creates a new attribute.
    #[inline]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the attribute name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attribute value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }
}

// -----------------------------------------------------------------------------
// Content

/// A child of an [`Element`]: either a nested element or a run of text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Content {
    Element(Element),
    Text(String),
}

impl Content {
    /// Creates a text node.
    #[inline]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Returns the element if this is an element node.
    #[inline]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// Returns the text if this is a text node.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Element(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    /// Returns `true` for element nodes.
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self, Self::Element(_))
    }
}

impl From<Element> for Content {
    #[inline]
    fn from(value: Element) -> Self {
        Self::Element(value)
    }
}

impl From<String> for Content {
    #[inline]
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Content {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

// -----------------------------------------------------------------------------
// Element

/// A labeled tree node.
///
/// Attributes keep their insertion order and names are unique: setting an
/// existing attribute replaces its value in place. Children are kept in
/// insertion order. Equality is structural.
///
/// # Example
///
/// ```
/// use xb_node::Element;
///
/// let mut e = Element::new("option").with_attribute("name", "size");
/// e.set_attribute("name", "width");
/// e.set_attribute("value", "10");
///
/// assert_eq!(e.attribute("name"), Some("width"));
/// assert_eq!(e.attributes().len(), 2);
/// assert_eq!(e, Element::new("option").with_attribute("name", "width").with_attribute("value", "10"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Element {
    name: String,
    attributes: Vec<Attribute>,
    children: Vec<Content>,
}

impl Element {
    /// Creates an element with no attributes and no children.
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Returns the element label.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if the label equals `name`.
    #[inline]
    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }

    // -------------------------------------------------------------------------
    // Attributes

    /// Returns all attributes in insertion order.
    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Returns the value of the attribute `name`, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(Attribute::value)
    }

    /// Sets an attribute, replacing the value of an existing one with the same name.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }

    /// Removes the attribute `name`, returning its value.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let index = self.attributes.iter().position(|attr| attr.name == name)?;
        Some(self.attributes.remove(index).value)
    }

    /// Builder form of [`set_attribute`](Self::set_attribute).
    #[inline]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    // -------------------------------------------------------------------------
    // Children

    /// Returns all children in order.
    #[inline]
    pub fn children(&self) -> &[Content] {
        &self.children
    }

    /// Appends a child node.
    #[inline]
    pub fn push(&mut self, content: impl Into<Content>) {
        self.children.push(content.into());
    }

    /// Appends every node of `contents`.
    #[inline]
    pub fn extend(&mut self, contents: impl IntoIterator<Item = Content>) {
        self.children.extend(contents);
    }

    /// Builder form of [`push`](Self::push).
    #[inline]
    pub fn with_child(mut self, content: impl Into<Content>) -> Self {
        self.push(content);
        self
    }

    /// Appends a text node.
    #[inline]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Content::Text(text.into()));
        self
    }

    /// Iterates over the child elements, skipping text.
    #[inline]
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Content::as_element)
    }

    /// Returns the first child element labeled `name`.
    #[inline]
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    /// Iterates over the child elements labeled `name`.
    #[inline]
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |e| e.name == name)
    }

    /// Concatenates the direct text children.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for content in &self.children {
            if let Content::Text(t) = content {
                text.push_str(t);
            }
        }
        text
    }

    /// Returns `true` when the element has neither attributes nor children.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.children.is_empty()
    }
}

// -----------------------------------------------------------------------------
// Tests
