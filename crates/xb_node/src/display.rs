use core::fmt;

use crate::{Content, Element};

// -----------------------------------------------------------------------------
// Markup rendering

struct Escaped<'a> {
    text: &'a str,
    quote: bool,
}

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut last = 0;
        for (index, ch) in self.text.char_indices() {
            let replacement = match ch {
                '&' => "&amp;",
                '<' => "&lt;",
                '>' => "&gt;",
                '"' if self.quote => "&quot;",
                _ => continue,
            };
            f.write_str(&self.text[last..index])?;
            f.write_str(replacement)?;
            last = index + ch.len_utf8();
        }
        f.write_str(&self.text[last..])
    }
}

impl fmt::Display for Element {
    /// Renders compact markup: no declaration, no indentation,
    /// empty elements as `<name/>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name())?;
        for attr in self.attributes() {
            let value = Escaped {
                text: attr.value(),
                quote: true,
            };
            write!(f, " {}=\"{value}\"", attr.name())?;
        }
        if self.children().is_empty() {
            return f.write_str("/>");
        }
        f.write_str(">")?;
        for child in self.children() {
            fmt::Display::fmt(child, f)?;
        }
        write!(f, "</{}>", self.name())
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Element(element) => fmt::Display::fmt(element, f),
            Content::Text(text) => fmt::Display::fmt(&Escaped { text, quote: false }, f),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Element;
    use alloc::string::ToString;

    #[test]
    fn empty_element_is_self_closing() {
        assert_eq!(Element::new("a").to_string(), "<a/>");
        assert_eq!(
            Element::new("a").with_attribute("k", "v").to_string(),
            r#"<a k="v"/>"#
        );
    }

    #[test]
    fn escapes_text_and_attributes() {
        let e = Element::new("a")
            .with_attribute("q", "\"x\" & <y>")
            .with_text("1 < 2 & \"3\"");
        assert_eq!(
            e.to_string(),
            r#"<a q="&quot;x&quot; &amp; &lt;y&gt;">1 &lt; 2 &amp; "3"</a>"#
        );
    }

    #[test]
    fn nested_rendering_keeps_order() {
        let e = Element::new("root")
            .with_child(Element::new("first"))
            .with_text("mid")
            .with_child(Element::new("second").with_text("x"));
        assert_eq!(e.to_string(), "<root><first/>mid<second>x</second></root>");
    }
}
