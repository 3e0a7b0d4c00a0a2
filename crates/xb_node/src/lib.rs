//! A generic labeled tree: elements with attributes, ordered children and text.
//!
//! The binding engine reads and writes this model only; it makes no
//! assumption about the textual syntax used on the wire. [`Element`]
//! implements [`Display`](core::fmt::Display) and renders XML-like markup.
//!
//! # Example
//!
//! ```
//! use xb_node::{Content, Element};
//!
//! let list = Element::new("list")
//!     .with_child(Element::new("item").with_text("a"))
//!     .with_child(Element::new("item").with_text("b"));
//!
//! assert_eq!(list.children().len(), 2);
//! assert_eq!(list.to_string(), "<list><item>a</item><item>b</item></list>");
//! assert!(matches!(&list.children()[0], Content::Element(e) if e.text() == "a"));
//! ```
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod display;
mod element;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use element::{Attribute, Content, Element};
