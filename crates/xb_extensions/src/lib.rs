//! Extension components built from declarative tree elements.
//!
//! An extension is declared as an element naming its implementation type.
//! [`ExtensionComponentAdapter`] creates the instance on first use through the
//! [`BeanRegistry`](xb_bind::registry::BeanRegistry), fills it from the
//! element with [`XmlSerializer`](xb_bind::XmlSerializer), and hands the
//! declaring plugin to instances that implement [`PluginAware`].
//! [`LoadingOrder`] sorts adapters by their `order` and `id` attributes.
//!
//! # Example
//!
//! ```
//! use xb_bind::{XmlBind, registry::BeanRegistry};
//! use xb_extensions::{ExtensionComponentAdapter, LoadingOrder, PluginDescriptor};
//! use xb_node::Element;
//!
//! #[derive(XmlBind, Default, Clone, Debug)]
//! struct Highlighter {
//!     language: String,
//! }
//!
//! let mut registry = BeanRegistry::new();
//! registry.register::<Highlighter>();
//!
//! let declare = |language: &str, order: &str| {
//!     let element = Element::new("highlighter")
//!         .with_attribute("id", language)
//!         .with_attribute("language", language)
//!         .with_attribute("order", order);
//!     ExtensionComponentAdapter::new(
//!         "Highlighter",
//!         element,
//!         Some(PluginDescriptor::new("org.example.langs")),
//!         true,
//!     )
//! };
//!
//! let mut adapters = vec![declare("rust", "after toml"), declare("toml", "any")];
//! LoadingOrder::sort(&mut adapters).unwrap();
//!
//! let first = adapters[0].extension::<Highlighter>(&registry).unwrap();
//! assert_eq!(first.language, "toml");
//! ```

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod adapter;
mod error;
mod order;
mod plugin;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use adapter::{ELEMENT_IMPLEMENTATION, ExtensionComponentAdapter, ExtensionInstance};
pub use error::ExtensionError;
pub use order::{LoadingOrder, Orderable};
pub use plugin::{PluginAware, PluginAwareRegistry, PluginDescriptor, PluginId};
