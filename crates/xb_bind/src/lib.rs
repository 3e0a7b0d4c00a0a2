//! Declarative binding between Rust structs and [`xb_node`] trees.
//!
//! ## Menu
//!
//! - [`XmlBind`]: derive macro generating the accessors of a struct, or the
//!   variant list of a unit enum.
//! - [`XmlSerializer`]: serializes beans into elements and fills beans from elements.
//! - [`info`]: accessors, annotations and static bean information.
//! - [`binding`]: the field bindings and the rules picking them.
//! - [`registry`]: process-wide binding cache and name-based bean lookup.
//! - [`value`]: dynamic values and the [`XmlValue`] conversion trait.
//! - [`convert`]: coercion of text and numbers into declared field types.
//!
//! ## Example
//!
//! ```
//! use xb_bind::{XmlBind, XmlSerializer};
//! use xb_node::Element;
//!
//! #[derive(XmlBind, Default, Clone, Copy, Debug, PartialEq)]
//! enum Mode {
//!     #[default]
//!     Fast,
//!     Safe,
//! }
//!
//! #[derive(XmlBind, Default, Clone, Debug, PartialEq)]
//! #[xml(root = "job")]
//! struct Job {
//!     #[xml(attribute = "job-id")]
//!     id: u32,
//!     mode: Mode,
//!     #[xml(tag = "args", element = "arg")]
//!     args: Vec<String>,
//!     #[xml(tag = "note")]
//!     note: Option<String>,
//! }
//!
//! let tree = Element::new("job")
//!     .with_attribute("job-id", "7")
//!     .with_attribute("mode", "Safe")
//!     .with_child(
//!         Element::new("args")
//!             .with_child(Element::new("arg").with_text("-v"))
//!             .with_child(Element::new("arg").with_text("run")),
//!     );
//!
//! let job: Job = XmlSerializer::deserialize(&tree).unwrap();
//! assert_eq!(job.id, 7);
//! assert_eq!(job.mode, Mode::Safe);
//! assert_eq!(job.args, ["-v", "run"]);
//! assert_eq!(job.note, None);
//!
//! assert_eq!(XmlSerializer::serialize(&job).unwrap(), tree);
//! ```

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names `xb_bind`; this alias makes it resolve inside the crate too.
extern crate self as xb_bind;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod convert;
mod error;
mod serializer;

pub mod binding;
pub mod info;
pub mod registry;
pub mod value;

#[doc(hidden)]
pub mod __macro_exports;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use convert::convert;
pub use error::{BindError, BindErrorKind};
pub use serializer::XmlSerializer;
pub use value::{Value, XmlValue};

/// Derives [`TypedBean`](crate::info::TypedBean), [`Bean`](crate::info::Bean)
/// and [`XmlValue`] for a struct, or [`XmlValue`] for a unit-only enum.
///
/// ## Type attributes
///
/// - `#[xml(root = "name")]`: label of the element the bean is written to;
///   defaults to the type name.
/// - `#[xml(auto_register)]`: submit the type for
///   [`BeanRegistry::auto_register`](crate::registry::BeanRegistry::auto_register).
///
/// ## Field attributes
///
/// - `tag = "name"`: wrap the value in a child element.
/// - `text_if_empty = "..."`: text read from an empty tag.
/// - `element = "name"`: label of list items (default `item`).
/// - `attribute = "name"`: rename the attribute.
/// - `text`: bind a scalar to the text content.
/// - `raw`: copy `Element` values from and to children labeled by `tag`.
/// - `flat`: write list items directly under the host.
/// - `write_only`: read from trees, never written.
/// - `skip`: not bound at all; the field must implement `Default` + `Clone`.
///
/// ## Enum variants
///
/// - `#[xml(rename = "name")]`: text used for the variant.
pub use xb_bind_derive::XmlBind;
