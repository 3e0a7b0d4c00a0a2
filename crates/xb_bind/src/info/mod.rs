//! Static description of bindable types.
//!
//! ## Menu
//!
//! - [`Annotations`]: the binding annotations declared on a field.
//! - [`Accessor`]: read/write handle to one field, carrying its declared type and annotations.
//! - [`BeanInfo`]: root label, constructor and accessors of a bean type.
//! - [`Bean`] / [`TypedBean`]: the object-safe and the static side of a bindable struct.
//! - [`BeanInfoCell`] / [`GenericBeanInfoCell`]: static storage used to implement [`TypedBean`].
//!
//! Everything here is normally generated by [`#[derive(XmlBind)]`](crate::XmlBind).

// -----------------------------------------------------------------------------
// Modules

mod accessor;
mod annotations;
mod bean;
mod cell;

// -----------------------------------------------------------------------------
// Exports

pub use accessor::Accessor;
pub use annotations::Annotations;
pub use bean::{Bean, BeanInfo, TypedBean};
pub use cell::{BeanInfoCell, GenericBeanInfoCell};
