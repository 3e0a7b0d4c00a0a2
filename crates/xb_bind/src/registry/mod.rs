//! Process-wide caches.
//!
//! ## Menu
//!
//! - [`BindingRegistry`]: the resolved [`TypeBindings`](crate::binding::TypeBindings)
//!   of every bean type, built lazily and never invalidated.
//! - [`BeanRegistry`]: bean types looked up by name, for consumers that pick
//!   the concrete type of an instance at run time.
//!
//! ## auto_register
//!
//! With the `auto_register` feature, types declared with
//! `#[xml(auto_register)]` are collected through the [`inventory`] crate and
//! can be added in one call with [`BeanRegistry::auto_register`].
//!
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod bean_registry;
mod binding_registry;

// -----------------------------------------------------------------------------
// Exports

pub use bean_registry::BeanRegistry;
pub use binding_registry::BindingRegistry;
