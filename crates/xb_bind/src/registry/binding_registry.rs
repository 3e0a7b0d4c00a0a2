use alloc::boxed::Box;
use core::any::TypeId;
use std::sync::{PoisonError, RwLock};

use xb_utils::TypeIdMap;

use crate::binding::TypeBindings;
use crate::info::BeanInfo;
use crate::BindError;

/// Memoizing cache of the bindings of each bean type.
///
/// Bindings are resolved outside the lock on first use and installed once;
/// when two threads race, the loser's result is dropped and both observe the
/// same installed value. Resolution errors are returned, not cached.
///
/// Entries are leaked so they can be handed out as `'static`; a registry only
/// grows.
///
/// # Example
///
/// ```
/// use xb_bind::{XmlBind, info::TypedBean, registry::BindingRegistry};
///
/// #[derive(XmlBind, Default, Clone)]
/// struct Foo {
///     #[xml(tag = "name")]
///     name: String,
/// }
///
/// let registry = BindingRegistry::global();
/// let a = registry.bindings(Foo::type_info()).unwrap();
/// let b = registry.bindings(Foo::type_info()).unwrap();
/// assert!(core::ptr::eq(a, b));
/// assert!(registry.contains(core::any::TypeId::of::<Foo>()));
/// ```
pub struct BindingRegistry {
    types: RwLock<TypeIdMap<&'static TypeBindings>>,
}

static GLOBAL: BindingRegistry = BindingRegistry::new();

impl BindingRegistry {
    /// Creates an empty registry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            types: RwLock::new(TypeIdMap::new()),
        }
    }

    /// The registry used by [`XmlSerializer`](crate::XmlSerializer).
    #[inline]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Returns the bindings of `info`, resolving them on first use.
    pub fn bindings(&self, info: &'static BeanInfo) -> Result<&'static TypeBindings, BindError> {
        let type_id = info.type_id();
        if let Some(bindings) = self.get(type_id) {
            return Ok(bindings);
        }

        let resolved = TypeBindings::resolve(info)?;
        log::debug!(
            "resolved {} bindings for `{}`",
            resolved.bindings().len(),
            info.type_path()
        );
        Ok(self.install(type_id, resolved))
    }

    #[inline(never)]
    fn get(&self, type_id: TypeId) -> Option<&'static TypeBindings> {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn install(&self, type_id: TypeId, resolved: TypeBindings) -> &'static TypeBindings {
        let mut types = self.types.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(installed) = types.get(&type_id).copied() {
            log::warn!(
                "discarded concurrently resolved bindings of `{}`",
                resolved.info().type_path()
            );
            return installed;
        }
        let leaked: &'static TypeBindings = Box::leak(Box::new(resolved));
        types.insert(type_id, leaked);
        leaked
    }

    /// Returns `true` if the bindings of `type_id` have been resolved.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&type_id)
    }

    /// Number of resolved types.
    #[inline]
    pub fn len(&self) -> usize {
        self.types.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Default for BindingRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::BindingRegistry;
    use crate::info::TypedBean;
    use crate::XmlBind;
    use std::thread;

    #[derive(XmlBind, Default, Clone)]
    struct Shared {
        a: u8,
        #[xml(tag = "b")]
        b: Vec<String>,
    }

    #[derive(XmlBind, Default, Clone)]
    struct Broken {
        #[xml(tag = "")]
        name: String,
    }

    #[test]
    fn concurrent_resolution_installs_once() {
        static REGISTRY: BindingRegistry = BindingRegistry::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                thread::spawn(|| {
                    let bindings = REGISTRY.bindings(Shared::type_info()).unwrap();
                    bindings as *const _ as usize
                })
            })
            .collect();
        let addresses: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(REGISTRY.len(), 1);
    }

    #[test]
    fn errors_are_not_cached() {
        let registry = BindingRegistry::new();
        assert!(registry.bindings(Broken::type_info()).is_err());
        assert!(registry.bindings(Broken::type_info()).is_err());
        assert_eq!(registry.len(), 0);
    }
}
