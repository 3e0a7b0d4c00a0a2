use core::any::TypeId;
use core::fmt;

use xb_utils::TypeIdMap;
use xb_utils::hash::HashMap;

use crate::info::{BeanInfo, TypedBean};

/// Bean types, looked up by name or by [`TypeId`].
///
/// A type is reachable by its short name ([`BeanInfo::type_name`]) and its
/// full path ([`BeanInfo::type_path`]). When two types claim the same name the
/// first registration keeps it.
///
/// # Examples
///
/// ```
/// use xb_bind::{XmlBind, registry::BeanRegistry};
///
/// #[derive(XmlBind, Default, Clone)]
/// struct Greeter {
///     text: String,
/// }
///
/// let mut registry = BeanRegistry::new();
/// registry.register::<Greeter>();
///
/// let info = registry.get("Greeter").unwrap();
/// assert!(info.type_is::<Greeter>());
/// assert!(registry.get(info.type_path()).is_some());
/// assert!(registry.get("Missing").is_none());
/// ```
pub struct BeanRegistry {
    types: TypeIdMap<&'static BeanInfo>,
    names: HashMap<&'static str, &'static BeanInfo>,
    #[cfg(feature = "auto_register")]
    auto_registered: bool,
}

impl BeanRegistry {
    /// Creates an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self {
            types: TypeIdMap::new(),
            names: HashMap::default(),
            #[cfg(feature = "auto_register")]
            auto_registered: false,
        }
    }

    /// Registers `T`. Registering a type twice is a no-op.
    #[inline]
    pub fn register<T: TypedBean>(&mut self) {
        self.register_info(T::type_info());
    }

    /// Registers a bean by its static information.
    ///
    /// Returns `false` if the type was already registered.
    pub fn register_info(&mut self, info: &'static BeanInfo) -> bool {
        if !self.types.try_insert(info.type_id(), || info) {
            return false;
        }
        for name in [info.type_name(), info.type_path()] {
            match self.names.get(name) {
                Some(other) if other.type_id() != info.type_id() => {
                    log::warn!(
                        "bean name `{name}` already taken by `{}`, `{}` is only reachable by its other names",
                        other.type_path(),
                        info.type_path()
                    );
                }
                Some(_) => {}
                None => {
                    self.names.insert(name, info);
                }
            }
        }
        true
    }

    /// Automatically registers every type declared with `#[xml(auto_register)]`.
    ///
    /// Repeated calls are cheap and will not insert duplicates.
    ///
    /// ## Return Value
    ///
    /// Returns `true` if automatic registration works on the current platform.
    /// Without the `auto_register` feature this does nothing and returns `false`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use xb_bind::{XmlBind, registry::BeanRegistry};
    ///
    /// #[derive(XmlBind, Default, Clone)]
    /// #[xml(auto_register)]
    /// struct Plugin {
    ///     id: String,
    /// }
    ///
    /// let mut registry = BeanRegistry::new();
    /// assert!(registry.auto_register());
    /// assert!(registry.get("Plugin").is_some());
    /// ```
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::auto_register;
            // Reduce the cost of duplicate registrations.
            if self.auto_registered {
                return true;
            }
            auto_register::__register_types(self);
            self.auto_registered
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    /// Marks automatic registration as working; called by the inventory flag entry.
    #[cfg(feature = "auto_register")]
    #[inline]
    pub(crate) fn mark_auto_registered(&mut self) {
        self.auto_registered = true;
    }

    /// Finds a type by short name or full path.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&'static BeanInfo> {
        self.names.get(name).copied()
    }

    #[inline]
    pub fn get_type_id(&self, type_id: TypeId) -> Option<&'static BeanInfo> {
        self.types.get(&type_id).copied()
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.types.contains(&type_id)
    }

    /// Number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterates over the registered types, in no particular order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'static BeanInfo> + '_ {
        self.types.values().copied()
    }
}

impl Default for BeanRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BeanRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.types.values().map(|info| info.type_path()))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::BeanRegistry;
    use crate::XmlBind;
    use core::any::TypeId;

    mod a {
        #[derive(crate::XmlBind, Default, Clone)]
        pub struct Item {
            pub v: u8,
        }
    }

    mod b {
        #[derive(crate::XmlBind, Default, Clone)]
        pub struct Item {
            pub v: u8,
        }
    }

    #[derive(XmlBind, Default, Clone)]
    #[xml(auto_register)]
    struct Registered {
        v: u8,
    }

    #[test]
    fn duplicate_short_names_keep_first() {
        let mut registry = BeanRegistry::new();
        registry.register::<a::Item>();
        registry.register::<a::Item>();
        registry.register::<b::Item>();
        assert_eq!(registry.len(), 2);

        let by_name = registry.get("Item").unwrap();
        assert!(by_name.type_is::<a::Item>());

        let b_path = core::any::type_name::<b::Item>();
        assert!(registry.get(b_path).unwrap().type_is::<b::Item>());
        assert!(registry.contains(TypeId::of::<b::Item>()));
    }

    #[cfg(feature = "auto_register")]
    #[test]
    fn auto_register_finds_flagged_types() {
        let mut registry = BeanRegistry::new();
        if registry.auto_register() {
            assert!(registry.get("Registered").is_some());
            assert!(registry.get("Item").is_none());
            assert!(registry.auto_register());
        }
    }

    #[cfg(not(feature = "auto_register"))]
    #[test]
    fn auto_register_is_disabled() {
        assert!(!BeanRegistry::new().auto_register());
        assert!(BeanRegistry::new().get("Registered").is_none());
    }
}
