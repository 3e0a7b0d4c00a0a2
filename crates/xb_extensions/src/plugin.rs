use alloc::string::String;
use core::any::TypeId;
use core::fmt;
use std::sync::{PoisonError, RwLock};

use xb_bind::info::Bean;
use xb_utils::TypeIdMap;

// -----------------------------------------------------------------------------
// PluginId

/// The unique identifier of a plugin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PluginId(String);

impl PluginId {
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PluginId {
    #[inline]
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PluginId {
    #[inline]
    fn from(value: String) -> Self {
        Self(value)
    }
}

// -----------------------------------------------------------------------------
// PluginDescriptor

/// Describes the plugin that declared an extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDescriptor {
    id: PluginId,
    name: Option<String>,
}

impl PluginDescriptor {
    #[inline]
    pub fn new(id: impl Into<PluginId>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    /// Sets the display name.
    #[inline]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[inline]
    pub fn id(&self) -> &PluginId {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

// -----------------------------------------------------------------------------
// PluginAware

/// An extension that wants to know which plugin declared it.
///
/// The type must also be registered in [`PluginAwareRegistry`], since
/// instances are created behind `dyn Bean`.
pub trait PluginAware: Bean {
    fn set_plugin_descriptor(&mut self, descriptor: PluginDescriptor);
}

type AttachFn = fn(&mut dyn Bean, &PluginDescriptor) -> bool;

fn attach_to<T: PluginAware>(bean: &mut dyn Bean, descriptor: &PluginDescriptor) -> bool {
    match bean.downcast_mut::<T>() {
        Some(bean) => {
            bean.set_plugin_descriptor(descriptor.clone());
            true
        }
        None => false,
    }
}

/// The bean types implementing [`PluginAware`].
///
/// # Example
///
/// ```
/// use xb_bind::{XmlBind, info::TypedBean};
/// use xb_extensions::{PluginAware, PluginAwareRegistry, PluginDescriptor};
///
/// #[derive(XmlBind, Default, Clone)]
/// struct Action {
///     #[xml(skip)]
///     plugin: Option<PluginDescriptor>,
/// }
///
/// impl PluginAware for Action {
///     fn set_plugin_descriptor(&mut self, descriptor: PluginDescriptor) {
///         self.plugin = Some(descriptor);
///     }
/// }
///
/// let registry = PluginAwareRegistry::new();
/// registry.register::<Action>();
///
/// let mut bean = Action::type_info().create();
/// assert!(registry.attach(bean.as_mut(), &PluginDescriptor::new("org.example")));
/// let action = bean.downcast_ref::<Action>().unwrap();
/// assert_eq!(action.plugin.as_ref().unwrap().id().as_str(), "org.example");
/// ```
pub struct PluginAwareRegistry {
    hooks: RwLock<TypeIdMap<AttachFn>>,
}

static GLOBAL: PluginAwareRegistry = PluginAwareRegistry::new();

impl PluginAwareRegistry {
    #[inline]
    pub const fn new() -> Self {
        Self {
            hooks: RwLock::new(TypeIdMap::new()),
        }
    }

    /// The registry consulted by [`ExtensionComponentAdapter`](crate::ExtensionComponentAdapter).
    #[inline]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Registers `T`. Returns `false` if it was already registered.
    pub fn register<T: PluginAware>(&self) -> bool {
        self.hooks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .try_insert(TypeId::of::<T>(), || attach_to::<T>)
    }

    /// Hands `descriptor` to `bean` if its type is registered.
    ///
    /// Returns `true` if the descriptor was attached.
    pub fn attach(&self, bean: &mut dyn Bean, descriptor: &PluginDescriptor) -> bool {
        let hook = self
            .hooks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&bean.bean_info().type_id())
            .copied();
        match hook {
            Some(attach) => attach(bean, descriptor),
            None => false,
        }
    }
}

impl Default for PluginAwareRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// Tests
