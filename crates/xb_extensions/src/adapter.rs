use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::fmt;
use std::sync::OnceLock;

use xb_bind::XmlSerializer;
use xb_bind::info::Bean;
use xb_bind::registry::BeanRegistry;
use xb_node::Element;

use crate::{ExtensionError, LoadingOrder, Orderable};
use crate::{PluginAwareRegistry, PluginDescriptor, PluginId};

/// Implementation name under which an extension is its own element.
pub const ELEMENT_IMPLEMENTATION: &str = "Element";

// -----------------------------------------------------------------------------
// ExtensionInstance

/// The object an [`ExtensionComponentAdapter`] produced.
#[derive(Debug)]
pub enum ExtensionInstance {
    /// The extension element, for [`ELEMENT_IMPLEMENTATION`].
    Element(Element),
    Bean(Box<dyn Bean>),
}

impl ExtensionInstance {
    #[inline]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Bean(_) => None,
        }
    }

    #[inline]
    pub fn as_bean(&self) -> Option<&dyn Bean> {
        match self {
            Self::Element(_) => None,
            Self::Bean(bean) => Some(bean.as_ref()),
        }
    }

    #[inline]
    pub fn downcast_ref<T: Bean>(&self) -> Option<&T> {
        self.as_bean()?.downcast_ref::<T>()
    }
}

// -----------------------------------------------------------------------------
// ExtensionComponentAdapter

/// A declared extension whose instance is created on first request.
///
/// The implementation is looked up by name in a [`BeanRegistry`] and built
/// with its default value. With `deserialize_instance` set, the instance is
/// then filled from the extension element. Types registered in the global
/// [`PluginAwareRegistry`] finally receive the declaring plugin.
///
/// Creation happens at most once; failures are not cached, so a later call
/// retries. The `order` and `id` attributes of the element feed
/// [`LoadingOrder::sort`].
pub struct ExtensionComponentAdapter {
    implementation: String,
    element: Element,
    descriptor: Option<PluginDescriptor>,
    deserialize_instance: bool,
    instance: OnceLock<ExtensionInstance>,
}

impl ExtensionComponentAdapter {
    pub fn new(
        implementation: impl Into<String>,
        element: Element,
        descriptor: Option<PluginDescriptor>,
        deserialize_instance: bool,
    ) -> Self {
        Self {
            implementation: implementation.into(),
            element,
            descriptor,
            deserialize_instance,
            instance: OnceLock::new(),
        }
    }

    /// The registered name of the implementation type.
    #[inline]
    pub fn implementation_name(&self) -> &str {
        &self.implementation
    }

    /// The element declaring the extension.
    #[inline]
    pub fn describing_element(&self) -> &Element {
        &self.element
    }

    #[inline]
    pub fn plugin_descriptor(&self) -> Option<&PluginDescriptor> {
        self.descriptor.as_ref()
    }

    #[inline]
    pub fn plugin_id(&self) -> Option<&PluginId> {
        self.descriptor.as_ref().map(PluginDescriptor::id)
    }

    /// Returns `true` once the instance has been created.
    #[inline]
    pub fn is_instantiated(&self) -> bool {
        self.instance.get().is_some()
    }

    /// Returns `true` if the implementation is registered as `name`.
    #[inline]
    pub fn is_assignable_to(&self, name: &str) -> bool {
        self.implementation == name
    }

    /// Returns the instance, creating it on first call.
    pub fn instance(&self, registry: &BeanRegistry) -> Result<&ExtensionInstance, ExtensionError> {
        if let Some(instance) = self.instance.get() {
            return Ok(instance);
        }
        let created = self.create(registry)?;
        // A racing thread may have won; its instance is kept.
        Ok(self.instance.get_or_init(|| created))
    }

    /// Returns the instance as a `T`.
    pub fn extension<T: Bean>(&self, registry: &BeanRegistry) -> Result<&T, ExtensionError> {
        self.instance(registry)?
            .downcast_ref::<T>()
            .ok_or_else(|| ExtensionError::TypeMismatch {
                implementation: self.implementation.clone(),
                expected: core::any::type_name::<T>(),
            })
    }

    fn create(&self, registry: &BeanRegistry) -> Result<ExtensionInstance, ExtensionError> {
        if self.implementation == ELEMENT_IMPLEMENTATION {
            return Ok(ExtensionInstance::Element(self.element.clone()));
        }

        let info = registry
            .get(&self.implementation)
            .ok_or_else(|| ExtensionError::UnknownImplementation(self.implementation.clone()))?;

        let mut bean = info.create();
        if self.deserialize_instance {
            XmlSerializer::deserialize_bean_into(bean.as_mut(), &self.element).map_err(|source| {
                ExtensionError::Bind {
                    implementation: self.implementation.clone(),
                    source,
                }
            })?;
        }
        if let Some(descriptor) = &self.descriptor {
            PluginAwareRegistry::global().attach(bean.as_mut(), descriptor);
        }

        log::debug!(
            "created extension `{}` from <{}>",
            info.type_path(),
            self.element.name()
        );
        Ok(ExtensionInstance::Bean(bean))
    }
}

impl Orderable for ExtensionComponentAdapter {
    /// Parses the `order` attribute of the element.
    #[inline]
    fn order(&self) -> Result<LoadingOrder, ExtensionError> {
        LoadingOrder::read(self.element.attribute("order"))
    }

    /// The `id` attribute of the element.
    #[inline]
    fn order_id(&self) -> Option<&str> {
        self.element.attribute("id")
    }
}

impl fmt::Debug for ExtensionComponentAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionComponentAdapter")
            .field("implementation", &self.implementation)
            .field("plugin", &self.plugin_id().map(ToString::to_string))
            .field("instantiated", &self.is_instantiated())
            .finish()
    }
}
