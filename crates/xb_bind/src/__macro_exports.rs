//! Items referenced by the code `#[derive(XmlBind)]` generates. Not public API.

pub use alloc::boxed::Box;

/// Static registration through [`inventory`].
#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::info::TypedBean;
    use crate::registry::BeanRegistry;

    /// One registration function per `#[xml(auto_register)]` type.
    pub struct __AutoRegisterFunc(pub fn(&mut BeanRegistry));

    inventory::collect!(__AutoRegisterFunc);

    #[inline]
    pub fn __register<T: TypedBean>(registry: &mut BeanRegistry) {
        registry.register::<T>();
    }

    // Only runs where `inventory` works, so the registry can report support.
    fn __mark_available(registry: &mut BeanRegistry) {
        registry.mark_auto_registered();
    }

    inventory::submit! {
        __AutoRegisterFunc(__mark_available)
    }

    pub fn __register_types(registry: &mut BeanRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }
}
