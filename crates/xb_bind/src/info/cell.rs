//! Static storage of [`BeanInfo`], used to implement [`TypedBean`].
//!
//! - [`BeanInfoCell`]: for non-generic beans, a plain [`OnceLock`].
//! - [`GenericBeanInfoCell`]: for generic beans, whose `static CELL` is shared
//!   by every instantiation, a [`TypeIdMap`] behind a [`RwLock`].
//!
//! [`TypedBean`]: crate::info::TypedBean

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use xb_utils::TypeIdMap;

use crate::info::BeanInfo;

/// Static storage for the [`BeanInfo`] of a non-generic bean.
///
/// ## Example
///
/// ```
/// use xb_bind::info::{Accessor, Bean, BeanInfo, BeanInfoCell, TypedBean};
/// use xb_bind::{BindError, value::{Value, XmlValue}};
///
/// #[derive(Default, Clone)]
/// struct Port {
///     number: u16,
/// }
///
/// impl TypedBean for Port {
///     fn type_info() -> &'static BeanInfo {
///         static CELL: BeanInfoCell = BeanInfoCell::new();
///         CELL.get_or_init(|| {
///             BeanInfo::new::<Self>("Port", "port", [Accessor::new::<u16>("number")])
///         })
///     }
/// }
///
/// impl Bean for Port {
///     fn bean_info(&self) -> &'static BeanInfo {
///         Self::type_info()
///     }
///     fn read_field(&self, index: usize) -> Option<Value> {
///         match index {
///             0 => self.number.to_value(),
///             _ => None,
///         }
///     }
///     fn write_field(&mut self, index: usize, value: Value) -> Result<(), BindError> {
///         match index {
///             0 => self.number = u16::from_value(value)?,
///             _ => return Err(BindError::unsupported("no such field")),
///         }
///         Ok(())
///     }
///     fn clone_bean(&self) -> Box<dyn Bean> {
///         Box::new(self.clone())
///     }
/// }
///
/// assert_eq!(Port::type_info().root(), "port");
/// assert!(core::ptr::eq(Port::type_info(), Port::type_info()));
/// ```
pub struct BeanInfoCell(OnceLock<BeanInfo>);

impl BeanInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored info, building it with `f` on first use.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> BeanInfo) -> &BeanInfo {
        self.0.get_or_init(f)
    }
}

/// Static storage for the [`BeanInfo`] of a generic bean.
///
/// One entry per instantiation; entries are leaked so references stay `'static`.
pub struct GenericBeanInfoCell(RwLock<TypeIdMap<&'static BeanInfo>>);

impl GenericBeanInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the info of `G`, building it with `f` if there is none yet.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> BeanInfo) -> &BeanInfo {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> BeanInfo) -> &BeanInfo {
        match self.get_by_type_id(type_id) {
            Some(info) => info,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&BeanInfo> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    // A racing builder may lose; its value is dropped and the winner returned.
    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: BeanInfo) -> &BeanInfo {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}
