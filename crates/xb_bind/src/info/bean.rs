use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::Accessor;
use crate::value::Value;
use crate::BindError;

// -----------------------------------------------------------------------------
// Bean

/// The object-safe side of a bindable struct.
///
/// Fields are addressed by their declaration index, as listed in
/// [`BeanInfo::accessors`].
pub trait Bean: Any + Send + Sync {
    /// Returns the static type information of the concrete type.
    fn bean_info(&self) -> &'static BeanInfo;

    /// Reads field `index`; `None` if the value is absent or the index is unknown.
    fn read_field(&self, index: usize) -> Option<Value>;

    /// Replaces field `index` with `value`.
    fn write_field(&mut self, index: usize, value: Value) -> Result<(), BindError>;

    /// Clones into a new box.
    fn clone_bean(&self) -> Box<dyn Bean>;
}

/// The static side of a bindable struct.
pub trait TypedBean: Bean + Default + Clone {
    /// Returns the static type information, built once.
    fn type_info() -> &'static BeanInfo;
}

impl dyn Bean {
    /// Returns `true` if the underlying value is a `T`.
    #[inline]
    pub fn is<T: Bean>(&self) -> bool {
        let any: &dyn Any = self;
        any.is::<T>()
    }

    /// Downcasts to a shared `T`.
    #[inline]
    pub fn downcast_ref<T: Bean>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref()
    }

    /// Downcasts to a mutable `T`.
    #[inline]
    pub fn downcast_mut<T: Bean>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = self;
        any.downcast_mut()
    }
}

impl fmt::Debug for dyn Bean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = self.bean_info();
        let mut s = f.debug_struct(info.type_name());
        for accessor in info.accessors() {
            match accessor.annotations().is_write_only() {
                true => s.field(accessor.name(), &"<write-only>"),
                false => s.field(accessor.name(), &self.read_field(accessor.index())),
            };
        }
        s.finish()
    }
}

// -----------------------------------------------------------------------------
// BeanInfo

fn construct<T: TypedBean>() -> Box<dyn Bean> {
    Box::new(T::default())
}

/// Static information about a bean type: its root label, its constructor and
/// its accessors in declaration order.
///
/// # Example
///
/// ```
/// use xb_bind::{XmlBind, info::TypedBean};
///
/// #[derive(XmlBind, Default, Clone)]
/// #[xml(root = "server")]
/// struct Server {
///     host: String,
///     #[xml(tag = "ports")]
///     ports: Vec<u16>,
/// }
///
/// let info = Server::type_info();
/// assert_eq!(info.root(), "server");
/// assert_eq!(info.type_name(), "Server");
/// let names: Vec<_> = info.accessors().iter().map(|a| a.name()).collect();
/// assert_eq!(names, ["host", "ports"]);
/// assert!(info.create().is::<Server>());
/// ```
pub struct BeanInfo {
    type_id: TypeId,
    type_path: &'static str,
    type_name: &'static str,
    root: &'static str,
    accessors: Box<[Accessor]>,
    constructor: fn() -> Box<dyn Bean>,
}

impl BeanInfo {
    /// Creates the information of `T`.
    ///
    /// Accessor indices are assigned from the order of `accessors`, which
    /// must match the indices understood by `T`'s [`Bean`] implementation.
    pub fn new<T: TypedBean>(
        type_name: &'static str,
        root: &'static str,
        accessors: impl Into<Vec<Accessor>>,
    ) -> Self {
        let type_id = TypeId::of::<T>();
        let mut accessors: Vec<Accessor> = accessors.into();
        for (index, accessor) in accessors.iter_mut().enumerate() {
            accessor.attach(type_id, index);
        }
        Self {
            type_id,
            type_path: core::any::type_name::<T>(),
            type_name,
            root,
            accessors: accessors.into_boxed_slice(),
            constructor: construct::<T>,
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Full path, as given by [`core::any::type_name`].
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Short name, usually the type ident.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Label of the element a bean is serialized to.
    #[inline]
    pub fn root(&self) -> &'static str {
        self.root
    }

    #[inline]
    pub fn accessors(&self) -> &[Accessor] {
        &self.accessors
    }

    /// Finds an accessor by field name.
    #[inline]
    pub fn accessor(&self, name: &str) -> Option<&Accessor> {
        self.accessors.iter().find(|a| a.name() == name)
    }

    #[inline]
    pub fn accessor_at(&self, index: usize) -> Option<&Accessor> {
        self.accessors.get(index)
    }

    /// Creates a default instance.
    #[inline]
    pub fn create(&self) -> Box<dyn Bean> {
        (self.constructor)()
    }
}

impl fmt::Debug for BeanInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanInfo")
            .field("type_path", &self.type_path)
            .field("root", &self.root)
            .field("accessors", &self.accessors)
            .finish()
    }
}
