use core::any::TypeId;
use core::fmt;

use crate::info::{Annotations, Bean};
use crate::value::{Value, ValueType, XmlValue};
use crate::BindError;

// -----------------------------------------------------------------------------
// Accessor

/// Read/write handle to one named field of a bean.
///
/// An accessor is stateless; it reaches the field through the host's
/// [`Bean::read_field`] / [`Bean::write_field`] using the field index, which
/// is assigned by [`BeanInfo::new`](crate::info::BeanInfo::new) from the
/// declaration order.
///
/// # Examples
///
/// ```
/// use xb_bind::{XmlBind, info::TypedBean, value::Value};
///
/// #[derive(XmlBind, Default, Clone)]
/// struct Foo {
///     size: u32,
/// }
///
/// let accessor = Foo::type_info().accessor("size").unwrap();
/// assert_eq!(accessor.index(), 0);
///
/// let mut foo = Foo::default();
/// accessor.write(&mut foo, Value::UInt(7)).unwrap();
/// assert_eq!(foo.size, 7);
/// assert!(matches!(accessor.read(&foo).unwrap(), Some(Value::UInt(7))));
/// ```
#[derive(Clone)]
pub struct Accessor {
    name: &'static str,
    index: usize,
    owner: Option<TypeId>,
    value_type: ValueType,
    annotations: Annotations,
}

impl Accessor {
    /// Creates an accessor for a field `name` holding a `T`.
    #[inline]
    pub const fn new<T: XmlValue>(name: &'static str) -> Self {
        Self {
            name,
            index: 0,
            owner: None,
            value_type: T::VALUE_TYPE,
            annotations: Annotations::new(),
        }
    }

    /// Replaces the annotations.
    #[inline]
    pub const fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// Binds the accessor to its position inside the owning bean.
    #[inline]
    pub(crate) fn attach(&mut self, owner: TypeId, index: usize) {
        self.owner = Some(owner);
        self.index = index;
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Declaration index inside the owning bean.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub const fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    #[inline]
    pub const fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    fn check_owner(&self, instance: &dyn Bean) -> Result<(), BindError> {
        match self.owner {
            Some(owner) if owner != instance.bean_info().type_id() => {
                Err(BindError::unsupported(alloc::format!(
                    "accessor `{}` used on foreign type `{}`",
                    self.name,
                    instance.bean_info().type_name()
                )))
            }
            _ => Ok(()),
        }
    }

    /// Reads the current value; `None` means absent.
    ///
    /// Fails with `UnsupportedOperation` for write-only fields.
    pub fn read(&self, instance: &dyn Bean) -> Result<Option<Value>, BindError> {
        self.check_owner(instance)?;
        if self.annotations.is_write_only() {
            return Err(BindError::unsupported(alloc::format!(
                "field `{}` is write-only and cannot be read",
                self.name
            )));
        }
        Ok(instance.read_field(self.index))
    }

    /// Reads the value a deserializer may merge into; write-only fields have none.
    #[inline]
    pub(crate) fn read_existing(&self, instance: &dyn Bean) -> Option<Value> {
        if self.annotations.is_write_only() {
            None
        } else {
            instance.read_field(self.index)
        }
    }

    /// Writes a value into the field, mutating the instance in place.
    ///
    /// The value must already match the declared type; anything else is a
    /// coercion failure.
    pub fn write(&self, instance: &mut dyn Bean, value: Value) -> Result<(), BindError> {
        self.check_owner(instance)?;
        instance.write_field(self.index, value)
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("value_type", &self.value_type)
            .field("annotations", &self.annotations)
            .finish()
    }
}
