//! Dynamic values exchanged between accessors and bindings.
//!
//! - [`ScalarType`] / [`ValueType`]: the declared type of a field.
//! - [`Value`]: a runtime value read from, or written into, a field.
//! - [`XmlValue`]: conversion between a Rust field type and [`Value`].

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use xb_node::Element;

use crate::BindError;
use crate::info::{Bean, BeanInfo};

// -----------------------------------------------------------------------------
// ScalarType

/// The scalar kinds a field can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Char,
    String,
    /// A unit-only enum, listed by variant name.
    Enum(&'static [&'static str]),
}

impl ScalarType {
    /// Inclusive range of the signed integer kinds.
    pub(crate) fn signed_range(self) -> Option<(i64, i64)> {
        match self {
            Self::I8 => Some((i8::MIN as i64, i8::MAX as i64)),
            Self::I16 => Some((i16::MIN as i64, i16::MAX as i64)),
            Self::I32 => Some((i32::MIN as i64, i32::MAX as i64)),
            Self::I64 => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }

    /// Upper bound of the unsigned integer kinds.
    pub(crate) fn unsigned_max(self) -> Option<u64> {
        match self {
            Self::U8 => Some(u8::MAX as u64),
            Self::U16 => Some(u16::MAX as u64),
            Self::U32 => Some(u32::MAX as u64),
            Self::U64 => Some(u64::MAX),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Char => "char",
            Self::String => "String",
            Self::Enum(variants) => return write!(f, "enum {{{}}}", variants.join(", ")),
        };
        f.write_str(name)
    }
}

// -----------------------------------------------------------------------------
// ValueType

/// The declared type of a field.
///
/// Built at compile time through [`XmlValue::VALUE_TYPE`].
#[derive(Clone, Copy)]
pub enum ValueType {
    Scalar(ScalarType),
    /// A raw [`Element`] subtree.
    Node,
    List(&'static ValueType),
    Option(&'static ValueType),
    /// A nested bean; the function gives its static type information.
    Bean(fn() -> &'static BeanInfo),
}

impl ValueType {
    /// Strips any number of `Option` layers.
    #[inline]
    pub fn unwrap_option(&self) -> &ValueType {
        let mut ty = self;
        while let Self::Option(inner) = ty {
            ty = inner;
        }
        ty
    }

    #[inline]
    pub fn is_option(&self) -> bool {
        matches!(self, Self::Option(_))
    }

    /// Returns `true` for scalars, looking through `Option`.
    #[inline]
    pub fn is_scalar(&self) -> bool {
        matches!(self.unwrap_option(), Self::Scalar(_))
    }

    /// Returns `true` for lists, looking through `Option`.
    #[inline]
    pub fn is_list(&self) -> bool {
        matches!(self.unwrap_option(), Self::List(_))
    }

    /// Returns `true` for `Element`, lists of `Element` and their optional forms.
    pub fn is_node_like(&self) -> bool {
        match self.unwrap_option() {
            Self::Node => true,
            Self::List(elem) => matches!(elem.unwrap_option(), Self::Node),
            _ => false,
        }
    }
}

impl fmt::Debug for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => write!(f, "{scalar}"),
            Self::Node => f.write_str("Element"),
            Self::List(elem) => write!(f, "Vec<{elem:?}>"),
            Self::Option(inner) => write!(f, "Option<{inner:?}>"),
            Self::Bean(info) => f.write_str(info().type_name()),
        }
    }
}

impl fmt::Display for ValueType {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// -----------------------------------------------------------------------------
// Value

/// A runtime value moving between a field and its binding.
///
/// Unit enums travel as [`Value::Str`] holding the variant name.
pub enum Value {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Str(String),
    Node(Element),
    List(Vec<Value>),
    Object(Box<dyn Bean>),
}

impl Value {
    /// Renders a scalar as text; `None` for non-scalar values.
    pub fn to_text(&self) -> Option<String> {
        Some(match self {
            Self::Bool(v) => v.to_string(),
            Self::Int(v) => v.to_string(),
            Self::UInt(v) => v.to_string(),
            Self::Float(v) => v.to_string(),
            Self::Char(v) => v.to_string(),
            Self::Str(v) => v.clone(),
            Self::Node(_) | Self::List(_) | Self::Object(_) => return None,
        })
    }

    /// A short description used in error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Bool(v) => alloc::format!("bool `{v}`"),
            Self::Int(v) => alloc::format!("integer `{v}`"),
            Self::UInt(v) => alloc::format!("integer `{v}`"),
            Self::Float(v) => alloc::format!("float `{v}`"),
            Self::Char(v) => alloc::format!("char `{v}`"),
            Self::Str(v) => alloc::format!("string `{v}`"),
            Self::Node(e) => alloc::format!("element <{}>", e.name()),
            Self::List(items) => alloc::format!("list of {} values", items.len()),
            Self::Object(bean) => alloc::format!("bean `{}`", bean.bean_info().type_name()),
        }
    }

    /// Takes the bean out of a [`Value::Object`] holding a `T`.
    pub fn into_bean<T: Bean>(self) -> Result<T, BindError> {
        match self {
            Self::Object(bean) => {
                let found = bean.bean_info().type_name();
                let any: Box<dyn Any> = bean;
                any.downcast::<T>()
                    .map(|boxed| *boxed)
                    .map_err(|_| BindError::coercion_failure(core::any::type_name::<T>(), found))
            }
            other => Err(BindError::coercion_failure(
                core::any::type_name::<T>(),
                other.describe(),
            )),
        }
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Self::Bool(v) => Self::Bool(*v),
            Self::Int(v) => Self::Int(*v),
            Self::UInt(v) => Self::UInt(*v),
            Self::Float(v) => Self::Float(*v),
            Self::Char(v) => Self::Char(*v),
            Self::Str(v) => Self::Str(v.clone()),
            Self::Node(v) => Self::Node(v.clone()),
            Self::List(v) => Self::List(v.clone()),
            Self::Object(v) => Self::Object(v.clone_bean()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
            Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Self::Char(v) => f.debug_tuple("Char").field(v).finish(),
            Self::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Self::Node(v) => f.debug_tuple("Node").field(v).finish(),
            Self::List(v) => f.debug_tuple("List").field(v).finish(),
            Self::Object(v) => f
                .debug_tuple("Object")
                .field(&v.bean_info().type_name())
                .finish(),
        }
    }
}

// -----------------------------------------------------------------------------
// XmlValue

/// Conversion between a field type and [`Value`].
///
/// Implemented for the primitive types, `String`, [`Element`], `Vec<T>`,
/// `Option<T>`, and by `#[derive(XmlBind)]` for beans and unit enums.
///
/// `from_value` receives a value that has already been coerced to
/// [`VALUE_TYPE`](Self::VALUE_TYPE), so it only checks the variant.
pub trait XmlValue: Sized + Send + Sync + 'static {
    /// The declared type of a field holding `Self`.
    const VALUE_TYPE: ValueType;

    /// Reads the value; `None` means absent.
    fn to_value(&self) -> Option<Value>;

    /// Builds `Self` from a coerced value.
    fn from_value(value: Value) -> Result<Self, BindError>;
}

#[cold]
fn mismatch<T>(value: Value) -> BindError {
    BindError::coercion_failure(core::any::type_name::<T>(), value.describe())
}

impl XmlValue for bool {
    const VALUE_TYPE: ValueType = ValueType::Scalar(ScalarType::Bool);

    #[inline]
    fn to_value(&self) -> Option<Value> {
        Some(Value::Bool(*self))
    }

    fn from_value(value: Value) -> Result<Self, BindError> {
        match value {
            Value::Bool(v) => Ok(v),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

macro_rules! impl_signed {
    ($($ty:ident => $kind:ident),* $(,)?) => {$(
        impl XmlValue for $ty {
            const VALUE_TYPE: ValueType = ValueType::Scalar(ScalarType::$kind);

            #[inline]
            fn to_value(&self) -> Option<Value> {
                Some(Value::Int(*self as i64))
            }

            fn from_value(value: Value) -> Result<Self, BindError> {
                match value {
                    Value::Int(v) => <$ty>::try_from(v).map_err(|_| mismatch::<Self>(Value::Int(v))),
                    other => Err(mismatch::<Self>(other)),
                }
            }
        }
    )*};
}

macro_rules! impl_unsigned {
    ($($ty:ident => $kind:ident),* $(,)?) => {$(
        impl XmlValue for $ty {
            const VALUE_TYPE: ValueType = ValueType::Scalar(ScalarType::$kind);

            #[inline]
            fn to_value(&self) -> Option<Value> {
                Some(Value::UInt(*self as u64))
            }

            fn from_value(value: Value) -> Result<Self, BindError> {
                match value {
                    Value::UInt(v) => <$ty>::try_from(v).map_err(|_| mismatch::<Self>(Value::UInt(v))),
                    other => Err(mismatch::<Self>(other)),
                }
            }
        }
    )*};
}

impl_signed!(i8 => I8, i16 => I16, i32 => I32, i64 => I64);
impl_unsigned!(u8 => U8, u16 => U16, u32 => U32, u64 => U64);

impl XmlValue for f32 {
    const VALUE_TYPE: ValueType = ValueType::Scalar(ScalarType::F32);

    fn to_value(&self) -> Option<Value> {
        // Go through the shortest decimal form so `0.1_f32` renders as `0.1`.
        let widened = self.to_string().parse().unwrap_or(*self as f64);
        Some(Value::Float(widened))
    }

    fn from_value(value: Value) -> Result<Self, BindError> {
        match value {
            Value::Float(v) => Ok(v as f32),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl XmlValue for f64 {
    const VALUE_TYPE: ValueType = ValueType::Scalar(ScalarType::F64);

    #[inline]
    fn to_value(&self) -> Option<Value> {
        Some(Value::Float(*self))
    }

    fn from_value(value: Value) -> Result<Self, BindError> {
        match value {
            Value::Float(v) => Ok(v),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl XmlValue for char {
    const VALUE_TYPE: ValueType = ValueType::Scalar(ScalarType::Char);

    #[inline]
    fn to_value(&self) -> Option<Value> {
        Some(Value::Char(*self))
    }

    fn from_value(value: Value) -> Result<Self, BindError> {
        match value {
            Value::Char(v) => Ok(v),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl XmlValue for String {
    const VALUE_TYPE: ValueType = ValueType::Scalar(ScalarType::String);

    #[inline]
    fn to_value(&self) -> Option<Value> {
        Some(Value::Str(self.clone()))
    }

    fn from_value(value: Value) -> Result<Self, BindError> {
        match value {
            Value::Str(v) => Ok(v),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl XmlValue for Element {
    const VALUE_TYPE: ValueType = ValueType::Node;

    #[inline]
    fn to_value(&self) -> Option<Value> {
        Some(Value::Node(self.clone()))
    }

    fn from_value(value: Value) -> Result<Self, BindError> {
        match value {
            Value::Node(v) => Ok(v),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl<T: XmlValue> XmlValue for Vec<T> {
    const VALUE_TYPE: ValueType = ValueType::List(&T::VALUE_TYPE);

    fn to_value(&self) -> Option<Value> {
        Some(Value::List(self.iter().filter_map(T::to_value).collect()))
    }

    fn from_value(value: Value) -> Result<Self, BindError> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl<T: XmlValue> XmlValue for Option<T> {
    const VALUE_TYPE: ValueType = ValueType::Option(&T::VALUE_TYPE);

    #[inline]
    fn to_value(&self) -> Option<Value> {
        self.as_ref().and_then(T::to_value)
    }

    #[inline]
    fn from_value(value: Value) -> Result<Self, BindError> {
        T::from_value(value).map(Some)
    }
}

// -----------------------------------------------------------------------------
// Tests
