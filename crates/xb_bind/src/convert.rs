//! Coercion of values read from a tree into the declared field type.

use alloc::vec::Vec;

use crate::BindError;
use crate::value::{ScalarType, Value, ValueType};

/// Converts `value` into the shape declared by `ty`.
///
/// Text is parsed into the target scalar, numbers are widened or narrowed
/// when no information is lost, and lists are converted element-wise.
/// Anything else fails with `CoercionFailure`.
///
/// # Examples
///
/// ```
/// use xb_bind::convert;
/// use xb_bind::value::{Value, XmlValue};
///
/// let v = convert(Value::Str(" 42 ".into()), &u8::VALUE_TYPE).unwrap();
/// assert!(matches!(v, Value::UInt(42)));
///
/// assert!(convert(Value::Str("300".into()), &u8::VALUE_TYPE).is_err());
/// assert!(convert(Value::Str("TRUE".into()), &bool::VALUE_TYPE).is_ok());
/// ```
pub fn convert(value: Value, ty: &ValueType) -> Result<Value, BindError> {
    match ty {
        ValueType::Option(inner) => convert(value, inner),
        ValueType::Scalar(scalar) => convert_scalar(value, *scalar),
        ValueType::Node => match value {
            Value::Node(node) => Ok(Value::Node(node)),
            other => Err(failure(ty, &other)),
        },
        ValueType::List(elem) => match value {
            Value::List(items) => items
                .into_iter()
                .map(|item| convert(item, elem))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            other => Err(failure(ty, &other)),
        },
        ValueType::Bean(info) => match value {
            Value::Object(bean) if bean.bean_info().type_id() == info().type_id() => {
                Ok(Value::Object(bean))
            }
            other => Err(failure(ty, &other)),
        },
    }
}

#[cold]
fn failure(expected: impl core::fmt::Display, found: &Value) -> BindError {
    BindError::coercion_failure(expected, found.describe())
}

fn convert_scalar(value: Value, scalar: ScalarType) -> Result<Value, BindError> {
    let converted = match scalar {
        ScalarType::Bool => to_bool(&value),
        ScalarType::I8 | ScalarType::I16 | ScalarType::I32 | ScalarType::I64 => {
            to_signed(&value, scalar).map(Value::Int)
        }
        ScalarType::U8 | ScalarType::U16 | ScalarType::U32 | ScalarType::U64 => {
            to_unsigned(&value, scalar).map(Value::UInt)
        }
        ScalarType::F32 | ScalarType::F64 => to_float(&value, scalar).map(Value::Float),
        ScalarType::Char => match &value {
            Value::Char(c) => Some(Value::Char(*c)),
            Value::Str(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Value::Char(c)),
                    _ => None,
                }
            }
            _ => None,
        },
        ScalarType::String => value.to_text().map(Value::Str),
        ScalarType::Enum(variants) => match &value {
            Value::Str(s) => {
                let s = s.trim();
                variants
                    .iter()
                    .find(|name| **name == s)
                    .map(|name| Value::Str((*name).into()))
            }
            _ => None,
        },
    };
    converted.ok_or_else(|| failure(scalar, &value))
}

fn to_bool(value: &Value) -> Option<Value> {
    match value {
        Value::Bool(b) => Some(Value::Bool(*b)),
        Value::Str(s) => {
            let s = s.trim();
            if s.eq_ignore_ascii_case("true") {
                Some(Value::Bool(true))
            } else if s.eq_ignore_ascii_case("false") {
                Some(Value::Bool(false))
            } else {
                None
            }
        }
        _ => None,
    }
}

fn to_signed(value: &Value, scalar: ScalarType) -> Option<i64> {
    let (min, max) = scalar.signed_range()?;
    let v = match value {
        Value::Int(v) => *v,
        Value::UInt(v) => i64::try_from(*v).ok()?,
        Value::Float(f) => integral(*f)?,
        Value::Str(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    (min..=max).contains(&v).then_some(v)
}

fn to_unsigned(value: &Value, scalar: ScalarType) -> Option<u64> {
    let max = scalar.unsigned_max()?;
    let v = match value {
        Value::UInt(v) => *v,
        Value::Int(v) => u64::try_from(*v).ok()?,
        Value::Float(f) => u64::try_from(integral(*f)?).ok()?,
        Value::Str(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    (v <= max).then_some(v)
}

fn to_float(value: &Value, scalar: ScalarType) -> Option<f64> {
    let v = match value {
        Value::Float(f) => *f,
        Value::Int(v) => *v as f64,
        Value::UInt(v) => *v as f64,
        Value::Str(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if scalar == ScalarType::F32 && v.is_finite() && v.abs() > f32::MAX as f64 {
        return None;
    }
    Some(v)
}

// Float to integer only when nothing is lost.
fn integral(f: f64) -> Option<i64> {
    if !f.is_finite() || f.fract() != 0.0 {
        return None;
    }
    let i = f as i64;
    (i as f64 == f).then_some(i)
}

// -----------------------------------------------------------------------------
// Tests
