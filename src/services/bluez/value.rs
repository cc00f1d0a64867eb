use std::collections::HashMap;

use zbus::zvariant::{OwnedValue, Value};

/// A property value detached from the bus transport
///
/// Only the shapes the player interface actually uses are represented;
/// anything else is kept as `Unsupported` with its type signature so the
/// reader can treat it as missing.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Boolean value
    Bool(bool),
    /// Any signed integer width
    Int(i64),
    /// Any unsigned integer width
    UInt(u64),
    /// Double precision float
    Float(f64),
    /// String or object path
    Str(String),
    /// String-keyed dictionary (`a{sv}`)
    Dict(HashMap<String, PropertyValue>),
    /// Some other D-Bus type, identified by its signature
    Unsupported(String),
}

impl PropertyValue {
    /// Borrows the string content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Interprets a numeric value as a non-negative integer.
    ///
    /// Fractions are truncated and negative values clamp to zero.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            PropertyValue::UInt(n) => Some(*n),
            PropertyValue::Int(n) => Some(u64::try_from(*n).unwrap_or(0)),
            PropertyValue::Float(f) if f.is_finite() => Some(f.max(0.0).trunc() as u64),
            _ => None,
        }
    }

    /// Borrows the dictionary, if this is one.
    pub fn as_dict(&self) -> Option<&HashMap<String, PropertyValue>> {
        match self {
            PropertyValue::Dict(map) => Some(map),
            _ => None,
        }
    }

    /// True for values that carry no usable content.
    pub fn is_blank(&self) -> bool {
        match self {
            PropertyValue::Str(s) => s.is_empty(),
            PropertyValue::Unsupported(_) => true,
            _ => false,
        }
    }
}

impl From<OwnedValue> for PropertyValue {
    fn from(value: OwnedValue) -> Self {
        if !matches!(&*value, Value::Dict(_)) {
            return PropertyValue::from(&*value);
        }

        match HashMap::<String, OwnedValue>::try_from(value) {
            Ok(map) => PropertyValue::Dict(
                map.into_iter()
                    .map(|(key, value)| (key, PropertyValue::from(value)))
                    .collect(),
            ),
            Err(e) => PropertyValue::Unsupported(e.to_string()),
        }
    }
}

impl From<&Value<'_>> for PropertyValue {
    fn from(value: &Value<'_>) -> Self {
        match value {
            Value::Bool(b) => PropertyValue::Bool(*b),
            Value::U8(n) => PropertyValue::UInt(u64::from(*n)),
            Value::U16(n) => PropertyValue::UInt(u64::from(*n)),
            Value::U32(n) => PropertyValue::UInt(u64::from(*n)),
            Value::U64(n) => PropertyValue::UInt(*n),
            Value::I16(n) => PropertyValue::Int(i64::from(*n)),
            Value::I32(n) => PropertyValue::Int(i64::from(*n)),
            Value::I64(n) => PropertyValue::Int(*n),
            Value::F64(f) => PropertyValue::Float(*f),
            Value::Str(s) => PropertyValue::Str(s.to_string()),
            Value::ObjectPath(path) => PropertyValue::Str(path.to_string()),
            Value::Value(inner) => PropertyValue::from(inner.as_ref()),
            other => PropertyValue::Unsupported(other.value_signature().to_string()),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Str(value.to_string())
    }
}
