//! Runtime values traversed by paths.

mod get;
mod keystring;

pub use keystring::KeyString;

use std::collections::BTreeMap;

use bytes::Bytes;
use ordered_float::NotNan;

/// The storage for [`Value::Object`] entries.
pub type ObjectMap = BTreeMap<KeyString, Value>;

/// A dynamically typed value tree.
///
/// Strings are stored as [`Bytes`] and floats as [`NotNan`] so that values
/// support total equality.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    Bytes(Bytes),
    Integer(i64),
    Float(NotNan<f64>),
    Boolean(bool),
    Object(ObjectMap),
    Array(Vec<Value>),
    Null,
}

impl Value {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectMap> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    /// The name of this value's type, for diagnostics.
    #[must_use]
    pub fn kind_str(&self) -> &'static str {
        match self {
            Value::Bytes(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::Object(_) => "object",
            Value::Array(_) => "array",
            Value::Null => "null",
        }
    }

    /// Build a float value, mapping `NaN` to zero.
    #[must_use]
    pub fn from_f64_or_zero(value: f64) -> Self {
        NotNan::new(value).map_or_else(|_| Value::Float(NotNan::default()), Value::Float)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Bytes(Bytes::copy_from_slice(value.as_bytes()))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Bytes(value.into_bytes().into())
    }
}

impl From<Bytes> for Value {
    fn from(value: Bytes) -> Self {
        Value::Bytes(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::from_f64_or_zero(value)
    }
}

impl From<NotNan<f64>> for Value {
    fn from(value: NotNan<f64>) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<ObjectMap> for Value {
    fn from(value: ObjectMap) -> Self {
        Value::Object(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::Array(value.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Value::from_f64_or_zero(n.as_f64().unwrap_or(0.0)), Value::Integer),
            serde_json::Value::String(s) => s.into(),
            serde_json::Value::Array(array) => {
                Value::Array(array.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key.into(), Value::from(value)))
                    .collect(),
            ),
        }
    }
}

/// A macro to easily generate Values
#[macro_export]
macro_rules! value {
    ([]) => ({
        $crate::value::Value::Array(vec![])
    });

    ([$($v:tt),+ $(,)?]) => ({
        let vec: Vec<$crate::value::Value> = vec![$($crate::value!($v)),+];
        $crate::value::Value::Array(vec)
    });

    ({}) => ({
        $crate::value::Value::Object(::std::collections::BTreeMap::default())
    });

    ({$($($k1:literal)? $($k2:ident)?: $v:tt),+ $(,)?}) => ({
        let map = vec![$((String::from($($k1)? $(stringify!($k2))?).into(), $crate::value!($v))),+]
            .into_iter()
            .collect::<::std::collections::BTreeMap<_, $crate::value::Value>>();

        $crate::value::Value::Object(map)
    });

    (null) => ({
        $crate::value::Value::Null
    });

    ($k:expr) => ({
        $crate::value::Value::from($k)
    });
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn value_macro() {
        let value = value!({a: {b: [1, "two", null]}, c: true});

        let Value::Object(root) = &value else {
            panic!("expected object");
        };
        assert_eq!(root.get("c"), Some(&Value::Boolean(true)));

        let inner = value.get("a.b").unwrap();
        assert_eq!(
            inner,
            &Value::Array(vec![
                Value::Integer(1),
                Value::from("two"),
                Value::Null,
            ])
        );
    }

    #[test]
    fn from_json() {
        let json = serde_json::json!({"a": {"b": [1, 2.5, "x", null]}});
        assert_eq!(
            Value::from(json),
            value!({a: {b: [1, 2.5, "x", null]}})
        );
    }

    #[test]
    fn nan_floats_collapse_to_zero() {
        assert_eq!(Value::from(f64::NAN), Value::Float(NotNan::default()));
    }
}
