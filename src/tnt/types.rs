//! Tarantool value model.
//!
//! Tarantool exchanges MessagePack data; `TntValue` mirrors that shape as a
//! dynamic Rust value. Maps keep insertion order (catalog tuples rely on it),
//! so they are stored as ordered pairs rather than a hash map.

use serde::{Deserialize, Serialize};

use super::error::{TntError, TntResult};

/// A dynamically typed Tarantool value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TntValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Double(f64),
    Str(String),
    Bin(Vec<u8>),
    Array(Vec<TntValue>),
    /// Ordered key/value pairs (MessagePack map).
    Map(Vec<(TntValue, TntValue)>),
}

impl TntValue {
    /// Check if this value is NULL.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, TntValue::Null)
    }

    /// Interpret as an unsigned 32-bit integer (space ids, field numbers).
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            TntValue::UInt(v) => u32::try_from(*v).ok(),
            TntValue::Int(v) => u32::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Interpret as a signed 64-bit integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TntValue::Int(v) => Some(*v),
            TntValue::UInt(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Interpret as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TntValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Interpret as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TntValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret as an array of values.
    pub fn as_array(&self) -> Option<&[TntValue]> {
        match self {
            TntValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Interpret as a map (ordered pairs).
    pub fn as_map(&self) -> Option<&[(TntValue, TntValue)]> {
        match self {
            TntValue::Map(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// Look up a string key in a map value.
    pub fn lookup(&self, key: &str) -> Option<&TntValue> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }

    /// Human-readable type name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            TntValue::Null => "null",
            TntValue::Bool(_) => "boolean",
            TntValue::Int(_) => "integer",
            TntValue::UInt(_) => "unsigned",
            TntValue::Double(_) => "double",
            TntValue::Str(_) => "string",
            TntValue::Bin(_) => "binary",
            TntValue::Array(_) => "array",
            TntValue::Map(_) => "map",
        }
    }

    /// Convert a `serde_json::Value` into a Tarantool value.
    ///
    /// Callers that hold JSON-shaped data (configuration, host-language
    /// bridges) use this to build parameter collections without reimplementing
    /// the value model.
    pub fn from_json(value: serde_json::Value) -> TntValue {
        match value {
            serde_json::Value::Null => TntValue::Null,
            serde_json::Value::Bool(b) => TntValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    TntValue::UInt(u)
                } else if let Some(i) = n.as_i64() {
                    TntValue::Int(i)
                } else {
                    TntValue::Double(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => TntValue::Str(s),
            serde_json::Value::Array(items) => {
                TntValue::Array(items.into_iter().map(TntValue::from_json).collect())
            }
            serde_json::Value::Object(map) => TntValue::Map(
                map.into_iter()
                    .map(|(k, v)| (TntValue::Str(k), TntValue::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert into a `serde_json::Value`.
    ///
    /// Binary data and non-string map keys have no JSON counterpart and
    /// produce a type error.
    pub fn into_json(self) -> TntResult<serde_json::Value> {
        Ok(match self {
            TntValue::Null => serde_json::Value::Null,
            TntValue::Bool(b) => serde_json::Value::Bool(b),
            TntValue::Int(i) => serde_json::Value::from(i),
            TntValue::UInt(u) => serde_json::Value::from(u),
            TntValue::Double(d) => serde_json::Number::from_f64(d)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            TntValue::Str(s) => serde_json::Value::String(s),
            TntValue::Bin(_) => {
                return Err(TntError::Type("binary value has no JSON form".to_string()))
            }
            TntValue::Array(items) => serde_json::Value::Array(
                items
                    .into_iter()
                    .map(TntValue::into_json)
                    .collect::<TntResult<_>>()?,
            ),
            TntValue::Map(pairs) => {
                let mut obj = serde_json::Map::with_capacity(pairs.len());
                for (k, v) in pairs {
                    let key = match k {
                        TntValue::Str(s) => s,
                        other => {
                            return Err(TntError::Type(format!(
                                "map key must be a string, got {}",
                                other.type_name()
                            )))
                        }
                    };
                    obj.insert(key, v.into_json()?);
                }
                serde_json::Value::Object(obj)
            }
        })
    }
}

impl From<bool> for TntValue {
    fn from(v: bool) -> Self {
        TntValue::Bool(v)
    }
}

impl From<i64> for TntValue {
    fn from(v: i64) -> Self {
        TntValue::Int(v)
    }
}

impl From<i32> for TntValue {
    fn from(v: i32) -> Self {
        TntValue::Int(v as i64)
    }
}

impl From<u64> for TntValue {
    fn from(v: u64) -> Self {
        TntValue::UInt(v)
    }
}

impl From<u32> for TntValue {
    fn from(v: u32) -> Self {
        TntValue::UInt(v as u64)
    }
}

impl From<f64> for TntValue {
    fn from(v: f64) -> Self {
        TntValue::Double(v)
    }
}

impl From<&str> for TntValue {
    fn from(v: &str) -> Self {
        TntValue::Str(v.to_string())
    }
}

impl From<String> for TntValue {
    fn from(v: String) -> Self {
        TntValue::Str(v)
    }
}

impl From<Vec<u8>> for TntValue {
    fn from(v: Vec<u8>) -> Self {
        TntValue::Bin(v)
    }
}

impl<T: Into<TntValue>> From<Option<T>> for TntValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => TntValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_accessors() {
        assert_eq!(TntValue::UInt(281).as_u32(), Some(281));
        assert_eq!(TntValue::Int(281).as_u32(), Some(281));
        assert_eq!(TntValue::Int(-1).as_u32(), None);
        assert_eq!(TntValue::Str("281".to_string()).as_u32(), None);
        assert_eq!(TntValue::UInt(7).as_i64(), Some(7));
    }

    #[test]
    fn test_map_lookup() {
        let map = TntValue::Map(vec![
            (TntValue::from("name"), TntValue::from("id")),
            (TntValue::from("type"), TntValue::from("unsigned")),
        ]);
        assert_eq!(map.lookup("type").and_then(|v| v.as_str()), Some("unsigned"));
        assert!(map.lookup("missing").is_none());
    }

    #[test]
    fn test_json_bridge() {
        let json = serde_json::json!({"id": 1, "tags": ["a", "b"], "gone": null});
        let value = TntValue::from_json(json.clone());
        assert_eq!(value.lookup("id").and_then(|v| v.as_i64()), Some(1));
        assert_eq!(value.into_json().unwrap(), json);
    }

    #[test]
    fn test_json_bridge_rejects_binary() {
        assert!(TntValue::Bin(vec![0xDE, 0xAD]).into_json().is_err());
    }
}
