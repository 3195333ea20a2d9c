//! Parameter classification and encoding.
//!
//! Callers supply either indexed arrays or named-placeholder maps; the
//! transport accepts exactly one of two encodings. The codec removes that
//! ambiguity once, at the boundary: a collection whose keys are exactly the
//! contiguous integers `0..N-1` in order passes through as positional,
//! anything else becomes an ordered list of named entries.

use smallvec::SmallVec;

use super::types::TntValue;

/// Placeholder marker named SQL parameters carry on the wire (`:name`).
pub const NAME_MARKER: char = ':';

/// Key of one bound parameter: a positional index or a placeholder name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKey {
    Index(usize),
    Name(String),
}

impl ParamKey {
    /// The key text used when the collection is encoded as named parameters.
    fn to_marker_string(&self) -> String {
        match self {
            ParamKey::Index(i) => format!("{}{}", NAME_MARKER, i),
            ParamKey::Name(name) => {
                if name.starts_with(NAME_MARKER) {
                    name.clone()
                } else {
                    format!("{}{}", NAME_MARKER, name)
                }
            }
        }
    }
}

impl From<usize> for ParamKey {
    fn from(i: usize) -> Self {
        ParamKey::Index(i)
    }
}

impl From<&str> for ParamKey {
    fn from(name: &str) -> Self {
        ParamKey::Name(name.to_string())
    }
}

impl From<String> for ParamKey {
    fn from(name: String) -> Self {
        ParamKey::Name(name)
    }
}

/// An ordered collection of bound parameters.
///
/// Most statements bind a handful of values, so entries are stored inline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: SmallVec<[(ParamKey, TntValue); 8]>,
}

impl Params {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a positional collection from a sequence of values.
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<TntValue>,
    {
        let mut params = Self::new();
        for (i, value) in values.into_iter().enumerate() {
            params.entries.push((ParamKey::Index(i), value.into()));
        }
        params
    }

    /// Build a named collection from `(name, value)` pairs, preserving order.
    pub fn named<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<TntValue>,
    {
        let mut params = Self::new();
        for (name, value) in pairs {
            params
                .entries
                .push((ParamKey::Name(name.into()), value.into()));
        }
        params
    }

    /// Bind one value, overwriting an existing entry with the same key.
    ///
    /// Overwrites keep the entry's original position; new keys append.
    pub fn bind<K, V>(&mut self, key: K, value: V)
    where
        K: Into<ParamKey>,
        V: Into<TntValue>,
    {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Number of bound parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no parameters are bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the bound entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &(ParamKey, TntValue)> {
        self.entries.iter()
    }

    /// Whether the key set is exactly the contiguous range `0..len` in order.
    fn is_contiguous_indexed(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(i, (key, _))| *key == ParamKey::Index(i))
    }

    /// Classify and encode into the protocol-ready parameter list.
    pub fn encode(&self) -> ParameterList {
        if self.is_contiguous_indexed() {
            ParameterList::Positional(self.entries.iter().map(|(_, v)| v.clone()).collect())
        } else {
            ParameterList::Named(
                self.entries
                    .iter()
                    .map(|(key, value)| (key.to_marker_string(), value.clone()))
                    .collect(),
            )
        }
    }
}

impl<K: Into<ParamKey>, V: Into<TntValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.bind(key, value);
        }
        params
    }
}

/// A parameter collection in one of the two encodings the transport accepts.
///
/// Named entries carry the `:` marker in their key; the client sends each as a
/// single-entry MessagePack map.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterList {
    Positional(Vec<TntValue>),
    Named(Vec<(String, TntValue)>),
}

impl ParameterList {
    /// Number of encoded parameters.
    pub fn len(&self) -> usize {
        match self {
            ParameterList::Positional(values) => values.len(),
            ParameterList::Named(pairs) => pairs.len(),
        }
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ParameterList {
    fn default() -> Self {
        ParameterList::Positional(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contiguous_indexes_stay_positional() {
        let params = Params::positional([1i64, 2, 3]);
        assert_eq!(
            params.encode(),
            ParameterList::Positional(vec![
                TntValue::Int(1),
                TntValue::Int(2),
                TntValue::Int(3)
            ])
        );
    }

    #[test]
    fn test_named_keys_get_marker_in_order() {
        let params = Params::named([("a", 1i64), ("b", 2i64)]);
        assert_eq!(
            params.encode(),
            ParameterList::Named(vec![
                (":a".to_string(), TntValue::Int(1)),
                (":b".to_string(), TntValue::Int(2)),
            ])
        );
    }

    #[test]
    fn test_marker_not_doubled() {
        let params = Params::named([(":id", 7i64)]);
        assert_eq!(
            params.encode(),
            ParameterList::Named(vec![(":id".to_string(), TntValue::Int(7))])
        );
    }

    #[test]
    fn test_gap_in_indexes_forces_named() {
        let mut params = Params::new();
        params.bind(0usize, "a");
        params.bind(2usize, "b");
        assert_eq!(
            params.encode(),
            ParameterList::Named(vec![
                (":0".to_string(), TntValue::from("a")),
                (":2".to_string(), TntValue::from("b")),
            ])
        );
    }

    #[test]
    fn test_mixed_keys_force_named() {
        let mut params = Params::new();
        params.bind(0usize, 1i64);
        params.bind("name", "x");
        assert!(matches!(params.encode(), ParameterList::Named(_)));
    }

    #[test]
    fn test_bind_overwrites_in_place() {
        let mut params = Params::new();
        params.bind("a", 1i64);
        params.bind("b", 2i64);
        params.bind("a", 10i64);
        assert_eq!(
            params.encode(),
            ParameterList::Named(vec![
                (":a".to_string(), TntValue::Int(10)),
                (":b".to_string(), TntValue::Int(2)),
            ])
        );
    }

    #[test]
    fn test_empty_collection_is_positional() {
        assert_eq!(
            Params::new().encode(),
            ParameterList::Positional(Vec::new())
        );
    }
}
