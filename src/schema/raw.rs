use crate::types::{ParamValue, Scalar};
use std::collections::HashMap;

/// Ordered raw input: each key once, with its string (or list) value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawQuery {
    entries: Vec<(String, ParamValue)>,
}

impl RawQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes an `application/x-www-form-urlencoded` query string, with or without a
    /// leading `?`. Repeated keys, and every key ending in `[]`, collect into a list.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut raw = Self::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if key.is_empty() {
                continue;
            }
            if key.ends_with("[]") && !raw.contains(&key) {
                raw.insert(key.into_owned(), ParamValue::List(vec![Scalar::String(value.into_owned())]));
            } else {
                raw.append(key.into_owned(), value.into_owned());
            }
        }
        raw
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Sets `key`, replacing any previous value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Adds `value` under `key`, turning an existing value into a list.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| *k == key) else {
            self.entries.push((key, value));
            return;
        };
        let mut items = match std::mem::take(slot) {
            ParamValue::Scalar(s) => vec![s],
            ParamValue::List(items) => items,
        };
        match value {
            ParamValue::Scalar(s) => items.push(s),
            ParamValue::List(more) => items.extend(more),
        }
        *slot = ParamValue::List(items);
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for RawQuery {
    type Item = (String, ParamValue);
    type IntoIter = std::vec::IntoIter<(String, ParamValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for RawQuery {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut raw = Self::new();
        for (k, v) in iter {
            raw.append(k, v);
        }
        raw
    }
}

impl<K: Into<String>, V: Into<ParamValue>, const N: usize> From<[(K, V); N]> for RawQuery {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> From<Vec<(K, V)>> for RawQuery {
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

/// Hash maps carry no order; keys are taken sorted so schemas built from them are stable.
impl<V: Into<ParamValue>> From<HashMap<String, V>> for RawQuery {
    fn from(map: HashMap<String, V>) -> Self {
        let mut pairs: Vec<(String, V)> = map.into_iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        pairs.into_iter().collect()
    }
}

impl From<&str> for RawQuery {
    fn from(query: &str) -> Self {
        Self::parse(query)
    }
}
