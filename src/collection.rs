use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::Index;

use crate::error::Result;
use crate::helpers::{self, numeric};

static NULL: Value = Value::Null;

/// Keyed container over a parsed JSON object
///
/// Keys keep the order they had in the document. Nested objects and arrays
/// are stored as plain [`Value`]s, [`Collection::property`] wraps them into
/// their own `Collection` on access.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    entries: IndexMap<String, Value>,
}

/// Result of a derived property read, see [`Collection::property`]
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    /// A JSON number or a numeric string
    Int(i64),
    /// A nested object or array
    Collection(Collection),
    /// Anything else (non-numeric strings, booleans, null)
    Value(Value),
}

impl Property {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Property::Int(int) => Some(*int),
            _ => None,
        }
    }

    pub fn into_collection(self) -> Option<Collection> {
        match self {
            Property::Collection(collection) => Some(collection),
            _ => None,
        }
    }
}

impl Collection {
    pub fn new(entries: IndexMap<String, Value>) -> Self {
        Collection { entries }
    }

    /// Stream `json` into a new collection
    pub fn from_json(json: &str) -> Result<Self> {
        helpers::stream_to_map(json).map(Collection::new)
    }

    /// Objects keep their keys, arrays are keyed by position, scalars give `None`
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Collection::from(map)),
            Value::Array(items) => Some(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| (index.to_string(), item))
                    .collect(),
            ),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// First element of `data` whose `key` field is exactly `value`
    ///
    /// Equality is strict: `1` does not match `"1"` nor `1.0`. Elements that
    /// lack the field (or are not objects) compare as `null`.
    pub fn get_by_key_value<'a>(data: &'a [Value], key: &str, value: &Value) -> Option<&'a Value> {
        data.iter().find(|item| field(item, key) == value)
    }

    /// Every element of `data` whose `key` field is exactly `value`, in order
    pub fn get_all_by_key_value<'a>(data: &'a [Value], key: &str, value: &Value) -> Vec<&'a Value> {
        data.iter().filter(|item| field(item, key) == value).collect()
    }

    /// Derived read of `name`
    ///
    /// Numbers and numeric strings come back as [`Property::Int`] (fractions
    /// are truncated), objects and arrays are flattened and wrapped in a new
    /// [`Collection`]. `None` when the key is absent.
    pub fn property(&self, name: &str) -> Option<Property> {
        let value = self.get(name)?;

        if let Some(int) = numeric::to_int(value) {
            return Some(Property::Int(int));
        }

        match value {
            Value::Array(_) | Value::Object(_) => {
                Collection::from_value(helpers::flatten(value)).map(Property::Collection)
            }
            other => Some(Property::Value(other.clone())),
        }
    }

    pub fn property_int(&self, name: &str) -> Option<i64> {
        self.property(name).and_then(|property| property.as_int())
    }

    /// Raw string stored under `name`, numeric strings included
    pub fn property_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn property_collection(&self, name: &str) -> Option<Collection> {
        self.property(name).and_then(Property::into_collection)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Removes `key`, keeping the order of the remaining entries
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    pub fn first(&self) -> Option<(&str, &Value)> {
        self.entries.first().map(|(key, value)| (key.as_str(), value))
    }

    pub fn last(&self) -> Option<(&str, &Value)> {
        self.entries.last().map(|(key, value)| (key.as_str(), value))
    }

    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.entries
    }

    /// The collection as a JSON object
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }
}

fn field<'a>(item: &'a Value, key: &str) -> &'a Value {
    item.as_object()
        .and_then(|map| map.get(key))
        .unwrap_or(&NULL)
}

impl From<Map<String, Value>> for Collection {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl From<IndexMap<String, Value>> for Collection {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Collection::new(entries)
    }
}

impl FromIterator<(String, Value)> for Collection {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Collection::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Collection {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Missing keys index to `null`, like [`serde_json::Value`] does
impl Index<&str> for Collection {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }
}
