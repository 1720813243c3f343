use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::{Deref, DerefMut};

use crate::collection::Collection;

/// One entry of an order's `line_items`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCollection {
    inner: Collection,
}

impl ItemCollection {
    pub fn new(inner: Collection) -> Self {
        ItemCollection { inner }
    }

    /// `None` unless `value` is an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(ItemCollection::new(Collection::from(map))),
            _ => None,
        }
    }

    crate::collection_accessors! {
        product_id: int,
        variant_id: int,
        quantity: int,
        title: str,
        sku: str,
        /// Unit price as written in the order, e.g. `"199.00"`
        price: str,
    }

    pub fn into_inner(self) -> Collection {
        self.inner
    }
}

impl From<Collection> for ItemCollection {
    fn from(inner: Collection) -> Self {
        ItemCollection::new(inner)
    }
}

impl Deref for ItemCollection {
    type Target = Collection;

    fn deref(&self) -> &Collection {
        &self.inner
    }
}

impl DerefMut for ItemCollection {
    fn deref_mut(&mut self) -> &mut Collection {
        &mut self.inner
    }
}
