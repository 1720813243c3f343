mod item;
pub use item::ItemCollection;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::{Deref, DerefMut};

use crate::collection::Collection;
use crate::error::Result;
use crate::helpers::numeric;

const LINE_ITEMS: &str = "line_items";
const PRODUCT_ID: &str = "product_id";

/// A single Shopify order
///
/// Wraps the order object and answers questions about its `line_items`.
/// Every [`Collection`] operation is available through deref.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderCollection {
    inner: Collection,
}

impl OrderCollection {
    pub fn new(inner: Collection) -> Self {
        match inner.get(LINE_ITEMS) {
            Some(Value::Array(_)) => {}
            Some(other) => log::warn!("Order `line_items` is not a list: {other}"),
            None => log::warn!("Order has no `line_items`"),
        }
        OrderCollection { inner }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let order = OrderCollection::new(Collection::from_json(json)?);
        log::debug!(
            "Loaded order {:?} with {} line items",
            order.id(),
            order.get_number_of_items()
        );
        Ok(order)
    }

    crate::collection_accessors! {
        id: int,
        email: str,
        currency: str,
        total_price: str,
        customer: collection,
        shipping_address: collection,
    }

    /// The raw `line_items`, empty when the order has none
    pub fn line_items(&self) -> &[Value] {
        match self.inner.get(LINE_ITEMS) {
            Some(Value::Array(items)) => items,
            _ => &[],
        }
    }

    /// First line item for `product_id`
    ///
    /// Ids are compared after integer normalization, so `"632910392"` in the
    /// document matches `632910392`.
    pub fn get_item_by_id(&self, product_id: i64) -> Option<ItemCollection> {
        self.line_items()
            .iter()
            .find(|item| item_product_id(item) == Some(product_id))
            .and_then(|item| ItemCollection::from_value(item.clone()))
    }

    /// Every line item for `product_id`, variants included
    pub fn get_items_by_id(&self, product_id: i64) -> Vec<ItemCollection> {
        self.line_items()
            .iter()
            .filter(|item| item_product_id(item) == Some(product_id))
            .filter_map(|item| ItemCollection::from_value(item.clone()))
            .collect()
    }

    /// One item per distinct `product_id`, first occurrence wins
    ///
    /// The same product shows up once per ordered variant, only the first
    /// of those is returned. Input order is kept.
    pub fn get_items(&self) -> Vec<ItemCollection> {
        let mut seen = FxHashSet::default();

        self.line_items()
            .iter()
            .filter(|item| {
                let is_object = item.is_object();
                if !is_object {
                    log::warn!("Skipping line item that is not an object: {item}");
                }
                is_object
            })
            .filter(|item| seen.insert(dedup_key(item)))
            .filter_map(|item| ItemCollection::from_value(item.clone()))
            .collect()
    }

    /// Product ids of [`OrderCollection::get_items`], skipping items without a numeric id
    pub fn get_item_ids(&self) -> Vec<i64> {
        self.get_items()
            .iter()
            .filter_map(ItemCollection::product_id)
            .collect()
    }

    /// Number of line items, duplicates included
    pub fn get_number_of_items(&self) -> usize {
        self.line_items().len()
    }

    pub fn into_inner(self) -> Collection {
        self.inner
    }
}

fn item_product_id(item: &Value) -> Option<i64> {
    item.get(PRODUCT_ID).and_then(numeric::to_int)
}

fn dedup_key(item: &Value) -> String {
    let product_id = item.get(PRODUCT_ID).unwrap_or(&Value::Null);
    match numeric::to_int(product_id) {
        Some(id) => id.to_string(),
        None => product_id.to_string(),
    }
}

impl From<Collection> for OrderCollection {
    fn from(inner: Collection) -> Self {
        OrderCollection::new(inner)
    }
}

impl Deref for OrderCollection {
    type Target = Collection;

    fn deref(&self) -> &Collection {
        &self.inner
    }
}

impl DerefMut for OrderCollection {
    fn deref_mut(&mut self) -> &mut Collection {
        &mut self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse_order(value: Value) -> OrderCollection {
        OrderCollection::from_json(&value.to_string()).unwrap()
    }

    #[test]
    fn counts_raw_line_items() {
        let order = parse_order(json!({"line_items": [
            {"product_id": 1, "qty": 2},
            {"product_id": 1, "qty": 1},
            {"product_id": 2, "qty": 5}
        ]}));

        assert_eq!(order.get_number_of_items(), 3);
        assert_eq!(order.get_item_by_id(1).unwrap()["qty"], json!(2));
        assert!(order.get_item_by_id(3).is_none());
    }

    #[test]
    fn product_ids_are_normalized() {
        let order = parse_order(json!({"line_items": [
            {"product_id": "42", "title": "string id"},
            {"product_id": 42, "title": "int id"}
        ]}));

        assert_eq!(order.get_item_by_id(42).unwrap().title(), Some("string id"));
        assert_eq!(order.get_items_by_id(42).len(), 2);
        assert_eq!(order.get_items().len(), 1);
    }

    #[test]
    fn get_items_keeps_first_occurrence_in_order() {
        let order = parse_order(json!({"line_items": [
            {"product_id": 3, "variant_id": 30},
            {"product_id": 1, "variant_id": 10},
            {"product_id": 3, "variant_id": 31},
            {"product_id": 2, "variant_id": 20},
            {"product_id": 1, "variant_id": 11}
        ]}));

        let variants: Vec<_> = order
            .get_items()
            .iter()
            .filter_map(ItemCollection::variant_id)
            .collect();
        assert_eq!(variants, vec![30, 10, 20]);
        assert_eq!(order.get_item_ids(), vec![3, 1, 2]);
        assert_eq!(order.get_number_of_items(), 5);
    }

    #[test]
    fn missing_line_items_behave_as_empty() {
        let order = parse_order(json!({"id": 1}));

        assert_eq!(order.get_number_of_items(), 0);
        assert!(order.get_items().is_empty());
        assert!(order.get_item_ids().is_empty());
        assert!(order.get_item_by_id(1).is_none());

        let order = parse_order(json!({"line_items": "nope"}));
        assert_eq!(order.get_number_of_items(), 0);
    }

    #[test]
    fn non_object_line_items_are_counted_but_not_returned() {
        let order = parse_order(json!({"line_items": [7, {"product_id": 7}]}));

        assert_eq!(order.get_number_of_items(), 2);
        assert_eq!(order.get_item_ids(), vec![7]);
    }

    #[test]
    fn non_object_line_items_do_not_hide_items_without_id() {
        let order = parse_order(json!({"line_items": [
            "junk",
            {"product_id": null, "title": "Tip"},
            {"product_id": 5, "title": "Mug"}
        ]}));

        let titles: Vec<_> = order
            .get_items()
            .iter()
            .map(|item| item.title().map(str::to_string))
            .collect();
        assert_eq!(titles, vec![Some("Tip".to_string()), Some("Mug".to_string())]);
        assert_eq!(order.get_item_ids(), vec![5]);
    }

    #[test]
    fn typed_order_fields() {
        let order = parse_order(json!({
            "id": 450789469,
            "email": "bob.norman@example.com",
            "currency": "USD",
            "total_price": "598.94",
            "line_items": []
        }));

        assert_eq!(order.id(), Some(450789469));
        assert_eq!(order.email(), Some("bob.norman@example.com"));
        assert_eq!(order.currency(), Some("USD"));
        assert_eq!(order.total_price(), Some("598.94"));
        assert_eq!(order.property_int("total_price"), Some(598));
        assert!(order.customer().is_none());
    }
}
