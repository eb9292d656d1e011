//! Typed records produced by casting
//!
//! Field order of each struct is the output column order: serializers
//! (CSV, JSON) emit fields in declaration order.

use ahash::AHashMap;
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

pub type ProductId = i64;

/// Canonical text form used when rendering timestamps back to raw cells
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A label drawn from an open, repeated set (order status, goods group, ...)
///
/// Cloning is cheap; labels produced through a [`CategoryInterner`] share storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Category(Arc<str>);

impl Category {
    pub fn new(label: &str) -> Self {
        Self(Arc::from(label))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Category::new(label)
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Category::new(&label))
    }
}

/// Dictionary of labels seen in one column
#[derive(Debug, Default)]
pub struct CategoryInterner {
    labels: AHashMap<Arc<str>, Category>,
}

impl CategoryInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the shared label for `value`, adding it on first sight
    pub fn intern(&mut self, value: &str) -> Category {
        if let Some(existing) = self.labels.get(value) {
            return existing.clone();
        }
        let category = Category::new(value);
        self.labels.insert(category.0.clone(), category.clone());
        category
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// One order line after casting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_source_id: i64,
    pub order_created_datetime: NaiveDateTime,
    pub customer_id: i64,
    pub status: Option<Category>,
    pub sum: f64,
    pub quantity: i64,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
    pub product_id: ProductId,
}

impl OrderRecord {
    /// Render back to raw cells in declared column order
    pub fn to_raw_row(&self) -> Vec<String> {
        vec![
            self.order_source_id.to_string(),
            self.order_created_datetime.format(TIMESTAMP_FORMAT).to_string(),
            self.customer_id.to_string(),
            label_cell(&self.status),
            self.sum.to_string(),
            self.quantity.to_string(),
            text_cell(&self.name),
            text_cell(&self.surname),
            text_cell(&self.patronymic),
            self.product_id.to_string(),
        ]
    }
}

/// One product after casting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_id: ProductId,
    pub price: f64,
    pub goods_group: Option<Category>,
    pub manufacturer: Option<Category>,
}

impl ProductRecord {
    pub fn new(product_id: ProductId, price: f64, goods_group: &str, manufacturer: &str) -> Self {
        Self {
            product_id,
            price,
            goods_group: Some(Category::new(goods_group)),
            manufacturer: Some(Category::new(manufacturer)),
        }
    }

    /// Render back to raw cells in declared column order
    pub fn to_raw_row(&self) -> Vec<String> {
        vec![
            self.product_id.to_string(),
            self.price.to_string(),
            label_cell(&self.goods_group),
            label_cell(&self.manufacturer),
        ]
    }
}

/// An order line with the attributes of its product attached
///
/// The product attributes are `None` when the order references a product
/// that is not in the product table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedRecord {
    pub order_source_id: i64,
    pub order_created_datetime: NaiveDateTime,
    pub customer_id: i64,
    pub status: Option<Category>,
    pub sum: f64,
    pub quantity: i64,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
    pub product_id: ProductId,
    pub price: Option<f64>,
    pub goods_group: Option<Category>,
    pub manufacturer: Option<Category>,
}

impl JoinedRecord {
    /// Output column names, order columns first
    pub const COLUMNS: [&'static str; 13] = [
        "order_source_id",
        "order_created_datetime",
        "customer_id",
        "status",
        "sum",
        "quantity",
        "name",
        "surname",
        "patronymic",
        "product_id",
        "price",
        "goods_group",
        "manufacturer",
    ];

    pub fn new(order: OrderRecord, product: Option<&ProductRecord>) -> Self {
        Self {
            order_source_id: order.order_source_id,
            order_created_datetime: order.order_created_datetime,
            customer_id: order.customer_id,
            status: order.status,
            sum: order.sum,
            quantity: order.quantity,
            name: order.name,
            surname: order.surname,
            patronymic: order.patronymic,
            product_id: order.product_id,
            price: product.map(|p| p.price),
            goods_group: product.and_then(|p| p.goods_group.clone()),
            manufacturer: product.and_then(|p| p.manufacturer.clone()),
        }
    }

    /// Whether a product was found for this order
    pub fn is_matched(&self) -> bool {
        self.price.is_some()
    }
}

fn label_cell(value: &Option<Category>) -> String {
    value.as_ref().map(|c| c.as_str().to_string()).unwrap_or_default()
}

fn text_cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interner_shares_labels() {
        let mut interner = CategoryInterner::new();
        let a = interner.intern("Paid");
        let b = interner.intern("Paid");
        let c = interner.intern("Failed");

        assert_eq!(a, b);
        assert!(Arc::ptr_eq(&a.0, &b.0));
        assert_ne!(a, c);
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn test_category_serializes_as_string() {
        let json = serde_json::to_string(&Category::new("BIC")).unwrap();
        assert_eq!(json, "\"BIC\"");
        let parsed: Category = serde_json::from_str("\"Hama\"").unwrap();
        assert_eq!(parsed.as_str(), "Hama");
    }

    #[test]
    fn test_joined_record_field_order() {
        let order = OrderRecord {
            order_source_id: 111,
            order_created_datetime: NaiveDateTime::parse_from_str(
                "2019-04-28T18:20:05",
                "%Y-%m-%dT%H:%M:%S",
            )
            .unwrap(),
            customer_id: 5375,
            status: Some(Category::new("Paid")),
            sum: 540.0,
            quantity: 12,
            name: Some("olena".to_string()),
            surname: None,
            patronymic: None,
            product_id: 34556,
        };
        let joined = JoinedRecord::new(order, None);
        let value = serde_json::to_value(&joined).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), JoinedRecord::COLUMNS.len());
        for column in JoinedRecord::COLUMNS {
            assert!(object.contains_key(column), "missing {}", column);
        }
        assert!(!joined.is_matched());
        assert!(object["price"].is_null());
    }
}
