use crate::record::{OrderRecord, ProductRecord};
use ahash::AHashSet;
use std::hash::Hash;

/// Keep the first row for every key, in original order
pub fn dedup_by_key<T, K, F>(rows: Vec<T>, key: F) -> Vec<T>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut seen = AHashSet::with_capacity(rows.len());
    rows.into_iter().filter(|row| seen.insert(key(row))).collect()
}

/// Orders are unique per (order_source_id, product_id)
pub fn dedup_orders(orders: Vec<OrderRecord>) -> Vec<OrderRecord> {
    dedup_by_key(orders, |o| (o.order_source_id, o.product_id))
}

/// Products are unique per product_id
pub fn dedup_products(products: Vec<ProductRecord>) -> Vec<ProductRecord> {
    dedup_by_key(products, |p| p.product_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_first_occurrence() {
        let rows = vec![(1, "a"), (2, "b"), (1, "c"), (3, "d"), (2, "e")];
        let deduped = dedup_by_key(rows, |r| r.0);
        assert_eq!(deduped, vec![(1, "a"), (2, "b"), (3, "d")]);
    }

    #[test]
    fn test_tuple_key() {
        let rows = vec![(1, 10, "a"), (1, 11, "b"), (1, 10, "c"), (2, 10, "d")];
        let deduped = dedup_by_key(rows, |r| (r.0, r.1));
        assert_eq!(deduped, vec![(1, 10, "a"), (1, 11, "b"), (2, 10, "d")]);
    }

    #[test]
    fn test_dedup_products() {
        let products = vec![
            ProductRecord::new(1, 10.0, "A", "X"),
            ProductRecord::new(1, 99.0, "B", "Y"),
            ProductRecord::new(2, 20.0, "A", "X"),
        ];
        let deduped = dedup_products(products);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].price, 10.0);
    }

    #[test]
    fn test_empty_input() {
        let rows: Vec<(i32, i32)> = Vec::new();
        assert!(dedup_by_key(rows, |r| r.0).is_empty());
    }
}
