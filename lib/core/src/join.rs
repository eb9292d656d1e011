use crate::products::ProductTable;
use crate::record::{JoinedRecord, OrderRecord};
use tracing::debug;

/// Left join orders onto products by product_id
///
/// Every order appears exactly once in the output, in input order. Orders
/// whose product is unknown carry `None` for the product attributes.
pub fn left_join(orders: Vec<OrderRecord>, products: &ProductTable) -> Vec<JoinedRecord> {
    let joined: Vec<JoinedRecord> = orders
        .into_iter()
        .map(|order| {
            let product = products.get(order.product_id);
            JoinedRecord::new(order, product)
        })
        .collect();

    let unmatched = joined.iter().filter(|r| !r.is_matched()).count();
    debug!(rows = joined.len(), unmatched, "joined orders onto products");
    joined
}
