use crate::record::{ProductId, ProductRecord};
use ahash::AHashMap;

/// Deduplicated products indexed by id
///
/// Immutable once built; share it as `Arc<ProductTable>` between the joiner,
/// scorers and request handlers.
#[derive(Debug, Clone, Default)]
pub struct ProductTable {
    products: Vec<ProductRecord>,
    index: AHashMap<ProductId, usize>,
}

impl ProductTable {
    /// Build a table from products, keeping the first row for each id
    pub fn new(products: Vec<ProductRecord>) -> Self {
        let products = crate::dedup::dedup_products(products);
        let index = products
            .iter()
            .enumerate()
            .map(|(i, p)| (p.product_id, i))
            .collect();
        Self { products, index }
    }

    pub fn get(&self, id: ProductId) -> Option<&ProductRecord> {
        self.index.get(&id).map(|&i| &self.products[i])
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products in load order
    pub fn iter(&self) -> impl Iterator<Item = &ProductRecord> {
        self.products.iter()
    }
}

impl FromIterator<ProductRecord> for ProductTable {
    fn from_iter<I: IntoIterator<Item = ProductRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
