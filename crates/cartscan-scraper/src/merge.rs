//! Cross-platform product identity merging.
//!
//! Identity key = product name lowercased, nothing else. Names differing only
//! by case merge; names differing by punctuation or pluralization do not —
//! a documented limitation of the key, not something to fold away silently.

use std::collections::HashMap;

use cartscan_core::{MergedProduct, RawProduct};

/// Merges raw per-platform records into deduplicated products.
///
/// Records are processed in input order. The first record for a key seeds the
/// merged product (its casing, brand and image win on conflict); later
/// records only append their offers. Duplicate offers from the same platform
/// are preserved as-is. Output keeps first-insertion order.
#[must_use]
pub fn merge(raw_products: Vec<RawProduct>) -> Vec<MergedProduct> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<MergedProduct> = Vec::new();

    for product in raw_products {
        let key = product.product_name.to_lowercase();
        if let Some(&slot) = index.get(&key) {
            merged[slot].platforms.extend(product.platforms);
        } else {
            index.insert(key, merged.len());
            merged.push(MergedProduct::from(product));
        }
    }

    merged
}
