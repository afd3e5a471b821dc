use std::collections::HashMap;

use crate::models::{Category, ClothingItem};

/// Wardrobe items grouped by category.
///
/// Categories with no items have no entry; [`WardrobeIndex::pool`] returns an
/// empty slice for them so callers never distinguish missing from empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WardrobeIndex {
    by_category: HashMap<Category, Vec<ClothingItem>>,
}

impl WardrobeIndex {
    /// Groups items by category, keeping the input order within each group
    pub fn from_items(items: impl IntoIterator<Item = ClothingItem>) -> Self {
        let mut by_category: HashMap<Category, Vec<ClothingItem>> = HashMap::new();
        for item in items {
            by_category.entry(item.category).or_default().push(item);
        }
        Self { by_category }
    }

    pub fn pool(&self, category: Category) -> &[ClothingItem] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has(&self, category: Category) -> bool {
        !self.pool(category).is_empty()
    }
}
