use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::store::{OutfitStore, WardrobeStore};
use crate::{
    error::AppResult,
    models::{
        Category, ClothingItem, ClothingItemUpdate, NewClothingItem, Outfit, OutfitDraft,
        OutfitFeedback,
    },
};

/// Process-local wardrobe and outfit store
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    items: BTreeMap<i64, ClothingItem>,
    outfits: BTreeMap<i64, Outfit>,
    last_item_id: i64,
    last_outfit_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with items, keeping their ids
    pub fn with_items(items: impl IntoIterator<Item = ClothingItem>) -> Self {
        let mut inner = MemoryStoreInner::default();
        for item in items {
            inner.last_item_id = inner.last_item_id.max(item.id);
            inner.items.insert(item.id, item);
        }
        Self {
            inner: RwLock::new(inner),
        }
    }

    /// Stores an outfit with an explicit creation time
    pub async fn insert_outfit(&self, draft: OutfitDraft, created_at: DateTime<Utc>) -> Outfit {
        let mut inner = self.inner.write().await;
        inner.last_outfit_id += 1;
        let outfit = Outfit::from_draft(inner.last_outfit_id, draft, created_at);
        inner.outfits.insert(outfit.id, outfit.clone());
        outfit
    }

    pub async fn outfit_count(&self) -> usize {
        self.inner.read().await.outfits.len()
    }
}

#[async_trait]
impl WardrobeStore for MemoryStore {
    async fn list_items(&self) -> AppResult<Vec<ClothingItem>> {
        Ok(self.inner.read().await.items.values().cloned().collect())
    }

    async fn list_items_filtered(&self, category: Option<Category>) -> AppResult<Vec<ClothingItem>> {
        let inner = self.inner.read().await;
        let mut items: Vec<ClothingItem> = inner
            .items
            .values()
            .filter(|item| category.map_or(true, |c| item.category == c))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    async fn fetch_item_by_id(&self, id: i64) -> AppResult<Option<ClothingItem>> {
        Ok(self.inner.read().await.items.get(&id).cloned())
    }

    async fn create_item(&self, new_item: NewClothingItem) -> AppResult<ClothingItem> {
        let mut inner = self.inner.write().await;
        inner.last_item_id += 1;
        let item = ClothingItem {
            id: inner.last_item_id,
            name: new_item.name,
            category: new_item.category,
            primary_color: new_item.primary_color,
            secondary_color: new_item.secondary_color,
            style: new_item.style,
            season: new_item.season,
            image_path: new_item.image_path,
            is_favorite: false,
            created_at: Utc::now(),
            last_worn: None,
            wear_count: 0,
        };
        inner.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update_item(&self, id: i64, update: ClothingItemUpdate) -> AppResult<Option<ClothingItem>> {
        let mut inner = self.inner.write().await;
        Ok(inner.items.get_mut(&id).map(|item| {
            update.apply(item);
            item.clone()
        }))
    }

    async fn delete_item(&self, id: i64) -> AppResult<bool> {
        Ok(self.inner.write().await.items.remove(&id).is_some())
    }
}

#[async_trait]
impl OutfitStore for MemoryStore {
    async fn save_outfit(&self, draft: OutfitDraft) -> AppResult<Outfit> {
        Ok(self.insert_outfit(draft, Utc::now()).await)
    }

    async fn find_outfit_created_on_or_after(&self, since: DateTime<Utc>) -> AppResult<Option<Outfit>> {
        let inner = self.inner.read().await;
        Ok(inner
            .outfits
            .values()
            .filter(|outfit| outfit.created_at >= since)
            .min_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
            .cloned())
    }

    async fn update_feedback(&self, id: i64, feedback: OutfitFeedback) -> AppResult<Option<Outfit>> {
        let mut inner = self.inner.write().await;
        Ok(inner.outfits.get_mut(&id).map(|outfit| {
            feedback.apply(outfit);
            outfit.clone()
        }))
    }

    async fn recent_outfits(&self, limit: usize) -> AppResult<Vec<Outfit>> {
        let inner = self.inner.read().await;
        let mut outfits: Vec<Outfit> = inner.outfits.values().cloned().collect();
        outfits.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        outfits.truncate(limit);
        Ok(outfits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OutfitSlots;
    use chrono::Duration;

    fn draft() -> OutfitDraft {
        OutfitDraft {
            name: "Outfit 01/01".to_string(),
            style_tag: "Clean Casual".to_string(),
            description: "simple and clean look".to_string(),
            slots: OutfitSlots {
                top_id: 1,
                bottom_id: 2,
                layer_id: None,
                shoes_id: None,
                accessory_id: None,
            },
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        tokio_test::block_on(async {
            let store = MemoryStore::new();
            let first = store.create_item(NewClothingItem::default()).await.unwrap();
            let second = store.create_item(NewClothingItem::default()).await.unwrap();
            assert_eq!(first.id, 1);
            assert_eq!(second.id, 2);
            assert_eq!(first.wear_count, 0);
        });
    }

    #[test]
    fn test_list_by_category_omits_empty_categories() {
        tokio_test::block_on(async {
            let store = MemoryStore::new();
            store
                .create_item(NewClothingItem {
                    category: Category::Shoes,
                    ..Default::default()
                })
                .await
                .unwrap();

            let index = store.list_items_by_category().await.unwrap();
            assert!(index.has(Category::Shoes));
            assert!(!index.has(Category::Tops));
        });
    }

    #[test]
    fn test_update_and_delete_unknown_item() {
        tokio_test::block_on(async {
            let store = MemoryStore::new();
            let updated = store
                .update_item(9, ClothingItemUpdate::default())
                .await
                .unwrap();
            assert!(updated.is_none());
            assert!(!store.delete_item(9).await.unwrap());
        });
    }

    #[tokio::test]
    async fn test_find_returns_earliest_outfit_since() {
        let store = MemoryStore::new();
        let start = Utc::now() - Duration::hours(3);
        store.insert_outfit(draft(), start - Duration::minutes(1)).await;
        let first_today = store.insert_outfit(draft(), start + Duration::minutes(5)).await;
        store.insert_outfit(draft(), start + Duration::minutes(50)).await;

        let found = store.find_outfit_created_on_or_after(start).await.unwrap();
        assert_eq!(found.map(|o| o.id), Some(first_today.id));
    }

    #[tokio::test]
    async fn test_feedback_updates_flags() {
        let store = MemoryStore::new();
        let outfit = store.save_outfit(draft()).await.unwrap();

        let updated = store
            .update_feedback(
                outfit.id,
                OutfitFeedback {
                    liked: None,
                    saved: Some(true),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert!(updated.is_saved);
        assert!(!updated.is_liked);
        assert_eq!(store.recent_outfits(1).await.unwrap(), vec![updated]);
    }
}
