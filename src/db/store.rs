//! Storage abstractions for the wardrobe and generated outfits.
//!
//! The outfit engine only talks to these traits, so the PostgreSQL store can
//! be swapped for the in-memory one in tests or local runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    error::AppResult,
    models::{
        Category, ClothingItem, ClothingItemUpdate, NewClothingItem, Outfit, OutfitDraft,
        OutfitFeedback,
    },
    services::outfit::WardrobeIndex,
};

/// Read and write access to wardrobe items
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WardrobeStore: Send + Sync {
    /// All items, oldest first
    async fn list_items(&self) -> AppResult<Vec<ClothingItem>>;

    /// Items in one category, or all items when `category` is `None`, newest first
    async fn list_items_filtered(&self, category: Option<Category>) -> AppResult<Vec<ClothingItem>>;

    async fn fetch_item_by_id(&self, id: i64) -> AppResult<Option<ClothingItem>>;

    async fn create_item(&self, item: NewClothingItem) -> AppResult<ClothingItem>;

    /// Returns `None` when no item has this id
    async fn update_item(&self, id: i64, update: ClothingItemUpdate) -> AppResult<Option<ClothingItem>>;

    /// Returns whether an item was removed
    async fn delete_item(&self, id: i64) -> AppResult<bool>;

    /// Snapshot of the wardrobe grouped by category
    async fn list_items_by_category(&self) -> AppResult<WardrobeIndex> {
        let items = self.list_items().await?;
        Ok(WardrobeIndex::from_items(items))
    }
}

/// Persistence for generated outfits
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OutfitStore: Send + Sync {
    /// Assigns the id and creation timestamp
    async fn save_outfit(&self, draft: OutfitDraft) -> AppResult<Outfit>;

    /// Earliest outfit created at or after `since`
    async fn find_outfit_created_on_or_after(&self, since: DateTime<Utc>) -> AppResult<Option<Outfit>>;

    /// Returns `None` when no outfit has this id
    async fn update_feedback(&self, id: i64, feedback: OutfitFeedback) -> AppResult<Option<Outfit>>;

    /// Newest first
    async fn recent_outfits(&self, limit: usize) -> AppResult<Vec<Outfit>>;
}
