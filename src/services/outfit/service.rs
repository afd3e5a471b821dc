use chrono::{DateTime, NaiveTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::composer::compose_outfit;
use crate::{
    db::{OutfitStore, WardrobeStore},
    error::{AppError, AppResult},
    models::{Outfit, OutfitFeedback, OutfitView},
};

pub const DEFAULT_HISTORY_LIMIT: usize = 20;
pub const MAX_HISTORY_LIMIT: usize = 100;

/// Generates outfits from the wardrobe store and records them in the outfit store
pub struct OutfitService {
    wardrobe: Arc<dyn WardrobeStore>,
    outfits: Arc<dyn OutfitStore>,
    rng: Mutex<StdRng>,
}

impl OutfitService {
    pub fn new(wardrobe: Arc<dyn WardrobeStore>, outfits: Arc<dyn OutfitStore>) -> Self {
        Self::with_rng(wardrobe, outfits, StdRng::from_entropy())
    }

    /// Creates a service drawing from the given random source
    pub fn with_rng(
        wardrobe: Arc<dyn WardrobeStore>,
        outfits: Arc<dyn OutfitStore>,
        rng: StdRng,
    ) -> Self {
        Self {
            wardrobe,
            outfits,
            rng: Mutex::new(rng),
        }
    }

    /// Returns the outfit already created today, or generates one
    pub async fn todays_outfit(&self) -> AppResult<OutfitView> {
        self.todays_outfit_at(Utc::now()).await
    }

    pub async fn todays_outfit_at(&self, now: DateTime<Utc>) -> AppResult<OutfitView> {
        let start_of_day = now.date_naive().and_time(NaiveTime::MIN).and_utc();

        if let Some(existing) = self
            .outfits
            .find_outfit_created_on_or_after(start_of_day)
            .await?
        {
            tracing::debug!(outfit_id = existing.id, "Reusing today's outfit");
            return self.view(existing).await;
        }

        tracing::debug!(since = %start_of_day, "No outfit yet today, generating one");
        self.generate_outfit_at(None, now).await
    }

    /// Always composes and stores a new outfit
    pub async fn generate_outfit(&self, style_preference: Option<&str>) -> AppResult<OutfitView> {
        self.generate_outfit_at(style_preference, Utc::now()).await
    }

    async fn generate_outfit_at(
        &self,
        style_preference: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<OutfitView> {
        let index = self.wardrobe.list_items_by_category().await?;

        let composed = {
            let mut rng = self.rng.lock().await;
            compose_outfit(&index, style_preference, now.date_naive(), &mut *rng)?
        };

        let outfit = self.outfits.save_outfit(composed.draft).await?;

        tracing::info!(
            outfit_id = outfit.id,
            style_tag = %outfit.style_tag,
            slots = composed.items.len(),
            style_preference = style_preference.unwrap_or("none"),
            "Generated outfit"
        );

        Ok(OutfitView::new(outfit, composed.items))
    }

    /// Rebuilds the client view of a stored outfit. Items deleted since the
    /// outfit was created are left out.
    pub async fn view(&self, outfit: Outfit) -> AppResult<OutfitView> {
        let mut items = BTreeMap::new();
        for (slot, item_id) in outfit.slots.occupied() {
            match self.wardrobe.fetch_item_by_id(item_id).await? {
                Some(item) => {
                    items.insert(slot, item);
                }
                None => {
                    tracing::warn!(outfit_id = outfit.id, %slot, item_id, "Outfit item no longer exists");
                }
            }
        }
        Ok(OutfitView::new(outfit, items))
    }

    pub async fn record_feedback(&self, outfit_id: i64, feedback: OutfitFeedback) -> AppResult<Outfit> {
        self.outfits
            .update_feedback(outfit_id, feedback)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Outfit {}", outfit_id)))
    }

    /// Most recent outfits first
    pub async fn history(&self, limit: Option<usize>) -> AppResult<Vec<Outfit>> {
        let limit = limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .min(MAX_HISTORY_LIMIT);
        self.outfits.recent_outfits(limit).await
    }
}
