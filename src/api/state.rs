use std::sync::Arc;

use crate::db::WardrobeStore;
use crate::services::{AttributeExtractor, OutfitService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub wardrobe: Arc<dyn WardrobeStore>,
    pub outfits: Arc<OutfitService>,
    pub attributes: Arc<dyn AttributeExtractor>,
}

impl AppState {
    pub fn new(
        wardrobe: Arc<dyn WardrobeStore>,
        outfits: Arc<OutfitService>,
        attributes: Arc<dyn AttributeExtractor>,
    ) -> Self {
        Self {
            wardrobe,
            outfits,
            attributes,
        }
    }
}
