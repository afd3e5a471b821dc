use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

use super::ClothingItem;

/// Named position in an outfit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Top,
    Bottom,
    Layer,
    Shoes,
    Accessory,
}

impl Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Slot::Top => "top",
            Slot::Bottom => "bottom",
            Slot::Layer => "layer",
            Slot::Shoes => "shoes",
            Slot::Accessory => "accessory",
        };
        write!(f, "{}", name)
    }
}

/// Item ids per slot. Top and bottom are always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitSlots {
    pub top_id: i64,
    pub bottom_id: i64,
    pub layer_id: Option<i64>,
    pub shoes_id: Option<i64>,
    pub accessory_id: Option<i64>,
}

impl OutfitSlots {
    /// Occupied slots with their item ids
    pub fn occupied(&self) -> Vec<(Slot, i64)> {
        let mut slots = vec![(Slot::Top, self.top_id), (Slot::Bottom, self.bottom_id)];
        slots.extend(self.layer_id.map(|id| (Slot::Layer, id)));
        slots.extend(self.shoes_id.map(|id| (Slot::Shoes, id)));
        slots.extend(self.accessory_id.map(|id| (Slot::Accessory, id)));
        slots
    }
}

/// An outfit ready to be persisted; the store assigns id and timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct OutfitDraft {
    pub name: String,
    pub style_tag: String,
    pub description: String,
    pub slots: OutfitSlots,
}

/// A persisted outfit record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outfit {
    pub id: i64,
    pub name: String,
    pub style_tag: String,
    pub description: String,
    #[serde(flatten)]
    pub slots: OutfitSlots,
    pub created_at: DateTime<Utc>,
    pub is_liked: bool,
    pub is_saved: bool,
}

impl Outfit {
    pub fn from_draft(id: i64, draft: OutfitDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            style_tag: draft.style_tag,
            description: draft.description,
            slots: draft.slots,
            created_at,
            is_liked: false,
            is_saved: false,
        }
    }
}

/// Outfit returned to clients, with the full item for every occupied slot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitView {
    pub id: i64,
    pub name: String,
    pub style_tag: String,
    pub description: String,
    pub items: BTreeMap<Slot, ClothingItem>,
    pub created_at: DateTime<Utc>,
    pub is_liked: bool,
    pub is_saved: bool,
}

impl OutfitView {
    pub fn new(outfit: Outfit, items: BTreeMap<Slot, ClothingItem>) -> Self {
        Self {
            id: outfit.id,
            name: outfit.name,
            style_tag: outfit.style_tag,
            description: outfit.description,
            items,
            created_at: outfit.created_at,
            is_liked: outfit.is_liked,
            is_saved: outfit.is_saved,
        }
    }
}

/// Liked/saved flags supplied by the feedback endpoint
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct OutfitFeedback {
    pub liked: Option<bool>,
    pub saved: Option<bool>,
}

impl OutfitFeedback {
    pub fn apply(self, outfit: &mut Outfit) {
        if let Some(liked) = self.liked {
            outfit.is_liked = liked;
        }
        if let Some(saved) = self.saved {
            outfit.is_saved = saved;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots() -> OutfitSlots {
        OutfitSlots {
            top_id: 1,
            bottom_id: 2,
            layer_id: None,
            shoes_id: Some(3),
            accessory_id: None,
        }
    }

    #[test]
    fn test_occupied_skips_empty_slots() {
        let occupied = slots().occupied();
        assert_eq!(
            occupied,
            vec![(Slot::Top, 1), (Slot::Bottom, 2), (Slot::Shoes, 3)]
        );
    }

    #[test]
    fn test_outfit_serializes_flat_slot_ids() {
        let draft = OutfitDraft {
            name: "Outfit 10/19".to_string(),
            style_tag: "Clean Casual".to_string(),
            description: "simple and clean look".to_string(),
            slots: slots(),
        };
        let outfit = Outfit::from_draft(7, draft, Utc::now());
        let json = serde_json::to_value(&outfit).unwrap();
        assert_eq!(json["topId"], 1);
        assert_eq!(json["shoesId"], 3);
        assert!(json["layerId"].is_null());
        assert_eq!(json["styleTag"], "Clean Casual");
        assert_eq!(json["isLiked"], false);
    }

    #[test]
    fn test_feedback_applies_only_supplied_flags() {
        let draft = OutfitDraft {
            name: "Outfit".to_string(),
            style_tag: "Active Fit".to_string(),
            description: "athleisure done right".to_string(),
            slots: slots(),
        };
        let mut outfit = Outfit::from_draft(1, draft, Utc::now());
        outfit.is_saved = true;

        OutfitFeedback {
            liked: Some(true),
            saved: None,
        }
        .apply(&mut outfit);

        assert!(outfit.is_liked);
        assert!(outfit.is_saved);
    }
}
