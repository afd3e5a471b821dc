//! Outfit composition: compatibility rules, item selectors, the slot-by-slot
//! composer, and the service that persists outfits and serves today's pick.

pub mod composer;
pub mod index;
pub mod rules;
pub mod selector;
pub mod service;

pub use composer::{compose_outfit, dominant_style, ComposedOutfit, OutfitError};
pub use index::WardrobeIndex;
pub use selector::{pick_from_top, score_candidate, select_item, select_matching_item};
pub use service::{OutfitService, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT};
