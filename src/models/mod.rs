pub mod outfit;
pub mod wardrobe;

pub use outfit::{Outfit, OutfitDraft, OutfitFeedback, OutfitSlots, OutfitView, Slot};
pub use wardrobe::{
    Category, ClothingItem, ClothingItemUpdate, ItemAttributes, NewClothingItem, DEFAULT_STYLE,
};
