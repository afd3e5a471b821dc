use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;
use thiserror::Error;

use super::index::WardrobeIndex;
use super::rules;
use super::selector::{select_item, select_matching_item};
use crate::models::{Category, ClothingItem, OutfitDraft, OutfitSlots, Slot, DEFAULT_STYLE};

/// Chance of adding a layer when the wardrobe has one
pub const LAYER_PROBABILITY: f64 = 0.5;

/// Chance of adding an accessory when the wardrobe has one
pub const ACCESSORY_PROBABILITY: f64 = 0.3;

/// Error types for outfit composition
#[derive(Debug, Error)]
pub enum OutfitError {
    #[error("Not enough items in wardrobe: at least one top and one bottom are required")]
    InsufficientWardrobe,
    #[error("No candidates to select from")]
    EmptyCandidatePool,
}

/// An outfit chosen from the wardrobe but not yet persisted
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedOutfit {
    pub draft: OutfitDraft,
    pub items: BTreeMap<Slot, ClothingItem>,
}

/// Builds an outfit slot by slot: top, bottom, shoes, then the optional layer
/// and accessory.
///
/// Shoes are added whenever the wardrobe has any. Layers and accessories are
/// each added at random, and only when their pool is non-empty.
pub fn compose_outfit<R>(
    index: &WardrobeIndex,
    style_preference: Option<&str>,
    date: NaiveDate,
    rng: &mut R,
) -> Result<ComposedOutfit, OutfitError>
where
    R: Rng + ?Sized,
{
    if !index.has(Category::Tops) || !index.has(Category::Bottoms) {
        return Err(OutfitError::InsufficientWardrobe);
    }

    let style_preference = style_preference.filter(|style| !style.is_empty());

    // Slot order here also decides style tie-breaks
    let mut picks: Vec<(Slot, &ClothingItem)> = Vec::with_capacity(5);

    let top = select_item(index.pool(Category::Tops), style_preference, rng)?;
    picks.push((Slot::Top, top));

    let bottom = select_matching_item(
        index.pool(Category::Bottoms),
        top,
        style_preference,
        None,
        rng,
    )?;
    picks.push((Slot::Bottom, bottom));

    let shoes_pool = index.pool(Category::Shoes);
    if !shoes_pool.is_empty() {
        let shoes = select_matching_item(shoes_pool, top, style_preference, Some(bottom), rng)?;
        picks.push((Slot::Shoes, shoes));
    }

    let layers_pool = index.pool(Category::Layers);
    if !layers_pool.is_empty() && rng.gen_bool(LAYER_PROBABILITY) {
        let layer = select_matching_item(layers_pool, top, style_preference, None, rng)?;
        picks.push((Slot::Layer, layer));
    }

    let accessories_pool = index.pool(Category::Accessories);
    if !accessories_pool.is_empty() && rng.gen_bool(ACCESSORY_PROBABILITY) {
        let accessory = accessories_pool
            .choose(rng)
            .ok_or(OutfitError::EmptyCandidatePool)?;
        picks.push((Slot::Accessory, accessory));
    }

    let overall_style = dominant_style(picks.iter().map(|(_, item)| *item));
    let description = rules::style_descriptions(&overall_style)
        .choose(rng)
        .copied()
        .unwrap_or_default();

    let slot_id = |slot: Slot| {
        picks
            .iter()
            .find(|(picked, _)| *picked == slot)
            .map(|(_, item)| item.id)
    };

    let draft = OutfitDraft {
        name: format!("Outfit {}", date.format("%m/%d")),
        style_tag: rules::style_tag(&overall_style).to_string(),
        description: description.to_string(),
        slots: OutfitSlots {
            top_id: top.id,
            bottom_id: bottom.id,
            layer_id: slot_id(Slot::Layer),
            shoes_id: slot_id(Slot::Shoes),
            accessory_id: slot_id(Slot::Accessory),
        },
    };

    let items = picks
        .into_iter()
        .map(|(slot, item)| (slot, item.clone()))
        .collect();

    Ok(ComposedOutfit { draft, items })
}

/// Most frequent style among the items; the earliest seen wins a tie.
/// Items without a style are skipped, and casual is used when none have one.
pub fn dominant_style<'a>(items: impl IntoIterator<Item = &'a ClothingItem>) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for style in items
        .into_iter()
        .filter_map(|item| item.style.as_deref())
        .filter(|style| !style.is_empty())
    {
        match counts.iter_mut().find(|(seen, _)| *seen == style) {
            Some((_, count)) => *count += 1,
            None => counts.push((style, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (style, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((style, count));
        }
    }

    best.map(|(style, _)| style)
        .unwrap_or(DEFAULT_STYLE)
        .to_string()
}
