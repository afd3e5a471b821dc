use rand::seq::SliceRandom;
use rand::Rng;

use super::rules;
use super::OutfitError;
use crate::models::ClothingItem;

/// How many of the best-ranked candidates are eligible for the random draw
pub const SAMPLE_POOL_SIZE: usize = 3;

const NEUTRAL_CANDIDATE_SCORE: u32 = 3;
const NEUTRAL_REFERENCE_SCORE: u32 = 2;
const COMPLEMENTARY_SCORE: u32 = 4;
const MONOCHROME_SCORE: u32 = 1;
const STYLE_MATCH_SCORE: u32 = 2;
const PREFERENCE_SCORE: u32 = 1;
const LOW_WEAR_SCORE: u32 = 1;
const FRESH_ITEM_SCORE: u32 = 2;
const LOW_WEAR_THRESHOLD: u32 = 3;

/// Picks uniformly among the first `pool_size` entries of an already ranked list
pub fn pick_from_top<'a, T, R>(ranked: &'a [T], pool_size: usize, rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    let pool = &ranked[..pool_size.min(ranked.len())];
    pool.choose(rng)
}

/// Picks an item with no reference to match against, favoring the preferred
/// style when any candidate has it and otherwise the least worn items.
pub fn select_item<'a, R>(
    candidates: &'a [ClothingItem],
    style_preference: Option<&str>,
    rng: &mut R,
) -> Result<&'a ClothingItem, OutfitError>
where
    R: Rng + ?Sized,
{
    if candidates.is_empty() {
        return Err(OutfitError::EmptyCandidatePool);
    }

    let mut pool: Vec<&ClothingItem> = match style_preference {
        Some(preference) => {
            let matching: Vec<&ClothingItem> = candidates
                .iter()
                .filter(|item| item.style.as_deref() == Some(preference))
                .collect();
            if matching.is_empty() {
                candidates.iter().collect()
            } else {
                matching
            }
        }
        None => candidates.iter().collect(),
    };

    pool.sort_by_key(|item| item.wear_count);

    pick_from_top(&pool, SAMPLE_POOL_SIZE, rng)
        .copied()
        .ok_or(OutfitError::EmptyCandidatePool)
}

/// Harmony score of `candidate` against an already chosen `reference`.
///
/// Deterministic: the same inputs always yield the same score.
pub fn score_candidate(
    candidate: &ClothingItem,
    reference: &ClothingItem,
    style_preference: Option<&str>,
) -> u32 {
    let mut score = color_score(
        &candidate.primary_color_key(),
        &reference.primary_color_key(),
    );

    let candidate_style = candidate.style_or_default();
    if rules::is_style_compatible(reference.style_or_default(), candidate_style) {
        score += STYLE_MATCH_SCORE;
    }

    if style_preference == Some(candidate_style) {
        score += PREFERENCE_SCORE;
    }

    if candidate.wear_count < LOW_WEAR_THRESHOLD {
        score += LOW_WEAR_SCORE;
    }

    if candidate.wear_count == 0 {
        score += FRESH_ITEM_SCORE;
    }

    score
}

/// First matching rule wins; the rules are not additive.
fn color_score(candidate: &str, reference: &str) -> u32 {
    if candidate.is_empty() || reference.is_empty() {
        return 0;
    }

    if rules::is_neutral(candidate) {
        NEUTRAL_CANDIDATE_SCORE
    } else if rules::is_neutral(reference) {
        NEUTRAL_REFERENCE_SCORE
    } else if rules::complements(reference).contains(&candidate) {
        COMPLEMENTARY_SCORE
    } else if candidate == reference {
        MONOCHROME_SCORE
    } else {
        0
    }
}

/// Picks an item that goes with `reference`, sampling among the best scorers.
///
/// `_secondary_reference` is accepted so callers can pass the second item an
/// outfit slot should agree with (shoes against the bottom), but it does not
/// contribute to the score yet.
pub fn select_matching_item<'a, R>(
    candidates: &'a [ClothingItem],
    reference: &ClothingItem,
    style_preference: Option<&str>,
    _secondary_reference: Option<&ClothingItem>,
    rng: &mut R,
) -> Result<&'a ClothingItem, OutfitError>
where
    R: Rng + ?Sized,
{
    if candidates.is_empty() {
        return Err(OutfitError::EmptyCandidatePool);
    }

    let mut scored: Vec<(&ClothingItem, u32)> = candidates
        .iter()
        .map(|item| (item, score_candidate(item, reference, style_preference)))
        .collect();

    // sort_by is stable, so equal scores keep their input order
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    match pick_from_top(&scored, SAMPLE_POOL_SIZE, rng) {
        Some((item, _)) => Ok(*item),
        None => candidates.choose(rng).ok_or(OutfitError::EmptyCandidatePool),
    }
}
