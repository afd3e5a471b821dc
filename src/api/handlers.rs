use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::{
    Category, ClothingItem, ClothingItemUpdate, ItemAttributes, NewClothingItem, Outfit,
    OutfitFeedback, OutfitView,
};

use super::AppState;

// Request types

#[derive(Debug, Default, Deserialize)]
pub struct ListItemsQuery {
    pub category: Option<String>,
}

impl ListItemsQuery {
    /// `all` or a missing value means no filter
    fn category(&self) -> AppResult<Option<Category>> {
        match self.category.as_deref() {
            None | Some("") | Some("all") => Ok(None),
            Some(raw) => raw.parse().map(Some),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateOutfitRequest {
    pub style: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

fn item_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Clothing item {} not found", id))
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "wardrobe-api" }))
}

/// List wardrobe items, newest first
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ListItemsQuery>,
) -> AppResult<Json<Vec<ClothingItem>>> {
    let items = state.wardrobe.list_items_filtered(query.category()?).await?;
    Ok(Json(items))
}

/// Add an item to the wardrobe
pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<NewClothingItem>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ClothingItem>)> {
    let Json(request) = payload?;
    let item = state.wardrobe.create_item(request).await?;
    tracing::info!(item_id = item.id, category = %item.category, "Clothing item created");
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ClothingItem>> {
    state
        .wardrobe
        .fetch_item_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| item_not_found(id))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<ClothingItemUpdate>, JsonRejection>,
) -> AppResult<Json<ClothingItem>> {
    let Json(update) = payload?;
    state
        .wardrobe
        .update_item(id, update)
        .await?
        .map(Json)
        .ok_or_else(|| item_not_found(id))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    if !state.wardrobe.delete_item(id).await? {
        return Err(item_not_found(id));
    }
    tracing::info!(item_id = id, "Clothing item deleted");
    Ok(Json(json!({ "message": "Item deleted" })))
}

/// Forward a raw clothing photo to the attribute extractor
pub async fn process_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<ItemAttributes>> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    tracing::debug!(
        extractor = state.attributes.name(),
        bytes = body.len(),
        "Processing clothing image"
    );

    let attributes = state.attributes.extract(body, content_type).await?;
    Ok(Json(attributes))
}

/// Today's outfit, generated on the first request of the day
pub async fn todays_outfit(State(state): State<AppState>) -> AppResult<Json<OutfitView>> {
    let outfit = state.outfits.todays_outfit().await?;
    Ok(Json(outfit))
}

/// Always generates and records a fresh outfit
pub async fn generate_outfit(
    State(state): State<AppState>,
    request: Option<Json<GenerateOutfitRequest>>,
) -> AppResult<Json<OutfitView>> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let outfit = state.outfits.generate_outfit(request.style.as_deref()).await?;
    Ok(Json(outfit))
}

pub async fn outfit_feedback(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<OutfitFeedback>, JsonRejection>,
) -> AppResult<Json<Outfit>> {
    let Json(feedback) = payload?;
    let outfit = state.outfits.record_feedback(id, feedback).await?;
    Ok(Json(outfit))
}

pub async fn outfit_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Vec<Outfit>>> {
    let outfits = state.outfits.history(query.limit).await?;
    Ok(Json(outfits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_filter_all_means_unfiltered() {
        let query = ListItemsQuery {
            category: Some("all".to_string()),
        };
        assert_eq!(query.category().unwrap(), None);
        assert_eq!(ListItemsQuery::default().category().unwrap(), None);
    }

    #[test]
    fn test_category_filter_parses_known_category() {
        let query = ListItemsQuery {
            category: Some("shoes".to_string()),
        };
        assert_eq!(query.category().unwrap(), Some(Category::Shoes));
    }

    #[test]
    fn test_category_filter_rejects_unknown_category() {
        let query = ListItemsQuery {
            category: Some("hats".to_string()),
        };
        assert!(matches!(query.category(), Err(AppError::InvalidInput(_))));
    }
}
