use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::{make_span_with_request_id, request_id_middleware};

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        // Outermost so the trace span can read the request id
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Wardrobe
        .route(
            "/wardrobe",
            get(handlers::list_items).post(handlers::create_item),
        )
        .route(
            "/wardrobe/:id",
            get(handlers::get_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item),
        )
        .route("/process-image", post(handlers::process_image))
        // Outfits
        .route("/outfit/today", get(handlers::todays_outfit))
        .route("/outfit/generate", post(handlers::generate_outfit))
        .route("/outfit/history", get(handlers::outfit_history))
        .route("/outfit/:id/feedback", post(handlers::outfit_feedback))
}
