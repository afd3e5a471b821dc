//! Client for the external image analysis service.
//!
//! The service removes the background, classifies the category and clusters
//! the dominant colors of a clothing photo. This crate only forwards the image
//! and caches the finished attribute record.

use axum::body::Bytes;
use reqwest::Client as HttpClient;

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::ItemAttributes,
};

const ATTRIBUTE_CACHE_TTL: u64 = 604800; // 1 week

/// Produces an attribute record for a clothing photo
#[async_trait::async_trait]
pub trait AttributeExtractor: Send + Sync {
    async fn extract(&self, image: Bytes, content_type: Option<String>) -> AppResult<ItemAttributes>;

    /// Extractor name for logging
    fn name(&self) -> &'static str;
}

/// Extractor that calls the image analysis HTTP service
pub struct RemoteAttributeExtractor {
    http_client: HttpClient,
    api_url: String,
    cache: Option<Cache>,
}

impl RemoteAttributeExtractor {
    pub fn new(api_url: String, cache: Option<Cache>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            cache,
        }
    }

    async fn call_api(&self, image: Bytes, content_type: Option<String>) -> AppResult<ItemAttributes> {
        let url = format!("{}/analyze", self.api_url);

        let mut request = self.http_client.post(&url).body(image);
        if let Some(content_type) = content_type {
            request = request.header(reqwest::header::CONTENT_TYPE, content_type);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %body, "Image analysis request failed");
            return Err(AppError::ExternalApi(format!(
                "Image analysis service returned {}",
                status
            )));
        }

        let attributes: ItemAttributes = response.json().await.map_err(|e| {
            AppError::ExternalApi(format!("Invalid image analysis response: {}", e))
        })?;

        tracing::info!(
            category = %attributes.category,
            primary_color = attributes.primary_color.as_deref().unwrap_or("unknown"),
            "Extracted item attributes"
        );

        Ok(attributes)
    }
}

#[async_trait::async_trait]
impl AttributeExtractor for RemoteAttributeExtractor {
    async fn extract(&self, image: Bytes, content_type: Option<String>) -> AppResult<ItemAttributes> {
        if image.is_empty() {
            return Err(AppError::InvalidInput("No image provided".to_string()));
        }

        match &self.cache {
            Some(cache) => {
                let attributes: AppResult<ItemAttributes> = cached!(
                    cache,
                    CacheKey::for_image(&image),
                    ATTRIBUTE_CACHE_TTL,
                    self.call_api(image.clone(), content_type)
                );
                attributes
            }
            None => self.call_api(image, content_type).await,
        }
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::json;

    async fn spawn_analyzer(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_extract_decodes_attribute_record() {
        let router = Router::new().route(
            "/analyze",
            post(|body: Bytes| async move {
                assert_eq!(&body[..], b"fake-jpeg");
                Json(json!({
                    "category": "shoes",
                    "primaryColor": "white",
                    "secondaryColor": "gray",
                    "style": "sporty",
                    "season": "all-season",
                    "tags": ["sneaker"],
                    "imagePath": "uploads/abc.png"
                }))
            }),
        );
        let url = spawn_analyzer(router).await;

        let extractor = RemoteAttributeExtractor::new(format!("{}/", url), None);
        let attributes = extractor
            .extract(Bytes::from_static(b"fake-jpeg"), Some("image/jpeg".to_string()))
            .await
            .unwrap();

        assert_eq!(attributes.category, Category::Shoes);
        assert_eq!(attributes.primary_color.as_deref(), Some("white"));
        assert_eq!(attributes.tags, vec!["sneaker".to_string()]);
    }

    #[tokio::test]
    async fn test_extract_maps_service_failure() {
        let router = Router::new().route(
            "/analyze",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model not loaded") }),
        );
        let url = spawn_analyzer(router).await;

        let extractor = RemoteAttributeExtractor::new(url, None);
        let result = extractor.extract(Bytes::from_static(b"img"), None).await;

        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }

    #[tokio::test]
    async fn test_extract_rejects_empty_image() {
        let extractor = RemoteAttributeExtractor::new("http://127.0.0.1:9".to_string(), None);
        let result = extractor.extract(Bytes::new(), None).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
