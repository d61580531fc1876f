//! AI-assisted writing and analytics operations

use super::auth::require;
use super::{ApiClient, ApiError, RequestOptions};
use crate::models::{
    AnalyticsReport, AnalyticsRequest, Article, GenerateRequest, GeneratedArticle, Recommendation,
};

impl ApiClient {
    /// Ask the backend to draft an article (`POST /ai/generate-article`)
    pub async fn generate_article(
        &self,
        request: &GenerateRequest,
    ) -> Result<GeneratedArticle, ApiError> {
        require("topic", &request.topic)?;
        let request = GenerateRequest {
            topic: request.topic.trim().to_string(),
            ..request.clone()
        };
        self.call("/ai/generate-article", RequestOptions::post().json(&request)?)
            .await
    }

    /// Analyse a set of articles over `period` (`POST /ai/analytics`)
    pub async fn analytics(
        &self,
        articles: &[Article],
        period: &str,
    ) -> Result<AnalyticsReport, ApiError> {
        let body = AnalyticsRequest { articles, period };
        self.call("/ai/analytics", RequestOptions::post().json(&body)?)
            .await
    }

    /// Reading suggestions for the current user (`GET /ai/recommendations`)
    pub async fn recommendations(&self) -> Result<Vec<Recommendation>, ApiError> {
        self.call("/ai/recommendations", RequestOptions::get()).await
    }
}
