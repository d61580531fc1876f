//! Current-user activity listings

use super::{ApiClient, ApiError, RequestOptions};
use crate::models::{Article, Comment, Like};

impl ApiClient {
    /// Articles written by the current user
    pub async fn user_articles(&self) -> Result<Vec<Article>, ApiError> {
        self.call("/users/articles", RequestOptions::get()).await
    }

    /// Likes given by the current user
    pub async fn user_likes(&self) -> Result<Vec<Like>, ApiError> {
        self.call("/users/likes", RequestOptions::get()).await
    }

    /// Comments written by the current user
    pub async fn user_comments(&self) -> Result<Vec<Comment>, ApiError> {
        self.call("/users/comments", RequestOptions::get()).await
    }

    /// Articles the current user has liked
    pub async fn favorite_articles(&self) -> Result<Vec<Article>, ApiError> {
        self.call("/users/favorites", RequestOptions::get()).await
    }

    /// Server-side statistics for a user (`GET /users/{id}/statistics`)
    pub async fn user_statistics(&self, user_id: i64) -> Result<serde_json::Value, ApiError> {
        self.call(&format!("/users/{user_id}/statistics"), RequestOptions::get())
            .await
    }
}
