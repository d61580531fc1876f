//! Comment and like records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::wire;

/// A comment on an article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Server-assigned ID
    pub id: i64,
    /// Article the comment belongs to
    #[serde(default)]
    pub article_id: Option<i64>,
    /// Author's user ID
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Author's username (joined on listing endpoints)
    #[serde(default)]
    pub username: Option<String>,
    /// Comment text
    pub text: String,
    /// When the comment was posted
    #[serde(default, deserialize_with = "wire::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// Title of the commented article (only on `/users/comments`)
    #[serde(default, rename = "title")]
    pub article_title: Option<String>,
    /// Slug of the commented article (only on `/users/comments`)
    #[serde(default, rename = "slug")]
    pub article_slug: Option<String>,
}

impl Comment {
    /// Author name, or a placeholder when the backend omitted it
    pub fn author(&self) -> &str {
        self.username.as_deref().unwrap_or("unknown")
    }
}

/// Order comments oldest-first (ties broken by ID)
pub fn sort_chronologically(comments: &mut [Comment]) {
    comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
}

/// A like recorded by the current user (from `/users/likes`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    /// Server-assigned ID
    pub id: i64,
    /// Liked article's ID
    #[serde(default)]
    pub article_id: Option<i64>,
    /// Liked article's title
    #[serde(default)]
    pub title: Option<String>,
    /// Liked article's slug
    #[serde(default)]
    pub slug: Option<String>,
    /// When the like was recorded
    #[serde(default, deserialize_with = "wire::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Result of toggling a like
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeToggle {
    /// Server message ("like added" / "like removed")
    #[serde(default)]
    pub message: Option<String>,
    /// Like count after the toggle
    pub likes_count: u32,
}
