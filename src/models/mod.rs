//! Data models for Newsroom

mod ai;
mod article;
mod comment;
mod user;
pub mod wire;

pub(crate) use ai::AnalyticsRequest;
pub use ai::{
    AnalyticsReport, AnalyticsStats, ArticleLength, GenerateRequest, GeneratedArticle,
    Recommendation, WritingStyle,
};
pub use article::{Article, ArticleDraft, ArticleSort, CATEGORIES, DEFAULT_CATEGORY, PhotoUpload};
pub use comment::{Comment, Like, LikeToggle, sort_chronologically};
pub(crate) use user::{LoginRequest, RegisterRequest};
pub use user::{AuthResponse, ProfileStats, ProfileUpdate, User};

use serde::{Deserialize, Serialize};

/// Generic `{message}` acknowledgement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Server message
    #[serde(default)]
    pub message: String,
}

/// `{message, article}` envelope returned by create/update
#[derive(Debug, Deserialize)]
pub(crate) struct ArticleEnvelope {
    pub article: Article,
}

/// `{message, comment}` envelope returned by add comment
#[derive(Debug, Deserialize)]
pub(crate) struct CommentEnvelope {
    pub comment: Comment,
}

/// `{message, user}` envelope returned by profile update
#[derive(Debug, Deserialize)]
pub(crate) struct UserEnvelope {
    pub user: User,
}
