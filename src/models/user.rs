//! User profile and authentication records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::wire;

/// A user profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned ID
    pub id: i64,
    /// Username
    pub username: String,
    /// Email address
    pub email: String,
    /// Role (e.g. `user`, `admin`)
    #[serde(default)]
    pub role: Option<String>,
    /// Avatar reference
    #[serde(default)]
    pub photo: Option<String>,
    /// When the account was created
    #[serde(default, deserialize_with = "wire::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// Articles written (only on `/users/profile`)
    #[serde(default)]
    pub articles_count: Option<u32>,
    /// Likes given (only on `/users/profile`)
    #[serde(default)]
    pub likes_count: Option<u32>,
    /// Comments written (only on `/users/profile`)
    #[serde(default)]
    pub comments_count: Option<u32>,
}

/// Response to login and registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    /// The authenticated user
    pub user: User,
    /// Server message
    #[serde(default)]
    pub message: Option<String>,
}

/// Login request body
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Registration request body
#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Request body for updating the current user's profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New username (required)
    pub username: String,
    /// New email (required)
    pub email: String,
    /// New avatar reference; `None` removes the avatar
    pub photo: Option<String>,
}

impl ProfileUpdate {
    /// Update pre-filled from an existing profile
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            photo: user.photo.clone(),
        }
    }

    /// Name of the first required field that is blank
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.username.trim().is_empty() {
            Some("username")
        } else if self.email.trim().is_empty() {
            Some("email")
        } else {
            None
        }
    }
}

/// Activity counts shown on the profile screen
///
/// Aggregated client-side from list endpoints, so not authoritative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStats {
    /// Articles written
    pub articles: usize,
    /// Likes given
    pub likes: usize,
    /// Comments written
    pub comments: usize,
    /// Articles liked
    pub favorites: usize,
}

impl ProfileStats {
    /// Counts carried by the profile response itself (favorites unknown)
    pub fn from_user(user: &User) -> Self {
        let count = |c: Option<u32>| c.map_or(0, |n| n as usize);
        Self {
            articles: count(user.articles_count),
            likes: count(user.likes_count),
            comments: count(user.comments_count),
            favorites: 0,
        }
    }
}
