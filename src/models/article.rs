//! Article model and the draft shape used to create/update articles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::wire;

/// Category assigned by the backend when a draft omits one
pub const DEFAULT_CATEGORY: &str = "general";

/// Categories offered when composing an article (value, label)
pub const CATEGORIES: &[(&str, &str)] = &[
    ("news", "News"),
    ("tech", "Technology"),
    ("sports", "Sports"),
    ("entertainment", "Entertainment"),
    ("science", "Science"),
    ("food", "Food"),
    ("health", "Health"),
    ("business", "Business"),
];

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// An article as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Server-assigned numeric ID
    pub id: i64,
    /// Server-assigned unique slug, used in URLs
    pub slug: String,
    /// Headline
    pub title: String,
    /// Body text
    pub content: String,
    /// Category value (see [`CATEGORIES`])
    #[serde(default = "default_category")]
    pub category: String,
    /// Author's user ID
    #[serde(default)]
    pub author_id: Option<i64>,
    /// Author's username (only on list/detail responses)
    #[serde(default)]
    pub author_name: Option<String>,
    /// View counter
    #[serde(default, deserialize_with = "wire::count")]
    pub views: u32,
    /// Number of likes
    #[serde(default, deserialize_with = "wire::count")]
    pub likes_count: u32,
    /// Number of comments
    #[serde(default, deserialize_with = "wire::count")]
    pub comments_count: u32,
    /// Latitude where the article was written
    #[serde(default, deserialize_with = "wire::coordinate")]
    pub location_lat: Option<f64>,
    /// Longitude where the article was written
    #[serde(default, deserialize_with = "wire::coordinate")]
    pub location_lng: Option<f64>,
    /// Photo reference (URL or data URI)
    #[serde(default)]
    pub photo: Option<String>,
    /// When the article was created
    #[serde(default, deserialize_with = "wire::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the article was last edited
    #[serde(default, deserialize_with = "wire::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Author name, or a placeholder when the backend omitted it
    pub fn author(&self) -> &str {
        self.author_name.as_deref().unwrap_or("unknown")
    }

    /// Latitude/longitude pair if both are present
    pub fn location(&self) -> Option<(f64, f64)> {
        self.location_lat.zip(self.location_lng)
    }

    /// Get a short preview of the content (for list display)
    pub fn preview(&self, max_chars: usize) -> String {
        let content = self.content.replace('\n', " ");
        if content.chars().count() <= max_chars {
            content
        } else {
            let cut: String = content.chars().take(max_chars.saturating_sub(3)).collect();
            format!("{cut}...")
        }
    }

    /// Draft pre-filled from this article (for editing)
    pub fn to_draft(&self) -> ArticleDraft {
        ArticleDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            category: self.category.clone(),
            location_lat: self.location_lat,
            location_lng: self.location_lng,
            photo: self.photo.clone(),
        }
    }
}

/// Request body for creating or updating an article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleDraft {
    /// Headline (required)
    pub title: String,
    /// Body text (required)
    pub content: String,
    /// Category value
    pub category: String,
    /// Optional latitude
    pub location_lat: Option<f64>,
    /// Optional longitude
    pub location_lng: Option<f64>,
    /// Optional photo reference
    pub photo: Option<String>,
}

impl ArticleDraft {
    /// Create a draft in the default category
    pub fn new(title: &str, content: &str) -> Self {
        Self {
            title: title.to_string(),
            content: content.to_string(),
            category: default_category(),
            location_lat: None,
            location_lng: None,
            photo: None,
        }
    }

    /// Set the category
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    /// Attach a location
    pub const fn with_location(mut self, lat: f64, lng: f64) -> Self {
        self.location_lat = Some(lat);
        self.location_lng = Some(lng);
        self
    }

    /// Copy with surrounding whitespace removed from title and content
    pub fn trimmed(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            content: self.content.trim().to_string(),
            ..self.clone()
        }
    }

    /// Name of the first required field that is blank
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.title.trim().is_empty() {
            Some("title")
        } else if self.content.trim().is_empty() {
            Some("content")
        } else {
            None
        }
    }
}

/// Binary photo attached to an article upload
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    /// File name reported to the server
    pub file_name: String,
    /// MIME type, e.g. `image/jpeg`
    pub mime_type: String,
    /// Raw image bytes
    pub bytes: Vec<u8>,
}

/// Home-feed sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleSort {
    /// Newest first
    #[default]
    Newest,
    /// Oldest first
    Oldest,
    /// Most viewed first
    MostViews,
    /// Most liked first
    MostLikes,
    /// Most commented first
    MostComments,
}

impl ArticleSort {
    /// All sort orders
    pub const fn all() -> &'static [Self] {
        &[
            Self::Newest,
            Self::Oldest,
            Self::MostViews,
            Self::MostLikes,
            Self::MostComments,
        ]
    }

    /// Wire/config name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::MostViews => "most_views",
            Self::MostLikes => "most_likes",
            Self::MostComments => "most_comments",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "newest" | "new" => Some(Self::Newest),
            "oldest" | "old" => Some(Self::Oldest),
            "most_views" | "views" => Some(Self::MostViews),
            "most_likes" | "likes" => Some(Self::MostLikes),
            "most_comments" | "comments" => Some(Self::MostComments),
            _ => None,
        }
    }
}

impl std::fmt::Display for ArticleSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
