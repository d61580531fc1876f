//! Request and response records for the AI endpoints

use serde::{Deserialize, Serialize};

use super::Article;

/// Writing style requested from the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WritingStyle {
    /// News report
    #[default]
    News,
    /// Technology piece
    Tech,
    /// Sports coverage
    Sports,
    /// Popular science
    Science,
    /// Light entertainment
    Entertainment,
}

impl WritingStyle {
    /// All styles
    pub const fn all() -> &'static [Self] {
        &[
            Self::News,
            Self::Tech,
            Self::Sports,
            Self::Science,
            Self::Entertainment,
        ]
    }

    /// Wire name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Tech => "tech",
            Self::Sports => "sports",
            Self::Science => "science",
            Self::Entertainment => "entertainment",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|style| style.name().eq_ignore_ascii_case(s.trim()))
    }
}

/// Target length of a generated article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleLength {
    /// 100-200 words
    Short,
    /// 300-500 words
    #[default]
    Medium,
    /// 500+ words
    Long,
}

impl ArticleLength {
    /// Wire name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    /// Approximate word range shown to the user
    pub const fn word_range(&self) -> &'static str {
        match self {
            Self::Short => "100-200",
            Self::Medium => "300-500",
            Self::Long => "500+",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "short" => Some(Self::Short),
            "medium" => Some(Self::Medium),
            "long" => Some(Self::Long),
            _ => None,
        }
    }
}

/// Body of `POST /ai/generate-article`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Topic to write about (required)
    pub topic: String,
    /// Writing style
    pub style: WritingStyle,
    /// Target length
    pub length: ArticleLength,
    /// Whether to weave the author's location into the text
    #[serde(rename = "includeLocation")]
    pub include_location: bool,
}

impl GenerateRequest {
    /// Request with default style and length
    pub fn new(topic: &str) -> Self {
        Self {
            topic: topic.to_string(),
            style: WritingStyle::default(),
            length: ArticleLength::default(),
            include_location: false,
        }
    }
}

/// Response of `POST /ai/generate-article`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArticle {
    /// Suggested title
    #[serde(default)]
    pub title: Option<String>,
    /// Generated body; absent when generation produced nothing
    #[serde(default)]
    pub content: Option<String>,
    /// Style echoed back by the server
    #[serde(default)]
    pub style: Option<String>,
    /// Length echoed back by the server
    #[serde(default)]
    pub length: Option<String>,
}

/// Body of `POST /ai/analytics`
#[derive(Debug, Serialize)]
pub(crate) struct AnalyticsRequest<'a> {
    pub articles: &'a [Article],
    pub period: &'a str,
}

/// Aggregate numbers inside an analytics report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsStats {
    /// Articles analysed
    #[serde(default)]
    pub total_articles: u64,
    /// Views across all analysed articles
    #[serde(default)]
    pub total_views: u64,
    /// Mean views per article
    #[serde(default)]
    pub avg_views: f64,
}

/// Response of `POST /ai/analytics`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    /// Narrative summary
    pub insights: String,
    /// Suggested next steps
    pub recommendations: String,
    /// Raw numbers
    #[serde(default)]
    pub stats: AnalyticsStats,
}

/// One entry of `GET /ai/recommendations`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Suggested reading
    pub title: String,
    /// Category of the suggestion
    #[serde(default)]
    pub category: Option<String>,
    /// Why it was suggested
    #[serde(default)]
    pub reason: Option<String>,
}
