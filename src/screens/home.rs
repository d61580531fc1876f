//! Home feed: all articles with client-side search, filter and sort

use std::cmp::Reverse;

use super::{Applied, Trigger, ViewState};
use crate::api::ApiClient;
use crate::config::Config;
use crate::models::{Article, ArticleSort};

/// Category value meaning "no category filter"
pub const ALL_CATEGORIES: &str = "all";

/// Titles shown when the backend has no recommendations to offer
const FALLBACK_RECOMMENDATIONS: [&str; 3] = [
    "Explore articles about technology",
    "Read the latest science pieces",
    "Catch up on the news",
];

/// Search, category and sort settings for the feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedFilter {
    /// Case-insensitive substring matched against title, content and author
    pub query: String,
    /// Category value, or [`ALL_CATEGORIES`]
    pub category: String,
    /// Sort order
    pub sort: ArticleSort,
}

impl Default for FeedFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: ALL_CATEGORIES.to_string(),
            sort: ArticleSort::default(),
        }
    }
}

impl FeedFilter {
    /// Filter seeded from the configured defaults
    pub fn from_config(config: &Config) -> Self {
        Self {
            category: config.default_category.clone(),
            sort: config.default_sort,
            ..Self::default()
        }
    }

    /// Whether `article` passes the search and category filter
    pub fn matches(&self, article: &Article) -> bool {
        let query = self.query.trim().to_lowercase();
        let matches_query = query.is_empty()
            || article.title.to_lowercase().contains(&query)
            || article.content.to_lowercase().contains(&query)
            || article.author().to_lowercase().contains(&query);
        let matches_category =
            self.category == ALL_CATEGORIES || article.category == self.category;
        matches_query && matches_category
    }

    /// Matching articles in the selected order
    pub fn apply(&self, articles: &[Article]) -> Vec<Article> {
        let mut visible: Vec<Article> = articles
            .iter()
            .filter(|a| self.matches(a))
            .cloned()
            .collect();
        sort_articles(&mut visible, self.sort);
        visible
    }

    /// Number of settings that differ from the defaults
    pub fn active_count(&self) -> usize {
        let defaults = Self::default();
        [
            !self.query.trim().is_empty(),
            self.category != defaults.category,
            self.sort != defaults.sort,
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }

    /// Reset search, category and sort
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Sort `articles` in place; ties keep their original order
pub fn sort_articles(articles: &mut [Article], sort: ArticleSort) {
    match sort {
        ArticleSort::Newest => articles.sort_by_key(|a| Reverse(a.created_at)),
        ArticleSort::Oldest => articles.sort_by_key(|a| a.created_at),
        ArticleSort::MostViews => articles.sort_by_key(|a| Reverse(a.views)),
        ArticleSort::MostLikes => articles.sort_by_key(|a| Reverse(a.likes_count)),
        ArticleSort::MostComments => articles.sort_by_key(|a| Reverse(a.comments_count)),
    }
}

/// State of the home screen
#[derive(Debug, Default)]
pub struct HomeScreen {
    /// All articles as last fetched
    pub articles: ViewState<Vec<Article>>,
    /// Current search/filter/sort
    pub filter: FeedFilter,
}

impl HomeScreen {
    /// Screen with the given filter
    pub fn new(filter: FeedFilter) -> Self {
        Self {
            articles: ViewState::new(),
            filter,
        }
    }

    /// Re-fetch the article list
    pub async fn refresh(&mut self, api: &ApiClient, trigger: Trigger) -> Applied {
        let Some(ticket) = self.articles.begin(trigger) else {
            return Applied::Discarded;
        };
        let result = api.list_articles().await;
        if let Ok(articles) = &result {
            tracing::debug!("Loaded {} articles", articles.len());
        }
        self.articles.apply(ticket, result, api.session())
    }

    /// Articles passing the current filter, in the current order
    pub fn visible(&self) -> Vec<Article> {
        self.articles
            .data()
            .map(|articles| self.filter.apply(articles))
            .unwrap_or_default()
    }

    /// Three recommendation titles, padded with generic suggestions
    ///
    /// Failures are logged and answered with the generic suggestions only.
    pub async fn recommendation_titles(api: &ApiClient) -> Vec<String> {
        let fetched: Vec<String> = match api.recommendations().await {
            Ok(recs) => recs.into_iter().map(|r| r.title).collect(),
            Err(e) => {
                tracing::warn!("Failed to load recommendations: {e}");
                Vec::new()
            }
        };
        FALLBACK_RECOMMENDATIONS
            .iter()
            .enumerate()
            .map(|(i, fallback)| {
                fetched
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| (*fallback).to_string())
            })
            .collect()
    }
}
