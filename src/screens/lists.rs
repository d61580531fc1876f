//! "My articles" and "Favorites" lists

use super::{Applied, Trigger, ViewState};
use crate::api::{ApiClient, ApiError};
use crate::models::Article;

/// Which listing a [`ArticleListScreen`] shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSource {
    /// Articles written by the current user
    Mine,
    /// Articles the current user liked
    Favorites,
}

impl ListSource {
    /// Screen title
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Mine => "My articles",
            Self::Favorites => "Favorites",
        }
    }
}

/// State of a per-user article list
#[derive(Debug)]
pub struct ArticleListScreen {
    source: ListSource,
    /// The listed articles
    pub articles: ViewState<Vec<Article>>,
}

impl ArticleListScreen {
    /// Screen for `source`
    pub const fn new(source: ListSource) -> Self {
        Self {
            source,
            articles: ViewState::new(),
        }
    }

    /// Listing shown
    pub const fn source(&self) -> ListSource {
        self.source
    }

    /// Re-fetch the list
    pub async fn refresh(&mut self, api: &ApiClient, trigger: Trigger) -> Applied {
        let Some(ticket) = self.articles.begin(trigger) else {
            return Applied::Discarded;
        };
        let result = match self.source {
            ListSource::Mine => api.user_articles().await,
            ListSource::Favorites => api.favorite_articles().await,
        };
        self.articles.apply(ticket, result, api.session())
    }

    /// Delete one of the user's articles, then reload the list
    pub async fn delete(&mut self, api: &ApiClient, slug: &str) -> Result<Applied, ApiError> {
        if let Err(e) = api.delete_article(slug).await {
            self.articles.fail(&e, api.session());
            return Err(e);
        }
        Ok(self
            .refresh(api, Trigger::NavigationBack { refresh: true })
            .await)
    }
}
