//! Article detail: the article, its comments, likes and new comments

use super::{Applied, Trigger, ViewState};
use crate::api::{ApiClient, ApiError};
use crate::models::{Article, Comment};

/// State of the article detail screen
#[derive(Debug)]
pub struct ArticleScreen {
    slug: String,
    /// The article
    pub article: ViewState<Article>,
    /// Its comments, oldest first
    pub comments: ViewState<Vec<Comment>>,
}

impl ArticleScreen {
    /// Screen for the article with `slug`
    pub fn new(slug: &str) -> Self {
        Self {
            slug: slug.to_string(),
            article: ViewState::new(),
            comments: ViewState::new(),
        }
    }

    /// Slug of the shown article
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Load the article, then its comments
    ///
    /// Comments are only fetched if the article loaded.
    pub async fn refresh(&mut self, api: &ApiClient, trigger: Trigger) -> Applied {
        let Some(ticket) = self.article.begin(trigger) else {
            return Applied::Discarded;
        };
        let applied = self
            .article
            .apply(ticket, api.get_article(&self.slug).await, api.session());
        if applied == Applied::Updated {
            self.reload_comments(api, trigger).await;
        }
        applied
    }

    async fn reload_comments(&mut self, api: &ApiClient, trigger: Trigger) -> Applied {
        let Some(ticket) = self.comments.begin(trigger) else {
            return Applied::Discarded;
        };
        let result = api.list_comments(&self.slug).await;
        self.comments.apply(ticket, result, api.session())
    }

    /// Post a comment and reload the comment list
    pub async fn submit_comment(&mut self, api: &ApiClient, text: &str) -> Result<Comment, ApiError> {
        let comment = match api.add_comment(&self.slug, text).await {
            Ok(comment) => comment,
            Err(e) => {
                self.fail(&e, api);
                return Err(e);
            }
        };
        if let Some(article) = self.article.data_mut() {
            article.comments_count += 1;
        }
        self.reload_comments(api, Trigger::NavigationBack { refresh: true })
            .await;
        Ok(comment)
    }

    /// Toggle the like and show the count the backend reports
    pub async fn toggle_like(&mut self, api: &ApiClient) -> Result<u32, ApiError> {
        match api.toggle_like(&self.slug).await {
            Ok(toggle) => {
                if let Some(article) = self.article.data_mut() {
                    article.likes_count = toggle.likes_count;
                }
                Ok(toggle.likes_count)
            }
            Err(e) => {
                self.fail(&e, api);
                Err(e)
            }
        }
    }

    fn fail(&mut self, error: &ApiError, api: &ApiClient) {
        if self.article.fail(error, api.session()) == Applied::SignedOut {
            self.comments.mark_signed_out();
        }
    }

    /// Mark the screen as gone
    pub fn unmount(&mut self) {
        self.article.unmount();
        self.comments.unmount();
    }
}
