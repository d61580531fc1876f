//! Article, comment and like operations

use reqwest::multipart::{Form, Part};

use super::auth::require;
use super::{ApiClient, ApiError, RequestOptions, segment};
use crate::models::{
    Article, ArticleDraft, ArticleEnvelope, Comment, CommentEnvelope, LikeToggle, Message,
    PhotoUpload, sort_chronologically,
};

impl ApiClient {
    /// List all articles, newest first (`GET /articles`)
    pub async fn list_articles(&self) -> Result<Vec<Article>, ApiError> {
        self.call("/articles", RequestOptions::get()).await
    }

    /// Get one article (`GET /articles/{slug}`)
    ///
    /// The backend counts each fetch as a view.
    pub async fn get_article(&self, slug: &str) -> Result<Article, ApiError> {
        self.call(&format!("/articles/{}", segment(slug)), RequestOptions::get())
            .await
    }

    /// Create an article (`POST /articles`)
    pub async fn create_article(&self, draft: &ArticleDraft) -> Result<Article, ApiError> {
        let draft = validated(draft)?;
        let envelope: ArticleEnvelope = self
            .call("/articles", RequestOptions::post().json(&draft)?)
            .await?;
        Ok(envelope.article)
    }

    /// Create an article with an attached photo, sent as multipart
    pub async fn create_article_with_photo(
        &self,
        draft: &ArticleDraft,
        photo: PhotoUpload,
    ) -> Result<Article, ApiError> {
        let draft = validated(draft)?;
        let form = multipart_form(&draft, photo)?;
        let envelope: ArticleEnvelope = self
            .call("/articles", RequestOptions::post().multipart(form))
            .await?;
        Ok(envelope.article)
    }

    /// Replace an article's fields (`PUT /articles/{slug}`)
    pub async fn update_article(
        &self,
        slug: &str,
        draft: &ArticleDraft,
    ) -> Result<Article, ApiError> {
        let draft = validated(draft)?;
        let envelope: ArticleEnvelope = self
            .call(
                &format!("/articles/{}", segment(slug)),
                RequestOptions::put().json(&draft)?,
            )
            .await?;
        Ok(envelope.article)
    }

    /// Delete an article (`DELETE /articles/{slug}`)
    pub async fn delete_article(&self, slug: &str) -> Result<Message, ApiError> {
        self.call(
            &format!("/articles/{}", segment(slug)),
            RequestOptions::delete(),
        )
        .await
    }

    /// List an article's comments, oldest first
    pub async fn list_comments(&self, slug: &str) -> Result<Vec<Comment>, ApiError> {
        let mut comments: Vec<Comment> = self
            .call(
                &format!("/articles/{}/comments", segment(slug)),
                RequestOptions::get(),
            )
            .await?;
        sort_chronologically(&mut comments);
        Ok(comments)
    }

    /// Comment on an article (`POST /articles/{slug}/comments`)
    pub async fn add_comment(&self, slug: &str, text: &str) -> Result<Comment, ApiError> {
        require("text", text)?;
        let body = serde_json::json!({ "text": text.trim() });
        let envelope: CommentEnvelope = self
            .call(
                &format!("/articles/{}/comments", segment(slug)),
                RequestOptions::post().json(&body)?,
            )
            .await?;
        Ok(envelope.comment)
    }

    /// Like or unlike an article; returns the new like count
    ///
    /// Whether a second call removes the like is decided by the backend.
    pub async fn toggle_like(&self, slug: &str) -> Result<LikeToggle, ApiError> {
        self.call(
            &format!("/articles/{}/like", segment(slug)),
            RequestOptions::post(),
        )
        .await
    }
}

fn validated(draft: &ArticleDraft) -> Result<ArticleDraft, ApiError> {
    match draft.missing_field() {
        Some(field) => Err(ApiError::MissingField(field)),
        None => Ok(draft.trimmed()),
    }
}

fn multipart_form(draft: &ArticleDraft, photo: PhotoUpload) -> Result<Form, ApiError> {
    let part = Part::bytes(photo.bytes)
        .file_name(photo.file_name)
        .mime_str(&photo.mime_type)
        .map_err(|e| ApiError::InvalidRequest(format!("Bad photo type: {e}")))?;

    let mut form = Form::new()
        .text("title", draft.title.clone())
        .text("content", draft.content.clone())
        .text("category", draft.category.clone());
    if let Some(lat) = draft.location_lat {
        form = form.text("location_lat", lat.to_string());
    }
    if let Some(lng) = draft.location_lng {
        form = form.text("location_lng", lng.to_string());
    }
    Ok(form.part("photo", part))
}
