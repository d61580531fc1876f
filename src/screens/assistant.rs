//! AI assistant: generate an article draft from a topic

use crate::api::{ApiClient, ApiError};
use crate::models::{ArticleDraft, GenerateRequest};

/// A generated draft ready to be edited and published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDraft {
    /// Suggested title
    pub title: String,
    /// Draft body
    pub content: String,
    /// Whether the text was built locally because generation failed
    pub placeholder: bool,
    /// Notice explaining why a placeholder is shown
    pub notice: Option<String>,
}

impl GeneratedDraft {
    /// Locally built stand-in used when the backend cannot generate
    pub fn placeholder(request: &GenerateRequest, notice: Option<String>) -> Self {
        let topic = request.topic.trim();
        Self {
            title: format!("AI draft: {topic}"),
            content: format!(
                "# {topic}\n\nThis is a placeholder draft about \"{topic}\". \
                 Article generation is currently unavailable, so replace this text \
                 with your own.\n\nRequested style: {}, about {} words.",
                request.style.name(),
                request.length.word_range()
            ),
            placeholder: true,
            notice,
        }
    }

    /// Article draft pre-filled with the generated text
    pub fn to_article_draft(&self, category: &str) -> ArticleDraft {
        ArticleDraft::new(&self.title, &self.content).with_category(category)
    }
}

/// Generate a draft for `request`
///
/// Only a blank topic is an error. Backend failures and empty responses
/// produce a placeholder draft; a 401/403 also clears the session.
pub async fn generate(api: &ApiClient, request: &GenerateRequest) -> Result<GeneratedDraft, ApiError> {
    if request.topic.trim().is_empty() {
        return Err(ApiError::MissingField("topic"));
    }

    match api.generate_article(request).await {
        Ok(generated) => match generated.content.filter(|c| !c.trim().is_empty()) {
            Some(content) => Ok(GeneratedDraft {
                title: generated
                    .title
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| format!("AI draft: {}", request.topic.trim())),
                content,
                placeholder: false,
                notice: None,
            }),
            None => {
                tracing::warn!("Generation returned no content");
                Ok(GeneratedDraft::placeholder(
                    request,
                    Some("The generator returned no text".to_string()),
                ))
            }
        },
        Err(e) => {
            tracing::warn!("Article generation failed: {e}");
            if e.is_auth_failure() {
                api.session().clear()?;
            }
            Ok(GeneratedDraft::placeholder(request, Some(e.user_message())))
        }
    }
}
