//! Rewriter boundary: turns a selected candidate into channel-ready text.
//!
//! The production implementation calls an OpenAI-compatible chat-completions
//! endpoint. The model rewrites the article title and summary into a short
//! Russian-language post; an attribution line built from the article link and
//! the configured footer is appended afterwards, and the whole post is capped
//! at [`MAX_POST_CHARS`] characters (the Telegram caption limit).
//!
//! Failure (network, API error, empty completion) is a signal the
//! orchestrator answers by moving on to the next ranked candidate; there is
//! no retry within a run.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::BoxError;
use crate::models::Candidate;
use crate::sources::truncate_chars;

/// Upper bound on published post length, in characters.
pub const MAX_POST_CHARS: usize = 1024;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// External collaborator that produces post text for a candidate.
#[async_trait]
pub trait Rewriter: Send + Sync {
    /// Produce channel-ready text for `candidate`, attribution included, or
    /// a failure signal.
    async fn rewrite(&self, candidate: &Candidate) -> Result<String, BoxError>;
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// [`Rewriter`] backed by an OpenAI-compatible chat-completions API.
pub struct OpenAiRewriter {
    client: reqwest::Client,
    api_key: String,
    model: String,
    footer: String,
    endpoint: String,
}

impl OpenAiRewriter {
    pub fn new(
        client: reqwest::Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
        footer: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            footer: footer.into(),
            endpoint: CHAT_COMPLETIONS_URL.to_string(),
        }
    }

    /// Point at a different OpenAI-compatible endpoint (self-hosted, proxy).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl Rewriter for OpenAiRewriter {
    async fn rewrite(&self, candidate: &Candidate) -> Result<String, BoxError> {
        let prompt = build_prompt(candidate);
        debug!(id = %candidate.id, model = %self.model, "Requesting rewrite");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.model,
                "temperature": 0.5,
                "messages": [{"role": "user", "content": prompt}],
            }))
            .send()
            .await?
            .error_for_status()?
            .json::<ChatResponse>()
            .await?;

        let core = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .unwrap_or_default();
        if core.is_empty() {
            warn!(id = %candidate.id, "Model returned an empty completion");
            return Err("empty completion".into());
        }

        Ok(compose_post(&core, &candidate.link, &self.footer))
    }
}

/// The rewrite prompt sent to the model.
fn build_prompt(candidate: &Candidate) -> String {
    format!(
        "Статья: {}. {}\n\n\
         Сделай новостной пост для Telegram на русском:\n\
         - Объём: 400-500 символов.\n\
         - Дай 2-4 конкретных практических совета для читателя.\n\
         - Удали рекламу и лишние слова.\n\
         - В конце добавь 2-3 релевантных хештега.\n\
         - Не упоминай никакие каналы или внешние ссылки.",
        candidate.title, candidate.summary
    )
}

/// Append the attribution line and enforce the post length cap.
pub fn compose_post(core: &str, link: &str, footer: &str) -> String {
    let full = format!("{core}\n\nИсточник: {link}{footer}");
    truncate_chars(&full, MAX_POST_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn compose_post_appends_attribution_and_footer() {
        let post = compose_post("Текст поста", "https://x/1", "\n@channel");
        assert_eq!(post, "Текст поста\n\nИсточник: https://x/1\n@channel");
    }

    #[test]
    fn compose_post_with_empty_footer() {
        let post = compose_post("Body", "https://x/1", "");
        assert!(post.ends_with("Источник: https://x/1"));
    }

    #[test]
    fn compose_post_enforces_length_cap() {
        let core = "п".repeat(3000);
        let post = compose_post(&core, "https://x/1", "");
        assert_eq!(post.chars().count(), MAX_POST_CHARS);
    }

    #[test]
    fn prompt_includes_title_and_summary() {
        let c = Candidate {
            id: "https://x/1".into(),
            title: "Заголовок".into(),
            summary: "Краткое описание".into(),
            link: "https://x/1".into(),
            source: "test".into(),
            published_at: Utc::now(),
        };
        let prompt = build_prompt(&c);
        assert!(prompt.contains("Заголовок"));
        assert!(prompt.contains("Краткое описание"));
        // The prompt never leaks the link; attribution is appended after the
        // model call so the model cannot rewrite it.
        assert!(!prompt.contains("https://x/1"));
    }
}
