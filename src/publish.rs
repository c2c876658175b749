//! Publisher boundary: delivery of a finished post to the channel.
//!
//! The production implementation talks to the Telegram Bot API: `sendPhoto`
//! with the post text as caption when an illustration is available,
//! `sendMessage` otherwise. One successful call means exactly one message in
//! the destination channel.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::path::Path;
use tracing::{debug, info};

use crate::BoxError;

/// External collaborator that delivers text plus an optional image to the
/// destination channel.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, text: &str, image: Option<&Path>) -> Result<(), BoxError>;
}

#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    description: Option<String>,
}

/// [`Publisher`] backed by the Telegram Bot API.
pub struct TelegramPublisher {
    client: reqwest::Client,
    bot_token: String,
    chat_id: String,
}

impl TelegramPublisher {
    pub fn new(
        client: reqwest::Client,
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("https://api.telegram.org/bot{}/{method}", self.bot_token)
    }

    async fn send_message(&self, text: &str) -> Result<(), BoxError> {
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&json!({ "chat_id": self.chat_id, "text": text }))
            .send()
            .await?
            .error_for_status()?
            .json::<TelegramResponse>()
            .await?;
        check_ok(response)
    }

    async fn send_photo(&self, text: &str, image: &Path) -> Result<(), BoxError> {
        let bytes = tokio::fs::read(image).await?;
        let file_name = image
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image.jpg".to_string());
        let form = reqwest::multipart::Form::new()
            .text("chat_id", self.chat_id.clone())
            .text("caption", text.to_string())
            .part(
                "photo",
                reqwest::multipart::Part::bytes(bytes).file_name(file_name),
            );

        let response = self
            .client
            .post(self.method_url("sendPhoto"))
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json::<TelegramResponse>()
            .await?;
        check_ok(response)
    }
}

fn check_ok(response: TelegramResponse) -> Result<(), BoxError> {
    if response.ok {
        Ok(())
    } else {
        Err(response
            .description
            .unwrap_or_else(|| "telegram api returned ok=false".to_string())
            .into())
    }
}

#[async_trait]
impl Publisher for TelegramPublisher {
    async fn publish(&self, text: &str, image: Option<&Path>) -> Result<(), BoxError> {
        match image {
            Some(path) => {
                debug!(image = %path.display(), "Publishing post with photo");
                self.send_photo(text, path).await?;
            }
            None => {
                debug!("Publishing text-only post");
                self.send_message(text).await?;
            }
        }
        info!(chars = text.chars().count(), "Post delivered to channel");
        Ok(())
    }
}
