//! Illustrator boundary: best-effort image generation for a candidate.
//!
//! The production implementation asks the Pollinations image API for an
//! abstract illustration derived from the article title and stores the
//! result under the OS temp directory. The caller owns the returned file and
//! is responsible for deleting it after use.
//!
//! Illustration is strictly optional: any failure here means the post goes
//! out text-only.

use async_trait::async_trait;
use rand::Rng;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

use crate::BoxError;
use crate::models::Candidate;
use crate::sources::truncate_chars;

/// Image generation gets a longer leash than scraping; diffusion endpoints
/// routinely take tens of seconds.
const IMAGE_TIMEOUT: Duration = Duration::from_secs(60);

/// Titles are clipped before prompting so a long headline cannot blow up the
/// prompt URL.
const MAX_PROMPT_TITLE_CHARS: usize = 100;

/// External collaborator that produces an optional illustration.
#[async_trait]
pub trait Illustrator: Send + Sync {
    /// Generate an image for `candidate` and return the path of the stored
    /// file. The caller deletes the file after use.
    async fn illustrate(&self, candidate: &Candidate) -> Result<PathBuf, BoxError>;
}

/// [`Illustrator`] backed by the Pollinations prompt-to-image endpoint.
pub struct PollinationsIllustrator {
    client: reqwest::Client,
}

impl PollinationsIllustrator {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Illustrator for PollinationsIllustrator {
    async fn illustrate(&self, candidate: &Candidate) -> Result<PathBuf, BoxError> {
        let prompt = build_prompt(&candidate.title);
        let seed: u32 = rand::rng().random_range(1..=99_999);
        let url = format!(
            "https://image.pollinations.ai/prompt/{}?seed={seed}",
            urlencoding::encode(&prompt)
        );
        debug!(%prompt, seed, "Requesting illustration");

        let bytes = self
            .client
            .get(&url)
            .timeout(IMAGE_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let path = std::env::temp_dir().join(format!("newsdrop_img_{seed}.jpg"));
        if let Err(e) = tokio::fs::write(&path, &bytes).await {
            warn!(path = %path.display(), error = %e, "Failed to store illustration");
            return Err(e.into());
        }
        Ok(path)
    }
}

/// The image prompt derived from an article title.
fn build_prompt(title: &str) -> String {
    format!(
        "abstract technology concept about: {}, clean minimal style, no text",
        truncate_chars(title, MAX_PROMPT_TITLE_CHARS)
    )
}
