//! VC.ru /new listing scrape adapter.
//!
//! The VC.ru listing markup is rendered from a JS bundle and shifts often;
//! the one stable fixture is the `href="/..."` followed by a `<span>` holding
//! the headline, so a regex over the raw HTML is less brittle here than a
//! selector chain. Listing pages carry no timestamps; ingestion time is used.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use super::{SourceAdapter, normalize_ws};
use crate::BoxError;
use crate::models::Candidate;

const PAGE_URL: &str = "https://vc.ru/new";
const BASE_URL: &str = "https://vc.ru";
const SOURCE: &str = "VC.ru New";

const MAX_HEADLINES: usize = 15;

static HEADLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"href="(/[^"]+)"[^>]*>\s*<span[^>]*>([^<]+)</span>"#).expect("static regex")
});

pub struct VcRuAdapter {
    client: reqwest::Client,
}

impl VcRuAdapter {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn try_fetch(&self) -> Result<Vec<Candidate>, BoxError> {
        let html = self
            .client
            .get(PAGE_URL)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(parse_listing(&html))
    }
}

#[async_trait::async_trait]
impl SourceAdapter for VcRuAdapter {
    fn name(&self) -> &str {
        SOURCE
    }

    async fn fetch(&self) -> Vec<Candidate> {
        match self.try_fetch().await {
            Ok(candidates) => {
                info!(source = SOURCE, count = candidates.len(), "Scraped listing");
                candidates
            }
            Err(e) => {
                warn!(source = SOURCE, error = %e, "Listing scrape failed; skipping source");
                Vec::new()
            }
        }
    }
}

/// Extract headline candidates from listing HTML, capped at
/// [`MAX_HEADLINES`].
pub fn parse_listing(html: &str) -> Vec<Candidate> {
    let now = chrono::Utc::now();
    let mut candidates = Vec::new();
    for capture in HEADLINE.captures_iter(html) {
        let link = format!("{}/{}", BASE_URL, capture[1].trim_start_matches('/'));
        let title = normalize_ws(&capture[2]);
        if title.is_empty() {
            continue;
        }
        candidates.push(Candidate {
            id: link.clone(),
            title,
            summary: String::new(),
            link,
            source: SOURCE.to_string(),
            published_at: now,
        });
        if candidates.len() >= MAX_HEADLINES {
            break;
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_headline_spans() {
        let html = r#"
            <div><a href="/tech/12345-vpn-story" class="c"> <span class="t">VPN  story
            title</span></a></div>
            <div><a href="https://other.site/x"><span>External, skipped</span></a></div>
            <div><a href="/money/999"><span>Second story</span></a></div>"#;
        let out = parse_listing(html);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].link, "https://vc.ru/tech/12345-vpn-story");
        assert_eq!(out[0].title, "VPN story title");
        assert_eq!(out[1].title, "Second story");
    }

    #[test]
    fn headline_cap_is_enforced() {
        let mut html = String::new();
        for i in 0..30 {
            html.push_str(&format!(r#"<a href="/p/{i}"><span>Story {i}</span></a>"#));
        }
        assert_eq!(parse_listing(&html).len(), MAX_HEADLINES);
    }

    #[test]
    fn garbage_html_yields_empty_batch() {
        assert!(parse_listing("<<<not html at all").is_empty());
    }
}
