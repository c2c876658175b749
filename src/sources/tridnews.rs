//! 3DNews homepage scrape adapter.
//!
//! 3DNews publishes no usable feed for its front page, so this adapter walks
//! the homepage anchors. Links are root-relative; the first batch of anchors
//! with non-empty text is taken as the current headline set. Listing pages
//! carry no per-article timestamps, so everything is stamped with ingestion
//! time.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{info, warn};
use url::Url;

use super::{SourceAdapter, normalize_ws};
use crate::BoxError;
use crate::models::Candidate;

const PAGE_URL: &str = "https://3dnews.ru/";
const SOURCE: &str = "3DNews";

/// Headlines to take from the top of the page.
const MAX_HEADLINES: usize = 15;

static ANCHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("static selector"));

pub struct TridNewsAdapter {
    client: reqwest::Client,
}

impl TridNewsAdapter {
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
        parse_homepage(&html)
    }
}

#[async_trait::async_trait]
impl SourceAdapter for TridNewsAdapter {
    fn name(&self) -> &str {
        SOURCE
    }

    async fn fetch(&self) -> Vec<Candidate> {
        match self.try_fetch().await {
            Ok(candidates) => {
                info!(source = SOURCE, count = candidates.len(), "Scraped homepage");
                candidates
            }
            Err(e) => {
                warn!(source = SOURCE, error = %e, "Homepage scrape failed; skipping source");
                Vec::new()
            }
        }
    }
}

/// Extract headline candidates from homepage HTML.
///
/// Takes the first [`MAX_HEADLINES`] root-relative anchors with non-empty
/// text. Listing scrapes provide no summaries.
pub fn parse_homepage(html: &str) -> Result<Vec<Candidate>, BoxError> {
    let base = Url::parse(PAGE_URL)?;
    let document = Html::parse_document(html);
    let now = chrono::Utc::now();

    let mut candidates = Vec::new();
    for element in document.select(&ANCHOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        // Root-relative links only; absolute hrefs on the homepage point at
        // partner sites and section indexes.
        if !href.starts_with('/') || href.starts_with("//") {
            continue;
        }
        let title = normalize_ws(&element.text().collect::<Vec<_>>().join(" "));
        if title.is_empty() {
            continue;
        }
        let Ok(link) = base.join(href) else {
            continue;
        };
        let link = link.to_string();
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
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_root_relative_anchors_with_text() {
        let html = r#"
            <html><body>
              <a href="https://ads.example.com/x">Partner link</a>
              <a href="//cdn.example.com/y">Protocol-relative</a>
              <a href="/news/vpn-blocked">VPN   protocols
                blocked</a>
              <a href="/news/empty"><img src="pic.jpg"/></a>
              <a href="/news/other">Other headline</a>
            </body></html>"#;
        let out = parse_homepage(html).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].link, "https://3dnews.ru/news/vpn-blocked");
        assert_eq!(out[0].title, "VPN protocols blocked");
        assert_eq!(out[0].id, out[0].link);
        assert!(out[0].summary.is_empty());
        assert_eq!(out[1].title, "Other headline");
    }

    #[test]
    fn headline_cap_is_enforced() {
        let mut html = String::from("<html><body>");
        for i in 0..40 {
            html.push_str(&format!(r#"<a href="/news/{i}">Headline {i}</a>"#));
        }
        html.push_str("</body></html>");
        let out = parse_homepage(&html).unwrap();
        assert_eq!(out.len(), MAX_HEADLINES);
    }

    #[test]
    fn empty_page_yields_empty_batch() {
        assert!(parse_homepage("<html></html>").unwrap().is_empty());
    }
}
