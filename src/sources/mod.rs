//! Source adapters that normalize external content into candidate records.
//!
//! Each adapter wraps one upstream source (an RSS feed or a raw page scrape)
//! and emits a bounded batch of [`Candidate`] records. Adapters share a
//! strict contract:
//!
//! - **Never raise past the boundary.** Network, parse, and format failures
//!   degrade to an empty batch with a `warn!`; the pipeline continues with
//!   the other sources.
//! - **Bounded output.** At most [`MAX_ITEMS_PER_SOURCE`] records per call.
//! - **Uniform normalization.** Titles and summaries are whitespace-collapsed
//!   identically across all adapters; summaries are capped at
//!   [`Candidate::MAX_SUMMARY_CHARS`] characters.
//!
//! # Supported sources
//!
//! | Source | Module | Method |
//! |--------|--------|--------|
//! | Xakep.ru | [`rss`] | RSS feed |
//! | GitHub Trending | [`rss`] | RSS feed |
//! | 3DNews | [`tridnews`] | Homepage scrape |
//! | VC.ru | [`vcru`] | /new listing scrape |

pub mod rss;
pub mod tridnews;
pub mod vcru;

use async_trait::async_trait;
use std::time::Duration;

use crate::BoxError;
use crate::models::Candidate;

/// Cap on records returned by a single adapter call, bounding downstream cost.
pub const MAX_ITEMS_PER_SOURCE: usize = 30;

/// Timeout for scrape/feed requests. Illustration requests use a longer,
/// per-request override.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Uniform adapter contract over heterogeneous sources.
///
/// `fetch` is deliberately infallible: the "never propagates a fault past its
/// boundary" rule is part of the type, not an implementation courtesy.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Human-readable source label, used for diagnostics and the
    /// `Candidate::source` field.
    fn name(&self) -> &str;

    /// Best-effort fetch of the current candidate batch.
    async fn fetch(&self) -> Vec<Candidate>;
}

/// Shared HTTP client for all network calls in a run.
///
/// Some of the scraped sites answer bot-ish user agents with empty pages, so
/// the client masquerades as a desktop browser.
pub fn http_client() -> Result<reqwest::Client, BoxError> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()?;
    Ok(client)
}

/// The stock source set: 3DNews, VC.ru, Xakep.ru, GitHub Trending.
pub fn default_sources(client: &reqwest::Client) -> Vec<Box<dyn SourceAdapter>> {
    vec![
        Box::new(tridnews::TridNewsAdapter::new(client.clone())),
        Box::new(vcru::VcRuAdapter::new(client.clone())),
        Box::new(rss::RssAdapter::new(
            client.clone(),
            "https://xakep.ru/feed/",
            "Xakep.ru",
        )),
        Box::new(rss::RssAdapter::new(
            client.clone(),
            "https://mshibanami.github.io/GitHubTrendingRSS/github_trending_all_daily.xml",
            "GitHub Trending",
        )),
    ]
}

/// Collapse every run of whitespace (including newlines) to a single space
/// and trim the ends. Applied identically to titles and summaries by all
/// adapters.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate on a character boundary.
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ws_collapses_runs_and_newlines() {
        assert_eq!(normalize_ws("  a\n\n b\r\n\tc  "), "a b c");
        assert_eq!(normalize_ws("plain"), "plain");
        assert_eq!(normalize_ws("   "), "");
    }

    #[test]
    fn truncate_chars_is_char_boundary_safe() {
        assert_eq!(truncate_chars("привет", 3), "при");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("", 5), "");
    }
}
