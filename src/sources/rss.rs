//! Generic RSS feed adapter.
//!
//! Handles every feed-shaped source (Xakep.ru, GitHub Trending) through one
//! deserialization path. The feed XML is parsed with `quick-xml`'s serde
//! support; entries missing a link or title are skipped, `pubDate` is taken
//! when it parses as RFC 2822 and ingestion time is used otherwise.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{MAX_ITEMS_PER_SOURCE, SourceAdapter, normalize_ws, truncate_chars};
use crate::BoxError;
use crate::models::Candidate;

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
}

/// Adapter over a single RSS endpoint.
pub struct RssAdapter {
    client: reqwest::Client,
    url: String,
    source: String,
}

impl RssAdapter {
    pub fn new(client: reqwest::Client, url: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            source: source.into(),
        }
    }

    async fn try_fetch(&self) -> Result<Vec<Candidate>, BoxError> {
        let xml = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_feed(&xml, &self.source, Utc::now())
    }
}

#[async_trait::async_trait]
impl SourceAdapter for RssAdapter {
    fn name(&self) -> &str {
        &self.source
    }

    async fn fetch(&self) -> Vec<Candidate> {
        match self.try_fetch().await {
            Ok(candidates) => {
                info!(source = %self.source, count = candidates.len(), "Fetched feed");
                candidates
            }
            Err(e) => {
                warn!(source = %self.source, url = %self.url, error = %e, "Feed fetch failed; skipping source");
                Vec::new()
            }
        }
    }
}

/// Parse feed XML into normalized candidates, newest-declared first as the
/// feed lists them, capped at [`MAX_ITEMS_PER_SOURCE`].
pub fn parse_feed(
    xml: &str,
    source: &str,
    ingested_at: DateTime<Utc>,
) -> Result<Vec<Candidate>, BoxError> {
    let rss: Rss = quick_xml::de::from_str(xml)?;

    let mut candidates = Vec::new();
    for item in rss.channel.items.into_iter().take(MAX_ITEMS_PER_SOURCE) {
        let link = item.link.as_deref().unwrap_or("").trim().to_string();
        let title = normalize_ws(item.title.as_deref().unwrap_or(""));
        if link.is_empty() || title.is_empty() {
            debug!(source, "Skipping feed item without link or title");
            continue;
        }
        let summary = truncate_chars(
            &normalize_ws(item.description.as_deref().unwrap_or("")),
            Candidate::MAX_SUMMARY_CHARS,
        );
        let published_at = item
            .pub_date
            .as_deref()
            .and_then(|d| DateTime::parse_from_rfc2822(d).ok())
            .map(|d| d.with_timezone(&Utc))
            .unwrap_or(ingested_at);

        candidates.push(Candidate {
            id: link.clone(),
            title,
            summary,
            link,
            source: source.to_string(),
            published_at,
        });
    }
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test Feed</title>
    <item>
      <title>VPN  traffic
  obfuscation</title>
      <link>https://example.com/a</link>
      <description><![CDATA[Long   description with
newlines]]></description>
      <pubDate>Sat, 29 Aug 2026 10:00:00 +0000</pubDate>
    </item>
    <item>
      <title>No link item</title>
      <description>dropped</description>
    </item>
    <item>
      <title>Bad date item</title>
      <link>https://example.com/b</link>
      <pubDate>not a date</pubDate>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parses_and_normalizes_feed_items() {
        let now = Utc::now();
        let items = parse_feed(FEED, "Test", now).unwrap();
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].id, "https://example.com/a");
        assert_eq!(items[0].title, "VPN traffic obfuscation");
        assert_eq!(items[0].summary, "Long description with newlines");
        assert_eq!(items[0].source, "Test");
        assert_eq!(
            items[0].published_at,
            DateTime::parse_from_rfc2822("Sat, 29 Aug 2026 10:00:00 +0000").unwrap()
        );

        // Unparseable pubDate falls back to ingestion time.
        assert_eq!(items[1].published_at, now);
    }

    #[test]
    fn summary_is_capped() {
        let long = "x".repeat(2000);
        let xml = format!(
            r#"<rss><channel><item><title>t</title><link>https://e/1</link><description>{long}</description></item></channel></rss>"#
        );
        let items = parse_feed(&xml, "Test", Utc::now()).unwrap();
        assert_eq!(items[0].summary.chars().count(), Candidate::MAX_SUMMARY_CHARS);
    }

    #[test]
    fn item_cap_is_enforced() {
        let mut body = String::from("<rss><channel>");
        for i in 0..(MAX_ITEMS_PER_SOURCE + 10) {
            body.push_str(&format!(
                "<item><title>t{i}</title><link>https://e/{i}</link></item>"
            ));
        }
        body.push_str("</channel></rss>");
        let items = parse_feed(&body, "Test", Utc::now()).unwrap();
        assert_eq!(items.len(), MAX_ITEMS_PER_SOURCE);
    }

    #[test]
    fn malformed_xml_is_an_error_not_a_panic() {
        assert!(parse_feed("<rss><channel>", "Test", Utc::now()).is_err());
    }
}
