//! Core data model for candidate articles.
//!
//! A [`Candidate`] is the uniform record every source adapter emits, whatever
//! the shape of the upstream feed or page. The filtering pipeline, the
//! rewriter, and the ledger all speak in terms of this one type.

use chrono::{DateTime, Utc};

/// A normalized article record eligible for filtering.
///
/// Adapters guarantee that `title` and `summary` are whitespace-normalized
/// (no newlines, single internal spaces, trimmed) and that `summary` is
/// capped at [`Candidate::MAX_SUMMARY_CHARS`] characters so downstream prompt
/// size stays bounded.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Dedup key: stable across runs for the same content. Canonically the
    /// article's permanent link.
    pub id: String,
    /// Human-readable headline.
    pub title: String,
    /// Short description or lede; may be empty for listing-only sources.
    pub summary: String,
    /// Canonical URL used for the attribution line of a published post.
    pub link: String,
    /// Name of the adapter that produced this record, for diagnostics only.
    pub source: String,
    /// Publication time; adapters fall back to ingestion time when the
    /// upstream source carries no reliable date.
    pub published_at: DateTime<Utc>,
}

impl Candidate {
    /// Upper bound on summary length, in characters.
    pub const MAX_SUMMARY_CHARS: usize = 500;

    /// Lowercased `title + " " + summary`, the text the keyword
    /// vocabularies are matched against.
    pub fn match_text(&self) -> String {
        format!("{} {}", self.title, self.summary).to_lowercase()
    }

    /// A record with an empty id or title carries nothing to dedup or rank
    /// on and is discarded before filtering.
    pub fn is_wellformed(&self) -> bool {
        !self.id.is_empty() && !self.title.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, title: &str, summary: &str) -> Candidate {
        Candidate {
            id: id.to_string(),
            title: title.to_string(),
            summary: summary.to_string(),
            link: id.to_string(),
            source: "test".to_string(),
            published_at: Utc::now(),
        }
    }

    #[test]
    fn match_text_is_lowercased_title_and_summary() {
        let c = candidate("https://x/1", "New VPN App", "Improves Privacy");
        assert_eq!(c.match_text(), "new vpn app improves privacy");
    }

    #[test]
    fn wellformed_requires_id_and_title() {
        assert!(candidate("https://x/1", "Title", "").is_wellformed());
        assert!(!candidate("", "Title", "").is_wellformed());
        assert!(!candidate("https://x/1", "", "").is_wellformed());
    }
}
