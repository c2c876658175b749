//! Relevance filtering and ranking of candidate batches.
//!
//! This is the heart of the pipeline. A raw candidate batch arrives messy:
//! duplicates across sources, items already posted in earlier runs, and
//! plenty of off-topic noise. [`rank_candidates`] reduces it to a ranked list
//! of survivors in five steps:
//!
//! 1. **Dedup** — drop anything whose id the [`Ledger`] already holds
//! 2. **Exclude** — any exclude-term substring match vetoes the candidate
//! 3. **Require** — keep only candidates matching at least two distinct
//!    require terms
//! 4. **Locale partition** — candidates matching a locale term go into a
//!    locale bucket; if that bucket is non-empty it *replaces* the general
//!    bucket entirely (locale relevance strictly dominates, no merge)
//! 5. **Rank** — stable sort by `published_at` descending; ties keep adapter
//!    emission order
//!
//! Malformed records (empty id or title) are discarded up front.

use tracing::{debug, info};

use crate::ledger::Ledger;
use crate::models::Candidate;
use crate::vocab::Vocabulary;

/// Count distinct require terms appearing as substrings of `text`.
fn require_matches(text: &str, vocab: &Vocabulary) -> usize {
    vocab
        .require_terms
        .iter()
        .filter(|term| text.contains(term.as_str()))
        .count()
}

/// Whether any exclude term appears in `text`.
fn is_excluded(text: &str, vocab: &Vocabulary) -> bool {
    vocab.exclude_terms.iter().any(|term| text.contains(term.as_str()))
}

/// Whether any locale term appears in `text`.
fn is_locale(text: &str, vocab: &Vocabulary) -> bool {
    vocab.locale_terms.iter().any(|term| text.contains(term.as_str()))
}

/// Filter and rank a raw candidate batch into attempt order.
///
/// Returns the surviving candidates, most recent first. An empty input or a
/// batch that filters down to nothing yields an empty output; the caller
/// treats that as a no-op run, not an error.
pub fn rank_candidates(
    candidates: Vec<Candidate>,
    ledger: &Ledger,
    vocab: &Vocabulary,
) -> Vec<Candidate> {
    let total = candidates.len();
    let mut locale_bucket: Vec<Candidate> = Vec::new();
    let mut general_bucket: Vec<Candidate> = Vec::new();

    for candidate in candidates {
        if !candidate.is_wellformed() {
            debug!(source = %candidate.source, "Dropping malformed candidate");
            continue;
        }
        if ledger.contains(&candidate.id) {
            debug!(id = %candidate.id, "Dropping already-posted candidate");
            continue;
        }

        let text = candidate.match_text();
        if is_excluded(&text, vocab) {
            debug!(id = %candidate.id, "Dropping candidate on exclude term");
            continue;
        }
        let matches = require_matches(&text, vocab);
        if matches < Vocabulary::MIN_REQUIRE_MATCHES {
            debug!(id = %candidate.id, matches, "Dropping candidate below require threshold");
            continue;
        }

        if is_locale(&text, vocab) {
            locale_bucket.push(candidate);
        } else {
            general_bucket.push(candidate);
        }
    }

    // Locale relevance strictly dominates: a non-empty locale bucket replaces
    // the general bucket rather than merging with it.
    let mut survivors = if locale_bucket.is_empty() {
        general_bucket
    } else {
        locale_bucket
    };

    // Stable sort: ties on published_at keep adapter emission order. No
    // secondary key is defined; the ordering within a tie is unspecified but
    // deterministic for a given input order.
    survivors.sort_by(|a, b| b.published_at.cmp(&a.published_at));

    info!(total, survivors = survivors.len(), "Filtered candidate batch");
    survivors
}
