//! Single-run orchestration of the curation pipeline.
//!
//! One [`Orchestrator::run`] call walks the whole state machine:
//!
//! ```text
//! Idle → Pruning → Collecting → Filtering → Attempting(i) → Done
//! ```
//!
//! Collection is best-effort (a failing source contributes an empty batch),
//! filtering may legitimately leave nothing to post, and the attempt loop
//! walks the ranked survivors in order, stopping at the first successful
//! publish. At most one item is posted per run; periodic re-runs come from
//! external scheduling.
//!
//! A rewrite failure skips straight to the next candidate without touching
//! the Illustrator or Publisher. A publish failure also advances, with no
//! retry or backoff for the failed candidate in this run. Only a successful
//! publish is recorded in the ledger.

use chrono::Utc;
use itertools::Itertools;
use tracing::{error, info, warn};

use crate::BoxError;
use crate::filter::rank_candidates;
use crate::illustrate::Illustrator;
use crate::ledger::Ledger;
use crate::models::Candidate;
use crate::publish::Publisher;
use crate::rewrite::Rewriter;
use crate::sources::SourceAdapter;
use crate::vocab::Vocabulary;

/// How deep into the ranked survivor list a run will go before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Result of one orchestrator pass.
#[derive(Debug)]
pub enum RunOutcome {
    /// One post went out; `id` is now in the ledger.
    Published { id: String },
    /// The filter left no survivors; nothing was attempted.
    NothingToPost,
    /// Every attempted survivor failed to rewrite or publish.
    Exhausted { attempted: usize },
}

/// Owns the pipeline components for one run.
pub struct Orchestrator {
    pub sources: Vec<Box<dyn SourceAdapter>>,
    pub rewriter: Box<dyn Rewriter>,
    pub illustrator: Box<dyn Illustrator>,
    pub publisher: Box<dyn Publisher>,
    pub ledger: Ledger,
    pub vocab: Vocabulary,
    pub retention_days: u32,
    pub max_attempts: usize,
}

impl Orchestrator {
    /// Execute one full pipeline pass.
    ///
    /// Errors surface only from ledger persistence; every collaborator
    /// failure is handled by advancing through the state machine.
    pub async fn run(&mut self) -> Result<RunOutcome, BoxError> {
        // Pruning
        self.ledger.prune(self.retention_days, Utc::now())?;

        // Collecting. Sequential by design; a failed source has already
        // degraded to an empty batch inside its adapter.
        let mut raw: Vec<Candidate> = Vec::new();
        for source in &self.sources {
            let batch = source.fetch().await;
            info!(source = source.name(), count = batch.len(), "Collected candidates");
            raw.extend(batch);
        }
        // The same link can arrive via several sources in one run; keep the
        // first occurrence so it is ranked once.
        let raw: Vec<Candidate> = raw.into_iter().unique_by(|c| c.id.clone()).collect();

        // Filtering
        let survivors = rank_candidates(raw, &self.ledger, &self.vocab);
        if survivors.is_empty() {
            info!("No survivors after filtering; nothing to post");
            return Ok(RunOutcome::NothingToPost);
        }

        // Attempting(i), bounded to the top of the ranking.
        let mut attempted = 0usize;
        for candidate in survivors.iter().take(self.max_attempts) {
            attempted += 1;
            let text = match self.rewriter.rewrite(candidate).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(id = %candidate.id, error = %e, "Rewrite failed; trying next candidate");
                    continue;
                }
            };

            // Best-effort illustration; a failure means a text-only post.
            let image = match self.illustrator.illustrate(candidate).await {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!(id = %candidate.id, error = %e, "Illustration failed; posting text-only");
                    None
                }
            };

            let published = self.publisher.publish(&text, image.as_deref()).await;

            if let Some(path) = &image {
                if let Err(e) = tokio::fs::remove_file(path).await {
                    warn!(path = %path.display(), error = %e, "Failed to delete illustration file");
                }
            }

            match published {
                Ok(()) => {
                    self.ledger.record(&candidate.id, Utc::now())?;
                    info!(id = %candidate.id, source = %candidate.source, "Published");
                    return Ok(RunOutcome::Published {
                        id: candidate.id.clone(),
                    });
                }
                Err(e) => {
                    error!(id = %candidate.id, error = %e, "Publish failed; trying next candidate");
                }
            }
        }

        info!(attempted, "Exhausted publish attempts without success");
        Ok(RunOutcome::Exhausted { attempted })
    }
}
