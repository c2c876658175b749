//! # Newsdrop
//!
//! A content-curation pipeline that collects candidate articles from a handful
//! of news sources, filters them against keyword vocabularies, rewrites the
//! best match into a short channel post via an LLM, optionally attaches a
//! generated illustration, and publishes the result to a Telegram channel.
//!
//! Each invocation performs exactly one pass and posts at most one item;
//! periodic scheduling (cron, CI) is left to the environment.
//!
//! ## Architecture
//!
//! The pipeline runs five phases in sequence:
//! 1. **Pruning**: expire old entries from the posted-articles ledger
//! 2. **Collecting**: pull candidates from every source adapter (best-effort)
//! 3. **Filtering**: dedup against the ledger, score against vocabularies, rank
//! 4. **Attempting**: walk the ranked survivors, rewrite → illustrate → publish
//! 5. **Recording**: remember the published article so it is never reposted
//!
//! The external collaborators (LLM rewriter, image generator, Telegram client)
//! sit behind traits so the orchestrator can be exercised with test doubles.

pub mod cli;
pub mod filter;
pub mod illustrate;
pub mod ledger;
pub mod models;
pub mod orchestrator;
pub mod publish;
pub mod rewrite;
pub mod sources;
pub mod vocab;

/// Boxed error type shared across collaborator boundaries.
///
/// `Send + Sync` so trait objects carrying it stay usable across `await`
/// points inside the tokio runtime.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
