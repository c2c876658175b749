//! Persisted ledger of already-posted articles.
//!
//! The ledger is the single source of deduplication truth across process
//! restarts: a mapping from article id to the unix timestamp of its first
//! successful publish. It is loaded once at startup, pruned at the start of
//! each run, appended to exactly once per successful publish, and rewritten
//! wholesale to disk after every mutation.
//!
//! # Persistence format
//!
//! A human-diffable JSON array of `{"id": ..., "timestamp": ...}` records.
//! `timestamp` may be `null`, meaning "posted, exact time unknown"; such
//! entries are retained conservatively and never pruned by age. Writes use
//! write-then-rename so a crash mid-write cannot corrupt the previous
//! snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::BoxError;

/// One persisted ledger record.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LedgerRecord {
    id: String,
    /// Unix seconds of the publish, or `None` when the time was never tracked.
    timestamp: Option<i64>,
}

/// Dedup/history store keyed by article id, mirrored to a JSON file.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    entries: HashMap<String, Option<i64>>,
}

impl Ledger {
    /// Load the ledger from `path`.
    ///
    /// A missing file or a file that fails to parse yields an empty ledger;
    /// neither case is fatal. A corrupt ledger only risks a repost, which the
    /// retention window bounds anyway.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<LedgerRecord>>(&raw) {
                Ok(records) => records
                    .into_iter()
                    .map(|r| (r.id, r.timestamp))
                    .collect::<HashMap<_, _>>(),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Ledger file unreadable; starting empty");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No ledger file yet; starting empty");
                HashMap::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ledger file unreadable; starting empty");
                HashMap::new()
            }
        };
        info!(path = %path.display(), entries = entries.len(), "Ledger loaded");
        Self { path, entries }
    }

    /// Whether `id` has already been posted.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop entries older than `retention_days` and persist the result.
    ///
    /// Entries with a `null` timestamp are never pruned by age. Returns the
    /// number of entries removed.
    pub fn prune(&mut self, retention_days: u32, now: DateTime<Utc>) -> Result<usize, BoxError> {
        let cutoff = now.timestamp() - i64::from(retention_days) * 86_400;
        let before = self.entries.len();
        self.entries
            .retain(|_, ts| ts.is_none_or(|posted| posted > cutoff));
        let removed = before - self.entries.len();
        if removed > 0 {
            info!(removed, retained = self.entries.len(), "Pruned expired ledger entries");
        }
        self.persist()?;
        Ok(removed)
    }

    /// Record a successful publish of `id` at `now` and persist immediately.
    ///
    /// Overwrites any existing entry for the same id.
    pub fn record(&mut self, id: &str, now: DateTime<Utc>) -> Result<(), BoxError> {
        self.entries.insert(id.to_string(), Some(now.timestamp()));
        self.persist()?;
        debug!(%id, "Recorded publish in ledger");
        Ok(())
    }

    /// Rewrite the full snapshot to disk, write-then-rename.
    ///
    /// A persist failure is surfaced to the caller rather than swallowed:
    /// losing dedup state silently would mean reposting on the next run.
    fn persist(&self) -> Result<(), BoxError> {
        let mut records: Vec<LedgerRecord> = self
            .entries
            .iter()
            .map(|(id, ts)| LedgerRecord {
                id: id.clone(),
                timestamp: *ts,
            })
            .collect();
        // Deterministic file order keeps diffs reviewable.
        records.sort_by(|a, b| a.id.cmp(&b.id));

        let json = serde_json::to_string_pretty(&records)?;
        let tmp = tmp_path(&self.path);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn scratch_path(tag: &str) -> PathBuf {
        static SEQ: AtomicU32 = AtomicU32::new(0);
        let n = SEQ.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "newsdrop_ledger_{tag}_{}_{n}.json",
            std::process::id()
        ))
    }

    #[test]
    fn missing_file_loads_empty() {
        let ledger = Ledger::load(scratch_path("missing"));
        assert!(ledger.is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let path = scratch_path("corrupt");
        fs::write(&path, "{not json").unwrap();
        let ledger = Ledger::load(&path);
        assert!(ledger.is_empty());
        fs::remove_file(&path).ok();
    }

    #[test]
    fn record_persists_and_reloads() {
        let path = scratch_path("roundtrip");
        let now = Utc::now();

        let mut ledger = Ledger::load(&path);
        ledger.record("https://example.com/a", now).unwrap();
        ledger.record("https://example.com/b", now).unwrap();

        let reloaded = Ledger::load(&path);
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains("https://example.com/a"));
        assert!(reloaded.contains("https://example.com/b"));
        assert!(!reloaded.contains("https://example.com/c"));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn prune_honors_retention_window() {
        let path = scratch_path("prune");
        let now = Utc::now();
        let day = 86_400i64;

        let records = vec![
            LedgerRecord {
                id: "old".into(),
                timestamp: Some(now.timestamp() - 8 * day),
            },
            LedgerRecord {
                id: "fresh".into(),
                timestamp: Some(now.timestamp() - 6 * day),
            },
            LedgerRecord {
                id: "untracked".into(),
                timestamp: None,
            },
        ];
        fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();

        let mut ledger = Ledger::load(&path);
        let removed = ledger.prune(7, now).unwrap();

        assert_eq!(removed, 1);
        assert!(!ledger.contains("old"));
        assert!(ledger.contains("fresh"));
        // Null timestamps survive any retention window.
        assert!(ledger.contains("untracked"));

        // Pruning persisted immediately.
        let reloaded = Ledger::load(&path);
        assert_eq!(reloaded.len(), 2);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn persist_leaves_no_tmp_file_behind() {
        let path = scratch_path("tmp");
        let mut ledger = Ledger::load(&path);
        ledger.record("x", Utc::now()).unwrap();
        assert!(!tmp_path(&path).exists());
        fs::remove_file(&path).ok();
    }

    #[test]
    fn null_timestamps_round_trip() {
        let path = scratch_path("null");
        fs::write(&path, r#"[{"id": "legacy", "timestamp": null}]"#).unwrap();
        let mut ledger = Ledger::load(&path);
        assert!(ledger.contains("legacy"));
        ledger.prune(0, Utc::now()).unwrap();
        assert!(ledger.contains("legacy"));
        fs::remove_file(&path).ok();
    }
}
