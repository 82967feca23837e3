use super::domain::ComplianceCheck;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to serialize compliance records: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to persist compliance records to {path}: {source}")]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Holds the single current collection of checks, mirrored to a JSON blob
/// on every mutation. Constructed once at startup and injected into the
/// transport layer; a mutex serializes writers so readers always see a
/// fully swapped collection.
pub struct CheckStore {
    path: PathBuf,
    records: Mutex<Vec<ComplianceCheck>>,
}

impl CheckStore {
    /// Opens the store, loading any previously persisted collection. A
    /// missing blob starts empty; a corrupt or unreadable blob logs a
    /// diagnostic and starts empty rather than failing startup.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = load_records(&path);
        Self {
            path,
            records: Mutex::new(records),
        }
    }

    /// Atomically swaps the whole collection and persists it.
    pub fn replace(&self, records: Vec<ComplianceCheck>) -> Result<usize, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        *guard = records;
        let count = guard.len();
        self.persist(&guard)?;
        info!(count, path = %self.path.display(), "replaced compliance records");
        Ok(count)
    }

    /// Snapshot of the current collection.
    pub fn current(&self) -> Vec<ComplianceCheck> {
        self.records.lock().expect("store mutex poisoned").clone()
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.clear();
        self.persist(&guard)?;
        info!(path = %self.path.display(), "cleared compliance records");
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().expect("store mutex poisoned").is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }

    fn persist(&self, records: &[ComplianceCheck]) -> Result<(), StoreError> {
        let payload = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, payload).map_err(|source| StoreError::Persist {
            path: self.path.clone(),
            source,
        })
    }
}

fn load_records(path: &Path) -> Vec<ComplianceCheck> {
    if !path.exists() {
        return Vec::new();
    }

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(path = %path.display(), %err, "unable to read persisted records, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<ComplianceCheck>>(&raw) {
        Ok(records) => {
            info!(count = records.len(), path = %path.display(), "loaded persisted compliance records");
            records
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "persisted records are corrupt, starting empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::domain::{CheckStatus, Severity};
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn temp_store_path(tag: &str) -> PathBuf {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let unique = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "compliance-store-{tag}-{}-{unique}.json",
            std::process::id()
        ))
    }

    fn sample_check(id: &str) -> ComplianceCheck {
        ComplianceCheck {
            id: id.to_string(),
            framework: "SOC2".to_string(),
            provider: "AWS".to_string(),
            severity: Severity::High,
            status: CheckStatus::Failing,
            risk_score: 7.5,
            description: "Access review overdue".to_string(),
            last_checked: Utc.with_ymd_and_hms(2025, 8, 20, 12, 0, 0).unwrap(),
            ai_summary: None,
        }
    }

    #[test]
    fn replace_then_current_round_trips() {
        let path = temp_store_path("round-trip");
        let store = CheckStore::open(&path);
        let records = vec![sample_check("a"), sample_check("b")];

        let count = store.replace(records.clone()).expect("replace persists");
        assert_eq!(count, 2);
        assert_eq!(store.current(), records);
        assert_eq!(store.len(), 2);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn empty_collection_round_trips() {
        let path = temp_store_path("empty");
        let store = CheckStore::open(&path);
        store.replace(Vec::new()).expect("empty replace persists");
        assert!(store.is_empty());
        assert_eq!(store.current(), Vec::new());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn reopen_loads_persisted_records() {
        let path = temp_store_path("reopen");
        {
            let store = CheckStore::open(&path);
            store.replace(vec![sample_check("a")]).expect("persists");
        }

        let reopened = CheckStore::open(&path);
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.current()[0].id, "a");

        let _ = fs::remove_file(path);
    }

    #[test]
    fn corrupt_blob_starts_empty() {
        let path = temp_store_path("corrupt");
        fs::write(&path, "{not json").expect("write corrupt blob");

        let store = CheckStore::open(&path);
        assert!(store.is_empty());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn clear_empties_and_persists() {
        let path = temp_store_path("clear");
        let store = CheckStore::open(&path);
        store.replace(vec![sample_check("a")]).expect("persists");
        store.clear().expect("clear persists");
        assert!(store.is_empty());

        let reopened = CheckStore::open(&path);
        assert!(reopened.is_empty());

        let _ = fs::remove_file(path);
    }
}
