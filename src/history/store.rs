use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::SubmitError;
use super::entry::HistoryEntry;

/// Append-only prediction log persisted as one JSON array in one file.
///
/// Appends are read-modify-write with no file locking: a single writer
/// is assumed (the studio funnels every append through its state mutex).
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        HistoryStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored entry, oldest first. Missing or corrupt data reads as
    /// an empty log.
    pub fn read_all(&self) -> Vec<HistoryEntry> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "history unreadable, treating as empty");
                return Vec::new();
            }
        };
        if raw.trim().is_empty() {
            return Vec::new();
        }
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "history corrupt, treating as empty");
            Vec::new()
        })
    }

    /// Appends one entry and rewrites the whole array.
    pub fn append(&self, entry: HistoryEntry) -> Result<usize, SubmitError> {
        let mut entries = self.read_all();
        entries.push(entry);

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| SubmitError::Storage(e.to_string()))?;
        }
        let json = serde_json::to_vec(&entries).map_err(|e| SubmitError::Storage(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| SubmitError::Storage(e.to_string()))?;

        Ok(entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::PredictionResult;
    use crate::polarity::Polarity;

    fn entry(prediction: i64) -> HistoryEntry {
        HistoryEntry {
            result: PredictionResult {
                process_time: format!("{}ms", prediction),
                prediction,
                accuracy: 0.5,
            },
            invert: Polarity::DarkOnLight,
            ts: 1_700_000_000_000 + prediction,
        }
    }

    #[test]
    fn missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::open(dir.path().join("history.json"));
        assert!(store.read_all().is_empty());
    }

    #[test]
    fn appends_keep_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::open(dir.path().join("history.json"));
        for n in 0..5 {
            assert_eq!(store.append(entry(n)).unwrap(), n as usize + 1);
        }
        let all = store.read_all();
        assert_eq!(all.len(), 5);
        let predictions: Vec<i64> = all.iter().map(|e| e.result.prediction).collect();
        assert_eq!(predictions, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn corrupt_file_reads_empty_and_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = HistoryStore::open(&path);
        assert!(store.read_all().is_empty());
        store.append(entry(3)).unwrap();
        assert_eq!(store.read_all(), vec![entry(3)]);
    }

    #[test]
    fn wire_shape_is_flat() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");
        let store = HistoryStore::open(&path);
        store.append(entry(7)).unwrap();

        let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let first = &raw[0];
        assert_eq!(first["prediction"], 7);
        assert_eq!(first["process_time"], "7ms");
        assert_eq!(first["invert"], "false");
        assert_eq!(first["ts"], 1_700_000_000_007i64);
    }

    #[test]
    fn entries_without_timestamp_still_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, r#"[{"process_time":"3ms","prediction":1,"accuracy":0.9,"invert":"true"}]"#).unwrap();

        let all = HistoryStore::open(&path).read_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].invert, Polarity::LightOnDark);
        assert_eq!(all[0].ts, 0);
    }
}
