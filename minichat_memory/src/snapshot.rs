//! JSON persistence for exported conversation snapshots.

use std::path::Path;

use minichat_core::error::Result;
use minichat_core::{MemoryError, RawTurnRecord, TurnRecord};
use serde_json::Value;
use tracing::{info, warn};

/// Reads and writes snapshot files: a JSON array of turn records.
pub struct SnapshotFile;

impl SnapshotFile {
    /// Write `records` as pretty-printed JSON, creating parent directories.
    pub fn save(path: &Path, records: &[TurnRecord]) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(records)?;
        std::fs::write(path, content)?;

        info!("Saved {} turns to {}", records.len(), path.display());
        Ok(())
    }

    /// Read a snapshot file.
    ///
    /// The top level must be an array. Elements that are not objects are
    /// kept as empty records so that the buffer skips them on import.
    pub fn load(path: &Path) -> Result<Vec<RawTurnRecord>> {
        let content = std::fs::read_to_string(path)?;
        let records = Self::parse(&content)?;

        info!("Loaded {} records from {}", records.len(), path.display());
        Ok(records)
    }

    pub fn parse(content: &str) -> Result<Vec<RawTurnRecord>> {
        let Value::Array(items) = serde_json::from_str::<Value>(content)? else {
            return Err(MemoryError::InvalidSnapshot(
                "top-level value is not an array".to_string(),
            ));
        };

        Ok(items
            .into_iter()
            .map(|item| {
                serde_json::from_value(item).unwrap_or_else(|e| {
                    warn!("Malformed snapshot record: {e}");
                    RawTurnRecord::default()
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");
        let records = vec![
            TurnRecord::new("hello", "hi there"),
            TurnRecord::new("bye", "see you"),
        ];

        SnapshotFile::save(&path, &records).unwrap();
        let loaded = SnapshotFile::load(&path).unwrap();

        let restored: Vec<TurnRecord> = loaded
            .into_iter()
            .filter_map(RawTurnRecord::into_record)
            .collect();
        assert_eq!(restored, records);
    }

    #[test]
    fn test_parse_tolerates_malformed_elements() {
        let records =
            SnapshotFile::parse(r#"[{"user_text": "a", "agent_text": "b"}, 42, {"user_text": 1}]"#)
                .unwrap();
        assert_eq!(records.len(), 3);
        assert!(records[0].clone().into_record().is_some());
        assert!(records[1].clone().into_record().is_none());
        assert!(records[2].clone().into_record().is_none());
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = SnapshotFile::parse(r#"{"user_text": "a"}"#).unwrap_err();
        assert!(matches!(err, MemoryError::InvalidSnapshot(_)));
    }
}
