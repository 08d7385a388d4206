//! JSON snapshot persistence.
//!
//! Collections dump to a JSON array on disk. A missing or unparsable file
//! means "start empty" (first run, or a snapshot from an incompatible
//! revision). Writes go through a temp file and rename so a crash mid-write
//! never leaves a truncated snapshot.

use std::io;
use std::path::Path;

use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Load a snapshot file. Returns an empty vec when the file is absent or
/// cannot be parsed.
pub fn load_snapshot<V: DeserializeOwned>(path: &Path) -> Vec<V> {
    let data = match std::fs::read_to_string(path) {
        Ok(d) if !d.is_empty() => d,
        _ => {
            info!("no snapshot at {}, starting empty", path.display());
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<V>>(&data) {
        Ok(items) => {
            info!("restored {} documents from {}", items.len(), path.display());
            items
        }
        Err(e) => {
            warn!("failed to parse snapshot {}: {}, starting empty", path.display(), e);
            Vec::new()
        }
    }
}

/// Persist a snapshot atomically (temp file then rename).
pub fn save_snapshot<V: Serialize>(path: &Path, items: &[V]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_string_pretty(items)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, data)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");

        save_snapshot(&path, &[1u32, 2, 3]).unwrap();
        let back: Vec<u32> = load_snapshot(&path);
        assert_eq!(back, vec![1, 2, 3]);
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let back: Vec<u32> = load_snapshot(&dir.path().join("absent.json"));
        assert!(back.is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        std::fs::write(&path, "{not json").unwrap();
        let back: Vec<u32> = load_snapshot(&path);
        assert!(back.is_empty());
    }
}
