//! Whole-file JSON persistence shared by the flashcard and profile stores.
//!
//! Each store keeps everything in one file and rewrites it on every
//! mutation. Writes go to `<file>.tmp` first and are renamed over the
//! target, so a crash leaves either the old or the new contents.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Get the default data directory
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::data_local_dir()
        .map(|p| p.join("remora"))
        .ok_or(StorageError::DataDirNotFound)
}

/// Read a JSON file, returning the type's default when the file is missing
pub fn read_json_or_default<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        log::debug!("{:?} does not exist yet, using empty store", path);
        return Ok(T::default());
    }

    let content = fs::read_to_string(path)?;
    let value = serde_json::from_str(&content)?;
    Ok(value)
}

/// Write a value as pretty JSON using atomic write (write to .tmp then rename)
pub fn write_json_atomic<T>(path: &Path, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = tmp_path_for(path);
    let json = serde_json::to_string_pretty(value)?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_default() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.json");

        let map: BTreeMap<String, u32> = read_json_or_default(&path).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("store.json");

        let mut map = BTreeMap::new();
        map.insert("a".to_string(), 1u32);
        write_json_atomic(&path, &map).unwrap();

        let loaded: BTreeMap<String, u32> = read_json_or_default(&path).unwrap();
        assert_eq!(loaded, map);
        assert!(!temp.path().join("nested").join("store.json.tmp").exists());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let result: Result<BTreeMap<String, u32>> = read_json_or_default(&path);
        assert!(matches!(result, Err(StorageError::Json(_))));
    }
}
