use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::StorageError;

/// A local key-value namespace of JSON documents, one file per key.
///
/// This is the on-device replacement for the platform key-value storage
/// the app previously sat on. Writes go through a temp file and a rename,
/// so a reader never observes a partially written document.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .map_err(|e| StorageError::Write {
                key: root.display().to_string(),
                source: e,
            })?;
        Ok(Store { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Read the raw bytes stored under `key`.
    pub async fn read(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        match fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StorageError::NotFound {
                key: key.to_string(),
            }),
            Err(e) => Err(StorageError::Read {
                key: key.to_string(),
                source: e,
            }),
        }
    }

    /// Write `bytes` under `key`, replacing any existing document.
    pub async fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let wrap = |e| StorageError::Write {
            key: key.to_string(),
            source: e,
        };

        let tmp = self.root.join(format!("{key}.json.tmp"));
        fs::write(&tmp, bytes).await.map_err(wrap)?;
        fs::rename(&tmp, self.path_for(key)).await.map_err(wrap)
    }

    /// Remove the document under `key`. Removing an absent key is not an
    /// error.
    pub async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Remove {
                key: key.to_string(),
                source: e,
            }),
        }
    }

    pub async fn exists(&self, key: &str) -> bool {
        fs::try_exists(self.path_for(key)).await.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn write_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path()).await.unwrap();

        store.write("pedss_settings", b"{}").await.unwrap();
        assert!(store.exists("pedss_settings").await);
        assert_eq!(store.read("pedss_settings").await.unwrap(), b"{}");
    }

    #[tokio::test]
    async fn missing_key_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path()).await.unwrap();

        match store.read("absent").await {
            Err(StorageError::NotFound { key }) => assert_eq!(key, "absent"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path()).await.unwrap();

        store.write("k", b"1").await.unwrap();
        store.remove("k").await.unwrap();
        store.remove("k").await.unwrap();
        assert!(!store.exists("k").await);
    }

    #[tokio::test]
    async fn write_replaces_existing_document() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path()).await.unwrap();

        store.write("k", b"old").await.unwrap();
        store.write("k", b"new").await.unwrap();
        assert_eq!(store.read("k").await.unwrap(), b"new");
    }
}
