use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;
use crate::store::Store;

/// Load a JSON document from the store.
pub async fn load_state<T: DeserializeOwned>(store: &Store, key: &str) -> Result<T, StorageError> {
    let bytes = store.read(key).await?;
    let value: T = serde_json::from_slice(&bytes)?;
    Ok(value)
}

/// Load a JSON document, falling back to `T::default()` when the key has
/// never been written. Every other error still propagates.
pub async fn load_state_or_default<T>(store: &Store, key: &str) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default,
{
    match load_state(store, key).await {
        Ok(value) => Ok(value),
        Err(StorageError::NotFound { .. }) => Ok(T::default()),
        Err(e) => Err(e),
    }
}

/// Save a JSON document to the store, pretty-printed.
pub async fn save_state<T: Serialize>(
    store: &Store,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    store.write(key, &body).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Doc {
        n: u32,
    }

    #[tokio::test]
    async fn state_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path()).await.unwrap();

        save_state(&store, "doc", &Doc { n: 7 }).await.unwrap();
        let loaded: Doc = load_state(&store, "doc").await.unwrap();
        assert_eq!(loaded, Doc { n: 7 });
    }

    #[tokio::test]
    async fn absent_state_defaults() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path()).await.unwrap();

        let loaded: Doc = load_state_or_default(&store, "doc").await.unwrap();
        assert_eq!(loaded, Doc::default());
    }

    #[tokio::test]
    async fn malformed_state_is_a_loud_error() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path()).await.unwrap();

        store.write("doc", b"{\"n\": \"seven\"}").await.unwrap();
        let result: Result<Doc, _> = load_state_or_default(&store, "doc").await;
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }
}
