use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("record not found: {key}")]
    NotFound { key: String },

    #[error("assessment not found: {id}")]
    AssessmentNotFound { id: Uuid },

    #[error("assessment id already exists: {id}")]
    DuplicateId { id: Uuid },

    #[error("assessment collection schema v{found} is newer than this build supports (v{supported})")]
    UnsupportedSchema { found: u32, supported: u32 },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to read {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove {key}: {source}")]
    Remove {
        key: String,
        #[source]
        source: std::io::Error,
    },
}
