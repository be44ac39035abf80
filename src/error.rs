//! Error types for the draft store.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read slot {key}: {source}")]
    StorageRead {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write slot {key}: {source}")]
    StorageWrite {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to remove slot {key}: {source}")]
    StorageRemove {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode draft: {0}")]
    DraftEncode(#[source] serde_json::Error),
    #[error("stored draft is not valid JSON: {0}")]
    DraftDecode(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
