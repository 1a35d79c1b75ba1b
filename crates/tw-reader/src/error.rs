//! Error types for reading sessions.

use thiserror::Error;
use tw_story::LoadError;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while navigating or persisting a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No story graph has been loaded yet.
    #[error("no story loaded")]
    NotReady,

    /// A node identifier does not resolve in the loaded graph.
    #[error("invalid story stage: {stage}")]
    InvalidStage {
        /// The unresolved identifier.
        stage: String,
    },

    /// A choice index past the end of the current node's choices.
    #[error("choice {index} out of range at '{stage}' ({available} available)")]
    ChoiceOutOfRange {
        /// Node the choice was made at.
        stage: String,
        /// Requested index.
        index: usize,
        /// Number of choices the node has.
        available: usize,
    },

    /// Invalid host input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Story document could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Saved progress could not be decoded.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// Persistent storage failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Saved progress is missing required fields or has the wrong shape.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The blob is not valid snapshot JSON.
    #[error("corrupt progress: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The blob parsed but its contents are unusable.
    #[error("corrupt progress: {0}")]
    Inconsistent(String),
}

/// Persistent key-value storage failed.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a key failed.
    #[error("storage error for '{key}': {source}")]
    Io {
        /// Key being accessed.
        key: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
}
