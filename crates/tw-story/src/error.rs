//! Error types for loading story documents.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for story loading.
pub type StoryResult<T> = Result<T, LoadError>;

/// Errors that can occur while fetching or parsing a story document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The document file could not be read.
    #[error("cannot read story document {}: {source}", path.display())]
    Unreachable {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The source has no document for this story and language.
    #[error("no story document for '{story}' ({language})")]
    NotFound {
        /// Story identifier.
        story: String,
        /// Language code.
        language: String,
    },

    /// The document is not a valid story graph.
    #[error("malformed story document '{story}' ({language}): {source}")]
    Malformed {
        /// Story identifier.
        story: String,
        /// Language code.
        language: String,
        /// Parser failure.
        source: serde_json::Error,
    },

    /// The document has no `start` node.
    #[error("story '{story}' ({language}) has no start node")]
    MissingStart {
        /// Story identifier.
        story: String,
        /// Language code.
        language: String,
    },

    /// The document has a node keyed by the empty string.
    #[error("story '{story}' ({language}) has a node with an empty identifier")]
    EmptyNodeId {
        /// Story identifier.
        story: String,
        /// Language code.
        language: String,
    },
}
