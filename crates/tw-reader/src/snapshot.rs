//! Serialized form of a session.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;

/// Persisted session state.
///
/// The JSON layout uses the same keys as the saved-progress blobs of the
/// web reader: `currentStage`, `storyHistory`, `visitedChoices` (an object of
/// `"<node>-<index>": true`), `currentLanguage`, `currentStoryFile` and
/// `discoveredEndings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Current node.
    pub current_stage: String,
    /// Back-history, oldest first.
    pub story_history: Vec<String>,
    /// Taken choices keyed `"<node>-<index>"`.
    pub visited_choices: BTreeMap<String, bool>,
    /// Language code.
    #[serde(rename = "currentLanguage")]
    pub language: String,
    /// Story identifier.
    #[serde(rename = "currentStoryFile")]
    pub story_id: String,
    /// Distinct endings reached, in no particular order.
    pub discovered_endings: Vec<String>,
    /// When the snapshot was written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl SessionSnapshot {
    /// Stamp the snapshot with the current time.
    pub fn stamped(mut self) -> Self {
        self.saved_at = Some(Utc::now());
        self
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON. Missing fields or wrong types are
    /// [`SnapshotError::Malformed`].
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}
