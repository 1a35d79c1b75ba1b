//! The navigation state machine.
//!
//! A session tracks where the reader is in one story: the current node, the
//! stack of nodes they came through, the choices they have taken, and the
//! endings they have reached. It holds no graph itself; every transition is
//! checked against the graph it is given, and a transition that cannot
//! resolve leaves the session untouched.

use std::collections::BTreeSet;

use tracing::{debug, error};
use tw_story::{Choice, ChoiceTarget, START_NODE, StoryGraph, is_ending_id};

use crate::error::{SessionError, SessionResult, SnapshotError};
use crate::snapshot::SessionSnapshot;
use crate::view::StoryView;
use crate::visited::VisitedChoices;

/// Mutable per-reader navigation state for one story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationSession {
    story_id: String,
    language: String,
    current: String,
    history: Vec<String>,
    visited: VisitedChoices,
    discovered_endings: BTreeSet<String>,
}

impl NavigationSession {
    /// Create a fresh session at `start`.
    pub fn new(story_id: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            story_id: story_id.into(),
            language: language.into(),
            current: START_NODE.to_string(),
            history: Vec::new(),
            visited: VisitedChoices::new(),
            discovered_endings: BTreeSet::new(),
        }
    }

    /// Story the session belongs to.
    pub fn story_id(&self) -> &str {
        &self.story_id
    }

    /// Language of the graph the session is bound to.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Current node identifier.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Previously visited nodes, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Choices taken so far.
    pub fn visited(&self) -> &VisitedChoices {
        &self.visited
    }

    /// Whether a specific choice has been taken.
    pub fn is_visited(&self, node: &str, index: usize) -> bool {
        self.visited.contains(node, index)
    }

    /// Distinct endings reached.
    pub fn discovered_endings(&self) -> &BTreeSet<String> {
        &self.discovered_endings
    }

    /// Whether back-navigation is possible.
    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Render the current node.
    ///
    /// An ending reached through a choice renders even when the graph has
    /// no node for it. Any other unknown identifier is an
    /// [`SessionError::InvalidStage`].
    pub fn view(&self, graph: &StoryGraph) -> SessionResult<StoryView> {
        match graph.get(&self.current) {
            Some(node) => Ok(StoryView::of_node(node, &self.visited, self.can_go_back())),
            None if is_ending_id(&self.current) => Ok(StoryView::unauthored_ending(
                &self.current,
                self.can_go_back(),
            )),
            None => Err(SessionError::InvalidStage {
                stage: self.current.clone(),
            }),
        }
    }

    /// Take the choice at `index` from the current node.
    ///
    /// All preconditions are checked before anything changes: the current
    /// node must resolve, the index must be in range, and a non-ending
    /// target must exist in the graph. Then the choice is marked visited,
    /// the current node is pushed onto the history, an ending target is
    /// recorded as discovered, and the target becomes current.
    ///
    /// An out-of-range index is a caller bug: it panics in debug builds and
    /// returns [`SessionError::ChoiceOutOfRange`] otherwise.
    pub fn choose(&mut self, graph: &StoryGraph, index: usize) -> SessionResult<StoryView> {
        let choices: &[Choice] = match graph.get(&self.current) {
            Some(node) => node.choices.as_slice(),
            None if is_ending_id(&self.current) => &[],
            None => {
                return Err(SessionError::InvalidStage {
                    stage: self.current.clone(),
                });
            }
        };

        debug_assert!(
            index < choices.len(),
            "choice index {index} out of range at '{}' ({} available)",
            self.current,
            choices.len()
        );
        let Some(choice) = choices.get(index) else {
            error!(stage = %self.current, index, "choice index out of range");
            return Err(SessionError::ChoiceOutOfRange {
                stage: self.current.clone(),
                index,
                available: choices.len(),
            });
        };

        let target = choice.target.clone();
        if let ChoiceTarget::Node(next) = &target {
            if !graph.contains(next) {
                return Err(SessionError::InvalidStage {
                    stage: next.clone(),
                });
            }
        }

        self.visited.mark(self.current.clone(), index);
        let previous = std::mem::replace(&mut self.current, target.id().to_string());
        debug!(from = %previous, to = %self.current, index, "choice taken");
        self.history.push(previous);
        if target.is_ending() && self.discovered_endings.insert(self.current.clone()) {
            debug!(ending = %self.current, "ending discovered");
        }

        self.view(graph)
    }

    /// Return to the previous node. Returns `false` and changes nothing
    /// when there is no history.
    pub fn go_back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                debug!(from = %self.current, to = %previous, "went back");
                self.current = previous;
                true
            }
            None => false,
        }
    }

    /// Reset navigation. With `preserve_state` the session is left as is,
    /// which is what a language switch wants; otherwise the reader returns
    /// to `start` with no history, visits or endings.
    pub fn reset(&mut self, preserve_state: bool) {
        if preserve_state {
            return;
        }
        self.current = START_NODE.to_string();
        self.history.clear();
        self.visited.clear();
        self.discovered_endings.clear();
    }

    /// Bind the session to another story or language without touching its
    /// navigation state.
    pub fn rebind(&mut self, story_id: impl Into<String>, language: impl Into<String>) {
        self.story_id = story_id.into();
        self.language = language.into();
    }

    /// Capture the session for persistence.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_stage: self.current.clone(),
            story_history: self.history.clone(),
            visited_choices: self.visited.to_keys(),
            language: self.language.clone(),
            story_id: self.story_id.clone(),
            discovered_endings: self.discovered_endings.iter().cloned().collect(),
            saved_at: None,
        }
    }

    /// Rebuild a session from a snapshot.
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Result<Self, SnapshotError> {
        let required = [
            ("currentStage", &snapshot.current_stage),
            ("currentLanguage", &snapshot.language),
            ("currentStoryFile", &snapshot.story_id),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.is_empty()) {
            return Err(SnapshotError::Inconsistent(format!("{field} is empty")));
        }
        if snapshot.story_history.iter().any(String::is_empty) {
            return Err(SnapshotError::Inconsistent(
                "storyHistory contains an empty stage".to_string(),
            ));
        }
        if let Some(bad) = snapshot
            .discovered_endings
            .iter()
            .find(|ending| !is_ending_id(ending))
        {
            return Err(SnapshotError::Inconsistent(format!(
                "discoveredEndings contains non-ending '{bad}'"
            )));
        }

        let visited = VisitedChoices::from_keys(&snapshot.visited_choices).map_err(|key| {
            SnapshotError::Inconsistent(format!("visitedChoices has malformed key '{key}'"))
        })?;

        Ok(Self {
            story_id: snapshot.story_id,
            language: snapshot.language,
            current: snapshot.current_stage,
            history: snapshot.story_history,
            visited,
            discovered_endings: snapshot.discovered_endings.into_iter().collect(),
        })
    }
}
