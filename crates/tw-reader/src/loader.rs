//! Ordering of overlapping story loads.
//!
//! A host with an asynchronous fetch may start a second load before the
//! first resolves (a quick double language switch). Every load takes a
//! ticket; only the most recently issued ticket may apply its result, and
//! only once.

use crate::session::NavigationSession;

/// What to do with the session once a load succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadMode {
    /// Start the story over.
    Fresh,
    /// Keep navigation state and rebind to the new graph.
    Preserve,
    /// Replace the session with restored progress.
    Restore(Box<NavigationSession>),
}

/// A load that has been started but not yet applied.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingLoad {
    ticket: u64,
    /// Story being loaded.
    pub story_id: String,
    /// Language being loaded.
    pub language: String,
    /// How the session is updated on success.
    pub mode: LoadMode,
}

impl PendingLoad {
    /// Generation number of this load.
    pub fn ticket(&self) -> u64 {
        self.ticket
    }
}

/// Result of applying a finished load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The graph was bound.
    Applied,
    /// A newer load was started meanwhile, or this ticket was already
    /// finished; the result was dropped.
    Superseded,
}

/// Issues tickets; the last one issued is the only active one until it
/// finishes.
#[derive(Debug, Clone, Default)]
pub(crate) struct LoadCoordinator {
    issued: u64,
    active: Option<u64>,
}

impl LoadCoordinator {
    pub(crate) fn begin(&mut self, story_id: &str, language: &str, mode: LoadMode) -> PendingLoad {
        self.issued += 1;
        self.active = Some(self.issued);
        PendingLoad {
            ticket: self.issued,
            story_id: story_id.to_string(),
            language: language.to_string(),
            mode,
        }
    }

    pub(crate) fn is_active(&self, pending: &PendingLoad) -> bool {
        self.active == Some(pending.ticket)
    }

    /// Retire `pending` if it is still the active load.
    pub(crate) fn finish_if_active(&mut self, pending: &PendingLoad) -> bool {
        if self.is_active(pending) {
            self.active = None;
            true
        } else {
            false
        }
    }
}
