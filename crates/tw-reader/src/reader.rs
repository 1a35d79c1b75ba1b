//! The presentation-facing reader.
//!
//! `StoryReader` owns everything one reader needs: the story source, the
//! persistent store, the bound graph, the navigation session, preferences
//! and the notification queue. A host keeps one reader and feeds it events;
//! it never touches shared globals.

use tracing::{debug, error, info, warn};
use tw_story::{OutlineNode, StoryGraph, StoryResult, StorySource, is_ending_id};

use crate::config::ReaderConfig;
use crate::error::{SessionError, SessionResult};
use crate::event::ReaderEvent;
use crate::loader::{LoadCoordinator, LoadMode, LoadOutcome, PendingLoad};
use crate::notify::{Notification, Notifications};
use crate::prefs::{Preferences, Theme};
use crate::session::NavigationSession;
use crate::snapshot::SessionSnapshot;
use crate::store::{KeyValueStore, SAVED_PROGRESS_KEY};
use crate::view::{EndingProgress, StoryView};

/// Shown when `load` finds nothing to restore.
pub const NO_SAVED_PROGRESS: &str = "No saved progress found.";

/// Result of [`StoryReader::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Saved progress replaced the session.
    Restored,
    /// Nothing was saved.
    NoSavedProgress,
    /// The saved blob could not be decoded.
    Corrupt,
}

/// A reader bound to one story at a time.
pub struct StoryReader<S, K> {
    source: S,
    store: K,
    default_story: String,
    graph: Option<StoryGraph>,
    session: NavigationSession,
    preferences: Preferences,
    loads: LoadCoordinator,
    notifications: Notifications,
    reported_stage: Option<String>,
}

impl<S: StorySource, K: KeyValueStore> StoryReader<S, K> {
    /// Create a reader. Preferences are read from `store`; no story is
    /// loaded until [`StoryReader::open`] or [`StoryReader::load_story`].
    pub fn new(source: S, store: K, config: &ReaderConfig) -> Self {
        let defaults = Preferences::default().with_language(&config.default_language);
        let preferences = Preferences::load(&store, defaults);
        let session = NavigationSession::new(&config.default_story, &preferences.language);

        Self {
            source,
            store,
            default_story: config.default_story.clone(),
            graph: None,
            session,
            preferences,
            loads: LoadCoordinator::default(),
            notifications: Notifications::new(),
            reported_stage: None,
        }
    }

    /// Load the default story in the preferred language.
    pub fn open(&mut self) -> SessionResult<()> {
        let story = self.default_story.clone();
        let language = self.preferences.language.clone();
        self.load_story(&story, &language, false)
    }

    /// The navigation session.
    pub fn session(&self) -> &NavigationSession {
        &self.session
    }

    /// The bound graph, once a load has succeeded.
    pub fn graph(&self) -> Option<&StoryGraph> {
        self.graph.as_ref()
    }

    /// Current preferences.
    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// The persistent store.
    pub fn store(&self) -> &K {
        &self.store
    }

    /// Pending notifications.
    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Take all pending notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    /// Render the current node.
    ///
    /// A current node missing from the graph is reported once per stage
    /// and keeps failing until the reader is reset or navigates away.
    pub fn current_view(&mut self) -> SessionResult<StoryView> {
        let result = match &self.graph {
            Some(graph) => self.session.view(graph),
            None => Err(SessionError::NotReady),
        };
        if let Err(SessionError::InvalidStage { stage }) = &result {
            self.report_invalid_stage(stage);
        }
        result
    }

    /// Take a choice of the current node.
    pub fn choose(&mut self, index: usize) -> SessionResult<StoryView> {
        let result = match &self.graph {
            Some(graph) => self.session.choose(graph, index),
            None => Err(SessionError::NotReady),
        };
        match &result {
            Ok(_) => self.reported_stage = None,
            Err(e) => self.report(e),
        }
        result
    }

    /// Return to the previous node. Returns `false` when there is nowhere
    /// to go back to.
    pub fn go_back(&mut self) -> bool {
        let moved = self.session.go_back();
        if moved {
            self.reported_stage = None;
        }
        moved
    }

    /// Whether back-navigation is available.
    pub fn can_go_back(&self) -> bool {
        self.session.can_go_back()
    }

    /// Discovered endings against the endings in the bound graph.
    pub fn ending_progress(&self) -> EndingProgress {
        EndingProgress {
            discovered: self.session.discovered_endings().len(),
            total: self.graph.as_ref().map_or(0, StoryGraph::count_endings),
        }
    }

    /// Outline of the bound graph with the current node marked.
    pub fn outline(&self) -> Option<OutlineNode> {
        self.graph
            .as_ref()
            .map(|graph| graph.outline(self.session.current()))
    }

    /// Fetch and bind a story graph.
    ///
    /// On failure the previous graph and session stay as they were. With
    /// `preserve_state` the session keeps its navigation state and is
    /// rebound to the new graph; otherwise the story starts over.
    pub fn load_story(
        &mut self,
        story_id: &str,
        language: &str,
        preserve_state: bool,
    ) -> SessionResult<()> {
        let pending = self.begin_load(story_id, language, preserve_state);
        let result = tw_story::load(&self.source, story_id, language);
        self.finish_load(pending, result).map(|_| ())
    }

    /// Start a load whose fetch the host performs itself. Any earlier load
    /// still in flight is superseded.
    pub fn begin_load(&mut self, story_id: &str, language: &str, preserve_state: bool) -> PendingLoad {
        let mode = if preserve_state {
            LoadMode::Preserve
        } else {
            LoadMode::Fresh
        };
        let pending = self.loads.begin(story_id, language, mode);
        debug!(ticket = pending.ticket(), story = story_id, language, "load started");
        pending
    }

    /// Apply the result of a load started with [`StoryReader::begin_load`].
    /// Results of superseded loads are dropped, errors included, and each
    /// ticket applies at most once.
    pub fn finish_load(
        &mut self,
        pending: PendingLoad,
        result: StoryResult<StoryGraph>,
    ) -> SessionResult<LoadOutcome> {
        if !self.loads.finish_if_active(&pending) {
            debug!(
                ticket = pending.ticket(),
                story = %pending.story_id,
                language = %pending.language,
                "dropping superseded or finished load"
            );
            return Ok(LoadOutcome::Superseded);
        }
        self.apply_load(pending, result)?;
        Ok(LoadOutcome::Applied)
    }

    fn apply_load(&mut self, pending: PendingLoad, result: StoryResult<StoryGraph>) -> SessionResult<()> {
        let graph = match result {
            Ok(graph) => graph,
            Err(e) => {
                self.notifications.error(format!("Error loading story: {e}"));
                return Err(e.into());
            }
        };

        match pending.mode {
            LoadMode::Fresh => {
                self.session.rebind(&pending.story_id, &pending.language);
                self.session.reset(false);
            }
            LoadMode::Preserve => {
                self.session.rebind(&pending.story_id, &pending.language);
                self.session.reset(true);
            }
            LoadMode::Restore(session) => self.session = *session,
        }
        info!(
            story = %pending.story_id,
            language = %pending.language,
            endings = graph.count_endings(),
            "story bound"
        );
        self.graph = Some(graph);
        self.reported_stage = None;
        Ok(())
    }

    /// Open another story from its start in the current language.
    pub fn select_story(&mut self, story_id: &str) -> SessionResult<()> {
        let story_id = self.require("story", story_id)?;
        let language = self.preferences.language.clone();
        self.load_story(story_id, &language, false)
    }

    /// Switch language, keeping navigation state. The preference is
    /// persisted once the new graph has loaded.
    pub fn set_language(&mut self, language: &str) -> SessionResult<()> {
        let language = self.require("language", language)?;
        let story = self.session.story_id().to_string();
        self.load_story(&story, language, true)?;
        if let Err(e) = self.preferences.set_language(&mut self.store, language) {
            warn!("cannot persist language: {e}");
            self.notifications.error(format!("Could not save language: {e}"));
            return Err(e.into());
        }
        Ok(())
    }

    /// Change and persist the theme.
    pub fn set_theme(&mut self, theme: Theme) -> SessionResult<()> {
        self.preferences
            .set_theme(&mut self.store, theme)
            .map_err(|e| {
                self.notifications.error(format!("Could not save theme: {e}"));
                e.into()
            })
    }

    /// Change and persist the font size. Returns the size applied.
    pub fn set_font_size(&mut self, size: u32) -> SessionResult<u32> {
        self.preferences
            .set_font_size(&mut self.store, size)
            .map_err(|e| {
                self.notifications
                    .error(format!("Could not save font size: {e}"));
                e.into()
            })
    }

    /// Start the current story over.
    pub fn reset_to_start(&mut self) {
        debug!(story = %self.session.story_id(), "reset to start");
        self.session.reset(false);
        self.reported_stage = None;
    }

    /// Save progress to the single saved-progress slot.
    pub fn save(&mut self) -> SessionResult<()> {
        let result = self
            .session
            .snapshot()
            .stamped()
            .to_json()
            .map_err(SessionError::from)
            .and_then(|json| {
                self.store
                    .set(SAVED_PROGRESS_KEY, &json)
                    .map_err(SessionError::from)
            });

        match result {
            Ok(()) => {
                info!(story = %self.session.story_id(), stage = %self.session.current(), "progress saved");
                self.notifications.success("Progress saved!");
                Ok(())
            }
            Err(e) => {
                error!("cannot save progress: {e}");
                self.notifications
                    .error(format!("Could not save progress: {e}"));
                Err(e)
            }
        }
    }

    /// Restore saved progress.
    ///
    /// Nothing saved and a corrupt blob are reported as distinct outcomes
    /// and leave the session untouched, as does a failure to load the saved
    /// story's graph.
    pub fn load(&mut self) -> SessionResult<RestoreOutcome> {
        let raw = match self.store.get(SAVED_PROGRESS_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                self.notifications
                    .error(format!("Could not read saved progress: {e}"));
                return Err(e.into());
            }
        };
        let Some(raw) = raw else {
            info!("no saved progress");
            self.notifications.error(NO_SAVED_PROGRESS);
            return Ok(RestoreOutcome::NoSavedProgress);
        };

        let restored = match SessionSnapshot::from_json(&raw).and_then(NavigationSession::from_snapshot) {
            Ok(session) => session,
            Err(e) => {
                warn!("ignoring saved progress: {e}");
                self.notifications
                    .error(format!("Saved progress is corrupt: {e}"));
                return Ok(RestoreOutcome::Corrupt);
            }
        };

        let story = restored.story_id().to_string();
        let language = restored.language().to_string();
        let pending = self
            .loads
            .begin(&story, &language, LoadMode::Restore(Box::new(restored)));
        let result = tw_story::load(&self.source, &story, &language);
        self.finish_load(pending, result)?;

        if let Err(e) = self.preferences.set_language(&mut self.store, &language) {
            warn!("cannot persist language: {e}");
        }
        self.notifications.success("Progress loaded!");
        Ok(RestoreOutcome::Restored)
    }

    /// Handle one host event and return the view to render, if any.
    ///
    /// Failures are reported through the notification queue. Unlike
    /// [`StoryReader::choose`], an out-of-range choice index is rejected
    /// here before it reaches the session, so events never panic.
    pub fn dispatch(&mut self, event: ReaderEvent) -> Option<StoryView> {
        debug!(?event, "dispatch");
        let handled = match event {
            ReaderEvent::Choose(index) => self.choose_event(index),
            ReaderEvent::Back => {
                self.go_back();
                Ok(())
            }
            ReaderEvent::SelectStory(story) => self.select_story(&story),
            ReaderEvent::SelectLanguage(language) => self.set_language(&language),
            ReaderEvent::Save => self.save(),
            ReaderEvent::Load => self.load().map(|_| ()),
            ReaderEvent::SetTheme(theme) => self.set_theme(theme),
            ReaderEvent::SetFontSize(size) => self.set_font_size(size).map(|_| ()),
            ReaderEvent::Reset => {
                self.reset_to_start();
                Ok(())
            }
        };
        if let Err(e) = handled {
            debug!("event failed: {e}");
        }
        self.current_view().ok()
    }

    fn choose_event(&mut self, index: usize) -> SessionResult<()> {
        let current = self.session.current();
        let available = self.graph.as_ref().and_then(|graph| match graph.get(current) {
            Some(node) => Some(node.choices.len()),
            None if is_ending_id(current) => Some(0),
            None => None,
        });
        if let Some(available) = available.filter(|&available| index >= available) {
            let err = SessionError::ChoiceOutOfRange {
                stage: current.to_string(),
                index,
                available,
            };
            self.notifications.error(err.to_string());
            return Err(err);
        }
        self.choose(index).map(|_| ())
    }

    fn require<'a>(&mut self, what: &str, value: &'a str) -> SessionResult<&'a str> {
        let value = value.trim();
        if value.is_empty() {
            let err = SessionError::InvalidInput(format!("{what} must not be empty"));
            self.notifications.error(err.to_string());
            return Err(err);
        }
        Ok(value)
    }

    fn report(&mut self, err: &SessionError) {
        match err {
            SessionError::InvalidStage { stage } => self.report_invalid_stage(stage),
            other => self.notifications.error(other.to_string()),
        }
    }

    fn report_invalid_stage(&mut self, stage: &str) {
        if self.reported_stage.as_deref() == Some(stage) {
            return;
        }
        error!(
            stage,
            story = %self.session.story_id(),
            language = %self.session.language(),
            "invalid story stage"
        );
        self.notifications
            .error(format!("Invalid story stage: {stage}"));
        self.reported_stage = Some(stage.to_string());
    }
}
