//! Reading sessions for Taleweaver stories.
//!
//! [`NavigationSession`] is the state machine: current node, back-history,
//! visited choices and discovered endings. [`StoryReader`] binds a session to
//! a loaded [`tw_story::StoryGraph`] and exposes the operations a
//! presentation layer drives: choosing, going back, switching story or
//! language, saving and restoring progress, and reading preferences.

/// Reader configuration: directories and startup story.
pub mod config;
/// Error types for sessions, snapshots, and storage.
pub mod error;
/// Host events handled by the reader.
pub mod event;
/// Ordering of overlapping story loads.
pub mod loader;
/// The success/error notification queue.
pub mod notify;
/// Theme, language, and font-size preferences.
pub mod prefs;
/// The presentation-facing reader.
pub mod reader;
/// Navigation state for one reading session.
pub mod session;
/// Serialized saved progress.
pub mod snapshot;
/// Persistent key-value storage.
pub mod store;
/// What a host renders for the current node.
pub mod view;
/// Visited-choice tracking.
pub mod visited;

pub use config::ReaderConfig;
pub use error::{SessionError, SessionResult, SnapshotError, StoreError};
pub use event::ReaderEvent;
pub use loader::{LoadMode, LoadOutcome, PendingLoad};
pub use notify::{Notification, Notifications};
pub use prefs::{Palette, Preferences, Theme};
pub use reader::{RestoreOutcome, StoryReader};
pub use session::NavigationSession;
pub use snapshot::SessionSnapshot;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use view::{ChoiceView, EndingProgress, StoryView};
pub use visited::VisitedChoices;
