//! Events a presentation layer sends to the reader.

use crate::prefs::Theme;

/// A discrete host event, handled by [`crate::StoryReader::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReaderEvent {
    /// Take the choice at this index of the current node.
    Choose(usize),
    /// Return to the previous node.
    Back,
    /// Open another story from its start, in the current language.
    SelectStory(String),
    /// Switch language, keeping navigation state.
    SelectLanguage(String),
    /// Save progress.
    Save,
    /// Restore saved progress.
    Load,
    /// Change the colour theme.
    SetTheme(Theme),
    /// Change the font size.
    SetFontSize(u32),
    /// Start the current story over.
    Reset,
}
