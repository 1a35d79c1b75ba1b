//! Configuration for a reader.

use std::path::PathBuf;

/// Where stories and saved data live, and what to open first.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Directory holding `<story>_<language>.json` documents.
    pub stories_dir: PathBuf,
    /// Directory for saved progress and preferences.
    pub data_dir: PathBuf,
    /// Story opened when the reader starts.
    pub default_story: String,
    /// Language used when no preference is stored.
    pub default_language: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            stories_dir: PathBuf::from("Stories"),
            data_dir: default_data_dir(),
            default_story: "storyData_1".to_string(),
            default_language: "en".to_string(),
        }
    }
}

impl ReaderConfig {
    /// Set the stories directory.
    pub fn with_stories_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.stories_dir = dir.into();
        self
    }

    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the story opened at startup.
    pub fn with_default_story(mut self, story: impl Into<String>) -> Self {
        self.default_story = story.into();
        self
    }

    /// Set the fallback language.
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }
}

/// `<platform data dir>/taleweaver`, or `.taleweaver` when the platform has
/// none.
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("taleweaver"))
        .unwrap_or_else(|| PathBuf::from(".taleweaver"))
}
