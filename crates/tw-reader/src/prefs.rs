//! Reader preferences: theme, language and font size.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::error::StoreError;
use crate::store::{FONT_SIZE_KEY, KeyValueStore, LANGUAGE_KEY, THEME_KEY};

/// Smallest font size the reader accepts.
pub const MIN_FONT_SIZE: u32 = 12;
/// Largest font size the reader accepts.
pub const MAX_FONT_SIZE: u32 = 32;
/// Font size used when none is stored.
pub const DEFAULT_FONT_SIZE: u32 = 16;

/// Colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    /// Light grey with green buttons.
    #[default]
    Default,
    /// Dark background with slate-blue buttons.
    Dark,
    /// Pale blue with orange buttons.
    Fantasy,
    /// Magenta, cyan and yellow.
    Psychedelic,
    /// Green on black with a pixel font.
    Retrogaming,
}

/// Colours and font a presentation layer applies for a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Page background.
    pub background: &'static str,
    /// Body text.
    pub text: &'static str,
    /// Button background.
    pub button_background: &'static str,
    /// Button label.
    pub button_text: &'static str,
    /// Font family override, if any.
    pub font_family: Option<&'static str>,
}

impl Theme {
    /// All themes, in menu order.
    pub const ALL: [Theme; 5] = [
        Self::Default,
        Self::Dark,
        Self::Fantasy,
        Self::Psychedelic,
        Self::Retrogaming,
    ];

    /// Stored name of the theme.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Dark => "dark",
            Self::Fantasy => "fantasy",
            Self::Psychedelic => "psychedelic",
            Self::Retrogaming => "retrogaming",
        }
    }

    /// Colours for the theme.
    pub fn palette(&self) -> Palette {
        match self {
            Self::Default => Palette {
                background: "#f0f0f0",
                text: "#333",
                button_background: "#4CAF50",
                button_text: "white",
                font_family: None,
            },
            Self::Dark => Palette {
                background: "#333",
                text: "#f0f0f0",
                button_background: "#6a5acd",
                button_text: "white",
                font_family: None,
            },
            Self::Fantasy => Palette {
                background: "#e6f3ff",
                text: "#4a4a4a",
                button_background: "#ff9966",
                button_text: "#ffffff",
                font_family: None,
            },
            Self::Psychedelic => Palette {
                background: "#ff00ff",
                text: "#00ffff",
                button_background: "#ffff00",
                button_text: "#ff00ff",
                font_family: None,
            },
            Self::Retrogaming => Palette {
                background: "#000000",
                text: "#00ff00",
                button_background: "#808080",
                button_text: "#00ff00",
                font_family: Some("'Press Start 2P', cursive"),
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown theme '{s}'"))
    }
}

/// Persisted reader preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    /// Colour theme.
    pub theme: Theme,
    /// Language code for story documents.
    pub language: String,
    /// Story text size in pixels.
    pub font_size: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Default,
            language: "en".to_string(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl Preferences {
    /// Set the fallback language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Read preferences, each key independently. Missing, unreadable or
    /// unrecognized values fall back to `defaults`.
    pub fn load(store: &dyn KeyValueStore, defaults: Preferences) -> Self {
        let read = |key: &str| match store.get(key) {
            Ok(value) => value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()),
            Err(e) => {
                warn!("cannot read preference: {e}");
                None
            }
        };

        let theme = read(THEME_KEY)
            .and_then(|name| match name.parse() {
                Ok(theme) => Some(theme),
                Err(e) => {
                    warn!("ignoring stored theme: {e}");
                    None
                }
            })
            .unwrap_or(defaults.theme);
        let language = read(LANGUAGE_KEY).unwrap_or(defaults.language);
        let font_size = read(FONT_SIZE_KEY)
            .and_then(|size| size.parse::<u32>().ok())
            .map_or(defaults.font_size, clamp_font_size);

        Self {
            theme,
            language,
            font_size,
        }
    }

    /// Change and persist the theme.
    pub fn set_theme(&mut self, store: &mut dyn KeyValueStore, theme: Theme) -> Result<(), StoreError> {
        store.set(THEME_KEY, theme.name())?;
        self.theme = theme;
        Ok(())
    }

    /// Change and persist the language.
    pub fn set_language(
        &mut self,
        store: &mut dyn KeyValueStore,
        language: &str,
    ) -> Result<(), StoreError> {
        store.set(LANGUAGE_KEY, language)?;
        self.language = language.to_string();
        Ok(())
    }

    /// Change and persist the font size, clamped to the accepted range.
    /// Returns the size that was applied.
    pub fn set_font_size(
        &mut self,
        store: &mut dyn KeyValueStore,
        size: u32,
    ) -> Result<u32, StoreError> {
        let size = clamp_font_size(size);
        store.set(FONT_SIZE_KEY, &size.to_string())?;
        self.font_size = size;
        Ok(size)
    }
}

fn clamp_font_size(size: u32) -> u32 {
    size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}
