//! Global display preferences shared by every note.
//!
//! Each preference is its own store entry holding a stringified primitive, so a
//! change rewrites one small key rather than the note list.

use crate::config::NotesConfig;
use crate::error::Result;
use crate::store::{keys, KeyValueStore};
use tracing::warn;

pub const LIGHT_TEXT_COLOR: &str = "#000000";
pub const DARK_TEXT_COLOR: &str = "#ffffff";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    DarkMode,
    FontSize,
    Bold,
    Italic,
    Underline,
    TextColor,
}

impl Setting {
    pub const ALL: [Setting; 6] = [
        Setting::DarkMode,
        Setting::FontSize,
        Setting::Bold,
        Setting::Italic,
        Setting::Underline,
        Setting::TextColor,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Setting::DarkMode => keys::DARK_MODE,
            Setting::FontSize => keys::FONT_SIZE,
            Setting::Bold => keys::BOLD,
            Setting::Italic => keys::ITALIC,
            Setting::Underline => keys::UNDERLINE,
            Setting::TextColor => keys::TEXT_COLOR,
        }
    }
}

/// The on/off text styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Bold,
    Italic,
    Underline,
}

impl Style {
    pub fn setting(self) -> Setting {
        match self {
            Style::Bold => Setting::Bold,
            Style::Italic => Setting::Italic,
            Style::Underline => Setting::Underline,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattingState {
    pub dark_mode: bool,
    pub font_size: u32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub text_color: String,
}

impl FormattingState {
    pub fn new(config: &NotesConfig) -> Self {
        Self {
            dark_mode: false,
            font_size: config.default_font_size,
            bold: false,
            italic: false,
            underline: false,
            text_color: LIGHT_TEXT_COLOR.to_string(),
        }
    }

    /// Reads every preference, keeping the default for missing or unusable values.
    pub fn load<S: KeyValueStore>(store: &S, config: &NotesConfig) -> Result<Self> {
        let mut state = Self::new(config);

        if let Some(raw) = store.get_item(keys::DARK_MODE)? {
            state.dark_mode = raw == "true";
            state.text_color = default_text_color(state.dark_mode).to_string();
        }
        if let Some(raw) = store.get_item(keys::BOLD)? {
            state.bold = raw == "true";
        }
        if let Some(raw) = store.get_item(keys::ITALIC)? {
            state.italic = raw == "true";
        }
        if let Some(raw) = store.get_item(keys::UNDERLINE)? {
            state.underline = raw == "true";
        }
        if let Some(raw) = store.get_item(keys::FONT_SIZE)? {
            match raw.trim().parse::<u32>() {
                Ok(size) if config.font_size_in_range(size) => state.font_size = size,
                _ => warn!(value = %raw, "ignoring stored font size"),
            }
        }
        if let Some(raw) = store.get_item(keys::TEXT_COLOR)? {
            if is_hex_color(&raw) {
                state.text_color = raw;
            } else {
                warn!(value = %raw, "ignoring stored text color");
            }
        }

        Ok(state)
    }

    pub fn style(&self, style: Style) -> bool {
        match style {
            Style::Bold => self.bold,
            Style::Italic => self.italic,
            Style::Underline => self.underline,
        }
    }

    /// Stored form of one preference.
    pub fn value(&self, setting: Setting) -> String {
        match setting {
            Setting::DarkMode => self.dark_mode.to_string(),
            Setting::FontSize => self.font_size.to_string(),
            Setting::Bold => self.bold.to_string(),
            Setting::Italic => self.italic.to_string(),
            Setting::Underline => self.underline.to_string(),
            Setting::TextColor => self.text_color.clone(),
        }
    }

    pub fn persist<S: KeyValueStore>(&self, store: &mut S, setting: Setting) -> Result<()> {
        store.set_item(setting.key(), &self.value(setting))
    }

    pub fn persist_all<S: KeyValueStore>(&self, store: &mut S) -> Result<()> {
        for setting in Setting::ALL {
            self.persist(store, setting)?;
        }
        Ok(())
    }
}

pub fn default_text_color(dark_mode: bool) -> &'static str {
    if dark_mode {
        DARK_TEXT_COLOR
    } else {
        LIGHT_TEXT_COLOR
    }
}

/// `#rgb` or `#rrggbb`.
pub fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn defaults_without_stored_values() {
        let state = FormattingState::load(&InMemoryStore::new(), &NotesConfig::default()).unwrap();
        assert_eq!(state, FormattingState::new(&NotesConfig::default()));
        assert_eq!(state.font_size, 16);
        assert_eq!(state.text_color, "#000000");
    }

    #[test]
    fn loads_stored_values() {
        let store = StoreFixture::new()
            .with_raw(keys::DARK_MODE, "true")
            .with_raw(keys::FONT_SIZE, "24")
            .with_raw(keys::BOLD, "true")
            .with_raw(keys::ITALIC, "false")
            .with_raw(keys::UNDERLINE, "true")
            .with_raw(keys::TEXT_COLOR, "#ff8800")
            .build();
        let state = FormattingState::load(&store, &NotesConfig::default()).unwrap();

        assert!(state.dark_mode);
        assert_eq!(state.font_size, 24);
        assert!(state.bold);
        assert!(!state.italic);
        assert!(state.underline);
        assert_eq!(state.text_color, "#ff8800");
    }

    #[test]
    fn dark_mode_without_color_uses_white() {
        let store = StoreFixture::new().with_raw(keys::DARK_MODE, "true").build();
        let state = FormattingState::load(&store, &NotesConfig::default()).unwrap();
        assert_eq!(state.text_color, DARK_TEXT_COLOR);
    }

    #[test]
    fn bad_stored_values_are_ignored() {
        let store = StoreFixture::new()
            .with_raw(keys::FONT_SIZE, "300")
            .with_raw(keys::TEXT_COLOR, "red")
            .build();
        let state = FormattingState::load(&store, &NotesConfig::default()).unwrap();
        assert_eq!(state.font_size, 16);
        assert_eq!(state.text_color, LIGHT_TEXT_COLOR);
    }

    #[test]
    fn persist_all_round_trips() {
        let mut store = InMemoryStore::new();
        let mut state = FormattingState::new(&NotesConfig::default());
        state.italic = true;
        state.font_size = 30;
        state.persist_all(&mut store).unwrap();

        assert_eq!(store.get_item(keys::ITALIC).unwrap().as_deref(), Some("true"));
        assert_eq!(store.get_item(keys::FONT_SIZE).unwrap().as_deref(), Some("30"));
        let loaded = FormattingState::load(&store, &NotesConfig::default()).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn hex_colors() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#A1b2C3"));
        assert!(!is_hex_color("fff"));
        assert!(!is_hex_color("#ffff"));
        assert!(!is_hex_color("#ggg"));
    }
}
