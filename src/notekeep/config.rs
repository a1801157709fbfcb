use crate::error::{NotesError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Tunable limits for notekeep, stored in `config.json` next to the data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotesConfig {
    /// Shortest key accepted when setting a note password
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,

    /// Titles are the first line of content, cut to this many chars
    #[serde(default = "default_title_max_chars")]
    pub title_max_chars: usize,

    /// How long a toast stays visible
    #[serde(default = "default_toast_ms")]
    pub toast_ms: u64,

    /// How long an error stays visible inside the password prompt
    #[serde(default = "default_prompt_error_ms")]
    pub prompt_error_ms: u64,

    #[serde(default = "default_min_font_size")]
    pub min_font_size: u32,

    #[serde(default = "default_max_font_size")]
    pub max_font_size: u32,

    #[serde(default = "default_font_size")]
    pub default_font_size: u32,
}

fn default_min_password_len() -> usize {
    4
}

fn default_title_max_chars() -> usize {
    crate::model::TITLE_MAX_CHARS
}

fn default_toast_ms() -> u64 {
    2500
}

fn default_prompt_error_ms() -> u64 {
    3000
}

fn default_min_font_size() -> u32 {
    12
}

fn default_max_font_size() -> u32 {
    72
}

fn default_font_size() -> u32 {
    16
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            min_password_len: default_min_password_len(),
            title_max_chars: default_title_max_chars(),
            toast_ms: default_toast_ms(),
            prompt_error_ms: default_prompt_error_ms(),
            min_font_size: default_min_font_size(),
            max_font_size: default_max_font_size(),
            default_font_size: default_font_size(),
        }
    }
}

impl NotesConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(NotesError::Io)?;
        let config: NotesConfig =
            serde_json::from_str(&content).map_err(NotesError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(NotesError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(NotesError::Serialization)?;
        fs::write(config_path, content).map_err(NotesError::Io)?;
        Ok(())
    }

    pub fn font_size_in_range(&self, size: u32) -> bool {
        (self.min_font_size..=self.max_font_size).contains(&size)
    }

    pub fn toast_duration(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.toast_ms as i64)
    }

    pub fn prompt_error_duration(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.prompt_error_ms as i64)
    }
}
