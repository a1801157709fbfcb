//! # Storage Layer
//!
//! notekeep persists into a flat, synchronous key-value store shaped like the
//! browser's `localStorage`: string keys, string values. The [`KeyValueStore`]
//! trait is the port; nothing above it knows where the bytes go.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: in-memory map for tests, can simulate write failures
//! - [`fs::FileStore`]: a single `local_storage.json` file holding every key,
//!   for native hosts
//!
//! A WASM host implements the trait over `window.localStorage` directly.
//!
//! ## Layout
//!
//! ```text
//! notes              JSON array of stored notes (see schema.rs)
//! activeNote         "1700000000000"
//! darkMode           "true" / "false"
//! globalFontSize     "16"
//! globalIsBold       "true" / "false"
//! globalIsItalic     "true" / "false"
//! globalIsUnderline  "true" / "false"
//! globalTextColor    "#000000"
//! ```
//!
//! Key names match the browser build so both read the same storage.

use crate::error::Result;

pub mod fs;
pub mod memory;
pub mod schema;

pub mod keys {
    pub const NOTES: &str = "notes";
    pub const ACTIVE_NOTE: &str = "activeNote";
    pub const DARK_MODE: &str = "darkMode";
    pub const FONT_SIZE: &str = "globalFontSize";
    pub const BOLD: &str = "globalIsBold";
    pub const ITALIC: &str = "globalIsItalic";
    pub const UNDERLINE: &str = "globalIsUnderline";
    pub const TEXT_COLOR: &str = "globalTextColor";
}

/// Abstract interface for the persistent key-value store.
///
/// Writes are synchronous: when `set_item` returns `Ok`, the value is durable
/// as far as the backend can tell.
pub trait KeyValueStore {
    /// Read a value, `None` if the key was never written
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove a key; removing a missing key is not an error
    fn remove_item(&mut self, key: &str) -> Result<()>;
}
