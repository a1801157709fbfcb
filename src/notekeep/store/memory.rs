use super::KeyValueStore;
use crate::error::{NotesError, Result};
use std::collections::BTreeMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    items: BTreeMap<String, String>,
    simulate_write_error: bool,
    writes: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    /// Number of successful `set_item` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }
}

impl KeyValueStore for InMemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error {
            return Err(NotesError::Store("Simulated write error".to_string()));
        }
        self.items.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Note, NoteId};
    use crate::store::keys;
    use crate::store::schema::StoredNote;
    use chrono::{TimeZone, Utc};

    pub struct StoreFixture {
        pub store: InMemoryStore,
        notes: Vec<Note>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                notes: Vec::new(),
            }
        }

        /// Adds `count` unlocked notes, newest first, with ids 100, 101, ...
        pub fn with_notes(mut self, count: usize) -> Self {
            for i in 0..count {
                let created = Utc.with_ymd_and_hms(2024, 5, 1, 9, i as u32, 0).unwrap();
                let mut note = Note::new(100 + i as NoteId, created);
                note.content = format!("Test Note {}\nContent for note {}", i + 1, i + 1);
                note.title = format!("Test Note {}", i + 1);
                self.notes.insert(0, note);
            }
            self
        }

        pub fn with_note(mut self, note: Note) -> Self {
            self.notes.push(note);
            self
        }

        pub fn with_active(mut self, id: NoteId) -> Self {
            self.store
                .set_item(keys::ACTIVE_NOTE, &id.to_string())
                .unwrap();
            self
        }

        pub fn with_raw(mut self, key: &str, value: &str) -> Self {
            self.store.set_item(key, value).unwrap();
            self
        }

        pub fn build(mut self) -> InMemoryStore {
            if !self.notes.is_empty() {
                let records: Vec<StoredNote> = self.notes.iter().map(StoredNote::from).collect();
                let json = serde_json::to_string(&records).unwrap();
                self.store.set_item(keys::NOTES, &json).unwrap();
            }
            self.store
        }
    }
}
