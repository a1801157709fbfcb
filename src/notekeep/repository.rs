//! # Note Repository
//!
//! The single in-memory source of truth: an ordered list of notes (most
//! recent first) plus the id of the active note.
//!
//! Two invariants hold after every operation:
//! - the list is never empty (deleting the last note is refused)
//! - the active id always names a note in the list
//!
//! The repository never writes to storage on its own. Callers mutate, then call
//! [`NoteRepository::persist`] and [`NoteRepository::persist_active`]; the API
//! layer does this after every mutation.

use crate::error::{NotesError, Result};
use crate::model::{derive_title, Note, NoteId, TITLE_MAX_CHARS};
use crate::store::schema::StoredNote;
use crate::store::{keys, KeyValueStore};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct NoteRepository {
    notes: Vec<Note>,
    active_id: NoteId,
    title_max_chars: usize,
}

impl NoteRepository {
    /// A fresh repository holding only the seed note.
    pub fn new(now: DateTime<Utc>) -> Self {
        let seed = Note::seed(now);
        Self {
            active_id: seed.id,
            notes: vec![seed],
            title_max_chars: TITLE_MAX_CHARS,
        }
    }

    pub fn with_title_max_chars(mut self, max_chars: usize) -> Self {
        self.title_max_chars = max_chars;
        self
    }

    /// Reads notes and the active id from the store, upgrading old records.
    ///
    /// A missing or empty notes entry keeps the seed note. A stored active id
    /// that names no note falls back to the first one.
    pub fn load<S: KeyValueStore>(
        store: &S,
        now: DateTime<Utc>,
        title_max_chars: usize,
    ) -> Result<Self> {
        let mut repo = Self::new(now).with_title_max_chars(title_max_chars);

        if let Some(raw) = store.get_item(keys::NOTES)? {
            let records: Vec<StoredNote> =
                serde_json::from_str(&raw).map_err(NotesError::Serialization)?;
            let notes: Vec<Note> = records
                .into_iter()
                .map(|record| record.upgrade(now, title_max_chars))
                .collect();
            if notes.is_empty() {
                warn!("stored notes list is empty, keeping seed note");
            } else {
                repo.active_id = notes[0].id;
                repo.notes = notes;
            }
        }

        let stored_active = store
            .get_item(keys::ACTIVE_NOTE)?
            .and_then(|raw| raw.trim().parse::<NoteId>().ok());
        match stored_active {
            Some(id) if repo.contains(id) => repo.active_id = id,
            Some(id) => debug!(id, "stored active note is gone, using first note"),
            None => {}
        }

        debug!(count = repo.notes.len(), active = repo.active_id, "loaded notes");
        Ok(repo)
    }

    /// Writes the whole note list under its key.
    pub fn persist<S: KeyValueStore>(&self, store: &mut S) -> Result<()> {
        let records: Vec<StoredNote> = self.notes.iter().map(StoredNote::from).collect();
        let json = serde_json::to_string(&records).map_err(NotesError::Serialization)?;
        store.set_item(keys::NOTES, &json)?;
        debug!(count = records.len(), bytes = json.len(), "persisted notes");
        Ok(())
    }

    pub fn persist_active<S: KeyValueStore>(&self, store: &mut S) -> Result<()> {
        store.set_item(keys::ACTIVE_NOTE, &self.active_id.to_string())
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Never true once constructed.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn contains(&self, id: NoteId) -> bool {
        self.notes.iter().any(|n| n.id == id)
    }

    pub fn first_id(&self) -> NoteId {
        self.notes[0].id
    }

    pub fn active_id(&self) -> NoteId {
        self.active_id
    }

    pub fn active_note(&self) -> &Note {
        self.notes
            .iter()
            .find(|n| n.id == self.active_id)
            .unwrap_or(&self.notes[0])
    }

    pub fn title_max_chars(&self) -> usize {
        self.title_max_chars
    }

    pub fn get(&self, id: NoteId) -> Result<&Note> {
        self.notes
            .iter()
            .find(|n| n.id == id)
            .ok_or(NotesError::NoteNotFound(id))
    }

    pub(crate) fn get_mut(&mut self, id: NoteId) -> Result<&mut Note> {
        self.notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(NotesError::NoteNotFound(id))
    }

    pub fn set_active(&mut self, id: NoteId) -> Result<()> {
        if !self.contains(id) {
            return Err(NotesError::NoteNotFound(id));
        }
        self.active_id = id;
        Ok(())
    }

    /// Prepends an empty note and makes it active.
    pub fn create(&mut self, now: DateTime<Utc>) -> &Note {
        let id = self.next_id(now);
        self.notes.insert(0, Note::new(id, now));
        self.active_id = id;
        debug!(id, "created note");
        &self.notes[0]
    }

    /// Removes a note; refused when it is the only one left.
    pub fn delete(&mut self, id: NoteId) -> Result<Note> {
        if self.notes.len() == 1 {
            return Err(NotesError::LastNote);
        }
        let pos = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or(NotesError::NoteNotFound(id))?;
        let removed = self.notes.remove(pos);
        if self.active_id == id {
            self.active_id = self.first_id();
        }
        debug!(id, active = self.active_id, "deleted note");
        Ok(removed)
    }

    /// Replaces the content of an unlocked note and re-derives its title.
    pub fn update_content(
        &mut self,
        id: NoteId,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<&Note> {
        let max_chars = self.title_max_chars;
        let note = self.get_mut(id)?;
        if note.is_locked() {
            return Err(NotesError::NoteLocked(id));
        }
        note.content = content.into();
        note.title = derive_title(&note.content, max_chars);
        note.last_edited_at = Some(now);
        Ok(note)
    }

    pub fn add_image(&mut self, id: NoteId, image: impl Into<String>) -> Result<&Note> {
        let note = self.get_mut(id)?;
        note.images.push(image.into());
        Ok(note)
    }

    /// Detaches an image and hands back its reference so the host can release it.
    pub fn remove_image(&mut self, id: NoteId, index: usize) -> Result<String> {
        let note = self.get_mut(id)?;
        if index >= note.images.len() {
            return Err(NotesError::ImageNotFound { id, index });
        }
        Ok(note.images.remove(index))
    }

    // Wall-clock millis, bumped past any id already taken.
    fn next_id(&self, now: DateTime<Utc>) -> NoteId {
        let mut id = now.timestamp_millis();
        while self.contains(id) {
            id += 1;
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{now, DEFAULT_TITLE, SEED_NOTE_ID};
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn starts_with_seed_note() {
        let repo = NoteRepository::new(t0());
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.active_id(), SEED_NOTE_ID);
    }

    #[test]
    fn create_prepends_and_activates() {
        let mut repo = NoteRepository::new(t0());
        let id = repo.create(t0() + Duration::seconds(1)).id;

        assert_eq!(repo.notes()[0].id, id);
        assert_eq!(repo.active_id(), id);
        let note = repo.get(id).unwrap();
        assert_eq!(note.title, DEFAULT_TITLE);
        assert!(note.content.is_empty());
        assert_eq!(note.last_edited_at, None);
    }

    #[test]
    fn ids_stay_unique_within_one_millisecond() {
        let mut repo = NoteRepository::new(t0());
        let a = repo.create(t0()).id;
        let b = repo.create(t0()).id;
        assert_ne!(a, b);
    }

    #[test]
    fn never_deletes_last_note() {
        let mut repo = NoteRepository::new(t0());
        repo.create(t0());
        repo.create(t0());

        for _ in 0..10 {
            let id = repo.first_id();
            let _ = repo.delete(id);
            assert!(repo.len() >= 1);
        }
        assert_eq!(repo.len(), 1);
        let only = repo.first_id();
        assert!(matches!(repo.delete(only), Err(NotesError::LastNote)));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn deleting_active_note_activates_first() {
        let mut repo = NoteRepository::new(t0());
        let a = repo.create(t0()).id;
        let b = repo.create(t0()).id;
        repo.set_active(a).unwrap();

        repo.delete(a).unwrap();
        assert_eq!(repo.active_id(), b);
    }

    #[test]
    fn deleting_other_note_keeps_active() {
        let mut repo = NoteRepository::new(t0());
        let a = repo.create(t0()).id;
        repo.delete(SEED_NOTE_ID).unwrap();
        assert_eq!(repo.active_id(), a);
    }

    #[test]
    fn update_content_retitles_and_stamps() {
        let mut repo = NoteRepository::new(t0());
        let id = repo.create(t0()).id;
        repo.add_image(id, "blob:one").unwrap();

        let later = t0() + Duration::minutes(5);
        let note = repo.update_content(id, "Groceries\nMilk, eggs", later).unwrap();
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.last_edited_at, Some(later));
        assert_eq!(note.last_activity(), later);
        assert_eq!(note.images, vec!["blob:one".to_string()]);

        let note = repo.update_content(id, "", later).unwrap();
        assert_eq!(note.title, DEFAULT_TITLE);
    }

    #[test]
    fn update_content_refuses_locked_note() {
        let mut repo = NoteRepository::new(t0());
        repo.get_mut(SEED_NOTE_ID).unwrap().password_protected = true;
        assert!(matches!(
            repo.update_content(SEED_NOTE_ID, "x", t0()),
            Err(NotesError::NoteLocked(SEED_NOTE_ID))
        ));
    }

    #[test]
    fn remove_image_returns_reference() {
        let mut repo = NoteRepository::new(t0());
        repo.add_image(SEED_NOTE_ID, "blob:a").unwrap();
        repo.add_image(SEED_NOTE_ID, "blob:b").unwrap();

        assert_eq!(repo.remove_image(SEED_NOTE_ID, 0).unwrap(), "blob:a");
        assert_eq!(repo.get(SEED_NOTE_ID).unwrap().images, vec!["blob:b"]);
        assert!(matches!(
            repo.remove_image(SEED_NOTE_ID, 5),
            Err(NotesError::ImageNotFound { index: 5, .. })
        ));
    }

    #[test]
    fn load_without_stored_notes_keeps_seed() {
        let store = InMemoryStore::new();
        let repo = NoteRepository::load(&store, t0(), TITLE_MAX_CHARS).unwrap();
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.active_id(), SEED_NOTE_ID);
    }

    #[test]
    fn load_empty_array_keeps_seed() {
        let store = StoreFixture::new().with_raw(keys::NOTES, "[]").build();
        let repo = NoteRepository::load(&store, t0(), TITLE_MAX_CHARS).unwrap();
        assert_eq!(repo.first_id(), SEED_NOTE_ID);
    }

    #[test]
    fn load_restores_active_note() {
        let store = StoreFixture::new().with_notes(3).with_active(101).build();
        let repo = NoteRepository::load(&store, t0(), TITLE_MAX_CHARS).unwrap();
        assert_eq!(repo.len(), 3);
        assert_eq!(repo.active_id(), 101);
    }

    #[test]
    fn load_falls_back_when_active_is_gone() {
        let store = StoreFixture::new().with_notes(3).with_active(9999).build();
        let repo = NoteRepository::load(&store, t0(), TITLE_MAX_CHARS).unwrap();
        assert_eq!(repo.active_id(), repo.first_id());
    }

    #[test]
    fn load_migrates_legacy_records() {
        let legacy = r#"[{"id":1700000000000,"title":"Old","content":"Old","images":[],"timestamp":"2023-11-14T22:13:20.000Z"}]"#;
        let store = StoreFixture::new().with_raw(keys::NOTES, legacy).build();
        let repo = NoteRepository::load(&store, t0(), TITLE_MAX_CHARS).unwrap();

        let note = repo.active_note();
        assert_eq!(note.created_at.timestamp_millis(), 1_700_000_000_000);
        assert!(!note.has_been_edited());
    }

    #[test]
    fn load_rejects_corrupt_json() {
        let store = StoreFixture::new().with_raw(keys::NOTES, "{not json").build();
        assert!(matches!(
            NoteRepository::load(&store, t0(), TITLE_MAX_CHARS),
            Err(NotesError::Serialization(_))
        ));
    }

    #[test]
    fn persist_after_load_is_byte_identical() {
        let mut store = InMemoryStore::new();
        let mut repo = NoteRepository::new(now());
        let id = repo.create(now()).id;
        repo.update_content(id, "Hello\nWorld", now()).unwrap();
        repo.persist(&mut store).unwrap();
        let first = store.get_item(keys::NOTES).unwrap().unwrap();

        let reloaded = NoteRepository::load(&store, now(), TITLE_MAX_CHARS).unwrap();
        reloaded.persist(&mut store).unwrap();
        let second = store.get_item(keys::NOTES).unwrap().unwrap();

        assert_eq!(first, second);
        assert_eq!(reloaded.notes(), repo.notes());
    }

    #[test]
    fn persist_active_writes_plain_integer() {
        let mut store = InMemoryStore::new();
        let repo = NoteRepository::new(t0());
        repo.persist_active(&mut store).unwrap();
        assert_eq!(
            store.get_item(keys::ACTIVE_NOTE).unwrap().as_deref(),
            Some("1")
        );
    }
}
