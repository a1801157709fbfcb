//! # API Facade
//!
//! [`NotesApi`] is the editor session controller: the one owner of the note
//! repository, the formatting preferences and the transient session state. A
//! host (a WASM shell, a native window, a test) forwards user actions here and
//! renders whatever state comes back.
//!
//! ## What it adds over the commands
//!
//! - **Persistence**: after every successful mutation the affected keys are
//!   written to the store. A failed write leaves memory as it is, logs an
//!   error and shows "Could not save changes".
//! - **Notifications**: the last message of a `CmdResult` becomes the toast;
//!   a refused action becomes an error toast. The `Result` is still returned
//!   so callers can react.
//! - **Password prompt**: errors from a prompt submit are shown inside the
//!   prompt instead of as a toast.
//! - **Session bookkeeping**: caret, find cursor and dictation buffer follow
//!   the active note.
//!
//! Business rules live in `commands/*.rs`; this layer only dispatches.

use crate::commands::{self, find::Direction, insert::Spacing, CmdMessage, CmdResult};
use crate::config::NotesConfig;
use crate::error::{NotesError, Result};
use crate::formatting::{FormattingState, Setting, Style};
use crate::model::{now, Note, NoteId, SEED_NOTE_ID};
use crate::repository::NoteRepository;
use crate::session::{PasswordPrompt, PromptError, PromptPurpose, Session};
use crate::shortcuts::{FindKey, KeyChord, Shortcut};
use crate::store::KeyValueStore;
use chrono::{DateTime, Utc};
use std::ops::Range;
use tracing::{debug, error};

/// Which store entries a successful operation has to rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Writes {
    Notes,
    Active,
    Settings,
    Nothing,
}

pub struct NotesApi<S: KeyValueStore> {
    store: S,
    config: NotesConfig,
    repo: NoteRepository,
    formatting: FormattingState,
    session: Session,
}

impl<S: KeyValueStore> NotesApi<S> {
    /// Loads notes and preferences from `store`.
    pub fn open(store: S, config: NotesConfig) -> Result<Self> {
        let repo = NoteRepository::load(&store, now(), config.title_max_chars)?;
        let formatting = FormattingState::load(&store, &config)?;
        debug!(notes = repo.len(), active = repo.active_id(), "opened notebook");
        Ok(Self {
            store,
            config,
            repo,
            formatting,
            session: Session::default(),
        })
    }

    pub fn notes(&self) -> &[Note] {
        self.repo.notes()
    }

    pub fn note(&self, id: NoteId) -> Result<&Note> {
        self.repo.get(id)
    }

    pub fn active_note(&self) -> &Note {
        self.repo.active_note()
    }

    pub fn active_id(&self) -> NoteId {
        self.repo.active_id()
    }

    pub fn formatting(&self) -> &FormattingState {
        &self.formatting
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &NotesConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // --- Notes ---

    pub fn create_note(&mut self) -> Result<CmdResult> {
        let result = commands::create::run(&mut self.repo, now());
        self.session.reset_for_note_change();
        self.finish(Ok(result), Writes::Notes)
    }

    pub fn delete_note(&mut self, id: NoteId) -> Result<CmdResult> {
        let was_active = self.repo.active_id() == id;
        let outcome = commands::delete::run(&mut self.repo, id);
        if outcome.is_ok() && was_active {
            self.session.reset_for_note_change();
        }
        self.finish(outcome, Writes::Notes)
    }

    pub fn delete_active(&mut self) -> Result<CmdResult> {
        self.delete_note(self.repo.active_id())
    }

    pub fn update_content(&mut self, id: NoteId, content: &str) -> Result<CmdResult> {
        let outcome = commands::update::run(&mut self.repo, id, content, now());
        if outcome.is_ok() {
            self.refresh_find(id);
        }
        self.finish(outcome, Writes::Notes)
    }

    pub fn select(&mut self, id: NoteId) -> Result<CmdResult> {
        let changed = self.repo.active_id() != id;
        let outcome = self.repo.set_active(id).map(|_| CmdResult::default());
        if outcome.is_ok() && changed {
            self.session.reset_for_note_change();
        }
        self.finish(outcome, Writes::Active)
    }

    /// Back to the welcome note (or the newest one if it is gone) with no filter.
    pub fn navigate_home(&mut self) -> Result<CmdResult> {
        let target = if self.repo.contains(SEED_NOTE_ID) {
            SEED_NOTE_ID
        } else {
            self.repo.first_id()
        };
        self.session.search_query.clear();
        self.select(target)
    }

    // --- Sidebar search ---

    pub fn set_search_query(&mut self, query: &str) {
        self.session.search_query = query.to_string();
    }

    pub fn search_query(&self) -> &str {
        &self.session.search_query
    }

    /// Notes matching the current query, in sidebar order.
    pub fn filtered_notes(&self) -> Vec<&Note> {
        commands::search::filter(self.repo.notes(), &self.session.search_query)
    }

    pub fn search(&self) -> CmdResult {
        commands::search::run(&self.repo, &self.session.search_query)
    }

    // --- Images ---

    /// Attaches a pasted image reference to the active note.
    pub fn paste_image(&mut self, image: &str) -> Result<CmdResult> {
        let id = self.repo.active_id();
        let outcome = commands::images::add(&mut self.repo, id, image);
        self.finish(outcome, Writes::Notes)
    }

    pub fn remove_image(&mut self, id: NoteId, index: usize) -> Result<CmdResult> {
        let outcome = commands::images::remove(&mut self.repo, id, index);
        self.finish(outcome, Writes::Notes)
    }

    // --- Text insertion ---

    pub fn set_cursor(&mut self, position: usize) {
        self.session.cursor = position;
    }

    /// Clipboard text (or a table already flattened to text) at the caret.
    pub fn paste_text(&mut self, text: &str) -> Result<CmdResult> {
        let at = self.session.cursor;
        self.insert(at..at, text, Spacing::Verbatim)
    }

    /// Replaces `selection` (char offsets) in the active note with `text`.
    pub fn insert_text(&mut self, selection: Range<usize>, text: &str) -> Result<CmdResult> {
        self.insert(selection, text, Spacing::Verbatim)
    }

    fn insert(&mut self, selection: Range<usize>, text: &str, spacing: Spacing) -> Result<CmdResult> {
        let id = self.repo.active_id();
        let outcome = commands::insert::run(&mut self.repo, id, selection, text, spacing, now());
        if let Ok(result) = &outcome {
            if let Some(cursor) = result.cursor {
                self.session.cursor = cursor;
            }
            self.refresh_find(id);
        }
        self.finish(outcome, Writes::Notes)
    }

    // --- Dictation ---

    pub fn start_dictation(&mut self) {
        self.session.dictation.start();
    }

    pub fn stop_dictation(&mut self) {
        self.session.dictation.stop();
    }

    pub fn dictation_result(&mut self, final_text: &str, interim_text: &str) {
        self.session.dictation.apply_result(final_text, interim_text);
    }

    pub fn clear_dictation(&mut self) {
        self.session.dictation.clear();
    }

    pub fn close_dictation(&mut self) {
        self.session.dictation.close();
    }

    /// Inserts the dictated text at the caret and closes the buffer.
    ///
    /// A refused insert leaves the buffer as it was.
    pub fn insert_dictation(&mut self) -> Result<CmdResult> {
        let text = self.session.dictation.text();
        if text.is_empty() {
            self.session.dictation.close();
            return Ok(CmdResult::default());
        }
        let at = self.session.cursor;
        let result = self.insert(at..at, &text, Spacing::SeparateWords)?;
        self.session.dictation.close();
        Ok(result)
    }

    // --- Locking ---

    pub fn set_password(&mut self, id: NoteId, key: &str) -> Result<CmdResult> {
        let outcome = self.apply_set_password(id, key);
        self.finish(outcome, Writes::Notes)
    }

    pub fn unlock(&mut self, id: NoteId, key: &str) -> Result<CmdResult> {
        let outcome = self.apply_unlock(id, key);
        self.finish(outcome, Writes::Notes)
    }

    /// Whether `lock_now` would succeed: a key is remembered and the note is
    /// unlocked with some content.
    pub fn can_lock_now(&self, id: NoteId) -> bool {
        self.session.remembered_key.is_set()
            && self
                .repo
                .get(id)
                .is_ok_and(|note| !note.is_locked() && !note.content.is_empty())
    }

    /// One-click re-lock with the key remembered from the last set or unlock.
    pub fn lock_now(&mut self, id: NoteId) -> Result<CmdResult> {
        let outcome =
            commands::lock::lock_now(&mut self.repo, id, self.session.remembered_key.get());
        self.finish(outcome, Writes::Notes)
    }

    pub fn remove_password(&mut self, id: NoteId) -> Result<CmdResult> {
        let outcome = commands::lock::remove_password(&mut self.repo, id);
        self.finish(outcome, Writes::Notes)
    }

    fn apply_set_password(&mut self, id: NoteId, key: &str) -> Result<CmdResult> {
        let result =
            commands::lock::set_password(&mut self.repo, id, key, self.config.min_password_len)?;
        self.session.remembered_key.set(key);
        self.lock_changed(id);
        Ok(result)
    }

    fn apply_unlock(&mut self, id: NoteId, key: &str) -> Result<CmdResult> {
        let result = commands::lock::unlock(&mut self.repo, id, key)?;
        self.session.remembered_key.set(key);
        self.lock_changed(id);
        Ok(result)
    }

    fn lock_changed(&mut self, id: NoteId) {
        if id == self.repo.active_id() {
            self.session.reset_for_note_change();
        }
    }

    // --- Password prompt ---

    pub fn open_set_password_prompt(&mut self, id: NoteId) -> Result<()> {
        if self.repo.get(id)?.is_locked() {
            return Err(NotesError::NoteLocked(id));
        }
        self.session.prompt = Some(PasswordPrompt::new(id, PromptPurpose::Set));
        Ok(())
    }

    pub fn open_unlock_prompt(&mut self, id: NoteId) -> Result<()> {
        if !self.repo.get(id)?.is_locked() {
            return Err(NotesError::NotLocked(id));
        }
        self.session.prompt = Some(PasswordPrompt::new(id, PromptPurpose::Unlock));
        Ok(())
    }

    /// Typing into the prompt hides any error it is showing.
    pub fn set_prompt_input(&mut self, input: &str) -> Result<()> {
        let prompt = self.session.prompt.as_mut().ok_or(NotesError::NoPrompt)?;
        prompt.input = input.to_string();
        prompt.error = None;
        Ok(())
    }

    pub fn close_prompt(&mut self) {
        self.session.prompt = None;
    }

    /// Applies the transition the open prompt was opened for.
    ///
    /// A short password keeps the input for correction; a wrong one clears
    /// it. Either way the prompt stays open with the error inside it.
    pub fn submit_prompt(&mut self) -> Result<CmdResult> {
        let (id, purpose, input) = match &self.session.prompt {
            Some(p) => (p.note_id, p.purpose, p.input.clone()),
            None => return Err(NotesError::NoPrompt),
        };
        let outcome = match purpose {
            PromptPurpose::Set => self.apply_set_password(id, &input),
            PromptPurpose::Unlock => self.apply_unlock(id, &input),
        };

        match outcome {
            Ok(result) => {
                self.session.prompt = None;
                self.finish(Ok(result), Writes::Notes)
            }
            Err(err @ (NotesError::WeakPassword { .. }
            | NotesError::WrongPassword
            | NotesError::MalformedCipher)) => {
                let expires_at = now() + self.config.prompt_error_duration();
                if let Some(prompt) = self.session.prompt.as_mut() {
                    if !matches!(err, NotesError::WeakPassword { .. }) {
                        prompt.input.clear();
                    }
                    prompt.error = Some(PromptError {
                        message: err.user_message(),
                        expires_at,
                    });
                }
                Err(err)
            }
            Err(err) => {
                self.session.prompt = None;
                self.finish(Err(err), Writes::Nothing)
            }
        }
    }

    // --- Find in note ---

    /// Starts (or restarts) find in the active note; returns the first match.
    pub fn find_in_note(&mut self, query: &str) -> Option<Range<usize>> {
        if query.is_empty() {
            self.session.find = None;
            return None;
        }
        let cursor = commands::find::MatchCursor::new(&self.repo.active_note().content, query);
        let first = cursor.current_range();
        self.session.find = Some(cursor);
        first
    }

    pub fn find_next(&mut self) -> Option<Range<usize>> {
        self.session.find.as_mut()?.step(Direction::Next)
    }

    pub fn find_previous(&mut self) -> Option<Range<usize>> {
        self.session.find.as_mut()?.step(Direction::Previous)
    }

    pub fn close_find(&mut self) {
        self.session.find = None;
    }

    /// Keys typed while the find bar has focus. Returns the action taken, if any.
    pub fn handle_find_key(&mut self, key: &str) -> Option<FindKey> {
        let action = FindKey::from_key(key)?;
        match action {
            FindKey::Step(Direction::Next) => {
                self.find_next();
            }
            FindKey::Step(Direction::Previous) => {
                self.find_previous();
            }
            FindKey::Close => self.close_find(),
        }
        Some(action)
    }

    fn refresh_find(&mut self, id: NoteId) {
        if id != self.repo.active_id() {
            return;
        }
        if let Some(find) = self.session.find.as_mut() {
            *find = commands::find::MatchCursor::new(&self.repo.active_note().content, find.query());
        }
    }

    // --- Formatting ---

    pub fn toggle_bold(&mut self) -> Result<CmdResult> {
        self.toggle_style(Style::Bold)
    }

    pub fn toggle_italic(&mut self) -> Result<CmdResult> {
        self.toggle_style(Style::Italic)
    }

    pub fn toggle_underline(&mut self) -> Result<CmdResult> {
        self.toggle_style(Style::Underline)
    }

    pub fn toggle_dark_mode(&mut self) -> Result<CmdResult> {
        let result = commands::formatting::toggle_dark_mode(&mut self.formatting);
        self.finish(Ok(result), Writes::Settings)
    }

    pub fn adjust_font_size(&mut self, delta: i32) -> Result<CmdResult> {
        let result =
            commands::formatting::adjust_font_size(&mut self.formatting, delta, &self.config);
        self.finish(Ok(result), Writes::Settings)
    }

    pub fn set_text_color(&mut self, color: &str) -> Result<CmdResult> {
        let outcome = commands::formatting::set_text_color(&mut self.formatting, color);
        self.finish(outcome, Writes::Settings)
    }

    fn toggle_style(&mut self, style: Style) -> Result<CmdResult> {
        let result = commands::formatting::toggle(&mut self.formatting, style);
        self.finish(Ok(result), Writes::Settings)
    }

    // --- Shortcuts and housekeeping ---

    /// Runs the global shortcut bound to `chord`, if any.
    ///
    /// `FocusSearch` has no effect here; it is returned so the host can move
    /// focus.
    pub fn handle_shortcut(&mut self, chord: &KeyChord) -> Result<Option<Shortcut>> {
        let Some(shortcut) = Shortcut::from_chord(chord) else {
            return Ok(None);
        };
        match shortcut {
            Shortcut::FocusSearch => {}
            Shortcut::NewNote => {
                let mut result = commands::create::run(&mut self.repo, now());
                result.add_message(CmdMessage::success("New note created"));
                self.session.reset_for_note_change();
                self.finish(Ok(result), Writes::Notes)?;
            }
            Shortcut::DeleteActive => {
                self.delete_active()?;
            }
        }
        Ok(Some(shortcut))
    }

    pub fn dismiss_expired(&mut self, now: DateTime<Utc>) {
        self.session.dismiss_expired(now);
    }

    // --- Internals ---

    fn finish(&mut self, outcome: Result<CmdResult>, writes: Writes) -> Result<CmdResult> {
        let result = match outcome {
            Ok(result) => result,
            Err(err) => {
                self.report(&err);
                return Err(err);
            }
        };

        if let Some(message) = result.messages.last() {
            self.session.show(message, now(), self.config.toast_duration());
        }
        if let Err(err) = self.write(writes, &result.changed_settings) {
            self.report(&err);
        }
        Ok(result)
    }

    fn write(&mut self, writes: Writes, settings: &[Setting]) -> Result<()> {
        match writes {
            Writes::Notes => {
                self.repo.persist(&mut self.store)?;
                self.repo.persist_active(&mut self.store)
            }
            Writes::Active => self.repo.persist_active(&mut self.store),
            Writes::Settings => {
                for setting in settings {
                    self.formatting.persist(&mut self.store, *setting)?;
                }
                Ok(())
            }
            Writes::Nothing => Ok(()),
        }
    }

    fn report(&mut self, err: &NotesError) {
        if err.is_persistence() {
            error!(error = %err, "failed to write notes storage");
        } else {
            debug!(error = %err, "action refused");
        }
        self.session.show(
            &CmdMessage::error(err.user_message()),
            now(),
            self.config.toast_duration(),
        );
    }
}
