//! Per-note lock transitions.
//!
//! ```text
//!            set_password(key)            unlock(key)
//! Unlocked ─────────────────────▶ Locked ─────────────▶ Unlocked
//!    │  ▲         lock_now()         ▲
//!    │  └── remove_password()        │
//!    └───────────────────────────────┘
//! ```
//!
//! While locked, `content` is empty and the text lives only in
//! `encrypted_content`. Unlocking keeps `encrypted_content` around so a later
//! `lock_now` with the remembered key needs no prompt.

use crate::cipher;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NotesError, Result};
use crate::model::{Note, NoteId};
use crate::repository::NoteRepository;
use tracing::info;

pub fn set_password(
    repo: &mut NoteRepository,
    id: NoteId,
    key: &str,
    min_len: usize,
) -> Result<CmdResult> {
    let note = unlocked_note(repo, id)?;
    if key.chars().count() < min_len {
        return Err(NotesError::WeakPassword { min: min_len });
    }
    seal(note, key);
    info!(id, "note locked with new password");
    Ok(done(note, "Password set successfully"))
}

pub fn unlock(repo: &mut NoteRepository, id: NoteId, key: &str) -> Result<CmdResult> {
    let note = repo.get_mut(id)?;
    if !note.is_locked() {
        return Err(NotesError::NotLocked(id));
    }
    let payload = note
        .encrypted_content
        .as_deref()
        .ok_or(NotesError::MalformedCipher)?;

    note.content = cipher::decode(payload, key)?
        .into_plaintext()
        .ok_or(NotesError::WrongPassword)?;
    note.password_protected = false;
    info!(id, "note unlocked");
    Ok(done(note, "Note unlocked successfully"))
}

/// Re-locks an unlocked note with the key remembered from an earlier transition.
pub fn lock_now(repo: &mut NoteRepository, id: NoteId, remembered: Option<&str>) -> Result<CmdResult> {
    let note = unlocked_note(repo, id)?;
    let key = match remembered {
        Some(key) if !key.is_empty() && !note.content.is_empty() => key,
        _ => return Err(NotesError::CannotLock),
    };
    seal(note, key);
    info!(id, "note locked with remembered password");
    Ok(done(note, "Note locked successfully"))
}

pub fn remove_password(repo: &mut NoteRepository, id: NoteId) -> Result<CmdResult> {
    let note = unlocked_note(repo, id)?;
    note.password_protected = false;
    note.encrypted_content = None;
    info!(id, "note password removed");
    Ok(done(note, "Password removed"))
}

fn unlocked_note(repo: &mut NoteRepository, id: NoteId) -> Result<&mut Note> {
    let note = repo.get_mut(id)?;
    if note.is_locked() {
        return Err(NotesError::NoteLocked(id));
    }
    Ok(note)
}

fn seal(note: &mut Note, key: &str) {
    note.encrypted_content = Some(cipher::encode(&note.content, key));
    note.content.clear();
    note.password_protected = true;
}

fn done(note: &Note, message: &str) -> CmdResult {
    CmdResult::default()
        .with_affected_notes(vec![note.clone()])
        .with_message(CmdMessage::success(message))
}
