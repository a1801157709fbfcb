use chrono::{DateTime, SubsecRound, Utc};

pub type NoteId = i64;

/// Reserved id of the note every fresh notebook starts with.
pub const SEED_NOTE_ID: NoteId = 1;
pub const SEED_TITLE: &str = "Welcome to Notes";
pub const SEED_CONTENT: &str = "Start typing to create your first note...";

pub const DEFAULT_TITLE: &str = "New Note";
pub const TITLE_MAX_CHARS: usize = 30;

/// Current time at the precision notes are stored with.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// First line of `content`, capped at `max_chars`, or [`DEFAULT_TITLE`].
pub fn derive_title(content: &str, max_chars: usize) -> String {
    let first_line = content.split('\n').next().unwrap_or_default();
    let title: String = first_line.chars().take(max_chars).collect();
    if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Unlocked,
    Locked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    /// Plaintext body. Always empty while the note is locked.
    pub content: String,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    /// `None` until the first content edit after creation.
    pub last_edited_at: Option<DateTime<Utc>>,
    pub password_protected: bool,
    /// Kept after unlocking so the note can be locked again with the same key.
    pub encrypted_content: Option<String>,
}

impl Note {
    pub fn new(id: NoteId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: DEFAULT_TITLE.to_string(),
            content: String::new(),
            images: Vec::new(),
            created_at,
            last_edited_at: None,
            password_protected: false,
            encrypted_content: None,
        }
    }

    pub fn seed(created_at: DateTime<Utc>) -> Self {
        Self {
            title: SEED_TITLE.to_string(),
            content: SEED_CONTENT.to_string(),
            ..Self::new(SEED_NOTE_ID, created_at)
        }
    }

    pub fn has_been_edited(&self) -> bool {
        self.last_edited_at.is_some()
    }

    /// Most recent of creation and last edit.
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_edited_at.unwrap_or(self.created_at)
    }

    pub fn lock_state(&self) -> LockState {
        if self.password_protected {
            LockState::Locked
        } else {
            LockState::Unlocked
        }
    }

    pub fn is_locked(&self) -> bool {
        self.lock_state() == LockState::Locked
    }
}
