use crate::model::NoteId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotesError {
    #[error("At least one note must remain")]
    LastNote,

    #[error("Password must be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("Incorrect password")]
    WrongPassword,

    #[error("Cannot lock: password missing")]
    CannotLock,

    #[error("Locked content could not be decoded")]
    MalformedCipher,

    #[error("Note not found: {0}")]
    NoteNotFound(NoteId),

    #[error("Note {0} is locked")]
    NoteLocked(NoteId),

    #[error("Note {0} is not locked")]
    NotLocked(NoteId),

    #[error("No password prompt is open")]
    NoPrompt,

    #[error("Note {id} has no image at position {index}")]
    ImageNotFound { id: NoteId, index: usize },

    #[error("Invalid text color: {0}")]
    InvalidColor(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

impl NotesError {
    /// The wording shown to the user in a toast or prompt.
    pub fn user_message(&self) -> String {
        match self {
            NotesError::WrongPassword => "Incorrect password. Please try again.".to_string(),
            NotesError::MalformedCipher => {
                "Incorrect password or corrupted note. Please try again.".to_string()
            }
            NotesError::NotLocked(_) => "No encrypted content found".to_string(),
            NotesError::NoteLocked(_) => "Unlock the note first".to_string(),
            NotesError::Io(_) | NotesError::Serialization(_) | NotesError::Store(_) => {
                "Could not save changes".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Storage failures, as opposed to refused user actions.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            NotesError::Io(_) | NotesError::Serialization(_) | NotesError::Store(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, NotesError>;
