//! Transient editor state that is never persisted: the visible toast, the
//! password prompt, the remembered key, the sidebar query, the caret and the
//! find-in-note cursor.
//!
//! Nothing here runs timers. Toasts and prompt errors carry an expiry and the
//! host calls `dismiss_expired` from whatever tick it has.

use crate::commands::find::MatchCursor;
use crate::commands::{CmdMessage, MessageLevel};
use crate::dictation::Dictation;
use crate::model::NoteId;
use chrono::{DateTime, Duration, Utc};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: MessageLevel,
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

impl Toast {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPurpose {
    /// Choosing a new password, which locks the note.
    Set,
    Unlock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptError {
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct PasswordPrompt {
    pub note_id: NoteId,
    pub purpose: PromptPurpose,
    pub input: String,
    pub error: Option<PromptError>,
}

impl PasswordPrompt {
    pub fn new(note_id: NoteId, purpose: PromptPurpose) -> Self {
        Self {
            note_id,
            purpose,
            input: String::new(),
            error: None,
        }
    }
}

impl fmt::Debug for PasswordPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordPrompt")
            .field("note_id", &self.note_id)
            .field("purpose", &self.purpose)
            .field("input_len", &self.input.chars().count())
            .field("error", &self.error)
            .finish()
    }
}

/// The last key that successfully set or opened a lock.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RememberedKey(Option<String>);

impl RememberedKey {
    pub fn get(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn set(&mut self, key: &str) {
        self.0 = Some(key.to_string());
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Debug for RememberedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("RememberedKey(<set>)"),
            None => f.write_str("RememberedKey(<unset>)"),
        }
    }
}

#[derive(Debug, Default)]
pub struct Session {
    pub toast: Option<Toast>,
    pub prompt: Option<PasswordPrompt>,
    pub remembered_key: RememberedKey,
    pub search_query: String,
    /// Last known caret position in the active note, in chars.
    pub cursor: usize,
    pub find: Option<MatchCursor>,
    pub dictation: Dictation,
}

impl Session {
    /// Shows `message`, replacing whatever toast was visible.
    pub fn show(&mut self, message: &CmdMessage, now: DateTime<Utc>, duration: Duration) {
        self.toast = Some(Toast {
            level: message.level,
            message: message.content.clone(),
            expires_at: now + duration,
        });
    }

    pub fn visible_toast(&self, now: DateTime<Utc>) -> Option<&Toast> {
        self.toast.as_ref().filter(|t| !t.is_expired(now))
    }

    pub fn dismiss_expired(&mut self, now: DateTime<Utc>) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }
        if let Some(prompt) = self.prompt.as_mut() {
            if prompt.error.as_ref().is_some_and(|e| now >= e.expires_at) {
                prompt.error = None;
            }
        }
    }

    /// State tied to the previously active note.
    pub fn reset_for_note_change(&mut self) {
        self.find = None;
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::now;

    #[test]
    fn latest_toast_wins_and_expires() {
        let mut session = Session::default();
        let t = now();
        session.show(&CmdMessage::success("first"), t, Duration::milliseconds(2500));
        session.show(&CmdMessage::error("second"), t, Duration::milliseconds(2500));

        assert_eq!(session.visible_toast(t).unwrap().message, "second");
        assert!(session.visible_toast(t + Duration::seconds(3)).is_none());

        session.dismiss_expired(t + Duration::milliseconds(2499));
        assert!(session.toast.is_some());
        session.dismiss_expired(t + Duration::milliseconds(2500));
        assert!(session.toast.is_none());
    }

    #[test]
    fn prompt_error_expires_but_input_stays() {
        let mut session = Session::default();
        let t = now();
        let mut prompt = PasswordPrompt::new(1, PromptPurpose::Set);
        prompt.input = "abc".into();
        prompt.error = Some(PromptError {
            message: "too short".into(),
            expires_at: t + Duration::seconds(3),
        });
        session.prompt = Some(prompt);

        session.dismiss_expired(t + Duration::seconds(4));
        let prompt = session.prompt.as_ref().unwrap();
        assert!(prompt.error.is_none());
        assert_eq!(prompt.input, "abc");
    }

    #[test]
    fn debug_output_hides_secrets() {
        let mut key = RememberedKey::default();
        key.set("hunter22");
        let mut prompt = PasswordPrompt::new(1, PromptPurpose::Unlock);
        prompt.input = "hunter22".into();

        assert!(!format!("{:?}", key).contains("hunter22"));
        assert!(!format!("{:?}", prompt).contains("hunter22"));
    }
}
