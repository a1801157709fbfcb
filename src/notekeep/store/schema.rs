//! Stored note records and their upgrade into [`Note`].
//!
//! Records are written exactly as the browser build writes them: camelCase
//! keys, JavaScript ISO dates with millisecond precision, and a legacy
//! `timestamp` mirroring the latest activity. Older records may lack
//! `createdAt`, `lastEditedAt` or `title`; [`StoredNote::upgrade`] fills every
//! gap so the rest of the crate only ever sees complete notes.

use crate::model::{derive_title, Note, NoteId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredNote {
    pub id: NoteId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, with = "js_date", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, with = "js_date", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    // Written as null rather than skipped: null means "never edited".
    #[serde(default, with = "js_date")]
    pub last_edited_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub password_protected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted_content: Option<String>,
}

impl StoredNote {
    /// Turns any stored generation of a note into a complete [`Note`].
    pub fn upgrade(self, now: DateTime<Utc>, title_max_chars: usize) -> Note {
        let created_at = self.created_at.or(self.timestamp).unwrap_or(now);
        let title = self
            .title
            .unwrap_or_else(|| derive_title(&self.content, title_max_chars));
        let encrypted_content = self.encrypted_content.filter(|c| !c.is_empty());

        let mut note = Note {
            id: self.id,
            title,
            content: self.content,
            images: self.images,
            created_at,
            last_edited_at: self.last_edited_at,
            password_protected: self.password_protected,
            encrypted_content,
        };

        if note.password_protected && note.encrypted_content.is_none() {
            warn!(id = note.id, "locked note has no cipher text, treating as unlocked");
            note.password_protected = false;
        } else if note.password_protected && !note.content.is_empty() {
            warn!(id = note.id, "locked note carried plaintext, dropping it");
            note.content.clear();
        }

        note
    }
}

impl From<&Note> for StoredNote {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            title: Some(note.title.clone()),
            content: note.content.clone(),
            images: note.images.clone(),
            timestamp: Some(note.last_activity()),
            created_at: Some(note.created_at),
            last_edited_at: note.last_edited_at,
            password_protected: note.password_protected,
            encrypted_content: note.encrypted_content.clone(),
        }
    }
}

/// Serializes dates the way `JSON.stringify(new Date())` does.
mod js_date {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => {
                serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|d| d.with_timezone(&Utc))
                .map_err(serde::de::Error::custom)
        })
        .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TITLE_MAX_CHARS;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, h, m, 0).unwrap()
    }

    #[test]
    fn legacy_record_inherits_timestamp() {
        let json = r#"{"id":7,"title":"Old","content":"Old\nbody","images":[],"timestamp":"2023-01-02T03:04:05.678Z"}"#;
        let stored: StoredNote = serde_json::from_str(json).unwrap();
        let note = stored.upgrade(at(12, 0), TITLE_MAX_CHARS);

        assert_eq!(
            note.created_at,
            DateTime::parse_from_rfc3339("2023-01-02T03:04:05.678Z").unwrap()
        );
        assert_eq!(note.last_edited_at, None);
        assert!(!note.password_protected);
    }

    #[test]
    fn record_without_dates_uses_now() {
        let stored: StoredNote = serde_json::from_str(r#"{"id":7,"content":"Hi"}"#).unwrap();
        let note = stored.upgrade(at(12, 0), TITLE_MAX_CHARS);
        assert_eq!(note.created_at, at(12, 0));
        assert_eq!(note.title, "Hi");
    }

    #[test]
    fn empty_cipher_text_is_absent() {
        let json = r#"{"id":7,"title":"T","content":"body","passwordProtected":false,"encryptedContent":""}"#;
        let note = serde_json::from_str::<StoredNote>(json)
            .unwrap()
            .upgrade(at(12, 0), TITLE_MAX_CHARS);
        assert_eq!(note.encrypted_content, None);
    }

    #[test]
    fn locked_record_without_cipher_is_unlocked() {
        let json = r#"{"id":7,"title":"T","content":"","passwordProtected":true}"#;
        let note = serde_json::from_str::<StoredNote>(json)
            .unwrap()
            .upgrade(at(12, 0), TITLE_MAX_CHARS);
        assert!(!note.password_protected);
    }

    #[test]
    fn writes_browser_layout() {
        let mut note = Note::new(5, at(9, 30));
        note.content = "x".into();
        let json = serde_json::to_string(&StoredNote::from(&note)).unwrap();
        assert_eq!(
            json,
            r#"{"id":5,"title":"New Note","content":"x","images":[],"timestamp":"2024-05-01T09:30:00.000Z","createdAt":"2024-05-01T09:30:00.000Z","lastEditedAt":null,"passwordProtected":false}"#
        );
    }

    #[test]
    fn timestamp_mirrors_latest_activity() {
        let mut note = Note::new(5, at(9, 30));
        note.last_edited_at = Some(at(10, 0));
        let stored = StoredNote::from(&note);
        assert_eq!(stored.timestamp, Some(at(10, 0)));
    }

    #[test]
    fn reserialization_is_stable() {
        let mut note = Note::new(5, at(9, 30));
        note.last_edited_at = Some(at(10, 15));
        note.images.push("blob:abc".into());
        let first = serde_json::to_string(&vec![StoredNote::from(&note)]).unwrap();

        let reloaded: Vec<StoredNote> = serde_json::from_str(&first).unwrap();
        let notes: Vec<Note> = reloaded
            .into_iter()
            .map(|s| s.upgrade(at(23, 0), TITLE_MAX_CHARS))
            .collect();
        let second =
            serde_json::to_string(&notes.iter().map(StoredNote::from).collect::<Vec<_>>())
                .unwrap();
        assert_eq!(first, second);
    }
}
