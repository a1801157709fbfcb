//! Inserting text into a note at the caret, the path shared by clipboard text,
//! converted clipboard tables and dictation.
//!
//! Positions are char offsets into the note content. Out-of-range offsets are
//! clamped to the end of the content.

use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::NoteId;
use crate::repository::NoteRepository;
use chrono::{DateTime, Utc};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    /// Insert the text as given (clipboard paste).
    Verbatim,
    /// Prefix a space unless the caret follows one (dictation).
    SeparateWords,
}

/// Replaces `selection` with `text` and reports the caret after the insert.
pub fn run(
    repo: &mut NoteRepository,
    id: NoteId,
    selection: Range<usize>,
    text: &str,
    spacing: Spacing,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    let current = &repo.get(id)?.content;
    let (new_content, cursor) = splice(current, selection, text, spacing);
    let note = repo.update_content(id, new_content, now)?.clone();
    Ok(CmdResult::default()
        .with_affected_notes(vec![note])
        .with_cursor(cursor))
}

fn splice(content: &str, selection: Range<usize>, text: &str, spacing: Spacing) -> (String, usize) {
    let len = content.chars().count();
    let start = selection.start.min(len);
    let end = selection.end.clamp(start, len);

    let start_byte = byte_offset(content, start);
    let end_byte = byte_offset(content, end);

    let needs_space = spacing == Spacing::SeparateWords
        && start > 0
        && content[..start_byte].chars().next_back() != Some(' ');

    let mut inserted = String::with_capacity(text.len() + 1);
    if needs_space {
        inserted.push(' ');
    }
    inserted.push_str(text);

    let mut out = String::with_capacity(content.len() + inserted.len());
    out.push_str(&content[..start_byte]);
    out.push_str(&inserted);
    out.push_str(&content[end_byte..]);

    (out, start + inserted.chars().count())
}

fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotesError;
    use crate::model::now;

    #[test]
    fn pastes_at_caret() {
        let (out, cursor) = splice("Hello world", 5..5, ",", Spacing::Verbatim);
        assert_eq!(out, "Hello, world");
        assert_eq!(cursor, 6);
    }

    #[test]
    fn replaces_selection() {
        let (out, cursor) = splice("Hello world", 6..11, "there", Spacing::Verbatim);
        assert_eq!(out, "Hello there");
        assert_eq!(cursor, 11);
    }

    #[test]
    fn dictation_separates_words() {
        let (out, cursor) = splice("Hello", 5..5, "world", Spacing::SeparateWords);
        assert_eq!(out, "Hello world");
        assert_eq!(cursor, 11);

        let (out, _) = splice("Hello ", 6..6, "world", Spacing::SeparateWords);
        assert_eq!(out, "Hello world");

        let (out, _) = splice("", 0..0, "first", Spacing::SeparateWords);
        assert_eq!(out, "first");
    }

    #[test]
    fn clamps_out_of_range_selection() {
        let (out, cursor) = splice("ab", 10..20, "c", Spacing::Verbatim);
        assert_eq!(out, "abc");
        assert_eq!(cursor, 3);
    }

    #[test]
    fn counts_chars_not_bytes() {
        let (out, cursor) = splice("café bar", 4..4, "!", Spacing::Verbatim);
        assert_eq!(out, "café! bar");
        assert_eq!(cursor, 5);
    }

    #[test]
    fn insertion_updates_note() {
        let mut repo = NoteRepository::new(now());
        let id = repo.create(now()).id;
        let result = run(&mut repo, id, 0..0, "Title line", Spacing::Verbatim, now()).unwrap();

        assert_eq!(result.cursor, Some(10));
        assert_eq!(repo.get(id).unwrap().title, "Title line");
    }

    #[test]
    fn refuses_locked_note() {
        let mut repo = NoteRepository::new(now());
        let id = repo.active_id();
        repo.get_mut(id).unwrap().password_protected = true;
        repo.get_mut(id).unwrap().content.clear();
        assert!(matches!(
            run(&mut repo, id, 0..0, "x", Spacing::Verbatim, now()),
            Err(NotesError::NoteLocked(_))
        ));
    }
}
