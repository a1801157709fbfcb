use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::NoteId;
use crate::repository::NoteRepository;
use chrono::{DateTime, Utc};

pub fn run(
    repo: &mut NoteRepository,
    id: NoteId,
    content: &str,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    let note = repo.update_content(id, content, now)?.clone();
    Ok(CmdResult::default().with_affected_notes(vec![note]))
}
