use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::NoteId;
use crate::repository::NoteRepository;

pub fn run(repo: &mut NoteRepository, id: NoteId) -> Result<CmdResult> {
    let removed = repo.delete(id)?;
    let mut result = CmdResult::default();
    result.released_images = removed.images.clone();
    result.add_message(CmdMessage::success("Note deleted successfully"));
    Ok(result.with_affected_notes(vec![removed]))
}
