use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::NoteId;
use crate::repository::NoteRepository;

pub fn add(repo: &mut NoteRepository, id: NoteId, image: &str) -> Result<CmdResult> {
    let note = repo.add_image(id, image)?.clone();
    Ok(CmdResult::default().with_affected_notes(vec![note]))
}

pub fn remove(repo: &mut NoteRepository, id: NoteId, index: usize) -> Result<CmdResult> {
    let released = repo.remove_image(id, index)?;
    let note = repo.get(id)?.clone();
    let mut result = CmdResult::default().with_affected_notes(vec![note]);
    result.released_images.push(released);
    Ok(result)
}
