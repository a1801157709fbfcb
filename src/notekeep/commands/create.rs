use crate::commands::CmdResult;
use crate::repository::NoteRepository;
use chrono::{DateTime, Utc};

pub fn run(repo: &mut NoteRepository, now: DateTime<Utc>) -> CmdResult {
    let note = repo.create(now).clone();
    CmdResult::default().with_affected_notes(vec![note])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{now, DEFAULT_TITLE};

    #[test]
    fn creates_empty_active_note() {
        let mut repo = NoteRepository::new(now());
        let result = run(&mut repo, now());

        let created = &result.affected_notes[0];
        assert_eq!(created.title, DEFAULT_TITLE);
        assert!(created.images.is_empty());
        assert_eq!(repo.active_id(), created.id);
        assert_eq!(repo.len(), 2);
    }
}
