use crate::commands::CmdResult;
use crate::model::Note;
use crate::repository::NoteRepository;

/// Notes whose title or content contains `query`, ignoring case.
///
/// Repository order is kept as is: no ranking. An empty query matches every
/// note. Locked notes only match on their title since their content is empty.
pub fn filter<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    let query = query.to_lowercase();
    notes
        .iter()
        .filter(|note| {
            note.title.to_lowercase().contains(&query)
                || note.content.to_lowercase().contains(&query)
        })
        .collect()
}

pub fn run(repo: &NoteRepository, query: &str) -> CmdResult {
    let listed = filter(repo.notes(), query).into_iter().cloned().collect();
    CmdResult::default().with_listed_notes(listed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::now;

    fn repo() -> NoteRepository {
        let mut repo = NoteRepository::new(now());
        for content in ["Shopping\nmilk", "Work plan", "Recipes\nMILKshake", "Ideas"] {
            let id = repo.create(now()).id;
            repo.update_content(id, content, now()).unwrap();
        }
        repo
    }

    fn titles(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|n| n.title.as_str()).collect()
    }

    #[test]
    fn empty_query_lists_everything_in_order() {
        let repo = repo();
        let result = run(&repo, "");
        assert_eq!(result.listed_notes, repo.notes());
    }

    #[test]
    fn matches_content_case_insensitively_in_repository_order() {
        let repo = repo();
        let result = run(&repo, "Milk");
        assert_eq!(titles(&result.listed_notes), vec!["Recipes", "Shopping"]);
    }

    #[test]
    fn matches_title() {
        let repo = repo();
        let result = run(&repo, "WORK");
        assert_eq!(titles(&result.listed_notes), vec!["Work plan"]);
    }

    #[test]
    fn no_match_is_empty() {
        let repo = repo();
        assert!(run(&repo, "zebra").listed_notes.is_empty());
    }

    #[test]
    fn locked_content_is_not_searchable() {
        let mut repo = repo();
        let id = repo.first_id();
        repo.update_content(id, "Ideas\nbake bread", now()).unwrap();
        crate::commands::lock::set_password(&mut repo, id, "abcd", 4).unwrap();

        assert!(run(&repo, "bread").listed_notes.is_empty());
        assert_eq!(run(&repo, "ideas").listed_notes[0].id, id);
    }
}
