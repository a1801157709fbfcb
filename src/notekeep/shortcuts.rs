use crate::commands::find::Direction;

/// A key press as the host reports it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyChord {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Ctrl/Cmd+K
    FocusSearch,
    /// Ctrl/Cmd+Enter
    NewNote,
    /// Ctrl+Backspace or Ctrl+Delete
    DeleteActive,
}

impl Shortcut {
    pub fn from_chord(chord: &KeyChord) -> Option<Self> {
        if chord.command() && chord.key.eq_ignore_ascii_case("k") {
            return Some(Shortcut::FocusSearch);
        }
        if chord.command() && chord.key == "Enter" {
            return Some(Shortcut::NewNote);
        }
        // Cmd+Backspace is a text editing gesture on macOS, so only Ctrl deletes.
        if chord.ctrl && matches!(chord.key.as_str(), "Backspace" | "Delete") {
            return Some(Shortcut::DeleteActive);
        }
        None
    }
}

/// Keys handled while the find-in-note bar is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindKey {
    Step(Direction),
    Close,
}

impl FindKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" | "ArrowDown" => Some(FindKey::Step(Direction::Next)),
            "ArrowUp" => Some(FindKey::Step(Direction::Previous)),
            "Escape" => Some(FindKey::Close),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_note_shortcuts() {
        assert_eq!(
            Shortcut::from_chord(&KeyChord::new("K").meta()),
            Some(Shortcut::FocusSearch)
        );
        assert_eq!(
            Shortcut::from_chord(&KeyChord::new("Enter").ctrl()),
            Some(Shortcut::NewNote)
        );
        assert_eq!(
            Shortcut::from_chord(&KeyChord::new("Delete").ctrl()),
            Some(Shortcut::DeleteActive)
        );
    }

    #[test]
    fn plain_keys_are_not_shortcuts() {
        assert_eq!(Shortcut::from_chord(&KeyChord::new("k")), None);
        assert_eq!(Shortcut::from_chord(&KeyChord::new("Enter")), None);
        assert_eq!(Shortcut::from_chord(&KeyChord::new("Backspace").meta()), None);
    }

    #[test]
    fn find_keys() {
        assert_eq!(FindKey::from_key("Enter"), Some(FindKey::Step(Direction::Next)));
        assert_eq!(
            FindKey::from_key("ArrowUp"),
            Some(FindKey::Step(Direction::Previous))
        );
        assert_eq!(FindKey::from_key("Escape"), Some(FindKey::Close));
        assert_eq!(FindKey::from_key("a"), None);
    }
}
