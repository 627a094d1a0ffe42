//! Keyboard shortcuts.
//!
//! Keys are the DOM `KeyboardEvent.key` names (`"Enter"`, `"Escape"`,
//! `"o"`, ...). Each shortcut only fires in the phase where its action
//! is allowed, so nothing is mapped while a request is in flight.

use crate::session::Phase;

/// What a shortcut asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Open the file picker dialog.
    OpenPicker,
    /// Send the loaded image to the classifier.
    Classify,
    /// Clear the loaded image.
    Remove,
}

/// Map a key press in `phase` to an [`Action`].
#[must_use]
pub fn shortcut(key: &str, phase: Phase) -> Option<Action> {
    match (phase, key) {
        (Phase::Idle, "o" | "O") => Some(Action::OpenPicker),
        (Phase::Loaded, "Enter") => Some(Action::Classify),
        (Phase::Loaded, "Escape" | "Delete") => Some(Action::Remove),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_only_opens_picker() {
        assert_eq!(shortcut("o", Phase::Idle), Some(Action::OpenPicker));
        assert_eq!(shortcut("O", Phase::Idle), Some(Action::OpenPicker));
        assert_eq!(shortcut("Enter", Phase::Idle), None);
        assert_eq!(shortcut("Escape", Phase::Idle), None);
    }

    #[test]
    fn loaded_classifies_or_removes() {
        assert_eq!(shortcut("Enter", Phase::Loaded), Some(Action::Classify));
        assert_eq!(shortcut("Escape", Phase::Loaded), Some(Action::Remove));
        assert_eq!(shortcut("Delete", Phase::Loaded), Some(Action::Remove));
        assert_eq!(shortcut("o", Phase::Loaded), None);
    }

    #[test]
    fn nothing_fires_while_requesting() {
        for key in ["o", "Enter", "Escape", "Delete", "x"] {
            assert_eq!(shortcut(key, Phase::Requesting), None, "key {key:?}");
        }
    }
}
