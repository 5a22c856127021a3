//! Keyboard keys the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Dismiss,
    Previous,
    Next,
}

#[must_use]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "Escape" => Some(KeyAction::Dismiss),
        "ArrowLeft" => Some(KeyAction::Previous),
        "ArrowRight" => Some(KeyAction::Next),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_maps() {
        assert_eq!(key_action("Escape"), Some(KeyAction::Dismiss));
        assert_eq!(key_action("ArrowLeft"), Some(KeyAction::Previous));
        assert_eq!(key_action("ArrowRight"), Some(KeyAction::Next));
        assert_eq!(key_action("Enter"), None);
    }
}
