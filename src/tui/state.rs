//! Input state for the token-entry view.

/// Character shown in place of each token character while masked.
const MASK_CHAR: char = '*';

/// Editable state of the token-entry field.
///
/// Tokens are masked by default; visibility can be toggled so the user can
/// verify what they pasted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenEntryState {
    text: String,
    visible: bool,
}

impl TokenEntryState {
    /// Creates an empty, masked entry field.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text: String::new(),
            visible: false,
        }
    }

    /// Returns the raw entered text.
    #[must_use]
    pub const fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Returns true when the field contains no non-whitespace characters.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Returns true when the token is shown in clear text.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Appends a character. Control characters are ignored.
    pub fn push_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        self.text.push(ch);
    }

    /// Removes the last character, if any.
    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// Toggles between masked and clear-text display.
    pub const fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
    }

    /// Clears the entered text and re-masks the field.
    pub fn clear(&mut self) {
        self.text.clear();
        self.visible = false;
    }

    /// Returns the text to render: clear text when visible, mask otherwise.
    #[must_use]
    pub fn display_text(&self) -> String {
        if self.visible {
            self.text.clone()
        } else {
            MASK_CHAR.to_string().repeat(self.text.chars().count())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TokenEntryState;

    #[test]
    fn typing_appends_and_backspace_removes() {
        let mut state = TokenEntryState::new();
        state.push_char('g');
        state.push_char('h');
        state.push_char('p');
        assert_eq!(state.text(), "ghp");

        state.backspace();
        assert_eq!(state.text(), "gh");

        state.backspace();
        state.backspace();
        state.backspace();
        assert_eq!(state.text(), "");
    }

    #[test]
    fn control_characters_are_ignored() {
        let mut state = TokenEntryState::new();
        state.push_char('\t');
        state.push_char('\u{1b}');
        state.push_char('a');
        assert_eq!(state.text(), "a");
    }

    #[test]
    fn display_text_masks_until_visibility_is_toggled() {
        let mut state = TokenEntryState::new();
        state.push_char('a');
        state.push_char('b');
        state.push_char('c');

        assert_eq!(state.display_text(), "***");

        state.toggle_visibility();
        assert_eq!(state.display_text(), "abc");

        state.toggle_visibility();
        assert_eq!(state.display_text(), "***");
    }

    #[test]
    fn blank_detection_treats_whitespace_as_empty() {
        let mut state = TokenEntryState::new();
        assert!(state.is_blank());
        state.push_char(' ');
        assert!(state.is_blank());
        state.push_char('x');
        assert!(!state.is_blank());
    }

    #[test]
    fn clear_resets_text_and_visibility() {
        let mut state = TokenEntryState::new();
        state.push_char('x');
        state.toggle_visibility();

        state.clear();

        assert!(state.is_blank());
        assert!(!state.is_visible());
    }
}
