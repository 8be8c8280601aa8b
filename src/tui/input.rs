//! Input handling for the TUI application.
//!
//! Key events map to application messages differently depending on which
//! view has focus: in the token-entry view most printable keys are text,
//! while on the dashboard they are commands.

use super::messages::AppMsg;

/// Which view currently interprets key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    /// Token-entry field has focus; printable keys are text.
    TokenEntry,
    /// Dashboard has focus; keys are commands.
    Dashboard,
}

/// Maps a key event to an application message for the given context.
///
/// Returns `None` for unrecognised key events, allowing them to be ignored.
#[must_use]
#[expect(
    clippy::missing_const_for_fn,
    reason = "KeyCode match patterns prevent const evaluation"
)]
pub fn map_key_to_message_with_context(
    key: &bubbletea_rs::event::KeyMsg,
    context: InputContext,
) -> Option<AppMsg> {
    use crossterm::event::KeyCode;

    match context {
        InputContext::TokenEntry => match key.key {
            KeyCode::Enter => Some(AppMsg::TokenSubmitted),
            KeyCode::Backspace => Some(AppMsg::TokenInputBackspace),
            KeyCode::Tab => Some(AppMsg::TokenInputToggleVisibility),
            KeyCode::Esc => Some(AppMsg::Quit),
            KeyCode::Char(ch) => Some(AppMsg::TokenInputChar(ch)),
            _ => None,
        },
        InputContext::Dashboard => match key.key {
            KeyCode::Char('q') | KeyCode::Esc => Some(AppMsg::Quit),
            KeyCode::Char('r') => Some(AppMsg::RefreshRequested),
            KeyCode::Char('l') => Some(AppMsg::Logout),
            KeyCode::Char('j') | KeyCode::Down => Some(AppMsg::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(AppMsg::ScrollUp),
            KeyCode::Char('?') => Some(AppMsg::ToggleHelp),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use bubbletea_rs::event::KeyMsg;
    use crossterm::event::{KeyCode, KeyModifiers};
    use rstest::rstest;

    use super::{InputContext, map_key_to_message_with_context};
    use crate::tui::messages::AppMsg;

    fn key(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::empty(),
        }
    }

    #[rstest]
    #[case(KeyCode::Char('q'), InputContext::TokenEntry)]
    #[case(KeyCode::Char('r'), InputContext::TokenEntry)]
    #[case(KeyCode::Char('l'), InputContext::TokenEntry)]
    fn token_entry_treats_command_letters_as_text(
        #[case] code: KeyCode,
        #[case] context: InputContext,
    ) {
        let mapped = map_key_to_message_with_context(&key(code), context);
        assert!(matches!(mapped, Some(AppMsg::TokenInputChar(_))));
    }

    #[rstest]
    fn token_entry_maps_enter_to_submit() {
        let mapped = map_key_to_message_with_context(&key(KeyCode::Enter), InputContext::TokenEntry);
        assert!(matches!(mapped, Some(AppMsg::TokenSubmitted)));
    }

    #[rstest]
    #[case(KeyCode::Char('q'), Some(AppMsg::Quit))]
    #[case(KeyCode::Char('r'), Some(AppMsg::RefreshRequested))]
    #[case(KeyCode::Char('l'), Some(AppMsg::Logout))]
    #[case(KeyCode::Char('j'), Some(AppMsg::ScrollDown))]
    #[case(KeyCode::Char('k'), Some(AppMsg::ScrollUp))]
    #[case(KeyCode::Char('?'), Some(AppMsg::ToggleHelp))]
    #[case(KeyCode::Char('x'), None)]
    fn dashboard_maps_command_keys(#[case] code: KeyCode, #[case] expected: Option<AppMsg>) {
        let mapped = map_key_to_message_with_context(&key(code), InputContext::Dashboard);
        assert_eq!(mapped, expected);
    }
}
