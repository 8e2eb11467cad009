use crate::chat_widget::ChatWidget;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the main loop should do in response to a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    Submit(String),
    Quit,
}

/// Maps a key event onto the widget. Editing keys mutate the input buffer in
/// place; Enter without Shift drains the buffer and requests a submission,
/// so keystrokes arriving after Enter land in the next message rather than
/// the one already in flight. Shift+Enter is reserved for multi-line
/// composition and currently does nothing. While a request is outstanding
/// the send control is disabled, so Enter yields no action.
pub fn handle_chat_input(key: KeyEvent, widget: &mut ChatWidget) -> Option<ChatAction> {
    match key.code {
        KeyCode::Esc => Some(ChatAction::Quit),
        KeyCode::Enter => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                return None;
            }
            if widget.sending {
                return None;
            }
            Some(ChatAction::Submit(std::mem::take(&mut widget.input)))
        }
        KeyCode::Backspace => {
            widget.input.pop();
            None
        }
        KeyCode::PageUp => {
            widget.scroll_up();
            None
        }
        KeyCode::PageDown => {
            widget.scroll_down();
            None
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => Some(ChatAction::Quit),
                    'u' => {
                        widget.scroll_up();
                        None
                    }
                    'd' => {
                        widget.scroll_down();
                        None
                    }
                    _ => None,
                }
            } else {
                widget.input.push(c);
                None
            }
        }
        _ => None,
    }
}
