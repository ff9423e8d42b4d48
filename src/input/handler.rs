use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the frame loop to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Restart,
    Quit,
    None,
}

/// Maps key presses from any display to loop actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), mods) if mods.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
            (KeyCode::Esc, _) => KeyAction::Quit,
            (KeyCode::Char(c), _) => match c.to_ascii_lowercase() {
                'q' => KeyAction::Quit,
                'r' => KeyAction::Restart,
                _ => KeyAction::None,
            },
            _ => KeyAction::None,
        }
    }
}

/// Build a key event for a plain character, as window toolkits report them
pub fn char_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(key: KeyEvent) -> KeyAction {
        InputHandler::new().handle_key_event(key)
    }

    #[test]
    fn test_quit_and_restart_ignore_case() {
        assert_eq!(action(char_key('q')), KeyAction::Quit);
        assert_eq!(action(KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT)), KeyAction::Quit);
        assert_eq!(action(char_key('r')), KeyAction::Restart);
        assert_eq!(action(KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT)), KeyAction::Restart);
    }

    #[test]
    fn test_escape_and_interrupt_quit() {
        assert_eq!(action(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)), KeyAction::Quit);
        assert_eq!(action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)), KeyAction::Quit);
        // A plain 'c' is just another key
        assert_eq!(action(char_key('c')), KeyAction::None);
    }

    #[test]
    fn test_other_keys_ignored() {
        for key in [char_key('x'), char_key(' '), KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)] {
            assert_eq!(action(key), KeyAction::None);
        }
    }
}
