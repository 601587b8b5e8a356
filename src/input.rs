use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction::{self, *};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Pause,
    Quit,
}

impl Command {
    pub fn from_key_event(ev: &KeyEvent) -> Option<Command> {
        if is_ctrl_c(ev) {
            return Some(Command::Quit);
        }

        match ev.code {
            KeyCode::Char('w') | KeyCode::Up => Some(Command::Steer(Up)),
            KeyCode::Char('a') | KeyCode::Left => Some(Command::Steer(Left)),
            KeyCode::Char('s') | KeyCode::Down => Some(Command::Steer(Down)),
            KeyCode::Char('d') | KeyCode::Right => Some(Command::Steer(Right)),
            KeyCode::Esc => Some(Command::Pause),
            KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        }
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

/// The direction requested since the last tick. Only the latest valid
/// request survives until it is taken.
#[derive(Debug, Default)]
pub struct InputHandler {
    pending: Option<Direction>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false, leaving the pending direction alone, when `requested`
    /// would turn the snake back onto its neck.
    pub fn request(&mut self, requested: Direction, committed: Direction) -> bool {
        if requested == committed.opposite() {
            return false;
        }

        self.pending = Some(requested);
        true
    }

    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }

    pub fn take(&mut self) -> Option<Direction> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent { code, modifiers: KeyModifiers::NONE }
    }

    #[test]
    fn arrows_and_wasd_steer() {
        assert_eq!(Command::from_key_event(&key(KeyCode::Up)), Some(Command::Steer(Up)));
        assert_eq!(Command::from_key_event(&key(KeyCode::Down)), Some(Command::Steer(Down)));
        assert_eq!(Command::from_key_event(&key(KeyCode::Left)), Some(Command::Steer(Left)));
        assert_eq!(Command::from_key_event(&key(KeyCode::Right)), Some(Command::Steer(Right)));
        assert_eq!(Command::from_key_event(&key(KeyCode::Char('a'))), Some(Command::Steer(Left)));
    }

    #[test]
    fn control_keys() {
        let ctrl_c = KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL };
        assert_eq!(Command::from_key_event(&ctrl_c), Some(Command::Quit));
        assert_eq!(Command::from_key_event(&key(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(Command::from_key_event(&key(KeyCode::Esc)), Some(Command::Pause));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        assert_eq!(Command::from_key_event(&key(KeyCode::Char('x'))), None);
        assert_eq!(Command::from_key_event(&key(KeyCode::Enter)), None);
        assert_eq!(Command::from_key_event(&key(KeyCode::Char('c'))), None);
    }

    #[test]
    fn reversal_is_rejected() {
        let mut input = InputHandler::new();
        assert!(!input.request(Right, Left));
        assert_eq!(input.pending(), None);

        assert!(input.request(Up, Left));
        assert!(!input.request(Right, Left));
        assert_eq!(input.pending(), Some(Up));
    }

    #[test]
    fn last_request_wins() {
        let mut input = InputHandler::new();
        input.request(Up, Left);
        input.request(Down, Left);
        assert_eq!(input.take(), Some(Down));
        assert_eq!(input.take(), None);
    }
}
