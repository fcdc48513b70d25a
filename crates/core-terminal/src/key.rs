//! Keystrokes as seen by the controller.
//!
//! crossterm events are flattened into a small closed enum. Escape pairs
//! (`Esc Esc`, `Esc m`, `Esc s`) are not resolved here: a terminal may
//! deliver them as two events or as one Alt-modified key, and the pairing is
//! the controller's business.

use core_model::TermSize;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    /// A character typed with Alt (or delivered as `ESC` + char).
    Alt(char),
    Enter,
    Tab,
    Backspace,
    Esc,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    Resize(TermSize),
    /// Anything the editor has no binding for.
    Other,
}

impl Key {
    /// Translate a crossterm event. Key releases and focus/mouse/paste events
    /// yield `None`.
    pub fn from_event(ev: &Event) -> Option<Key> {
        match ev {
            Event::Key(k) => Self::from_key_event(k),
            Event::Resize(cols, rows) => Some(Key::Resize(TermSize::new(*cols, *rows))),
            _ => None,
        }
    }

    pub fn from_key_event(k: &KeyEvent) -> Option<Key> {
        if k.kind == KeyEventKind::Release {
            return None;
        }
        let key = match k.code {
            KeyCode::Char(c) if k.modifiers.contains(KeyModifiers::ALT) => Key::Alt(c),
            KeyCode::Char(_) if k.modifiers.contains(KeyModifiers::CONTROL) => Key::Other,
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Esc => Key::Esc,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            _ => Key::Other,
        };
        Some(key)
    }

    /// Printable ASCII (code points 32..=126).
    pub fn printable(&self) -> Option<u8> {
        match *self {
            Key::Char(c) if c == ' ' || c.is_ascii_graphic() => Some(c as u8),
            _ => None,
        }
    }
}
