//! KeyTranslator: stateful key -> Action translation.
//!
//! The only state carried between keys is a pending `Esc`. Terminals deliver
//! `Esc m` either as two key events or as one Alt-modified key; both spell
//! the same action:
//!
//! * `Esc Esc` -> `RequestQuit`
//! * `Esc m` / `Alt-m` -> `EnterModify`
//! * `Esc s` / `Alt-s` -> `ExitModify`
//!
//! An `Esc` followed by any other key is dropped and that key is translated
//! normally.
//!
//! Two modes capture every key: the quit prompt (any key is an answer) and a
//! pending hex nibble (any key completes or aborts the byte).

use crate::{Action, MotionKind};
use core_state::Mode;
use core_terminal::Key;

#[derive(Debug, Default)]
pub struct KeyTranslator {
    pending_escape: bool,
}

impl KeyTranslator {
    pub fn new() -> Self {
        Self {
            pending_escape: false,
        }
    }

    pub fn reset(&mut self) {
        self.pending_escape = false;
    }

    pub fn translate(&mut self, mode: Mode, key: Key) -> Option<Action> {
        if let Key::Resize(size) = key {
            return Some(Action::Resize(size));
        }
        match mode {
            Mode::ConfirmQuit { .. } => {
                self.reset();
                return Some(Action::AnswerQuit(matches!(key, Key::Char('y' | 'Y'))));
            }
            Mode::Modify {
                pending_nibble: Some(_),
            } => {
                self.reset();
                return Some(Action::SecondNibble(key.printable()));
            }
            Mode::CommandEntry => return None,
            _ => {}
        }

        if self.pending_escape {
            self.pending_escape = false;
            match key {
                Key::Esc => return Some(Action::RequestQuit),
                Key::Char('m') => return Some(Action::EnterModify),
                Key::Char('s') => return Some(Action::ExitModify),
                _ => {}
            }
        }

        let action = match key {
            Key::Esc => {
                self.pending_escape = true;
                return None;
            }
            Key::Alt('m') => Action::EnterModify,
            Key::Alt('s') => Action::ExitModify,
            Key::Up => Action::Motion(MotionKind::Up),
            Key::Down => Action::Motion(MotionKind::Down),
            Key::Left => Action::Motion(MotionKind::Left),
            Key::Right => Action::Motion(MotionKind::Right),
            Key::PageUp => Action::Motion(MotionKind::PageUp),
            Key::PageDown => Action::Motion(MotionKind::PageDown),
            Key::Home => Action::Motion(MotionKind::RowStart),
            Key::End => Action::Motion(MotionKind::RowEnd),
            Key::Tab => Action::CycleTab,
            Key::Char(':') if !mode.is_modify() => Action::BeginCommand,
            k if mode.is_modify() => Action::Input(k.printable()?),
            _ => return None,
        };
        tracing::trace!(target: "actions.translate", ?key, ?action, "translated");
        Some(action)
    }
}
