//! Editor controller: keystrokes in, session mutations out.
//!
//! * `key_translator` turns raw [`Key`]s into [`Action`]s for the current
//!   mode, resolving `Esc` pairs.
//! * `dispatcher` owns the controller loop and routes actions to the motion,
//!   edit, mode and command handlers.
//! * `io_ops` wraps stream opening for the `open`/`openrw` commands and the
//!   command-line path.
//!
//! Handlers mutate the [`core_state::Session`] and report side effects the
//! render engine must hear about through [`DispatchResult`].
//!
//! [`Key`]: core_terminal::Key

use core_model::TermSize;

pub mod dispatcher;
pub mod error;
pub mod help;
pub mod io_ops;
pub mod key_translator;

pub use dispatcher::command_parser::{GoTo, ParsedCommand, parse_command, parse_number, tokenize};
pub use dispatcher::{DispatchResult, EditorController};
pub use error::EditorError;
pub use key_translator::KeyTranslator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    RowStart,
    RowEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Motion(MotionKind),
    /// Move the cursor to the next visible panel.
    CycleTab,
    /// `:` pressed; read and run one command line.
    BeginCommand,
    /// `Esc Esc`: ask before quitting.
    RequestQuit,
    /// Reply to the quit prompt.
    AnswerQuit(bool),
    EnterModify,
    ExitModify,
    /// Printable byte typed in modify mode.
    Input(u8),
    /// Key following a pending hex nibble; `None` when not printable.
    SecondNibble(Option<u8>),
    Resize(TermSize),
}
