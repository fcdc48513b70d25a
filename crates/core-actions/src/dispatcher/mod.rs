//! Controller loop and action dispatch.
//!
//! Sub-modules:
//! * `motion`  - cursor movement
//! * `mode`    - modify mode and the quit prompt
//! * `edit`    - byte overwrite
//! * `command` - command execution
//! * `command_parser` - tokenizing and classifying a command line
//!
//! [`EditorController`] owns the session, the render engine and the console.
//! One [`EditorController::tick`] renders a pass, blocks for one key and
//! applies it. Handlers report side effects the engine must know about in a
//! [`DispatchResult`]; errors are shown on the status row and acknowledged
//! with Enter before the loop continues.

use crate::error::EditorError;
use crate::help::HELP_LINES;
use crate::io_ops::open_stream;
use crate::key_translator::KeyTranslator;
use crate::Action;
use anyhow::Result;
use core_render::{RenderEngine, RowStyle, Writer, prompt};
use core_state::{Mode, Session};
use core_terminal::{Console, Key, read_line};
use std::path::Path;

mod command;
pub mod command_parser;
mod edit;
mod mode;
mod motion;

const COMMAND_PROMPT: &str = "command: ";
const QUIT_PROMPT: &str = "Are you sure you want to quit?";
/// Longest command line accepted.
const COMMAND_MAX: usize = 254;

/// Side effects of one dispatched action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchResult {
    pub quit: bool,
    /// A byte under the cursor was overwritten.
    pub wrote: bool,
    /// Stream contents changed in bulk (truncate); cached rows are stale.
    pub invalidate: bool,
    /// A different stream (or none) is now open.
    pub stream_replaced: bool,
    pub show_help: bool,
}

impl DispatchResult {
    pub fn clean() -> Self {
        Self::default()
    }
    pub fn quit() -> Self {
        Self {
            quit: true,
            ..Self::default()
        }
    }
    pub fn wrote() -> Self {
        Self {
            wrote: true,
            ..Self::default()
        }
    }
    pub fn invalidate() -> Self {
        Self {
            invalidate: true,
            ..Self::default()
        }
    }
    pub fn stream_replaced() -> Self {
        Self {
            stream_replaced: true,
            ..Self::default()
        }
    }
    pub fn help() -> Self {
        Self {
            show_help: true,
            ..Self::default()
        }
    }
}

pub struct EditorController<C: Console> {
    session: Session,
    engine: RenderEngine,
    console: C,
    translator: KeyTranslator,
}

impl<C: Console> EditorController<C> {
    pub fn new(session: Session, console: C) -> Self {
        Self {
            session,
            engine: RenderEngine::new(),
            console,
            translator: KeyTranslator::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn engine(&self) -> &RenderEngine {
        &self.engine
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Open the stream named on the command line. Failure is reported and
    /// acknowledged; the session stays closed.
    pub fn open_initial(&mut self, path: &Path, writable: bool) -> Result<()> {
        match open_stream(path, writable) {
            Ok(stream) => {
                self.session.replace_stream(Some(stream));
                self.engine.reset();
            }
            Err(e) => {
                self.session.replace_stream(None);
                self.report(&e)?;
            }
        }
        Ok(())
    }

    /// Run until quit is confirmed.
    pub fn run(&mut self) -> Result<()> {
        tracing::info!(target: "runtime", "controller_loop_start");
        while !self.session.quit_requested() {
            self.tick()?;
        }
        tracing::info!(target: "runtime", "controller_loop_exit");
        Ok(())
    }

    /// One render pass followed by one key.
    pub fn tick(&mut self) -> Result<()> {
        self.render()?;
        let key = self.console.read_key()?;
        self.handle_key(key)
    }

    pub fn render(&mut self) -> Result<()> {
        let mut w = self.engine.frame(&mut self.session);
        if matches!(self.session.mode, Mode::ConfirmQuit { .. }) {
            w.hide_cursor();
            prompt(&mut w, self.session.term(), QUIT_PROMPT, RowStyle::Alert);
        }
        self.flush(w)
    }

    pub fn handle_key(&mut self, key: Key) -> Result<()> {
        match self.translator.translate(self.session.mode, key) {
            Some(action) => self.apply(action),
            None => Ok(()),
        }
    }

    /// Apply one action, surfacing handler errors to the user.
    pub fn apply(&mut self, action: Action) -> Result<()> {
        let was_confirming = matches!(self.session.mode, Mode::ConfirmQuit { .. });
        let outcome = match action {
            Action::Motion(kind) => Ok(motion::handle_motion(kind, &mut self.session)),
            Action::CycleTab => {
                self.session.active = self.session.active.cycle(self.session.panels);
                Ok(DispatchResult::clean())
            }
            Action::BeginCommand => return self.command_entry(),
            Action::RequestQuit => Ok(mode::request_quit(&mut self.session)),
            Action::AnswerQuit(yes) => Ok(mode::answer_quit(yes, &mut self.session)),
            Action::EnterModify => mode::enter_modify(&mut self.session),
            Action::ExitModify => Ok(mode::exit_modify(&mut self.session)),
            Action::Input(byte) => edit::handle_input(byte, &mut self.session),
            Action::SecondNibble(key) => edit::handle_second_nibble(key, &mut self.session),
            Action::Resize(size) => {
                self.session.set_term(size);
                Ok(DispatchResult::clean())
            }
        };
        if was_confirming && !matches!(self.session.mode, Mode::ConfirmQuit { .. }) {
            let mut w = Writer::new();
            w.show_cursor();
            self.flush(w)?;
        }
        self.settle(outcome)
    }

    fn settle(&mut self, outcome: Result<DispatchResult, EditorError>) -> Result<()> {
        let r = match outcome {
            Ok(r) => r,
            Err(e) => return self.report(&e),
        };
        if r.wrote {
            self.engine.note_write();
        }
        if r.invalidate {
            self.engine.invalidate();
        }
        if r.stream_replaced {
            self.engine.reset();
        }
        if r.show_help {
            self.show_help()?;
        }
        if r.quit {
            self.session.request_quit();
        }
        Ok(())
    }

    fn command_entry(&mut self) -> Result<()> {
        self.session.mode = Mode::CommandEntry;
        let mut w = Writer::new();
        prompt(&mut w, self.session.term(), COMMAND_PROMPT, RowStyle::Plain);
        self.flush(w)?;
        let max = usize::from(self.session.term().cols.saturating_sub(1)).min(COMMAND_MAX);
        let session = &mut self.session;
        let line = read_line(&mut self.console, max, |size| session.set_term(size));
        self.session.mode = Mode::Navigation;
        let Some(line) = line? else {
            tracing::debug!(target: "actions.command", "command_cancelled");
            return Ok(());
        };
        let cmd = command_parser::parse_command(&line);
        let outcome = command::execute_command(cmd, &mut self.session);
        self.settle(outcome)
    }

    /// Show `err` on the status row and wait for Enter.
    pub fn report(&mut self, err: &EditorError) -> Result<()> {
        tracing::warn!(target: "actions", error = %err, detail = ?err, "reported");
        let mut w = Writer::new();
        prompt(&mut w, self.session.term(), &err.to_string(), RowStyle::Plain);
        self.flush(w)?;
        self.wait_for_enter()
    }

    fn show_help(&mut self) -> Result<()> {
        let mut w = Writer::new();
        w.style(RowStyle::Plain);
        w.clear_screen();
        for (row, line) in HELP_LINES.iter().enumerate() {
            w.move_to(0, u16::try_from(row).unwrap_or(u16::MAX));
            w.print(*line);
        }
        self.flush(w)?;
        self.wait_for_enter()?;
        self.session.mark_full();
        self.engine.reset();
        Ok(())
    }

    /// Consume keys until Enter. Resizes are still honored.
    fn wait_for_enter(&mut self) -> Result<()> {
        loop {
            match self.console.read_key()? {
                Key::Enter => return Ok(()),
                Key::Resize(size) => self.session.set_term(size),
                _ => {}
            }
        }
    }

    fn flush(&mut self, w: Writer) -> Result<()> {
        let bytes = w.into_bytes()?;
        self.console.write_all(&bytes)
    }
}
