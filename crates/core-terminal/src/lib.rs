//! Terminal backend abstraction and crossterm implementation.
//!
//! The rest of the workspace talks to the terminal only through the
//! [`Console`] trait: size query, blocking key read, raw byte output. The
//! crossterm-backed [`CrosstermConsole`] is used by the binary;
//! [`fake::FakeConsole`] replays scripted keys for tests.
//!
//! Raw mode, the alternate screen and line-wrap disabling are owned by
//! [`CrosstermBackend`] and restored by [`TerminalGuard`] on drop.

use anyhow::Result;
use core_model::TermSize;
use crossterm::{
    cursor::{MoveTo, Show},
    event, execute,
    terminal::{
        DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
        disable_raw_mode, enable_raw_mode,
    },
};
use std::io::{self, Stdout, Write, stdout};

pub mod fake;
pub mod key;
pub mod line;
pub mod probe;

pub use key::Key;
pub use line::read_line;
pub use probe::{SizeSource, discover_size};

/// Opaque terminal services used by the controller and render loop.
pub trait Console {
    /// Current terminal size.
    fn size(&mut self) -> Result<TermSize>;
    /// Block until the next keystroke (or resize) arrives.
    fn read_key(&mut self) -> Result<Key>;
    /// Write raw bytes to the terminal and flush.
    fn write_all(&mut self, bytes: &[u8]) -> Result<()>;
}

impl<C: Console + ?Sized> Console for &mut C {
    fn size(&mut self) -> Result<TermSize> {
        (**self).size()
    }
    fn read_key(&mut self) -> Result<Key> {
        (**self).read_key()
    }
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write_all(bytes)
    }
}

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
}

pub struct CrosstermBackend {
    entered: bool,
}

/// RAII guard ensuring terminal state restoration even if caller early-returns or panics.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
    active: bool,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self { entered: false }
    }

    /// Enter and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard {
            backend: self,
            active: true,
        })
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, DisableLineWrap)?;
            self.entered = true;
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            execute!(stdout(), EnableLineWrap, LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            self.entered = false;
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl TerminalGuard<'_> {
    /// Restore the terminal now and report failure instead of swallowing it.
    pub fn restore(mut self) -> Result<()> {
        self.active = false;
        self.backend.leave()
    }
}

impl Drop for TerminalGuard<'_> {
    fn drop(&mut self) {
        if self.active {
            let _ = self.backend.leave();
        }
    }
}

/// Console over the process's stdin/stdout.
pub struct CrosstermConsole {
    out: Stdout,
    probe: bool,
    fallback: TermSize,
}

impl CrosstermConsole {
    /// `probe` enables cursor-position probing when the size ioctl fails;
    /// `fallback` is used when every discovery method fails.
    pub fn new(probe: bool, fallback: TermSize) -> Self {
        Self {
            out: stdout(),
            probe,
            fallback,
        }
    }
}

impl SizeSource for CrosstermConsole {
    fn query_size(&mut self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    fn cursor_position(&mut self) -> io::Result<(u16, u16)> {
        // Bounded: crossterm gives up when no report arrives in time.
        crossterm::cursor::position()
    }

    fn move_cursor(&mut self, col: u16, row: u16) -> io::Result<()> {
        execute!(self.out, MoveTo(col, row))
    }
}

impl Console for CrosstermConsole {
    fn size(&mut self) -> Result<TermSize> {
        let (probe, fallback) = (self.probe, self.fallback);
        Ok(discover_size(self, probe, fallback))
    }

    fn read_key(&mut self) -> Result<Key> {
        loop {
            let ev = event::read()?;
            if let Some(key) = Key::from_event(&ev) {
                tracing::trace!(target: "terminal", ?key, "key");
                return Ok(key);
            }
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.out.write_all(bytes)?;
        self.out.flush()?;
        Ok(())
    }
}

