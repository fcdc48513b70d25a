//! Session state: the single owned structure the controller mutates between
//! render passes.
//!
//! A `Session` holds the open stream (if any), the logical cursor, the
//! viewport model, pending dirty flags, panel visibility and the input mode.
//! There is no ambient state anywhere else; the render engine receives a
//! borrow of the session each tick.
//!
//! Cursor invariant: after every public mutation `cursor <= last_offset()`,
//! i.e. `0 <= cursor < max(size, 1)`. The helpers that move the cursor clamp
//! through [`Session::set_cursor`], and stream replacement or truncation
//! re-clamps.

use core_model::{DirtyFlags, Panel, PanelSet, TermSize, ViewportState};
use core_stream::{ByteStream, StreamError};

mod mode;
pub use mode::Mode;

#[derive(Debug)]
pub struct Session {
    stream: Option<ByteStream>,
    cursor: u64,
    pub viewport: ViewportState,
    pub dirty: DirtyFlags,
    pub panels: PanelSet,
    pub active: Panel,
    pub mode: Mode,
    term: TermSize,
    quit: bool,
}

impl Session {
    pub fn new(columns_per_row: u32, panels: PanelSet, term: TermSize) -> Self {
        let term = term.sanitized();
        Self {
            stream: None,
            cursor: 0,
            viewport: ViewportState::new(columns_per_row, term.viewport_rows()),
            dirty: DirtyFlags::full(),
            panels,
            active: Panel::Hex.settle(panels),
            mode: Mode::Navigation,
            term,
            quit: false,
        }
    }

    pub fn stream(&self) -> Option<&ByteStream> {
        self.stream.as_ref()
    }

    pub fn stream_mut(&mut self) -> Option<&mut ByteStream> {
        self.stream.as_mut()
    }

    /// Size of the open stream, zero when closed.
    pub fn size(&self) -> u64 {
        self.stream.as_ref().map_or(0, ByteStream::size)
    }

    pub fn is_writable(&self) -> bool {
        self.stream.as_ref().is_some_and(ByteStream::is_writable)
    }

    /// Highest valid cursor position.
    pub fn last_offset(&self) -> u64 {
        self.size().saturating_sub(1)
    }

    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Move the cursor, clamped into the stream.
    pub fn set_cursor(&mut self, offset: u64) {
        self.cursor = offset.min(self.last_offset());
    }

    pub fn term(&self) -> TermSize {
        self.term
    }

    pub fn set_term(&mut self, term: TermSize) {
        let term = term.sanitized();
        if term != self.term {
            tracing::debug!(target: "state", cols = term.cols, rows = term.rows, "term_resize");
            self.term = term;
            self.viewport.set_row_count(term.viewport_rows());
            self.dirty.full = true;
        }
    }

    /// Replace the stream wholesale (open, re-open, or close on failure).
    /// Cursor and viewport return to the start and modify mode is left.
    pub fn replace_stream(&mut self, stream: Option<ByteStream>) {
        self.stream = stream;
        self.cursor = 0;
        self.viewport.reset();
        self.mode = Mode::Navigation;
        self.dirty.full = true;
    }

    /// Truncate (or extend) the stream. On failure size and cursor are left
    /// untouched; on success the cursor is re-clamped.
    pub fn truncate(&mut self, new_size: u64) -> Result<(), StreamError> {
        let Some(stream) = self.stream.as_mut() else {
            return Err(StreamError::ReadOnly);
        };
        stream.truncate(new_size)?;
        self.set_cursor(self.cursor);
        self.dirty.full = true;
        Ok(())
    }

    /// Run viewport normalization for the current cursor and fold the raised
    /// flags into the pending set.
    pub fn normalize(&mut self) -> DirtyFlags {
        let raised = self
            .viewport
            .normalize(self.cursor, self.panels, self.term.cols);
        self.dirty.merge(raised);
        raised
    }

    pub fn mark_full(&mut self) {
        self.dirty.full = true;
    }

    pub fn show_panels(&mut self, which: PanelSet) {
        if !self.panels.contains(which) {
            self.panels.insert(which);
            self.dirty.full = true;
        }
    }

    pub fn hide_panels(&mut self, which: PanelSet) {
        if self.panels.intersects(which) {
            self.panels.remove(which);
            self.active = self.active.settle(self.panels);
            self.dirty.full = true;
        }
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}
