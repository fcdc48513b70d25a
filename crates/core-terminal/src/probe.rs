//! Terminal size discovery.
//!
//! Order of attempts:
//! 1. The platform size query (`ioctl(TIOCGWINSZ)` behind crossterm).
//! 2. When enabled, a cursor-position probe: record the cursor, move it to
//!    the far corner, ask where it ended up, move it back. Each report wait
//!    is bounded by the backend, so an unresponsive terminal degrades to
//!    step 3 instead of hanging.
//! 3. The configured fallback size.
//!
//! Every result is clamped to the minimum usable terminal.

use core_model::TermSize;
use std::io;

/// Far corner the probe asks the terminal to move to; terminals clamp it.
const PROBE_CORNER: u16 = 999;

/// Synchronous request/response access to the terminal's geometry.
pub trait SizeSource {
    /// Platform size query, `(cols, rows)`.
    fn query_size(&mut self) -> io::Result<(u16, u16)>;
    /// Cursor position report, 0-based `(col, row)`.
    fn cursor_position(&mut self) -> io::Result<(u16, u16)>;
    /// Absolute cursor move, 0-based.
    fn move_cursor(&mut self, col: u16, row: u16) -> io::Result<()>;
}

pub fn discover_size<S: SizeSource + ?Sized>(src: &mut S, probe: bool, fallback: TermSize) -> TermSize {
    match src.query_size() {
        Ok((cols, rows)) if cols > 0 && rows > 0 => {
            return TermSize::new(cols, rows).sanitized();
        }
        Ok((cols, rows)) => {
            tracing::debug!(target: "terminal", cols, rows, "size_query_degenerate");
        }
        Err(e) => {
            tracing::debug!(target: "terminal", ?e, "size_query_failed");
        }
    }
    if probe {
        match probe_by_cursor(src) {
            Ok(size) => {
                tracing::info!(target: "terminal", cols = size.cols, rows = size.rows, "size_probed");
                return size.sanitized();
            }
            Err(e) => {
                tracing::warn!(target: "terminal", ?e, "size_probe_failed");
            }
        }
    }
    tracing::warn!(
        target: "terminal",
        cols = fallback.cols,
        rows = fallback.rows,
        "size_fallback"
    );
    fallback.sanitized()
}

fn probe_by_cursor<S: SizeSource + ?Sized>(src: &mut S) -> io::Result<TermSize> {
    let (orig_col, orig_row) = src.cursor_position()?;
    src.move_cursor(PROBE_CORNER, PROBE_CORNER)?;
    let far = src.cursor_position();
    src.move_cursor(orig_col, orig_row)?;
    let (col, row) = far?;
    Ok(TermSize::new(col.saturating_add(1), row.saturating_add(1)))
}
