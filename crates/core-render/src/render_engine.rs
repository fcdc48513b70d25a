//! Render pass dispatch.
//!
//! One call to [`RenderEngine::frame`] normalizes the viewport, consumes the
//! pending dirty flags and records the terminal commands needed to bring the
//! screen in line with the session:
//!
//! * `full`: every visible row, top to bottom.
//! * `scroll`: a one-row shift inside a scroll region limited to the viewport
//!   rows, then the single row that entered the window.
//! * cursor pass (after either of the above, or alone): when the highlighted
//!   row moved, or its bytes were written, the old row is redrawn plain and
//!   the new one highlighted.
//!
//! Every pass ends with the status bar and the terminal cursor parked on the
//! cursor's cell in the active panel.
//!
//! The engine remembers which screen row is currently highlighted and the top
//! offset the screen was drawn with. Before a scroll it un-highlights the old
//! row in place using the previous top offset, so the row that moves with the
//! scroll is already correct.

use crate::row::{RowContext, draw_row};
use crate::row_cache::RowCache;
use crate::status::draw_status;
use crate::writer::Writer;
use core_model::{ScrollDir, cursor_screen_x};
use core_state::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPath {
    Full,
    ScrollUp,
    ScrollDown,
    CursorOnly,
    /// Nothing in the grid changed; status and cursor only.
    StatusOnly,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    pub full_frames: u64,
    pub scroll_frames: u64,
    pub cursor_frames: u64,
    pub status_frames: u64,
    /// Rows drawn across all passes.
    pub rows_drawn: u64,
    /// Rows drawn by the most recent pass.
    pub last_rows_drawn: u32,
    pub last_path: Option<RenderPath>,
}

#[derive(Debug, Default)]
pub struct RenderEngine {
    cache: RowCache,
    /// Screen row currently drawn highlighted.
    last_row: Option<u32>,
    prev_top: u64,
    last_h_scroll: u32,
    last_screen_columns: u32,
    /// The highlighted row's bytes changed since it was drawn.
    row_stale: bool,
    stats: RenderStats,
}

fn screen_row(y: u32) -> u16 {
    u16::try_from(y).unwrap_or(u16::MAX)
}

impl RenderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop cached row bytes (re-open, truncate).
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    /// A byte under the cursor was written: the cached row is stale and the
    /// highlighted row must be redrawn even if the cursor stays on it.
    pub fn note_write(&mut self) {
        self.cache.invalidate();
        self.row_stale = true;
    }

    /// Forget everything known about the screen.
    pub fn reset(&mut self) {
        self.cache.invalidate();
        self.last_row = None;
        self.row_stale = false;
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    pub fn cache(&self) -> &RowCache {
        &self.cache
    }

    pub fn frame(&mut self, session: &mut Session) -> Writer {
        session.normalize();
        let dirty = session.dirty;
        session.dirty.clear();

        let vp = session.viewport;
        if vp.h_scroll != self.last_h_scroll || vp.screen_columns != self.last_screen_columns {
            self.cache.invalidate();
            self.last_h_scroll = vp.h_scroll;
            self.last_screen_columns = vp.screen_columns;
        }

        let ctx = RowContext::from_session(session);
        let rows = vp.row_count;
        let cols = u64::from(vp.columns_per_row);
        let mut w = Writer::new();
        let mut drawn = 0u32;
        let mut path = RenderPath::StatusOnly;

        if dirty.full {
            for y in 0..rows {
                w.move_to(0, screen_row(y));
                let hl = y == vp.cursor_row;
                draw_row(&mut w, &ctx, &mut self.cache, session.stream_mut(), hl, vp.row_offset(y));
                drawn += 1;
            }
            self.last_row = Some(vp.cursor_row);
            self.row_stale = false;
            path = RenderPath::Full;
        } else if dirty.scroll != ScrollDir::None {
            // Un-highlight the old row where it sits now, unless the scroll
            // pushes it out of the viewport.
            if let Some(last) = self.last_row {
                let survives = match dirty.scroll {
                    ScrollDir::Down => last + 1 < rows,
                    _ => last > 0,
                };
                if survives && last < rows {
                    let offset = self
                        .prev_top
                        .saturating_add(u64::from(last) * cols);
                    w.move_to(0, screen_row(last));
                    draw_row(&mut w, &ctx, &mut self.cache, session.stream_mut(), false, offset);
                    drawn += 1;
                }
            }
            let term_rows = session.term().rows;
            let entering = if dirty.scroll == ScrollDir::Down {
                w.set_scroll_region(1, screen_row(rows));
                w.move_to(0, 0);
                w.insert_line();
                w.move_to(0, 0);
                let hl = vp.cursor_row == 0;
                draw_row(&mut w, &ctx, &mut self.cache, session.stream_mut(), hl, vp.top_offset);
                w.set_scroll_region(1, term_rows);
                path = RenderPath::ScrollDown;
                0
            } else {
                let bottom = rows - 1;
                w.set_scroll_region(1, screen_row(rows));
                w.move_to(0, screen_row(bottom));
                w.newline();
                w.set_scroll_region(1, term_rows);
                w.move_to(0, screen_row(bottom));
                let hl = vp.cursor_row == bottom;
                draw_row(&mut w, &ctx, &mut self.cache, session.stream_mut(), hl, vp.row_offset(bottom));
                path = RenderPath::ScrollUp;
                bottom
            };
            drawn += 1;
            self.last_row = (vp.cursor_row == entering).then_some(entering);
            self.row_stale = false;
        }

        if self.last_row != Some(vp.cursor_row) || self.row_stale {
            if let Some(last) = self.last_row.filter(|&l| l != vp.cursor_row && l < rows) {
                w.move_to(0, screen_row(last));
                draw_row(&mut w, &ctx, &mut self.cache, session.stream_mut(), false, vp.row_offset(last));
                drawn += 1;
            }
            w.move_to(0, screen_row(vp.cursor_row));
            draw_row(
                &mut w,
                &ctx,
                &mut self.cache,
                session.stream_mut(),
                true,
                vp.row_offset(vp.cursor_row),
            );
            drawn += 1;
            self.last_row = Some(vp.cursor_row);
            self.row_stale = false;
            if path == RenderPath::StatusOnly {
                path = RenderPath::CursorOnly;
            }
        }

        draw_status(&mut w, session);
        let visible_col = vp.cursor_col.saturating_sub(vp.h_scroll);
        let x = cursor_screen_x(session.active, session.panels, visible_col, vp.screen_columns);
        let max_x = u32::from(session.term().cols.saturating_sub(1));
        w.move_to(screen_row(x.min(max_x)), screen_row(vp.cursor_row));

        self.prev_top = vp.top_offset;
        self.record(path, drawn);
        w
    }

    fn record(&mut self, path: RenderPath, drawn: u32) {
        match path {
            RenderPath::Full => self.stats.full_frames += 1,
            RenderPath::ScrollUp | RenderPath::ScrollDown => self.stats.scroll_frames += 1,
            RenderPath::CursorOnly => self.stats.cursor_frames += 1,
            RenderPath::StatusOnly => self.stats.status_frames += 1,
        }
        self.stats.rows_drawn += u64::from(drawn);
        self.stats.last_rows_drawn = drawn;
        self.stats.last_path = Some(path);
        tracing::trace!(target: "render", ?path, rows = drawn, "frame");
    }
}
