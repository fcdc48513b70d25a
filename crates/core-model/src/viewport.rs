//! Viewport state and the cursor-driven normalization algorithm.
//!
//! `normalize` runs once per tick, vertical reconciliation before horizontal:
//!
//! 1. Derive `screen_columns` from the terminal width and visible panels.
//! 2. Move `top_offset` so the cursor row lands in `[0, row_count)`. Only an
//!    overshoot of exactly one row in either direction is reported as a
//!    single-row scroll; any larger jump forces a full repaint because a
//!    scroll region cannot shift several rows without redrawing them anyway.
//! 3. Move `h_scroll` so the cursor column is inside the drawn window.
//!    Horizontal movement always forces a full repaint.
//! 4. Raise `cursor_only` when the grid cell under the cursor changed.
//!
//! `top_offset` is not required to be a multiple of `columns_per_row`
//! (`view sync` pins it to an arbitrary offset); all row math is relative to
//! it.

use crate::dirty::{DirtyFlags, ScrollDir};
use crate::layout::screen_columns;
use crate::panel::PanelSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportState {
    /// Stream offset of the first visible row.
    pub top_offset: u64,
    /// Number of visible rows.
    pub row_count: u32,
    /// Logical bytes per row.
    pub columns_per_row: u32,
    /// Bytes actually drawn per row.
    pub screen_columns: u32,
    /// Leftmost visible column within a row.
    pub h_scroll: u32,
    /// Cursor column within the row (not the screen).
    pub cursor_col: u32,
    /// Cursor row within the viewport grid.
    pub cursor_row: u32,
}

impl ViewportState {
    pub fn new(columns_per_row: u32, row_count: u32) -> Self {
        Self {
            top_offset: 0,
            row_count: row_count.max(1),
            columns_per_row: columns_per_row.max(1),
            // Zero until the first normalize so that pass reports a geometry change.
            screen_columns: 0,
            h_scroll: 0,
            cursor_col: 0,
            cursor_row: 0,
        }
    }

    pub fn set_columns_per_row(&mut self, columns: u32) {
        self.columns_per_row = columns.max(1);
    }

    pub fn set_row_count(&mut self, rows: u32) {
        self.row_count = rows.max(1);
    }

    /// Stream offset of grid row `row`, saturating at the end of the 64-bit
    /// address space.
    pub fn row_offset(&self, row: u32) -> u64 {
        self.top_offset
            .saturating_add(u64::from(row) * u64::from(self.columns_per_row))
    }

    /// Reset the window to the start of the stream (re-open).
    pub fn reset(&mut self) {
        self.top_offset = 0;
        self.h_scroll = 0;
        self.cursor_col = 0;
        self.cursor_row = 0;
    }

    /// Recompute the viewport for `cursor` and return the flags raised by
    /// this call alone. Calling it twice without moving the cursor raises
    /// nothing the second time.
    pub fn normalize(&mut self, cursor: u64, panels: PanelSet, term_cols: u16) -> DirtyFlags {
        let mut dirty = DirtyFlags::default();

        let scrcols = screen_columns(term_cols, panels);
        if scrcols != self.screen_columns {
            self.screen_columns = scrcols;
            dirty.full = true;
        }

        let cols = u64::from(self.columns_per_row.max(1));
        let rows = u64::from(self.row_count.max(1));

        if cursor < self.top_offset {
            let rows_above = (self.top_offset - cursor).div_ceil(cols);
            if self.top_offset < cols {
                self.top_offset = 0;
                dirty.full = true;
            } else if rows_above == 1 {
                self.top_offset -= cols;
                dirty.scroll = ScrollDir::Down;
            } else {
                self.top_offset = self.top_offset.saturating_sub(rows_above * cols);
                dirty.full = true;
            }
        } else {
            let rows_below = (cursor - self.top_offset) / cols;
            if rows_below > rows {
                self.top_offset += (rows_below - (rows - 1)) * cols;
                dirty.full = true;
            } else if rows_below == rows {
                self.top_offset += cols;
                dirty.scroll = ScrollDir::Up;
            }
        }

        let rel = cursor - self.top_offset;
        // rel / cols < rows <= u32::MAX and rel % cols < cols <= u32::MAX.
        let row = (rel / cols) as u32;
        let col = (rel % cols) as u32;
        debug_assert!(row < self.row_count.max(1), "cursor row outside viewport");

        if col < self.h_scroll {
            self.h_scroll = col;
            dirty.full = true;
        } else if col - self.h_scroll >= self.screen_columns {
            self.h_scroll = col - (self.screen_columns - 1);
            dirty.full = true;
        }

        if col != self.cursor_col || row != self.cursor_row {
            self.cursor_col = col;
            self.cursor_row = row;
            dirty.cursor_only = true;
        }

        if !dirty.is_clean() {
            tracing::trace!(
                target: "render.viewport",
                cursor,
                top = self.top_offset,
                row,
                col,
                h_scroll = self.h_scroll,
                full = dirty.full,
                scroll = ?dirty.scroll,
                "normalize"
            );
        }
        dirty
    }
}
