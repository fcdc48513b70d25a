//! Row geometry in terminal cell units.
//!
//! A rendered row is laid out as:
//!
//! ```text
//! 0               16 17                  17+3w 18+3w
//! OOOOOOOOOOOOOOOO <  XX XX XX ... XX      >   aaaa...a >
//! ```
//!
//! where `w` is the number of byte columns drawn (`screen_columns`). Without
//! the hex panel the ASCII cells start at column 17.

use crate::panel::{Panel, PanelSet};

/// Width of the hexadecimal offset label.
pub const OFFSET_LABEL_COLS: u32 = 16;

/// Label plus separators and overflow markers reserved on every row.
pub const ROW_OVERHEAD_COLS: u16 = 19;

/// Terminal dimensions in cells. The last row is reserved for the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermSize {
    pub cols: u16,
    pub rows: u16,
}

impl TermSize {
    pub const MIN_COLS: u16 = 16;
    pub const MIN_ROWS: u16 = 4;

    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    /// Clamp to the smallest usable terminal.
    pub fn sanitized(self) -> Self {
        Self {
            cols: self.cols.max(Self::MIN_COLS),
            rows: self.rows.max(Self::MIN_ROWS),
        }
    }

    /// Rows available to the viewport grid.
    pub fn viewport_rows(&self) -> u32 {
        u32::from(self.rows.saturating_sub(1)).max(1)
    }

    /// 0-based index of the status row.
    pub fn status_row(&self) -> u16 {
        self.rows.saturating_sub(1)
    }
}

impl Default for TermSize {
    fn default() -> Self {
        Self { cols: 80, rows: 25 }
    }
}

/// Number of byte columns that fit on screen for the visible panels.
pub fn screen_columns(term_cols: u16, panels: PanelSet) -> u32 {
    let avail = u32::from(term_cols.saturating_sub(ROW_OVERHEAD_COLS));
    let cols = match (
        panels.contains(PanelSet::HEX),
        panels.contains(PanelSet::ASCII),
    ) {
        (true, true) => avail / 4,
        (true, false) => avail / 3,
        (false, true) => avail,
        (false, false) => 1,
    };
    cols.max(1)
}

/// Screen column of the terminal cursor for a byte drawn `visible_col` cells
/// into the window of the active panel.
pub fn cursor_screen_x(
    panel: Panel,
    panels: PanelSet,
    visible_col: u32,
    screen_columns: u32,
) -> u32 {
    match panel {
        Panel::Offset => 0,
        Panel::Hex => OFFSET_LABEL_COLS + 1 + visible_col * 3,
        Panel::Ascii if panels.contains(PanelSet::HEX) => {
            OFFSET_LABEL_COLS + 2 + screen_columns * 3 + visible_col
        }
        Panel::Ascii => OFFSET_LABEL_COLS + 1 + visible_col,
    }
}
