//! Single-row rendering.
//!
//! ```text
//! 0000000000000010 41 42 43 ... 4F > ABC...O >
//! ```
//!
//! A cell is drawn only when its column lies inside `[0, columns_per_row)`
//! and its offset inside `[0, size)`; anything else is blank. The left
//! marker reports `h_scroll != 0`, the right markers report columns past the
//! drawn window.

use crate::row_cache::RowCache;
use crate::style::RowStyle;
use crate::writer::Writer;
use core_model::PanelSet;
use core_state::Session;
use core_stream::ByteStream;
use std::fmt::Write as _;

/// Geometry a row needs, copied out of the session once per pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowContext {
    pub columns_per_row: u32,
    pub screen_columns: u32,
    pub h_scroll: u32,
    pub panels: PanelSet,
    pub size: u64,
}

impl RowContext {
    pub fn from_session(session: &Session) -> Self {
        let vp = &session.viewport;
        Self {
            columns_per_row: vp.columns_per_row,
            screen_columns: vp.screen_columns.max(1),
            h_scroll: vp.h_scroll,
            panels: session.panels,
            size: session.size(),
        }
    }

    /// Number of leading cells of the window that hold real bytes.
    fn drawn_cells(&self, row_offset: u64) -> usize {
        let w = u64::from(self.screen_columns);
        let h = u64::from(self.h_scroll);
        let by_row = u64::from(self.columns_per_row).saturating_sub(h);
        let by_size = self
            .size
            .saturating_sub(row_offset.saturating_add(h));
        // Bounded by screen_columns, which is a u32.
        w.min(by_row).min(by_size) as usize
    }

    fn right_marker(&self) -> char {
        if u64::from(self.screen_columns) + u64::from(self.h_scroll)
            < u64::from(self.columns_per_row)
        {
            '>'
        } else {
            ' '
        }
    }

    fn left_marker(&self) -> char {
        if self.h_scroll != 0 { '<' } else { ' ' }
    }
}

/// Append one row to `writer`. The caller has already positioned the cursor
/// at column 0 of the target screen row.
pub fn draw_row(
    writer: &mut Writer,
    ctx: &RowContext,
    cache: &mut RowCache,
    stream: Option<&mut ByteStream>,
    highlighted: bool,
    row_offset: u64,
) {
    writer.style(if highlighted {
        RowStyle::Highlight
    } else {
        RowStyle::Normal
    });

    let width = ctx.screen_columns as usize;
    let mut line = String::with_capacity(19 + width * 4);
    let _ = write!(line, "{row_offset:016X}");
    line.push(ctx.left_marker());

    let show_hex = ctx.panels.contains(PanelSet::HEX);
    let show_ascii = ctx.panels.contains(PanelSet::ASCII);
    if show_hex || show_ascii {
        let drawn = ctx.drawn_cells(row_offset);
        let bytes = cache.get_or_load(stream, row_offset, ctx.h_scroll, width);
        if show_hex {
            for b in &bytes[..drawn] {
                let _ = write!(line, "{b:02X} ");
            }
            line.extend(std::iter::repeat_n("   ", width - drawn));
            line.push(ctx.right_marker());
        }
        if show_ascii {
            line.extend(bytes[..drawn].iter().map(|&b| {
                if (32..127).contains(&b) { b as char } else { '.' }
            }));
            line.extend(std::iter::repeat_n(' ', width - drawn));
            line.push(ctx.right_marker());
        }
    }

    writer.print(line);
    writer.clear_to_eol();
}
