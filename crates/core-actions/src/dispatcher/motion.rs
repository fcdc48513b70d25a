//! Motion sub-dispatch (cursor movement).
//!
//! Every motion ends in `Session::set_cursor`, which clamps into
//! `[0, max(size - 1, 0)]`. Row-relative motions (Home, End, page up near
//! the start) measure the column from the viewport top, so they agree with
//! what is on screen even when `view sync` left the top unaligned.

use super::DispatchResult;
use crate::MotionKind;
use core_state::Session;

/// Column of the cursor within its screen row.
fn row_col(session: &Session) -> u64 {
    let cols = u64::from(session.viewport.columns_per_row.max(1));
    session.cursor().saturating_sub(session.viewport.top_offset) % cols
}

pub(crate) fn handle_motion(kind: MotionKind, session: &mut Session) -> DispatchResult {
    let before = session.cursor();
    let cols = u64::from(session.viewport.columns_per_row.max(1));
    let page = u64::from(session.viewport.row_count.saturating_sub(1)) * cols;
    let data_panel = session.active.is_data();

    match kind {
        MotionKind::Up => {
            if before >= cols {
                session.set_cursor(before - cols);
            }
        }
        MotionKind::Down => session.set_cursor(before.saturating_add(cols)),
        MotionKind::Left => {
            if data_panel && before > 0 {
                session.set_cursor(before - 1);
            }
        }
        MotionKind::Right => {
            if data_panel {
                session.set_cursor(before.saturating_add(1));
            }
        }
        MotionKind::PageUp => {
            if before >= page {
                session.set_cursor(before - page);
            } else {
                session.set_cursor(row_col(session));
            }
        }
        MotionKind::PageDown => session.set_cursor(before.saturating_add(page)),
        MotionKind::RowStart => session.set_cursor(before - row_col(session)),
        MotionKind::RowEnd => {
            let to_end = cols - 1 - row_col(session);
            session.set_cursor(before.saturating_add(to_end));
        }
    }

    if session.cursor() != before {
        tracing::trace!(target: "actions.dispatch", motion = ?kind, from = before, to = session.cursor(), "motion");
    }
    DispatchResult::clean()
}
