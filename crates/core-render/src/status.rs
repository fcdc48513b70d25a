//! Status bar and prompt line.
//!
//! Both live on the last terminal row. The status bar reads
//! `<cursor:016X> <panel> <[rw]|[ro]>  [EDIT]`; while a hex nibble is pending
//! it is replaced by the nibble prompt: the typed digit followed by `?`.

use crate::style::RowStyle;
use crate::writer::Writer;
use core_model::TermSize;
use core_state::{Mode, Session};

pub fn status_text(session: &Session) -> String {
    if let Mode::Modify {
        pending_nibble: Some(hi),
    } = session.mode
    {
        return format!("{hi:X}?");
    }
    let access = if session.is_writable() { "[rw]" } else { "[ro]" };
    let edit = if session.mode.is_modify() { " [EDIT]" } else { "       " };
    format!(
        "{:016X} {} {} {}",
        session.cursor(),
        session.active.tag(),
        access,
        edit
    )
}

pub fn draw_status(writer: &mut Writer, session: &Session) {
    let style = match session.mode {
        Mode::Modify {
            pending_nibble: Some(_),
        } => RowStyle::Plain,
        _ => RowStyle::Status,
    };
    prompt(writer, session.term(), &status_text(session), style);
}

/// Replace the status row with `text` in `style`, leaving the terminal
/// cursor right after it.
pub fn prompt(writer: &mut Writer, term: TermSize, text: &str, style: RowStyle) {
    writer.move_to(0, term.status_row());
    writer.style(style);
    writer.print(text);
    writer.style(RowStyle::Plain);
    writer.clear_to_eol();
}
