//! Byte overwrite in modify mode.
//!
//! Hex panel: the first hex digit is held as the pending high nibble (the
//! status row shows the digit and `?`); the next key either completes the
//! byte or, when it is not a hex digit, drops the entry silently. ASCII
//! panel: the typed character is the byte.
//!
//! A write needs `cursor < size`, so modify mode never grows the stream.
//! After a successful write the cursor advances unless it is on the last
//! byte.

use super::DispatchResult;
use crate::error::EditorError;
use core_model::Panel;
use core_state::{Mode, Session};

fn hex_value(b: u8) -> Option<u8> {
    char::from(b).to_digit(16).map(|d| d as u8)
}

fn writable_here(session: &Session) -> bool {
    session.mode.is_modify() && session.cursor() < session.size()
}

/// First key of an edit.
pub(crate) fn handle_input(byte: u8, session: &mut Session) -> Result<DispatchResult, EditorError> {
    if !writable_here(session) {
        return Ok(DispatchResult::clean());
    }
    match session.active {
        Panel::Hex => {
            if let Some(hi) = hex_value(byte) {
                session.mode = Mode::Modify {
                    pending_nibble: Some(hi),
                };
            }
            Ok(DispatchResult::clean())
        }
        Panel::Ascii => write_byte(session, byte),
        Panel::Offset => Ok(DispatchResult::clean()),
    }
}

/// Key following a pending high nibble.
pub(crate) fn handle_second_nibble(
    key: Option<u8>,
    session: &mut Session,
) -> Result<DispatchResult, EditorError> {
    let Mode::Modify {
        pending_nibble: Some(hi),
    } = session.mode
    else {
        return Ok(DispatchResult::clean());
    };
    session.mode = Mode::modify();
    match key.and_then(hex_value) {
        Some(lo) if writable_here(session) => write_byte(session, (hi << 4) | lo),
        _ => {
            tracing::trace!(target: "actions.dispatch", "nibble_entry_aborted");
            Ok(DispatchResult::clean())
        }
    }
}

fn write_byte(session: &mut Session, byte: u8) -> Result<DispatchResult, EditorError> {
    let at = session.cursor();
    let Some(stream) = session.stream_mut() else {
        return Ok(DispatchResult::clean());
    };
    stream.write_at(at, &[byte]).map_err(EditorError::Write)?;
    tracing::debug!(target: "actions.dispatch", offset = at, byte, "byte_written");
    if at < session.last_offset() {
        session.set_cursor(at + 1);
    }
    session.dirty.cursor_only = true;
    Ok(DispatchResult::wrote())
}
