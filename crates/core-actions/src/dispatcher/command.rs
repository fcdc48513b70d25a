//! Command execution.
//!
//! Takes a `ParsedCommand` and applies it to the session. Errors come back
//! as `EditorError` after the session has been put in a consistent state;
//! the controller reports them and waits for Enter.

use super::DispatchResult;
use super::command_parser::{GoTo, ParsedCommand};
use crate::error::EditorError;
use crate::io_ops::open_stream;
use core_state::Session;

pub(crate) fn execute_command(
    cmd: ParsedCommand,
    session: &mut Session,
) -> Result<DispatchResult, EditorError> {
    tracing::debug!(target: "actions.command", ?cmd, "execute");
    match cmd {
        ParsedCommand::Empty => Ok(DispatchResult::clean()),
        ParsedCommand::ColumnWidth(n) => {
            session.viewport.set_columns_per_row(n);
            session.mark_full();
            Ok(DispatchResult::clean())
        }
        ParsedCommand::ViewSync => {
            session.viewport.top_offset = session.cursor();
            session.mark_full();
            Ok(DispatchResult::clean())
        }
        ParsedCommand::TruncateHere => {
            let here = session.cursor();
            truncate(session, here)
        }
        ParsedCommand::TruncateTo(n) => truncate(session, n),
        ParsedCommand::GoTo(target) => {
            let cur = session.cursor();
            let to = match target {
                GoTo::Absolute(n) => n,
                GoTo::Forward(n) => cur.saturating_add(n),
                GoTo::Back(n) => cur.saturating_sub(n),
                GoTo::End => session.last_offset(),
            };
            session.set_cursor(to);
            Ok(DispatchResult::clean())
        }
        ParsedCommand::Show(which) => {
            session.show_panels(which);
            Ok(DispatchResult::clean())
        }
        ParsedCommand::Hide(which) => {
            session.hide_panels(which);
            Ok(DispatchResult::clean())
        }
        ParsedCommand::Open { path, writable } => match open_stream(&path, writable) {
            Ok(stream) => {
                session.replace_stream(Some(stream));
                Ok(DispatchResult::stream_replaced())
            }
            Err(e) => {
                session.replace_stream(None);
                Err(e)
            }
        },
        ParsedCommand::Quit => Ok(DispatchResult::quit()),
        ParsedCommand::Help => Ok(DispatchResult::help()),
        ParsedCommand::Unknown(text) => Err(EditorError::UnknownCommand(text)),
        ParsedCommand::Invalid(why) => Err(EditorError::InvalidArgument(why)),
    }
}

fn truncate(session: &mut Session, size: u64) -> Result<DispatchResult, EditorError> {
    session.truncate(size).map_err(EditorError::Truncate)?;
    Ok(DispatchResult::invalidate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::command_parser::parse_command;
    use core_model::{Panel, PanelSet, TermSize};
    use std::io::Write;

    fn session(len: usize, writable: bool) -> (tempfile::NamedTempFile, Session) {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&vec![7u8; len]).unwrap();
        let mut s = Session::new(16, PanelSet::default(), TermSize::default());
        s.replace_stream(Some(core_stream::ByteStream::open(f.path(), writable).unwrap()));
        (f, s)
    }

    fn run(line: &str, s: &mut Session) -> Result<DispatchResult, EditorError> {
        execute_command(parse_command(line), s)
    }

    #[test]
    fn go_to_saturates_then_clamps() {
        let (_f, mut s) = session(100, false);
        run("go to 50", &mut s).unwrap();
        assert_eq!(s.cursor(), 50);
        run("go to -60", &mut s).unwrap();
        assert_eq!(s.cursor(), 0);
        run("go to +18446744073709551615", &mut s).unwrap();
        assert_eq!(s.cursor(), 99);
        run("go to 0", &mut s).unwrap();
        run("go to end", &mut s).unwrap();
        assert_eq!(s.cursor(), 99);
    }

    #[test]
    fn truncate_to_reclamps() {
        let (f, mut s) = session(500, true);
        s.set_cursor(400);
        let r = run("truncate to 0x80", &mut s).unwrap();
        assert!(r.invalidate);
        assert_eq!(s.size(), 128);
        assert_eq!(s.cursor(), 127);
        assert_eq!(std::fs::metadata(f.path()).unwrap().len(), 128);
    }

    #[test]
    fn failed_truncate_leaves_state() {
        let (_f, mut s) = session(500, false);
        s.set_cursor(300);
        let err = run("truncate here", &mut s).unwrap_err();
        assert!(matches!(err, EditorError::Truncate(_)));
        assert_eq!((s.size(), s.cursor()), (500, 300));
    }

    #[test]
    fn view_sync_pins_top_to_cursor() {
        let (_f, mut s) = session(500, false);
        s.set_cursor(37);
        s.dirty.clear();
        run("view sync", &mut s).unwrap();
        assert_eq!(s.viewport.top_offset, 37);
        assert!(s.dirty.full);
    }

    #[test]
    fn hide_reassigns_active_panel() {
        let (_f, mut s) = session(10, false);
        run("hide hex", &mut s).unwrap();
        assert_eq!(s.active, Panel::Ascii);
        run("show hex", &mut s).unwrap();
        assert_eq!(s.panels, PanelSet::HEX | PanelSet::ASCII);
    }

    #[test]
    fn failed_open_closes_session() {
        let (_f, mut s) = session(10, true);
        s.set_cursor(5);
        let err = run("openrw /definitely/not/here.bin", &mut s).unwrap_err();
        assert!(matches!(err, EditorError::Open(_)));
        assert!(s.stream().is_none());
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn unknown_is_reported() {
        let (_f, mut s) = session(10, false);
        assert!(matches!(run("frob", &mut s), Err(EditorError::UnknownCommand(_))));
        assert!(run("", &mut s).is_ok());
    }
}
