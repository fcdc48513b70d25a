//! Mode transitions: modify mode on/off and the quit prompt.
//!
//! The quit prompt remembers whether it interrupted modify mode; a negative
//! answer returns there with nothing else touched.

use super::DispatchResult;
use crate::error::EditorError;
use core_state::{Mode, Session};

pub(crate) fn enter_modify(session: &mut Session) -> Result<DispatchResult, EditorError> {
    if !session.is_writable() {
        return Err(EditorError::WriteDeniedReadOnly);
    }
    if !session.mode.is_modify() {
        session.mode = Mode::modify();
        tracing::debug!(target: "actions.mode", "enter_modify");
    }
    Ok(DispatchResult::clean())
}

pub(crate) fn exit_modify(session: &mut Session) -> DispatchResult {
    if session.mode.is_modify() {
        session.mode = Mode::Navigation;
        tracing::debug!(target: "actions.mode", "exit_modify");
    }
    DispatchResult::clean()
}

pub(crate) fn request_quit(session: &mut Session) -> DispatchResult {
    session.mode = Mode::ConfirmQuit {
        resume_modify: session.mode.is_modify(),
    };
    DispatchResult::clean()
}

pub(crate) fn answer_quit(yes: bool, session: &mut Session) -> DispatchResult {
    let Mode::ConfirmQuit { resume_modify } = session.mode else {
        return DispatchResult::clean();
    };
    session.mode = if resume_modify {
        Mode::modify()
    } else {
        Mode::Navigation
    };
    if yes {
        tracing::info!(target: "actions.mode", "quit_confirmed");
        DispatchResult::quit()
    } else {
        DispatchResult::clean()
    }
}
