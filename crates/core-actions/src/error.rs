//! Errors surfaced to the user on the status row.
//!
//! `Display` is the exact prompt text; each is followed by an
//! acknowledgment wait. Every variant is raised only after the session has
//! been left in a consistent state.

use core_stream::StreamError;

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("UNKNOWN COMMAND")]
    UnknownCommand(String),
    #[error("INVALID ARGUMENT: {0}")]
    InvalidArgument(String),
    #[error("Can't modify a file in read-only mode")]
    WriteDeniedReadOnly,
    #[error("Unable to open file")]
    Open(#[source] StreamError),
    #[error("ERROR TRUNCATING FILE!!")]
    Truncate(#[source] StreamError),
    #[error("ERROR WRITING FILE!!")]
    Write(#[source] StreamError),
}
