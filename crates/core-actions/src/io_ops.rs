//! Stream opening for the command line path and the `open`/`openrw`
//! commands.
//!
//! Synchronous and minimal. A failed open never leaves a half-open stream
//! behind: the caller installs `None` and reports the error.

use crate::error::EditorError;
use core_stream::ByteStream;
use std::path::Path;

pub fn open_stream(path: &Path, writable: bool) -> Result<ByteStream, EditorError> {
    match ByteStream::open(path, writable) {
        Ok(stream) => {
            tracing::info!(
                target: "io",
                path = %path.display(),
                size = stream.size(),
                writable,
                "file_opened"
            );
            Ok(stream)
        }
        Err(e) => {
            tracing::error!(target: "io", path = %path.display(), error = %e, "file_open_error");
            Err(EditorError::Open(e))
        }
    }
}
