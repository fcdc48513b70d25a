//! Random-access byte stream over a regular file or block device.
//!
//! `ByteStream` is a thin synchronous wrapper around an open handle. Every
//! positioned operation (`read_at`, `write_at`) seeks explicitly before
//! touching the handle, so the OS file position never has to agree with the
//! editor's logical cursor and callers never rely on it.
//!
//! The total size is measured once at open time by seeking to the end, which
//! also works for block devices whose metadata reports a length of zero. A
//! handle that cannot seek is rejected at open. The cached size afterwards
//! only changes through a successful `truncate` or a write that extends the
//! stream.

use std::fs::{File, OpenOptions};
use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("unable to open {}: {source}", path.display())]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} cannot seek: {source}", path.display())]
    Unseekable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("truncate to {size} failed: {source}")]
    TruncateFailed {
        size: u64,
        #[source]
        source: io::Error,
    },
    #[error("stream is read-only")]
    ReadOnly,
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, StreamError>;

#[derive(Debug)]
pub struct ByteStream {
    file: File,
    path: PathBuf,
    writable: bool,
    size: u64,
}

impl ByteStream {
    /// Open `path` for reading, and for writing when `writable` is set.
    pub fn open(path: impl AsRef<Path>, writable: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = OpenOptions::new()
            .read(true)
            .write(writable)
            .open(&path)
            .map_err(|source| StreamError::OpenFailed {
                path: path.clone(),
                source,
            })?;
        let size = file
            .seek(SeekFrom::End(0))
            .map_err(|source| StreamError::Unseekable {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(target: "io", path = %path.display(), size, writable, "stream_open");
        Ok(Self {
            file,
            path,
            writable,
            size,
        })
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn seek(&mut self, offset: u64) -> Result<u64> {
        Ok(self.file.seek(SeekFrom::Start(offset))?)
    }

    pub fn tell(&mut self) -> Result<u64> {
        Ok(self.file.stream_position()?)
    }

    /// Single read at the current OS position.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        Ok(self.file.read(buf)?)
    }

    /// Single write at the current OS position.
    pub fn write(&mut self, buf: &[u8]) -> Result<usize> {
        if !self.writable {
            return Err(StreamError::ReadOnly);
        }
        Ok(self.file.write(buf)?)
    }

    /// Seek to `offset` and fill `buf` until it is full or the stream ends.
    /// Returns the number of bytes actually read; the tail of `buf` past that
    /// count is left untouched.
    pub fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        self.seek(offset)?;
        let mut filled = 0;
        while filled < buf.len() {
            match self.file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }

    /// Seek to `offset` and write all of `bytes`.
    pub fn write_at(&mut self, offset: u64, bytes: &[u8]) -> Result<()> {
        if !self.writable {
            return Err(StreamError::ReadOnly);
        }
        self.seek(offset)?;
        self.file.write_all(bytes)?;
        self.file.flush()?;
        let end = offset.saturating_add(bytes.len() as u64);
        if end > self.size {
            self.size = end;
        }
        tracing::trace!(target: "io", offset, len = bytes.len(), "stream_write");
        Ok(())
    }

    /// Resize the stream. The cached size changes only on success.
    pub fn truncate(&mut self, new_size: u64) -> Result<()> {
        self.file
            .set_len(new_size)
            .map_err(|source| StreamError::TruncateFailed {
                size: new_size,
                source,
            })?;
        tracing::info!(target: "io", old = self.size, new = new_size, "stream_truncate");
        self.size = new_size;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_missing_path_reports_open_failed() {
        let dir = tempfile::tempdir().unwrap();
        let err = ByteStream::open(dir.path().join("nope.bin"), false).unwrap_err();
        assert!(matches!(err, StreamError::OpenFailed { .. }));
    }

    #[test]
    fn read_only_rejects_writes() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"abc").unwrap();
        let mut s = ByteStream::open(f.path(), false).unwrap();
        assert!(matches!(s.write_at(0, b"x"), Err(StreamError::ReadOnly)));
        assert!(matches!(s.write(b"x"), Err(StreamError::ReadOnly)));
    }
}
