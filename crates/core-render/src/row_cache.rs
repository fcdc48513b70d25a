//! Single-row read cache.
//!
//! Holds the bytes of the most recently drawn row window so that redrawing
//! the same row (cursor moves within it, the highlight follows the cursor)
//! does not hit the stream again. Bytes past end-of-stream are zero; the
//! renderer draws them blank using the stream size, not the cached value.

use core_stream::ByteStream;

#[derive(Debug, Default)]
pub struct RowCache {
    row_offset: u64,
    valid: bool,
    bytes: Vec<u8>,
    loads: u64,
}

impl RowCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes `[row_offset + h_scroll, row_offset + h_scroll + width)`.
    ///
    /// A hit requires a valid entry for the same row with the same width.
    /// Read failures are logged and yield zeros; the caller renders what the
    /// stream size says is there.
    pub fn get_or_load(
        &mut self,
        stream: Option<&mut ByteStream>,
        row_offset: u64,
        h_scroll: u32,
        width: usize,
    ) -> &[u8] {
        let hit = self.valid && self.row_offset == row_offset && self.bytes.len() == width;
        if !hit {
            self.bytes.clear();
            self.bytes.resize(width, 0);
            if let Some(stream) = stream {
                let start = row_offset.saturating_add(u64::from(h_scroll));
                if let Err(e) = stream.read_at(start, &mut self.bytes) {
                    tracing::warn!(target: "render.cache", row_offset, ?e, "row_read_failed");
                }
            }
            self.row_offset = row_offset;
            self.valid = true;
            self.loads += 1;
        }
        &self.bytes
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Number of stream reads performed so far.
    pub fn loads(&self) -> u64 {
        self.loads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn stream(bytes: &[u8]) -> (tempfile::NamedTempFile, ByteStream) {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(bytes).unwrap();
        let s = ByteStream::open(f.path(), false).unwrap();
        (f, s)
    }

    #[test]
    fn same_row_is_served_from_cache() {
        let (_f, mut s) = stream(b"0123456789abcdef");
        let mut c = RowCache::new();
        assert_eq!(c.get_or_load(Some(&mut s), 0, 0, 4), b"0123");
        assert_eq!(c.get_or_load(Some(&mut s), 0, 0, 4), b"0123");
        assert_eq!(c.loads(), 1);
    }

    #[test]
    fn h_scroll_offsets_the_window_and_eof_is_zeroed() {
        let (_f, mut s) = stream(b"0123456789");
        let mut c = RowCache::new();
        assert_eq!(c.get_or_load(Some(&mut s), 4, 4, 4), b"89\0\0");
    }

    #[test]
    fn invalidate_forces_reload() {
        let (_f, mut s) = stream(b"abcd");
        let mut c = RowCache::new();
        c.get_or_load(Some(&mut s), 0, 0, 2);
        c.invalidate();
        c.get_or_load(Some(&mut s), 0, 0, 2);
        assert_eq!(c.loads(), 2);
    }

    #[test]
    fn width_change_misses() {
        let (_f, mut s) = stream(b"abcd");
        let mut c = RowCache::new();
        c.get_or_load(Some(&mut s), 0, 0, 2);
        assert_eq!(c.get_or_load(Some(&mut s), 0, 0, 3), b"abc");
        assert_eq!(c.loads(), 2);
    }

    #[test]
    fn closed_stream_yields_zeros() {
        let mut c = RowCache::new();
        assert_eq!(c.get_or_load(None, 0, 0, 3), &[0, 0, 0]);
    }
}
