//! Scripted console for tests and headless runs.
//!
//! Keys are replayed in order; running out of keys is an error so a test
//! that forgets to quit fails instead of hanging. Output bytes are captured.

use crate::{Console, Key};
use anyhow::{Result, bail};
use core_model::TermSize;
use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct FakeConsole {
    keys: VecDeque<Key>,
    size: TermSize,
    pub output: Vec<u8>,
}

impl FakeConsole {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            size: TermSize::default(),
            output: Vec::new(),
        }
    }

    pub fn with_size(mut self, size: TermSize) -> Self {
        self.size = size;
        self
    }

    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl Console for FakeConsole {
    fn size(&mut self) -> Result<TermSize> {
        Ok(self.size)
    }

    fn read_key(&mut self) -> Result<Key> {
        match self.keys.pop_front() {
            Some(Key::Resize(size)) => {
                self.size = size;
                Ok(Key::Resize(size))
            }
            Some(k) => Ok(k),
            None => bail!("key script exhausted"),
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }
}
