//! Minimal line editor for the `:` command prompt.
//!
//! Printable ASCII (32..=126) appends and echoes, Backspace erases the last
//! character, Enter submits and `Esc Esc` cancels. A lone `Esc` followed by
//! any other key is dropped and the key is processed normally. Resize events
//! are handed to the caller. The caller positions the terminal cursor and
//! prints the prompt before calling.

use crate::{Console, Key};
use anyhow::Result;
use core_model::TermSize;
use crossterm::{cursor::MoveLeft, queue, style::Print};

/// Read one line. Returns `None` when the user cancels. At most `max_len`
/// characters are accepted; further input is ignored. `on_resize` runs for
/// every resize that arrives while the line is being typed.
pub fn read_line<C, F>(console: &mut C, max_len: usize, mut on_resize: F) -> Result<Option<String>>
where
    C: Console + ?Sized,
    F: FnMut(TermSize),
{
    let mut line = String::new();
    let mut escaped = false;
    loop {
        let key = console.read_key()?;
        if let Key::Resize(size) = key {
            on_resize(size);
            continue;
        }
        if escaped {
            escaped = false;
            if key == Key::Esc {
                return Ok(None);
            }
        }
        if let Some(b) = key.printable() {
            if line.len() < max_len {
                line.push(char::from(b));
                console.write_all(&[b])?;
            }
            continue;
        }
        match key {
            Key::Backspace => {
                if line.pop().is_some() {
                    let mut buf: Vec<u8> = Vec::new();
                    queue!(buf, MoveLeft(1), Print(' '), MoveLeft(1))?;
                    console.write_all(&buf)?;
                }
            }
            Key::Enter => return Ok(Some(line)),
            Key::Esc => escaped = true,
            _ => {}
        }
    }
}
