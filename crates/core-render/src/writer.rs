//! Terminal writer abstraction.
//!
//! A render pass records an ordered list of primitive commands; nothing
//! reaches the terminal until the caller serializes the whole batch. Tests
//! inspect `commands()` or the serialized bytes directly.
//!
//! Positions are 0-based `(col, row)`. The scroll region is the exception:
//! it is expressed in the terminal's own 1-based row numbers.

use crate::style::RowStyle;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermCommand {
    MoveTo { col: u16, row: u16 },
    Style(RowStyle),
    Print(String),
    ClearToEol,
    ClearScreen,
    /// DECSTBM, 1-based inclusive rows.
    SetScrollRegion { top: u16, bottom: u16 },
    /// Insert a blank line at the cursor row, pushing the rows below down.
    InsertLine,
    /// CR LF; on the last row of the scroll region this scrolls it up.
    Newline,
    ShowCursor,
    HideCursor,
}

#[derive(Debug, Default)]
pub struct Writer {
    cmds: Vec<TermCommand>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    pub fn move_to(&mut self, col: u16, row: u16) {
        self.cmds.push(TermCommand::MoveTo { col, row });
    }

    pub fn style(&mut self, style: RowStyle) {
        self.cmds.push(TermCommand::Style(style));
    }

    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if s.is_empty() {
            return;
        }
        // Adjacent prints coalesce into one command.
        if let Some(TermCommand::Print(prev)) = self.cmds.last_mut() {
            prev.push_str(&s);
        } else {
            self.cmds.push(TermCommand::Print(s));
        }
    }

    pub fn clear_to_eol(&mut self) {
        self.cmds.push(TermCommand::ClearToEol);
    }

    pub fn clear_screen(&mut self) {
        self.cmds.push(TermCommand::ClearScreen);
    }

    pub fn set_scroll_region(&mut self, top: u16, bottom: u16) {
        self.cmds.push(TermCommand::SetScrollRegion { top, bottom });
    }

    pub fn insert_line(&mut self) {
        self.cmds.push(TermCommand::InsertLine);
    }

    pub fn newline(&mut self) {
        self.cmds.push(TermCommand::Newline);
    }

    pub fn show_cursor(&mut self) {
        self.cmds.push(TermCommand::ShowCursor);
    }

    pub fn hide_cursor(&mut self) {
        self.cmds.push(TermCommand::HideCursor);
    }

    pub fn commands(&self) -> &[TermCommand] {
        &self.cmds
    }

    /// Concatenated text of every `Print`, handy for assertions.
    pub fn printed_text(&self) -> String {
        self.cmds
            .iter()
            .filter_map(|c| match c {
                TermCommand::Print(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for c in &self.cmds {
            match c {
                TermCommand::MoveTo { col, row } => queue!(out, MoveTo(*col, *row))?,
                TermCommand::Style(style) => style.queue_into(out)?,
                TermCommand::Print(s) => queue!(out, Print(s))?,
                TermCommand::ClearToEol => queue!(out, Clear(ClearType::UntilNewLine))?,
                TermCommand::ClearScreen => queue!(out, Clear(ClearType::All))?,
                TermCommand::SetScrollRegion { top, bottom } => {
                    queue!(out, Print(format!("\x1b[{top};{bottom}r")))?
                }
                TermCommand::InsertLine => queue!(out, Print("\x1b[L"))?,
                TermCommand::Newline => queue!(out, Print("\r\n"))?,
                TermCommand::ShowCursor => queue!(out, Show)?,
                TermCommand::HideCursor => queue!(out, Hide)?,
            }
        }
        Ok(())
    }

    pub fn into_bytes(self) -> io::Result<Vec<u8>> {
        let mut buf: Vec<u8> = Vec::new();
        self.write_to(&mut buf)?;
        Ok(buf)
    }
}
