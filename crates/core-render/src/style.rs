//! Text styles used by the renderer.
//!
//! Every style starts from a full attribute reset so a row never inherits
//! attributes from whatever was emitted before it.

use crossterm::{
    queue,
    style::{Attribute, Color, SetAttribute, SetBackgroundColor, SetForegroundColor},
};
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowStyle {
    /// Attribute reset only.
    Plain,
    /// Rows away from the cursor.
    Normal,
    /// The row holding the cursor.
    Highlight,
    /// Status bar.
    Status,
    /// Confirmation prompts.
    Alert,
}

impl RowStyle {
    pub fn queue_into<W: Write>(self, out: &mut W) -> io::Result<()> {
        queue!(out, SetAttribute(Attribute::Reset))?;
        match self {
            RowStyle::Plain => Ok(()),
            RowStyle::Normal => queue!(out, SetForegroundColor(Color::DarkCyan)),
            RowStyle::Highlight => queue!(
                out,
                SetAttribute(Attribute::Bold),
                SetForegroundColor(Color::Grey)
            ),
            RowStyle::Status => queue!(out, SetAttribute(Attribute::Reverse)),
            RowStyle::Alert => queue!(
                out,
                SetAttribute(Attribute::Bold),
                SetBackgroundColor(Color::DarkYellow),
                SetForegroundColor(Color::DarkRed),
                SetAttribute(Attribute::Reverse)
            ),
        }
    }
}
