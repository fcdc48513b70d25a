/// Controller input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Navigation,
    /// A `:` command line is being read.
    CommandEntry,
    /// Keystrokes overwrite bytes. `pending_nibble` holds the high nibble of
    /// a two-digit hex entry in progress.
    Modify { pending_nibble: Option<u8> },
    /// Quit prompt is showing; `resume_modify` records the mode it interrupted.
    ConfirmQuit { resume_modify: bool },
}

impl Mode {
    pub fn is_modify(&self) -> bool {
        matches!(self, Mode::Modify { .. })
    }

    pub fn modify() -> Self {
        Mode::Modify {
            pending_nibble: None,
        }
    }
}
