#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::EditorController;
use core_model::{PanelSet, TermSize};
use core_state::Session;
use core_terminal::Key;
use core_terminal::fake::FakeConsole;
use std::io::Write;
use tempfile::NamedTempFile;

/// `Esc Esc y`: request quit and confirm.
pub const QUIT: [Key; 3] = [Key::Esc, Key::Esc, Key::Char('y')];

/// Typed text; `\n` becomes Enter.
pub fn typed(s: &str) -> Vec<Key> {
    s.chars()
        .map(|c| if c == '\n' { Key::Enter } else { Key::Char(c) })
        .collect()
}

/// A `:` command followed by Enter.
pub fn command(line: &str) -> Vec<Key> {
    let mut keys = vec![Key::Char(':')];
    keys.extend(typed(line));
    keys.push(Key::Enter);
    keys
}

pub fn file_with(bytes: &[u8]) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(bytes).unwrap();
    f.flush().unwrap();
    f
}

pub fn controller(term: TermSize, keys: Vec<Key>) -> EditorController<FakeConsole> {
    let session = Session::new(16, PanelSet::default(), term);
    EditorController::new(session, FakeConsole::new(keys).with_size(term))
}

/// Controller with `file` opened and the script loaded.
pub fn opened(
    file: &NamedTempFile,
    writable: bool,
    keys: Vec<Key>,
) -> EditorController<FakeConsole> {
    let mut ctl = controller(TermSize::default(), keys);
    ctl.open_initial(file.path(), writable).unwrap();
    ctl
}
