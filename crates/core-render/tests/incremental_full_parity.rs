//! Incremental passes (scroll, cursor-only, status-only) must leave the
//! screen exactly as a from-scratch full repaint would. A small screen model
//! interprets the engine's commands the way a VT100-class terminal does.

use core_model::{PanelSet, TermSize};
use core_render::{RenderEngine, RenderPath, RowStyle, TermCommand, Writer};
use core_state::Session;
use core_stream::ByteStream;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Screen {
    cells: Vec<Vec<(char, RowStyle)>>,
    cols: usize,
    cursor: (usize, usize),
    region: (usize, usize),
    style: RowStyle,
}

impl Screen {
    fn new(size: TermSize) -> Self {
        let (cols, rows) = (size.cols as usize, size.rows as usize);
        Self {
            cells: vec![Self::blank(cols); rows],
            cols,
            cursor: (0, 0),
            region: (0, rows - 1),
            style: RowStyle::Plain,
        }
    }

    fn blank(cols: usize) -> Vec<(char, RowStyle)> {
        vec![(' ', RowStyle::Plain); cols]
    }

    fn apply(&mut self, w: &Writer) {
        for c in w.commands() {
            match c {
                TermCommand::MoveTo { col, row } => self.cursor = (*col as usize, *row as usize),
                TermCommand::Style(s) => self.style = *s,
                TermCommand::Print(text) => {
                    let (mut x, y) = self.cursor;
                    for ch in text.chars() {
                        let x_at = x.min(self.cols - 1);
                        self.cells[y][x_at] = (ch, self.style);
                        x += 1;
                    }
                    self.cursor.0 = x.min(self.cols - 1);
                }
                TermCommand::ClearToEol => {
                    let (x, y) = self.cursor;
                    for cell in &mut self.cells[y][x..] {
                        *cell = (' ', RowStyle::Plain);
                    }
                }
                TermCommand::ClearScreen => {
                    for row in &mut self.cells {
                        *row = Self::blank(self.cols);
                    }
                }
                TermCommand::SetScrollRegion { top, bottom } => {
                    self.region = (*top as usize - 1, *bottom as usize - 1);
                    self.cursor = (0, 0);
                }
                TermCommand::InsertLine => {
                    let (top, bottom) = self.region;
                    let y = self.cursor.1;
                    if (top..=bottom).contains(&y) {
                        self.cells.remove(bottom);
                        self.cells.insert(y, Self::blank(self.cols));
                    }
                    self.cursor.0 = 0;
                }
                TermCommand::Newline => {
                    let (top, bottom) = self.region;
                    self.cursor.0 = 0;
                    if self.cursor.1 == bottom {
                        self.cells.remove(top);
                        self.cells.insert(bottom, Self::blank(self.cols));
                    } else if self.cursor.1 + 1 < self.cells.len() {
                        self.cursor.1 += 1;
                    }
                }
                TermCommand::ShowCursor | TermCommand::HideCursor => {}
            }
        }
    }

    fn text(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|r| r.iter().map(|c| c.0).collect())
            .collect()
    }
}

fn open_session(len: usize, cols: u32, term: TermSize) -> (tempfile::NamedTempFile, Session) {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    let bytes: Vec<u8> = (0..len).map(|i| (i * 7) as u8).collect();
    f.write_all(&bytes).unwrap();
    let mut s = Session::new(cols, PanelSet::default(), term);
    s.replace_stream(Some(ByteStream::open(f.path(), false).unwrap()));
    (f, s)
}

fn fresh_full(session: &mut Session) -> Screen {
    let mut screen = Screen::new(session.term());
    session.mark_full();
    let w = RenderEngine::new().frame(session);
    screen.apply(&w);
    screen
}

#[test]
fn stepping_down_past_the_bottom_matches_full_repaint() {
    let term = TermSize::new(80, 6);
    let (_f, mut s) = open_session(400, 16, term);
    let mut engine = RenderEngine::new();
    let mut screen = Screen::new(term);
    screen.apply(&engine.frame(&mut s));
    let mut paths = Vec::new();
    for _ in 0..8 {
        let next = s.cursor() + 16;
        s.set_cursor(next);
        screen.apply(&engine.frame(&mut s));
        paths.push(engine.stats().last_path);
        let expected = fresh_full(&mut s);
        assert_eq!(screen.text(), expected.text());
        assert_eq!(screen, expected);
    }
    assert!(paths.contains(&Some(RenderPath::ScrollUp)));
}

#[test]
fn stepping_up_past_the_top_matches_full_repaint() {
    let term = TermSize::new(80, 6);
    let (_f, mut s) = open_session(400, 16, term);
    let mut engine = RenderEngine::new();
    let mut screen = Screen::new(term);
    s.set_cursor(300);
    screen.apply(&engine.frame(&mut s));
    let mut paths = Vec::new();
    for _ in 0..8 {
        let next = s.cursor() - 16;
        s.set_cursor(next);
        screen.apply(&engine.frame(&mut s));
        paths.push(engine.stats().last_path);
        assert_eq!(screen, fresh_full(&mut s));
    }
    assert!(paths.contains(&Some(RenderPath::ScrollDown)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn any_move_sequence_matches_full_repaint(
        cols in 1u32..40,
        len in 0usize..600,
        moves in prop::collection::vec(prop_oneof![-20i64..=20, -300i64..=300], 1..40),
    ) {
        let term = TermSize::new(80, 8);
        let (_f, mut s) = open_session(len, cols, term);
        let mut engine = RenderEngine::new();
        let mut screen = Screen::new(term);
        screen.apply(&engine.frame(&mut s));
        for d in moves {
            let next = s.cursor().saturating_add_signed(d);
            s.set_cursor(next);
            screen.apply(&engine.frame(&mut s));
            let expected = fresh_full(&mut s);
            prop_assert_eq!(&screen, &expected);
        }
    }
}
