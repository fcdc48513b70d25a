mod common;
use common::*;

use core_model::TermSize;
use core_render::RenderPath;
use core_state::Mode;
use core_terminal::Key;
use pretty_assertions::assert_eq;

fn script(parts: &[&[Key]]) -> Vec<Key> {
    parts.iter().flat_map(|p| p.iter().copied()).collect()
}

#[test]
fn go_to_end_on_empty_file_stays_at_zero() {
    let f = file_with(b"");
    let mut ctl = opened(&f, false, script(&[&command("go to end"), &QUIT]));
    ctl.run().unwrap();
    assert_eq!(ctl.session().cursor(), 0);
    assert!(ctl.session().quit_requested());
}

#[test]
fn up_at_offset_zero_is_noop() {
    let f = file_with(&[0u8; 64]);
    let mut ctl = opened(&f, false, script(&[&[Key::Up, Key::Up], &QUIT]));
    ctl.run().unwrap();
    assert_eq!(ctl.session().cursor(), 0);
    assert_eq!(ctl.session().viewport.top_offset, 0);
}

#[test]
fn truncate_here_reclamps_cursor() {
    let f = file_with(&[0x11u8; 500]);
    let keys = script(&[&command("go to 100"), &command("truncate here"), &QUIT]);
    let mut ctl = opened(&f, true, keys);
    ctl.run().unwrap();
    assert_eq!(ctl.session().size(), 100);
    assert_eq!(ctl.session().cursor(), 99);
    assert_eq!(std::fs::metadata(f.path()).unwrap().len(), 100);
}

#[test]
fn hex_entry_overwrites_last_byte_without_advancing() {
    let f = file_with(&[0u8; 16]);
    let keys = script(&[
        &command("go to end"),
        &[Key::Esc, Key::Char('m'), Key::Char('4'), Key::Char('A')],
        &QUIT,
    ]);
    let mut ctl = opened(&f, true, keys);
    ctl.run().unwrap();
    assert_eq!(ctl.session().cursor(), 15);
    assert_eq!(ctl.session().size(), 16);
    let on_disk = std::fs::read(f.path()).unwrap();
    assert_eq!(on_disk[15], 0x4A);
    assert!(ctl.console().output_text().contains("4A"));
}

#[test]
fn pending_nibble_shows_digit_in_status() {
    let f = file_with(&[0u8; 16]);
    let keys = script(&[&[Key::Esc, Key::Char('m'), Key::Char('4'), Key::Char('b')]]);
    let mut ctl = opened(&f, true, keys);
    for _ in 0..3 {
        ctl.tick().unwrap();
    }
    assert_eq!(ctl.session().mode, Mode::Modify { pending_nibble: Some(4) });
    ctl.render().unwrap();
    assert!(ctl.console().output_text().contains("4?"));

    ctl.tick().unwrap();
    assert_eq!(ctl.session().mode, Mode::Modify { pending_nibble: None });
    assert_eq!(std::fs::read(f.path()).unwrap()[0], 0x4B);
    assert_eq!(ctl.session().cursor(), 1);
}

#[test]
fn ascii_entry_writes_character() {
    let f = file_with(&[0u8; 8]);
    let keys = script(&[
        &[Key::Tab, Key::Esc, Key::Char('m')],
        &typed("hi"),
        &[Key::Esc, Key::Char('s')],
        &QUIT,
    ]);
    let mut ctl = opened(&f, true, keys);
    ctl.run().unwrap();
    assert_eq!(&std::fs::read(f.path()).unwrap()[..3], b"hi\0");
    assert_eq!(ctl.session().cursor(), 2);
}

#[test]
fn modify_on_read_only_file_is_reported() {
    let f = file_with(&[0u8; 8]);
    let keys = script(&[&[Key::Esc, Key::Char('m'), Key::Enter], &QUIT]);
    let mut ctl = opened(&f, false, keys);
    ctl.run().unwrap();
    assert_eq!(ctl.session().mode, Mode::Navigation);
    assert!(
        ctl.console()
            .output_text()
            .contains("Can't modify a file in read-only mode")
    );
}

#[test]
fn unknown_command_is_reported() {
    let f = file_with(&[0u8; 8]);
    let keys = script(&[&command("frobnicate"), &[Key::Enter], &QUIT]);
    let mut ctl = opened(&f, false, keys);
    ctl.run().unwrap();
    assert!(ctl.console().output_text().contains("UNKNOWN COMMAND"));
}

#[test]
fn cancelled_command_changes_nothing() {
    let f = file_with(&[0u8; 64]);
    let keys = script(&[&[Key::Char(':')], &typed("go to 40"), &[Key::Esc, Key::Esc], &QUIT]);
    let mut ctl = opened(&f, false, keys);
    ctl.run().unwrap();
    assert_eq!(ctl.session().cursor(), 0);
}

#[test]
fn declined_quit_keeps_running() {
    let f = file_with(&[0u8; 8]);
    let keys = script(&[&[Key::Esc, Key::Esc, Key::Char('n'), Key::Right], &QUIT]);
    let mut ctl = opened(&f, false, keys);
    ctl.run().unwrap();
    assert_eq!(ctl.session().cursor(), 1);
    let out = ctl.console().output_text();
    assert!(out.contains("Are you sure you want to quit?"));
    assert!(out.contains("\x1b[?25l"));
    assert!(out.contains("\x1b[?25h"));
}

#[test]
fn quit_command_exits_without_prompt() {
    let f = file_with(&[0u8; 8]);
    let mut ctl = opened(&f, false, command("quit"));
    ctl.run().unwrap();
    assert!(ctl.session().quit_requested());
    assert!(!ctl.console().output_text().contains("Are you sure"));
}

#[test]
fn failed_initial_open_leaves_session_closed() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctl = controller(TermSize::default(), script(&[&[Key::Enter], &QUIT]));
    ctl.open_initial(&dir.path().join("missing.bin"), false)
        .unwrap();
    assert!(ctl.session().stream().is_none());
    assert!(ctl.console().output_text().contains("Unable to open file"));
    ctl.run().unwrap();
    assert_eq!(ctl.session().size(), 0);
}

#[test]
fn failed_open_command_closes_previous_file() {
    let f = file_with(&[0u8; 32]);
    let keys = script(&[
        &command("go to 10"),
        &command("open /nonexistent/dir/file.bin"),
        &[Key::Enter],
        &QUIT,
    ]);
    let mut ctl = opened(&f, false, keys);
    ctl.run().unwrap();
    assert!(ctl.session().stream().is_none());
    assert_eq!(ctl.session().cursor(), 0);
}

#[test]
fn open_command_switches_files() {
    let a = file_with(&[0u8; 32]);
    let b = file_with(&[0xFFu8; 4]);
    let line = format!("openrw \"{}\"", b.path().display());
    let keys = script(&[&command("go to 20"), &command(&line), &QUIT]);
    let mut ctl = opened(&a, false, keys);
    ctl.run().unwrap();
    assert_eq!(ctl.session().size(), 4);
    assert!(ctl.session().is_writable());
    assert_eq!(ctl.session().cursor(), 0);
}

#[test]
fn help_screen_waits_for_return() {
    let f = file_with(&[0u8; 8]);
    let keys = script(&[&command("help"), &[Key::Char('x'), Key::Enter], &QUIT]);
    let mut ctl = opened(&f, false, keys);
    ctl.run().unwrap();
    let out = ctl.console().output_text();
    assert!(out.contains("HIT RETURN TO CONTINUE."));
    assert!(out.contains("COMMAND SUMMARY"));
}

#[test]
fn stepping_past_bottom_scrolls_one_row() {
    let f = file_with(&[0u8; 16 * 40]);
    let term = TermSize::new(100, 6);
    let mut ctl = controller(term, vec![Key::Down; 5]);
    ctl.open_initial(f.path(), false).unwrap();
    for _ in 0..5 {
        ctl.tick().unwrap();
    }
    ctl.render().unwrap();
    assert_eq!(ctl.session().cursor(), 80);
    assert_eq!(ctl.session().viewport.top_offset, 16);
    let stats = ctl.engine().stats();
    assert_eq!(stats.scroll_frames, 1);
    assert!(matches!(
        stats.last_path,
        Some(RenderPath::ScrollUp | RenderPath::ScrollDown)
    ));
}

#[test]
fn resize_recomputes_viewport() {
    let f = file_with(&[0u8; 16 * 40]);
    let keys = script(&[&[Key::Resize(TermSize::new(100, 10))], &QUIT]);
    let mut ctl = opened(&f, false, keys);
    ctl.run().unwrap();
    assert_eq!(ctl.session().term(), TermSize::new(100, 10));
    assert_eq!(ctl.session().viewport.row_count, 9);
}

#[test]
fn resize_during_command_entry_is_applied() {
    let f = file_with(&[0u8; 16 * 40]);
    let keys = script(&[
        &[Key::Char(':'), Key::Char('g'), Key::Resize(TermSize::new(100, 10))],
        &typed("o to 32\n"),
        &QUIT,
    ]);
    let mut ctl = opened(&f, false, keys);
    ctl.run().unwrap();
    assert_eq!(ctl.session().term(), TermSize::new(100, 10));
    assert_eq!(ctl.session().viewport.row_count, 9);
    assert_eq!(ctl.session().cursor(), 32);
}
