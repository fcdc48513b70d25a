//! Rendering: row cache, row renderer, render engine, status line.
//!
//! The engine never touches the terminal directly. Each pass produces a
//! [`Writer`] holding ordered [`TermCommand`] values; the caller serializes
//! them (crossterm `queue!`) and hands the bytes to the console in one
//! write. This keeps the viewport and scroll logic free of escape syntax and
//! lets tests assert on commands instead of byte soup.
//!
//! Cache lifecycle: the single-row cache is owned by the engine. It is
//! invalidated on writes (`note_write`), on `h_scroll` or window width
//! changes (detected per pass), and on re-open or truncate (`invalidate`).

pub mod render_engine;
pub mod row;
pub mod row_cache;
pub mod status;
pub mod style;
pub mod writer;

pub use render_engine::{RenderEngine, RenderPath, RenderStats};
pub use row::{RowContext, draw_row};
pub use row_cache::RowCache;
pub use status::{draw_status, prompt, status_text};
pub use style::RowStyle;
pub use writer::{TermCommand, Writer};
