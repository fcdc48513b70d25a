//! Viewport model: the mapping between a logical cursor offset inside a byte
//! stream and a bounded grid of terminal rows and columns.
//!
//! The model is recomputed from the cursor offset once per tick by
//! [`ViewportState::normalize`]. Normalization moves the viewport just enough
//! to keep the cursor visible and reports, through [`DirtyFlags`], which
//! class of repaint the change requires. The render engine consumes those
//! flags; nothing in this crate knows about terminal escape syntax.
//!
//! Core invariants (must hold after every `normalize`):
//! * `top_offset <= cursor` and `(cursor - top_offset) / columns_per_row` is a
//!   row index in `[0, row_count)`.
//! * `h_scroll <= cursor_col < h_scroll + screen_columns`.
//! * `columns_per_row >= 1`, `row_count >= 1`, `screen_columns >= 1`.
//!
//! Geometry helpers that translate grid positions into screen columns live in
//! [`layout`]; panel visibility and the active panel live in [`panel`].

pub mod dirty;
pub mod layout;
pub mod panel;
pub mod viewport;

pub use dirty::{DirtyFlags, ScrollDir};
pub use layout::{TermSize, cursor_screen_x, screen_columns};
pub use panel::{Panel, PanelSet};
pub use viewport::ViewportState;
