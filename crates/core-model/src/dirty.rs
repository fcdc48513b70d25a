//! Dirty flags raised by viewport normalization and controller mutations.
//!
//! Exactly one repaint strategy is honored per render pass, chosen by
//! priority `full > scroll > cursor_only`. `cursor_only` is still consulted
//! after a full or scroll pass because the terminal cursor and the
//! highlighted row must follow the grid position in every case.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollDir {
    #[default]
    None,
    /// Viewport moved one row towards the end; content shifts up.
    Up,
    /// Viewport moved one row towards the start; content shifts down.
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirtyFlags {
    pub full: bool,
    pub scroll: ScrollDir,
    pub cursor_only: bool,
}

impl DirtyFlags {
    pub fn full() -> Self {
        Self {
            full: true,
            ..Self::default()
        }
    }

    pub fn is_clean(&self) -> bool {
        !self.full && self.scroll == ScrollDir::None && !self.cursor_only
    }

    /// Fold `other` into `self`. A second scroll in the same pass cannot be
    /// expressed as a single-row shift, so two scrolls escalate to `full`.
    pub fn merge(&mut self, other: DirtyFlags) {
        self.full |= other.full;
        self.cursor_only |= other.cursor_only;
        match (self.scroll, other.scroll) {
            (_, ScrollDir::None) => {}
            (ScrollDir::None, s) => self.scroll = s,
            _ => {
                self.scroll = ScrollDir::None;
                self.full = true;
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
