//! Panels: the offset label, hex dump and ASCII dump column groups.

use bitflags::bitflags;

bitflags! {
    /// Which optional panels are visible. The offset label is always drawn.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PanelSet: u8 {
        const HEX   = 0b0000_0001;
        const ASCII = 0b0000_0010;
    }
}

impl Default for PanelSet {
    fn default() -> Self {
        Self::HEX | Self::ASCII
    }
}

/// The column group the cursor lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    Offset,
    #[default]
    Hex,
    Ascii,
}

impl Panel {
    /// Next panel in `Offset -> Hex -> Ascii -> Offset` order, skipping the
    /// hidden ones.
    pub fn cycle(self, visible: PanelSet) -> Panel {
        let next = match self {
            Panel::Offset => Panel::Hex,
            Panel::Hex => Panel::Ascii,
            Panel::Ascii => Panel::Offset,
        };
        next.settle(visible)
    }

    /// Move off a hidden panel: hex falls through to ascii, ascii to offset.
    pub fn settle(self, visible: PanelSet) -> Panel {
        let mut p = self;
        if p == Panel::Hex && !visible.contains(PanelSet::HEX) {
            p = Panel::Ascii;
        }
        if p == Panel::Ascii && !visible.contains(PanelSet::ASCII) {
            p = Panel::Offset;
        }
        p
    }

    /// Short tag shown in the status bar.
    pub fn tag(self) -> &'static str {
        match self {
            Panel::Offset => "ofs",
            Panel::Hex => "hex",
            Panel::Ascii => "asc",
        }
    }

    /// Left/right movement and byte entry only apply outside the offset label.
    pub fn is_data(self) -> bool {
        !matches!(self, Panel::Offset)
    }
}
