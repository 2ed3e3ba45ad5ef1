use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};
use tetro_engine::{Block, PieceKind};

use crate::{palette::Design, view::widgets::style};

/// One board cell, two terminal columns wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const WIDTH: u16 = 2;
    pub const HEIGHT: u16 = 1;

    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    /// Board cell; empty cells show a grid dot when the design has an outline.
    pub fn from_block(block: Block, design: Design) -> Self {
        match (design.block_color(block), design.outline()) {
            (Some(color), _) => Self::new(style::filled(color), ""),
            (None, Some(outline)) => Self::new(style::on_black(outline), "."),
            (None, None) => Self::new(style::EMPTY, ""),
        }
    }

    /// Cell of the drop preview.
    pub fn ghost(kind: PieceKind, design: Design) -> Self {
        Self::new(style::on_black(design.piece_color(kind)), "[]")
    }

    pub fn dimmed(self) -> Self {
        if self.style == style::EMPTY {
            self
        } else {
            Self::new(style::DIMMED, "")
        }
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Paragraph fills the whole area, not just the cells under the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
