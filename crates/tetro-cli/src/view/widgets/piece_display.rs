use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tetro_engine::{Block, Orientation, PieceKind};

use crate::{palette::Design, view::widgets::BlockDisplay};

/// A single piece in its spawn orientation, centered in a 4 × 2 box.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<PieceKind>,
    design: Design,
    dimmed: bool,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new(design: Design) -> Self {
        Self {
            piece: None,
            design,
            dimmed: false,
            block: None,
        }
    }

    pub fn piece(self, piece: Option<PieceKind>) -> Self {
        Self { piece, ..self }
    }

    /// Draws the piece greyed out, e.g. a hold that cannot be used.
    pub fn dimmed(self, dimmed: bool) -> Self {
        Self { dimmed, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        4 * BlockDisplay::WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * BlockDisplay::HEIGHT + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(kind) = self.piece else {
            return;
        };
        let shape = kind.shape();
        let orientation = Orientation::default();
        let (w, h) = (shape.width(orientation), shape.height(orientation));
        let piece_area = area.centered(
            Constraint::Length(u16::from(w) * BlockDisplay::WIDTH),
            Constraint::Length(u16::from(h) * BlockDisplay::HEIGHT),
        );

        let horizontal =
            Layout::horizontal((0..w).map(|_| Constraint::Length(BlockDisplay::WIDTH)))
                .flex(Flex::Center);
        let vertical = Layout::vertical((0..h).map(|_| Constraint::Length(BlockDisplay::HEIGHT)));

        let mut tile = BlockDisplay::from_block(Block::Piece(kind), self.design);
        if self.dimmed {
            tile = tile.dimmed();
        }
        for (y, row) in (0..).zip(piece_area.layout_vec(&vertical)) {
            for (x, cell) in (0..).zip(row.layout_vec(&horizontal)) {
                if shape.has_tile(x, y, orientation) {
                    Widget::render(&tile, cell, buf);
                }
            }
        }
    }
}
