use std::iter;

use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tetro_engine::PieceKind;

use crate::{
    palette::Design,
    view::widgets::{BlockDisplay, PieceDisplay},
};

/// Upcoming pieces, next one on top.
#[derive(Debug)]
pub struct PieceStackDisplay<'a> {
    pieces: Vec<PieceKind>,
    design: Design,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceStackDisplay<'a> {
    pub fn new<I>(pieces: I, design: Design) -> Self
    where
        I: IntoIterator<Item = PieceKind>,
    {
        Self {
            pieces: pieces.into_iter().collect(),
            design,
            block: None,
        }
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
        let count = super::saturating_u16(self.pieces.len());
        let gaps = count.saturating_sub(1);
        2 * BlockDisplay::HEIGHT * count + gaps + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceStackDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        let layout = Layout::vertical(
            (0..self.pieces.len()).map(|_| Constraint::Length(2 * BlockDisplay::HEIGHT)),
        )
        .flex(Flex::SpaceBetween);

        for (cell, piece) in iter::zip(area.layout_vec(&layout), &self.pieces) {
            PieceDisplay::new(self.design)
                .piece(Some(*piece))
                .render(cell, buf);
        }
    }
}
