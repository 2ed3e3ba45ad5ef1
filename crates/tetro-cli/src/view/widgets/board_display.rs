use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tetro_engine::{Block, Board, Piece};

use crate::{palette::Design, view::widgets::BlockDisplay};

/// Rows above the divider, where pieces spawn.
pub const HIDDEN_ROWS: usize = 2;

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    design: Design,
    falling_piece: Option<Piece>,
    ghost: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board, design: Design) -> Self {
        Self {
            board,
            design,
            falling_piece: None,
            ghost: None,
            block: None,
        }
    }

    pub fn falling_piece(self, piece: Piece) -> Self {
        Self {
            falling_piece: Some(piece),
            ..self
        }
    }

    pub fn ghost(self, piece: Piece) -> Self {
        Self {
            ghost: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn hidden_rows(&self) -> usize {
        // No divider when it would cover the whole board
        if self.board.height() > HIDDEN_ROWS {
            HIDDEN_ROWS
        } else {
            0
        }
    }

    fn line_count(&self) -> usize {
        self.board.height() + usize::from(self.hidden_rows() > 0)
    }

    pub fn width(&self) -> u16 {
        super::saturating_u16(self.board.width()) * BlockDisplay::WIDTH
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        super::saturating_u16(self.line_count()) * BlockDisplay::HEIGHT
            + super::block_vertical_margin(self.block.as_ref())
    }

    fn cell(&self, x: usize, y: usize) -> BlockDisplay {
        let covers = |piece: &Piece| {
            piece
                .cells()
                .any(|(px, py)| usize::try_from(px) == Ok(x) && usize::try_from(py) == Ok(y))
        };
        if let Some(piece) = self.falling_piece.filter(covers) {
            return BlockDisplay::from_block(Block::Piece(piece.kind()), self.design);
        }
        if let Some(ghost) = self.ghost.filter(covers) {
            return BlockDisplay::ghost(ghost.kind(), self.design);
        }
        BlockDisplay::from_block(self.board.cell_at(x, y), self.design)
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let hidden_rows = self.hidden_rows();
        let horizontal = Layout::horizontal(
            (0..self.board.width()).map(|_| Constraint::Length(BlockDisplay::WIDTH)),
        )
        .flex(Flex::Center);
        let vertical = Layout::vertical(
            (0..self.line_count()).map(|_| Constraint::Length(BlockDisplay::HEIGHT)),
        );
        let mut lines = area.layout_vec(&vertical).into_iter();

        for y in 0..self.board.height() {
            if hidden_rows > 0 && y == hidden_rows {
                let Some(divider) = lines.next() else {
                    return;
                };
                let color = self.design.outline().unwrap_or(Color::DarkGray);
                let width = usize::from(divider.width);
                Line::styled("─".repeat(width), Style::new().fg(color)).render(divider, buf);
            }
            let Some(line) = lines.next() else {
                return;
            };
            for (x, cell_area) in iter::zip(0.., line.layout_vec(&horizontal)) {
                self.cell(x, y).render(cell_area, buf);
            }
        }
    }
}
