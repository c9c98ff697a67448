use std::iter;

use bricktris_engine::{Block, Position, TETROMINO_HEIGHT, TETROMINO_WIDTH, TetrominoKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::{CELL_HEIGHT, CELL_WIDTH, CellDisplay, cells_extent};

/// A piece in its canonical layout, used for the next-piece preview.
#[derive(Debug, Default)]
pub struct PieceDisplay<'a> {
    piece: Option<TetrominoKind>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn piece(self, piece: TetrominoKind) -> Self {
        Self {
            piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        cells_extent(TETROMINO_WIDTH, CELL_WIDTH)
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        cells_extent(TETROMINO_HEIGHT, CELL_HEIGHT)
            + super::block_vertical_margin(self.block.as_ref())
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

        let col_constraints =
            (0..TETROMINO_WIDTH).map(|_| Constraint::Length(CELL_WIDTH));
        let row_constraints =
            (0..TETROMINO_HEIGHT).map(|_| Constraint::Length(CELL_HEIGHT));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = area
            .layout::<TETROMINO_HEIGHT>(&vertical)
            .into_iter()
            .map(|row| row.layout::<TETROMINO_WIDTH>(&horizontal));

        let cells = self.piece.map(|piece| *piece.shape().cells());
        for (y, grid_row) in iter::zip(0.., grid_rows) {
            for (x, grid_cell) in iter::zip(0.., grid_row) {
                let block = match (self.piece, cells) {
                    (Some(piece), Some(cells)) if cells.contains(&Position::new(x, y)) => {
                        Block::Filled(piece)
                    }
                    _ => Block::Empty,
                };
                CellDisplay::of(block, false).render(grid_cell, buf);
            }
        }
    }
}
