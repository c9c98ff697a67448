use std::iter;

use bricktris_engine::{Block, HEIGHT, Position, Snapshot, WIDTH};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::{CELL_HEIGHT, CELL_WIDTH, CellDisplay, cells_extent};

/// The playfield with the falling piece drawn over it.
#[derive(Debug)]
pub struct GridDisplay<'a> {
    snapshot: &'a Snapshot,
    block: Option<BlockWidget<'a>>,
}

impl<'a> GridDisplay<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            snapshot,
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
        cells_extent(WIDTH, CELL_WIDTH) + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        cells_extent(HEIGHT, CELL_HEIGHT) + super::block_vertical_margin(self.block.as_ref())
    }

    fn block_at(&self, pos: Position) -> Block {
        self.snapshot
            .active_kind_at(pos)
            .map(Block::Filled)
            .or_else(|| self.snapshot.grid.get(pos))
            .unwrap_or_default()
    }
}

impl Widget for GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..WIDTH).map(|_| Constraint::Length(CELL_WIDTH));
        let row_constraints = (0..HEIGHT).map(|_| Constraint::Length(CELL_HEIGHT));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<HEIGHT>(&vertical)
            .into_iter()
            .map(|row| row.layout::<WIDTH>(&horizontal));

        for (y, grid_row) in iter::zip(0.., grid_cells) {
            for (x, grid_cell) in iter::zip(0.., grid_row) {
                let block = self.block_at(Position::new(x, y));
                CellDisplay::of(block, true).render(grid_cell, buf);
            }
        }
    }
}
