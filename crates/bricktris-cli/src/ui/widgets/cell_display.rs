use bricktris_engine::Block;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
};

use crate::ui::widgets::style;

/// Terminal columns taken by one field cell.
pub const CELL_WIDTH: u16 = 2;
/// Terminal rows taken by one field cell.
pub const CELL_HEIGHT: u16 = 1;

/// Extent of `count` cells of `cell` terminal units each.
pub fn cells_extent(count: usize, cell: u16) -> u16 {
    u16::try_from(count).map_or(u16::MAX, |count| count.saturating_mul(cell))
}

/// One field cell: a solid colour for a filled cell, an optional dot marking
/// an empty one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellDisplay {
    style: Style,
    dot: bool,
}

impl CellDisplay {
    pub fn of(block: Block, dotted: bool) -> Self {
        match block {
            Block::Filled(kind) => Self {
                style: style::kind(kind),
                dot: false,
            },
            Block::Empty => Self {
                style: if dotted { style::EMPTY_DOT } else { style::EMPTY },
                dot: dotted,
            },
        }
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        for pos in area.positions() {
            buf[pos].set_symbol(" ").set_style(self.style);
        }
        if self.dot && !area.is_empty() {
            buf[(area.x, area.y)].set_symbol(".");
        }
    }
}
