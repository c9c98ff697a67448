use bricktris_engine::{GameState, Snapshot};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{GridDisplay, PieceDisplay, StatsDisplay, color, style};

/// Whole game screen: stats, playfield, next piece and status popups.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    snapshot: &'a Snapshot,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            snapshot,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    /// Rows needed to draw the playfield with its border.
    pub fn height(&self) -> u16 {
        GridDisplay::new(self.snapshot)
            .block(Block::bordered())
            .height()
    }

    fn border_color(&self) -> Color {
        match self.snapshot.state {
            GameState::Start => color::GRAY,
            GameState::GameOver => color::RED,
            _ if self.snapshot.paused => color::YELLOW,
            _ => color::WHITE,
        }
    }

    fn popup(&self) -> Option<(&'static str, Style)> {
        match self.snapshot.state {
            GameState::Start => Some(("Press ENTER to start", style::START_POPUP)),
            GameState::GameOver => Some(("GAME OVER", style::GAME_OVER_POPUP)),
            _ if self.snapshot.paused => Some(("PAUSED", style::PAUSED_POPUP)),
            _ => None,
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = self.border_color();
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let grid = GridDisplay::new(self.snapshot).block(
            Block::bordered()
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let next_panel = PieceDisplay::new()
            .piece(self.snapshot.next)
            .block(panel("NEXT"));
        let stats = StatsDisplay::new(self.snapshot).block(panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(grid.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(stats.height())]).areas(left_column);
        let [grid_area] =
            Layout::vertical([Constraint::Length(grid.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let grid_width = grid.width();
        stats.render(stats_area, buf);
        grid.render(grid_area, buf);
        next_panel.render(next_area, buf);

        if let Some((text, style)) = self.popup() {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area = grid_area.centered(Constraint::Length(grid_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
