use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};

use crate::{ui::view::PlayerView, util::colors};

pub const PLAYER_BAR_HEIGHT: u16 = 4;

const TIME_LABEL_WIDTH: u16 = 7;
const VOLUME_WIDTH: u16 = 16;

pub struct PlayerBarWidget<'a> {
    view: &'a PlayerView,
}

impl<'a> PlayerBarWidget<'a> {
    pub fn new(view: &'a PlayerView) -> Self {
        Self { view }
    }

    fn block(&self) -> Block<'a> {
        Block::default()
            .title_top(format!(" {} by {} ", self.view.title, self.view.artist))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
    }

    fn rows(inner: Rect) -> [Rect; 2] {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(inner);
        [rows[0], rows[1]]
    }

    fn progress_columns(row: Rect) -> [Rect; 3] {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(TIME_LABEL_WIDTH),
                Constraint::Min(1),
                Constraint::Length(TIME_LABEL_WIDTH),
            ])
            .split(row);
        [columns[0], columns[1], columns[2]]
    }

    /// Screen area of the position slider for a bar drawn into `area`.
    pub fn progress_area(area: Rect) -> Rect {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        let [_, progress_row] = Self::rows(inner);
        Self::progress_columns(progress_row)[1]
    }

    fn controls_line(&self) -> Line<'static> {
        let enabled = Style::default().fg(colors::PRIMARY);
        let disabled = Style::default().fg(colors::NEUTRAL);

        let previous = Span::styled(
            "|<<",
            if self.view.can_go_previous {
                enabled
            } else {
                disabled
            },
        );
        let toggle = if self.view.is_playing {
            Span::styled(" || ", enabled.bold())
        } else {
            Span::styled(" |> ", enabled.bold())
        };
        let next = Span::styled(
            ">>|",
            if self.view.can_go_next {
                enabled
            } else {
                disabled
            },
        );

        Line::from(vec![previous, toggle, next])
    }
}

impl Widget for PlayerBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);

        let [controls_row, progress_row] = Self::rows(inner);

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(VOLUME_WIDTH)])
            .split(controls_row);

        Paragraph::new(self.controls_line())
            .centered()
            .render(top[0], buf);

        let volume_label = if self.view.is_muted {
            "muted".to_string()
        } else {
            format!("vol {:.0}%", self.view.volume * 100.0)
        };
        Gauge::default()
            .gauge_style(Style::new().fg(colors::PRIMARY).bg(colors::NEUTRAL))
            .ratio(self.view.volume.clamp(0.0, 1.0))
            .label(Span::from(volume_label).fg(Color::White))
            .render(top[1], buf);

        let [elapsed, slider, total] = Self::progress_columns(progress_row);

        Paragraph::new(self.view.elapsed_label())
            .centered()
            .render(elapsed, buf);
        Gauge::default()
            .gauge_style(Style::new().fg(colors::PRIMARY).bg(colors::BACKGROUND))
            .ratio(self.view.progress_ratio())
            .label("")
            .use_unicode(true)
            .render(slider, buf);
        Paragraph::new(self.view.duration_label())
            .centered()
            .render(total, buf);
    }
}
