use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, Widget},
};

use super::status_color;
use crate::presentation::view_models::CardViewModel;

/// Table view: one row per student, the window starting at `offset`
pub struct TableView<'a> {
    rows: &'a [CardViewModel],
}

impl<'a> TableView<'a> {
    pub fn new(rows: &'a [CardViewModel]) -> Self {
        Self { rows }
    }
}

impl<'a> Widget for TableView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(["Roll", "Name", "Status", ""])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let rows = self.rows.iter().map(|r| {
            let style = if r.focused {
                Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(format!("{:>4}", r.roll_number)),
                Cell::from(r.name.as_str()),
                Cell::from(Span::styled(
                    format!("[{}] {}", r.status.shortcut(), r.status.label()),
                    Style::default().fg(status_color(r.status)),
                )),
                Cell::from(if r.is_online { "●" } else { "○" }),
            ])
            .style(style)
        });

        let widths = [
            Constraint::Length(6),
            Constraint::Min(20),
            Constraint::Length(12),
            Constraint::Length(2),
        ];
        Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL))
            .render(area, buf);
    }
}
