use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::status_level_to_color;
use crate::presentation::view_models::StatusBarViewModel;

pub struct StatusBarView<'a> {
    model: &'a StatusBarViewModel,
}

impl<'a> StatusBarView<'a> {
    pub fn new(model: &'a StatusBarViewModel) -> Self {
        Self { model }
    }
}

impl<'a> Widget for StatusBarView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(inner);

        let mut left = vec![Span::raw(format!("{} ", self.model.focus_label))];
        if let Some(notice) = &self.model.notice {
            left.push(Span::raw("| "));
            left.push(Span::styled(
                notice.message.as_str(),
                Style::default().fg(status_level_to_color(notice.level)),
            ));
        }
        Paragraph::new(Line::from(left)).render(chunks[0], buf);

        let key = Style::default().fg(Color::Yellow);
        let help = Line::from(vec![
            Span::styled("[p/a/l]", key),
            Span::raw("mark "),
            Span::styled("[^s]", key),
            Span::raw("save "),
            Span::styled("[?]", key),
            Span::raw("help "),
            Span::styled("[q]", key),
            Span::raw("uit"),
        ]);
        Paragraph::new(help).render(chunks[1], buf);
    }
}
