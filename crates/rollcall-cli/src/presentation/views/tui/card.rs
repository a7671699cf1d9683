use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::status_color;
use crate::presentation::view_models::CardViewModel;

/// One student card in grid view
pub struct CardView<'a> {
    model: &'a CardViewModel,
}

impl<'a> CardView<'a> {
    pub fn new(model: &'a CardViewModel) -> Self {
        Self { model }
    }
}

impl<'a> Widget for CardView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let card = self.model;
        let color = status_color(card.status);

        let border_style = if card.focused {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if card.focused {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(border_style)
            .title(format!(" #{} ", card.roll_number));
        let inner = block.inner(area);
        block.render(area, buf);

        let online = if card.is_online { "●" } else { "○" };
        let lines = vec![
            Line::from(Span::styled(
                card.name.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(
                    format!("[{}] {}", card.status.shortcut(), card.status.label()),
                    Style::default().fg(color),
                ),
                Span::raw(" "),
                Span::styled(online, Style::default().fg(Color::DarkGray)),
            ]),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}
