use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::presentation::view_models::HeaderViewModel;

pub struct HeaderView<'a> {
    model: &'a HeaderViewModel,
}

impl<'a> HeaderView<'a> {
    pub fn new(model: &'a HeaderViewModel) -> Self {
        Self { model }
    }
}

impl<'a> Widget for HeaderView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let m = self.model;
        let mut title = vec![Span::styled(
            format!(" {} ", m.title),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if m.dirty {
            title.push(Span::styled("● unsaved ", Style::default().fg(Color::Yellow)));
        }
        if m.saving {
            title.push(Span::styled("saving… ", Style::default().fg(Color::Cyan)));
        }

        let block = Block::default().borders(Borders::ALL).title(Line::from(title));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(inner);

        let search_style = if m.searching {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        let cursor = if m.searching { "▏" } else { "" };
        let left = Line::from(vec![
            Span::raw("Search: "),
            Span::styled(format!("{}{}", m.search_query, cursor), search_style),
            Span::raw(format!(
                "  view {} · sort {} · show {}",
                m.view_label, m.sort_label, m.filter_label
            )),
        ]);
        Paragraph::new(left).render(chunks[0], buf);

        let s = &m.summary;
        let right = Line::from(vec![
            Span::styled(format!("P {} ", s.present), Style::default().fg(Color::Green)),
            Span::styled(format!("A {} ", s.absent), Style::default().fg(Color::Red)),
            Span::styled(format!("L {} ", s.leave), Style::default().fg(Color::Yellow)),
            Span::raw(format!("of {} · {:.1}%", s.total, s.rate_percent)),
        ]);
        Paragraph::new(right).render(chunks[1], buf);
    }
}
