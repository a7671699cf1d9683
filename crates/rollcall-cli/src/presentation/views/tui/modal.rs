use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::status_color;
use crate::presentation::view_models::ModalViewModel;
use rollcall_types::AttendanceStatus;

pub struct ModalView<'a> {
    model: &'a ModalViewModel,
}

impl<'a> ModalView<'a> {
    pub fn new(model: &'a ModalViewModel) -> Self {
        Self { model }
    }

    fn size(&self) -> (u16, u16) {
        match self.model {
            ModalViewModel::Help { bindings } => (60, bindings.len() as u16 + 4),
            ModalViewModel::MarkAll { .. } => (52, 9),
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

impl<'a> Widget for ModalView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (width, height) = self.size();
        let area = centered(area, width, height);
        Clear.render(area, buf);

        let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let (title, lines) = match self.model {
            ModalViewModel::Help { bindings } => {
                let lines: Vec<Line> = bindings
                    .iter()
                    .map(|(k, d)| {
                        Line::from(vec![
                            Span::styled(format!("{:>14}  ", k), key),
                            Span::raw(d.as_str()),
                        ])
                    })
                    .collect();
                (" Keyboard shortcuts ", lines)
            }
            ModalViewModel::MarkAll { choice, total } => {
                let mut lines = vec![
                    Line::from(format!("Set all {} students to:", total)),
                    Line::from(""),
                ];
                let options: Vec<Span> = AttendanceStatus::ALL
                    .iter()
                    .flat_map(|&s| {
                        let mut style = Style::default().fg(status_color(s));
                        if *choice == Some(s) {
                            style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
                        }
                        [
                            Span::styled(format!(" [{}] {} ", s.shortcut(), s.label()), style),
                            Span::raw("  "),
                        ]
                    })
                    .collect();
                lines.push(Line::from(options));
                lines.push(Line::from(""));
                lines.push(match choice {
                    Some(_) => Line::from(vec![
                        Span::styled("[y]", key),
                        Span::raw(" apply   "),
                        Span::styled("[Esc]", key),
                        Span::raw(" cancel   (undo with u)"),
                    ]),
                    None => Line::from(vec![
                        Span::raw("Pick a status, or "),
                        Span::styled("[Esc]", key),
                        Span::raw(" to cancel"),
                    ]),
                });
                (" Mark everyone ", lines)
            }
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .title(title);
        Paragraph::new(lines).block(block).render(area, buf);
    }
}
