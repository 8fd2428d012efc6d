//! Landing page

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

pub struct HomeView;

impl HomeView {
    pub fn render(frame: &mut Frame, area: Rect, api_root: &str) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Welcome to OctoFit Tracker",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(
                "Track your fitness activities and compare your performance with your team!",
            ),
            Line::from(""),
            Line::from(Span::styled(
                "Select a section with 1-6 or Tab to get started.",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("API: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(api_root.to_string()),
            ]),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(" 🏋 OctoFit "),
            );
        frame.render_widget(paragraph, area);
    }
}
