//! Detail pane for the selected item

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

/// Every field of one item, including the ones the list leaves out
pub struct DetailView {
    pub title: String,
    pub fields: Vec<(&'static str, String)>,
    pub scroll: u16,
}

impl DetailView {
    pub fn new(title: impl Into<String>, fields: Vec<(&'static str, String)>) -> Self {
        Self {
            title: title.into(),
            fields,
            scroll: 0,
        }
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" {} (Esc to close, j/k to scroll) ", self.title));

        let width = self.fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        let lines: Vec<Line> = self
            .fields
            .iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(
                        format!("{label:<width$}  "),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(value.clone()),
                ])
            })
            .collect();

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));

        frame.render_widget(Clear, area);
        frame.render_widget(paragraph, area);
    }
}
