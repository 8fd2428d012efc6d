//! List view for one resource, driven by its fetch

use octofit::present::Present;
use octofit::{Collected, FetchTask, OctofitError, Phase, Resource, Result, ViewState};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};

use super::{spinner_frame, tone_style};

const CARDS_PER_ROW: usize = 3;

/// How a resource lays out its items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrangement {
    Cards,
    Table,
}

impl Arrangement {
    pub fn for_resource(resource: Resource) -> Self {
        match resource {
            Resource::Users | Resource::Teams | Resource::Workouts => Arrangement::Cards,
            Resource::Activities | Resource::Leaderboard => Arrangement::Table,
        }
    }
}

/// A mounted resource view. Owns the fetch started when it mounted, so
/// dropping the view cancels a request still in flight.
pub struct ResourceView<T> {
    pub state: ViewState<T>,
    pub selection: TableState,
    task: Option<FetchTask>,
}

impl<T: Collected + Present> ResourceView<T> {
    pub fn new(task: FetchTask) -> Self {
        Self {
            state: ViewState::new(),
            selection: TableState::default(),
            task: Some(task),
        }
    }

    pub fn resource(&self) -> Resource {
        T::RESOURCE
    }

    /// Apply the fetch outcome. Ignored once the view has settled.
    pub fn resolve(&mut self, result: Result<octofit::Collection>) {
        let result = result.and_then(|collection| {
            let received = collection.resource();
            T::from_collection(collection).ok_or_else(|| {
                OctofitError::Fetch(format!("Expected {} but received {}", T::RESOURCE, received))
            })
        });

        if self.state.resolve(result) {
            self.task = None;
            if !self.state.items().is_empty() {
                self.selection.select(Some(0));
            }
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub fn next(&mut self) {
        let len = self.state.items().len();
        if len == 0 {
            return;
        }
        let i = match self.selection.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.selection.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.state.items().len();
        if len == 0 {
            return;
        }
        let i = match self.selection.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.selection.select(Some(i));
    }

    pub fn selected(&self) -> Option<(usize, &T)> {
        let index = self.selection.selected()?;
        self.state.items().get(index).map(|item| (index, item))
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, tick: usize) {
        let resource = T::RESOURCE;
        match self.state.phase() {
            Phase::Loading => {
                let text = format!("{} {}", spinner_frame(tick), resource.loading_label());
                let paragraph = Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Cyan))
                    .block(framed(resource.title()));
                frame.render_widget(paragraph, area);
            }
            Phase::Error => {
                let lines = vec![
                    Line::from(Span::styled(
                        "Error!",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(self.state.error().unwrap_or_default().to_string()),
                ];
                let paragraph = Paragraph::new(lines)
                    .style(Style::default().fg(Color::Red))
                    .wrap(Wrap { trim: true })
                    .block(framed(resource.title()).border_style(Style::default().fg(Color::Red)));
                frame.render_widget(paragraph, area);
            }
            Phase::Empty => {
                let paragraph = Paragraph::new(resource.empty_notice())
                    .style(Style::default().fg(Color::Cyan))
                    .block(framed(resource.title()));
                frame.render_widget(paragraph, area);
            }
            Phase::Ready => {
                let [body, footer] =
                    Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);
                match Arrangement::for_resource(resource) {
                    Arrangement::Table => self.render_table(frame, body),
                    Arrangement::Cards => self.render_cards(frame, body),
                }
                self.render_footer(frame, footer);
            }
        }
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect) {
        let header = Row::new(
            T::columns()
                .iter()
                .map(|c| Cell::from(*c).style(Style::default().add_modifier(Modifier::BOLD))),
        )
        .height(1);

        let rows: Vec<Row> = self
            .state
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let row = Row::new(
                    item.row(index)
                        .into_iter()
                        .map(|field| Cell::from(field.text).style(tone_style(field.tone))),
                );
                if T::highlighted(index) {
                    row.style(Style::default().add_modifier(Modifier::BOLD))
                } else {
                    row
                }
            })
            .collect();

        let widths = vec![Constraint::Fill(1); T::columns().len()];

        let table = Table::new(rows, widths)
            .header(header)
            .block(framed(T::RESOURCE.title()))
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        frame.render_stateful_widget(table, area, &mut self.selection);
    }

    fn render_cards(&self, frame: &mut Frame, area: Rect) {
        let outer = framed(T::RESOURCE.title());
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let items = self.state.items();
        // Heading goes in the card title, the remaining fields one per line
        let card_height = (T::columns().len() as u16).saturating_sub(1) + 2;
        let visible_rows = usize::from((inner.height / card_height).max(1));
        let selected = self.selection.selected().unwrap_or(0);
        let first_row = (selected / CARDS_PER_ROW).saturating_sub(visible_rows - 1);

        let row_areas =
            Layout::vertical(vec![Constraint::Length(card_height); visible_rows]).split(inner);

        for (slot, row_area) in row_areas.iter().enumerate() {
            let columns = Layout::horizontal(vec![
                Constraint::Ratio(1, CARDS_PER_ROW as u32);
                CARDS_PER_ROW
            ])
            .split(*row_area);

            for (column, card_area) in columns.iter().enumerate() {
                let index = (first_row + slot) * CARDS_PER_ROW + column;
                if let Some(item) = items.get(index) {
                    render_card(frame, *card_area, item, index, index == selected);
                }
            }
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let position = self.selection.selected().map_or(0, |i| i + 1);
        let footer_text = format!(
            " {}/{} | Total: {} {} | j/k: move | Enter: details ",
            position,
            self.state.items().len(),
            self.state.items().len(),
            T::RESOURCE
        );
        let footer = Paragraph::new(footer_text).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(footer, area);
    }
}

fn render_card<T: Present>(frame: &mut Frame, area: Rect, item: &T, index: usize, selected: bool) {
    let heading = item.heading(index);
    let border_style = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(Span::styled(format!(" {} ", heading.text), tone_style(heading.tone)));

    let lines: Vec<Line> = T::columns()
        .iter()
        .zip(item.row(index))
        .skip(1)
        .filter(|(_, field)| !field.is_absent())
        .map(|(label, field)| {
            Line::from(vec![
                Span::styled(format!("{label}: "), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(field.text, tone_style(field.tone)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn framed(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {title} "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_and_table_resources() {
        assert_eq!(Arrangement::for_resource(Resource::Users), Arrangement::Cards);
        assert_eq!(Arrangement::for_resource(Resource::Teams), Arrangement::Cards);
        assert_eq!(Arrangement::for_resource(Resource::Workouts), Arrangement::Cards);
        assert_eq!(Arrangement::for_resource(Resource::Activities), Arrangement::Table);
        assert_eq!(Arrangement::for_resource(Resource::Leaderboard), Arrangement::Table);
    }
}
