//! Application state and logic

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use octofit::models::{Activity, LeaderboardEntry, Team, User, Workout};
use octofit::present::Present;
use octofit::{ApiClient, Collection, FetchOutcome, FetchTask, Resource, Result};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Tabs},
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use crate::views::{DetailView, HomeView, ResourceView, centered_rect};

/// Navigation tabs, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Resource(Resource),
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Home,
        Tab::Resource(Resource::Users),
        Tab::Resource(Resource::Activities),
        Tab::Resource(Resource::Teams),
        Tab::Resource(Resource::Leaderboard),
        Tab::Resource(Resource::Workouts),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Resource(resource) => resource.tab_label(),
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|tab| tab == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// The view mounted under the current tab
enum ActiveView {
    Home,
    Users(ResourceView<User>),
    Activities(ResourceView<Activity>),
    Teams(ResourceView<Team>),
    Leaderboard(ResourceView<LeaderboardEntry>),
    Workouts(ResourceView<Workout>),
}

impl ActiveView {
    fn mount(task: FetchTask) -> Self {
        match task.resource() {
            Resource::Users => ActiveView::Users(ResourceView::new(task)),
            Resource::Activities => ActiveView::Activities(ResourceView::new(task)),
            Resource::Teams => ActiveView::Teams(ResourceView::new(task)),
            Resource::Leaderboard => ActiveView::Leaderboard(ResourceView::new(task)),
            Resource::Workouts => ActiveView::Workouts(ResourceView::new(task)),
        }
    }

    fn resolve(&mut self, result: Result<Collection>) {
        match self {
            ActiveView::Home => {}
            ActiveView::Users(view) => view.resolve(result),
            ActiveView::Activities(view) => view.resolve(result),
            ActiveView::Teams(view) => view.resolve(result),
            ActiveView::Leaderboard(view) => view.resolve(result),
            ActiveView::Workouts(view) => view.resolve(result),
        }
    }

    fn next(&mut self) {
        match self {
            ActiveView::Home => {}
            ActiveView::Users(view) => view.next(),
            ActiveView::Activities(view) => view.next(),
            ActiveView::Teams(view) => view.next(),
            ActiveView::Leaderboard(view) => view.next(),
            ActiveView::Workouts(view) => view.next(),
        }
    }

    fn previous(&mut self) {
        match self {
            ActiveView::Home => {}
            ActiveView::Users(view) => view.previous(),
            ActiveView::Activities(view) => view.previous(),
            ActiveView::Teams(view) => view.previous(),
            ActiveView::Leaderboard(view) => view.previous(),
            ActiveView::Workouts(view) => view.previous(),
        }
    }

    fn detail(&self) -> Option<DetailView> {
        match self {
            ActiveView::Home => None,
            ActiveView::Users(view) => detail_for(view),
            ActiveView::Activities(view) => detail_for(view),
            ActiveView::Teams(view) => detail_for(view),
            ActiveView::Leaderboard(view) => detail_for(view),
            ActiveView::Workouts(view) => detail_for(view),
        }
    }

    fn is_fetching(&self) -> bool {
        match self {
            ActiveView::Home => false,
            ActiveView::Users(view) => view.is_fetching(),
            ActiveView::Activities(view) => view.is_fetching(),
            ActiveView::Teams(view) => view.is_fetching(),
            ActiveView::Leaderboard(view) => view.is_fetching(),
            ActiveView::Workouts(view) => view.is_fetching(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, tick: usize, api_root: &str) {
        match self {
            ActiveView::Home => HomeView::render(frame, area, api_root),
            ActiveView::Users(view) => view.render(frame, area, tick),
            ActiveView::Activities(view) => view.render(frame, area, tick),
            ActiveView::Teams(view) => view.render(frame, area, tick),
            ActiveView::Leaderboard(view) => view.render(frame, area, tick),
            ActiveView::Workouts(view) => view.render(frame, area, tick),
        }
    }
}

fn detail_for<T: octofit::Collected + Present>(view: &ResourceView<T>) -> Option<DetailView> {
    view.selected()
        .map(|(index, item)| DetailView::new(item.heading(index).text, item.details()))
}

/// Main application state
pub struct App {
    /// Whether the app should exit
    pub should_quit: bool,
    client: ApiClient,
    api_root: String,
    tab: Tab,
    view: ActiveView,
    detail: Option<DetailView>,
    /// Bumped on every mount; outcomes for older mounts are discarded
    generation: u64,
    tick: usize,
    fetch_tx: UnboundedSender<FetchOutcome>,
}

impl App {
    pub fn new(client: ApiClient, fetch_tx: UnboundedSender<FetchOutcome>) -> Self {
        let api_root = client.base_url().to_string();
        Self {
            should_quit: false,
            client,
            api_root,
            tab: Tab::Home,
            view: ActiveView::Home,
            detail: None,
            generation: 0,
            tick: 0,
            fetch_tx,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_fetching(&self) -> bool {
        self.view.is_fetching()
    }

    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    /// Tear down the current view and mount the one for `tab`. Resource tabs
    /// start a fresh fetch each time they are mounted.
    ///
    /// Must be called from within a tokio runtime.
    pub fn select_tab(&mut self, tab: Tab) {
        if tab == self.tab {
            return;
        }

        self.detail = None;
        self.tab = tab;
        self.generation += 1;

        // Replacing the view drops its fetch handle, aborting the request
        self.view = match tab {
            Tab::Home => ActiveView::Home,
            Tab::Resource(resource) => {
                info!("Mounting {} view (generation {})", resource, self.generation);
                ActiveView::mount(FetchTask::spawn(
                    self.client.clone(),
                    resource,
                    self.generation,
                    self.fetch_tx.clone(),
                ))
            }
        };
    }

    pub fn handle_outcome(&mut self, outcome: FetchOutcome) {
        if outcome.generation != self.generation {
            debug!(
                "Discarding {} outcome for generation {} (current {})",
                outcome.resource, outcome.generation, self.generation
            );
            return;
        }

        if let Err(e) = &outcome.result {
            info!("Fetching {} failed: {}", outcome.resource, e);
        }
        self.view.resolve(outcome.result);
    }

    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        if self.detail.is_some() {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.detail = None,
                KeyCode::Char('j') | KeyCode::Down => {
                    if let Some(detail) = self.detail.as_mut() {
                        detail.scroll_down();
                    }
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    if let Some(detail) = self.detail.as_mut() {
                        detail.scroll_up();
                    }
                }
                KeyCode::Char('q') => self.quit(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.select_tab(self.tab.next()),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.select_tab(self.tab.previous())
            }
            KeyCode::Char(c @ '1'..='6') => {
                let index = c as usize - '1' as usize;
                self.select_tab(Tab::ALL[index]);
            }
            KeyCode::Char('j') | KeyCode::Down => self.view.next(),
            KeyCode::Char('k') | KeyCode::Up => self.view.previous(),
            KeyCode::Enter => self.detail = self.view.detail(),
            _ => {}
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let [header, main, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_header(frame, header);
        self.view.render(frame, main, self.tick, &self.api_root);
        self.render_footer(frame, footer);

        if let Some(detail) = &self.detail {
            detail.render(frame, centered_rect(70, 70, main));
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.label())))
            .collect();

        let tabs = Tabs::new(titles)
            .select(self.tab.index())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(" OctoFit Tracker "),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let help = if self.detail.is_some() {
            " Esc: close | j/k: scroll | q: quit "
        } else {
            " 1-6/Tab: switch view | j/k: move | Enter: details | q: quit "
        };
        let footer = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(footer, area);
    }
}
