//! TUI view components

pub mod detail;
pub mod home;
pub mod resource;

pub use detail::DetailView;
pub use home::HomeView;
pub use resource::{Arrangement, ResourceView};

use octofit::present::Tone;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}

pub fn tone_style(tone: Tone) -> Style {
    let style = Style::default();
    match tone {
        Tone::Plain => style,
        Tone::Primary => style.fg(Color::Blue),
        Tone::Info => style.fg(Color::Cyan),
        Tone::Success => style.fg(Color::Green),
        Tone::Warning => style.fg(Color::Yellow),
        Tone::Danger => style.fg(Color::Red),
        Tone::Muted => style.fg(Color::DarkGray),
        Tone::Strong => style.add_modifier(Modifier::BOLD),
        Tone::Gold => style.fg(Color::Yellow).add_modifier(Modifier::BOLD),
        Tone::Silver => style.fg(Color::Gray).add_modifier(Modifier::BOLD),
        Tone::Bronze => style.fg(Color::Rgb(205, 127, 50)).add_modifier(Modifier::BOLD),
    }
}

/// Rectangle of the given percentage size, centered in `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [area] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(area);
    area
}
