//! OctoFit TUI - terminal dashboard for the OctoFit API

pub mod app;
pub mod event;
pub mod tui;
pub mod views;

pub use app::{App, Tab};
pub use event::{Event, EventHandler};
pub use tui::Tui;

use std::time::Duration;

use octofit::ApiClient;
use tokio::sync::mpsc;

const TICK_RATE: Duration = Duration::from_millis(120);

/// Run the dashboard until the user quits
pub async fn run(client: ApiClient) -> anyhow::Result<()> {
    let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
    let mut app = App::new(client, fetch_tx);
    let mut events = EventHandler::new(TICK_RATE, fetch_rx);

    let mut tui = Tui::new()?;
    tui.enter()?;

    while !app.should_quit {
        tui.terminal().draw(|frame| app.render(frame))?;

        match events.next().await? {
            Some(Event::Key(key)) => app.handle_key(key),
            Some(Event::Fetched(outcome)) => app.handle_outcome(outcome),
            Some(Event::Tick) => app.tick(),
            Some(Event::Resize(_, _)) => {}
            None => break,
        }
    }

    tui.exit()?;
    Ok(())
}
