//! Event types for the TUI

use std::time::Duration;

use crossterm::event::{Event as TermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use octofit::FetchOutcome;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{Interval, MissedTickBehavior};

/// Events that can occur in the TUI
#[derive(Debug)]
pub enum Event {
    /// A key was pressed
    Key(KeyEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Redraw tick, drives the loading spinner
    Tick,
    /// A view's fetch finished
    Fetched(FetchOutcome),
}

/// Merges terminal input, ticks and fetch outcomes into one stream
pub struct EventHandler {
    terminal: EventStream,
    ticker: Interval,
    fetched: UnboundedReceiver<FetchOutcome>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration, fetched: UnboundedReceiver<FetchOutcome>) -> Self {
        let mut ticker = tokio::time::interval(tick_rate);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            terminal: EventStream::new(),
            ticker,
            fetched,
        }
    }

    /// Wait for the next event. `None` once the terminal stream has ended.
    pub async fn next(&mut self) -> anyhow::Result<Option<Event>> {
        loop {
            tokio::select! {
                Some(outcome) = self.fetched.recv() => return Ok(Some(Event::Fetched(outcome))),
                _ = self.ticker.tick() => return Ok(Some(Event::Tick)),
                event = self.terminal.next() => match event {
                    Some(Ok(TermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        return Ok(Some(Event::Key(key)));
                    }
                    Some(Ok(TermEvent::Resize(width, height))) => {
                        return Ok(Some(Event::Resize(width, height)));
                    }
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => return Err(e.into()),
                    None => return Ok(None),
                },
            }
        }
    }
}
