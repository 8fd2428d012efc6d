use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use octofit::models::{Activity, LeaderboardEntry, Team, User, Workout};
use octofit::present::Present;
use octofit::{ApiClient, Record, Resource, ViewState};

use crate::error::CliResult;
use crate::output::{OutputFormat, render_view};

/// Fetch one collection and print it
pub struct ListCommand {
    pub resource: Resource,
}

impl ListCommand {
    pub fn new(resource: Resource) -> Self {
        Self { resource }
    }

    pub async fn execute(&self, client: &ApiClient, format: OutputFormat) -> CliResult<()> {
        match format {
            OutputFormat::Json => {
                println!("{}", self.render_json(client).await?);
                Ok(())
            }
            OutputFormat::Table => {
                let spinner = spinner(self.resource)?;
                let result = self.render(client).await;
                spinner.finish_and_clear();

                let output = result?;
                println!("{output}");
                Ok(())
            }
        }
    }

    /// Run the view lifecycle and return the rendered text. A failed fetch is
    /// returned as the error so the process exits non-zero.
    pub async fn render(&self, client: &ApiClient) -> CliResult<String> {
        match self.resource {
            Resource::Users => load::<User>(client).await,
            Resource::Activities => load::<Activity>(client).await,
            Resource::Teams => load::<Team>(client).await,
            Resource::Leaderboard => load::<LeaderboardEntry>(client).await,
            Resource::Workouts => load::<Workout>(client).await,
        }
    }
}

impl ListCommand {
    /// The normalized item array as pretty JSON, whatever envelope the
    /// endpoint used
    pub async fn render_json(&self, client: &ApiClient) -> CliResult<String> {
        let items = client.fetch_values(self.resource).await?;
        Ok(serde_json::to_string_pretty(&items)?)
    }
}

async fn load<R: Record + Present>(client: &ApiClient) -> CliResult<String> {
    let mut state = ViewState::<R>::new();
    state.resolve(client.fetch::<R>().await);

    match state.error() {
        Some(message) => Err(message.into()),
        None => Ok(render_view(R::RESOURCE, &state)),
    }
}

fn spinner(resource: Resource) -> CliResult<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .map_err(|e| format!("Progress bar error: {e}"))?;
    pb.set_style(style);
    pb.set_message(resource.loading_label());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}
