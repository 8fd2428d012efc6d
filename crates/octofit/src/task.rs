//! Background fetches tied to a view's lifetime
//!
//! A view spawns one [`FetchTask`] when it mounts and owns the handle. Dropping
//! the handle (unmounting the view) aborts the request, and every outcome
//! carries the mount generation so a consumer can discard results that arrive
//! for a view that no longer exists.

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{Activity, LeaderboardEntry, Team, User, Workout};
use crate::resource::{Record, Resource};

/// A fetched collection, typed by resource
#[derive(Debug, Clone, PartialEq)]
pub enum Collection {
    Users(Vec<User>),
    Activities(Vec<Activity>),
    Teams(Vec<Team>),
    Leaderboard(Vec<LeaderboardEntry>),
    Workouts(Vec<Workout>),
}

impl Collection {
    pub fn resource(&self) -> Resource {
        match self {
            Collection::Users(_) => Resource::Users,
            Collection::Activities(_) => Resource::Activities,
            Collection::Teams(_) => Resource::Teams,
            Collection::Leaderboard(_) => Resource::Leaderboard,
            Collection::Workouts(_) => Resource::Workouts,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Collection::Users(items) => items.len(),
            Collection::Activities(items) => items.len(),
            Collection::Teams(items) => items.len(),
            Collection::Leaderboard(items) => items.len(),
            Collection::Workouts(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Record types that can be pulled back out of a [`Collection`]
pub trait Collected: Record + Sized {
    fn from_collection(collection: Collection) -> Option<Vec<Self>>;
}

macro_rules! collected {
    ($record:ty, $variant:ident) => {
        impl Collected for $record {
            fn from_collection(collection: Collection) -> Option<Vec<Self>> {
                match collection {
                    Collection::$variant(items) => Some(items),
                    _ => None,
                }
            }
        }
    };
}

collected!(User, Users);
collected!(Activity, Activities);
collected!(Team, Teams);
collected!(LeaderboardEntry, Leaderboard);
collected!(Workout, Workouts);

impl ApiClient {
    /// Fetch the collection behind `resource`
    pub async fn fetch_collection(&self, resource: Resource) -> Result<Collection> {
        Ok(match resource {
            Resource::Users => Collection::Users(self.fetch().await?),
            Resource::Activities => Collection::Activities(self.fetch().await?),
            Resource::Teams => Collection::Teams(self.fetch().await?),
            Resource::Leaderboard => Collection::Leaderboard(self.fetch().await?),
            Resource::Workouts => Collection::Workouts(self.fetch().await?),
        })
    }
}

/// Result of one view's fetch
#[derive(Debug)]
pub struct FetchOutcome {
    pub resource: Resource,
    /// Mount generation the fetch was started for
    pub generation: u64,
    pub result: Result<Collection>,
}

/// Handle to an in-flight fetch; aborts the request when dropped
#[derive(Debug)]
pub struct FetchTask {
    resource: Resource,
    generation: u64,
    handle: JoinHandle<()>,
}

impl FetchTask {
    /// Start the single fetch for a freshly mounted view.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        client: ApiClient,
        resource: Resource,
        generation: u64,
        tx: UnboundedSender<FetchOutcome>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let result = client.fetch_collection(resource).await;
            // Receiver gone means the UI is shutting down
            let _ = tx.send(FetchOutcome {
                resource,
                generation,
                result,
            });
        });

        Self {
            resource,
            generation,
            handle,
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for FetchTask {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            debug!(
                "Cancelling {} fetch (generation {})",
                self.resource, self.generation
            );
            self.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_reports_its_resource() {
        let collection = Collection::Workouts(vec![Workout::default(), Workout::default()]);
        assert_eq!(collection.resource(), Resource::Workouts);
        assert_eq!(collection.len(), 2);
        assert!(!collection.is_empty());
    }

    #[test]
    fn records_come_back_out_of_matching_collection() {
        let teams = vec![Team {
            name: Some("Marvel".to_string()),
            ..Team::default()
        }];
        let collection = Collection::Teams(teams.clone());
        assert_eq!(Team::from_collection(collection.clone()), Some(teams));
        assert_eq!(User::from_collection(collection), None);
    }
}
