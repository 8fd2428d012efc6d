//! API collections the dashboard can display

use serde::de::DeserializeOwned;
use std::fmt;
use std::str::FromStr;

use crate::error::OctofitError;

/// One API collection endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Users,
    Activities,
    Teams,
    Leaderboard,
    Workouts,
}

impl Resource {
    /// Navigation order
    pub const ALL: [Resource; 5] = [
        Resource::Users,
        Resource::Activities,
        Resource::Teams,
        Resource::Leaderboard,
        Resource::Workouts,
    ];

    /// Collection name as it appears in the URL
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Activities => "activities",
            Resource::Teams => "teams",
            Resource::Leaderboard => "leaderboard",
            Resource::Workouts => "workouts",
        }
    }

    /// Path relative to the API root, always with a trailing slash
    pub fn path(&self) -> String {
        format!("api/{}/", self.as_str())
    }

    pub fn title(&self) -> &'static str {
        match self {
            Resource::Users => "Users",
            Resource::Activities => "Activities",
            Resource::Teams => "Teams",
            Resource::Leaderboard => "Competitive Leaderboard",
            Resource::Workouts => "Suggested Workouts",
        }
    }

    pub fn tab_label(&self) -> &'static str {
        match self {
            Resource::Users => "Users",
            Resource::Activities => "Activities",
            Resource::Teams => "Teams",
            Resource::Leaderboard => "Leaderboard",
            Resource::Workouts => "Workouts",
        }
    }

    pub fn loading_label(&self) -> String {
        format!("Loading {}...", self.as_str())
    }

    pub fn empty_notice(&self) -> &'static str {
        match self {
            Resource::Users => "No users available.",
            Resource::Activities => "No activities available.",
            Resource::Teams => "No teams available.",
            Resource::Leaderboard => "No leaderboard data available.",
            Resource::Workouts => "No workouts available.",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = OctofitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_matches('/').to_ascii_lowercase();
        Resource::ALL
            .into_iter()
            .find(|r| r.as_str() == name)
            .ok_or_else(|| {
                OctofitError::Config(format!(
                    "Unknown resource: {s}. Use users, activities, teams, leaderboard, or workouts."
                ))
            })
    }
}

/// A record type served by exactly one collection endpoint
pub trait Record: DeserializeOwned + Default + Send + 'static {
    const RESOURCE: Resource;
}
