//! Renderer-neutral presentation rules
//!
//! Each record type maps to a fixed set of display fields with a colour
//! intent ([`Tone`]). The CLI turns them into table cells, the TUI into table
//! rows or cards; neither decides wording or colour on its own.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::models::{Activity, Amount, LeaderboardEntry, Related, Team, User, Workout};

/// Shown where a value is missing entirely
pub const PLACEHOLDER: &str = "-";

/// Colour intent of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Primary,
    Info,
    Success,
    Warning,
    Danger,
    Muted,
    Strong,
    Gold,
    Silver,
    Bronze,
}

/// One displayed value. Empty text marks an optional field that is absent;
/// card renderers skip those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub text: String,
    pub tone: Tone,
}

impl Field {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Plain)
    }

    pub fn absent() -> Self {
        Self::plain(String::new())
    }

    pub fn is_absent(&self) -> bool {
        self.text.is_empty()
    }
}

/// Display mapping for one record type
pub trait Present {
    /// Column headers, aligned with [`Present::row`]
    fn columns() -> &'static [&'static str];

    /// Cells for the item at `index` (position in the server's order)
    fn row(&self, index: usize) -> Vec<Field>;

    /// Card title or row label
    fn heading(&self, index: usize) -> Field;

    /// Every known field as label/value pairs, for the detail pane
    fn details(&self) -> Vec<(&'static str, String)>;

    /// Rows drawn with emphasis (top of the leaderboard)
    fn highlighted(_index: usize) -> bool {
        false
    }
}

/// Leaderboard rank decoration by position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    Gold,
    Silver,
    Bronze,
    Plain(usize),
}

impl Rank {
    pub fn for_index(index: usize) -> Self {
        match index {
            0 => Rank::Gold,
            1 => Rank::Silver,
            2 => Rank::Bronze,
            n => Rank::Plain(n + 1),
        }
    }

    pub fn position(&self) -> usize {
        match self {
            Rank::Gold => 1,
            Rank::Silver => 2,
            Rank::Bronze => 3,
            Rank::Plain(n) => *n,
        }
    }

    pub fn medal(&self) -> Option<&'static str> {
        match self {
            Rank::Gold => Some("🥇"),
            Rank::Silver => Some("🥈"),
            Rank::Bronze => Some("🥉"),
            Rank::Plain(_) => None,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Rank::Gold => Tone::Gold,
            Rank::Silver => Tone::Silver,
            Rank::Bronze => Tone::Bronze,
            Rank::Plain(_) => Tone::Plain,
        }
    }

    pub fn field(&self) -> Field {
        let text = match self.medal() {
            Some(medal) => format!("{medal} {}", self.position()),
            None => self.position().to_string(),
        };
        Field::new(text, self.tone())
    }
}

/// Badge colour for a workout difficulty: `Facile` green, `Moyen` yellow,
/// anything else red.
pub fn difficulty_tone(difficulty: &str) -> Tone {
    match difficulty {
        "Facile" => Tone::Success,
        "Moyen" => Tone::Warning,
        _ => Tone::Danger,
    }
}

/// Calendar date of a server timestamp; unparsable input is shown verbatim
pub fn format_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return PLACEHOLDER.to_string();
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.date_naive().format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.date().format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

fn text(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

fn or_placeholder(value: Option<&str>) -> String {
    text(value).unwrap_or(PLACEHOLDER).to_string()
}

fn related(value: Option<&Related>, key: &str) -> Option<String> {
    value.and_then(|r| r.display(key))
}

fn related_or(value: Option<&Related>, key: &str, fallback: &str) -> String {
    related(value, key).unwrap_or_else(|| fallback.to_string())
}

fn joined(names: &[String]) -> String {
    if names.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        names.join(", ")
    }
}

fn amount_or(value: Option<&Amount>, fallback: &str) -> String {
    match value {
        Some(amount) if !amount.is_blank() => amount.to_string(),
        _ => fallback.to_string(),
    }
}

fn names(members: Option<&Vec<Related>>) -> Vec<String> {
    members
        .map(|m| m.iter().filter_map(|r| r.display("username")).collect())
        .unwrap_or_default()
}

impl Present for User {
    fn columns() -> &'static [&'static str] {
        &["Username", "Email", "First name", "Last name", "Team", "Joined"]
    }

    fn row(&self, index: usize) -> Vec<Field> {
        vec![
            self.heading(index),
            Field::plain(or_placeholder(self.email.as_deref())),
            Field::plain(text(self.first_name.as_deref()).unwrap_or_default()),
            Field::plain(text(self.last_name.as_deref()).unwrap_or_default()),
            Field::new(related(self.team.as_ref(), "name").unwrap_or_default(), Tone::Success),
            Field::plain(format_date(self.date_joined.as_deref())),
        ]
    }

    fn heading(&self, _index: usize) -> Field {
        Field::new(or_placeholder(self.username.as_deref()), Tone::Primary)
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.as_ref().map_or_else(|| PLACEHOLDER.to_string(), ToString::to_string)),
            ("Username", or_placeholder(self.username.as_deref())),
            ("Email", or_placeholder(self.email.as_deref())),
            ("First name", or_placeholder(self.first_name.as_deref())),
            ("Last name", or_placeholder(self.last_name.as_deref())),
            ("Team", related_or(self.team.as_ref(), "name", PLACEHOLDER)),
            ("Joined", format_date(self.date_joined.as_deref())),
            ("Bio", or_placeholder(self.bio.as_deref())),
            ("Avatar", or_placeholder(self.avatar.as_deref())),
        ]
    }
}

impl Present for Activity {
    fn columns() -> &'static [&'static str] {
        &["Type", "User", "Duration (min)", "Calories", "Date"]
    }

    fn row(&self, index: usize) -> Vec<Field> {
        vec![
            self.heading(index),
            Field::plain(related_or(self.user.as_ref(), "username", PLACEHOLDER)),
            Field::plain(amount_or(self.duration.as_ref(), PLACEHOLDER)),
            Field::new(amount_or(self.calories_burned.as_ref(), PLACEHOLDER), Tone::Strong),
            Field::plain(format_date(self.date.as_deref())),
        ]
    }

    fn heading(&self, _index: usize) -> Field {
        Field::new(or_placeholder(self.activity_type.as_deref()), Tone::Primary)
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.as_ref().map_or_else(|| PLACEHOLDER.to_string(), ToString::to_string)),
            ("Type", or_placeholder(self.activity_type.as_deref())),
            ("User", related_or(self.user.as_ref(), "username", PLACEHOLDER)),
            ("Duration (min)", amount_or(self.duration.as_ref(), PLACEHOLDER)),
            ("Calories", amount_or(self.calories_burned.as_ref(), PLACEHOLDER)),
            ("Date", format_date(self.date.as_deref())),
        ]
    }
}

impl Present for Team {
    fn columns() -> &'static [&'static str] {
        &["Name", "Description", "Created", "Members"]
    }

    fn row(&self, index: usize) -> Vec<Field> {
        let members = names(self.members.as_ref());
        let members = if members.is_empty() {
            Field::absent()
        } else {
            Field::plain(format!("({}) {}", members.len(), members.join(", ")))
        };

        vec![
            self.heading(index),
            Field::new(
                text(self.description.as_deref()).unwrap_or("No description"),
                Tone::Muted,
            ),
            Field::plain(format_date(self.created_at.as_deref())),
            members,
        ]
    }

    fn heading(&self, _index: usize) -> Field {
        Field::new(or_placeholder(self.name.as_deref()), Tone::Success)
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let members = names(self.members.as_ref());
        vec![
            ("ID", self.id.as_ref().map_or_else(|| PLACEHOLDER.to_string(), ToString::to_string)),
            ("Name", or_placeholder(self.name.as_deref())),
            (
                "Description",
                text(self.description.as_deref())
                    .unwrap_or("No description")
                    .to_string(),
            ),
            ("Created", format_date(self.created_at.as_deref())),
            ("Member count", members.len().to_string()),
            ("Members", joined(&members)),
        ]
    }
}

impl Present for Workout {
    fn columns() -> &'static [&'static str] {
        &["Name", "Type", "Difficulty", "Duration", "Calories (est.)", "Description"]
    }

    fn row(&self, index: usize) -> Vec<Field> {
        let difficulty = text(self.difficulty.as_deref()).unwrap_or_default();
        let duration = match &self.duration {
            Some(d) if !d.is_blank() => format!("{d} min"),
            _ => PLACEHOLDER.to_string(),
        };

        vec![
            self.heading(index),
            Field::new(or_placeholder(self.workout_type.as_deref()), Tone::Info),
            Field::new(
                if difficulty.is_empty() { PLACEHOLDER } else { difficulty },
                difficulty_tone(difficulty),
            ),
            Field::plain(duration),
            Field::new(amount_or(self.calories_estimate.as_ref(), PLACEHOLDER), Tone::Strong),
            Field::new(text(self.description.as_deref()).unwrap_or_default(), Tone::Muted),
        ]
    }

    fn heading(&self, _index: usize) -> Field {
        Field::new(or_placeholder(self.name.as_deref()), Tone::Strong)
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let suggested = names(self.suggested_for.as_ref());
        vec![
            ("ID", self.id.as_ref().map_or_else(|| PLACEHOLDER.to_string(), ToString::to_string)),
            ("Name", or_placeholder(self.name.as_deref())),
            ("Type", or_placeholder(self.workout_type.as_deref())),
            ("Difficulty", or_placeholder(self.difficulty.as_deref())),
            ("Duration (min)", amount_or(self.duration.as_ref(), PLACEHOLDER)),
            ("Calories (est.)", amount_or(self.calories_estimate.as_ref(), PLACEHOLDER)),
            ("Description", or_placeholder(self.description.as_deref())),
            ("Suggested for", joined(&suggested)),
        ]
    }
}

impl Present for LeaderboardEntry {
    fn columns() -> &'static [&'static str] {
        &["Rank", "User", "Team", "Total calories", "Total duration (min)", "Score"]
    }

    fn row(&self, index: usize) -> Vec<Field> {
        vec![
            Rank::for_index(index).field(),
            self.heading(index),
            Field::plain(related_or(self.team.as_ref(), "name", "N/A")),
            Field::plain(amount_or(self.total_calories.as_ref(), "0")),
            Field::plain(amount_or(self.total_duration.as_ref(), "0")),
            Field::plain(amount_or(self.score.as_ref(), PLACEHOLDER)),
        ]
    }

    fn heading(&self, _index: usize) -> Field {
        Field::new(
            related_or(self.user.as_ref(), "username", PLACEHOLDER),
            Tone::Strong,
        )
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.as_ref().map_or_else(|| PLACEHOLDER.to_string(), ToString::to_string)),
            ("User", related_or(self.user.as_ref(), "username", PLACEHOLDER)),
            ("Team", related_or(self.team.as_ref(), "name", "N/A")),
            ("Total calories", amount_or(self.total_calories.as_ref(), "0")),
            ("Total duration (min)", amount_or(self.total_duration.as_ref(), "0")),
            ("Score", amount_or(self.score.as_ref(), PLACEHOLDER)),
        ]
    }

    fn highlighted(index: usize) -> bool {
        index < 3
    }
}
