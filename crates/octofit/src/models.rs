//! Records served by the OctoFit API
//!
//! Records are opaque server snapshots. Decoding never fails: a missing, null
//! or oddly typed field comes through as `None` or as a fallback variant, so
//! every item of a collection yields a record. Fields that reference other
//! records may arrive nested or as a bare id/name, see [`Related`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::resource::{Record, Resource};

/// Record identifier (integer primary key or document-store id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
    /// Any other JSON value, such as `1.0`
    Other(Value),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{id}"),
            RecordId::Text(id) => f.write_str(id),
            RecordId::Other(value) => write!(f, "{value}"),
        }
    }
}

/// Numeric quantity that some backends serialize as a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
    /// Booleans, arrays and objects, shown as JSON
    Other(Value),
}

impl Amount {
    /// Only empty text and null count as absent; zero is a real value
    pub fn is_blank(&self) -> bool {
        match self {
            Amount::Number(_) => false,
            Amount::Text(s) => s.trim().is_empty(),
            Amount::Other(value) => value.is_null(),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Amount::Number(n) => write!(f, "{n}"),
            Amount::Text(s) => f.write_str(s),
            Amount::Other(value) => write!(f, "{value}"),
        }
    }
}

/// Reference to another record: either the nested object or its raw id/name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Related {
    Nested(Map<String, Value>),
    Raw(Value),
}

impl From<Value> for Related {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Related::Nested(map),
            other => Related::Raw(other),
        }
    }
}

impl Related {
    /// Display text for the reference.
    ///
    /// A nested object shows its `key` field (falling back to its id); a raw
    /// value shows itself. Null and empty strings yield `None`.
    pub fn display(&self, key: &str) -> Option<String> {
        match self {
            Related::Nested(map) => map
                .get(key)
                .and_then(scalar_text)
                .or_else(|| map.get("id").and_then(scalar_text)),
            Related::Raw(value) => scalar_text(value),
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Field decoders that accept any JSON type
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::Related;

    /// Scalars as their text; arrays, objects and null as `None`
    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
    }

    /// An array of references; any other value as `None`
    pub fn list<'de, D>(deserializer: D) -> Result<Option<Vec<Related>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => Some(items.into_iter().map(Related::from).collect()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: Option<RecordId>,
    #[serde(deserialize_with = "lenient::text")]
    pub username: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub first_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub last_name: Option<String>,
    pub team: Option<Related>,
    #[serde(deserialize_with = "lenient::text")]
    pub date_joined: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub bio: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub avatar: Option<String>,
}

impl Record for User {
    const RESOURCE: Resource = Resource::Users;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    pub id: Option<RecordId>,
    #[serde(deserialize_with = "lenient::text")]
    pub activity_type: Option<String>,
    pub user: Option<Related>,
    /// Minutes
    pub duration: Option<Amount>,
    pub calories_burned: Option<Amount>,
    #[serde(deserialize_with = "lenient::text")]
    pub date: Option<String>,
}

impl Record for Activity {
    const RESOURCE: Resource = Resource::Activities;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Team {
    pub id: Option<RecordId>,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub members: Option<Vec<Related>>,
}

impl Record for Team {
    const RESOURCE: Resource = Resource::Teams;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Workout {
    pub id: Option<RecordId>,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub workout_type: Option<String>,
    /// Free-form level; `Facile`, `Moyen` and anything harder
    #[serde(deserialize_with = "lenient::text")]
    pub difficulty: Option<String>,
    /// Minutes
    pub duration: Option<Amount>,
    pub calories_estimate: Option<Amount>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub suggested_for: Option<Vec<Related>>,
}

impl Record for Workout {
    const RESOURCE: Resource = Resource::Workouts;
}

/// One leaderboard row. The server returns entries already in rank order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardEntry {
    pub id: Option<RecordId>,
    pub user: Option<Related>,
    pub team: Option<Related>,
    pub total_calories: Option<Amount>,
    pub total_duration: Option<Amount>,
    pub score: Option<Amount>,
}

impl Record for LeaderboardEntry {
    const RESOURCE: Resource = Resource::Leaderboard;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_decodes_with_missing_fields() {
        let user: User = serde_json::from_value(json!({"id": 1, "username": "IronMan"})).unwrap();
        assert_eq!(user.id, Some(RecordId::Int(1)));
        assert_eq!(user.username.as_deref(), Some("IronMan"));
        assert!(user.email.is_none());
        assert!(user.team.is_none());
    }

    #[test]
    fn null_fields_decode_as_none() {
        let team: Team =
            serde_json::from_value(json!({"id": "64b0", "name": "Marvel", "members": null}))
                .unwrap();
        assert_eq!(team.id, Some(RecordId::Text("64b0".to_string())));
        assert!(team.members.is_none());
    }

    #[test]
    fn related_nested_shows_key() {
        let related: Related =
            serde_json::from_value(json!({"id": 3, "username": "Batman"})).unwrap();
        assert_eq!(related.display("username").as_deref(), Some("Batman"));
    }

    #[test]
    fn related_nested_without_key_falls_back_to_id() {
        let related: Related = serde_json::from_value(json!({"id": 3})).unwrap();
        assert_eq!(related.display("username").as_deref(), Some("3"));
    }

    #[test]
    fn related_raw_shows_itself() {
        let by_id: Related = serde_json::from_value(json!(7)).unwrap();
        let by_name: Related = serde_json::from_value(json!("Superman")).unwrap();
        let empty: Related = serde_json::from_value(json!("")).unwrap();
        assert_eq!(by_id.display("username").as_deref(), Some("7"));
        assert_eq!(by_name.display("username").as_deref(), Some("Superman"));
        assert!(empty.display("username").is_none());
    }

    #[test]
    fn amount_formats_integers_without_fraction() {
        assert_eq!(Amount::Number(250.0).to_string(), "250");
        assert_eq!(Amount::Number(12.5).to_string(), "12.5");
        assert_eq!(Amount::Text("30".to_string()).to_string(), "30");
    }

    #[test]
    fn amount_accepts_strings() {
        let activity: Activity =
            serde_json::from_value(json!({"duration": "45", "calories_burned": 300})).unwrap();
        assert_eq!(activity.duration, Some(Amount::Text("45".to_string())));
        assert_eq!(activity.calories_burned, Some(Amount::Number(300.0)));
    }

    #[test]
    fn zero_amounts_are_values() {
        assert!(!Amount::Number(0.0).is_blank());
        assert_eq!(Amount::Number(0.0).to_string(), "0");
        assert!(Amount::Text(" ".to_string()).is_blank());
    }

    #[test]
    fn unexpected_field_types_still_decode() {
        let user: User = serde_json::from_value(json!({
            "id": 1.0,
            "username": "IronMan",
            "first_name": 42,
            "email": ["not", "an", "email"],
            "team": true
        }))
        .unwrap();
        assert_eq!(user.id, Some(RecordId::Other(json!(1.0))));
        assert_eq!(user.first_name.as_deref(), Some("42"));
        assert!(user.email.is_none());
        assert_eq!(user.team.and_then(|t| t.display("name")).as_deref(), Some("true"));

        let workout: Workout = serde_json::from_value(json!({
            "name": "Plank",
            "duration": true,
            "suggested_for": "everyone"
        }))
        .unwrap();
        assert_eq!(workout.duration, Some(Amount::Other(json!(true))));
        assert!(workout.suggested_for.is_none());
    }
}
