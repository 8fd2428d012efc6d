//! Response-shape normalization
//!
//! Collection endpoints answer either with a plain JSON array or with a
//! paginated envelope `{ "results": [...], "count", "next", "previous" }`.
//! The body is decoded once into [`Envelope`] and every consumer works with
//! the resulting item list.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::error::{OctofitError, Result};
use crate::resource::Record;

/// Paginated envelope. Only `results` is required to recognize the shape.
///
/// Only the first page is ever shown; `count` and `next` tell whether more
/// items exist on the server.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub results: Value,
    pub count: Option<u64>,
    pub next: Option<String>,
}

/// Every body shape a collection endpoint can produce
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Paginated(Page),
    Plain(Vec<Value>),
    /// Object without `results`, string, number, bool or null
    Unrecognized(Value),
}

impl From<Value> for Envelope {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Envelope::Plain(items),
            Value::Object(mut map) if map.contains_key("results") => {
                let results = map.remove("results").unwrap_or(Value::Null);
                Envelope::Paginated(Page {
                    results,
                    count: map.get("count").and_then(Value::as_u64),
                    next: map.get("next").and_then(Value::as_str).map(str::to_string),
                })
            }
            other => Envelope::Unrecognized(other),
        }
    }
}

impl<'de> Deserialize<'de> for Envelope {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Envelope::from)
    }
}

impl Envelope {
    /// Parse a response body
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| OctofitError::Fetch(format!("Invalid JSON: {e}")))
    }

    /// The item collection. Shapes that do not yield an array normalize to an
    /// empty list.
    pub fn into_items(self) -> Vec<Value> {
        match self {
            Envelope::Paginated(Page {
                results: Value::Array(items),
                ..
            }) => items,
            Envelope::Paginated(_) => Vec::new(),
            Envelope::Plain(items) => items,
            Envelope::Unrecognized(_) => Vec::new(),
        }
    }

    /// Further pages the server holds beyond this response, as
    /// `(total count, next page URL)`
    pub fn truncation(&self) -> Option<(Option<u64>, &str)> {
        match self {
            Envelope::Paginated(Page {
                count,
                next: Some(next),
                ..
            }) => Some((*count, next.as_str())),
            _ => None,
        }
    }

    /// Decode the normalized items into typed records, one per item.
    ///
    /// Items that are not objects become empty records so the item count is
    /// preserved.
    pub fn into_records<R: Record>(self) -> Vec<R> {
        self.into_items()
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                if !item.is_object() {
                    warn!("{} item at index {} is not an object", R::RESOURCE, index);
                    return R::default();
                }
                serde_json::from_value(item).unwrap_or_else(|e| {
                    warn!("Failed to decode {} item at index {}: {}", R::RESOURCE, index, e);
                    R::default()
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Workout;
    use serde_json::json;

    fn envelope(value: Value) -> Envelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn single_item_array_is_plain() {
        let env = envelope(json!([{"id": 1}]));
        assert!(matches!(env, Envelope::Plain(_)));
        assert_eq!(env.into_items().len(), 1);
    }

    #[test]
    fn plain_array_is_used_as_is() {
        let env = envelope(json!([{"id": 1}, {"id": 2}]));
        assert!(matches!(env, Envelope::Plain(_)));
        assert_eq!(env.into_items().len(), 2);
    }

    #[test]
    fn paginated_results_are_extracted() {
        let env = envelope(json!({
            "count": 2,
            "next": null,
            "previous": null,
            "results": [{"id": 1}, {"id": 2}]
        }));
        match &env {
            Envelope::Paginated(page) => assert_eq!(page.count, Some(2)),
            other => panic!("expected paginated envelope, got {other:?}"),
        }
        assert_eq!(env.into_items(), vec![json!({"id": 1}), json!({"id": 2})]);
    }

    #[test]
    fn both_shapes_normalize_identically() {
        let items = json!([{"id": 1, "name": "Burpees"}]);
        let plain = envelope(items.clone()).into_items();
        let paged = envelope(json!({"results": items})).into_items();
        assert_eq!(plain, paged);
    }

    #[test]
    fn bare_object_normalizes_to_empty() {
        let env = envelope(json!({"detail": "ok"}));
        assert!(matches!(env, Envelope::Unrecognized(_)));
        assert!(env.into_items().is_empty());
    }

    #[test]
    fn non_array_results_normalize_to_empty() {
        assert!(envelope(json!({"results": {"id": 1}})).into_items().is_empty());
        assert!(envelope(json!({"results": null})).into_items().is_empty());
    }

    #[test]
    fn scalars_normalize_to_empty() {
        for value in [json!(null), json!(42), json!("text"), json!(true)] {
            assert!(envelope(value).into_items().is_empty());
        }
    }

    #[test]
    fn invalid_json_is_fetch_error() {
        let err = Envelope::from_slice(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, OctofitError::Fetch(_)));
    }

    #[test]
    fn records_decode_from_envelope() {
        let env = envelope(json!({
            "results": [{"id": 1, "name": "Burpees", "difficulty": "Difficile"}]
        }));
        let workouts: Vec<Workout> = env.into_records();
        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts[0].name.as_deref(), Some("Burpees"));
    }

    #[test]
    fn non_object_item_keeps_its_slot() {
        let env = envelope(json!([{"id": 1, "name": "Burpees"}, 5, "Yoga"]));
        let workouts = env.into_records::<Workout>();
        assert_eq!(workouts.len(), 3);
        assert_eq!(workouts[0].name.as_deref(), Some("Burpees"));
        assert_eq!(workouts[1], Workout::default());
        assert_eq!(workouts[2], Workout::default());
    }

    #[test]
    fn truncation_reported_only_when_next_page_exists() {
        let more = envelope(json!({"count": 40, "next": "http://api/?page=2", "results": []}));
        assert_eq!(more.truncation(), Some((Some(40), "http://api/?page=2")));

        let last = envelope(json!({"count": 2, "next": null, "results": []}));
        assert!(last.truncation().is_none());
        assert!(envelope(json!([])).truncation().is_none());
    }
}
