//! JSON documents as sort input
//!
//! Arrays are keyed by index and come back as arrays; objects are keyed by
//! member name and come back as objects with their members reordered. A
//! scalar document is treated as a one-element list and `null` as an empty
//! one.

use std::fmt;

use serde_json::{Map, Value};

use super::errors::SortResult;
use super::rule::{Direction, SortSpec};
use super::session::{SortSession, SortStats, Sorted};

/// Identity of a JSON element inside its container
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JsonKey {
    /// Position in an array
    Index(usize),
    /// Member name in an object
    Name(String),
}

impl fmt::Display for JsonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonKey::Index(i) => write!(f, "{}", i),
            JsonKey::Name(name) => write!(f, "{}", name),
        }
    }
}

/// Container shape of a JSON document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Array,
    Object,
}

impl JsonShape {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => JsonShape::Object,
            _ => JsonShape::Array,
        }
    }
}

/// Starts a sort session over the elements of a JSON document.
pub fn using_json<'a>(document: Value) -> SortSession<'a, Value, JsonKey> {
    let entries: Vec<(JsonKey, Value)> = match document {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, v)| (JsonKey::Index(i), v))
            .collect(),
        Value::Object(members) => members
            .into_iter()
            .map(|(name, v)| (JsonKey::Name(name), v))
            .collect(),
        scalar => vec![(JsonKey::Index(0), scalar)],
    };
    SortSession::using_entries(entries)
}

impl Sorted<JsonKey, Value> {
    /// Rebuilds a document in the given shape.
    ///
    /// Objects keep each value under its original member name; index keys
    /// become their decimal form.
    pub fn into_json_as(self, shape: JsonShape) -> Value {
        match shape {
            JsonShape::Array => Value::Array(self.into_values()),
            JsonShape::Object => {
                let members: Map<String, Value> = self
                    .into_entries()
                    .into_iter()
                    .map(|(key, v)| (key.to_string(), v))
                    .collect();
                Value::Object(members)
            }
        }
    }

    /// Rebuilds a document, as an object when every key is a member name.
    ///
    /// The shape is inferred from the keys, so an empty result always comes
    /// back as `[]`. Use [`Sorted::into_json_as`] with [`JsonShape::of`] the
    /// input to keep an empty object an object.
    pub fn into_json(self) -> Value {
        let named = !self.is_empty() && self.keys().all(|key| matches!(key, JsonKey::Name(_)));
        let shape = if named { JsonShape::Object } else { JsonShape::Array };
        self.into_json_as(shape)
    }
}

/// Sorts a JSON document by field specs and returns it in its input shape.
pub fn sort_json(document: Value, specs: &[SortSpec], direction: Direction) -> SortResult<(Value, SortStats)> {
    let shape = JsonShape::of(&document);
    let session = specs.iter().fold(using_json(document), |session, spec| {
        session.by_field(spec.field.as_str(), spec.direction)
    });

    let sorted = session.into_sorted(direction)?;
    let stats = sorted.stats();
    Ok((sorted.into_json_as(shape), stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_document() {
        let (sorted, stats) = sort_json(
            json!([{"n": 3}, {"n": 1}, {"n": 2}]),
            &[SortSpec::asc("n")],
            Direction::Ascending,
        )
        .unwrap();
        assert_eq!(sorted, json!([{"n": 1}, {"n": 2}, {"n": 3}]));
        assert_eq!(stats.elements, 3);
    }

    #[test]
    fn test_object_document_keeps_member_names() {
        let doc = json!({
            "berlin": {"population": 3000000},
            "bonn": {"population": 330000},
            "hamburg": {"population": 1800000}
        });
        let (sorted, _) = sort_json(doc, &[SortSpec::desc("population")], Direction::Ascending).unwrap();

        let names: Vec<&String> = sorted.as_object().unwrap().keys().collect();
        assert_eq!(names, vec!["berlin", "hamburg", "bonn"]);
        assert_eq!(sorted["bonn"], json!({"population": 330000}));
    }

    #[test]
    fn test_empty_object_stays_object() {
        let (sorted, _) = sort_json(json!({}), &[], Direction::Ascending).unwrap();
        assert_eq!(sorted, json!({}));
    }

    #[test]
    fn test_scalar_and_null_documents() {
        let (sorted, _) = sort_json(json!(5), &[], Direction::Ascending).unwrap();
        assert_eq!(sorted, json!([5]));

        let (sorted, _) = sort_json(Value::Null, &[], Direction::Descending).unwrap();
        assert_eq!(sorted, json!([]));
    }

    #[test]
    fn test_into_json_detects_shape() {
        let sorted = using_json(json!({"b": 2, "a": 1}))
            .by_key(|v: &Value| v.clone(), Direction::Ascending)
            .get()
            .unwrap();
        assert_eq!(sorted.keys().map(|k| k.to_string()).collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(sorted.into_json(), json!({"a": 1, "b": 2}));

        let sorted = using_json(json!([2, 1])).get_in(Direction::Descending).unwrap();
        assert_eq!(sorted.into_json(), json!([1, 2]));
    }

    #[test]
    fn test_empty_object_shape_needs_explicit_shape() {
        let document = json!({});
        let shape = JsonShape::of(&document);

        let sorted = using_json(document.clone()).get().unwrap();
        assert_eq!(sorted.into_json(), json!([]));

        let sorted = using_json(document).get().unwrap();
        assert_eq!(sorted.into_json_as(shape), json!({}));
    }
}
