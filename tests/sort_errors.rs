//! Sort Error Tests
//!
//! - Field rules on element types without fields
//! - Fallible comparators and key extractors
//! - Panics inside rules are not swallowed

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use serde_json::{json, Value};
use vanilla_sort::sort::FieldProbe;
use vanilla_sort::{using, Direction, Record, SortError, SortResult};

use Direction::Ascending;

// =============================================================================
// Test Types
// =============================================================================

/// An element type with no fields
#[derive(Debug, Clone, PartialEq)]
struct Opaque(u32);

impl Record for Opaque {}

/// An element type exposing its fields by name
#[derive(Debug, Clone, PartialEq)]
struct City {
    name: &'static str,
    population: u64,
}

impl Record for City {
    fn field(&self, name: &str) -> SortResult<FieldProbe<'_>> {
        Ok(match name {
            "name" => Some(Cow::Owned(json!(self.name))),
            "population" => Some(Cow::Owned(json!(self.population))),
            _ => None,
        })
    }
}

#[derive(Debug, PartialEq)]
struct Incomparable {
    left: i32,
    right: i32,
}

impl fmt::Display for Incomparable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot compare {} with {}", self.left, self.right)
    }
}

impl std::error::Error for Incomparable {}

// =============================================================================
// Invalid Rule Kind
// =============================================================================

/// A field rule on a fieldless type fails once elements are compared.
#[test]
fn test_field_rule_on_fieldless_type() {
    let err = using(vec![Opaque(2), Opaque(1)])
        .by_field("id", Ascending)
        .get()
        .unwrap_err();

    assert_eq!(err.code(), "SORT_INVALID_RULE_KIND");
    match err {
        SortError::InvalidRuleKind { field, element_type } => {
            assert_eq!(field, "id");
            assert!(element_type.ends_with("Opaque"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

/// Nothing is compared for fewer than two elements, so nothing fails.
#[test]
fn test_field_rule_on_single_fieldless_element() {
    let sorted = using(vec![Opaque(1)])
        .by_field("id", Ascending)
        .get()
        .unwrap();
    assert_eq!(sorted.into_values(), vec![Opaque(1)]);
}

/// Custom records take part in field rules.
#[test]
fn test_custom_record_fields() {
    let cities = vec![
        City { name: "Rotterdam", population: 600000 },
        City { name: "Amsterdam", population: 750000 },
        City { name: "Berlin", population: 600000 },
    ];

    let sorted = using(cities)
        .by_field("population", Direction::Descending)
        .by_field("name", Ascending)
        .get()
        .unwrap();

    let names: Vec<_> = sorted.values().map(|c| c.name).collect();
    assert_eq!(names, vec!["Amsterdam", "Berlin", "Rotterdam"]);
}

// =============================================================================
// Fallible Rules
// =============================================================================

/// A comparator error aborts the sort and stays downcastable.
#[test]
fn test_comparator_error_propagates() {
    let err = using(vec![1, 2, -1, 4])
        .try_by_comparator(
            |a: &i32, b: &i32| {
                if *a < 0 || *b < 0 {
                    Err(Incomparable { left: *a, right: *b })
                } else {
                    Ok(a.cmp(b))
                }
            },
            Ascending,
        )
        .get()
        .unwrap_err();

    assert_eq!(err.code(), "SORT_RULE_FAILED");
    assert!(err.to_string().starts_with("Rule evaluation failed: cannot compare"));

    let source = err.into_rule_error().unwrap();
    let original = source.downcast_ref::<Incomparable>().unwrap();
    assert!(original.left == -1 || original.right == -1);
}

/// A key extractor error aborts the sort.
#[test]
fn test_key_error_propagates() {
    let input = vec![json!({"n": "3"}), json!({"n": "x"}), json!({"n": "1"})];

    let err = using(input)
        .try_by_key(
            |v: &Value| v["n"].as_str().unwrap_or_default().parse::<i64>(),
            Ascending,
        )
        .get()
        .unwrap_err();

    let source = err.into_rule_error().unwrap();
    assert!(source.downcast_ref::<std::num::ParseIntError>().is_some());
}

/// Fallible rules that succeed behave like infallible ones.
#[test]
fn test_successful_fallible_rules() {
    let sorted = using(vec!["10", "9", "100"])
        .try_by_key(|s: &&str| s.parse::<u32>(), Ascending)
        .get()
        .unwrap();
    assert_eq!(sorted.into_values(), vec!["9", "10", "100"]);
}

/// String errors are accepted as rule failures.
#[test]
fn test_string_error_from_comparator() {
    let err = using(vec![2, 1])
        .try_by_comparator(|_: &i32, _: &i32| Err::<Ordering, _>("refused"), Ascending)
        .get()
        .unwrap_err();
    assert_eq!(err.to_string(), "Rule evaluation failed: refused");
}

/// Rules never run for an empty input.
#[test]
fn test_empty_input_never_calls_rules() {
    let sorted = using(Vec::<i32>::new())
        .try_by_comparator(|_: &i32, _: &i32| Err::<Ordering, _>("unreachable"), Ascending)
        .get()
        .unwrap();
    assert!(sorted.is_empty());
}

// =============================================================================
// Panics
// =============================================================================

/// A panicking comparator unwinds through the sort unchanged.
#[test]
#[should_panic(expected = "comparator exploded")]
fn test_comparator_panic_propagates() {
    let _ = using(vec![1, 2])
        .by_comparator(|_: &i32, _: &i32| panic!("comparator exploded"), Ascending)
        .get();
}
