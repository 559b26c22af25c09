//! Ordering rules and their normalization
//!
//! A rule comes in one of three shapes, declared by the caller:
//! - `Field`: read a named member from each element
//! - `Key`: extract a key from each element
//! - `Comparator`: compare two elements directly
//!
//! [`normalize`] turns any of them, plus a [`Direction`], into a single
//! two-argument comparator with the direction already folded in.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::{BoxError, SortError, SortResult};
use super::loose::{loose_cmp_opt, SortKey};
use super::record::{FieldProbe, Record};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        }
    }

    /// Applies this direction to an ascending comparison result.
    ///
    /// Descending negates the sign; operands are never swapped.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Direction::Ascending),
            "desc" | "descending" => Ok(Direction::Descending),
            other => Err(format!("Invalid direction: '{}'. Expected 'asc' or 'desc'.", other)),
        }
    }
}

/// Reads a field from an element; bound to a [`Record`] implementation.
pub type FieldReader<T> = for<'r, 's> fn(&'r T, &'s str) -> SortResult<FieldProbe<'r>>;

/// A comparator with its direction folded in.
pub type NormalizedComparator<'a, T> = Box<dyn Fn(&T, &T) -> SortResult<Ordering> + 'a>;

/// A unary key rule with its key type erased.
pub trait KeyRule<T> {
    /// Extracts keys from both elements and compares them ascending.
    fn compare_keys(&self, a: &T, b: &T) -> SortResult<Ordering>;
}

/// Key rule backed by an extractor closure.
pub struct KeyExtractor<F, K, E> {
    extract: F,
    _key: PhantomData<fn() -> (K, E)>,
}

impl<F, K, E> KeyExtractor<F, K, E> {
    pub fn new(extract: F) -> Self {
        Self {
            extract,
            _key: PhantomData,
        }
    }
}

impl<T, F, K, E> KeyRule<T> for KeyExtractor<F, K, E>
where
    F: Fn(&T) -> Result<K, E>,
    K: SortKey,
    E: Into<BoxError>,
{
    fn compare_keys(&self, a: &T, b: &T) -> SortResult<Ordering> {
        let left = (self.extract)(a).map_err(SortError::rule_failed)?;
        let right = (self.extract)(b).map_err(SortError::rule_failed)?;
        Ok(left.compare_key(&right))
    }
}

/// A caller-declared ordering rule.
pub enum OrderingRule<'a, T> {
    /// Compare the named field of each element loosely
    Field { name: String, read: FieldReader<T> },
    /// Compare extracted keys
    Key(Box<dyn KeyRule<T> + 'a>),
    /// Compare elements directly
    Comparator(Box<dyn Fn(&T, &T) -> SortResult<Ordering> + 'a>),
}

impl<'a, T: 'a> OrderingRule<'a, T> {
    /// Field-name rule
    pub fn field(name: impl Into<String>) -> Self
    where
        T: Record,
    {
        OrderingRule::Field {
            name: name.into(),
            read: <T as Record>::field,
        }
    }

    /// Key-extractor rule
    pub fn key<F, K>(extract: F) -> Self
    where
        F: Fn(&T) -> K + 'a,
        K: SortKey + 'a,
    {
        Self::try_key(move |value: &T| Ok::<K, Infallible>(extract(value)))
    }

    /// Fallible key-extractor rule; an error aborts the sort
    pub fn try_key<F, K, E>(extract: F) -> Self
    where
        F: Fn(&T) -> Result<K, E> + 'a,
        K: SortKey + 'a,
        E: Into<BoxError> + 'a,
    {
        OrderingRule::Key(Box::new(KeyExtractor::new(extract)))
    }

    /// Two-argument comparator rule
    pub fn comparator<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'a,
    {
        OrderingRule::Comparator(Box::new(move |a: &T, b: &T| Ok(compare(a, b))))
    }

    /// Fallible two-argument comparator rule; an error aborts the sort
    pub fn try_comparator<F, E>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Result<Ordering, E> + 'a,
        E: Into<BoxError>,
    {
        OrderingRule::Comparator(Box::new(move |a: &T, b: &T| {
            compare(a, b).map_err(SortError::rule_failed)
        }))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            OrderingRule::Field { .. } => "field",
            OrderingRule::Key(_) => "key",
            OrderingRule::Comparator(_) => "comparator",
        }
    }
}

impl<T> fmt::Debug for OrderingRule<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderingRule::Field { name, .. } => f.debug_tuple("Field").field(name).finish(),
            OrderingRule::Key(_) => f.write_str("Key(..)"),
            OrderingRule::Comparator(_) => f.write_str("Comparator(..)"),
        }
    }
}

/// Normalizes a rule into a directed two-argument comparator.
///
/// Never fails; errors raised by the rule itself surface when the returned
/// comparator is called.
pub fn normalize<'a, T: 'a>(rule: OrderingRule<'a, T>, direction: Direction) -> NormalizedComparator<'a, T> {
    match rule {
        OrderingRule::Field { name, read } => Box::new(move |a: &T, b: &T| {
            let left = read(a, &name)?;
            let right = read(b, &name)?;
            Ok(direction.apply(loose_cmp_opt(left.as_deref(), right.as_deref())))
        }),
        OrderingRule::Key(key) => Box::new(move |a: &T, b: &T| {
            key.compare_keys(a, b).map(|ordering| direction.apply(ordering))
        }),
        OrderingRule::Comparator(compare) => Box::new(move |a: &T, b: &T| {
            compare(a, b).map(|ordering| direction.apply(ordering))
        }),
    }
}

/// A field rule in serializable form, e.g. `population:desc`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field to sort by
    pub field: String,
    /// Sort direction
    #[serde(default)]
    pub direction: Direction,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Ascending,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Descending,
        }
    }
}

impl FromStr for SortSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // A suffix that is not a direction belongs to the field name
        let (field, direction) = match s.rsplit_once(':') {
            Some((field, suffix)) => match suffix.parse::<Direction>() {
                Ok(direction) => (field, direction),
                Err(_) => (s, Direction::Ascending),
            },
            None => (s, Direction::Ascending),
        };
        if field.is_empty() {
            return Err(format!("Invalid sort spec: '{}'. Field name is empty.", s));
        }
        Ok(Self {
            field: field.to_string(),
            direction,
        })
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.direction)
    }
}
