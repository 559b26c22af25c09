//! Sort sessions
//!
//! A session snapshots its input once, accumulates normalized rules in
//! priority order and produces the ordered output on demand.
//!
//! # Composite comparison
//!
//! 1. Registered rules are evaluated in registration order
//! 2. The first non-equal result decides
//! 3. Otherwise the elements' snapshot positions decide
//!
//! Positions are unique, so the composite comparison is a strict total order
//! and the output is fully determined by the input and the rules.

use std::cmp::Ordering;
use std::fmt;
use std::time::Instant;

use serde::Serialize;

use super::errors::{BoxError, SortResult};
use super::loose::SortKey;
use super::merge::try_merge_sort;
use super::record::Record;
use super::rule::{normalize, Direction, NormalizedComparator, OrderingRule};
use crate::observability::{log_event_with_fields, Event};

/// Counters collected while sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SortStats {
    /// Number of elements sorted
    pub elements: usize,
    /// Number of registered rules
    pub rules: usize,
    /// Composite comparisons performed
    pub comparisons: u64,
    /// Comparisons decided by snapshot position
    pub tie_breaks: u64,
}

/// Starts a sort session over `items`, keyed by their original positions.
pub fn using<'a, T: 'a, I>(items: I) -> SortSession<'a, T>
where
    I: IntoIterator<Item = T>,
{
    SortSession::using(items)
}

/// A single sort over a snapshot of entries.
///
/// `K` is the identity each value travels with; for plain sequences it is
/// the original position.
pub struct SortSession<'a, T, K = usize> {
    entries: Vec<(K, T)>,
    rules: Vec<NormalizedComparator<'a, T>>,
}

impl<'a, T: 'a> SortSession<'a, T, usize> {
    /// Snapshots `items`; each item is keyed by its position.
    pub fn using<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::using_entries(items.into_iter().enumerate())
    }
}

impl<'a, T: 'a, K> SortSession<'a, T, K> {
    /// Snapshots key/value entries; keys travel with their values.
    pub fn using_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
    {
        Self {
            entries: entries.into_iter().collect(),
            rules: Vec::new(),
        }
    }

    /// Appends a rule at the lowest priority so far.
    pub fn by(mut self, rule: OrderingRule<'a, T>, direction: Direction) -> Self {
        self.rules.push(normalize(rule, direction));
        self
    }

    /// Orders by a key extracted from each element.
    pub fn by_key<F, S>(self, extract: F, direction: Direction) -> Self
    where
        F: Fn(&T) -> S + 'a,
        S: SortKey + 'a,
    {
        self.by(OrderingRule::key(extract), direction)
    }

    /// Orders by a fallible key extractor.
    pub fn try_by_key<F, S, E>(self, extract: F, direction: Direction) -> Self
    where
        F: Fn(&T) -> Result<S, E> + 'a,
        S: SortKey + 'a,
        E: Into<BoxError> + 'a,
    {
        self.by(OrderingRule::try_key(extract), direction)
    }

    /// Orders by a two-argument comparator.
    pub fn by_comparator<F>(self, compare: F, direction: Direction) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'a,
    {
        self.by(OrderingRule::comparator(compare), direction)
    }

    /// Orders by a fallible two-argument comparator.
    pub fn try_by_comparator<F, E>(self, compare: F, direction: Direction) -> Self
    where
        F: Fn(&T, &T) -> Result<Ordering, E> + 'a,
        E: Into<BoxError>,
    {
        self.by(OrderingRule::try_comparator(compare), direction)
    }

    /// Orders by a named field, compared loosely.
    pub fn by_field(self, name: impl Into<String>, direction: Direction) -> Self
    where
        T: Record,
    {
        self.by(OrderingRule::field(name), direction)
    }

    /// Number of snapshotted entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of registered rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the ordered output, ascending by the registered rules.
    pub fn get(&self) -> SortResult<Sorted<K, T>>
    where
        K: Clone,
        T: Clone,
    {
        self.get_in(Direction::Ascending)
    }

    /// Returns the ordered output; `Descending` reverses the whole final
    /// sequence after rule ordering.
    pub fn get_in(&self, direction: Direction) -> SortResult<Sorted<K, T>>
    where
        K: Clone,
        T: Clone,
    {
        let (order, stats) = self.sorted_order(direction)?;
        let entries = order.iter().map(|&i| self.entries[i].clone()).collect();
        Ok(Sorted { entries, stats })
    }

    /// Consumes the session and returns the ordered output without cloning.
    pub fn into_sorted(self, direction: Direction) -> SortResult<Sorted<K, T>> {
        let (order, stats) = self.sorted_order(direction)?;
        let mut slots: Vec<Option<(K, T)>> = self.entries.into_iter().map(Some).collect();
        let entries = order.iter().filter_map(|&i| slots[i].take()).collect();
        Ok(Sorted { entries, stats })
    }

    /// Computes the output permutation of snapshot positions.
    fn sorted_order(&self, direction: Direction) -> SortResult<(Vec<usize>, SortStats)> {
        let started = Instant::now();
        let mut stats = SortStats {
            elements: self.entries.len(),
            rules: self.rules.len(),
            ..SortStats::default()
        };

        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        let result = try_merge_sort(&mut order, &mut |&a: &usize, &b: &usize| {
            stats.comparisons += 1;
            self.compare_positions(a, b, &mut stats.tie_breaks)
                .map(|ordering| ordering == Ordering::Less)
        });

        let elapsed_ms = started.elapsed().as_millis().to_string();
        let elements = stats.elements.to_string();
        if let Err(err) = result {
            let reason = err.to_string();
            log_event_with_fields(
                Event::SortFailed,
                &[
                    ("code", err.code()),
                    ("elements", elements.as_str()),
                    ("reason", reason.as_str()),
                ],
            );
            return Err(err);
        }

        if direction == Direction::Descending {
            order.reverse();
        }

        let comparisons = stats.comparisons.to_string();
        let rules = stats.rules.to_string();
        let tie_breaks = stats.tie_breaks.to_string();
        log_event_with_fields(
            Event::SortComplete,
            &[
                ("comparisons", comparisons.as_str()),
                ("direction", direction.as_str()),
                ("elapsed_ms", elapsed_ms.as_str()),
                ("elements", elements.as_str()),
                ("rules", rules.as_str()),
                ("tie_breaks", tie_breaks.as_str()),
            ],
        );

        Ok((order, stats))
    }

    fn compare_positions(&self, a: usize, b: usize, tie_breaks: &mut u64) -> SortResult<Ordering> {
        let (left, right) = (&self.entries[a].1, &self.entries[b].1);
        for rule in &self.rules {
            let ordering = rule(left, right)?;
            if ordering != Ordering::Equal {
                return Ok(ordering);
            }
        }

        *tie_breaks += 1;
        Ok(a.cmp(&b))
    }
}

impl<T, K> fmt::Debug for SortSession<'_, T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortSession")
            .field("entries", &self.entries.len())
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// Ordered output of a sort session
#[derive(Debug, Clone, PartialEq)]
pub struct Sorted<K, T> {
    entries: Vec<(K, T)>,
    stats: SortStats,
}

impl<K, T> Sorted<K, T> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> SortStats {
        self.stats
    }

    /// Iterates `(key, value)` pairs in output order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &T)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Drops the keys and returns the values in output order
    pub fn into_values(self) -> Vec<T> {
        self.entries.into_iter().map(|(_, v)| v).collect()
    }

    pub fn into_entries(self) -> Vec<(K, T)> {
        self.entries
    }
}

impl<K, T> IntoIterator for Sorted<K, T> {
    type Item = (K, T);
    type IntoIter = std::vec::IntoIter<(K, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
