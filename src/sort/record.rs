//! Field access for field-name rules
//!
//! A field rule reads a named member from each element. Keyed element types
//! answer with the member (or `None` when it is missing); scalar JSON values
//! have no members and always answer `None`. Types that keep the default
//! implementation reject field rules with `SortError::InvalidRuleKind` the
//! first time an element is compared.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};

use super::errors::{SortError, SortResult};

/// Outcome of a field lookup: the field's value, or `None` when absent.
pub type FieldProbe<'a> = Option<Cow<'a, Value>>;

/// An element type a field rule can read from.
pub trait Record {
    /// Reads the field `name`.
    ///
    /// The default implementation rejects field rules for this type.
    fn field(&self, name: &str) -> SortResult<FieldProbe<'_>> {
        Err(SortError::invalid_rule_kind::<Self>(name))
    }
}

impl Record for Value {
    fn field(&self, name: &str) -> SortResult<FieldProbe<'_>> {
        Ok(match self {
            Value::Object(members) => members.get(name).map(Cow::Borrowed),
            Value::Array(items) => name
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index))
                .map(Cow::Borrowed),
            _ => None,
        })
    }
}

impl Record for Map<String, Value> {
    fn field(&self, name: &str) -> SortResult<FieldProbe<'_>> {
        Ok(self.get(name).map(Cow::Borrowed))
    }
}

impl<S: std::hash::BuildHasher> Record for HashMap<String, Value, S> {
    fn field(&self, name: &str) -> SortResult<FieldProbe<'_>> {
        Ok(self.get(name).map(Cow::Borrowed))
    }
}

impl Record for BTreeMap<String, Value> {
    fn field(&self, name: &str) -> SortResult<FieldProbe<'_>> {
        Ok(self.get(name).map(Cow::Borrowed))
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> SortResult<FieldProbe<'_>> {
        (**self).field(name)
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn field(&self, name: &str) -> SortResult<FieldProbe<'_>> {
        (**self).field(name)
    }
}
