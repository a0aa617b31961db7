//! Field snapshot: a record flattened to comparable values.

use crate::{
    record::{FieldValue, Record},
    value::Value,
};
use std::collections::BTreeMap;

///
/// FieldPresence
///
/// Result of looking up a field in a snapshot. A missing field never
/// satisfies a rule that names it.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldPresence<'a> {
    Present(&'a Value),
    Missing,
}

///
/// Snapshot
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    values: BTreeMap<String, Value>,
}

impl Snapshot {
    /// Flatten `record`. Scalars unwrap to their comparable form, scalar
    /// lists become `Value::List`. Empty lists and anything holding a
    /// nested record are left out, so they read as absent.
    #[must_use]
    pub fn of(record: &Record) -> Self {
        let values = record
            .fields
            .iter()
            .filter_map(|(name, value)| comparable(value).map(|v| (name.clone(), v)))
            .collect();

        Self { values }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> FieldPresence<'_> {
        match self.values.get(name) {
            Some(value) => FieldPresence::Present(value),
            None => FieldPresence::Missing,
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Shorthand for [`Snapshot::of`].
#[must_use]
pub fn snapshot(record: &Record) -> Snapshot {
    Snapshot::of(record)
}

fn comparable(value: &FieldValue) -> Option<Value> {
    match value {
        FieldValue::Scalar(s) => Some(s.to_value()),
        FieldValue::Record(_) => None,
        FieldValue::List(items) if items.is_empty() => None,
        FieldValue::List(items) => items
            .iter()
            .map(|item| match item {
                FieldValue::Scalar(s) => Some(s.to_value()),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(Value::List),
    }
}

///
/// TESTS
///
