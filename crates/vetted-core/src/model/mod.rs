//! Runtime models: what the validator runs against.
//!
//! Models are composed once (ancestor rules, fields and candidates already
//! folded in) and are read-only afterwards.

pub mod field;
pub mod record;
pub mod rule;

pub use field::{Cardinality, FieldKind, FieldModel};
pub use record::{CandidateEntry, CustomCheck, RecordModel};
pub use rule::{AllowedValueRule, RuleField};

use std::collections::BTreeMap;

///
/// ModelRegistry
///
/// Composed record models keyed by type path.
///

#[derive(Clone, Debug, Default)]
pub struct ModelRegistry {
    records: BTreeMap<&'static str, RecordModel>,
}

impl ModelRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// Insert a model, returning any model previously held under its path.
    pub fn insert(&mut self, model: RecordModel) -> Option<RecordModel> {
        self.records.insert(model.path, model)
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&RecordModel> {
        self.records.get(path)
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.records.contains_key(path)
    }

    /// Whether `path` is `ancestor` or derives from it.
    #[must_use]
    pub fn is_a(&self, path: &str, ancestor: &str) -> bool {
        path == ancestor
            || self
                .get(path)
                .is_some_and(|model| model.ancestors.iter().any(|a| *a == ancestor))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordModel> {
        self.records.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<RecordModel> for ModelRegistry {
    fn from_iter<I: IntoIterator<Item = RecordModel>>(iter: I) -> Self {
        let mut registry = Self::new();
        for model in iter {
            registry.insert(model);
        }

        registry
    }
}
