use crate::{
    model::{AllowedValueRule, FieldModel},
    record::Record,
    validate::partition::{FieldGroup, partition},
};
use serde::Serialize;

///
/// RecordModel
///
/// Composed runtime model for one record type. Every list is already the
/// type's own declarations followed by its ancestors', most-derived first.
///

#[derive(Clone, Debug)]
pub struct RecordModel {
    pub path: &'static str,

    /// Parent chain, nearest ancestor first.
    pub ancestors: Vec<&'static str>,

    pub fields: Vec<FieldModel>,
    pub rules: Vec<AllowedValueRule>,
    pub candidates: Vec<CandidateEntry>,
    pub checks: Vec<CustomCheck>,

    /// Partition of every field named by `rules`; cached since rules are static.
    pub groups: Vec<FieldGroup>,
}

impl RecordModel {
    /// Build a model and cache its field groups.
    #[must_use]
    pub fn new(
        path: &'static str,
        fields: Vec<FieldModel>,
        rules: Vec<AllowedValueRule>,
        candidates: Vec<CandidateEntry>,
        checks: Vec<CustomCheck>,
    ) -> Self {
        let groups = partition(&rules);

        Self {
            path,
            ancestors: Vec::new(),
            fields,
            rules,
            candidates,
            checks,
            groups,
        }
    }

    #[must_use]
    pub fn with_ancestors(mut self, ancestors: Vec<&'static str>) -> Self {
        self.ancestors = ancestors;
        self
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn candidates_for(&self, field: &str) -> Option<&CandidateEntry> {
        self.candidates.iter().find(|c| c.field == field)
    }
}

///
/// CandidateEntry
/// Field name -> ordered concrete record types its value may narrow to.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CandidateEntry {
    pub field: &'static str,
    pub types: Vec<&'static str>,
}

impl CandidateEntry {
    #[must_use]
    pub fn new(field: &'static str, types: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            field,
            types: types.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn accepts(&self, path: &str) -> bool {
        self.types.iter().any(|t| *t == path)
    }
}

///
/// CustomCheck
/// Extra per-type check run after allowed values and before narrowing.
///

#[derive(Clone, Copy, Debug)]
pub struct CustomCheck {
    pub name: &'static str,
    pub check: fn(&Record) -> Result<(), String>,
}

impl CustomCheck {
    #[must_use]
    pub const fn new(name: &'static str, check: fn(&Record) -> Result<(), String>) -> Self {
        Self { name, check }
    }

    pub fn run(&self, record: &Record) -> Result<(), String> {
        (self.check)(record)
    }
}
