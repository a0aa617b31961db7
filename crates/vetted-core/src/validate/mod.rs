//! Record validation: structural check, allowed values, custom checks and
//! type narrowing, applied depth-first over a record tree.

pub mod allowed;
pub mod narrow;
pub mod partition;
pub mod structure;

mod session;


pub use allowed::{
    DeprecatedMatch, Evaluation, GroupFailure, RuleReport, ValidationOutcome, evaluate,
    validate_allowed,
};
pub use narrow::{Attempt, Candidates, NarrowError, Narrowed, narrow};
pub use partition::{FieldGroup, partition, partition_keys};
pub use structure::StructuralError;

use crate::{
    config::ValidatorConfig,
    model::ModelRegistry,
    record::Record,
    snapshot::Snapshot,
    types::ScalarKind,
    value::Literal,
    visitor::prefix_key,
};
use serde::Serialize;
use session::Session;
use std::{collections::BTreeMap, fmt::Write};
use thiserror::Error as ThisError;

// ============================================================================
// Errors
// ============================================================================

///
/// ValidateError
///

#[derive(Debug, ThisError)]
pub enum ValidateError {
    #[error("unknown record type '{0}'")]
    UnknownRecordType(String),

    #[error("validation failed: {}", describe_issues(.0))]
    ValidationFailed(BTreeMap<String, Vec<Issue>>),
}

impl ValidateError {
    /// Issues keyed by path, when validation ran.
    #[must_use]
    pub const fn issues(&self) -> Option<&BTreeMap<String, Vec<Issue>>> {
        match self {
            Self::ValidationFailed(issues) => Some(issues),
            Self::UnknownRecordType(_) => None,
        }
    }

    /// Issues recorded at one path key (`""` is the root record).
    #[must_use]
    pub fn issues_at(&self, key: &str) -> &[Issue] {
        self.issues()
            .and_then(|issues| issues.get(key))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

///
/// Issue
/// One failure recorded at a path.
///

#[derive(Clone, Debug, PartialEq, Serialize, ThisError)]
#[remain::sorted]
pub enum Issue {
    #[error("{0}")]
    AllowedValueViolation(GroupFailure),

    #[error("custom check '{check}' failed: {message}")]
    CustomCheckFailure { check: &'static str, message: String },

    #[error(transparent)]
    NarrowingFailure(NarrowError),

    #[error(transparent)]
    StructuralViolation(StructuralError),
}

/// Render issues as `key: message` pairs.
pub(crate) fn describe_issues(issues: &BTreeMap<String, Vec<Issue>>) -> String {
    let mut out = String::new();

    for (key, list) in issues {
        for issue in list {
            if !out.is_empty() {
                out.push_str("; ");
            }
            if key.is_empty() {
                let _ = write!(out, "{issue}");
            } else {
                let _ = write!(out, "{key}: {issue}");
            }
        }
    }

    out
}

// ============================================================================
// Results
// ============================================================================

///
/// Notice
/// Non-fatal findings surfaced with a successful construction.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[remain::sorted]
pub enum Notice {
    Deprecated {
        path: String,
        record: &'static str,
        value: Literal,
        replacement: &'static str,
    },
}

impl Notice {
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Deprecated { path, .. } => path,
        }
    }

    fn rebase(self, prefix: &str) -> Self {
        match self {
            Self::Deprecated {
                path,
                record,
                value,
                replacement,
            } => Self::Deprecated {
                path: prefix_key(prefix, &path),
                record,
                value,
                replacement,
            },
        }
    }
}

///
/// Mutation
/// A change validation made to the record tree, keyed by field path.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[remain::sorted]
pub enum Mutation {
    Coerced {
        path: String,
        from: ScalarKind,
        to: ScalarKind,
    },
    DefaultApplied {
        path: String,
        value: Literal,
    },
    Narrowed {
        path: String,
        from: &'static str,
        to: &'static str,
    },
}

impl Mutation {
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Coerced { path, .. }
            | Self::DefaultApplied { path, .. }
            | Self::Narrowed { path, .. } => path,
        }
    }

    fn rebase(mut self, prefix: &str) -> Self {
        match &mut self {
            Self::Coerced { path, .. }
            | Self::DefaultApplied { path, .. }
            | Self::Narrowed { path, .. } => *path = prefix_key(prefix, path),
        }

        self
    }
}

///
/// Constructed
/// A record that passed validation, possibly narrowed in place.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Constructed {
    pub record: Record,
    pub notices: Vec<Notice>,
    pub mutations: Vec<Mutation>,
}

// ============================================================================
// Validator
// ============================================================================

///
/// Validator
///
/// Post-construction hook over a composed registry. Holds no per-document
/// state; every call runs in a fresh session.
///

#[derive(Clone, Debug)]
pub struct Validator<'a> {
    registry: &'a ModelRegistry,
    config: ValidatorConfig,
}

impl<'a> Validator<'a> {
    #[must_use]
    pub fn new(registry: &'a ModelRegistry) -> Self {
        Self::with_config(registry, ValidatorConfig::default())
    }

    #[must_use]
    pub const fn with_config(registry: &'a ModelRegistry, config: ValidatorConfig) -> Self {
        Self { registry, config }
    }

    #[must_use]
    pub const fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    #[must_use]
    pub const fn registry(&self) -> &'a ModelRegistry {
        self.registry
    }

    /// Validate `record` depth-first and return it, narrowed where needed.
    pub fn construct(&self, record: Record) -> Result<Constructed, ValidateError> {
        if self.registry.get(record.path).is_none() {
            return Err(ValidateError::UnknownRecordType(record.path.to_string()));
        }

        let mut session = Session::new(self.registry, &self.config);
        let mut record = record;

        let ok = session.visit_record(&mut record);
        let (issues, notices, mutations) = session.finish();

        if ok && issues.is_empty() {
            Ok(Constructed {
                record,
                notices,
                mutations,
            })
        } else {
            Err(ValidateError::ValidationFailed(issues))
        }
    }

    /// Run only the allowed-value check on the root record.
    pub fn check_allowed(&self, record: &Record) -> Result<ValidationOutcome, ValidateError> {
        let model = self
            .registry
            .get(record.path)
            .ok_or_else(|| ValidateError::UnknownRecordType(record.path.to_string()))?;

        let eval = evaluate(
            &Snapshot::of(record),
            &model.rules,
            &model.groups,
            self.config.deprecated,
        );

        Ok(eval.outcome)
    }
}
