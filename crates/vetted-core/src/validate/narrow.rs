//! Type narrowing.
//!
//! A field declared as a supertype carries a closed, ordered list of
//! candidate record types. Its value is kept when already tagged with one of
//! them; otherwise the same field data is trial-validated as each candidate
//! in turn and the first success replaces it. List fields narrow
//! element-wise and all-or-nothing.

use crate::{
    config::ValidatorConfig,
    model::{CandidateEntry, ModelRegistry, RecordModel},
    obs::sink::{self, MetricsEvent},
    record::{FieldValue, Record},
    validate::{
        Issue, Mutation, describe_issues,
        session::{Session, Trial},
    },
};
use serde::Serialize;
use std::fmt::Write;
use thiserror::Error as ThisError;

///
/// NarrowError
///

#[derive(Clone, Debug, PartialEq, Serialize, ThisError)]
#[remain::sorted]
pub enum NarrowError {
    #[error(
        "field '{field}' holds a {value_type} that matched no candidate: {}",
        describe_attempts(.attempts)
    )]
    NoMatchingCandidate {
        field: &'static str,
        index: Option<usize>,
        value_type: &'static str,
        attempts: Vec<Attempt>,
    },

    #[error("field '{field}' holds a {found}, expected a record of type {}", .candidates.join(" | "))]
    NotARecord {
        field: &'static str,
        index: Option<usize>,
        found: &'static str,
        candidates: Vec<&'static str>,
    },
}

impl NarrowError {
    /// List slot that failed, for list fields.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::NoMatchingCandidate { index, .. } | Self::NotARecord { index, .. } => *index,
        }
    }

    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::NoMatchingCandidate { field, .. } | Self::NotARecord { field, .. } => field,
        }
    }
}

///
/// Attempt
/// One rejected candidate and why it was rejected.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Attempt {
    pub candidate: &'static str,
    pub reason: String,
}

fn describe_attempts(attempts: &[Attempt]) -> String {
    let mut out = String::new();
    for (i, attempt) in attempts.iter().enumerate() {
        if i > 0 {
            out.push_str(" | ");
        }
        let _ = write!(out, "{} ({})", attempt.candidate, attempt.reason);
    }

    out
}

///
/// Candidates
///
/// Closed, ordered candidate list. Resolution is by elimination: each
/// candidate is tried in declaration order and the first one that accepts
/// the data is its tag.
///

#[derive(Clone, Copy, Debug)]
pub struct Candidates<'a> {
    types: &'a [&'static str],
}

impl<'a> Candidates<'a> {
    #[must_use]
    pub const fn new(types: &'a [&'static str]) -> Self {
        Self { types }
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.types.iter().any(|t| *t == path)
    }

    #[must_use]
    pub const fn types(&self) -> &'a [&'static str] {
        self.types
    }

    /// First candidate `attempt` accepts, or every rejection in order.
    pub fn eliminate<T, E>(
        &self,
        mut attempt: impl FnMut(&'static str) -> Result<T, E>,
    ) -> Result<(&'static str, T), Vec<(&'static str, E)>> {
        let mut rejected = Vec::with_capacity(self.types.len());

        for &candidate in self.types {
            match attempt(candidate) {
                Ok(value) => return Ok((candidate, value)),
                Err(err) => rejected.push((candidate, err)),
            }
        }

        Err(rejected)
    }
}

///
/// Narrowed
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Narrowed {
    pub record: Record,

    /// Changes made, keyed by field path. Empty when nothing was narrowed.
    pub mutations: Vec<Mutation>,
}

impl Narrowed {
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        self.mutations.is_empty()
    }
}

/// Narrow the fields of `record` named by `candidates`, trial-validating
/// against `registry` with the default configuration.
pub fn narrow(
    record: &Record,
    candidates: &[CandidateEntry],
    registry: &ModelRegistry,
) -> Result<Narrowed, NarrowError> {
    let config = ValidatorConfig::default();
    let mut session = Session::new(registry, &config);
    let mut record = record.clone();

    for entry in candidates {
        narrow_entry(&mut session, &mut record, entry)?;
    }
    let (_, _, mutations) = session.finish();

    Ok(Narrowed { record, mutations })
}

/// Narrow every candidate field of a record that already passed its own
/// checks. Failures are recorded on the session.
pub(crate) fn narrow_record(
    session: &mut Session<'_>,
    record: &mut Record,
    model: &RecordModel,
) -> bool {
    let mut ok = true;

    for entry in &model.candidates {
        if let Err(err) = narrow_entry(session, record, entry) {
            sink::record(MetricsEvent::NarrowFailed {
                record_path: model.path,
            });

            let key = session.key(Some(err.field()), err.index());
            session.debug_log(format!("narrowing failed at '{key}': {err}"));
            session.add_issue(key, Issue::NarrowingFailure(err));
            ok = false;
        }
    }

    ok
}

fn narrow_entry(
    session: &mut Session<'_>,
    record: &mut Record,
    entry: &CandidateEntry,
) -> Result<(), NarrowError> {
    let field = entry.field;
    let candidates = Candidates::new(&entry.types);

    let Some(value) = record.fields.get_mut(field) else {
        return Ok(());
    };

    match value {
        FieldValue::Record(child) => {
            if let Some(trial) = resolve(session, field, None, child, candidates)? {
                let key = session.key(Some(field), None);
                let from = child.path;
                **child = session.adopt(&key, from, trial);
            }
        }

        FieldValue::List(items) => {
            // resolve every element before touching any of them
            let mut resolved = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let FieldValue::Record(child) = item else {
                    return Err(not_a_record(field, Some(i), item, candidates));
                };
                resolved.push(resolve(session, field, Some(i), child, candidates)?);
            }

            for (i, (item, trial)) in items.iter_mut().zip(resolved).enumerate() {
                if let (FieldValue::Record(child), Some(trial)) = (item, trial) {
                    let key = session.key(Some(field), Some(i));
                    let from = child.path;
                    **child = session.adopt(&key, from, trial);
                }
            }
        }

        FieldValue::Scalar(_) => return Err(not_a_record(field, None, value, candidates)),
    }

    Ok(())
}

// `None` when the value already carries an acceptable type.
fn resolve(
    session: &Session<'_>,
    field: &'static str,
    index: Option<usize>,
    value: &Record,
    candidates: Candidates<'_>,
) -> Result<Option<Trial>, NarrowError> {
    if candidates.contains(value.path) {
        return Ok(None);
    }

    candidates
        .eliminate(|candidate| {
            sink::record(MetricsEvent::NarrowAttempt { candidate });
            session.debug_log(format!(
                "trying {candidate} for '{}' ({})",
                session.key(Some(field), index),
                value.path
            ));

            session.trial(value.clone().retag(candidate))
        })
        .map(|(_, trial)| Some(trial))
        .map_err(|rejected| NarrowError::NoMatchingCandidate {
            field,
            index,
            value_type: value.path,
            attempts: rejected
                .into_iter()
                .map(|(candidate, issues)| Attempt {
                    candidate,
                    reason: describe_issues(&issues),
                })
                .collect(),
        })
}

fn not_a_record(
    field: &'static str,
    index: Option<usize>,
    value: &FieldValue,
    candidates: Candidates<'_>,
) -> NarrowError {
    NarrowError::NotARecord {
        field,
        index,
        found: value.shape(),
        candidates: candidates.types().to_vec(),
    }
}
