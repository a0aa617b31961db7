//! Structural check: a record's fields against its declared model.
//!
//! Rejects unknown fields, enforces required fields and cardinality, fills
//! declared defaults, and re-validates scalars whose kind differs from the
//! field's declared kind.

use crate::{
    model::{Cardinality, FieldKind, FieldModel, RecordModel},
    record::{FieldValue, Record},
    types::{Scalar, TypeError},
    validate::{Mutation, session::Session},
};
use serde::Serialize;
use thiserror::Error as ThisError;

///
/// StructuralError
///

#[derive(Clone, Debug, PartialEq, Serialize, ThisError)]
#[remain::sorted]
pub enum StructuralError {
    #[error("field '{field}' has cardinality {cardinality} but holds a {found}")]
    CardinalityMismatch {
        field: &'static str,
        cardinality: Cardinality,
        found: &'static str,
    },

    #[error("record tree nested deeper than {max_depth}")]
    DepthExceeded { max_depth: usize },

    #[error("field '{field}': {source}")]
    InvalidScalar {
        field: &'static str,
        source: TypeError,
    },

    #[error("field '{field}' expects {expected}, found {found}")]
    KindMismatch {
        field: &'static str,
        expected: FieldKind,
        found: String,
    },

    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("unknown field '{field}'")]
    UnknownField { field: String },

    #[error("unknown record type '{path}'")]
    UnknownRecordType { path: String },
}

/// Check (and normalise) `record` against `model`. Returns `false` when any
/// structural issue was recorded.
pub(crate) fn check(session: &mut Session<'_>, record: &mut Record, model: &RecordModel) -> bool {
    let mut ok = true;

    // unknown fields
    let unknown: Vec<String> = record
        .fields
        .keys()
        .filter(|name| model.field(name).is_none())
        .cloned()
        .collect();
    for field in unknown {
        let here = session.key(None, None);
        session.structural(model.path, here, StructuralError::UnknownField { field });
        ok = false;
    }

    for field in &model.fields {
        match record.fields.get_mut(field.name) {
            Some(value) => ok &= check_value(session, model, field, value),
            None => ok &= fill_absent(session, record, model, field),
        }
    }

    ok
}

// Absent field: apply its default or report it when required.
fn fill_absent(
    session: &mut Session<'_>,
    record: &mut Record,
    model: &RecordModel,
    field: &FieldModel,
) -> bool {
    let key = session.key(Some(field.name), None);

    let Some(literal) = field.default else {
        if field.cardinality == Cardinality::One {
            let err = StructuralError::MissingField { field: field.name };
            session.structural(model.path, key, err);
            return false;
        }
        return true;
    };

    let FieldKind::Scalar(kind) = field.kind else {
        let err = StructuralError::KindMismatch {
            field: field.name,
            expected: field.kind,
            found: format!("default {literal}"),
        };
        session.structural(model.path, key, err);
        return false;
    };

    match Scalar::from_literal(kind, literal) {
        Ok(scalar) => {
            let value = if field.cardinality == Cardinality::Many {
                FieldValue::List(vec![scalar.into()])
            } else {
                scalar.into()
            };
            record.insert(field.name, value);
            session.debug_log(format!("default {literal} applied at '{key}'"));
            session.mutate(Mutation::DefaultApplied {
                path: key,
                value: literal,
            });

            true
        }
        Err(source) => {
            let err = StructuralError::InvalidScalar {
                field: field.name,
                source,
            };
            session.structural(model.path, key, err);

            false
        }
    }
}

fn check_value(
    session: &mut Session<'_>,
    model: &RecordModel,
    field: &FieldModel,
    value: &mut FieldValue,
) -> bool {
    match (field.cardinality, value) {
        (Cardinality::Many, FieldValue::List(items)) => {
            let mut ok = true;
            for (i, item) in items.iter_mut().enumerate() {
                ok &= check_item(session, model, field, item, Some(i));
            }
            ok
        }
        (Cardinality::Many, other) => {
            cardinality_mismatch(session, model, field, other.shape());
            false
        }
        (_, FieldValue::List(_)) => {
            cardinality_mismatch(session, model, field, "list");
            false
        }
        (_, item) => check_item(session, model, field, item, None),
    }
}

fn cardinality_mismatch(
    session: &mut Session<'_>,
    model: &RecordModel,
    field: &FieldModel,
    found: &'static str,
) {
    let key = session.key(Some(field.name), None);
    let err = StructuralError::CardinalityMismatch {
        field: field.name,
        cardinality: field.cardinality,
        found,
    };
    session.structural(model.path, key, err);
}

fn check_item(
    session: &mut Session<'_>,
    model: &RecordModel,
    field: &FieldModel,
    item: &mut FieldValue,
    index: Option<usize>,
) -> bool {
    let key = session.key(Some(field.name), index);

    match (field.kind, item) {
        (FieldKind::Scalar(kind), FieldValue::Scalar(scalar)) => {
            let from = scalar.kind();
            if from == kind {
                return true;
            }

            match scalar.coerce(kind) {
                Ok(coerced) => {
                    *scalar = coerced;
                    session.mutate(Mutation::Coerced {
                        path: key,
                        from,
                        to: kind,
                    });
                    true
                }
                Err(source) => {
                    let err = StructuralError::InvalidScalar {
                        field: field.name,
                        source,
                    };
                    session.structural(model.path, key, err);
                    false
                }
            }
        }

        (FieldKind::Record(expected), FieldValue::Record(child)) => {
            if accepts(session, model, field, expected, child.path) {
                return true;
            }

            let err = StructuralError::KindMismatch {
                field: field.name,
                expected: field.kind,
                found: format!("record {}", child.path),
            };
            session.structural(model.path, key, err);
            false
        }

        (_, other) => {
            let err = StructuralError::KindMismatch {
                field: field.name,
                expected: field.kind,
                found: other.shape().to_string(),
            };
            session.structural(model.path, key, err);
            false
        }
    }
}

// A record field holds its declared type, a descendant of it, or one of the
// field's narrowing candidates.
fn accepts(
    session: &Session<'_>,
    model: &RecordModel,
    field: &FieldModel,
    expected: &'static str,
    actual: &'static str,
) -> bool {
    session.registry.is_a(actual, expected)
        || model
            .candidates_for(field.name)
            .is_some_and(|entry| entry.accepts(actual))
}
