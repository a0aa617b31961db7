use crate::{types::ScalarKind, value::Literal};
use derive_more::Display;
use serde::Serialize;

///
/// FieldModel
/// Runtime field metadata used by structural checking.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct FieldModel {
    /// Field name as used in records and rules.
    pub name: &'static str,
    pub kind: FieldKind,
    pub cardinality: Cardinality,

    /// Filled in when the field is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Literal>,
}

impl FieldModel {
    #[must_use]
    pub const fn scalar(name: &'static str, kind: ScalarKind) -> Self {
        Self {
            name,
            kind: FieldKind::Scalar(kind),
            cardinality: Cardinality::One,
            default: None,
        }
    }

    #[must_use]
    pub const fn record(name: &'static str, path: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Record(path),
            cardinality: Cardinality::One,
            default: None,
        }
    }

    #[must_use]
    pub const fn opt(mut self) -> Self {
        self.cardinality = Cardinality::Opt;
        self
    }

    #[must_use]
    pub const fn many(mut self) -> Self {
        self.cardinality = Cardinality::Many;
        self
    }

    #[must_use]
    pub const fn with_default(mut self, literal: Literal) -> Self {
        self.default = Some(literal);
        self
    }

    /// Scalar, single-valued or list, and therefore visible in snapshots.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self.kind, FieldKind::Scalar(_))
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        matches!(self.cardinality, Cardinality::One) && self.default.is_none()
    }
}

///
/// FieldKind
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
pub enum FieldKind {
    #[display("record {_0}")]
    Record(&'static str),

    #[display("{_0}")]
    Scalar(ScalarKind),
}

///
/// Cardinality
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq, Serialize)]
pub enum Cardinality {
    #[default]
    One,
    Opt,
    Many,
}
