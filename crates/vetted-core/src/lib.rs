//! Core runtime for vetted: comparable values, wrapped scalar types, record
//! trees, runtime models, and the allowed-value / type-narrowing pipeline.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod error;
pub mod model;
pub mod obs;
pub mod record;
pub mod snapshot;
pub mod types;
pub mod validate;
pub mod value;
pub mod visitor;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Default nesting limit for record trees handed to the validator.
pub const DEFAULT_MAX_DEPTH: usize = 64;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or validator sessions are re-exported here.
///

pub mod prelude {
    pub use crate::{
        model::{
            AllowedValueRule, Cardinality, CandidateEntry, CustomCheck, FieldKind, FieldModel,
            ModelRegistry, RecordModel, RuleField,
        },
        record::{FieldValue, Record},
        types::{Scalar, ScalarKind},
        value::{AllowedValue, Literal, Value},
    };
}
