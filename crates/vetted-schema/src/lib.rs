//! Declarative record schema: nodes, registration-time validation, and
//! composition into the runtime [`ModelRegistry`](vetted_core::model::ModelRegistry).

pub mod build;
pub mod compose;
pub mod error;
pub mod node;
pub mod validate;
pub mod visit;

/// Maximum length for record type paths.
pub const MAX_PATH_LEN: usize = 128;

/// Maximum length for field identifiers.
pub const MAX_FIELD_NAME_LEN: usize = 64;

/// Maximum parent chain length.
pub const MAX_ANCESTORS: usize = 32;

use crate::{build::BuildError, node::NodeError};
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        err,
        error::ErrorTree,
        node::*,
        visit::{Event, Visitor},
    };
    pub use serde::Serialize;
    pub use vetted_core::{
        model::{Cardinality, CustomCheck, FieldKind, RuleField},
        types::ScalarKind,
        value::{AllowedValue, Literal},
    };
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    BuildError(#[from] BuildError),

    #[error(transparent)]
    NodeError(#[from] NodeError),
}
