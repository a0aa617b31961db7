//! ## Crate layout
//! - `core`: runtime values, record trees, models, and the validation pipeline.
//! - `schema`: declarative record nodes, registration, and composition.
//! - `error`: the public error type with a stable kind + origin taxonomy.
//!
//! Record types are declared with [`record!`] and registered at process
//! start; [`construct`] validates a record tree against every type
//! registered that way.

pub use vetted_core as core;
pub use vetted_schema as schema;

pub mod error;

mod macros;

// export so the macros resolve inside this crate too
extern crate self as vetted;

/// re-exports
///
/// macros can use these, stops the user having to specify all the dependencies
/// in the Cargo.toml file manually
pub mod __reexports {
    pub use ctor;
}

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::Error;

use crate::core::{
    config::ValidatorConfig,
    model::ModelRegistry,
    record::Record,
    validate::{Constructed, Validator},
};

/// The registry composed from every `record!` declaration in the process.
pub fn registry() -> Result<&'static ModelRegistry, Error> {
    Ok(schema::build::get_registry()?)
}

/// A validator over the global registry with the default config.
pub fn validator() -> Result<Validator<'static>, Error> {
    Ok(Validator::new(registry()?))
}

/// A validator over the global registry with a caller config.
pub fn validator_with(config: ValidatorConfig) -> Result<Validator<'static>, Error> {
    Ok(Validator::with_config(registry()?, config))
}

/// Validate `record` against the global registry.
pub fn construct(record: Record) -> Result<Constructed, Error> {
    Ok(validator()?.construct(record)?)
}

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::{
        core::{
            config::{DeprecationPolicy, ValidatorConfig},
            prelude::*,
            validate::{Constructed, Mutation, Notice, Validator},
        },
        record,
    };
}

//
// Design Prelude
// For declaration code (record!, nodes, literals).
//

pub mod design {
    pub mod prelude {
        pub use crate::{
            core::{
                model::{Cardinality, CustomCheck, RuleField},
                record::{FieldValue, Record},
                types::ScalarKind,
                value::{AllowedValue, Literal},
            },
            record,
            schema::node::{Candidate, Field, RecordNode, Rule},
        };
    }
}
