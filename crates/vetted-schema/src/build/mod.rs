use crate::{
    Error,
    compose::compose,
    error::ErrorTree,
    node::{RecordNode, Schema, SchemaNode},
    validate::validate_schema,
};
use std::sync::{LazyLock, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error as ThisError;
use vetted_core::model::ModelRegistry;

///
/// BuildError
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error("malformed rule declaration:\n{0}")]
    MalformedDeclaration(ErrorTree),
}

impl BuildError {
    #[must_use]
    pub const fn errors(&self) -> &ErrorTree {
        match self {
            Self::MalformedDeclaration(errs) => errs,
        }
    }
}

///
/// SCHEMA
/// the static data structure
///

static SCHEMA: LazyLock<RwLock<Schema>> = LazyLock::new(|| RwLock::new(Schema::new()));

static REGISTRY: OnceLock<ModelRegistry> = OnceLock::new();

/// Acquire a write guard to the global schema during startup registration.
pub fn schema_write() -> RwLockWriteGuard<'static, Schema> {
    SCHEMA.write().unwrap_or_else(PoisonError::into_inner)
}

// schema_read
// just reads the schema directly without validation
pub(crate) fn schema_read() -> RwLockReadGuard<'static, Schema> {
    SCHEMA.read().unwrap_or_else(PoisonError::into_inner)
}

/// Read the global schema after validating it.
pub fn get_schema() -> Result<RwLockReadGuard<'static, Schema>, Error> {
    let schema = schema_read();
    validate_schema(&schema).map_err(BuildError::MalformedDeclaration)?;

    Ok(schema)
}

/// The composed registry for the global schema, built once per process.
/// Nodes registered after the first successful call are not seen.
pub fn get_registry() -> Result<&'static ModelRegistry, Error> {
    if let Some(registry) = REGISTRY.get() {
        return Ok(registry);
    }

    let registry = build_registry(&schema_read())?;

    Ok(REGISTRY.get_or_init(|| registry))
}

/// Validate `schema` and compose it into a registry.
pub fn build_registry(schema: &Schema) -> Result<ModelRegistry, Error> {
    validate_schema(schema).map_err(BuildError::MalformedDeclaration)?;
    let registry = compose(schema).map_err(BuildError::MalformedDeclaration)?;

    Ok(registry)
}

///
/// SchemaBuilder
///
/// A private schema, for callers that do not use startup registration.
///

#[derive(Clone, Debug, Default)]
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            schema: Schema::new(),
        }
    }

    #[must_use]
    pub fn record(mut self, node: RecordNode) -> Self {
        self.schema.insert_node(SchemaNode::Record(node));
        self
    }

    #[must_use]
    pub fn records(self, nodes: impl IntoIterator<Item = RecordNode>) -> Self {
        nodes.into_iter().fold(self, Self::record)
    }

    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn build(&self) -> Result<ModelRegistry, Error> {
        build_registry(&self.schema)
    }
}
