//! Composition of declared record nodes into runtime models.
//!
//! A type's effective fields, rules, candidates and checks are its own
//! declarations followed by each ancestor's, nearest first. Nothing an
//! ancestor declares can be removed by a descendant.

use crate::{
    MAX_ANCESTORS,
    error::ErrorTree,
    node::{Field, RecordNode, Schema},
};
use thiserror::Error as ThisError;
use vetted_core::model::{AllowedValueRule, CandidateEntry, ModelRegistry, RecordModel};

///
/// AncestryError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum AncestryError {
    #[error("inheritance cycle through '{0}'")]
    Cycle(&'static str),

    #[error("parent chain is deeper than {}", MAX_ANCESTORS)]
    TooDeep,

    #[error("unknown parent type '{0}'")]
    UnknownParent(&'static str),
}

/// `node` followed by its ancestors, nearest first.
pub fn lineage<'a>(
    schema: &'a Schema,
    node: &'a RecordNode,
) -> Result<Vec<&'a RecordNode>, AncestryError> {
    let mut chain = vec![node];
    let mut parent = node.parent;

    while let Some(path) = parent {
        if chain.iter().any(|n| n.path == path) {
            return Err(AncestryError::Cycle(path));
        }
        if chain.len() > MAX_ANCESTORS {
            return Err(AncestryError::TooDeep);
        }

        let next = schema
            .get_record(path)
            .map_err(|_| AncestryError::UnknownParent(path))?;
        chain.push(next);
        parent = next.parent;
    }

    Ok(chain)
}

/// Whether `path` is `ancestor` or (transitively) derives from it.
#[must_use]
pub fn is_subtype(schema: &Schema, path: &str, ancestor: &str) -> bool {
    if path == ancestor {
        return true;
    }

    schema
        .get_record(path)
        .ok()
        .and_then(|node| lineage(schema, node).ok())
        .is_some_and(|chain| chain.iter().any(|n| n.path == ancestor))
}

/// Every field visible on a type, own declarations first.
pub(crate) fn inherited_fields(chain: &[&RecordNode]) -> Vec<&'static Field> {
    chain.iter().flat_map(|node| node.fields.iter()).collect()
}

/// Compose every declared record into a registry.
pub fn compose(schema: &Schema) -> Result<ModelRegistry, ErrorTree> {
    let mut errs = ErrorTree::new();
    let mut registry = ModelRegistry::new();

    for (path, node) in schema.records() {
        match compose_record(schema, node) {
            Ok(model) => {
                registry.insert(model);
            }
            Err(e) => errs.addf(path, e),
        }
    }

    errs.result()?;

    Ok(registry)
}

/// Compose one record type.
pub fn compose_record(schema: &Schema, node: &RecordNode) -> Result<RecordModel, AncestryError> {
    let chain = lineage(schema, node)?;

    let fields = inherited_fields(&chain)
        .into_iter()
        .map(Field::model)
        .collect();

    let rules = chain
        .iter()
        .flat_map(|level| {
            level
                .rules
                .iter()
                .map(|rule| AllowedValueRule::new(level.path, rule.fields))
        })
        .collect();

    let mut candidates: Vec<CandidateEntry> = Vec::new();
    for level in &chain {
        for candidate in level.candidates {
            let types = candidate.types.iter().copied();
            match candidates.iter_mut().find(|c| c.field == candidate.field) {
                Some(entry) => {
                    for ty in types {
                        if !entry.accepts(ty) {
                            entry.types.push(ty);
                        }
                    }
                }
                None => candidates.push(CandidateEntry::new(candidate.field, types)),
            }
        }
    }

    let checks = chain
        .iter()
        .flat_map(|level| level.checks.iter().copied())
        .collect();

    let ancestors = chain[1..].iter().map(|n| n.path).collect();

    Ok(RecordModel::new(node.path, fields, rules, candidates, checks).with_ancestors(ancestors))
}

///
/// TESTS
///
