mod candidate;
mod field;
mod record;
mod rule;

pub use candidate::*;
pub use field::*;
pub use record::*;
pub use rule::*;

use crate::{error::ErrorTree, visit::Visitor};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// NodeError
///

#[derive(Debug, ThisError)]
pub enum NodeError {
    #[error("path not found: {0}")]
    PathNotFound(String),

    #[error("duplicate record type '{0}'")]
    DuplicatePath(String),
}

///
/// NODE TRAITS
///

/// Local checks a node can make without the rest of the schema.
pub trait ValidateNode {
    fn validate(&self) -> Result<(), ErrorTree> {
        Ok(())
    }
}

pub trait VisitableNode: ValidateNode {
    /// Route segment this node adds to error keys; empty adds none.
    fn route_key(&self) -> String {
        String::new()
    }

    fn accept<V: Visitor>(&self, visitor: &mut V) {
        visitor.enter(self);
        self.drive(visitor);
        visitor.exit(self);
    }

    fn drive<V: Visitor>(&self, _: &mut V) {}
}

///
/// SchemaNode
///

#[derive(Clone, Debug, Serialize)]
#[remain::sorted]
pub enum SchemaNode {
    Record(RecordNode),
}

impl SchemaNode {
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Record(node) => node.path,
        }
    }
}

impl ValidateNode for SchemaNode {}

impl VisitableNode for SchemaNode {
    fn drive<V: Visitor>(&self, v: &mut V) {
        match self {
            Self::Record(node) => node.accept(v),
        }
    }
}

///
/// Schema
///
/// Every declared node, keyed by type path. A second node registered under
/// the same path is kept aside and reported when the schema is validated.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct Schema {
    nodes: BTreeMap<&'static str, SchemaNode>,

    #[serde(skip)]
    duplicates: Vec<&'static str>,
}

impl Schema {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            duplicates: Vec::new(),
        }
    }

    /// Insert a node. The first node registered under a path wins.
    pub fn insert_node(&mut self, node: SchemaNode) {
        let path = node.path();
        if self.nodes.contains_key(path) {
            self.duplicates.push(path);
        } else {
            self.nodes.insert(path, node);
        }
    }

    #[must_use]
    pub fn get_node(&self, path: &str) -> Option<&SchemaNode> {
        self.nodes.get(path)
    }

    pub fn get_record(&self, path: &str) -> Result<&RecordNode, NodeError> {
        match self.get_node(path) {
            Some(SchemaNode::Record(node)) => Ok(node),
            None => Err(NodeError::PathNotFound(path.to_string())),
        }
    }

    pub fn records(&self) -> impl Iterator<Item = (&'static str, &RecordNode)> {
        self.nodes.iter().map(|(path, node)| match node {
            SchemaNode::Record(record) => (*path, record),
        })
    }

    /// Paths registered more than once.
    #[must_use]
    pub fn duplicates(&self) -> &[&'static str] {
        &self.duplicates
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl ValidateNode for Schema {}

impl VisitableNode for Schema {
    fn drive<V: Visitor>(&self, v: &mut V) {
        for node in self.nodes.values() {
            node.accept(v);
        }
    }
}
