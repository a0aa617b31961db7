//! Declaration checks run before any rule set is composed.

pub mod declaration;
pub mod hierarchy;
pub mod naming;


use crate::{
    error::ErrorTree,
    node::{NodeError, Schema, VisitableNode},
    visit::ValidateVisitor,
};

/// Check every registered record node, then the cross-node rules:
/// duplicate paths, parent chains, and rule/candidate declarations.
pub(crate) fn validate_schema(schema: &Schema) -> Result<(), ErrorTree> {
    // per-node: paths, identifiers, field lists
    let mut errors = validate_nodes(schema);

    // needs every node: duplicates, hierarchy, declarations
    validate_global(schema, &mut errors);

    errors.result()
}

// errors are filed under the route of the node that raised them
fn validate_nodes(schema: &Schema) -> ErrorTree {
    let mut visitor = ValidateVisitor::new();
    schema.accept(&mut visitor);

    visitor.errors
}

fn validate_global(schema: &Schema, errors: &mut ErrorTree) {
    for path in schema.duplicates() {
        errors.addf(*path, NodeError::DuplicatePath(path.to_string()));
    }

    hierarchy::validate_hierarchy(schema, errors);
    declaration::validate_declarations(schema, errors);
}
