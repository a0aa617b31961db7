use crate::{compose::lineage, node::Schema, prelude::*};

/// Every parent must exist, chains must be acyclic, and a type may not
/// redeclare a field it inherits.
pub fn validate_hierarchy(schema: &Schema, errs: &mut ErrorTree) {
    for (path, node) in schema.records() {
        let chain = match lineage(schema, node) {
            Ok(chain) => chain,
            Err(e) => {
                errs.addf(path, e);
                continue;
            }
        };

        for field in node.fields.iter() {
            let inherited_from = chain[1..]
                .iter()
                .find(|ancestor| ancestor.fields.get(field.ident).is_some());

            if let Some(ancestor) = inherited_from {
                errs.addf(
                    path,
                    format!(
                        "field '{}' redeclares a field inherited from '{}'",
                        field.ident, ancestor.path
                    ),
                );
            }
        }
    }
}
