use crate::{
    compose::{inherited_fields, is_subtype, lineage},
    node::{Candidate, Field, Item, RecordNode, Rule, Schema},
    prelude::*,
};
use vetted_core::types::Scalar;

/// Rules and candidate lists may only reference fields the type has
/// (declared or inherited), with values that fit those fields.
pub fn validate_declarations(schema: &Schema, errs: &mut ErrorTree) {
    for (path, node) in schema.records() {
        // broken chains are reported by the hierarchy pass
        let Ok(chain) = lineage(schema, node) else {
            continue;
        };
        let fields = inherited_fields(&chain);

        let mut record_errs = ErrorTree::new();
        for (i, rule) in node.rules.iter().enumerate() {
            validate_rule(i, rule, &fields, &mut record_errs);
        }
        validate_candidates(schema, node, &fields, &mut record_errs);

        errs.merge_at(path, record_errs);
    }
}

fn find<'a>(fields: &[&'a Field], ident: &str) -> Option<&'a Field> {
    fields.iter().copied().find(|f| f.ident == ident)
}

fn validate_rule(index: usize, rule: &Rule, fields: &[&Field], errs: &mut ErrorTree) {
    for rf in rule.fields {
        let Some(field) = find(fields, rf.field) else {
            err!(errs, "rule {index} references unknown field '{}'", rf.field);
            continue;
        };

        let Item::Scalar(kind) = field.item else {
            err!(
                errs,
                "rule {index} constrains '{}', which holds a {}",
                rf.field,
                field.item
            );
            continue;
        };

        for allowed in rf.values {
            if let Err(e) = Scalar::from_literal(kind, allowed.literal) {
                err!(
                    errs,
                    "rule {index}: value {} does not fit field '{}': {e}",
                    allowed.literal,
                    rf.field
                );
            }

            if let Some(replacement) = allowed.replacement {
                let current = rf
                    .values
                    .iter()
                    .any(|a| !a.is_deprecated() && a.literal == Literal::Text(replacement));
                if !current {
                    err!(
                        errs,
                        "rule {index}: replacement \"{replacement}\" for {} is not a current value of '{}'",
                        allowed.literal,
                        rf.field
                    );
                }
            }
        }
    }
}

fn validate_candidates(
    schema: &Schema,
    node: &RecordNode,
    fields: &[&Field],
    errs: &mut ErrorTree,
) {
    for (i, candidate) in node.candidates.iter().enumerate() {
        if node.candidates[..i]
            .iter()
            .any(|c| c.field == candidate.field)
        {
            err!(errs, "candidate list for '{}' is declared twice", candidate.field);
        }

        let Some(field) = find(fields, candidate.field) else {
            err!(
                errs,
                "candidate list references unknown field '{}'",
                candidate.field
            );
            continue;
        };

        match field.item {
            Item::Scalar(kind) => err!(
                errs,
                "candidate list on '{}', which holds a scalar {kind}",
                candidate.field
            ),
            Item::Record(declared) => validate_candidate_types(schema, candidate, declared, errs),
        }
    }
}

fn validate_candidate_types(
    schema: &Schema,
    candidate: &Candidate,
    declared: &'static str,
    errs: &mut ErrorTree,
) {
    for ty in candidate.types {
        if schema.get_record(ty).is_err() {
            err!(
                errs,
                "candidate '{ty}' for '{}' is not a registered record type",
                candidate.field
            );
        } else if !is_subtype(schema, ty, declared) {
            err!(
                errs,
                "candidate '{ty}' for '{}' does not derive from '{declared}'",
                candidate.field
            );
        }
    }
}
