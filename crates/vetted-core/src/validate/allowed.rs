//! Allowed-value validation.
//!
//! Per field group: OR across the rules that fit inside the group, AND
//! across the fields of one rule. Every group must be satisfied.

use crate::{
    config::DeprecationPolicy,
    model::{AllowedValueRule, RuleField},
    record::Record,
    snapshot::{FieldPresence, Snapshot},
    validate::partition::FieldGroup,
    value::{Literal, Value},
};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    fmt::{self, Display},
};

///
/// ValidationOutcome
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ValidationOutcome {
    Valid,
    Invalid(Vec<GroupFailure>),
}

impl ValidationOutcome {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    #[must_use]
    pub fn failures(&self) -> &[GroupFailure] {
        match self {
            Self::Valid => &[],
            Self::Invalid(failures) => failures,
        }
    }
}

///
/// GroupFailure
///
/// One unsatisfied group: the values found (`None` when absent) and every
/// rule that could have satisfied it.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GroupFailure {
    pub fields: FieldGroup,
    pub found: BTreeMap<&'static str, Option<Value>>,
    pub rules: Vec<RuleReport>,
}

impl Display for GroupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("no allowed-value rule satisfied; found ")?;
        for (i, (field, value)) in self.found.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match value {
                Some(v) => write!(f, "{field}={v}")?,
                None => write!(f, "{field}=<absent>")?,
            }
        }

        f.write_str("; expected one of ")?;
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{rule}")?;
        }

        Ok(())
    }
}

///
/// RuleReport
/// A candidate rule as shown in diagnostics.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RuleReport {
    /// Position in the type's composed rule list.
    pub index: usize,
    pub origin: &'static str,
    pub expected: BTreeMap<&'static str, Vec<Literal>>,
}

impl RuleReport {
    fn new(index: usize, rule: &AllowedValueRule) -> Self {
        let expected = rule
            .fields
            .iter()
            .map(|rf| (rf.field, rf.values.iter().map(|a| a.literal).collect()))
            .collect();

        Self {
            index,
            origin: rule.origin,
            expected,
        }
    }
}

impl Display for RuleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (field, literals)) in self.expected.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}: [")?;
            for (j, lit) in literals.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{lit}")?;
            }
            f.write_str("]")?;
        }
        write!(f, "}} ({})", self.origin)
    }
}

///
/// DeprecatedMatch
/// A field satisfied its rule through a deprecated literal.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct DeprecatedMatch {
    pub field: &'static str,
    pub value: Literal,
    pub replacement: &'static str,
}

///
/// Evaluation
///

#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub outcome: ValidationOutcome,
    pub deprecations: Vec<DeprecatedMatch>,
}

/// Check `record` against a composed rule set and its cached groups.
#[must_use]
pub fn validate_allowed(
    record: &Record,
    rules: &[AllowedValueRule],
    groups: &[FieldGroup],
) -> ValidationOutcome {
    evaluate(&Snapshot::of(record), rules, groups, DeprecationPolicy::Warn).outcome
}

/// Evaluate a snapshot, also reporting deprecated matches under `policy`.
#[must_use]
pub fn evaluate(
    snapshot: &Snapshot,
    rules: &[AllowedValueRule],
    groups: &[FieldGroup],
    policy: DeprecationPolicy,
) -> Evaluation {
    let mut deprecations = Vec::new();

    let mentioned = rules
        .iter()
        .flat_map(|rule| rule.field_names())
        .any(|field| snapshot.contains(field));
    if !mentioned {
        return Evaluation {
            outcome: ValidationOutcome::Valid,
            deprecations,
        };
    }

    let mut failures = Vec::new();
    for group in groups {
        let candidates: Vec<(usize, &AllowedValueRule)> = rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| group.covers(rule))
            .collect();

        // no rule fits: vacuously satisfied
        if candidates.is_empty() {
            continue;
        }

        let satisfied = candidates
            .iter()
            .find_map(|(_, rule)| rule_matches(snapshot, rule, policy));

        match satisfied {
            Some(hits) => deprecations.extend(hits),
            None => failures.push(GroupFailure {
                fields: group.clone(),
                found: group
                    .iter()
                    .map(|field| match snapshot.get(field) {
                        FieldPresence::Present(v) => (field, Some(v.clone())),
                        FieldPresence::Missing => (field, None),
                    })
                    .collect(),
                rules: candidates
                    .iter()
                    .map(|(index, rule)| RuleReport::new(*index, rule))
                    .collect(),
            }),
        }
    }

    let outcome = if failures.is_empty() {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::Invalid(failures)
    };

    Evaluation {
        outcome,
        deprecations,
    }
}

// Some(deprecated hits) when every field of the rule is present and allowed.
fn rule_matches(
    snapshot: &Snapshot,
    rule: &AllowedValueRule,
    policy: DeprecationPolicy,
) -> Option<Vec<DeprecatedMatch>> {
    let mut hits = Vec::new();

    for rf in rule.fields {
        let FieldPresence::Present(value) = snapshot.get(rf.field) else {
            return None;
        };

        match value {
            Value::List(items) => {
                if items.is_empty() {
                    return None;
                }
                for item in items {
                    hits.extend(match_value(rf, item, policy)?);
                }
            }
            single => hits.extend(match_value(rf, single, policy)?),
        }
    }

    Some(hits)
}

// Outer None: not allowed. Inner Some: allowed only as a deprecated spelling.
fn match_value(
    rf: &RuleField,
    value: &Value,
    policy: DeprecationPolicy,
) -> Option<Option<DeprecatedMatch>> {
    if rf
        .values
        .iter()
        .any(|a| !a.is_deprecated() && a.literal.matches(value))
    {
        return Some(None);
    }
    if policy == DeprecationPolicy::Reject {
        return None;
    }

    let allowed = rf.values.iter().find(|a| a.literal.matches(value))?;
    let hit = allowed
        .replacement
        .filter(|_| policy == DeprecationPolicy::Warn)
        .map(|replacement| DeprecatedMatch {
            field: rf.field,
            value: allowed.literal,
            replacement,
        });

    Some(hit)
}

///
/// TESTS
///
