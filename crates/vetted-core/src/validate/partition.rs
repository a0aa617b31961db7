//! Rule group partitioning.
//!
//! Field names are nodes; two names are joined when one rule mentions both.
//! The groups are the connected components of that graph.

use crate::model::AllowedValueRule;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

///
/// FieldGroup
/// A sorted set of field names that share at least one rule, transitively.
///

#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct FieldGroup(BTreeSet<&'static str>);

impl FieldGroup {
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains(field)
    }

    /// Whether every field of `rule` lies inside this group.
    #[must_use]
    pub fn covers(&self, rule: &AllowedValueRule) -> bool {
        rule.field_names().all(|f| self.contains(f))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<const N: usize> From<[&'static str; N]> for FieldGroup {
    fn from(fields: [&'static str; N]) -> Self {
        Self(fields.into_iter().collect())
    }
}

/// Partition the fields named by `rules`.
#[must_use]
pub fn partition(rules: &[AllowedValueRule]) -> Vec<FieldGroup> {
    partition_keys(rules.iter().map(|rule| rule.field_names()))
}

/// Partition arbitrary key sets; each set stands for one rule.
///
/// Groups come back sorted, so the result does not depend on the order of
/// the key sets or of the keys within them.
pub fn partition_keys<I, K>(key_sets: I) -> Vec<FieldGroup>
where
    I: IntoIterator<Item = K>,
    K: IntoIterator<Item = &'static str>,
{
    let mut index: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut sets = DisjointSets::default();

    for keys in key_sets {
        let mut first = None;
        for key in keys {
            let id = *index.entry(key).or_insert_with(|| sets.make());
            match first {
                None => first = Some(id),
                Some(root) => sets.union(root, id),
            }
        }
    }

    let mut groups: BTreeMap<usize, BTreeSet<&'static str>> = BTreeMap::new();
    for (key, id) in index {
        groups.entry(sets.find(id)).or_default().insert(key);
    }

    let mut groups: Vec<FieldGroup> = groups.into_values().map(FieldGroup).collect();
    groups.sort();

    groups
}

///
/// DisjointSets
/// Union-find with path halving and union by rank.
///

#[derive(Default)]
struct DisjointSets {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSets {
    fn make(&mut self) -> usize {
        let id = self.parent.len();
        self.parent.push(id);
        self.rank.push(0);

        id
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }

        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }

        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] = self.rank[ra].saturating_add(1);
            }
        }
    }
}

///
/// TESTS
///
