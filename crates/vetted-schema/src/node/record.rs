use crate::{prelude::*, validate::naming::validate_record_path};

///
/// RecordNode
///
/// Declaration of one record type: its own fields, allowed-value rules,
/// narrowing candidates and custom checks, plus an optional parent whose
/// declarations it inherits.
///

#[derive(Clone, Copy, Debug, Serialize)]
pub struct RecordNode {
    pub path: &'static str,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<&'static str>,

    pub fields: FieldList,

    #[serde(default, skip_serializing_if = "<[_]>::is_empty")]
    pub rules: &'static [Rule],

    #[serde(default, skip_serializing_if = "<[_]>::is_empty")]
    pub candidates: &'static [Candidate],

    #[serde(skip)]
    pub checks: &'static [CustomCheck],
}

impl RecordNode {
    #[must_use]
    pub const fn new(path: &'static str) -> Self {
        Self {
            path,
            parent: None,
            fields: FieldList::new(&[]),
            rules: &[],
            candidates: &[],
            checks: &[],
        }
    }

    #[must_use]
    pub const fn parent(mut self, parent: &'static str) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub const fn fields(mut self, fields: &'static [Field]) -> Self {
        self.fields = FieldList::new(fields);
        self
    }

    #[must_use]
    pub const fn rules(mut self, rules: &'static [Rule]) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub const fn candidates(mut self, candidates: &'static [Candidate]) -> Self {
        self.candidates = candidates;
        self
    }

    #[must_use]
    pub const fn checks(mut self, checks: &'static [CustomCheck]) -> Self {
        self.checks = checks;
        self
    }

    /// Last segment of the path.
    #[must_use]
    pub fn ident(&self) -> &'static str {
        self.path.rsplit("::").next().unwrap_or(self.path)
    }
}

impl ValidateNode for RecordNode {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(e) = validate_record_path(self.path) {
            errs.add(e);
        }
        if self.parent == Some(self.path) {
            err!(errs, "record type '{}' names itself as parent", self.path);
        }
        for (i, check) in self.checks.iter().enumerate() {
            if self.checks[..i].iter().any(|c| c.name == check.name) {
                err!(errs, "custom check '{}' is declared twice", check.name);
            }
        }

        errs.result()
    }
}

impl VisitableNode for RecordNode {
    fn route_key(&self) -> String {
        self.path.to_string()
    }

    fn drive<V: Visitor>(&self, v: &mut V) {
        self.fields.accept(v);
        for node in self.rules {
            node.accept(v);
        }
        for node in self.candidates {
            node.accept(v);
        }
    }
}
