use crate::prelude::*;

///
/// Rule
///
/// One declared allowed-value rule: every listed field must be present and
/// hold one of its allowed values.
///

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Rule {
    pub fields: &'static [RuleField],
}

impl Rule {
    #[must_use]
    pub const fn new(fields: &'static [RuleField]) -> Self {
        Self { fields }
    }
}

impl ValidateNode for Rule {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if self.fields.is_empty() {
            err!(errs, "rule constrains no fields");
        }

        for (i, rf) in self.fields.iter().enumerate() {
            if rf.values.is_empty() {
                err!(errs, "rule field '{}' has an empty value set", rf.field);
            }
            if self.fields[..i].iter().any(|prev| prev.field == rf.field) {
                err!(errs, "rule names field '{}' twice", rf.field);
            }
            for value in rf.values {
                if value.replacement == Some("") {
                    err!(
                        errs,
                        "deprecated value {} on '{}' has an empty replacement",
                        value.literal,
                        rf.field
                    );
                }
            }
        }

        errs.result()
    }
}

impl VisitableNode for Rule {}
