use crate::prelude::*;

///
/// Candidate
/// Ordered record types a supertype-declared field may narrow to.
///

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Candidate {
    pub field: &'static str,
    pub types: &'static [&'static str],
}

impl Candidate {
    #[must_use]
    pub const fn new(field: &'static str, types: &'static [&'static str]) -> Self {
        Self { field, types }
    }
}

impl ValidateNode for Candidate {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if self.types.is_empty() {
            err!(errs, "candidate list for '{}' is empty", self.field);
        }
        for (i, ty) in self.types.iter().enumerate() {
            if self.types[..i].contains(ty) {
                err!(errs, "candidate '{ty}' listed twice for '{}'", self.field);
            }
        }

        errs.result()
    }
}

impl VisitableNode for Candidate {}
