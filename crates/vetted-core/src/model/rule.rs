use crate::value::AllowedValue;
use serde::Serialize;

///
/// RuleField
/// One field of a rule and the literals it may hold.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct RuleField {
    pub field: &'static str,
    pub values: &'static [AllowedValue],
}

impl RuleField {
    #[must_use]
    pub const fn new(field: &'static str, values: &'static [AllowedValue]) -> Self {
        Self { field, values }
    }
}

///
/// AllowedValueRule
///
/// Field name -> allowed literals, satisfied only when every named field is
/// present and allowed. `origin` is the declaring record type.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct AllowedValueRule {
    pub origin: &'static str,
    pub fields: &'static [RuleField],
}

impl AllowedValueRule {
    #[must_use]
    pub const fn new(origin: &'static str, fields: &'static [RuleField]) -> Self {
        Self { origin, fields }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.field)
    }

    #[must_use]
    pub fn allowed(&self, field: &str) -> Option<&'static [AllowedValue]> {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.values)
    }
}
