use crate::{prelude::*, validate::naming::validate_field_ident};
use derive_more::Display;
use vetted_core::{model::FieldModel, types::Scalar};

///
/// FieldList
///

#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct FieldList {
    pub fields: &'static [Field],
}

impl FieldList {
    #[must_use]
    pub const fn new(fields: &'static [Field]) -> Self {
        Self { fields }
    }

    #[must_use]
    pub fn get(&self, ident: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.ident == ident)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Field> {
        self.fields.iter()
    }
}

impl ValidateNode for FieldList {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.ident == field.ident) {
                err!(errs, "field '{}' is declared twice", field.ident);
            }
        }

        errs.result()
    }
}

impl VisitableNode for FieldList {
    fn drive<V: Visitor>(&self, v: &mut V) {
        for node in self.fields {
            node.accept(v);
        }
    }
}

///
/// Field
///

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Field {
    pub ident: &'static str,
    pub item: Item,
    pub cardinality: Cardinality,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Literal>,
}

impl Field {
    #[must_use]
    pub const fn scalar(ident: &'static str, kind: ScalarKind) -> Self {
        Self {
            ident,
            item: Item::Scalar(kind),
            cardinality: Cardinality::One,
            default: None,
        }
    }

    #[must_use]
    pub const fn record(ident: &'static str, path: &'static str) -> Self {
        Self {
            ident,
            item: Item::Record(path),
            cardinality: Cardinality::One,
            default: None,
        }
    }

    #[must_use]
    pub const fn opt(mut self) -> Self {
        self.cardinality = Cardinality::Opt;
        self
    }

    #[must_use]
    pub const fn many(mut self) -> Self {
        self.cardinality = Cardinality::Many;
        self
    }

    #[must_use]
    pub const fn default(mut self, literal: Literal) -> Self {
        self.default = Some(literal);
        self
    }

    /// Runtime model for this declaration.
    #[must_use]
    pub const fn model(&self) -> FieldModel {
        FieldModel {
            name: self.ident,
            kind: self.item.kind(),
            cardinality: self.cardinality,
            default: self.default,
        }
    }
}

impl ValidateNode for Field {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(e) = validate_field_ident(self.ident) {
            errs.add(e);
        }

        if let Some(literal) = self.default {
            match self.item {
                Item::Scalar(kind) => {
                    if let Err(e) = Scalar::from_literal(kind, literal) {
                        err!(errs, "default {literal} is not a valid {kind}: {e}");
                    }
                }
                Item::Record(path) => {
                    err!(errs, "record field of type '{path}' cannot have a default");
                }
            }
        }

        errs.result()
    }
}

impl VisitableNode for Field {
    fn route_key(&self) -> String {
        self.ident.to_string()
    }
}

///
/// Item
/// What a field holds: a scalar kind or a record type path.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
pub enum Item {
    #[display("record {_0}")]
    Record(&'static str),

    #[display("{_0}")]
    Scalar(ScalarKind),
}

impl Item {
    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::Record(path) => FieldKind::Record(path),
            Self::Scalar(kind) => FieldKind::Scalar(kind),
        }
    }

    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(self, Self::Scalar(_))
    }
}
