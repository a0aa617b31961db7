use crate::types::Scalar;
use serde::Serialize;
use std::collections::BTreeMap;

///
/// Record
///
/// An instance of a named record type. `path` is the concrete type; after
/// narrowing it names the candidate type the data was validated against.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Record {
    pub path: &'static str,
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    #[must_use]
    pub const fn new(path: &'static str) -> Self {
        Self {
            path,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.fields.insert(name.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Scalar held directly by a field, if any.
    #[must_use]
    pub fn scalar(&self, name: &str) -> Option<&Scalar> {
        match self.fields.get(name) {
            Some(FieldValue::Scalar(s)) => Some(s),
            _ => None,
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    /// Same field data, tagged as another record type.
    #[must_use]
    pub fn retag(mut self, path: &'static str) -> Self {
        self.path = path;
        self
    }
}

///
/// FieldValue
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[remain::sorted]
#[serde(untagged)]
pub enum FieldValue {
    List(Vec<Self>),
    Record(Box<Record>),
    Scalar(Scalar),
}

impl FieldValue {
    #[must_use]
    pub fn list<T: Into<Self>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Record(_) => "record",
            Self::Scalar(_) => "scalar",
        }
    }
}

impl From<Scalar> for FieldValue {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<Record> for FieldValue {
    fn from(r: Record) -> Self {
        Self::Record(Box::new(r))
    }
}

impl From<Vec<Self>> for FieldValue {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Scalar(Scalar::text(s))
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Scalar(Scalar::Boolean(b))
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        Self::Scalar(Scalar::Integer(i))
    }
}
