
use serde::Serialize;
use std::fmt::{self, Display};

///
/// Value
///
/// Comparable form of a field. Wrapped scalar types unwrap to exactly one
/// of these; scalar lists become `List`.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[remain::sorted]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Decimal(f64),
    Int(i64),
    List(Vec<Self>),
    Text(String),
    Uint(u64),
}

impl Value {
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    #[must_use]
    pub const fn family(&self) -> ValueFamily {
        match self {
            Self::Bool(_) => ValueFamily::Bool,
            Self::Decimal(_) => ValueFamily::Decimal,
            Self::Int(_) | Self::Uint(_) => ValueFamily::Numeric,
            Self::List(_) => ValueFamily::List,
            Self::Text(_) => ValueFamily::Text,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Text(s) => write!(f, "\"{s}\""),
            Self::Uint(u) => write!(f, "{u}"),
        }
    }
}

///
/// ValueFamily
///
/// Comparison family. Signed and unsigned integers share one family and
/// compare numerically.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[remain::sorted]
pub enum ValueFamily {
    Bool,
    Decimal,
    List,
    Numeric,
    Text,
}

///
/// Literal
///
/// A `const`-constructible rule literal.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[remain::sorted]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Text(&'static str),
    Uint(u64),
}

impl Literal {
    /// Mark this literal as an accepted but deprecated spelling of `replacement`.
    #[must_use]
    pub const fn deprecated(self, replacement: &'static str) -> AllowedValue {
        AllowedValue {
            literal: self,
            replacement: Some(replacement),
        }
    }

    /// Plain, non-deprecated allowed value.
    #[must_use]
    pub const fn allowed(self) -> AllowedValue {
        AllowedValue::new(self)
    }

    #[must_use]
    pub const fn family(&self) -> ValueFamily {
        match self {
            Self::Bool(_) => ValueFamily::Bool,
            Self::Int(_) | Self::Uint(_) => ValueFamily::Numeric,
            Self::Text(_) => ValueFamily::Text,
        }
    }

    /// Whether a single (non-list) value equals this literal.
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Bool(a), Value::Bool(b)) => a == b,
            (Self::Int(a), Value::Int(b)) => a == b,
            (Self::Uint(a), Value::Uint(b)) => a == b,
            (Self::Int(i), Value::Uint(u)) | (Self::Uint(u), Value::Int(i)) => {
                u64::try_from(*i).is_ok_and(|i| i == *u)
            }
            (Self::Text(a), Value::Text(b)) => *a == b.as_str(),
            _ => false,
        }
    }

    #[must_use]
    pub fn to_value(self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(b),
            Self::Int(i) => Value::Int(i),
            Self::Text(s) => Value::Text(s.to_string()),
            Self::Uint(u) => Value::Uint(u),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Text(s) => write!(f, "\"{s}\""),
            Self::Uint(u) => write!(f, "{u}"),
        }
    }
}

///
/// AllowedValue
///
/// One member of a rule field's allowed set. A deprecated member still
/// satisfies the rule but produces a notice naming its replacement.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct AllowedValue {
    pub literal: Literal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<&'static str>,
}

impl AllowedValue {
    #[must_use]
    pub const fn new(literal: Literal) -> Self {
        Self {
            literal,
            replacement: None,
        }
    }

    #[must_use]
    pub const fn text(s: &'static str) -> Self {
        Self::new(Literal::Text(s))
    }

    #[must_use]
    pub const fn is_deprecated(&self) -> bool {
        self.replacement.is_some()
    }
}

impl From<Literal> for AllowedValue {
    fn from(literal: Literal) -> Self {
        Self::new(literal)
    }
}
