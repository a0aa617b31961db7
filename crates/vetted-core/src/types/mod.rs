//! Wrapped scalar types.
//!
//! Every field scalar is one of a closed set of semantically distinct
//! wrappers. Each wrapper validates its lexical form on construction and
//! unwraps to exactly one comparable [`Value`].

///
/// text_scalar
/// Declares a `String` newtype whose lexical form is checked by `$check`.
///

macro_rules! text_scalar {
    ($(#[$meta:meta])* $name:ident => $check:path) => {
        $(#[$meta])*
        #[derive(
            ::derive_more::AsRef,
            Clone,
            Debug,
            ::derive_more::Deref,
            ::derive_more::Display,
            Eq,
            Hash,
            Ord,
            PartialEq,
            PartialOrd,
            ::serde::Serialize,
        )]
        #[as_ref(forward)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub const KIND: $crate::types::ScalarKind = $crate::types::ScalarKind::$name;

            pub fn try_new(s: impl Into<String>) -> Result<Self, $crate::types::TypeError> {
                let s = s.into();
                match $check(&s) {
                    Ok(()) => Ok(Self(s)),
                    Err(reason) => Err($crate::types::TypeError::Invalid {
                        kind: Self::KIND,
                        input: s,
                        reason,
                    }),
                }
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl TryFrom<&str> for $name {
            type Error = $crate::types::TypeError;

            fn try_from(s: &str) -> Result<Self, Self::Error> {
                Self::try_new(s)
            }
        }
    };
}

mod numeric;
mod temporal;
mod text;


pub use numeric::{Decimal, NonNegativeInteger, PositiveInteger};
pub use text::Uuid;

use crate::value::{Literal, Value, ValueFamily};
use derive_more::Display;
use serde::Serialize;
use thiserror::Error as ThisError;

///
/// TypeError
///

#[derive(Clone, Debug, PartialEq, Serialize, ThisError)]
#[remain::sorted]
pub enum TypeError {
    #[error("'{input}' is not a valid {kind}: {reason}")]
    Invalid {
        kind: ScalarKind,
        input: String,
        reason: &'static str,
    },

    #[error("literal {literal} cannot be held by a {kind} field")]
    LiteralMismatch { kind: ScalarKind, literal: Literal },
}

// ============================================================================
// Text-backed scalars
// ============================================================================

text_scalar!(
    /// Base64Binary
    /// Non-empty base64 with canonical padding.
    Base64Binary => text::check_base64
);
text_scalar!(
    /// Date
    /// `YYYY-MM-DD`, optionally followed by `Z` or `±hh:mm`.
    Date => temporal::check_date
);
text_scalar!(
    /// DateTimeWithTimezone
    /// RFC 3339 timestamp with a mandatory offset.
    DateTimeWithTimezone => temporal::check_date_time
);
text_scalar!(
    /// MarkupLine
    /// Single-line markup; no line breaks.
    MarkupLine => text::check_markup_line
);
text_scalar!(
    /// MarkupMultiline
    MarkupMultiline => text::check_any
);
text_scalar!(
    /// MediaType
    /// `type/subtype` with optional `+suffix` and `;param=value` pairs.
    MediaType => text::check_media_type
);
text_scalar!(
    /// Text
    Text => text::check_any
);
text_scalar!(
    /// Token
    /// Non-colonized name: letter, `_` or `:` first, then letters, digits
    /// and `_ : - .`.
    Token => text::check_token
);
text_scalar!(
    /// Uri
    /// Absolute URI (`scheme:rest`).
    Uri => text::check_uri
);
text_scalar!(
    /// UriReference
    /// Absolute URI or relative reference.
    UriReference => text::check_uri_reference
);

impl Text {
    /// Any string is valid text.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

// ============================================================================
// ScalarKind
// ============================================================================

///
/// ScalarKind
/// The declared kind of a scalar field.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[remain::sorted]
pub enum ScalarKind {
    Base64Binary,
    Boolean,
    Date,
    DateTimeWithTimezone,
    Decimal,
    Integer,
    MarkupLine,
    MarkupMultiline,
    MediaType,
    NonNegativeInteger,
    PositiveInteger,
    Text,
    Token,
    Uri,
    UriReference,
    Uuid,
}

impl ScalarKind {
    /// Comparison family of values of this kind.
    #[must_use]
    pub const fn family(self) -> ValueFamily {
        match self {
            Self::Boolean => ValueFamily::Bool,
            Self::Decimal => ValueFamily::Decimal,
            Self::Integer | Self::NonNegativeInteger | Self::PositiveInteger => {
                ValueFamily::Numeric
            }
            _ => ValueFamily::Text,
        }
    }
}

// ============================================================================
// Scalar
// ============================================================================

///
/// Scalar
/// A validated scalar held by a record field.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[remain::sorted]
#[serde(untagged)]
pub enum Scalar {
    Base64Binary(Base64Binary),
    Boolean(bool),
    Date(Date),
    DateTimeWithTimezone(DateTimeWithTimezone),
    Decimal(Decimal),
    Integer(i64),
    MarkupLine(MarkupLine),
    MarkupMultiline(MarkupMultiline),
    MediaType(MediaType),
    NonNegativeInteger(NonNegativeInteger),
    PositiveInteger(PositiveInteger),
    Text(Text),
    Token(Token),
    Uri(Uri),
    UriReference(UriReference),
    Uuid(Uuid),
}

impl Scalar {
    /// Plain text scalar; never fails.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(Text::new(s))
    }

    #[must_use]
    pub const fn kind(&self) -> ScalarKind {
        match self {
            Self::Base64Binary(_) => ScalarKind::Base64Binary,
            Self::Boolean(_) => ScalarKind::Boolean,
            Self::Date(_) => ScalarKind::Date,
            Self::DateTimeWithTimezone(_) => ScalarKind::DateTimeWithTimezone,
            Self::Decimal(_) => ScalarKind::Decimal,
            Self::Integer(_) => ScalarKind::Integer,
            Self::MarkupLine(_) => ScalarKind::MarkupLine,
            Self::MarkupMultiline(_) => ScalarKind::MarkupMultiline,
            Self::MediaType(_) => ScalarKind::MediaType,
            Self::NonNegativeInteger(_) => ScalarKind::NonNegativeInteger,
            Self::PositiveInteger(_) => ScalarKind::PositiveInteger,
            Self::Text(_) => ScalarKind::Text,
            Self::Token(_) => ScalarKind::Token,
            Self::Uri(_) => ScalarKind::Uri,
            Self::UriReference(_) => ScalarKind::UriReference,
            Self::Uuid(_) => ScalarKind::Uuid,
        }
    }

    /// Unwrap to the comparable form.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Boolean(b) => Value::Bool(*b),
            Self::Decimal(d) => Value::Decimal(d.get()),
            Self::Integer(i) => Value::Int(*i),
            Self::NonNegativeInteger(n) => Value::Uint(n.get()),
            Self::PositiveInteger(n) => Value::Uint(n.get()),
            _ => Value::Text(self.lexical()),
        }
    }

    /// Canonical lexical form, the input accepted by [`Self::parse`].
    #[must_use]
    pub fn lexical(&self) -> String {
        match self {
            Self::Base64Binary(s) => s.to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::Date(s) => s.to_string(),
            Self::DateTimeWithTimezone(s) => s.to_string(),
            Self::Decimal(d) => d.to_string(),
            Self::Integer(i) => i.to_string(),
            Self::MarkupLine(s) => s.to_string(),
            Self::MarkupMultiline(s) => s.to_string(),
            Self::MediaType(s) => s.to_string(),
            Self::NonNegativeInteger(n) => n.to_string(),
            Self::PositiveInteger(n) => n.to_string(),
            Self::Text(s) => s.to_string(),
            Self::Token(s) => s.to_string(),
            Self::Uri(s) => s.to_string(),
            Self::UriReference(s) => s.to_string(),
            Self::Uuid(s) => s.to_string(),
        }
    }

    /// Parse a lexical form as the given kind.
    pub fn parse(kind: ScalarKind, input: &str) -> Result<Self, TypeError> {
        let invalid = |reason| TypeError::Invalid {
            kind,
            input: input.to_string(),
            reason,
        };

        let scalar = match kind {
            ScalarKind::Base64Binary => Self::Base64Binary(Base64Binary::try_new(input)?),
            ScalarKind::Boolean => match input {
                "true" | "1" => Self::Boolean(true),
                "false" | "0" => Self::Boolean(false),
                _ => return Err(invalid("expected true or false")),
            },
            ScalarKind::Date => Self::Date(Date::try_new(input)?),
            ScalarKind::DateTimeWithTimezone => {
                Self::DateTimeWithTimezone(DateTimeWithTimezone::try_new(input)?)
            }
            ScalarKind::Decimal => {
                let d = input
                    .parse::<f64>()
                    .map_err(|_| invalid("not a decimal number"))?;
                Self::Decimal(Decimal::try_new(d)?)
            }
            ScalarKind::Integer => Self::Integer(
                input
                    .parse::<i64>()
                    .map_err(|_| invalid("not an integer"))?,
            ),
            ScalarKind::MarkupLine => Self::MarkupLine(MarkupLine::try_new(input)?),
            ScalarKind::MarkupMultiline => Self::MarkupMultiline(MarkupMultiline::try_new(input)?),
            ScalarKind::MediaType => Self::MediaType(MediaType::try_new(input)?),
            ScalarKind::NonNegativeInteger => {
                let n = input
                    .parse::<u64>()
                    .map_err(|_| invalid("not a non-negative integer"))?;
                Self::NonNegativeInteger(NonNegativeInteger::new(n))
            }
            ScalarKind::PositiveInteger => {
                let n = input
                    .parse::<u64>()
                    .map_err(|_| invalid("not a positive integer"))?;
                Self::PositiveInteger(PositiveInteger::try_new(n)?)
            }
            ScalarKind::Text => Self::text(input),
            ScalarKind::Token => Self::Token(Token::try_new(input)?),
            ScalarKind::Uri => Self::Uri(Uri::try_new(input)?),
            ScalarKind::UriReference => Self::UriReference(UriReference::try_new(input)?),
            ScalarKind::Uuid => Self::Uuid(Uuid::try_new(input)?),
        };

        Ok(scalar)
    }

    /// Re-validate this scalar as another kind through its lexical form.
    pub fn coerce(&self, kind: ScalarKind) -> Result<Self, TypeError> {
        if self.kind() == kind {
            return Ok(self.clone());
        }

        Self::parse(kind, &self.lexical())
    }

    /// Build the scalar a field of `kind` holds for a declared literal.
    pub fn from_literal(kind: ScalarKind, literal: Literal) -> Result<Self, TypeError> {
        let mismatch = || TypeError::LiteralMismatch { kind, literal };

        match (literal, kind.family()) {
            (Literal::Bool(b), ValueFamily::Bool) => Ok(Self::Boolean(b)),
            (Literal::Int(i), ValueFamily::Numeric) => Self::parse(kind, &i.to_string()),
            (Literal::Uint(u), ValueFamily::Numeric) => Self::parse(kind, &u.to_string()),
            (Literal::Text(s), ValueFamily::Text) => Self::parse(kind, s),
            _ => Err(mismatch()),
        }
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::text(s)
    }
}

impl From<Token> for Scalar {
    fn from(t: Token) -> Self {
        Self::Token(t)
    }
}

impl From<Uri> for Scalar {
    fn from(u: Uri) -> Self {
        Self::Uri(u)
    }
}

impl From<Uuid> for Scalar {
    fn from(u: Uuid) -> Self {
        Self::Uuid(u)
    }
}
