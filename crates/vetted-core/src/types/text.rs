use crate::types::{ScalarKind, TypeError};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use derive_more::{AsRef, Deref, Display};
use serde::Serialize;

///
/// Uuid
/// 8-4-4-4-12 hex groups, stored lowercase.
///

#[derive(AsRef, Clone, Debug, Deref, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct Uuid(String);

impl Uuid {
    pub const KIND: ScalarKind = ScalarKind::Uuid;

    pub fn try_new(s: impl Into<String>) -> Result<Self, TypeError> {
        let s = s.into();
        match check_uuid(&s) {
            Ok(()) => Ok(Self(s.to_ascii_lowercase())),
            Err(reason) => Err(TypeError::Invalid {
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
}

impl TryFrom<&str> for Uuid {
    type Error = TypeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::try_new(s)
    }
}

// ============================================================================
// Lexical checks
// ============================================================================

#[allow(clippy::unnecessary_wraps)]
pub(super) const fn check_any(_: &str) -> Result<(), &'static str> {
    Ok(())
}

pub(super) fn check_markup_line(s: &str) -> Result<(), &'static str> {
    if s.contains(['\n', '\r']) {
        return Err("line breaks are not allowed");
    }

    Ok(())
}

pub(super) fn check_token(s: &str) -> Result<(), &'static str> {
    let mut chars = s.chars();

    let Some(first) = chars.next() else {
        return Err("token is empty");
    };
    if !(first.is_alphabetic() || first == '_' || first == ':') {
        return Err("token must start with a letter, '_' or ':'");
    }
    if !chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.')) {
        return Err("token may only contain letters, digits, '_', ':', '-' and '.'");
    }

    Ok(())
}

pub(super) fn check_uri(s: &str) -> Result<(), &'static str> {
    if s.chars().any(char::is_whitespace) {
        return Err("whitespace is not allowed");
    }

    let Some((scheme, rest)) = s.split_once(':') else {
        return Err("missing scheme");
    };
    if !is_scheme(scheme) {
        return Err("invalid scheme");
    }
    if rest.is_empty() {
        return Err("nothing follows the scheme");
    }

    Ok(())
}

pub(super) fn check_uri_reference(s: &str) -> Result<(), &'static str> {
    if s.is_empty() {
        return Err("reference is empty");
    }
    if s.chars().any(char::is_whitespace) {
        return Err("whitespace is not allowed");
    }

    // an absolute reference must carry a well-formed scheme
    if let Some((scheme, _)) = s.split_once(':')
        && !scheme.contains(['/', '?', '#'])
        && !is_scheme(scheme)
    {
        return Err("invalid scheme");
    }

    Ok(())
}

pub(super) fn check_base64(s: &str) -> Result<(), &'static str> {
    if s.is_empty() {
        return Err("base64 data is empty");
    }

    STANDARD.decode(s).map(|_| ()).map_err(|_| "invalid base64")
}

pub(super) fn check_media_type(s: &str) -> Result<(), &'static str> {
    let mut parts = s.split(';');
    let essence = parts.next().unwrap_or_default().trim();

    let Some((ty, subtype)) = essence.split_once('/') else {
        return Err("expected type/subtype");
    };
    if !is_media_name(ty) || !is_media_name(subtype) {
        return Err("invalid type or subtype");
    }

    for param in parts {
        let Some((name, value)) = param.trim().split_once('=') else {
            return Err("parameter must be name=value");
        };
        if !is_media_name(name) || value.is_empty() {
            return Err("invalid parameter");
        }
    }

    Ok(())
}

fn check_uuid(s: &str) -> Result<(), &'static str> {
    const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

    let mut groups = s.split('-');
    for len in GROUPS {
        match groups.next() {
            Some(g) if g.len() == len && g.bytes().all(|b| b.is_ascii_hexdigit()) => {}
            _ => return Err("expected 8-4-4-4-12 hex groups"),
        }
    }
    if groups.next().is_some() {
        return Err("expected 8-4-4-4-12 hex groups");
    }

    Ok(())
}

// ---- helpers -----------------------------------------------------------

fn is_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();

    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn is_media_name(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric()
                || matches!(b, b'!' | b'#' | b'$' | b'&' | b'-' | b'^' | b'_' | b'.' | b'+')
        })
}
