use derive_more::Display;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error as ThisError;
use vetted_core::{
    config::ConfigError,
    error::{Error as CoreError, ErrorClass},
    types::TypeError,
    validate::{NarrowError, ValidateError},
};
use vetted_schema::{Error as SchemaError, build::BuildError};

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Debug, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Rendered issues keyed by field path, for rejected documents.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub issues: BTreeMap<String, Vec<String>>,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
            issues: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_issues(mut self, issues: BTreeMap<String, Vec<String>>) -> Self {
        self.issues = issues;
        self
    }

    /// Rendered issues at one path key (`""` is the root record).
    #[must_use]
    pub fn issues_at(&self, key: &str) -> &[String] {
        self.issues.get(key).map(Vec::as_slice).unwrap_or_default()
    }
}

impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Config(e) => e.into(),
            CoreError::Narrow(e) => e.into(),
            CoreError::Type(e) => e.into(),
            CoreError::Validate(e) => e.into(),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Configuration, ErrorOrigin::Config, err.to_string())
    }
}

impl From<NarrowError> for Error {
    fn from(err: NarrowError) -> Self {
        let key = err.index().map_or_else(
            || err.field().to_string(),
            |i| format!("{}[{i}]", err.field()),
        );
        let message = err.to_string();

        Self::new(ErrorKind::Rejected, ErrorOrigin::Narrow, message.clone())
            .with_issues(BTreeMap::from([(key, vec![message])]))
    }
}

impl From<TypeError> for Error {
    fn from(err: TypeError) -> Self {
        Self::new(ErrorKind::Rejected, ErrorOrigin::Types, err.to_string())
    }
}

impl From<ValidateError> for Error {
    fn from(err: ValidateError) -> Self {
        let kind = match &err {
            ValidateError::UnknownRecordType(_) => ErrorKind::Unsupported,
            ValidateError::ValidationFailed(_) => ErrorKind::Rejected,
        };
        let issues = err
            .issues()
            .map(|issues| {
                issues
                    .iter()
                    .map(|(key, list)| (key.clone(), list.iter().map(ToString::to_string).collect()))
                    .collect()
            })
            .unwrap_or_default();

        Self::new(kind, ErrorOrigin::Validate, err.to_string()).with_issues(issues)
    }
}

impl From<SchemaError> for Error {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::BuildError(BuildError::MalformedDeclaration(errs)) => {
                let mut issues: BTreeMap<String, Vec<String>> = BTreeMap::new();
                for (route, msg) in errs.flatten() {
                    issues.entry(route).or_default().push(msg);
                }

                Self::new(
                    ErrorKind::Schema,
                    ErrorOrigin::Schema,
                    format!("malformed rule declaration:\n{errs}"),
                )
                .with_issues(issues)
            }
            SchemaError::NodeError(e) => {
                Self::new(ErrorKind::Schema, ErrorOrigin::Schema, e.to_string())
            }
        }
    }
}

///
/// ErrorKind
/// Who has to fix it.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum ErrorKind {
    /// Caller configuration is invalid.
    #[display("configuration")]
    Configuration,

    /// Document data failed validation.
    #[display("rejected")]
    Rejected,

    /// Record type declarations are malformed; fixed in code, not data.
    #[display("schema")]
    Schema,

    /// The record type is not registered.
    #[display("unsupported")]
    Unsupported,
}

impl From<ErrorClass> for ErrorKind {
    fn from(class: ErrorClass) -> Self {
        match class {
            ErrorClass::Configuration => Self::Configuration,
            ErrorClass::Rejected => Self::Rejected,
            ErrorClass::Unsupported => Self::Unsupported,
        }
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum ErrorOrigin {
    Config,
    Narrow,
    Schema,
    Types,
    Validate,
}

///
/// TESTS
///
