use crate::{
    config::ConfigError,
    types::TypeError,
    validate::{NarrowError, ValidateError},
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Every failure the core runtime can return, for callers that do not care
/// which stage produced it.
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Narrow(#[from] NarrowError),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Validate(#[from] ValidateError),
}

impl Error {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Config(_) => ErrorClass::Configuration,
            Self::Validate(ValidateError::UnknownRecordType(_)) => ErrorClass::Unsupported,
            Self::Narrow(_) | Self::Type(_) | Self::Validate(_) => ErrorClass::Rejected,
        }
    }
}

///
/// ErrorClass
/// Coarse classification: who has to fix it.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// Caller configuration is invalid.
    Configuration,

    /// Document data failed validation.
    Rejected,

    /// The record type is not registered.
    Unsupported,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Configuration => "configuration",
            Self::Rejected => "rejected",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{label}")
    }
}
