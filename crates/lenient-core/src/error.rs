//! Error types for the lenient core library
//!
//! Coercion failures get their own [`CoercionError`] so callers can tell a
//! shape/target mismatch apart from malformed input or a failed conversion.
//! Everything is wrapped by the crate-wide [`Error`].
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::coercion::{InputShape, TargetType};
use crate::location::Location;
use std::fmt;
use thiserror::Error;

/// Main error type for lenient operations
#[derive(Error, Debug)]
pub enum Error {
    /// The resolved coercion action rejected the input
    #[error(transparent)]
    Coercion(#[from] CoercionError),

    /// The input text is not valid JSON
    ///
    /// `message` comes from `serde_json` and already names the position.
    #[error("JSON error: {message}")]
    Json {
        message: String,
        location: Location,
        #[source]
        source: serde_json::Error,
    },

    /// An accepted token could not be converted into the target type
    #[error("Conversion failed for `{type_name}`: {message} at {location}")]
    Conversion {
        type_name: &'static str,
        message: String,
        location: Location,
        #[source]
        source: serde_json::Error,
    },

    /// A `TryConvert` fallback rejected the token
    #[error("Fallback conversion failed for `{type_name}` from {shape}: {source} at {location}")]
    Fallback {
        type_name: &'static str,
        shape: InputShape,
        location: Location,
        #[source]
        source: anyhow::Error,
    },

    /// Declarative coercion rules could not be loaded
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Position of the offending token, when the error has one
    pub fn location(&self) -> Option<Location> {
        match self {
            Error::Coercion(err) => Some(err.location),
            Error::Json { location, .. }
            | Error::Conversion { location, .. }
            | Error::Fallback { location, .. } => Some(*location),
            Error::Configuration { .. } => None,
        }
    }

    /// Whether this is a coercion failure
    pub fn is_coercion(&self) -> bool {
        matches!(self, Error::Coercion(_))
    }

    /// The coercion failure, if this is one
    pub fn as_coercion(&self) -> Option<&CoercionError> {
        match self {
            Error::Coercion(err) => Some(err),
            _ => None,
        }
    }

    pub(crate) fn json(input: &str, source: serde_json::Error) -> Self {
        Error::Json {
            message: source.to_string(),
            location: Location::of_json_error(input, &source),
            source,
        }
    }
}

/// Why a coercion was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoercionFailure {
    /// The resolved action was `Fail`
    Disabled,
    /// `AsEmpty` was resolved but the target has no empty instance
    NoEmptyStrategy,
}

/// A shape/target mismatch rejected by the resolved coercion action
///
/// The message always starts with `Cannot deserialize value of type ` and
/// names the shape, e.g. `... from empty String (...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionError {
    /// Fully qualified name of the target type
    pub type_name: &'static str,
    /// Shape of the rejected token
    pub shape: InputShape,
    /// Position of the rejected token
    pub location: Location,
    /// Failure classification
    pub kind: CoercionFailure,
}

impl CoercionError {
    /// Failure for `shape` into `target` at `location`
    pub fn new(
        target: &TargetType,
        shape: InputShape,
        location: Location,
        kind: CoercionFailure,
    ) -> Self {
        Self {
            type_name: target.name(),
            shape,
            location,
            kind,
        }
    }
}

impl fmt::Display for CoercionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cannot deserialize value of type `{}` from {} (",
            self.type_name,
            self.shape.description()
        )?;
        match self.kind {
            CoercionFailure::Disabled => write!(
                f,
                "coercion of {} is disabled for this type; enable it with a coercion override",
                self.shape
            )?,
            CoercionFailure::NoEmptyStrategy => write!(
                f,
                "no empty-instance strategy for type `{}`",
                self.type_name
            )?,
        }
        write!(f, ") at {}", self.location)
    }
}

impl std::error::Error for CoercionError {}
