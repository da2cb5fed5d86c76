//! Error types for TreeSQL
//!
//! Two layers live here. [`StoreError`] covers infrastructure faults (opening
//! a connection, bootstrapping the schema, reading configuration).
//! [`RepoError`] is what repository operations return: a closed,
//! operation-specific code plus a description and an optional cause.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for TreeSQL infrastructure operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Boxed underlying cause attached to a [`RepoError`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Infrastructure error types
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failure codes for creating a directory or a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreateErrorCode {
    /// The name is null, empty, or whitespace only
    Invalid,
    /// `(parent, name)` is already taken
    Duplicate,
    /// The parent directory does not exist
    ParentNotFound,
    UnknownError,
}

/// Failure codes for deleting a directory or a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeleteErrorCode {
    EntityNotFound,
    MultipleMatches,
    UnknownError,
}

/// Failure codes for reads. Absence is an empty result, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GetErrorCode {
    UnknownError,
}

macro_rules! display_as_debug {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Debug::fmt(self, f)
                }
            }
        )*
    };
}

display_as_debug!(CreateErrorCode, DeleteErrorCode, GetErrorCode);

/// A classified repository error.
///
/// The code is authoritative for programmatic handling; the description and
/// cause are diagnostics for operators.
#[derive(Debug)]
pub struct RepoError<C> {
    code: C,
    description: String,
    cause: Option<BoxError>,
}

impl<C: Copy> RepoError<C> {
    pub fn new(code: C, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            cause: None,
        }
    }

    /// Attach the underlying fault
    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn code(&self) -> C {
        self.code
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Re-code this error, keeping description and cause.
    pub fn convert_to<D: Copy>(self, mapper: impl FnOnce(C) -> D) -> RepoError<D> {
        RepoError {
            code: mapper(self.code),
            description: self.description,
            cause: self.cause,
        }
    }
}

impl<C: fmt::Display> fmt::Display for RepoError<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "code={} description={}", self.code, self.description)?;
        if let Some(cause) = &self.cause {
            write!(f, " cause={cause}")?;
        }
        Ok(())
    }
}

impl<C: fmt::Debug + fmt::Display> std::error::Error for RepoError<C> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_includes_code_description_and_cause() {
        let err = RepoError::new(CreateErrorCode::Duplicate, "name 'a' taken under '0'")
            .with_cause(std::io::Error::other("boom"));

        assert_eq!(
            err.to_string(),
            "code=Duplicate description=name 'a' taken under '0' cause=boom"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_convert_to_keeps_diagnostics() {
        let err = RepoError::new(GetErrorCode::UnknownError, "scan failed")
            .with_cause(std::io::Error::other("disk"));

        let converted = err.convert_to(|_| DeleteErrorCode::UnknownError);

        assert_eq!(converted.code(), DeleteErrorCode::UnknownError);
        assert_eq!(converted.description(), "scan failed");
        assert_eq!(converted.cause().map(|c| c.to_string()).as_deref(), Some("disk"));
    }

    #[test]
    fn test_error_without_cause_has_no_source() {
        let err = RepoError::new(DeleteErrorCode::EntityNotFound, "no file '7'");
        assert!(err.cause().is_none());
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "code=EntityNotFound description=no file '7'");
    }
}
