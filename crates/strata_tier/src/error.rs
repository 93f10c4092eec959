// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types for store operations.
//!
//! A missing key is not an error anywhere in this library: it is reported as
//! `Ok(None)` from `get`. Everything that does surface as an [`Error`] falls
//! into one of the [`ErrorKind`] categories.

use std::fmt;

/// The category of a store failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The store was constructed with an invalid or unsupported configuration.
    ///
    /// Raised at construction time, before any operation runs.
    Configuration,
    /// The backing resource failed: I/O, network or a service error other than
    /// "not found".
    Backend,
    /// A caller-supplied encode or decode function failed.
    Transform,
}

impl ErrorKind {
    /// Returns a short, stable name for this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Backend => "backend",
            Self::Transform => "transform",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error from a store operation or store construction.
///
/// This is an opaque error type that wraps the underlying cause. Use
/// [`Error::kind`] to classify it; the cause is part of the display output.
///
/// # Example
///
/// ```
/// use strata_tier::{Error, ErrorKind};
///
/// let error = Error::backend("disk full");
/// assert_eq!(error.kind(), ErrorKind::Backend);
/// assert!(error.to_string().contains("disk full"));
/// ```
#[ohno::error]
#[display("store {kind} error")]
pub struct Error {
    kind: ErrorKind,
}

impl Error {
    /// Creates a configuration error.
    pub fn configuration(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::caused_by(ErrorKind::Configuration, cause)
    }

    /// Creates an error for a failure of the backing resource.
    pub fn backend(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::caused_by(ErrorKind::Backend, cause)
    }

    /// Creates an error for a failed encode or decode function.
    pub fn transform(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::caused_by(ErrorKind::Transform, cause)
    }

    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns `true` for errors raised while constructing a store.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        self.kind == ErrorKind::Configuration
    }

    /// Returns `true` for failures of the backing resource.
    #[must_use]
    pub fn is_backend(&self) -> bool {
        self.kind == ErrorKind::Backend
    }

    /// Returns `true` for failures of a caller-supplied transform.
    #[must_use]
    pub fn is_transform(&self) -> bool {
        self.kind == ErrorKind::Transform
    }
}

/// A specialized [`Result`] type for store operations.
pub type Result<T> = std::result::Result<T, Error>;
