//! Error types for catalog construction and association queries.
//!
//! Every fallible operation in the crate returns [`AssocResult<T>`]. Failures
//! are all-or-nothing: a query that fails produces no partial results.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | [`CatalogBuild`](AssocError::CatalogBuild) | empty, malformed or mixed-frame catalog records |
//! | [`UnknownCatalog`](AssocError::UnknownCatalog) | a query names a catalog that is not registered |
//! | [`InvalidArgument`](AssocError::InvalidArgument) | bad error shape, prior, threshold, radius or coordinate |

use std::fmt;
use thiserror::Error;

pub type AssocResult<T> = Result<T, AssocError>;

/// Which argument an [`AssocError::InvalidArgument`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidArgumentKind {
    /// Positional error given with a shape other than a scalar, 1-tuple or 3-tuple.
    ErrorShape,
    /// Error axes that are non-positive, non-finite, or have minor > major.
    ErrorAxis,
    /// Prior probability outside the open interval (0, 1).
    PriorProbability,
    /// Probability threshold outside [0, 1].
    Threshold,
    /// Search or density radius that is negative, zero or non-finite.
    Radius,
    /// Sky coordinate that is non-finite or has |lat| > 90°.
    Coordinate,
}

impl fmt::Display for InvalidArgumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ErrorShape => "error shape",
            Self::ErrorAxis => "error axis",
            Self::PriorProbability => "prior probability",
            Self::Threshold => "probability threshold",
            Self::Radius => "radius",
            Self::Coordinate => "coordinate",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AssocError {
    #[error("In catalog {catalog}: {message}")]
    CatalogBuild { catalog: String, message: String },

    #[error("Unknown catalog: {name}")]
    UnknownCatalog { name: String },

    #[error("Invalid {kind}: {message}")]
    InvalidArgument {
        kind: InvalidArgumentKind,
        message: String,
    },
}

impl AssocError {
    pub fn catalog_build(catalog: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CatalogBuild {
            catalog: catalog.into(),
            message: message.into(),
        }
    }

    pub fn unknown_catalog(name: impl Into<String>) -> Self {
        Self::UnknownCatalog { name: name.into() }
    }

    pub fn invalid_argument(kind: InvalidArgumentKind, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            kind,
            message: message.into(),
        }
    }

    /// The invalid-argument cause, if this is an [`AssocError::InvalidArgument`].
    pub fn invalid_kind(&self) -> Option<InvalidArgumentKind> {
        match self {
            Self::InvalidArgument { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_build_message() {
        let err = AssocError::catalog_build("obj-agn", "no records");
        assert_eq!(err.to_string(), "In catalog obj-agn: no records");
    }

    #[test]
    fn test_unknown_catalog_message() {
        let err = AssocError::unknown_catalog("obj-blazar");
        assert!(err.to_string().contains("obj-blazar"));
        assert_eq!(err.invalid_kind(), None);
    }

    #[test]
    fn test_invalid_argument_kind() {
        let err = AssocError::invalid_argument(InvalidArgumentKind::ErrorShape, "got 4 values");
        assert_eq!(err.invalid_kind(), Some(InvalidArgumentKind::ErrorShape));
        assert_eq!(err.to_string(), "Invalid error shape: got 4 values");
    }
}
