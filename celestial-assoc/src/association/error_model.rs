//! Positional uncertainty of a query source.
//!
//! Callers that hold a raw error argument (a bare radius, or a sequence of
//! numbers) go through [`ErrorInput`], which accepts exactly three shapes:
//!
//! | Input | Model |
//! |-------|-------|
//! | scalar `r` | `Circular { radius_deg: r }` |
//! | `[r]` | `Circular { radius_deg: r }` |
//! | `[major, minor, angle]` | `Elliptical { .. }` |
//!
//! Anything else is rejected with [`InvalidArgumentKind::ErrorShape`].

use crate::errors::{AssocError, AssocResult, InvalidArgumentKind};
use crate::sky::DEG_TO_RAD;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 1-sigma positional error of a query source, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum ErrorModel {
    Circular {
        radius_deg: f64,
    },
    /// `angle_deg` is the position angle of the major axis, east of north.
    Elliptical {
        major_deg: f64,
        minor_deg: f64,
        angle_deg: f64,
    },
}

impl ErrorModel {
    pub fn circular(radius_deg: f64) -> AssocResult<Self> {
        let model = Self::Circular { radius_deg };
        model.validate()?;
        Ok(model)
    }

    pub fn elliptical(major_deg: f64, minor_deg: f64, angle_deg: f64) -> AssocResult<Self> {
        let model = Self::Elliptical {
            major_deg,
            minor_deg,
            angle_deg,
        };
        model.validate()?;
        Ok(model)
    }

    /// Check `major >= minor > 0` with all values finite.
    pub fn validate(&self) -> AssocResult<()> {
        let (major, minor, angle) = self.axes_deg();
        if !major.is_finite() || !minor.is_finite() || !angle.is_finite() {
            return Err(AssocError::invalid_argument(
                InvalidArgumentKind::ErrorAxis,
                format!(
                    "non-finite error ellipse ({}, {}, {})",
                    major, minor, angle
                ),
            ));
        }
        if minor <= 0.0 {
            return Err(AssocError::invalid_argument(
                InvalidArgumentKind::ErrorAxis,
                format!("error axes must be positive, got ({}, {})", major, minor),
            ));
        }
        if minor > major {
            return Err(AssocError::invalid_argument(
                InvalidArgumentKind::ErrorAxis,
                format!("minor axis {} exceeds major axis {}", minor, major),
            ));
        }
        Ok(())
    }

    pub fn major_deg(&self) -> f64 {
        self.axes_deg().0
    }

    pub fn minor_deg(&self) -> f64 {
        self.axes_deg().1
    }

    pub fn angle_deg(&self) -> f64 {
        self.axes_deg().2
    }

    /// `(major, minor, angle)` in degrees. A circle is `(r, r, 0)`.
    pub fn axes_deg(&self) -> (f64, f64, f64) {
        match *self {
            Self::Circular { radius_deg } => (radius_deg, radius_deg, 0.0),
            Self::Elliptical {
                major_deg,
                minor_deg,
                angle_deg,
            } => (major_deg, minor_deg, angle_deg),
        }
    }

    /// `(major, minor, angle)` in radians.
    pub fn axes_rad(&self) -> (f64, f64, f64) {
        let (major, minor, angle) = self.axes_deg();
        (major * DEG_TO_RAD, minor * DEG_TO_RAD, angle * DEG_TO_RAD)
    }
}

/// An error argument as received at the call boundary, before validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorInput {
    Scalar(f64),
    Sequence(Vec<f64>),
}

impl From<f64> for ErrorInput {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<f64>> for ErrorInput {
    fn from(values: Vec<f64>) -> Self {
        Self::Sequence(values)
    }
}

impl From<&[f64]> for ErrorInput {
    fn from(values: &[f64]) -> Self {
        Self::Sequence(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for ErrorInput {
    fn from(values: [f64; N]) -> Self {
        Self::Sequence(values.to_vec())
    }
}

impl From<(f64, f64, f64)> for ErrorInput {
    fn from((major, minor, angle): (f64, f64, f64)) -> Self {
        Self::Sequence(vec![major, minor, angle])
    }
}

impl TryFrom<ErrorInput> for ErrorModel {
    type Error = AssocError;

    fn try_from(input: ErrorInput) -> AssocResult<Self> {
        match input {
            ErrorInput::Scalar(radius) => Self::circular(radius),
            ErrorInput::Sequence(values) => match values.as_slice() {
                [radius] => Self::circular(*radius),
                [major, minor, angle] => Self::elliptical(*major, *minor, *angle),
                other => Err(AssocError::invalid_argument(
                    InvalidArgumentKind::ErrorShape,
                    format!(
                        "expected a radius or (major, minor, angle), got {} values",
                        other.len()
                    ),
                )),
            },
        }
    }
}

impl TryFrom<f64> for ErrorModel {
    type Error = AssocError;

    fn try_from(radius_deg: f64) -> AssocResult<Self> {
        Self::circular(radius_deg)
    }
}

impl TryFrom<&[f64]> for ErrorModel {
    type Error = AssocError;

    fn try_from(values: &[f64]) -> AssocResult<Self> {
        ErrorInput::from(values).try_into()
    }
}
