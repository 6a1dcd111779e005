//! share types and split parameters

use std::fmt;

use keysplit_fields::{FieldElement, FieldVariant};

use crate::{Error, Result};

/// One point on a secret polynomial.
///
/// The field variant travels with the elements; `x` is never zero.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Share {
    pub x: FieldElement,
    pub y: FieldElement,
}

impl Share {
    /// Fails if `x` and `y` come from different fields or `x` is zero.
    pub fn new(x: FieldElement, y: FieldElement) -> Result<Self> {
        if !x.same_field(&y) {
            return Err(Error::FieldMismatch {
                expected: x.variant().to_string(),
                found: y.variant().to_string(),
            });
        }
        if x.is_zero() {
            return Err(Error::InvalidParameters(
                "x = 0 is reserved for the secret".into(),
            ));
        }
        Ok(Self { x, y })
    }

    pub fn variant(&self) -> FieldVariant {
        self.x.variant()
    }
}

impl fmt::Display for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A participant's share of a multi-slice secret: one y-value per slice,
/// all on the participant's single x-coordinate.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticipantShare {
    pub x: FieldElement,
    pub ys: Vec<FieldElement>,
}

impl ParticipantShare {
    pub fn slice_count(&self) -> usize {
        self.ys.len()
    }

    /// The single-slice share for slice `index`
    pub fn share(&self, index: usize) -> Option<Share> {
        self.ys.get(index).map(|y| Share {
            x: self.x.clone(),
            y: y.clone(),
        })
    }

    pub fn variant(&self) -> FieldVariant {
        self.x.variant()
    }
}

/// Threshold `t` and participant count `n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SplitParams {
    pub threshold: usize,
    pub participants: usize,
}

impl SplitParams {
    pub fn new(threshold: usize, participants: usize) -> Self {
        Self {
            threshold,
            participants,
        }
    }

    /// Enforce `1 <= t <= n <= capacity` for `field`.
    pub fn validate(&self, field: &FieldVariant) -> Result<()> {
        self.check(field.max_participants(), field)
    }

    pub(crate) fn check(&self, capacity: u64, field: impl fmt::Display) -> Result<()> {
        if self.threshold == 0 {
            return Err(Error::InvalidParameters("threshold must be at least 1".into()));
        }
        if self.threshold > self.participants {
            return Err(Error::InvalidParameters(format!(
                "threshold {} exceeds participant count {}",
                self.threshold, self.participants
            )));
        }
        if self.participants as u64 > capacity {
            return Err(Error::InvalidParameters(format!(
                "{} participants exceed the {} available in {}",
                self.participants, capacity, field
            )));
        }
        Ok(())
    }
}
