//! tagged field values for callers that pick the field at runtime

use std::fmt;

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};

use crate::{
    BinaryElem16, BinaryElem8, BinaryField16, BinaryField8, Field, FieldError, PrimeElem,
    PrimeField, Result,
};

/// Which of the three supported fields a value lives in.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldVariant {
    /// GF(2^8), one byte per element
    Gf8,
    /// GF(2^16), one 16-bit word per element
    Gf16,
    /// GF(p) for the given prime
    Prime(PrimeField),
}

impl FieldVariant {
    /// GF(p), validating that `modulus` is prime
    pub fn prime(modulus: BigUint) -> Result<Self> {
        PrimeField::new(modulus).map(Self::Prime)
    }

    pub fn zero(&self) -> FieldElement {
        match self {
            Self::Gf8 => FieldElement::Gf8(BinaryField8.zero()),
            Self::Gf16 => FieldElement::Gf16(BinaryField16.zero()),
            Self::Prime(field) => FieldElement::Prime {
                field: field.clone(),
                value: field.zero(),
            },
        }
    }

    pub fn one(&self) -> FieldElement {
        match self {
            Self::Gf8 => FieldElement::Gf8(BinaryField8.one()),
            Self::Gf16 => FieldElement::Gf16(BinaryField16.one()),
            Self::Prime(field) => FieldElement::Prime {
                field: field.clone(),
                value: field.one(),
            },
        }
    }

    /// Element with integer representation `value`, range-checked.
    pub fn element(&self, value: u64) -> Result<FieldElement> {
        let out_of_range = || FieldError::OutOfRange {
            value: value.to_string(),
            field: self.to_string(),
        };
        match self {
            Self::Gf8 => u8::try_from(value)
                .map(FieldElement::gf8)
                .map_err(|_| out_of_range()),
            Self::Gf16 => u16::try_from(value)
                .map(FieldElement::gf16)
                .map_err(|_| out_of_range()),
            Self::Prime(field) => FieldElement::prime(field, BigUint::from(value)),
        }
    }

    /// Participant x-coordinate for 1-based `index`
    pub fn element_from_index(&self, index: u64) -> Result<FieldElement> {
        match self {
            Self::Gf8 => BinaryField8.element_from_index(index).map(FieldElement::Gf8),
            Self::Gf16 => BinaryField16.element_from_index(index).map(FieldElement::Gf16),
            Self::Prime(field) => field
                .element_from_index(index)
                .map(|value| FieldElement::Prime {
                    field: field.clone(),
                    value,
                }),
        }
    }

    pub fn max_participants(&self) -> u64 {
        match self {
            Self::Gf8 => BinaryField8.max_participants(),
            Self::Gf16 => BinaryField16.max_participants(),
            Self::Prime(field) => field.max_participants(),
        }
    }

    pub fn random<R: RngCore + CryptoRng + ?Sized>(&self, rng: &mut R) -> FieldElement {
        match self {
            Self::Gf8 => FieldElement::Gf8(BinaryField8.random(rng)),
            Self::Gf16 => FieldElement::Gf16(BinaryField16.random(rng)),
            Self::Prime(field) => FieldElement::Prime {
                field: field.clone(),
                value: field.random(rng),
            },
        }
    }
}

impl fmt::Display for FieldVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gf8 => write!(f, "GF(2^8)"),
            Self::Gf16 => write!(f, "GF(2^16)"),
            Self::Prime(field) => write!(f, "{}", field),
        }
    }
}

/// A field element tagged with its field.
///
/// Arithmetic only combines elements of the same variant (and, for GF(p),
/// the same modulus); anything else is `FieldMismatch`, never a coercion.
/// A deserialized GF(p) value is range-checked on first use.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldElement {
    Gf8(BinaryElem8),
    Gf16(BinaryElem16),
    Prime { field: PrimeField, value: PrimeElem },
}

macro_rules! dispatch_binary {
    ($lhs:expr, $rhs:expr, |$f:ident, $a:ident, $b:ident| $body:expr) => {
        match ($lhs, $rhs) {
            (FieldElement::Gf8($a), FieldElement::Gf8($b)) => {
                let $f = BinaryField8;
                $body.map(FieldElement::Gf8)
            }
            (FieldElement::Gf16($a), FieldElement::Gf16($b)) => {
                let $f = BinaryField16;
                $body.map(FieldElement::Gf16)
            }
            (
                FieldElement::Prime { field, value: $a },
                FieldElement::Prime {
                    field: other,
                    value: $b,
                },
            ) if field == other => {
                field.check($a)?;
                field.check($b)?;
                let $f = field;
                $body.map(|value| FieldElement::Prime {
                    field: field.clone(),
                    value,
                })
            }
            (lhs, rhs) => Err(FieldError::FieldMismatch {
                left: lhs.variant().to_string(),
                right: rhs.variant().to_string(),
            }),
        }
    };
}

impl FieldElement {
    pub fn gf8(value: u8) -> Self {
        Self::Gf8(BinaryElem8::from_value(value))
    }

    pub fn gf16(value: u16) -> Self {
        Self::Gf16(BinaryElem16::from_value(value))
    }

    /// Element of GF(p); `value` must lie in `[0, p)`.
    pub fn prime(field: &PrimeField, value: BigUint) -> Result<Self> {
        Ok(Self::Prime {
            field: field.clone(),
            value: field.element(value)?,
        })
    }

    pub fn variant(&self) -> FieldVariant {
        match self {
            Self::Gf8(_) => FieldVariant::Gf8,
            Self::Gf16(_) => FieldVariant::Gf16,
            Self::Prime { field, .. } => FieldVariant::Prime(field.clone()),
        }
    }

    /// True when `other` lives in the same field as `self`
    pub fn same_field(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Gf8(_), Self::Gf8(_)) | (Self::Gf16(_), Self::Gf16(_)) => true,
            (Self::Prime { field: a, .. }, Self::Prime { field: b, .. }) => a == b,
            _ => false,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Self::Gf8(a) => BinaryField8.is_zero(a),
            Self::Gf16(a) => BinaryField16.is_zero(a),
            Self::Prime { field, value } => field.is_zero(value),
        }
    }

    pub fn add(&self, other: &Self) -> Result<Self> {
        dispatch_binary!(self, other, |f, a, b| Ok::<_, FieldError>(f.add(a, b)))
    }

    pub fn sub(&self, other: &Self) -> Result<Self> {
        dispatch_binary!(self, other, |f, a, b| Ok::<_, FieldError>(f.sub(a, b)))
    }

    pub fn mul(&self, other: &Self) -> Result<Self> {
        dispatch_binary!(self, other, |f, a, b| Ok::<_, FieldError>(f.mul(a, b)))
    }

    /// `NoInverse` when `other` is zero
    pub fn div(&self, other: &Self) -> Result<Self> {
        dispatch_binary!(self, other, |f, a, b| f.div(a, b))
    }

    pub fn neg(&self) -> Self {
        match self {
            Self::Gf8(a) => Self::Gf8(BinaryField8.neg(a)),
            Self::Gf16(a) => Self::Gf16(BinaryField16.neg(a)),
            Self::Prime { field, value } => Self::Prime {
                field: field.clone(),
                value: field.neg(value),
            },
        }
    }

    pub fn inv(&self) -> Result<Self> {
        match self {
            Self::Gf8(a) => BinaryField8.inv(a).map(Self::Gf8),
            Self::Gf16(a) => BinaryField16.inv(a).map(Self::Gf16),
            Self::Prime { field, value } => field.inv(value).map(|value| Self::Prime {
                field: field.clone(),
                value,
            }),
        }
    }

    pub fn as_gf8(&self) -> Option<BinaryElem8> {
        match self {
            Self::Gf8(a) => Some(*a),
            _ => None,
        }
    }

    pub fn as_gf16(&self) -> Option<BinaryElem16> {
        match self {
            Self::Gf16(a) => Some(*a),
            _ => None,
        }
    }

    pub fn as_prime(&self) -> Option<&PrimeElem> {
        match self {
            Self::Prime { value, .. } => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gf8(a) => write!(f, "{}", a),
            Self::Gf16(a) => write!(f, "{}", a),
            Self::Prime { value, .. } => write!(f, "{}", value),
        }
    }
}
