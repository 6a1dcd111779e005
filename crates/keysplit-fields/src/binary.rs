//! binary extension fields GF(2^8) and GF(2^16)

use std::fmt;

use rand::{CryptoRng, Rng, RngCore};

use crate::gf2;
use crate::{Field, FieldElement, FieldError, FieldVariant, Result};

/// x^8 + x^4 + x^3 + x + 1 (AES)
pub const IRREDUCIBLE_8: u32 = 0x11b;

/// x^16 + x^12 + x^3 + x + 1
pub const IRREDUCIBLE_16: u32 = 0x1100b;

macro_rules! impl_binary_field {
    (
        $field:ident,
        $elem:ident,
        $value_type:ty,
        $irreducible:expr,
        $variant:ident,
        $width:literal
    ) => {
        #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $elem($value_type);

        impl $elem {
            pub const ZERO: Self = Self(0);
            pub const ONE: Self = Self(1);

            pub const fn from_value(val: $value_type) -> Self {
                Self(val)
            }

            pub const fn value(&self) -> $value_type {
                self.0
            }
        }

        impl From<$value_type> for $elem {
            fn from(val: $value_type) -> Self {
                Self::from_value(val)
            }
        }

        impl From<$elem> for $value_type {
            fn from(elem: $elem) -> Self {
                elem.0
            }
        }

        impl fmt::Display for $elem {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:0width$x}", self.0, width = $width)
            }
        }

        impl rand::distributions::Distribution<$elem> for rand::distributions::Standard {
            fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> $elem {
                $elem::from_value(rng.gen())
            }
        }

        #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $field;

        impl Field for $field {
            type Elem = $elem;

            fn variant(&self) -> FieldVariant {
                FieldVariant::$variant
            }

            fn zero(&self) -> $elem {
                $elem::ZERO
            }

            fn one(&self) -> $elem {
                $elem::ONE
            }

            fn add(&self, a: &$elem, b: &$elem) -> $elem {
                $elem(a.0 ^ b.0)
            }

            fn neg(&self, a: &$elem) -> $elem {
                *a
            }

            fn mul(&self, a: &$elem, b: &$elem) -> $elem {
                $elem(gf2::mul_mod(a.0 as u32, b.0 as u32, $irreducible) as $value_type)
            }

            fn inv(&self, a: &$elem) -> Result<$elem> {
                gf2::inverse(a.0 as u32, $irreducible)
                    .map(|v| $elem(v as $value_type))
                    .ok_or(FieldError::NoInverse)
            }

            fn max_participants(&self) -> u64 {
                <$value_type>::MAX as u64
            }

            fn element_from_index(&self, index: u64) -> Result<$elem> {
                if index == 0 || index > self.max_participants() {
                    return Err(FieldError::OutOfRange {
                        value: index.to_string(),
                        field: self.variant().to_string(),
                    });
                }
                Ok($elem(index as $value_type))
            }

            fn random<R: RngCore + CryptoRng + ?Sized>(&self, rng: &mut R) -> $elem {
                rng.gen()
            }

            fn tag(&self, elem: $elem) -> FieldElement {
                FieldElement::$variant(elem)
            }

            fn untag(&self, elem: &FieldElement) -> Result<$elem> {
                match elem {
                    FieldElement::$variant(e) => Ok(*e),
                    other => Err(FieldError::FieldMismatch {
                        left: self.variant().to_string(),
                        right: other.variant().to_string(),
                    }),
                }
            }
        }
    };
}

impl_binary_field!(BinaryField8, BinaryElem8, u8, IRREDUCIBLE_8, Gf8, 2);
impl_binary_field!(BinaryField16, BinaryElem16, u16, IRREDUCIBLE_16, Gf16, 4);
