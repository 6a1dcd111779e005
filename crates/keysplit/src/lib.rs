//! Shamir secret sharing for KMIP key splitting
//!
//! A secret is the constant term of a random polynomial of degree `t - 1`;
//! participant `i` holds the evaluation at x = i, and any `t` of them recover
//! the constant term by Lagrange interpolation at zero. Secrets wider than
//! one field element are cut into slices, each with its own polynomial.
//!
//! ```
//! use keysplit::{reconstruct, split, FieldElement};
//! use rand::rngs::OsRng;
//!
//! let secret = FieldElement::gf8(0x8d);
//! let shares = split(&secret, 2, 3, &mut OsRng).unwrap();
//! assert_eq!(reconstruct(&shares[1..], 2).unwrap(), secret);
//! ```

/// Run `$body` with `$field` bound to the concrete descriptor behind a
/// [`FieldVariant`] reference.
macro_rules! with_field {
    ($variant:expr, |$field:ident| $body:expr) => {
        match $variant {
            ::keysplit_fields::FieldVariant::Gf8 => {
                let $field = &::keysplit_fields::BinaryField8;
                $body
            }
            ::keysplit_fields::FieldVariant::Gf16 => {
                let $field = &::keysplit_fields::BinaryField16;
                $body
            }
            ::keysplit_fields::FieldVariant::Prime(prime) => {
                let $field = prime;
                $body
            }
        }
    };
}

pub mod config;
mod error;
pub mod poly;
pub mod reconstruct;
pub mod share;
pub mod slices;
pub mod split;

pub use config::{FieldConfig, SharingConfig};
pub use error::{Error, Result};
pub use keysplit_fields::{
    BinaryElem16, BinaryElem8, BinaryField16, BinaryField8, Field, FieldElement, FieldError,
    FieldVariant, PrimeElem, PrimeField,
};
pub use poly::{interpolate_at_zero, lagrange_coefficients_at_zero, Polynomial};
pub use reconstruct::{
    reconstruct, reconstruct_slices, reconstruct_slices_with, reconstruct_with, ReconstructOptions,
};
pub use share::{ParticipantShare, Share, SplitParams};
pub use slices::{from_slices, reconstruct_bytes, reconstruct_bytes_with, split_bytes, to_slices};
pub use split::{split, split_element, split_slices};
