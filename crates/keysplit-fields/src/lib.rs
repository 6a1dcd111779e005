//! Finite fields for KMIP key splitting
//!
//! Three closed variants: GF(2^8) for byte secrets, GF(2^16) for 16-bit
//! words, and GF(p) for arbitrary-precision secrets. Generic code works over
//! the [`Field`] descriptor trait; code that only learns the field at runtime
//! uses the tagged [`FieldElement`].

mod binary;
mod element;
mod error;
mod gf2;
mod prime;
mod traits;

pub use binary::{
    BinaryElem16, BinaryElem8, BinaryField16, BinaryField8, IRREDUCIBLE_16, IRREDUCIBLE_8,
};
pub use element::{FieldElement, FieldVariant};
pub use error::{FieldError, Result};
pub use prime::{PrimeElem, PrimeField};
pub use traits::Field;
