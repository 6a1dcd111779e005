use std::fmt::{Debug, Display};

use rand::{CryptoRng, RngCore};

use crate::{FieldElement, FieldVariant, Result};

/// A finite field usable for secret sharing.
///
/// Implementors are field *descriptors*: a unit struct for the binary fields,
/// the modulus for GF(p). Elements are plain values and carry no reference to
/// the descriptor, so every operation goes through it.
pub trait Field: Clone + Debug + PartialEq + Eq + Send + Sync {
    /// Element representation
    type Elem: Clone + Debug + Display + PartialEq + Eq + Send + Sync;

    /// Runtime tag for this field
    fn variant(&self) -> FieldVariant;

    /// Additive identity
    fn zero(&self) -> Self::Elem;

    /// Multiplicative identity
    fn one(&self) -> Self::Elem;

    /// Field addition
    fn add(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;

    /// Additive inverse (identity in characteristic 2)
    fn neg(&self, a: &Self::Elem) -> Self::Elem;

    /// Field subtraction
    fn sub(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem {
        self.add(a, &self.neg(b))
    }

    /// Field multiplication
    fn mul(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;

    /// Multiplicative inverse, `NoInverse` for zero
    fn inv(&self, a: &Self::Elem) -> Result<Self::Elem>;

    /// `a / b`, `NoInverse` when `b` is zero
    fn div(&self, a: &Self::Elem, b: &Self::Elem) -> Result<Self::Elem> {
        Ok(self.mul(a, &self.inv(b)?))
    }

    fn is_zero(&self, a: &Self::Elem) -> bool {
        *a == self.zero()
    }

    /// Number of nonzero elements, i.e. how many distinct participant
    /// x-coordinates the field can provide. Saturates at `u64::MAX`.
    fn max_participants(&self) -> u64;

    /// Embed a participant index as a field element.
    ///
    /// Fails with `OutOfRange` unless `1 <= index <= max_participants()`.
    fn element_from_index(&self, index: u64) -> Result<Self::Elem>;

    /// Draw a uniformly random element
    fn random<R: RngCore + CryptoRng + ?Sized>(&self, rng: &mut R) -> Self::Elem;

    /// Tag an element of this field as a runtime [`FieldElement`]
    fn tag(&self, elem: Self::Elem) -> FieldElement;

    /// Inverse of [`Field::tag`], `FieldMismatch` for elements of any other field
    fn untag(&self, elem: &FieldElement) -> Result<Self::Elem>;
}
