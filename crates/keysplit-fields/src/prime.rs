//! prime field GF(p) over arbitrary-precision integers

use std::fmt;
use std::mem;
use std::sync::Arc;

use num_bigint::{BigInt, BigUint, RandBigInt};
use num_traits::{One, ToPrimitive, Zero};
use rand::{CryptoRng, RngCore};

use crate::{Field, FieldElement, FieldError, FieldVariant, Result};

/// Miller-Rabin witnesses. Deterministic below 3.3 * 10^24, a probable-prime
/// test with error under 4^-12 above that.
const WITNESSES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Canonical representative in `[0, p)`.
///
/// The value carries no modulus, so a deserialized element is only trusted
/// once [`Field::untag`] or [`PrimeField::element`] has range-checked it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrimeElem(BigUint);

impl PrimeElem {
    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn into_value(self) -> BigUint {
        self.0
    }
}

impl fmt::Display for PrimeElem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The field of integers modulo a prime `p`.
///
/// The modulus sits behind an `Arc` so descriptors clone cheaply into every
/// element and worker; it is never mutated after construction. Serialized as
/// the bare modulus, which is primality-checked again on the way back in.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "BigUint", into = "BigUint")
)]
pub struct PrimeField {
    modulus: Arc<BigUint>,
}

impl PrimeField {
    /// Fails with `NotPrime` unless `modulus` passes the primality test.
    pub fn new(modulus: BigUint) -> Result<Self> {
        if !is_probable_prime(&modulus) {
            return Err(FieldError::NotPrime(modulus.to_string()));
        }
        Ok(Self {
            modulus: Arc::new(modulus),
        })
    }

    pub fn from_u64(modulus: u64) -> Result<Self> {
        Self::new(BigUint::from(modulus))
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Bit length of the modulus
    pub fn bits(&self) -> u64 {
        self.modulus.bits()
    }

    /// Wrap `value`, which must already lie in `[0, p)`.
    pub fn element(&self, value: BigUint) -> Result<PrimeElem> {
        if value >= *self.modulus {
            return Err(FieldError::OutOfRange {
                value: value.to_string(),
                field: self.variant().to_string(),
            });
        }
        Ok(PrimeElem(value))
    }

    /// `OutOfRange` unless `a` is a canonical residue of this field.
    pub fn check(&self, a: &PrimeElem) -> Result<()> {
        if a.0 >= *self.modulus {
            return Err(FieldError::OutOfRange {
                value: a.0.to_string(),
                field: self.variant().to_string(),
            });
        }
        Ok(())
    }

    /// Map any integer, negative ones included, to its residue mod p.
    pub fn reduce(&self, value: &BigInt) -> PrimeElem {
        let m = BigInt::from((*self.modulus).clone());
        let r = ((value % &m) + &m) % &m;
        PrimeElem(r.into_parts().1)
    }
}

impl TryFrom<BigUint> for PrimeField {
    type Error = FieldError;

    fn try_from(modulus: BigUint) -> Result<Self> {
        Self::new(modulus)
    }
}

impl From<PrimeField> for BigUint {
    fn from(field: PrimeField) -> Self {
        (*field.modulus).clone()
    }
}

impl fmt::Display for PrimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GF({})", self.modulus)
    }
}

impl Field for PrimeField {
    type Elem = PrimeElem;

    fn variant(&self) -> FieldVariant {
        FieldVariant::Prime(self.clone())
    }

    fn zero(&self) -> PrimeElem {
        PrimeElem(BigUint::zero())
    }

    fn one(&self) -> PrimeElem {
        PrimeElem(BigUint::one())
    }

    fn add(&self, a: &PrimeElem, b: &PrimeElem) -> PrimeElem {
        PrimeElem((&a.0 + &b.0) % &*self.modulus)
    }

    fn neg(&self, a: &PrimeElem) -> PrimeElem {
        let r = &a.0 % &*self.modulus;
        if r.is_zero() {
            return PrimeElem(r);
        }
        PrimeElem(&*self.modulus - r)
    }

    fn mul(&self, a: &PrimeElem, b: &PrimeElem) -> PrimeElem {
        PrimeElem((&a.0 * &b.0) % &*self.modulus)
    }

    fn inv(&self, a: &PrimeElem) -> Result<PrimeElem> {
        mod_inverse(&a.0, &self.modulus)
            .map(PrimeElem)
            .ok_or(FieldError::NoInverse)
    }

    fn max_participants(&self) -> u64 {
        (&*self.modulus - 1u32).to_u64().unwrap_or(u64::MAX)
    }

    fn element_from_index(&self, index: u64) -> Result<PrimeElem> {
        let value = BigUint::from(index);
        if index == 0 || value >= *self.modulus {
            return Err(FieldError::OutOfRange {
                value: index.to_string(),
                field: self.variant().to_string(),
            });
        }
        Ok(PrimeElem(value))
    }

    fn random<R: RngCore + CryptoRng + ?Sized>(&self, rng: &mut R) -> PrimeElem {
        PrimeElem(rng.gen_biguint_below(&self.modulus))
    }

    fn tag(&self, value: PrimeElem) -> FieldElement {
        FieldElement::Prime {
            field: self.clone(),
            value,
        }
    }

    fn untag(&self, elem: &FieldElement) -> Result<PrimeElem> {
        match elem {
            FieldElement::Prime { field, value } if field == self => {
                self.check(value)?;
                Ok(value.clone())
            }
            other => Err(FieldError::FieldMismatch {
                left: self.variant().to_string(),
                right: other.variant().to_string(),
            }),
        }
    }
}

/// Inverse of `a` mod `p` by the extended Euclidean algorithm.
fn mod_inverse(a: &BigUint, p: &BigUint) -> Option<BigUint> {
    if a.is_zero() {
        return None;
    }

    let (mut old_r, mut r) = (BigInt::from(a.clone()), BigInt::from(p.clone()));
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());

    while !r.is_zero() {
        let q = &old_r / &r;
        let next_r = &old_r - &q * &r;
        old_r = mem::replace(&mut r, next_r);
        let next_s = &old_s - &q * &s;
        old_s = mem::replace(&mut s, next_s);
    }

    if !old_r.is_one() {
        return None;
    }

    let p = BigInt::from(p.clone());
    let inv = ((old_s % &p) + &p) % &p;
    inv.to_biguint()
}

fn is_probable_prime(n: &BigUint) -> bool {
    if *n < BigUint::from(2u32) {
        return false;
    }

    for &w in &WITNESSES {
        let w = BigUint::from(w);
        if *n == w {
            return true;
        }
        if (n % &w).is_zero() {
            return false;
        }
    }

    let n_minus_one = n - 1u32;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    'witness: for &w in &WITNESSES {
        let mut x = BigUint::from(w).modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }

    true
}
