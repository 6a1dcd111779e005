//! polynomial arithmetic over GF(2)[x]
//!
//! Polynomials are bit vectors in a `u32`, bit i holding the coefficient of
//! x^i. Operands of the binary fields are at most 16 bits wide, so products
//! never exceed 31 bits.

#[inline]
fn degree(p: u32) -> u32 {
    debug_assert_ne!(p, 0);
    31 - p.leading_zeros()
}

/// Carry-less multiplication
pub(crate) fn clmul(mut a: u32, mut b: u32) -> u32 {
    let mut res = 0u32;
    while b != 0 {
        if b & 1 != 0 {
            res ^= a;
        }
        a <<= 1;
        b >>= 1;
    }
    res
}

/// Polynomial division with remainder, `b` must be nonzero
pub(crate) fn div_rem(mut a: u32, b: u32) -> (u32, u32) {
    let db = degree(b);
    let mut q = 0u32;
    while a != 0 && degree(a) >= db {
        let shift = degree(a) - db;
        q |= 1 << shift;
        a ^= b << shift;
    }
    (q, a)
}

/// Remainder of `a` modulo `modulus`
#[inline]
pub(crate) fn reduce(a: u32, modulus: u32) -> u32 {
    div_rem(a, modulus).1
}

/// `a * b mod modulus`
#[inline]
pub(crate) fn mul_mod(a: u32, b: u32, modulus: u32) -> u32 {
    reduce(clmul(a, b), modulus)
}

/// Inverse of `a` modulo an irreducible `modulus` via extended Euclid.
///
/// Keeps `s_i * a ≡ r_i (mod modulus)` through the remainder sequence; when
/// the remainder reaches gcd = 1 the matching `s` is the inverse. Returns
/// `None` for zero or when `a` shares a factor with `modulus`.
pub(crate) fn inverse(a: u32, modulus: u32) -> Option<u32> {
    let a = reduce(a, modulus);
    if a == 0 {
        return None;
    }

    let (mut r0, mut r1) = (modulus, a);
    let (mut s0, mut s1) = (0u32, 1u32);

    while r1 != 0 {
        let (q, r) = div_rem(r0, r1);
        r0 = r1;
        r1 = r;

        let s = s0 ^ clmul(q, s1);
        s0 = s1;
        s1 = s;
    }

    (r0 == 1).then(|| reduce(s0, modulus))
}
