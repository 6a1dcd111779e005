//! polynomial evaluation and Lagrange interpolation over any [`Field`]
//!
//! The splitter builds polynomials directly from a secret plus random
//! coefficients; the reconstructor only ever needs f(0). The full `fit` is
//! kept for the over-determined consistency check and for extending an
//! existing share set to new participants.
//!
//! Lagrange basis at zero uses the common denominator technique:
//!
//! λ_i = Π_{j ≠ i} x_j / (x_j - x_i) = ξ · ρ_i · d̄^{-1}
//!
//! with ξ = Π_j x_j, d_i = x_i · Π_{j ≠ i} (x_j - x_i), ρ_i = Π_{j ≠ i} d_j
//! and d̄ = Π_i d_i, so the whole basis costs a single field inversion.

use std::fmt::Display;

use keysplit_fields::Field;
use rand::{CryptoRng, RngCore};

use crate::{Error, Result};

/// Coefficients in ascending order, index 0 being the constant term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial<F: Field> {
    field: F,
    coeffs: Vec<F::Elem>,
}

impl<F: Field> Polynomial<F> {
    /// An empty coefficient list is the zero polynomial.
    pub fn new(field: F, mut coeffs: Vec<F::Elem>) -> Self {
        if coeffs.is_empty() {
            coeffs.push(field.zero());
        }
        Self { field, coeffs }
    }

    /// `constant + a_1 x + ... + a_degree x^degree` with every `a_i` drawn
    /// from `rng`.
    pub fn random<R: RngCore + CryptoRng + ?Sized>(
        field: F,
        constant: F::Elem,
        degree: usize,
        rng: &mut R,
    ) -> Self {
        let mut coeffs = Vec::with_capacity(degree + 1);
        coeffs.push(constant);
        for _ in 0..degree {
            coeffs.push(field.random(rng));
        }
        Self { field, coeffs }
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    /// Number of coefficients minus one; leading zeros are not trimmed.
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    pub fn coefficients(&self) -> &[F::Elem] {
        &self.coeffs
    }

    pub fn constant(&self) -> &F::Elem {
        &self.coeffs[0]
    }

    /// Horner evaluation
    pub fn evaluate(&self, x: &F::Elem) -> F::Elem {
        horner(&self.field, &self.coeffs, x)
    }

    /// The unique polynomial of degree below the number of distinct points
    /// through `points`.
    ///
    /// Exact repeats of a point are dropped; the same x with a different y is
    /// `DuplicateShare`. x = 0 is allowed here.
    pub fn fit(field: F, points: &[(F::Elem, F::Elem)]) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::InsufficientShares { have: 0, need: 1 });
        }
        let points = dedup_points(points)?;

        // m(x) = Π (x - x_j)
        let mut master = vec![field.one()];
        for (xj, _) in &points {
            master = mul_linear(&field, &master, &field.neg(xj));
        }

        let mut coeffs = vec![field.zero(); points.len()];
        for (xi, yi) in &points {
            // l_i(x) = m(x) / (x - x_i), scaled so that l_i(x_i) = 1
            let basis = div_linear(&field, &master, xi);
            let denom = horner(&field, &basis, xi);
            let scale = field.div(yi, &denom)?;
            for (c, b) in coeffs.iter_mut().zip(&basis) {
                *c = field.add(c, &field.mul(&scale, b));
            }
        }

        Ok(Self::new(field, coeffs))
    }
}

/// Lagrange basis values λ_i at x = 0, in the order of `xs`.
///
/// One λ comes back per entry of `xs`, so a repeated x-coordinate has no
/// basis and is `DuplicateShare`. Callers holding full points should go
/// through [`interpolate_at_zero`], which drops exact repeats first.
///
/// Shares for every slice of a multi-slice secret use the same
/// x-coordinates, so the basis is computed once and reused.
pub fn lagrange_coefficients_at_zero<F: Field>(field: &F, xs: &[F::Elem]) -> Result<Vec<F::Elem>> {
    let k = xs.len();
    if k == 0 {
        return Err(Error::InsufficientShares { have: 0, need: 1 });
    }
    if xs.iter().any(|x| field.is_zero(x)) {
        return Err(Error::InvalidParameters(
            "x = 0 is reserved for the secret".into(),
        ));
    }
    ensure_distinct(xs.iter())?;

    if k == 1 {
        return Ok(vec![field.one()]);
    }

    // ξ = Π x_j
    let xi = xs.iter().fold(field.one(), |acc, x| field.mul(&acc, x));

    // d_i = x_i · Π_{j ≠ i} (x_j - x_i)
    let d: Vec<F::Elem> = (0..k)
        .map(|i| {
            (0..k).filter(|&j| j != i).fold(xs[i].clone(), |acc, j| {
                field.mul(&acc, &field.sub(&xs[j], &xs[i]))
            })
        })
        .collect();

    // ρ_i = Π_{j ≠ i} d_j, forward then backward pass
    let mut rho = vec![field.one(); k];
    for i in 1..k {
        rho[i] = field.mul(&rho[i - 1], &d[i - 1]);
    }
    let mut suffix = field.one();
    for i in (0..k).rev() {
        rho[i] = field.mul(&rho[i], &suffix);
        suffix = field.mul(&suffix, &d[i]);
    }

    // suffix is now d̄
    let delta = field.div(&xi, &suffix)?;
    Ok(rho.iter().map(|r| field.mul(&delta, r)).collect())
}

/// f(0) for the polynomial through `points`, with exact repeats dropped as
/// in [`Polynomial::fit`].
pub fn interpolate_at_zero<F: Field>(
    field: &F,
    points: &[(F::Elem, F::Elem)],
) -> Result<F::Elem> {
    let points = dedup_points(points)?;
    let xs: Vec<F::Elem> = points.iter().map(|(x, _)| x.clone()).collect();
    let lambdas = lagrange_coefficients_at_zero(field, &xs)?;
    Ok(combine(field, &lambdas, points.iter().map(|(_, y)| y)))
}

/// Σ λ_i · y_i
pub(crate) fn combine<'a, F: Field>(
    field: &F,
    lambdas: &[F::Elem],
    ys: impl Iterator<Item = &'a F::Elem>,
) -> F::Elem
where
    F::Elem: 'a,
{
    lambdas
        .iter()
        .zip(ys)
        .fold(field.zero(), |acc, (l, y)| field.add(&acc, &field.mul(l, y)))
}

/// Drop exact repeats, keeping first-seen order. `DuplicateShare` when an x
/// comes back with a different y.
fn dedup_points<E: Clone + PartialEq + Display>(points: &[(E, E)]) -> Result<Vec<(E, E)>> {
    let mut out: Vec<(E, E)> = Vec::with_capacity(points.len());
    for (x, y) in points {
        match out.iter().find(|(seen, _)| seen == x) {
            Some((_, seen_y)) if seen_y == y => {}
            Some(_) => return Err(Error::DuplicateShare { x: x.to_string() }),
            None => out.push((x.clone(), y.clone())),
        }
    }
    Ok(out)
}

/// `DuplicateShare` on the first repeated x-coordinate
fn ensure_distinct<'a, E: PartialEq + Display + 'a>(
    xs: impl Iterator<Item = &'a E> + Clone,
) -> Result<()> {
    for (i, x) in xs.clone().enumerate() {
        if xs.clone().skip(i + 1).any(|other| other == x) {
            return Err(Error::DuplicateShare { x: x.to_string() });
        }
    }
    Ok(())
}

/// p(x) · (x + c)
fn mul_linear<F: Field>(field: &F, p: &[F::Elem], c: &F::Elem) -> Vec<F::Elem> {
    let mut out = vec![field.zero(); p.len() + 1];
    for (i, coeff) in p.iter().enumerate() {
        out[i] = field.add(&out[i], &field.mul(coeff, c));
        out[i + 1] = field.add(&out[i + 1], coeff);
    }
    out
}

/// p(x) / (x - r) by synthetic division; `r` must be a root of `p`.
fn div_linear<F: Field>(field: &F, p: &[F::Elem], r: &F::Elem) -> Vec<F::Elem> {
    let n = p.len() - 1;
    let mut q = vec![field.zero(); n];
    let mut carry = field.zero();
    for i in (1..=n).rev() {
        carry = field.add(&p[i], &field.mul(r, &carry));
        q[i - 1] = carry.clone();
    }
    q
}

fn horner<F: Field>(field: &F, coeffs: &[F::Elem], x: &F::Elem) -> F::Elem {
    coeffs
        .iter()
        .rev()
        .fold(field.zero(), |acc, c| field.add(&field.mul(&acc, x), c))
}
