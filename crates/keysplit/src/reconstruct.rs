//! secret reconstruction by Lagrange interpolation at zero

use keysplit_fields::{Field, FieldElement, Result as FieldResult};
use tracing::{debug, trace, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::poly::{combine, lagrange_coefficients_at_zero, Polynomial};
use crate::share::{ParticipantShare, Share};
use crate::{Error, Result};

/// Knobs for reconstruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReconstructOptions {
    /// When more than `t` shares are given, require the extras to lie on the
    /// polynomial fixed by the first `t`.
    pub verify_extra_shares: bool,
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            verify_extra_shares: true,
        }
    }
}

/// Recover the secret from at least `threshold` shares.
pub fn reconstruct(shares: &[Share], threshold: usize) -> Result<FieldElement> {
    reconstruct_with(shares, threshold, &ReconstructOptions::default())
}

/// Recover the secret from at least `threshold` shares.
///
/// Shares are checked in this order: all from one field, no x = 0, no x
/// repeated with a different y (exact repeats are dropped), and at least
/// `threshold` distinct points. The first `threshold` distinct shares
/// determine the secret.
pub fn reconstruct_with(
    shares: &[Share],
    threshold: usize,
    options: &ReconstructOptions,
) -> Result<FieldElement> {
    ensure_threshold(threshold)?;
    let first = shares.first().ok_or(Error::InsufficientShares {
        have: 0,
        need: threshold,
    })?;
    let variant = first.x.variant();

    debug!(field = %variant, threshold, shares = shares.len(), "reconstructing secret");

    with_field!(&variant, |field| {
        let points = shares
            .iter()
            .map(|s| -> FieldResult<_> { Ok((field.untag(&s.x)?, field.untag(&s.y)?)) })
            .collect::<FieldResult<Vec<_>>>()?;
        let points = distinct_points(field, points, threshold)?;
        let (basis, extra) = points.split_at(threshold);

        let xs: Vec<_> = basis.iter().map(|(x, _)| x.clone()).collect();
        let lambdas = lagrange_coefficients_at_zero(field, &xs)?;
        let secret = combine(field, &lambdas, basis.iter().map(|(_, y)| y));

        if options.verify_extra_shares && !extra.is_empty() {
            check_extra(field, basis, extra, None)?;
        }

        Ok(field.tag(secret))
    })
}

/// Recover every slice of a multi-slice secret, in slice order.
pub fn reconstruct_slices(
    shares: &[ParticipantShare],
    threshold: usize,
) -> Result<Vec<FieldElement>> {
    reconstruct_slices_with(shares, threshold, &ReconstructOptions::default())
}

/// Multi-slice counterpart of [`reconstruct_with`].
///
/// All participants must carry the same number of slices. The Lagrange
/// basis depends only on the x-coordinates, so it is computed once and
/// applied to each slice.
pub fn reconstruct_slices_with(
    shares: &[ParticipantShare],
    threshold: usize,
    options: &ReconstructOptions,
) -> Result<Vec<FieldElement>> {
    ensure_threshold(threshold)?;
    let first = shares.first().ok_or(Error::InsufficientShares {
        have: 0,
        need: threshold,
    })?;
    let slice_count = first.slice_count();
    if slice_count == 0 {
        return Err(Error::InvalidParameters("participant share has no slices".into()));
    }
    if shares.iter().any(|s| s.slice_count() != slice_count) {
        warn!(slices = slice_count, "participants disagree on slice count");
        return Err(Error::InconsistentShares);
    }
    let variant = first.x.variant();

    debug!(
        field = %variant,
        threshold,
        shares = shares.len(),
        slices = slice_count,
        "reconstructing multi-slice secret"
    );

    with_field!(&variant, |field| {
        let rows = shares
            .iter()
            .map(|s| -> FieldResult<_> {
                let ys = s
                    .ys
                    .iter()
                    .map(|y| field.untag(y))
                    .collect::<FieldResult<Vec<_>>>()?;
                Ok((field.untag(&s.x)?, ys))
            })
            .collect::<FieldResult<Vec<_>>>()?;
        let rows = distinct_points(field, rows, threshold)?;
        let (basis, extra) = rows.split_at(threshold);

        let xs: Vec<_> = basis.iter().map(|(x, _)| x.clone()).collect();
        let lambdas = lagrange_coefficients_at_zero(field, &xs)?;

        let recover = |s: usize| {
            trace!(slice = s, "interpolating slice");
            combine(field, &lambdas, basis.iter().map(|(_, ys)| &ys[s]))
        };

        #[cfg(feature = "parallel")]
        let secrets: Vec<_> = (0..slice_count).into_par_iter().map(recover).collect();
        #[cfg(not(feature = "parallel"))]
        let secrets: Vec<_> = (0..slice_count).map(recover).collect();

        if options.verify_extra_shares && !extra.is_empty() {
            for s in 0..slice_count {
                let slice_basis: Vec<_> = basis
                    .iter()
                    .map(|(x, ys)| (x.clone(), ys[s].clone()))
                    .collect();
                let slice_extra: Vec<_> = extra
                    .iter()
                    .map(|(x, ys)| (x.clone(), ys[s].clone()))
                    .collect();
                check_extra(field, &slice_basis, &slice_extra, Some(s))?;
            }
        }

        Ok(secrets.into_iter().map(|s| field.tag(s)).collect())
    })
}

fn ensure_threshold(threshold: usize) -> Result<()> {
    if threshold == 0 {
        return Err(Error::InvalidParameters("threshold must be at least 1".into()));
    }
    Ok(())
}

/// Reject x = 0 and conflicting duplicates, drop exact duplicates, and make
/// sure `threshold` points remain. Input order is preserved.
fn distinct_points<F: Field, Y: PartialEq>(
    field: &F,
    points: Vec<(F::Elem, Y)>,
    threshold: usize,
) -> Result<Vec<(F::Elem, Y)>> {
    if points.iter().any(|(x, _)| field.is_zero(x)) {
        return Err(Error::InvalidParameters(
            "share at x = 0 would expose the secret slot".into(),
        ));
    }

    let mut distinct: Vec<(F::Elem, Y)> = Vec::with_capacity(points.len());
    for (x, y) in points {
        match distinct.iter().find(|(seen, _)| *seen == x) {
            Some((_, seen_y)) if *seen_y == y => continue,
            Some(_) => return Err(Error::DuplicateShare { x: x.to_string() }),
            None => distinct.push((x, y)),
        }
    }

    if distinct.len() < threshold {
        return Err(Error::InsufficientShares {
            have: distinct.len(),
            need: threshold,
        });
    }
    Ok(distinct)
}

/// Every point in `extra` must lie on the polynomial through `basis`.
fn check_extra<F: Field>(
    field: &F,
    basis: &[(F::Elem, F::Elem)],
    extra: &[(F::Elem, F::Elem)],
    slice: Option<usize>,
) -> Result<()> {
    let poly = Polynomial::fit(field.clone(), basis)?;
    for (x, y) in extra {
        if poly.evaluate(x) != *y {
            warn!(x = %x, slice, "share does not match the interpolated polynomial");
            return Err(Error::InconsistentShares);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::{split, split_slices};
    use keysplit_fields::PrimeField;
    use num_bigint::BigUint;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn share(x: u8, y: u8) -> Share {
        Share {
            x: FieldElement::gf8(x),
            y: FieldElement::gf8(y),
        }
    }

    #[test]
    fn test_concrete_gf8_scenario() {
        // f(x) = 0x8d + 0x31 x
        let shares = [share(1, 0xbc), share(2, 0xef), share(3, 0xde)];
        for pair in [[0, 1], [0, 2], [1, 2], [2, 0]] {
            let subset = [shares[pair[0]].clone(), shares[pair[1]].clone()];
            assert_eq!(reconstruct(&subset, 2).unwrap(), FieldElement::gf8(0x8d));
        }
        assert_eq!(reconstruct(&shares, 2).unwrap(), FieldElement::gf8(0x8d));
    }

    #[test]
    fn test_duplicate_share() {
        let shares = [share(5, 0x01), share(5, 0x02)];
        assert_eq!(
            reconstruct(&shares, 2),
            Err(Error::DuplicateShare { x: "05".into() })
        );
    }

    #[test]
    fn test_exact_duplicates_collapse() {
        let shares = [share(1, 0xbc), share(1, 0xbc), share(3, 0xde)];
        assert_eq!(reconstruct(&shares, 2).unwrap(), FieldElement::gf8(0x8d));

        // collapsing can leave too few
        let shares = [share(1, 0xbc), share(1, 0xbc)];
        assert_eq!(
            reconstruct(&shares, 2),
            Err(Error::InsufficientShares { have: 1, need: 2 })
        );
    }

    #[test]
    fn test_insufficient_shares() {
        assert_eq!(
            reconstruct(&[share(1, 0xbc)], 2),
            Err(Error::InsufficientShares { have: 1, need: 2 })
        );
        assert_eq!(
            reconstruct(&[], 2),
            Err(Error::InsufficientShares { have: 0, need: 2 })
        );
    }

    #[test]
    fn test_zero_threshold() {
        assert!(matches!(
            reconstruct(&[share(1, 0xbc)], 0),
            Err(Error::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_zero_x_rejected() {
        let shares = [share(0, 0x8d), share(1, 0xbc)];
        assert!(matches!(
            reconstruct(&shares, 2),
            Err(Error::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_mixed_fields_rejected() {
        let shares = [
            share(1, 0xbc),
            Share {
                x: FieldElement::gf16(2),
                y: FieldElement::gf16(0xef),
            },
        ];
        assert_eq!(
            reconstruct(&shares, 2),
            Err(Error::FieldMismatch {
                expected: "GF(2^8)".into(),
                found: "GF(2^16)".into(),
            })
        );
    }

    #[test]
    fn test_inconsistent_extra_share() {
        let shares = [share(1, 0xbc), share(2, 0xef), share(3, 0xdf)];
        assert_eq!(reconstruct(&shares, 2), Err(Error::InconsistentShares));

        let lax = ReconstructOptions {
            verify_extra_shares: false,
        };
        assert_eq!(
            reconstruct_with(&shares, 2, &lax).unwrap(),
            FieldElement::gf8(0x8d)
        );
    }

    #[test]
    fn test_foreign_prime_residue_rejected() {
        let small = PrimeField::from_u64(101).unwrap();
        let large = PrimeField::from_u64(103).unwrap();
        let shares = [
            Share {
                x: FieldElement::Prime {
                    field: small.clone(),
                    value: large.element(BigUint::from(102u32)).unwrap(),
                },
                y: FieldElement::prime(&small, BigUint::from(5u32)).unwrap(),
            },
            Share {
                x: FieldElement::prime(&small, BigUint::from(2u32)).unwrap(),
                y: FieldElement::prime(&small, BigUint::from(9u32)).unwrap(),
            },
        ];
        assert!(matches!(
            reconstruct(&shares, 2),
            Err(Error::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_prime_round_trip() {
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let p = PrimeField::from_u64(1_125_899_906_842_679).unwrap();
        let secret = FieldElement::prime(&p, BigUint::from(0xdead_beef_u64)).unwrap();
        let shares = split(&secret, 4, 7, &mut rng).unwrap();
        assert_eq!(reconstruct(&shares[3..], 4).unwrap(), secret);
        assert_eq!(reconstruct(&shares, 4).unwrap(), secret);
    }

    #[test]
    fn test_slices_round_trip_and_checks() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let slices: Vec<_> = (0..16u16).map(|v| FieldElement::gf16(v * 4099)).collect();
        let parts = split_slices(&slices, 3, 5, &mut rng).unwrap();

        assert_eq!(reconstruct_slices(&parts[2..], 3).unwrap(), slices);
        assert_eq!(reconstruct_slices(&parts, 3).unwrap(), slices);

        let mut tampered = parts.clone();
        tampered[4].ys[7] = tampered[4].ys[7].add(&FieldElement::gf16(1)).unwrap();
        assert_eq!(reconstruct_slices(&tampered, 3), Err(Error::InconsistentShares));

        let mut short = parts.clone();
        short[1].ys.pop();
        assert_eq!(reconstruct_slices(&short, 3), Err(Error::InconsistentShares));
    }

    #[test]
    fn test_slices_duplicate_participant() {
        let mut rng = ChaCha20Rng::seed_from_u64(12);
        let slices = vec![FieldElement::gf8(1), FieldElement::gf8(2)];
        let mut parts = split_slices(&slices, 2, 3, &mut rng).unwrap();

        let again = parts[0].clone();
        parts.push(again);
        assert_eq!(reconstruct_slices(&parts, 2).unwrap(), slices);

        let mut forged = parts[0].clone();
        forged.ys[1] = forged.ys[1].add(&FieldElement::gf8(1)).unwrap();
        parts.push(forged);
        assert_eq!(
            reconstruct_slices(&parts, 2),
            Err(Error::DuplicateShare { x: "01".into() })
        );
    }
}
