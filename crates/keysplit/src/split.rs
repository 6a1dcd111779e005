//! secret splitting
//!
//! Participant `i` (1-based) always gets x = i, so x = 0 stays reserved for
//! the secret. Every slice of a multi-slice secret gets its own polynomial.

use keysplit_fields::{Field, FieldElement, Result as FieldResult};
use rand::{CryptoRng, RngCore};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::poly::Polynomial;
use crate::share::{ParticipantShare, Share, SplitParams};
use crate::{Error, Result};

/// Split one secret element of a statically typed field into `(x, y)`
/// points for participants `1..=n`.
pub fn split_element<F, R>(
    field: &F,
    secret: &F::Elem,
    params: &SplitParams,
    rng: &mut R,
) -> Result<Vec<(F::Elem, F::Elem)>>
where
    F: Field,
    R: RngCore + CryptoRng + ?Sized,
{
    params.check(field.max_participants(), field.variant())?;
    let poly = Polynomial::random(field.clone(), secret.clone(), params.threshold - 1, rng);
    let xs = participant_xs(field, params.participants)?;
    Ok(xs
        .into_iter()
        .map(|x| {
            let y = poly.evaluate(&x);
            (x, y)
        })
        .collect())
}

/// Split `secret` into `participants` shares, any `threshold` of which
/// recover it.
pub fn split<R>(
    secret: &FieldElement,
    threshold: usize,
    participants: usize,
    rng: &mut R,
) -> Result<Vec<Share>>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let variant = secret.variant();
    let params = SplitParams::new(threshold, participants);
    params.validate(&variant)?;

    debug!(field = %variant, threshold, participants, "splitting secret");

    with_field!(&variant, |field| {
        let secret = field.untag(secret)?;
        let points = split_element(field, &secret, &params, rng)?;
        Ok(points
            .into_iter()
            .map(|(x, y)| Share {
                x: field.tag(x),
                y: field.tag(y),
            })
            .collect())
    })
}

/// Split a secret that spans several field elements.
///
/// Each slice gets an independent polynomial. Coefficients are drawn from
/// `rng` one slice after another, then the evaluation runs per slice.
/// Participant `i` receives every slice's value at x = i, in slice order.
pub fn split_slices<R>(
    slices: &[FieldElement],
    threshold: usize,
    participants: usize,
    rng: &mut R,
) -> Result<Vec<ParticipantShare>>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let first = slices
        .first()
        .ok_or_else(|| Error::InvalidParameters("secret has no slices".into()))?;
    let variant = first.variant();
    let params = SplitParams::new(threshold, participants);
    params.validate(&variant)?;

    debug!(
        field = %variant,
        threshold,
        participants,
        slices = slices.len(),
        "splitting multi-slice secret"
    );

    with_field!(&variant, |field| {
        let secrets = slices
            .iter()
            .map(|s| field.untag(s))
            .collect::<FieldResult<Vec<_>>>()?;

        let polys: Vec<_> = secrets
            .into_iter()
            .map(|s| Polynomial::random(field.clone(), s, threshold - 1, &mut *rng))
            .collect();

        let xs = participant_xs(field, participants)?;
        let columns = evaluate_columns(&polys, &xs);

        Ok(xs
            .into_iter()
            .enumerate()
            .map(|(i, x)| ParticipantShare {
                x: field.tag(x),
                ys: columns.iter().map(|col| field.tag(col[i].clone())).collect(),
            })
            .collect())
    })
}

/// x = 1..=n as field elements
fn participant_xs<F: Field>(field: &F, n: usize) -> Result<Vec<F::Elem>> {
    (1..=n as u64)
        .map(|i| field.element_from_index(i).map_err(Error::from))
        .collect()
}

/// `columns[s][i]` is slice `s` evaluated at `xs[i]`
fn evaluate_columns<F: Field>(polys: &[Polynomial<F>], xs: &[F::Elem]) -> Vec<Vec<F::Elem>> {
    let eval = |(s, poly): (usize, &Polynomial<F>)| {
        trace!(slice = s, "evaluating slice");
        xs.iter().map(|x| poly.evaluate(x)).collect::<Vec<_>>()
    };

    #[cfg(feature = "parallel")]
    {
        polys.par_iter().enumerate().map(eval).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        polys.iter().enumerate().map(eval).collect()
    }
}
