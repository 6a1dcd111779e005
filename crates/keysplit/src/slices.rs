//! conversion between byte secrets and field-element slices
//!
//! GF(2^8) takes one byte per slice, GF(2^16) two bytes big-endian. GF(p)
//! takes `floor((bits(p) - 1) / 8)` bytes big-endian per slice so every chunk
//! is below p; the final chunk may be shorter.

use keysplit_fields::{FieldElement, FieldVariant};
use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};

use crate::reconstruct::{reconstruct_slices_with, ReconstructOptions};
use crate::share::ParticipantShare;
use crate::split::split_slices;
use crate::{Error, Result};

/// Bytes carried by one slice of `variant`.
pub fn bytes_per_slice(variant: &FieldVariant) -> Result<usize> {
    match variant {
        FieldVariant::Gf8 => Ok(1),
        FieldVariant::Gf16 => Ok(2),
        FieldVariant::Prime(field) => {
            let width = ((field.bits() - 1) / 8) as usize;
            if width == 0 {
                return Err(Error::InvalidParameters(format!(
                    "{} is too small to hold a byte per slice",
                    field
                )));
            }
            Ok(width)
        }
    }
}

/// Cut `secret` into field elements of `variant`.
pub fn to_slices(variant: &FieldVariant, secret: &[u8]) -> Result<Vec<FieldElement>> {
    if secret.is_empty() {
        return Err(Error::InvalidParameters("secret is empty".into()));
    }
    let width = bytes_per_slice(variant)?;

    match variant {
        FieldVariant::Gf8 => Ok(secret.iter().map(|&b| FieldElement::gf8(b)).collect()),
        FieldVariant::Gf16 => {
            if secret.len() % 2 != 0 {
                return Err(Error::InvalidParameters(format!(
                    "GF(2^16) needs an even number of bytes, got {}",
                    secret.len()
                )));
            }
            Ok(secret
                .chunks_exact(2)
                .map(|w| FieldElement::gf16(u16::from_be_bytes([w[0], w[1]])))
                .collect())
        }
        FieldVariant::Prime(field) => secret
            .chunks(width)
            .map(|chunk| {
                FieldElement::prime(field, BigUint::from_bytes_be(chunk)).map_err(Error::from)
            })
            .collect(),
    }
}

/// Reassemble a `secret_len`-byte secret from its slices.
pub fn from_slices(slices: &[FieldElement], secret_len: usize) -> Result<Vec<u8>> {
    let first = slices
        .first()
        .ok_or_else(|| Error::InvalidParameters("no slices to assemble".into()))?;
    if let Some(other) = slices.iter().find(|s| !s.same_field(first)) {
        return Err(Error::FieldMismatch {
            expected: first.variant().to_string(),
            found: other.variant().to_string(),
        });
    }

    let variant = first.variant();
    let width = bytes_per_slice(&variant)?;
    let fits = match variant {
        FieldVariant::Prime(_) => secret_len.div_ceil(width) == slices.len(),
        _ => slices.len().checked_mul(width) == Some(secret_len),
    };
    if secret_len == 0 || !fits {
        return Err(Error::InvalidParameters(format!(
            "{} slices of {} cannot hold a {}-byte secret",
            slices.len(),
            variant,
            secret_len
        )));
    }

    let mut out = Vec::with_capacity(secret_len);
    for (i, slice) in slices.iter().enumerate() {
        match slice {
            FieldElement::Gf8(e) => out.push(e.value()),
            FieldElement::Gf16(e) => out.extend_from_slice(&e.value().to_be_bytes()),
            FieldElement::Prime { value, .. } => {
                let len = width.min(secret_len - i * width);
                let bytes = value.value().to_bytes_be();
                if bytes.len() > len {
                    return Err(Error::InvalidParameters(format!(
                        "slice {} does not fit in {} bytes",
                        i, len
                    )));
                }
                out.resize(out.len() + len - bytes.len(), 0);
                out.extend_from_slice(&bytes);
            }
        }
    }
    Ok(out)
}

/// Split a byte secret over `variant`.
pub fn split_bytes<R>(
    variant: &FieldVariant,
    secret: &[u8],
    threshold: usize,
    participants: usize,
    rng: &mut R,
) -> Result<Vec<ParticipantShare>>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let slices = to_slices(variant, secret)?;
    split_slices(&slices, threshold, participants, rng)
}

/// Recover a `secret_len`-byte secret split by [`split_bytes`].
pub fn reconstruct_bytes(
    shares: &[ParticipantShare],
    threshold: usize,
    secret_len: usize,
) -> Result<Vec<u8>> {
    reconstruct_bytes_with(shares, threshold, secret_len, &ReconstructOptions::default())
}

pub fn reconstruct_bytes_with(
    shares: &[ParticipantShare],
    threshold: usize,
    secret_len: usize,
    options: &ReconstructOptions,
) -> Result<Vec<u8>> {
    let slices = reconstruct_slices_with(shares, threshold, options)?;
    from_slices(&slices, secret_len)
}
