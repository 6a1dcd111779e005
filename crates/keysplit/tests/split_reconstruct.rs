//! Split/reconstruct integration tests across all three fields.

mod common;

use common::{combinations, init_tracing, pick, rng};
use keysplit::{
    reconstruct, reconstruct_bytes, split, split_bytes, split_slices, BinaryElem8, BinaryField16,
    BinaryField8, Error, Field, FieldElement, FieldVariant, Polynomial, PrimeField, Share,
};
use num_bigint::BigUint;

fn variants() -> Vec<(FieldVariant, FieldElement)> {
    let p = PrimeField::from_u64(1_125_899_906_842_679).unwrap();
    vec![
        (FieldVariant::Gf8, FieldElement::gf8(0x8d)),
        (FieldVariant::Gf16, FieldElement::gf16(0xbeef)),
        (
            FieldVariant::Prime(p.clone()),
            FieldElement::prime(&p, BigUint::from(987_654_321_012u64)).unwrap(),
        ),
    ]
}

#[test]
fn test_every_threshold_subset_recovers_secret() {
    init_tracing();
    let n = 6;
    for (variant, secret) in variants() {
        for t in 1..=n {
            let shares = split(&secret, t, n, &mut rng(t as u64)).unwrap();
            assert_eq!(shares.len(), n);
            for idx in combinations(n, t) {
                let subset = pick(&shares, &idx);
                assert_eq!(
                    reconstruct(&subset, t).unwrap(),
                    secret,
                    "{} t={} subset={:?}",
                    variant,
                    t,
                    idx
                );
            }
        }
    }
}

#[test]
fn test_share_order_does_not_matter() {
    let secret = FieldElement::gf16(0x1234);
    let mut shares = split(&secret, 3, 5, &mut rng(1)).unwrap();
    shares.reverse();
    assert_eq!(reconstruct(&shares, 3).unwrap(), secret);
    shares.swap(0, 3);
    assert_eq!(reconstruct(&shares[..3], 3).unwrap(), secret);
}

#[test]
fn test_fewer_than_threshold_shares() {
    for (_, secret) in variants() {
        let shares = split(&secret, 3, 5, &mut rng(2)).unwrap();
        assert_eq!(
            reconstruct(&shares[..2], 3),
            Err(Error::InsufficientShares { have: 2, need: 3 })
        );
    }
}

#[test]
fn test_concrete_gf8_scenario() {
    // f(x) = 0x8d + 0x31 x over GF(2^8)
    let poly = Polynomial::new(
        BinaryField8,
        vec![BinaryElem8::from_value(0x8d), BinaryElem8::from_value(0x31)],
    );
    let ys: Vec<u8> = (1..=3u8)
        .map(|x| poly.evaluate(&BinaryElem8::from_value(x)).value())
        .collect();
    assert_eq!(hex::encode(&ys), "bcefde");

    let shares: Vec<Share> = ys
        .iter()
        .enumerate()
        .map(|(i, &y)| Share::new(FieldElement::gf8(i as u8 + 1), FieldElement::gf8(y)).unwrap())
        .collect();
    for idx in combinations(3, 2) {
        assert_eq!(
            reconstruct(&pick(&shares, &idx), 2).unwrap(),
            FieldElement::gf8(0x8d)
        );
    }
}

#[test]
fn test_multi_slice_scenario() {
    init_tracing();
    let secret = hex::decode("8d60bf76").unwrap();
    let parts = split_bytes(&FieldVariant::Gf8, &secret, 3, 3, &mut rng(3)).unwrap();

    assert_eq!(parts.len(), 3);
    assert!(parts.iter().all(|p| p.slice_count() == 4));

    assert_eq!(reconstruct_bytes(&parts, 3, 4).unwrap(), secret);
    let reordered = vec![parts[2].clone(), parts[0].clone(), parts[1].clone()];
    assert_eq!(reconstruct_bytes(&reordered, 3, 4).unwrap(), secret);
    assert!(matches!(
        reconstruct_bytes(&parts[..2], 3, 4),
        Err(Error::InsufficientShares { have: 2, need: 3 })
    ));
}

#[test]
fn test_multi_slice_all_fields() {
    let secret = hex::decode("00112233445566778899aabbccddeeff0102").unwrap();
    let p = PrimeField::from_u64(1_125_899_906_842_679).unwrap();
    for variant in [FieldVariant::Gf8, FieldVariant::Gf16, FieldVariant::Prime(p)] {
        let parts = split_bytes(&variant, &secret, 3, 5, &mut rng(4)).unwrap();
        for idx in combinations(5, 3) {
            let subset = pick(&parts, &idx);
            assert_eq!(
                reconstruct_bytes(&subset, 3, secret.len()).unwrap(),
                secret,
                "{} subset={:?}",
                variant,
                idx
            );
        }
    }
}

#[test]
fn test_error_triggers() {
    let secret = FieldElement::gf8(0x8d);
    assert!(matches!(
        split(&secret, 3, 2, &mut rng(5)),
        Err(Error::InvalidParameters(_))
    ));

    let a = Share::new(FieldElement::gf8(5), FieldElement::gf8(0x10)).unwrap();
    let b = Share::new(FieldElement::gf8(5), FieldElement::gf8(0x20)).unwrap();
    assert!(matches!(
        reconstruct(&[a.clone(), b], 2),
        Err(Error::DuplicateShare { .. })
    ));

    assert_eq!(
        reconstruct(&[a], 2),
        Err(Error::InsufficientShares { have: 1, need: 2 })
    );
}

#[test]
fn test_field_capacity() {
    let secret = FieldElement::gf8(1);
    assert!(split(&secret, 2, 255, &mut rng(6)).is_ok());
    assert!(matches!(
        split(&secret, 2, 256, &mut rng(6)),
        Err(Error::InvalidParameters(_))
    ));

    let small = PrimeField::from_u64(13).unwrap();
    let secret = FieldElement::prime(&small, BigUint::from(5u32)).unwrap();
    let shares = split(&secret, 12, 12, &mut rng(7)).unwrap();
    assert_eq!(reconstruct(&shares, 12).unwrap(), secret);
    assert!(split(&secret, 2, 13, &mut rng(7)).is_err());
}

#[test]
fn test_threshold_secrecy() {
    // t - 1 shares fit a degree t - 1 polynomial through every candidate secret
    let f = BinaryField8;
    let t = 3;
    let shares = split(&FieldElement::gf8(0x8d), t, 5, &mut rng(8)).unwrap();
    let known: Vec<(BinaryElem8, BinaryElem8)> = shares[..t - 1]
        .iter()
        .map(|s| (s.x.as_gf8().unwrap(), s.y.as_gf8().unwrap()))
        .collect();

    for candidate in 0..=255u8 {
        let mut points = vec![(f.zero(), BinaryElem8::from_value(candidate))];
        points.extend(known.iter().cloned());
        let poly = Polynomial::fit(f, &points).unwrap();
        assert!(poly.degree() < t);
        assert_eq!(poly.constant(), &BinaryElem8::from_value(candidate));
        assert!(known.iter().all(|(x, y)| poly.evaluate(x) == *y));
    }
}

#[test]
fn test_extend_share_set_to_new_participant() {
    // fit the first t shares, hand out f(7), and use it in place of an old share
    let secret = FieldElement::gf16(0x0bad);
    let shares = split(&secret, 3, 5, &mut rng(9)).unwrap();
    let f = BinaryField16;
    let points: Vec<_> = shares[..3]
        .iter()
        .map(|s| (f.untag(&s.x).unwrap(), f.untag(&s.y).unwrap()))
        .collect();
    let poly = Polynomial::fit(f, &points).unwrap();

    let x7 = f.element_from_index(7).unwrap();
    let new_share = Share::new(f.tag(x7), f.tag(poly.evaluate(&x7))).unwrap();
    let set = vec![shares[3].clone(), new_share, shares[4].clone()];
    assert_eq!(reconstruct(&set, 3).unwrap(), secret);

    // and it passes the consistency check alongside the first five
    let mut all = shares.clone();
    all.push(set[1].clone());
    assert_eq!(reconstruct(&all, 3).unwrap(), secret);
}

#[test]
fn test_slices_with_mixed_fields_rejected() {
    let slices = [FieldElement::gf8(1), FieldElement::gf16(2)];
    assert!(matches!(
        split_slices(&slices, 2, 3, &mut rng(10)),
        Err(Error::FieldMismatch { .. })
    ));
}
