//! Shares survive a trip through JSON and still reconstruct.

mod common;

use common::{init_tracing, rng};
use keysplit::{
    reconstruct, reconstruct_bytes, split, split_bytes, Error, FieldElement, FieldVariant,
    ParticipantShare, PrimeField, Share,
};
use num_bigint::BigUint;

#[test]
fn test_shares_round_trip_through_json() {
    init_tracing();
    let p = PrimeField::from_u64(1_125_899_906_842_679).unwrap();
    for secret in [
        FieldElement::gf8(0x8d),
        FieldElement::gf16(0xbeef),
        FieldElement::prime(&p, BigUint::from(987_654_321_012u64)).unwrap(),
    ] {
        let shares = split(&secret, 3, 5, &mut rng(1)).unwrap();
        let json = serde_json::to_string(&shares).unwrap();
        let decoded: Vec<Share> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, shares);
        assert_eq!(reconstruct(&decoded[2..], 3).unwrap(), secret);
    }
}

#[test]
fn test_participant_shares_round_trip_through_json() {
    let secret = hex::decode("8d60bf76").unwrap();
    let parts = split_bytes(&FieldVariant::Gf8, &secret, 3, 3, &mut rng(2)).unwrap();
    let json = serde_json::to_string(&parts).unwrap();
    let decoded: Vec<ParticipantShare> = serde_json::from_str(&json).unwrap();
    assert_eq!(reconstruct_bytes(&decoded, 3, secret.len()).unwrap(), secret);
}

#[test]
fn test_tampered_modulus_is_caught() {
    let p = PrimeField::from_u64(103).unwrap();
    let secret = FieldElement::prime(&p, BigUint::from(7u32)).unwrap();
    let shares = split(&secret, 2, 3, &mut rng(3)).unwrap();
    let json = serde_json::to_string(&shares).unwrap();

    // a composite modulus is refused outright
    let composite = json.replace("[103]", "[100]");
    assert!(serde_json::from_str::<Vec<Share>>(&composite).is_err());

    // GF(2) loads, but x = 2 is out of range there
    let shrunk: Vec<Share> = serde_json::from_str(&json.replace("[103]", "[2]")).unwrap();
    assert!(matches!(
        reconstruct(&shrunk, 2),
        Err(Error::InvalidParameters(_))
    ));
}
