mod common;

use ark_ec::AffineRepr;
use ark_serialize::CanonicalSerialize;
use common::*;
use groth16_core::codec::{self, CodecError};
use groth16_core::groth16_field::{Fr, G1Affine};
use groth16_core::groth16_r1cs::r1cs_example::generate_r1cs_example;
use groth16_core::{
    generate, CodecConfig, Keypair, PointCompression, Proof, Prover, ProvingKey, VerificationKey, Verifier,
    WireFormat,
};

const CONFIGS: [CodecConfig; 4] = [
    CodecConfig {
        format: WireFormat::Framed,
        compression: PointCompression::Compressed,
    },
    CodecConfig {
        format: WireFormat::Framed,
        compression: PointCompression::Uncompressed,
    },
    CodecConfig {
        format: WireFormat::Raw,
        compression: PointCompression::Compressed,
    },
    CodecConfig {
        format: WireFormat::Raw,
        compression: PointCompression::Uncompressed,
    },
];

fn fixture(seed: u64) -> (Keypair, Proof, Vec<Fr>) {
    let mut rng = seeded_rng(seed);
    let example = generate_r1cs_example::<Fr, _>(6, 2, &mut rng);
    let keypair = generate(&example.constraint_system, &mut rng).unwrap();
    let proof = Prover::prove(&keypair.pk, &example.primary_input, &example.auxiliary_input, &mut rng).unwrap();
    (keypair, proof, example.primary_input)
}

#[test]
fn test_round_trip_all_artifacts() {
    let (keypair, proof, primary) = fixture(300);
    for config in &CONFIGS {
        let pk: ProvingKey = codec::deserialize(&codec::serialize(&keypair.pk, config).unwrap(), config).unwrap();
        let vk: VerificationKey = codec::deserialize(&codec::serialize(&keypair.vk, config).unwrap(), config).unwrap();
        let decoded: Proof = codec::deserialize(&codec::serialize(&proof, config).unwrap(), config).unwrap();

        assert_eq!(pk, keypair.pk);
        assert_eq!(vk, keypair.vk);
        assert_eq!(decoded, proof);
        assert!(Verifier::verify(&vk, &primary, &decoded).unwrap());
    }
}

#[test]
fn test_truncation_is_rejected() {
    let (keypair, proof, _) = fixture(301);
    for config in &CONFIGS {
        let bytes = codec::serialize(&proof, config).unwrap();
        for len in 0..bytes.len() {
            assert!(
                codec::deserialize::<Proof>(&bytes[..len], config).is_err(),
                "{config:?}: prefix of {len} bytes decoded"
            );
        }

        let bytes = codec::serialize(&keypair.vk, config).unwrap();
        for len in (0..bytes.len()).step_by(7) {
            assert!(codec::deserialize::<VerificationKey>(&bytes[..len], config).is_err());
        }
    }
}

#[test]
fn test_raw_truncation_reports_truncated() {
    let (_, proof, _) = fixture(302);
    let config = CONFIGS[2];
    let bytes = codec::serialize(&proof, &config).unwrap();
    assert!(matches!(
        codec::deserialize::<Proof>(&bytes[..bytes.len() - 1], &config),
        Err(CodecError::Truncated)
    ));
}

#[test]
fn test_trailing_bytes_are_rejected() {
    let (keypair, proof, _) = fixture(303);

    let raw = CONFIGS[2];
    let mut bytes = codec::serialize(&proof, &raw).unwrap();
    bytes.push(0);
    assert!(matches!(
        codec::deserialize::<Proof>(&bytes, &raw),
        Err(CodecError::TrailingBytes { count: 1 })
    ));

    // A framed artifact with junk appended no longer matches its digest
    let framed = CONFIGS[0];
    let mut bytes = codec::serialize(&keypair.vk, &framed).unwrap();
    bytes.extend_from_slice(&[1, 2, 3]);
    assert!(codec::deserialize::<VerificationKey>(&bytes, &framed).is_err());
}

#[test]
fn test_framed_bit_flips_are_rejected() {
    let (keypair, proof, _) = fixture(304);
    let config = CodecConfig::default();

    let bytes = codec::serialize(&proof, &config).unwrap();
    for bit in 0..bytes.len() * 8 {
        let mut flipped = bytes.clone();
        flipped[bit / 8] ^= 1 << (bit % 8);
        assert!(
            codec::deserialize::<Proof>(&flipped, &config).is_err(),
            "flipping bit {bit} went unnoticed"
        );
    }

    let bytes = codec::serialize(&keypair.pk, &config).unwrap();
    for byte in (0..bytes.len()).step_by(61) {
        let mut flipped = bytes.clone();
        flipped[byte] ^= 0x10;
        assert!(codec::deserialize::<ProvingKey>(&flipped, &config).is_err());
    }
}

#[test]
fn test_raw_bit_flips_never_yield_accepting_proof() {
    let (keypair, proof, primary) = fixture(305);
    let config = CONFIGS[2];

    let bytes = codec::serialize(&proof, &config).unwrap();
    for bit in 0..bytes.len() * 8 {
        let mut flipped = bytes.clone();
        flipped[bit / 8] ^= 1 << (bit % 8);
        if let Ok(decoded) = codec::deserialize::<Proof>(&flipped, &config) {
            assert_ne!(decoded, proof);
            assert!(!Verifier::verify(&keypair.vk, &primary, &decoded).unwrap());
        }
    }
}

#[test]
fn test_point_off_curve_is_rejected() {
    let (_, proof, _) = fixture(306);
    let config = CONFIGS[3];
    let mut bytes = codec::serialize(&proof, &config).unwrap();
    // Uncompressed G1 is x || y; zeroing y leaves a point off the curve
    for b in &mut bytes[48..96] {
        *b = 0;
    }
    assert!(matches!(
        codec::deserialize::<Proof>(&bytes, &config),
        Err(CodecError::Serialization(_))
    ));
}

/// First point of the form `(x, y)` with small `x` that lies on the curve but
/// outside the prime-order subgroup
fn point_outside_subgroup() -> G1Affine {
    (1u64..)
        .filter_map(|x| G1Affine::get_point_from_x_unchecked(<G1Affine as AffineRepr>::BaseField::from(x), false))
        .find(|p| p.is_on_curve() && !p.is_in_correct_subgroup_assuming_on_curve())
        .unwrap()
}

#[test]
fn test_point_outside_subgroup_is_rejected() {
    let (keypair, proof, _) = fixture(308);
    let mut forged = proof;
    forged.a = point_outside_subgroup();

    for config in &CONFIGS {
        let bytes = codec::serialize(&forged, config).unwrap();
        assert!(
            matches!(codec::deserialize::<Proof>(&bytes, config), Err(CodecError::Serialization(_))),
            "{config:?}: small-subgroup point decoded"
        );
    }

    let mut vk = keypair.vk.clone();
    vk.alpha_g1 = forged.a;
    let raw = CONFIGS[2];
    let bytes = codec::serialize(&vk, &raw).unwrap();
    assert!(matches!(
        codec::deserialize::<VerificationKey>(&bytes, &raw),
        Err(CodecError::Serialization(_))
    ));
}

#[test]
fn test_proving_key_with_overflowing_sizes_is_rejected() {
    let (keypair, _, _) = fixture(309);
    let raw = CONFIGS[2];
    let mut bytes = codec::serialize(&keypair.pk, &raw).unwrap();

    // The constraint system trailer starts with primary_input_size
    let trailer = bytes.len() - keypair.pk.constraint_system.compressed_size();
    bytes[trailer..trailer + 8].copy_from_slice(&u64::MAX.to_le_bytes());
    assert!(matches!(
        codec::deserialize::<ProvingKey>(&bytes, &raw),
        Err(CodecError::Serialization(_))
    ));
}

#[test]
fn test_file_round_trip() {
    let (keypair, proof, primary) = fixture(307);
    let dir = tempfile::tempdir().unwrap();
    let config = CodecConfig::default();

    let pk_path = dir.path().join("pk.bin");
    let vk_path = dir.path().join("vk.bin");
    let proof_path = dir.path().join("proof.bin");
    codec::write_to_file(&keypair.pk, &pk_path, &config).unwrap();
    codec::write_to_file(&keypair.vk, &vk_path, &config).unwrap();
    codec::write_to_file(&proof, &proof_path, &config).unwrap();

    let pk: ProvingKey = codec::read_from_file(&pk_path, &config).unwrap();
    let vk: VerificationKey = codec::read_from_file(&vk_path, &config).unwrap();
    let decoded: Proof = codec::read_from_file(&proof_path, &config).unwrap();
    assert_eq!(pk, keypair.pk);
    assert!(Verifier::verify(&vk, &primary, &decoded).unwrap());

    // A proof file is not a verification key
    assert!(matches!(
        codec::read_from_file::<VerificationKey, _>(&proof_path, &config),
        Err(CodecError::KindMismatch { .. })
    ));
    assert!(matches!(
        codec::read_from_file::<Proof, _>(dir.path().join("missing.bin"), &config),
        Err(CodecError::Io(_))
    ));
}
