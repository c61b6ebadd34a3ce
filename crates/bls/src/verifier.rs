//! Threshold verification of signature bundles.

use ark_bls12_381::{Bls12_381, G1Affine, G1Projective, G2Projective};
use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};

use crate::{
    bundle::SignatureBundle,
    errors::{SignatureError, VerifyError},
    keys::{hash_to_g2, PublicKey, Signature},
};

/// Verifies that `bundle` carries a quorum of valid signatures over
/// `commitment` from the given validator set.
///
/// Acceptance requires all of:
///
/// 1. every partial in the bundle comes from a known validator index,
/// 2. at least `threshold` partials are present,
/// 3. the aggregate of the present partials verifies against the aggregate of
///    the corresponding public keys.
///
/// The aggregate-then-check order is an implementation strategy, not a
/// relaxation: since all partials sign the same commitment, the pairing
/// equation holds iff it would hold for every partial individually, so a
/// single invalid partial fails the whole bundle. There is no partial credit;
/// callers are expected to pre-filter with [`verify_partial`] and submit only
/// partials they trust.
pub fn verify(
    commitment: &[u8],
    validators: &[PublicKey],
    threshold: usize,
    bundle: &SignatureBundle,
) -> Result<(), VerifyError> {
    for index in bundle.signers() {
        if index as usize >= validators.len() {
            return Err(VerifyError::UnknownSigner(index));
        }
    }

    if bundle.len() < threshold {
        return Err(VerifyError::InsufficientSignatures {
            present: bundle.len(),
            required: threshold,
        });
    }

    let mut aggregate_key = G1Projective::default();
    let mut aggregate_sig = G2Projective::default();
    for (index, signature) in bundle.iter() {
        aggregate_key += validators[index as usize]
            .to_projective()
            .map_err(|_| VerifyError::MalformedKey { index })?;
        aggregate_sig += signature
            .to_affine()
            .map_err(|_| VerifyError::MalformedPartial { index })?;
    }

    let hashed = hash_to_g2(commitment);
    let lhs = Bls12_381::pairing(G1Affine::generator(), aggregate_sig.into_affine());
    let rhs = Bls12_381::pairing(aggregate_key.into_affine(), hashed);

    if lhs == rhs {
        Ok(())
    } else {
        Err(VerifyError::InvalidSignature)
    }
}

/// Verifies one partial signature against one validator key.
///
/// This is the relayer-side filter: partials that fail here must not be
/// placed in a bundle, because a single invalid partial rejects the whole
/// message at [`verify`] time.
pub fn verify_partial(
    commitment: &[u8],
    validator: &PublicKey,
    signature: &Signature,
) -> Result<(), SignatureError> {
    validator.verify(commitment, signature)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::keys::{SecretKey, SIGNATURE_SIZE};

    const COMMITMENT: &[u8] = b"commitment bytes under test";

    fn validator_set(n: usize) -> (Vec<SecretKey>, Vec<PublicKey>) {
        let mut rng = StdRng::seed_from_u64(0xb1d);
        let secrets: Vec<SecretKey> = (0..n).map(|_| SecretKey::generate(&mut rng)).collect();
        let publics = secrets.iter().map(SecretKey::public_key).collect();

        (secrets, publics)
    }

    fn bundle_from(secrets: &[SecretKey], signers: &[usize]) -> SignatureBundle {
        signers
            .iter()
            .map(|&i| (i as u32, secrets[i].sign(COMMITMENT)))
            .collect()
    }

    #[test]
    fn exact_threshold_accepts() {
        let (secrets, publics) = validator_set(11);
        let bundle = bundle_from(&secrets, &[0, 3, 4, 5, 6, 7, 8]);

        assert!(verify(COMMITMENT, &publics, 7, &bundle).is_ok());
    }

    #[test]
    fn below_threshold_rejects_even_when_all_valid() {
        let (secrets, publics) = validator_set(11);
        let bundle = bundle_from(&secrets, &[0, 1, 2, 3, 4, 5]);

        assert_eq!(
            verify(COMMITMENT, &publics, 7, &bundle),
            Err(VerifyError::InsufficientSignatures {
                present: 6,
                required: 7,
            })
        );
    }

    #[test]
    fn forged_partial_fails_the_whole_bundle() {
        let (secrets, publics) = validator_set(11);
        let mut bundle = bundle_from(&secrets, &[0, 1, 2, 3, 4, 5, 6]);
        // Validator 7 "signs" a different message; the count is now 8 but the
        // aggregate no longer matches the commitment.
        bundle.insert(7, secrets[7].sign(b"another message"));

        assert_eq!(
            verify(COMMITMENT, &publics, 7, &bundle),
            Err(VerifyError::InvalidSignature)
        );
    }

    #[test]
    fn signature_by_the_wrong_key_rejects() {
        let (secrets, publics) = validator_set(11);
        let mut bundle = bundle_from(&secrets, &[0, 1, 2, 3, 4, 5]);
        // Validator 6's slot filled by validator 7's key.
        bundle.insert(6, secrets[7].sign(COMMITMENT));

        assert_eq!(
            verify(COMMITMENT, &publics, 7, &bundle),
            Err(VerifyError::InvalidSignature)
        );
    }

    #[test]
    fn out_of_range_signer_rejects() {
        let (secrets, publics) = validator_set(4);
        let mut bundle = bundle_from(&secrets, &[0, 1, 2, 3]);
        bundle.insert(11, secrets[0].sign(COMMITMENT));

        assert_eq!(
            verify(COMMITMENT, &publics, 3, &bundle),
            Err(VerifyError::UnknownSigner(11))
        );
    }

    #[test]
    fn garbage_partial_is_malformed() {
        let (secrets, publics) = validator_set(4);
        let mut bundle = bundle_from(&secrets, &[0, 1]);
        bundle.insert(2, Signature::from_bytes([0xaa; SIGNATURE_SIZE]));

        assert_eq!(
            verify(COMMITMENT, &publics, 3, &bundle),
            Err(VerifyError::MalformedPartial { index: 2 })
        );
    }

    #[test]
    fn full_set_accepts() {
        let (secrets, publics) = validator_set(11);
        let bundle = bundle_from(&secrets, &(0..11).collect::<Vec<_>>());

        assert!(verify(COMMITMENT, &publics, 11, &bundle).is_ok());
    }

    #[test]
    fn quorum_matrix_matches_valid_count() {
        let (secrets, publics) = validator_set(5);

        for threshold in 1..=5usize {
            for present in 1..=5usize {
                let signers: Vec<usize> = (0..present).collect();
                let bundle = bundle_from(&secrets, &signers);
                let result = verify(COMMITMENT, &publics, threshold, &bundle);

                if present >= threshold {
                    assert!(result.is_ok(), "t={threshold} n={present}");
                } else {
                    assert!(
                        matches!(result, Err(VerifyError::InsufficientSignatures { .. })),
                        "t={threshold} n={present}"
                    );
                }
            }
        }
    }
}
