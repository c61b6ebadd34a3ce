//! BLS12-381 keypairs and partial signatures.
//!
//! The scheme parameters follow the usual "min-pk" layout: public keys live
//! in G1 and compress to 48 bytes, signatures live in G2 and compress to 96
//! bytes. Messages are hashed to G2 with the RFC 9380 simplified SWU map
//! under a fixed proof-of-possession ciphersuite tag.

use std::{fmt, str::FromStr};

use ark_bls12_381::{g2, Bls12_381, Fr, G1Affine, G1Projective, G2Affine, G2Projective};
use ark_ec::{
    hashing::{curve_maps::wb::WBMap, map_to_curve_hasher::MapToCurveBasedHasher, HashToCurve},
    pairing::Pairing,
    AffineRepr, CurveGroup, Group,
};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{rand::RngCore, UniformRand};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha2::Sha256;

use crate::errors::SignatureError;

/// Size of a compressed G1 public key in bytes.
pub const PUBLIC_KEY_SIZE: usize = 48;

/// Size of a compressed G2 signature in bytes.
pub const SIGNATURE_SIZE: usize = 96;

/// Size of a serialized secret scalar in bytes.
pub const SECRET_KEY_SIZE: usize = 32;

/// Ciphersuite tag for hashing commitments to G2.
///
/// The proof-of-possession suite is required for same-message aggregation;
/// portal-level domain separation lives in the commitment bytes themselves.
pub const SIG_DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// Hashes a message onto G2 under [`SIG_DST`].
pub(crate) fn hash_to_g2(message: &[u8]) -> G2Affine {
    let hasher = MapToCurveBasedHasher::<
        G2Projective,
        ark_ff::field_hashers::DefaultFieldHasher<Sha256, 128>,
        WBMap<g2::Config>,
    >::new(SIG_DST)
    .expect("hasher accepts the fixed ciphersuite tag");

    hasher.hash(message).expect("message hashes onto the curve")
}

/// A validator's secret signing scalar.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(Fr);

impl SecretKey {
    /// Samples a fresh secret key from the provided randomness source.
    pub fn generate<R: RngCore>(rng: &mut R) -> Self {
        Self(Fr::rand(rng))
    }

    /// Serializes the secret scalar.
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_SIZE] {
        let mut bytes = [0u8; SECRET_KEY_SIZE];
        self.0
            .serialize_compressed(&mut bytes[..])
            .expect("a scalar fits in 32 bytes");

        bytes
    }

    /// Deserializes a secret scalar.
    pub fn from_bytes(bytes: &[u8; SECRET_KEY_SIZE]) -> Result<Self, SignatureError> {
        Fr::deserialize_compressed(&bytes[..])
            .map(Self)
            .map_err(|_| SignatureError::MalformedSecretKey)
    }

    /// The public key corresponding to this secret key.
    pub fn public_key(&self) -> PublicKey {
        let point = (G1Projective::generator() * self.0).into_affine();

        PublicKey(compress_g1(point))
    }

    /// Signs a message (in practice, a message commitment) with this key.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let point = (hash_to_g2(message).into_group() * self.0).into_affine();

        Signature(compress_g2(point))
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The scalar stays out of logs.
        f.write_str("SecretKey(..)")
    }
}

/// A validator's public key, a compressed G1 point.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, BorshSerialize, BorshDeserialize,
)]
pub struct PublicKey([u8; PUBLIC_KEY_SIZE]);

impl PublicKey {
    /// Wraps raw compressed bytes without validating them; validation happens
    /// on use.
    pub const fn from_bytes(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns the compressed encoding.
    pub const fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }

    /// Decodes the key into a curve point, enforcing curve and subgroup
    /// membership.
    pub(crate) fn to_projective(self) -> Result<G1Projective, SignatureError> {
        G1Affine::deserialize_compressed(&self.0[..])
            .map(Into::into)
            .map_err(|_| SignatureError::MalformedPublicKey)
    }

    /// Verifies a single partial signature against this key.
    ///
    /// Relayers use this to filter partials before building a bundle, so that
    /// everything they submit is individually valid.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), SignatureError> {
        let pk = self.to_projective()?;
        let sig = signature.to_affine()?;
        let hashed = hash_to_g2(message);

        let lhs = Bls12_381::pairing(G1Affine::generator(), sig);
        let rhs = Bls12_381::pairing(pk.into_affine(), hashed);

        if lhs == rhs {
            Ok(())
        } else {
            Err(SignatureError::BadSignature)
        }
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for PublicKey {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; PUBLIC_KEY_SIZE];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| SignatureError::MalformedPublicKey)?;

        Ok(Self(bytes))
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as Deserialize>::deserialize(deserializer)?;

        s.parse().map_err(de::Error::custom)
    }
}

/// A partial or aggregate signature, a compressed G2 point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize)]
pub struct Signature([u8; SIGNATURE_SIZE]);

impl Signature {
    /// Wraps raw compressed bytes without validating them; validation happens
    /// on use.
    pub const fn from_bytes(bytes: [u8; SIGNATURE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns the compressed encoding.
    pub const fn as_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.0
    }

    /// Decodes the signature into a curve point, enforcing curve and subgroup
    /// membership.
    pub(crate) fn to_affine(self) -> Result<G2Affine, SignatureError> {
        G2Affine::deserialize_compressed(&self.0[..])
            .map_err(|_| SignatureError::MalformedSignature)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for Signature {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; SIGNATURE_SIZE];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| SignatureError::MalformedSignature)?;

        Ok(Self(bytes))
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as Deserialize>::deserialize(deserializer)?;

        s.parse().map_err(de::Error::custom)
    }
}

/// Aggregates partial signatures over the same message by point addition.
pub fn aggregate_signatures<'a, I>(signatures: I) -> Result<Signature, SignatureError>
where
    I: IntoIterator<Item = &'a Signature>,
{
    let mut aggregate = G2Projective::default();
    let mut count = 0usize;

    for signature in signatures {
        aggregate += signature.to_affine()?;
        count += 1;
    }

    if count == 0 {
        return Err(SignatureError::EmptyAggregate);
    }

    Ok(Signature(compress_g2(aggregate.into_affine())))
}

fn compress_g1(point: G1Affine) -> [u8; PUBLIC_KEY_SIZE] {
    let mut bytes = [0u8; PUBLIC_KEY_SIZE];
    point
        .serialize_compressed(&mut bytes[..])
        .expect("a G1 point fits in 48 bytes");

    bytes
}

fn compress_g2(point: G2Affine) -> [u8; SIGNATURE_SIZE] {
    let mut bytes = [0u8; SIGNATURE_SIZE];
    point
        .serialize_compressed(&mut bytes[..])
        .expect("a G2 point fits in 96 bytes");

    bytes
}
