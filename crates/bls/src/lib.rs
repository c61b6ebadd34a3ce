//! BLS12-381 key material and threshold signature verification for the portal.
//!
//! Validators hold BLS12-381 keypairs with public keys in G1 (48 bytes
//! compressed) and signatures in G2 (96 bytes compressed). Each validator
//! signs the same message commitment independently and offline; a relayer
//! collects the partial signatures into a [`SignatureBundle`] keyed by
//! validator index. Verification aggregates the present partials and the
//! corresponding public keys and checks a single pairing equation, which is
//! equivalent in outcome to verifying every partial on its own: one bad
//! partial makes the aggregate fail.
//!
//! Same-message aggregation requires validator keys to carry a
//! proof-of-possession when the set is registered. The validator set is fixed
//! per portal version, so the ceremony happens once per launch or rotation.

pub mod bundle;
pub mod errors;
pub mod keys;
pub mod verifier;

pub use bundle::{SignatureBundle, ValidatorIdx};
pub use errors::{SignatureError, VerifyError};
pub use keys::{PublicKey, SecretKey, Signature, PUBLIC_KEY_SIZE, SECRET_KEY_SIZE, SIGNATURE_SIZE};
pub use verifier::{verify, verify_partial};
