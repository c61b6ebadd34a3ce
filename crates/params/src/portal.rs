//! Launch parameters of a portal deployment.

use std::collections::{BTreeSet, HashSet};

use portal_bls::PublicKey;
use portal_primitives::prelude::{Amount, ScriptHash, PORTAL_STATE_VALUE};
use serde::{Deserialize, Serialize};

use crate::{default::TERMINATION_FEE, errors::ParamsError};

/// Everything a deployment agrees on before the launch spend is made.
///
/// All parties must derive the identical version-zero state from these
/// parameters and the genesis output, so this struct round-trips through its
/// TOML form without loss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalParams {
    /// Validator public keys in signing order.
    pub validators: Vec<PublicKey>,

    /// Signatures required to authorize any portal operation.
    pub threshold: usize,

    /// Destination script hashes the portal delivers to; empty means any
    /// destination is admitted.
    #[serde(default)]
    pub destination_registry: BTreeSet<ScriptHash>,

    /// Fee forfeited on termination.
    #[serde(default = "default_termination_fee")]
    pub termination_fee: Amount,
}

fn default_termination_fee() -> Amount {
    TERMINATION_FEE
}

impl PortalParams {
    /// Creates parameters with the stock registry (open) and termination
    /// fee.
    pub fn new(validators: Vec<PublicKey>, threshold: usize) -> Self {
        Self {
            validators,
            threshold,
            destination_registry: BTreeSet::new(),
            termination_fee: TERMINATION_FEE,
        }
    }

    /// Checks that the parameters describe a launchable portal.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.validators.is_empty() {
            return Err(ParamsError::EmptyValidatorSet);
        }

        let mut seen = HashSet::new();
        for (position, key) in self.validators.iter().enumerate() {
            if !seen.insert(key) {
                return Err(ParamsError::DuplicateValidator(position));
            }
        }

        if self.threshold == 0 || self.threshold > self.validators.len() {
            return Err(ParamsError::InvalidThreshold {
                threshold: self.threshold,
                validators: self.validators.len(),
            });
        }

        if self.termination_fee > PORTAL_STATE_VALUE {
            return Err(ParamsError::ExcessiveTerminationFee(self.termination_fee));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(n: u8) -> Vec<PublicKey> {
        (0..n)
            .map(|i| PublicKey::from_bytes([i; portal_bls::PUBLIC_KEY_SIZE]))
            .collect()
    }

    fn params() -> PortalParams {
        PortalParams {
            validators: keys(11),
            threshold: 7,
            destination_registry: BTreeSet::new(),
            termination_fee: TERMINATION_FEE,
        }
    }

    #[test]
    fn valid_params_pass() {
        assert!(params().validate().is_ok());
    }

    #[test]
    fn validation_catches_misconfigurations() {
        let mut p = params();
        p.validators.clear();
        assert_eq!(p.validate().unwrap_err(), ParamsError::EmptyValidatorSet);

        let mut p = params();
        p.validators.push(p.validators[2]);
        assert_eq!(
            p.validate().unwrap_err(),
            ParamsError::DuplicateValidator(11),
        );

        let mut p = params();
        p.threshold = 12;
        assert_eq!(
            p.validate().unwrap_err(),
            ParamsError::InvalidThreshold {
                threshold: 12,
                validators: 11,
            },
        );

        let mut p = params();
        p.termination_fee = Amount::from_units(5);
        assert_eq!(
            p.validate().unwrap_err(),
            ParamsError::ExcessiveTerminationFee(Amount::from_units(5)),
        );
    }

    #[test]
    fn toml_roundtrip_is_lossless() {
        let original = PortalParams {
            validators: keys(3),
            threshold: 2,
            destination_registry: [ScriptHash::from_bytes([0xdd; 32])].into_iter().collect(),
            termination_fee: Amount::ZERO,
        };

        let encoded = toml::to_string(&original).unwrap();
        let decoded: PortalParams = toml::from_str(&encoded).unwrap();

        assert_eq!(original, decoded);
    }

    #[test]
    fn omitted_fields_take_defaults() {
        let keys_toml: String = keys(2)
            .iter()
            .map(|k| format!("  \"{k}\",\n"))
            .collect();
        let raw = format!("validators = [\n{keys_toml}]\nthreshold = 2\n");

        let decoded: PortalParams = toml::from_str(&raw).unwrap();
        assert!(decoded.destination_registry.is_empty());
        assert_eq!(decoded.termination_fee, TERMINATION_FEE);
    }
}
