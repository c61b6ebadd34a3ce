//! Value amounts and the condition vocabulary that locking scripts emit.
//!
//! A spend does not mutate ledger state directly; evaluating its locking
//! script against the provided solution yields an ordered list of
//! [`Condition`]s which the ledger then enforces or applies. This is the
//! entire interface between the portal and the script-execution engine.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::hashes::{AnnouncementId, OutputId, ScriptHash};

/// An amount of the host ledger's native value, in indivisible units.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
pub struct Amount(u64);

impl Amount {
    /// Zero value, used for marker outputs.
    pub const ZERO: Amount = Amount(0);

    /// Creates an amount from indivisible units.
    pub const fn from_units(units: u64) -> Self {
        Self(units)
    }

    /// The amount in indivisible units.
    pub const fn to_units(self) -> u64 {
        self.0
    }

    /// Checked addition.
    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Checked subtraction.
    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An effect or requirement emitted by evaluating a locking script.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum Condition {
    /// Create a new output locked by `script_hash` and carrying `value`.
    CreateOutput {
        /// Locking script hash of the new output.
        script_hash: ScriptHash,

        /// Value carried by the new output.
        value: Amount,
    },

    /// Announce `id`, visible to assertions within the same spend bundle.
    CreateAnnouncement {
        /// The announced identity.
        id: AnnouncementId,
    },

    /// Require that some spend in the same bundle announced `id`.
    AssertAnnouncement {
        /// The asserted identity.
        id: AnnouncementId,
    },

    /// Require that the spent output's id is exactly `id`.
    ///
    /// Scripts receive their own output's identity through the solution;
    /// this condition is how they pin it, so a solution lifted from one
    /// output cannot satisfy a sibling locked by the same script.
    AssertSelfId {
        /// The pinned identity.
        id: OutputId,
    },

    /// Reserve `amount` as a fee collected by the ledger; it is never
    /// returned to any party.
    ReserveFee {
        /// The forfeited amount.
        amount: Amount,
    },

    /// End the spent output's lineage; no successor may be created from it.
    Melt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_arithmetic_is_checked() {
        let a = Amount::from_units(u64::MAX);

        assert_eq!(a.checked_add(Amount::from_units(1)), None);
        assert_eq!(Amount::ZERO.checked_sub(Amount::from_units(1)), None);
        assert_eq!(
            Amount::from_units(3).checked_sub(Amount::from_units(1)),
            Some(Amount::from_units(2)),
        );
    }
}
