//! Re-exports for test code.

pub use crate::{
    ledger::{LedgerError, MockLedger},
    validators::ValidatorFixture,
};
