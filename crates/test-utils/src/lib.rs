//! This crate provides test fixtures shared across the workspace: seeded
//! validator sets with partial-signature helpers, and an in-memory ledger
//! that enforces the host ledger's settlement rules (single spend per
//! output, bundle-scoped announcements, value conservation).
//!
//! Nothing here is consensus code; production portals settle against a real
//! ledger client.

pub mod ledger;
pub mod prelude;
pub mod validators;

pub use ledger::{LedgerError, MockLedger};
pub use validators::ValidatorFixture;
