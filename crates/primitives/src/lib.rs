//! This crate contains general types, traits and pure functions that need to be shared across
//! multiple crates.
//!
//! It is not intended to be used directly by end users, but rather to be used as a dependency by
//! other crates. Also note that this crate lies at the bottom of the crate-hierarchy in this
//! workspace i.e., it only depends on the key-material crate.

pub mod commitment;
pub mod conditions;
pub mod constants;
pub mod errors;
pub mod hashes;
pub mod ledger;
pub mod message;
pub mod prelude;
pub mod validator_table;
