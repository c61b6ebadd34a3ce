//! Locking scripts ("connectors") for claimable message artifacts and the
//! claim flow that redeems them.
//!
//! A connector is a small program parameterized at construction time; its
//! content hash is the locking condition of the output it guards. The portal
//! mints one message connector output per relayed message, and a claimer
//! redeems it by revealing the message fields and pairing the spend with an
//! announcement from the destination script.

pub mod claim;
pub mod connector_msg;
pub mod delegated;
pub mod errors;
pub mod prelude;

pub use claim::{claim, Claim, ClaimerResource};
pub use connector_msg::{ClaimSolution, MessageConnector};
pub use delegated::DelegatedConditions;
pub use errors::ClaimError;
