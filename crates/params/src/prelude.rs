//! Re-exports of all portal parameters.

pub use crate::{errors::ParamsError, portal::PortalParams};
