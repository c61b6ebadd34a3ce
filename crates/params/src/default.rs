//! Default values for portal deployments.

use portal_primitives::prelude::{Amount, PORTAL_STATE_VALUE};

/// Default fee forfeited by a termination transition.
///
/// The state output's own value; termination cannot reserve more than that.
pub(crate) const TERMINATION_FEE: Amount = PORTAL_STATE_VALUE;
