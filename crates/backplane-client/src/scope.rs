//! Scope string helpers
//!
//! Backplane scopes look like `bus:foo.com channel:abc123`. Regular tokens
//! always carry a server-assigned channel; super tokens may carry neither
//! grant.

use crate::error::{Error, Result};

const CHANNEL_GRANT: &str = "channel:";
const BUS_GRANT: &str = "bus:";

/// Channel id granted by `scope`: everything after the literal `channel:`.
pub fn retrieve_channel_from_scope(scope: &str) -> Result<&str> {
    scope
        .find(CHANNEL_GRANT)
        .map(|idx| &scope[idx + CHANNEL_GRANT.len()..])
        .ok_or_else(|| Error::MissingChannel(scope.to_owned()))
}

/// Bus id granted by `scope`, if any. Ends at the next space.
pub fn retrieve_bus_from_scope(scope: &str) -> Option<&str> {
    scope
        .split_whitespace()
        .find_map(|grant| grant.strip_prefix(BUS_GRANT))
}
