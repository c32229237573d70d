//! `host:port` validation shared by the collector and agent configs.

use crate::error::{MetrikaError, Result};

/// Accepts `host:port` (host may be a name, IPv4, or bracketed IPv6).
pub fn validate_address(addr: &str) -> Result<()> {
    let (host, port) = addr
        .rsplit_once(':')
        .ok_or_else(|| MetrikaError::Config(format!("address must be host:port, got {addr:?}")))?;
    if host.is_empty() {
        return Err(MetrikaError::Config(format!("address host is empty: {addr:?}")));
    }
    port.parse::<u16>()
        .map_err(|_| MetrikaError::Config(format!("address port is not a valid u16: {addr:?}")))?;
    Ok(())
}
