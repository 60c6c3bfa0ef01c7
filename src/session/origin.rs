//! Origin (`o=`) field.

use std::fmt;
use std::net::IpAddr;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Represents the originator and session identifier of a description.
///
/// Format: `o=<username> <sess-id> <sess-version> <nettype> <addrtype> <unicast-address>`
///
/// The session id is fixed for the lifetime of a session; the version
/// increases across [`Origin::new_version`] calls so that renegotiated
/// descriptions are ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    /// Username of the originator, often "-"
    pub username: String,
    /// Session identifier
    pub session_id: u64,
    /// Session version, incremented on renegotiation
    pub version: u64,
    /// Network type, e.g. "IN"
    pub network_type: String,
    /// Address type, "IP4" or "IP6"
    pub address_type: String,
    /// Unicast address of the originating host
    pub address: String,
}

impl Origin {
    pub fn new(
        username: impl Into<String>,
        session_id: u64,
        version: u64,
        network_type: impl Into<String>,
        address_type: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Origin {
            username: username.into(),
            session_id,
            version,
            network_type: network_type.into(),
            address_type: address_type.into(),
            address: address.into(),
        }
    }

    /// An `IN` origin for the given host with a random session id and
    /// version 1.
    pub fn from_ip(username: impl Into<String>, addr: IpAddr) -> Self {
        let address_type = match addr {
            IpAddr::V4(_) => "IP4",
            IpAddr::V6(_) => "IP6",
        };
        Origin::new(
            username,
            rand::thread_rng().gen_range(1..i32::MAX as u64),
            1,
            "IN",
            address_type,
            addr.to_string(),
        )
    }

    /// A copy with the version incremented.
    pub fn new_version(self) -> Origin {
        Origin {
            version: self.version + 1,
            ..self
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.username,
            self.session_id,
            self.version,
            self.network_type,
            self.address_type,
            self.address
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let origin = Origin::new("-", 1408401718, 2, "IN", "IP4", "192.168.1.242");
        assert_eq!(origin.to_string(), "- 1408401718 2 IN IP4 192.168.1.242");
    }

    #[test]
    fn test_new_version() {
        let origin = Origin::new("-", 7, 1, "IN", "IP4", "1.2.3.4");
        let bumped = origin.clone().new_version();
        assert_eq!(bumped.version, 2);
        assert_eq!(bumped.session_id, origin.session_id);
        assert_eq!(bumped.clone().new_version().version, 3);
    }

    #[test]
    fn test_from_ip() {
        let origin = Origin::from_ip("-", "10.0.0.1".parse().unwrap());
        assert_eq!(origin.network_type, "IN");
        assert_eq!(origin.address_type, "IP4");
        assert_eq!(origin.address, "10.0.0.1");
        assert_eq!(origin.version, 1);
        assert!(origin.session_id >= 1);
    }
}
