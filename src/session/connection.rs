//! Connection data (`c=`) field.

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// Represents the connection data field of a session or media.
///
/// Format: `c=<nettype> <addrtype> <connection-address>`
///
/// No validation of the address text is performed beyond what the
/// construction helpers enforce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Network type, e.g. "IN"
    pub network_type: String,
    /// Address type, "IP4" or "IP6"
    pub address_type: String,
    /// Connection address, e.g. "192.168.1.242"
    pub address: String,
}

impl Connection {
    pub fn new(
        network_type: impl Into<String>,
        address_type: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Connection {
            network_type: network_type.into(),
            address_type: address_type.into(),
            address: address.into(),
        }
    }

    /// An `IN IP4` or `IN IP6` connection for the given address.
    pub fn from_ip(addr: IpAddr) -> Self {
        let address_type = match addr {
            IpAddr::V4(_) => "IP4",
            IpAddr::V6(_) => "IP6",
        };
        Connection::new("IN", address_type, addr.to_string())
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.network_type, self.address_type, self.address
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ip() {
        let conn = Connection::from_ip("192.168.1.242".parse().unwrap());
        assert_eq!(conn, Connection::new("IN", "IP4", "192.168.1.242"));

        let conn = Connection::from_ip("2001:db8::1".parse().unwrap());
        assert_eq!(conn.address_type, "IP6");
        assert_eq!(conn.address, "2001:db8::1");
    }

    #[test]
    fn test_display() {
        let conn = Connection::new("IN", "IP4", "1.2.3.4");
        assert_eq!(conn.to_string(), "IN IP4 1.2.3.4");
    }
}
