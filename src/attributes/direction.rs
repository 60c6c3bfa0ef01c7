//! Media direction attribute (sendrecv, sendonly, recvonly, inactive).
//!
//! Direction is encoded as a presence-only attribute; the four keys are
//! mutually exclusive on any given media or session. RFC 4566 defaults an
//! unspecified direction to sendrecv, but this crate leaves that decision to
//! the caller: an absent direction is reported as `None`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Attribute;
use crate::error::{Error, Result};

/// Permitted media flow for a stream or session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SdpDirection {
    SendOnly,
    SendRecv,
    RecvOnly,
    Inactive,
}

impl SdpDirection {
    /// The direction a peer answering this description would use.
    ///
    /// SendRecv and Inactive are symmetric and map to themselves.
    pub fn reverse(self) -> SdpDirection {
        match self {
            SdpDirection::SendOnly => SdpDirection::RecvOnly,
            SdpDirection::RecvOnly => SdpDirection::SendOnly,
            SdpDirection::SendRecv => SdpDirection::SendRecv,
            SdpDirection::Inactive => SdpDirection::Inactive,
        }
    }

    /// True if media may flow from the describing party.
    pub fn is_send(self) -> bool {
        matches!(self, SdpDirection::SendOnly | SdpDirection::SendRecv)
    }

    /// True if media may flow toward the describing party.
    pub fn is_receive(self) -> bool {
        matches!(self, SdpDirection::RecvOnly | SdpDirection::SendRecv)
    }

    /// The attribute key this direction serializes to.
    pub fn as_str(self) -> &'static str {
        match self {
            SdpDirection::SendOnly => "sendonly",
            SdpDirection::SendRecv => "sendrecv",
            SdpDirection::RecvOnly => "recvonly",
            SdpDirection::Inactive => "inactive",
        }
    }

    /// `Some(direction)` if the attribute key is one of the four markers.
    pub fn from_attribute(attr: &Attribute) -> Option<SdpDirection> {
        attr.key.parse().ok()
    }
}

impl fmt::Display for SdpDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SdpDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sendonly" => Ok(SdpDirection::SendOnly),
            "sendrecv" => Ok(SdpDirection::SendRecv),
            "recvonly" => Ok(SdpDirection::RecvOnly),
            "inactive" => Ok(SdpDirection::Inactive),
            _ => Err(Error::InvalidFormat(format!("unknown direction: {s}"))),
        }
    }
}
