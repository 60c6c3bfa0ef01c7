//! SDP Attribute Types
//!
//! This module contains the generic `a=` line representation along with the
//! structured attribute values this crate models: media direction, rtpmap
//! entries, and SDES crypto parameters.

pub mod crypto;
pub mod direction;
pub mod rtpmap;

pub use crypto::{CryptoEntry, SdpCryptoConfig};
pub use direction::SdpDirection;
pub use rtpmap::RtpMapEntry;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single attribute line: a key with an optional value.
///
/// Attributes serialize as `a=<key>` for flags and `a=<key>:<value>`
/// otherwise. The key is never empty for attributes produced by the parser.
/// Structured values (rtpmap, crypto, ...) are kept as raw text here and
/// parsed lazily by the accessors that need them.
///
/// # Examples
///
/// ```
/// use sdp_core::Attribute;
///
/// let attr: Attribute = "rtpmap:0 PCMU/8000".parse().unwrap();
/// assert_eq!(attr.key, "rtpmap");
/// assert_eq!(attr.value.as_deref(), Some("0 PCMU/8000"));
/// assert_eq!(attr.to_string(), "rtpmap:0 PCMU/8000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name
    pub key: String,
    /// Attribute value; `None` for flag attributes such as `sendrecv`
    pub value: Option<String>,
}

impl Attribute {
    /// Creates an attribute with a value.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Attribute {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// Creates a valueless flag attribute.
    pub fn flag(key: impl Into<String>) -> Self {
        Attribute {
            key: key.into(),
            value: None,
        }
    }

    /// The value, with flags mapped to the empty string.
    pub fn value_or_empty(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}:{}", self.key, value),
            None => write!(f, "{}", self.key),
        }
    }
}

impl FromStr for Attribute {
    type Err = Error;

    /// Splits on the first `:`; text without one becomes a flag attribute.
    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.split_once(':') {
            Some((key, value)) => Attribute::new(key, value),
            None => Attribute::flag(s),
        })
    }
}

/// First-match value lookup, with flags mapped to the empty string.
pub(crate) fn first_value<'a>(attributes: &'a [Attribute], key: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|a| a.key == key)
        .map(|a| a.value_or_empty())
}

/// First-match value lookup parsed as an integer.
///
/// A present but non-numeric value is a format error; an absent attribute is
/// `Ok(None)`.
pub(crate) fn numeric_value(attributes: &[Attribute], key: &str) -> Result<Option<u32>> {
    first_value(attributes, key)
        .map(|v| {
            v.parse::<u32>()
                .map_err(|_| Error::InvalidFormat(format!("invalid {key} value: {v}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_round_trip() {
        let attr: Attribute = "fmtp:101 0-15".parse().unwrap();
        assert_eq!(attr, Attribute::new("fmtp", "101 0-15"));
        assert_eq!(attr.to_string(), "fmtp:101 0-15");

        let flag: Attribute = "sendrecv".parse().unwrap();
        assert_eq!(flag, Attribute::flag("sendrecv"));
        assert_eq!(flag.to_string(), "sendrecv");
    }

    #[test]
    fn test_attribute_value_with_colon() {
        // Only the first colon separates key from value
        let attr: Attribute = "extmap:1 urn:ietf:params".parse().unwrap();
        assert_eq!(attr.key, "extmap");
        assert_eq!(attr.value.as_deref(), Some("1 urn:ietf:params"));
    }

    #[test]
    fn test_first_value() {
        let attrs = vec![
            Attribute::new("crypto", "1 AES_CM_128 inline:abc"),
            Attribute::new("crypto", "2 AES_CM_256 inline:def"),
            Attribute::flag("sendonly"),
        ];
        assert_eq!(
            first_value(&attrs, "crypto"),
            Some("1 AES_CM_128 inline:abc")
        );
        assert_eq!(first_value(&attrs, "sendonly"), Some(""));
        assert_eq!(first_value(&attrs, "ptime"), None);
    }

    #[test]
    fn test_numeric_value() {
        let attrs = vec![Attribute::new("ptime", "20"), Attribute::new("mid", "audio")];
        assert_eq!(numeric_value(&attrs, "ptime").unwrap(), Some(20));
        assert_eq!(numeric_value(&attrs, "maxptime").unwrap(), None);
        assert!(numeric_value(&attrs, "mid").is_err());
    }
}
