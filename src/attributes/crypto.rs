//! SDES Crypto Attribute
//!
//! Carries `a=crypto` key material (RFC 4568) as structured text. This crate
//! only transports the parameters between peers; key exchange and SRTP
//! processing happen elsewhere.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Attribute;
use crate::error::{Error, Result};

/// One `crypto` attribute line.
///
/// Format: `<tag> <crypto-suite> <key-params> [<session-params>]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoEntry {
    /// Tag used to match offer and answer lines
    pub id: u32,
    /// Crypto suite, e.g. "AES_CM_128_HMAC_SHA1_80"
    pub suite: String,
    /// Key parameters, e.g. "inline:<base64 key material>"
    pub key_params: String,
    /// Optional session parameters, kept as raw text
    pub session_params: Option<String>,
}

impl CryptoEntry {
    /// Parses a crypto attribute body.
    ///
    /// Fewer than three space-separated tokens is a format error.
    pub fn parse(line: &str) -> Result<CryptoEntry> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.len() < 3 {
            return Err(Error::InvalidFormat(format!("malformed crypto line: {line}")));
        }

        Ok(CryptoEntry {
            id: parts[0]
                .parse()
                .map_err(|_| Error::InvalidFormat(format!("invalid crypto tag: {}", parts[0])))?,
            suite: parts[1].to_string(),
            key_params: parts[2].to_string(),
            session_params: (parts.len() > 3).then(|| parts[3..].join(" ")),
        })
    }
}

impl fmt::Display for CryptoEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.id, self.suite, self.key_params)?;
        if let Some(session_params) = &self.session_params {
            write!(f, " {session_params}")?;
        }
        Ok(())
    }
}

/// The crypto lines of one session or media, in attribute order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdpCryptoConfig {
    pub entries: Vec<CryptoEntry>,
}

impl SdpCryptoConfig {
    pub fn new(entries: Vec<CryptoEntry>) -> Self {
        SdpCryptoConfig { entries }
    }
}

/// Collects every `crypto` attribute into a config; `Ok(None)` if there are
/// none.
pub(crate) fn collect_crypto(attributes: &[Attribute]) -> Result<Option<SdpCryptoConfig>> {
    let mut entries = Vec::new();

    for attr in attributes.iter().filter(|a| a.key == "crypto") {
        entries.push(CryptoEntry::parse(attr.value_or_empty())?);
    }

    if entries.is_empty() {
        Ok(None)
    } else {
        Ok(Some(SdpCryptoConfig::new(entries)))
    }
}
