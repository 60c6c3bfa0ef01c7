//! Media (`m=`) blocks and their derived operations.
//!
//! A [`Media`] value is one media description: the `m=` line itself, an
//! optional media-level connection override, and the attribute lines that
//! follow it. Like every type in this crate it is immutable; the `with_*`
//! methods return modified copies.

pub mod payload;

pub use payload::{lookup_static, PayloadMap, PayloadMapEntry};

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::attributes::{
    self, crypto, Attribute, RtpMapEntry, SdpCryptoConfig, SdpDirection,
};
use crate::error::{Error, Result};
use crate::session::{Connection, SessionDescription};

/// Represents one media description.
///
/// # Examples
///
/// ```
/// use sdp_core::{Media, SdpDirection};
///
/// let media = Media::rtp_audio(49170, &[0, 8])
///     .with_attribute(sdp_core::Attribute::new("rtpmap", "0 PCMU/8000"))
///     .with_direction(SdpDirection::SendRecv);
///
/// assert_eq!(media.formats, vec!["0", "8"]);
/// assert_eq!(media.direction(), Some(SdpDirection::SendRecv));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    /// Media type, e.g. "audio", "video"
    pub media_type: String,
    /// Transport port; 0 means the stream is disabled
    pub port: u16,
    /// Transport protocol, e.g. "RTP/AVP"
    pub protocol: String,
    /// Format tokens in preference order
    pub formats: Vec<String>,
    /// Media-level connection, overriding the session-level one
    pub connection: Option<Connection>,
    /// Attribute lines in order; multiple attributes may share a key
    pub attributes: Vec<Attribute>,
    /// Type letters of body lines this crate does not model
    pub unknowns: Vec<String>,
}

impl Media {
    pub fn new(
        media_type: impl Into<String>,
        port: u16,
        protocol: impl Into<String>,
        formats: Vec<String>,
    ) -> Self {
        Media {
            media_type: media_type.into(),
            port,
            protocol: protocol.into(),
            formats,
            connection: None,
            attributes: Vec::new(),
            unknowns: Vec::new(),
        }
    }

    /// An `RTP/AVP` audio media for the given payload types.
    pub fn rtp_audio(port: u16, formats: &[u8]) -> Media {
        Media::new(
            "audio",
            port,
            "RTP/AVP",
            formats.iter().map(u8::to_string).collect(),
        )
    }

    // --- Withers ---

    pub fn with_port(mut self, port: u16) -> Media {
        self.port = port;
        self
    }

    pub fn with_formats(mut self, formats: Vec<String>) -> Media {
        self.formats = formats;
        self
    }

    pub fn with_connection(mut self, connection: Connection) -> Media {
        self.connection = Some(connection);
        self
    }

    pub fn without_connection(mut self) -> Media {
        self.connection = None;
        self
    }

    pub fn with_attributes(mut self, attributes: Vec<Attribute>) -> Media {
        self.attributes = attributes;
        self
    }

    /// Appends one attribute.
    pub fn with_attribute(mut self, attr: Attribute) -> Media {
        self.attributes.push(attr);
        self
    }

    /// Appends several attributes.
    pub fn with_attributes_added(mut self, attrs: Vec<Attribute>) -> Media {
        self.attributes.extend(attrs);
        self
    }

    /// Removes every attribute matching the predicate.
    pub fn without_attributes(mut self, predicate: impl Fn(&Attribute) -> bool) -> Media {
        self.attributes.retain(|a| !predicate(a));
        self
    }

    /// Removes every attribute whose key is in `keys`.
    pub fn without_attribute_keys(self, keys: &[&str]) -> Media {
        self.without_attributes(|a| keys.contains(&a.key.as_str()))
    }

    /// Removes every attribute for `key` and appends one with the new value.
    pub fn replace_attribute(self, key: &str, value: impl Into<String>) -> Media {
        let attr = Attribute::new(key, value);
        self.without_attributes(|a| a.key == key).with_attribute(attr)
    }

    // --- Accessors ---

    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.iter().any(|a| a.key == key)
    }

    /// The value of the first attribute for `key`; flags map to `Some("")`.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        attributes::first_value(&self.attributes, key)
    }

    /// The values of every attribute for `key`, in line order.
    pub fn attribute_values(&self, key: &str) -> Vec<&str> {
        self.attributes
            .iter()
            .filter(|a| a.key == key)
            .map(|a| a.value_or_empty())
            .collect()
    }

    /// The `ptime` attribute parsed as milliseconds.
    pub fn ptime(&self) -> Result<Option<u32>> {
        attributes::numeric_value(&self.attributes, "ptime")
    }

    /// The `maxptime` attribute parsed as milliseconds.
    pub fn maxptime(&self) -> Result<Option<u32>> {
        attributes::numeric_value(&self.attributes, "maxptime")
    }

    /// The SDES crypto lines of this media, if any.
    pub fn crypto(&self) -> Result<Option<SdpCryptoConfig>> {
        crypto::collect_crypto(&self.attributes)
    }

    /// Appends one `crypto` attribute per entry of the config.
    pub fn with_crypto(mut self, config: &SdpCryptoConfig) -> Media {
        for entry in &config.entries {
            self.attributes.push(Attribute::new("crypto", entry.to_string()));
        }
        self
    }

    /// True if the stream is disabled (port 0).
    pub fn is_disabled(&self) -> bool {
        self.port == 0
    }

    pub fn is_enabled(&self) -> bool {
        self.port != 0
    }

    // --- Direction ---

    /// The direction marker, scanning attributes in order; first match wins.
    ///
    /// Absence means "not specified": apply the RFC 4566 default of sendrecv
    /// at the call site if one is required.
    pub fn direction(&self) -> Option<SdpDirection> {
        self.attributes.iter().find_map(SdpDirection::from_attribute)
    }

    /// Replaces any direction markers with exactly one for `direction`.
    ///
    /// This is the only way to set a direction deterministically: a parsed
    /// media may carry conflicting markers, and this strips all of them.
    pub fn with_direction(mut self, direction: SdpDirection) -> Media {
        self.attributes
            .retain(|a| SdpDirection::from_attribute(a).is_none());
        self.attributes.push(Attribute::flag(direction.as_str()));
        self
    }

    /// Removes every direction marker.
    pub fn without_direction(mut self) -> Media {
        self.attributes
            .retain(|a| SdpDirection::from_attribute(a).is_none());
        self
    }

    /// Swaps sendonly and recvonly; symmetric and unspecified directions are
    /// left as they are.
    pub fn inverse_direction(self) -> Media {
        match self.direction() {
            Some(SdpDirection::SendOnly) => self.with_direction(SdpDirection::RecvOnly),
            Some(SdpDirection::RecvOnly) => self.with_direction(SdpDirection::SendOnly),
            _ => self,
        }
    }

    // --- Format editing ---

    /// Restricts the format list to tokens accepted by `filter`, dropping
    /// any `rtpmap`/`fmtp` attribute whose payload type was excluded.
    pub fn filter_formats(mut self, filter: impl Fn(&str) -> bool) -> Media {
        self.formats.retain(|f| filter(f));
        self.attributes.retain(|a| match format_token(a) {
            Some(token) => filter(token),
            None => true,
        });
        self
    }

    /// Drops `rtpmap`/`fmtp` attributes referencing a payload type that is
    /// not in the format list.
    ///
    /// Use after edits that bypassed [`Media::filter_formats`].
    pub fn cleanup(mut self) -> Media {
        let formats = self.formats.clone();
        self.attributes.retain(|a| match format_token(a) {
            Some(token) => formats.iter().any(|f| f == token),
            None => true,
        });
        self
    }

    /// A stripped copy representing a rejected stream: port 0, at most the
    /// first format, no attributes and no connection override.
    ///
    /// The media line itself must survive so that positional indexing across
    /// the session stays intact, per RFC 4566.
    pub fn disabled(&self) -> Media {
        Media {
            media_type: self.media_type.clone(),
            port: 0,
            protocol: self.protocol.clone(),
            formats: self.formats.first().cloned().into_iter().collect(),
            connection: None,
            attributes: Vec::new(),
            unknowns: Vec::new(),
        }
    }

    // --- Payload resolution ---

    /// Resolves every format, in order, to an [`RtpMapEntry`]: explicit
    /// `rtpmap` attributes first, then the static RFC 3551 table.
    ///
    /// Unresolvable formats (non-numeric tokens, ids absent from both
    /// sources) are silently dropped, so the result may be shorter than the
    /// format list. Malformed rtpmap attribute bodies are skipped.
    pub fn rtpmap(&self) -> Vec<RtpMapEntry> {
        let mut explicit = Vec::new();
        for attr in self.attributes.iter().filter(|a| a.key == "rtpmap") {
            match RtpMapEntry::parse(attr.value_or_empty()) {
                Ok(entry) => explicit.push(entry),
                Err(_) => {
                    debug!(value = %attr.value_or_empty(), "skipping malformed rtpmap attribute");
                }
            }
        }

        self.formats
            .iter()
            .filter_map(|token| token.parse::<u8>().ok())
            .filter_map(|id| {
                explicit
                    .iter()
                    .find(|e| e.id == id)
                    .cloned()
                    .or_else(|| lookup_static(id))
            })
            .collect()
    }

    /// Builds the payload map for this media.
    pub fn payload_map(&self) -> PayloadMap {
        PayloadMap::new(&self.formats, &self.attributes)
    }

    // --- Connection ---

    /// The media-level connection, falling back to the session-level one.
    ///
    /// RFC 4566 requires a connection at one of the two levels; absence at
    /// both is an invalid session description.
    pub fn effective_connection<'a>(
        &'a self,
        session: &'a SessionDescription,
    ) -> Result<&'a Connection> {
        self.connection
            .as_ref()
            .or(session.connection.as_ref())
            .ok_or_else(|| {
                Error::InvalidSessionDescription(
                    "no c= line in specified media or session".to_string(),
                )
            })
    }

    /// The `m=` line alone, without the trailing line break.
    pub fn mline(&self) -> String {
        let mut line = format!("m={} {} {}", self.media_type, self.port, self.protocol);
        for format in &self.formats {
            line.push(' ');
            line.push_str(format);
        }
        line
    }
}

/// Leading payload-type token of an `rtpmap`/`fmtp` attribute value.
fn format_token(attr: &Attribute) -> Option<&str> {
    if attr.key != "rtpmap" && attr.key != "fmtp" {
        return None;
    }
    let value = attr.value.as_deref()?;
    value.split(' ').next()
}

impl fmt::Display for Media {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\r\n", self.mline())?;

        if let Some(conn) = &self.connection {
            write!(f, "c={conn}\r\n")?;
        }

        for attr in &self.attributes {
            write!(f, "a={attr}\r\n")?;
        }

        Ok(())
    }
}
