//! Session descriptions and whole-session transformations.
//!
//! [`SessionDescription`] is the aggregate root of the model: origin,
//! subject, session-level connection and attributes, and the ordered media
//! list. Instances are immutable; every transformation returns a new value,
//! so descriptions can be shared freely across threads.

pub mod connection;
pub mod origin;

pub use connection::Connection;
pub use origin::Origin;

use std::fmt;
use std::str::{self, FromStr};

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::attributes::{self, crypto, Attribute, SdpCryptoConfig, SdpDirection};
use crate::error::{Error, Result};
use crate::media::Media;
use crate::parser::{SdpParser, SdpReader};

/// Attributes that [`SessionDescription::canonical_form`] pushes down onto
/// every media.
const DISTRIBUTABLE_ATTRIBUTES: &[&str] = &["fingerprint"];

/// Represents a full session description.
///
/// Use [`SessionDescription::parse`] to build one from wire text and
/// [`ToString::to_string`] to serialize it back. Mutations return a new
/// instance.
///
/// # Examples
///
/// ```
/// use sdp_core::{SdpDirection, SessionDescription};
///
/// let text = "v=0\r\n\
///     o=- 1111111 1408401718 IN IP4 192.168.1.242\r\n\
///     s=-\r\n\
///     c=IN IP4 192.168.1.242\r\n\
///     t=0 0\r\n\
///     m=audio 16028 RTP/AVP 0 101\r\n\
///     a=sendrecv\r\n";
///
/// let session = SessionDescription::parse(text).unwrap();
/// assert_eq!(session.medias.len(), 1);
///
/// let held = session.mutate_media(|m| m.with_direction(SdpDirection::SendOnly));
/// assert_eq!(held.medias[0].direction(), Some(SdpDirection::SendOnly));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescription {
    /// Originator and session identifier; absent when the input had no `o=`
    pub origin: Option<Origin>,
    /// Session subject; serialized as `-` when absent
    pub subject: Option<String>,
    /// Session-level connection, inherited by media without their own
    pub connection: Option<Connection>,
    /// Session-level attributes in line order
    pub attributes: Vec<Attribute>,
    /// Media descriptions in line order
    pub medias: Vec<Media>,
    /// Type letters of header lines this crate does not model
    pub unknowns: Vec<String>,
}

impl SessionDescription {
    /// Parses SDP text.
    ///
    /// The input must start with `v=0`; everything else is optional. Line
    /// types outside the modeled subset are tolerated, but malformed `o=`,
    /// `c=` and `m=` lines fail the whole parse.
    pub fn parse(sdp: &str) -> Result<SessionDescription> {
        SdpParser::new(SdpReader::new(sdp)).read()
    }

    /// Parses SDP text from raw bytes, which must be valid UTF-8.
    pub fn parse_bytes(content: &Bytes) -> Result<SessionDescription> {
        let text = str::from_utf8(content)
            .map_err(|_| Error::InvalidFormat("SDP content is not valid UTF-8".to_string()))?;
        SessionDescription::parse(text)
    }

    // --- Withers ---

    pub fn with_origin(mut self, origin: Origin) -> SessionDescription {
        self.origin = Some(origin);
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> SessionDescription {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_connection(mut self, connection: Connection) -> SessionDescription {
        self.connection = Some(connection);
        self
    }

    pub fn without_connection(mut self) -> SessionDescription {
        self.connection = None;
        self
    }

    pub fn with_medias(mut self, medias: Vec<Media>) -> SessionDescription {
        self.medias = medias;
        self
    }

    pub fn with_attributes(mut self, attributes: Vec<Attribute>) -> SessionDescription {
        self.attributes = attributes;
        self
    }

    /// Appends one session-level attribute.
    pub fn with_attribute(mut self, attr: Attribute) -> SessionDescription {
        self.attributes.push(attr);
        self
    }

    /// Removes every session-level attribute for `key`.
    pub fn without_attribute(mut self, key: &str) -> SessionDescription {
        self.attributes.retain(|a| a.key != key);
        self
    }

    /// Removes every session-level attribute matching both key and value.
    pub fn without_attribute_value(mut self, key: &str, value: &str) -> SessionDescription {
        self.attributes
            .retain(|a| !(a.key == key && a.value.as_deref() == Some(value)));
        self
    }

    // --- Accessors ---

    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.iter().any(|a| a.key == key)
    }

    /// The first session-level attribute for `key`.
    pub fn get_attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.key == key)
    }

    /// The value of the first attribute for `key`; flags map to `Some("")`.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        attributes::first_value(&self.attributes, key)
    }

    /// The session-level `ptime` attribute parsed as milliseconds.
    pub fn ptime(&self) -> Result<Option<u32>> {
        attributes::numeric_value(&self.attributes, "ptime")
    }

    /// The session-level `maxptime` attribute parsed as milliseconds.
    pub fn maxptime(&self) -> Result<Option<u32>> {
        attributes::numeric_value(&self.attributes, "maxptime")
    }

    /// The session-level SDES crypto lines, if any.
    pub fn crypto(&self) -> Result<Option<SdpCryptoConfig>> {
        crypto::collect_crypto(&self.attributes)
    }

    /// The media at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn media(&self, index: usize) -> &Media {
        &self.medias[index]
    }

    /// The media descriptions matching a predicate.
    pub fn medias_matching(&self, predicate: impl Fn(&Media) -> bool) -> Vec<&Media> {
        self.medias.iter().filter(|m| predicate(m)).collect()
    }

    // --- Direction ---

    /// The session-level direction marker; first match wins.
    pub fn direction(&self) -> Option<SdpDirection> {
        self.attributes.iter().find_map(SdpDirection::from_attribute)
    }

    /// Replaces any session-level direction markers with one for `direction`.
    pub fn with_direction(mut self, direction: SdpDirection) -> SessionDescription {
        self.attributes
            .retain(|a| SdpDirection::from_attribute(a).is_none());
        self.attributes.push(Attribute::flag(direction.as_str()));
        self
    }

    /// Removes every session-level direction marker.
    pub fn without_direction(mut self) -> SessionDescription {
        self.attributes
            .retain(|a| SdpDirection::from_attribute(a).is_none());
        self
    }

    // --- Transformations ---

    /// Applies a transform to every media.
    pub fn mutate_media(mut self, mutator: impl Fn(Media) -> Media) -> SessionDescription {
        self.medias = self.medias.into_iter().map(mutator).collect();
        self
    }

    /// Applies a transform to the media at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn mutate_media_at(
        mut self,
        index: usize,
        mutator: impl FnOnce(Media) -> Media,
    ) -> SessionDescription {
        let media = self.medias.remove(index);
        self.medias.insert(index, mutator(media));
        self
    }

    /// Disables every media for which the predicate returns true.
    ///
    /// The predicate receives the positional index and the media; already
    /// disabled streams are left untouched.
    pub fn disable(
        mut self,
        predicate: impl Fn(usize, &Media) -> bool,
    ) -> SessionDescription {
        self.medias = self
            .medias
            .into_iter()
            .enumerate()
            .map(|(index, media)| {
                if media.is_disabled() || !predicate(index, &media) {
                    media
                } else {
                    media.disabled()
                }
            })
            .collect();
        self
    }

    /// Increments the origin version; the correct call after any
    /// content-affecting edit. A session without an origin is returned
    /// unchanged.
    pub fn new_version(mut self) -> SessionDescription {
        self.origin = self.origin.map(Origin::new_version);
        self
    }

    /// Hoists a shared media-level connection to the session level.
    ///
    /// If every enabled media resolves to one identical effective connection
    /// (its own or the inherited session one), that connection moves to the
    /// session level and is cleared from each media. Otherwise the session
    /// is returned unchanged.
    pub fn normalize(self) -> SessionDescription {
        let mut shared: Option<Connection> = None;
        let mut hoistable = true;

        for media in self.medias.iter().filter(|m| m.is_enabled()) {
            let Some(effective) = media.connection.as_ref().or(self.connection.as_ref()) else {
                hoistable = false;
                break;
            };
            match &shared {
                None => shared = Some(effective.clone()),
                Some(conn) if conn == effective => {}
                Some(_) => {
                    hoistable = false;
                    break;
                }
            }
        }

        match shared {
            Some(conn) if hoistable => self
                .mutate_media(Media::without_connection)
                .with_connection(conn),
            _ => self,
        }
    }

    /// Pushes the session-level connection and distributable attributes
    /// (currently `fingerprint`) down onto every media lacking its own copy.
    ///
    /// The inverse of [`SessionDescription::normalize`], for consumers that
    /// expect each media line to be self-describing.
    pub fn canonical_form(self) -> SessionDescription {
        let connection = self.connection.clone();
        let distribute: Vec<Attribute> = self
            .attributes
            .iter()
            .filter(|a| DISTRIBUTABLE_ATTRIBUTES.contains(&a.key.as_str()))
            .cloned()
            .collect();

        self.mutate_media(move |mut media| {
            if media.connection.is_none() {
                media.connection = connection.clone();
            }
            for attr in &distribute {
                if !media.has_attribute(&attr.key) {
                    media = media.with_attribute(attr.clone());
                }
            }
            media
        })
    }
}

impl fmt::Display for SessionDescription {
    /// Serializes to wire text: CRLF-terminated lines in RFC 4566 order,
    /// with a fixed `t=0 0` time description.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v=0\r\n")?;

        if let Some(origin) = &self.origin {
            write!(f, "o={origin}\r\n")?;
        }

        write!(f, "s={}\r\n", self.subject.as_deref().unwrap_or("-"))?;

        if let Some(conn) = &self.connection {
            write!(f, "c={conn}\r\n")?;
        }

        write!(f, "t=0 0\r\n")?;

        for attr in &self.attributes {
            write!(f, "a={attr}\r\n")?;
        }

        for media in &self.medias {
            write!(f, "{media}")?;
        }

        Ok(())
    }
}

impl FromStr for SessionDescription {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SessionDescription::parse(s)
    }
}
