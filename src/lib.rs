//! Session Description Protocol (RFC 4566) parsing, representation, and
//! manipulation.
//!
//! This crate turns SDP wire text into an immutable [`SessionDescription`],
//! lets call-control code inspect and rewrite it (change media direction,
//! disable streams, filter payload types, inject crypto parameters), and
//! serializes it back to wire text for a peer. Every transformation returns
//! a new value; nothing is mutated in place, so descriptions can be shared
//! across threads without locking.
//!
//! Only the RFC 4566 subset that session negotiation actually touches is
//! modeled (`v=`, `o=`, `s=`, `c=`, `a=`, `m=`). Time descriptions,
//! bandwidth lines and similar are tolerated on input and dropped; line
//! types outside the grammar entirely are recorded as unknowns instead of
//! failing the parse.
//!
//! # Examples
//!
//! ```
//! use sdp_core::{SdpDirection, SessionDescription};
//!
//! let text = "v=0\r\n\
//!     o=- 1408401718 1 IN IP4 192.168.1.242\r\n\
//!     s=-\r\n\
//!     c=IN IP4 192.168.1.242\r\n\
//!     t=0 0\r\n\
//!     m=audio 16028 RTP/AVP 0 101\r\n\
//!     a=rtpmap:101 telephone-event/8000\r\n\
//!     a=sendrecv\r\n";
//!
//! let session = SessionDescription::parse(text).unwrap();
//! assert_eq!(session.medias[0].port, 16028);
//!
//! // Resolve payload types: id 0 comes from the static RFC 3551 table,
//! // id 101 from the explicit rtpmap attribute.
//! let codecs = session.medias[0].rtpmap();
//! assert_eq!(codecs[0].format, "PCMU");
//! assert_eq!(codecs[1].format, "telephone-event");
//!
//! // Build an answer: invert direction, bump the origin version.
//! let answer = session
//!     .mutate_media(|m| m.with_direction(SdpDirection::RecvOnly))
//!     .new_version();
//! assert!(answer.to_string().contains("a=recvonly\r\n"));
//! ```

pub mod attributes;
pub mod error;
pub mod media;
pub mod parser;
pub mod session;

pub use attributes::{Attribute, CryptoEntry, RtpMapEntry, SdpCryptoConfig, SdpDirection};
pub use error::{Error, Result};
pub use media::{lookup_static, Media, PayloadMap, PayloadMapEntry};
pub use parser::{SdpParser, SdpReader};
pub use session::{Connection, Origin, SessionDescription};

/// Re-export of common types and functions
pub mod prelude {
    pub use crate::attributes::{Attribute, CryptoEntry, RtpMapEntry, SdpCryptoConfig, SdpDirection};
    pub use crate::error::{Error, Result};
    pub use crate::media::{Media, PayloadMap, PayloadMapEntry};
    pub use crate::session::{Connection, Origin, SessionDescription};
}
