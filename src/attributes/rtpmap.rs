//! SDP RTP Map Attribute
//!
//! Implements the rtpmap attribute as defined in RFC 4566.
//! Format: `a=rtpmap:<payload type> <encoding name>/<clock rate>[/<encoding parameters>]`
//!
//! The clock rate and channel count are optional in the parsed model so that
//! entries resolved from the static RFC 3551 table and entries such as
//! `telephone-event/8000` can share one representation.

use std::fmt;

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, digit1, space1},
    combinator::{map, map_res, opt},
    sequence::{preceded, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One payload-type binding: numeric id, codec name, clock rate, channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtpMapEntry {
    /// RTP payload type (0-127)
    pub id: u8,
    /// Encoding name, e.g. "PCMU", "telephone-event"
    pub format: String,
    /// Clock rate in Hertz
    pub rate: Option<u32>,
    /// Channel count
    pub channels: Option<u32>,
}

/// Parser for a positive integer
fn positive_integer(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |s: &str| s.parse::<u32>())(input)
}

/// Parser for an encoding name token
fn encoding_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))(input)
}

/// Parser for the rtpmap attribute body: `<id> <name>[/<rate>[/<channels>]]`
fn rtpmap_body(input: &str) -> IResult<&str, (u8, String, Option<u32>, Option<u32>)> {
    tuple((
        // Payload type (0-127)
        map_res(positive_integer, |pt| {
            if pt <= 127 {
                Ok(pt as u8)
            } else {
                Err(())
            }
        }),
        preceded(space1, map(encoding_name, |s: &str| s.to_string())),
        opt(preceded(char('/'), positive_integer)),
        opt(preceded(char('/'), positive_integer)),
    ))(input)
}

impl RtpMapEntry {
    pub fn new(
        id: u8,
        format: impl Into<String>,
        rate: Option<u32>,
        channels: Option<u32>,
    ) -> Self {
        RtpMapEntry {
            id,
            format: format.into(),
            rate,
            channels,
        }
    }

    /// Parses an rtpmap attribute body such as `101 telephone-event/8000`.
    pub fn parse(value: &str) -> Result<RtpMapEntry> {
        match rtpmap_body(value.trim()) {
            Ok((_, (id, format, rate, channels))) => Ok(RtpMapEntry {
                id,
                format,
                rate,
                channels,
            }),
            Err(_) => Err(Error::InvalidFormat(format!("invalid rtpmap: {value}"))),
        }
    }
}

impl fmt::Display for RtpMapEntry {
    /// Writes the attribute body form. A channel count of 1 is implied and
    /// not emitted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.format)?;
        if let Some(rate) = self.rate {
            write!(f, "/{rate}")?;
            if let Some(channels) = self.channels {
                if channels > 1 {
                    write!(f, "/{channels}")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comprehensive() {
        // Valid cases
        assert!(RtpMapEntry::parse("0 PCMU/8000").is_ok());
        assert!(RtpMapEntry::parse("97 opus/48000/2").is_ok());
        assert!(RtpMapEntry::parse("101 telephone-event/8000").is_ok());
        assert!(RtpMapEntry::parse("127 G726-32/8000").is_ok());

        let entry = RtpMapEntry::parse("97 opus/48000/2").unwrap();
        assert_eq!(entry.id, 97);
        assert_eq!(entry.format, "opus");
        assert_eq!(entry.rate, Some(48000));
        assert_eq!(entry.channels, Some(2));

        // No clock rate
        let entry = RtpMapEntry::parse("96 X-custom").unwrap();
        assert_eq!(entry.rate, None);
        assert_eq!(entry.channels, None);

        // Error cases
        assert!(RtpMapEntry::parse("").is_err());
        assert!(RtpMapEntry::parse("PCMU/8000").is_err());
        assert!(RtpMapEntry::parse("200 PCMU/8000").is_err());
        assert!(RtpMapEntry::parse("0PCMU/8000").is_err());
    }

    #[test]
    fn test_display() {
        let entry = RtpMapEntry::new(0, "PCMU", Some(8000), Some(1));
        assert_eq!(entry.to_string(), "0 PCMU/8000");

        let entry = RtpMapEntry::new(111, "opus", Some(48000), Some(2));
        assert_eq!(entry.to_string(), "111 opus/48000/2");

        let entry = RtpMapEntry::new(101, "telephone-event", Some(8000), None);
        assert_eq!(entry.to_string(), "101 telephone-event/8000");
    }

    #[test]
    fn test_whitespace_tolerated() {
        let entry = RtpMapEntry::parse("  8 PCMA/8000 ").unwrap();
        assert_eq!(entry.id, 8);
        assert_eq!(entry.format, "PCMA");
    }
}
