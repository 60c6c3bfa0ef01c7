//! Session description grammar.
//!
//! A single forward pass over an [`SdpReader`], dispatching on the line-type
//! letter. The only required line is `v=0`; recognized-but-unmodeled types
//! are discarded, and anything else is recorded as an unknown rather than
//! failing the parse. Structurally malformed `o=`, `c=` and `m=` lines fail
//! fast so that bad SDP never produces a half-populated model.

use tracing::trace;

use crate::error::{Error, Result};
use crate::media::Media;
use crate::parser::reader::SdpReader;
use crate::session::{Connection, Origin, SessionDescription};

/// Line types recognized in the session header but intentionally not
/// modeled.
const DISCARDED_HEADER_TYPES: &[char] = &['i', 'u', 'e', 'p', 'b', 'z', 'k', 't', 'r'];

/// Line types recognized in a media body but intentionally not modeled.
const DISCARDED_MEDIA_TYPES: &[char] = &['i', 'b', 'k'];

/// Single-use parser over an [`SdpReader`].
#[derive(Debug)]
pub struct SdpParser {
    reader: SdpReader,
}

impl SdpParser {
    pub fn new(reader: SdpReader) -> SdpParser {
        SdpParser { reader }
    }

    /// Consumes the reader and produces a session description.
    pub fn read(mut self) -> Result<SessionDescription> {
        if self.reader.remaining() < 1 {
            return Err(Error::InvalidVersion);
        }

        if self.reader.next_type()? != 'v' {
            return Err(Error::InvalidVersion);
        }

        if self.reader.read_value()? != "0" {
            return Err(Error::InvalidVersion);
        }

        let mut session = SessionDescription::default();

        while self.reader.remaining() > 0 {
            let line_type = self.reader.next_type()?;

            if line_type == 'm' {
                break;
            }

            let value = self.reader.read_value()?;

            match line_type {
                'o' => session.origin = Some(parse_origin(&value)?),
                's' => session.subject = Some(value),
                'c' => session.connection = Some(parse_connection(&value)?),
                'a' => session.attributes.push(value.parse()?),
                t if DISCARDED_HEADER_TYPES.contains(&t) => {
                    trace!(line_type = %t, "discarding unmodeled session line");
                }
                other => {
                    trace!(line_type = %other, "recording unknown session line type");
                    session.unknowns.push(other.to_string());
                }
            }
        }

        while self.reader.remaining() > 0 {
            let media = self.parse_media()?;
            session.medias.push(media);
        }

        Ok(session)
    }

    /// Parses one `m=` block: the media line plus its body, up to the next
    /// `m=` line or end of input.
    fn parse_media(&mut self) -> Result<Media> {
        let line = self.reader.read_value()?;
        let tokens: Vec<&str> = line.split_whitespace().collect();

        if tokens.len() < 3 {
            return Err(Error::InvalidFormat(format!("malformed m= line: {line}")));
        }

        let port = tokens[1]
            .parse::<u16>()
            .map_err(|_| Error::InvalidFormat(format!("invalid media port: {}", tokens[1])))?;

        // Format tokens stay as raw strings; numeric interpretation is
        // deferred to payload-map resolution.
        let mut media = Media::new(
            tokens[0],
            port,
            tokens[2],
            tokens[3..].iter().map(|s| s.to_string()).collect(),
        );

        while self.reader.remaining() > 0 {
            let line_type = self.reader.next_type()?;

            if line_type == 'm' {
                break;
            }

            let value = self.reader.read_value()?;

            match line_type {
                'c' => media.connection = Some(parse_connection(&value)?),
                'a' => media.attributes.push(value.parse()?),
                t if DISCARDED_MEDIA_TYPES.contains(&t) => {
                    trace!(line_type = %t, "discarding unmodeled media line");
                }
                other => {
                    trace!(line_type = %other, "recording unknown media line type");
                    media.unknowns.push(other.to_string());
                }
            }
        }

        Ok(media)
    }
}

/// Parses a `c=` body: `<nettype> <addrtype> <connection-address>`.
fn parse_connection(value: &str) -> Result<Connection> {
    let tokens: Vec<&str> = value.split_whitespace().collect();

    if tokens.len() < 3 {
        return Err(Error::InvalidFormat(format!("malformed c= line: {value}")));
    }

    Ok(Connection::new(tokens[0], tokens[1], tokens[2]))
}

/// Parses an `o=` body: six space-separated tokens.
fn parse_origin(value: &str) -> Result<Origin> {
    let tokens: Vec<&str> = value.split_whitespace().collect();

    if tokens.len() < 6 {
        return Err(Error::InvalidFormat(format!("malformed o= line: {value}")));
    }

    Ok(Origin::new(
        tokens[0],
        tokens[1]
            .parse()
            .map_err(|_| Error::InvalidFormat(format!("invalid session id: {}", tokens[1])))?,
        tokens[2]
            .parse()
            .map_err(|_| Error::InvalidFormat(format!("invalid session version: {}", tokens[2])))?,
        tokens[3],
        tokens[4],
        tokens[5],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{Attribute, SdpDirection};

    fn parse(text: &str) -> Result<SessionDescription> {
        SdpParser::new(SdpReader::new(text)).read()
    }

    #[test]
    fn test_minimal_session() {
        let session = parse("v=0\r\n").unwrap();
        assert_eq!(session, SessionDescription::default());
    }

    #[test]
    fn test_version_gate() {
        assert!(matches!(parse(""), Err(Error::InvalidVersion)));
        assert!(matches!(parse("v=1\r\n"), Err(Error::InvalidVersion)));
        assert!(matches!(
            parse("o=- 1 1 IN IP4 1.2.3.4\r\n"),
            Err(Error::InvalidVersion)
        ));
    }

    #[test]
    fn test_header_fields() {
        let session = parse(
            "v=0\r\n\
             o=jdoe 2890844526 2890842807 IN IP4 10.47.16.5\r\n\
             s=SDP Seminar\r\n\
             c=IN IP4 224.2.17.12\r\n\
             t=0 0\r\n\
             a=recvonly\r\n",
        )
        .unwrap();

        let origin = session.origin.as_ref().unwrap();
        assert_eq!(origin.username, "jdoe");
        assert_eq!(origin.session_id, 2890844526);
        assert_eq!(origin.version, 2890842807);
        assert_eq!(session.subject.as_deref(), Some("SDP Seminar"));
        assert_eq!(
            session.connection,
            Some(Connection::new("IN", "IP4", "224.2.17.12"))
        );
        assert_eq!(session.direction(), Some(SdpDirection::RecvOnly));
    }

    #[test]
    fn test_ignored_header_lines() {
        let session = parse(
            "v=0\r\n\
             i=A Seminar on the session description protocol\r\n\
             u=http://www.example.com/seminars/sdp.pdf\r\n\
             e=j.doe@example.com (Jane Doe)\r\n\
             p=+1 617 555-6011\r\n\
             b=AS:256\r\n\
             z=2882844526 -1h\r\n\
             k=prompt\r\n\
             t=2873397496 2873404696\r\n\
             r=7d 1h 0 25h\r\n",
        )
        .unwrap();

        // all recognized, none modeled, none unknown
        assert!(session.unknowns.is_empty());
        assert!(session.attributes.is_empty());
    }

    #[test]
    fn test_unknown_line_types_recorded() {
        let session = parse("v=0\r\nx=experimental\r\n").unwrap();
        assert_eq!(session.unknowns, vec!["x"]);

        let session = parse(
            "v=0\r\n\
             m=audio 5000 RTP/AVP 0\r\n\
             y=experimental\r\n",
        )
        .unwrap();
        assert_eq!(session.medias[0].unknowns, vec!["y"]);
    }

    #[test]
    fn test_media_blocks() {
        let session = parse(
            "v=0\r\n\
             c=IN IP4 192.168.1.242\r\n\
             m=audio 2 RTP/SAVP 0 2 3 101\r\n\
             c=IN IP4 1.2.3.4\r\n\
             a=fmtp:101 0-15\r\n\
             a=sendrecv\r\n\
             m=audio 4 RTP/AVP 0\r\n\
             a=sendonly\r\n",
        )
        .unwrap();

        assert_eq!(session.medias.len(), 2);

        let first = &session.medias[0];
        assert_eq!(first.media_type, "audio");
        assert_eq!(first.port, 2);
        assert_eq!(first.protocol, "RTP/SAVP");
        assert_eq!(first.formats, vec!["0", "2", "3", "101"]);
        assert_eq!(first.connection, Some(Connection::new("IN", "IP4", "1.2.3.4")));
        assert_eq!(
            first.attributes,
            vec![
                Attribute::new("fmtp", "101 0-15"),
                Attribute::flag("sendrecv"),
            ]
        );

        let second = &session.medias[1];
        assert_eq!(second.port, 4);
        assert_eq!(second.connection, None);
        assert_eq!(second.direction(), Some(SdpDirection::SendOnly));
    }

    #[test]
    fn test_malformed_required_lines() {
        assert!(matches!(
            parse("v=0\r\no=- 1 1 IN IP4\r\n"),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            parse("v=0\r\no=- x 1 IN IP4 1.2.3.4\r\n"),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            parse("v=0\r\nc=IN IP4\r\n"),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            parse("v=0\r\nm=audio 5000\r\n"),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            parse("v=0\r\nm=audio high RTP/AVP 0\r\n"),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_non_numeric_formats_tolerated() {
        let session = parse("v=0\r\nm=application 5000 UDP/DTLS/SCTP webrtc-datachannel\r\n").unwrap();
        assert_eq!(session.medias[0].formats, vec!["webrtc-datachannel"]);
    }
}
