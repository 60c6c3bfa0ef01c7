//! RTP payload-type resolution.
//!
//! A [`PayloadMap`] merges a media's explicit `rtpmap`/`fmtp` attributes with
//! the static payload assignments of RFC 3551 so that call-control code can
//! resolve every declared format to a codec description.
//!
//! Resolution is deliberately lossy: format tokens that are not numeric
//! payload types, and numeric ids found neither in the attributes nor in the
//! static table, disappear from the result instead of failing it. Callers
//! must not assume the resolved list is as long as the declared format list.

use std::collections::HashMap;

use tracing::debug;

use crate::attributes::{Attribute, RtpMapEntry};

/// Static payload assignments we care about, from
/// <https://www.iana.org/assignments/rtp-parameters/rtp-parameters.xhtml>
pub fn lookup_static(id: u8) -> Option<RtpMapEntry> {
    let (format, rate) = match id {
        0 => ("PCMU", 8000),
        3 => ("GSM", 8000),
        4 => ("G723", 8000),
        8 => ("PCMA", 8000),
        9 => ("G722", 8000),
        18 => ("G729", 8000),
        _ => return None,
    };
    Some(RtpMapEntry::new(id, format, Some(rate), Some(1)))
}

/// One resolved format: the rtpmap entry (explicit or static) plus any raw
/// `fmtp` parameter text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadMapEntry {
    /// Codec binding, if the id resolved against the attributes or the
    /// static table
    pub entry: Option<RtpMapEntry>,
    /// Raw `fmtp` parameters for this payload type
    pub format_params: Option<String>,
}

/// Per-media payload resolution, keyed by numeric id and by lowercase codec
/// name.
///
/// Built on demand from a media's format list and attributes via
/// [`Media::payload_map`](crate::Media::payload_map); never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadMap {
    formats: Vec<u8>,
    by_id: HashMap<u8, PayloadMapEntry>,
    by_name: HashMap<String, PayloadMapEntry>,
}

impl PayloadMap {
    pub fn new(formats: &[String], attributes: &[Attribute]) -> PayloadMap {
        let mut map = PayloadMap {
            formats: Vec::new(),
            by_id: HashMap::new(),
            by_name: HashMap::new(),
        };

        for token in formats {
            let Ok(id) = token.parse::<u8>() else {
                debug!(format = %token, "dropping non-numeric format token");
                continue;
            };

            let entry = PayloadMapEntry {
                entry: rtpmap_for(attributes, id).or_else(|| lookup_static(id)),
                format_params: format_params_for(attributes, id),
            };

            if let Some(rtpmap) = &entry.entry {
                map.by_name
                    .insert(rtpmap.format.to_ascii_lowercase(), entry.clone());
            }

            map.by_id.insert(id, entry);
            map.formats.push(id);
        }

        map
    }

    /// Looks up a payload type by numeric id.
    pub fn get(&self, id: u8) -> Option<&PayloadMapEntry> {
        self.by_id.get(&id)
    }

    /// Looks up a payload type by codec name, case-insensitively.
    pub fn get_by_name(&self, name: &str) -> Option<&PayloadMapEntry> {
        self.by_name.get(&name.to_ascii_lowercase())
    }

    /// The entry for the first declared format, the preferred codec.
    pub fn preferred(&self) -> Option<&PayloadMapEntry> {
        self.formats.first().and_then(|id| self.by_id.get(id))
    }

    /// The surviving payload types, in declaration order.
    pub fn formats(&self) -> &[u8] {
        &self.formats
    }
}

/// First explicit rtpmap attribute matching the payload type; malformed
/// attribute bodies are skipped.
fn rtpmap_for(attributes: &[Attribute], id: u8) -> Option<RtpMapEntry> {
    for attr in attributes.iter().filter(|a| a.key == "rtpmap") {
        match RtpMapEntry::parse(attr.value_or_empty()) {
            Ok(entry) if entry.id == id => return Some(entry),
            Ok(_) => {}
            Err(_) => {
                debug!(value = %attr.value_or_empty(), "skipping malformed rtpmap attribute");
            }
        }
    }
    None
}

/// Raw parameter text of the first `fmtp` attribute for the payload type.
fn format_params_for(attributes: &[Attribute], id: u8) -> Option<String> {
    let prefix = format!("{id} ");

    attributes
        .iter()
        .filter(|a| a.key == "fmtp")
        .find_map(|a| {
            let value = a.value_or_empty();
            value
                .strip_prefix(&prefix)
                .map(|params| params.trim().to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs() -> Vec<Attribute> {
        vec![
            Attribute::new("rtpmap", "96 opus/48000/2"),
            Attribute::new("rtpmap", "101 telephone-event/8000"),
            Attribute::new("fmtp", "101 0-15"),
            Attribute::flag("sendrecv"),
        ]
    }

    #[test]
    fn test_explicit_and_static_resolution() {
        let formats: Vec<String> = ["0", "96", "101"].iter().map(|s| s.to_string()).collect();
        let map = PayloadMap::new(&formats, &attrs());

        assert_eq!(map.formats(), &[0, 96, 101]);

        // id 0 falls back to the static table
        let pcmu = map.get(0).unwrap();
        assert_eq!(
            pcmu.entry,
            Some(RtpMapEntry::new(0, "PCMU", Some(8000), Some(1)))
        );
        assert_eq!(pcmu.format_params, None);

        // id 101 comes from the attributes, with fmtp text attached
        let dtmf = map.get(101).unwrap();
        assert_eq!(dtmf.entry.as_ref().unwrap().format, "telephone-event");
        assert_eq!(dtmf.format_params.as_deref(), Some("0-15"));
    }

    #[test]
    fn test_lookup_by_name() {
        let formats: Vec<String> = ["96"].iter().map(|s| s.to_string()).collect();
        let map = PayloadMap::new(&formats, &attrs());

        assert!(map.get_by_name("OPUS").is_some());
        assert!(map.get_by_name("opus").is_some());
        assert!(map.get_by_name("pcmu").is_none());
    }

    #[test]
    fn test_preferred_is_first_format() {
        let formats: Vec<String> = ["96", "0"].iter().map(|s| s.to_string()).collect();
        let map = PayloadMap::new(&formats, &attrs());
        assert_eq!(map.preferred().unwrap().entry.as_ref().unwrap().format, "opus");
    }

    #[test]
    fn test_non_numeric_formats_dropped() {
        let formats: Vec<String> = ["webrtc-datachannel", "0"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let map = PayloadMap::new(&formats, &attrs());
        assert_eq!(map.formats(), &[0]);
    }

    #[test]
    fn test_unresolved_id_still_mapped() {
        // id 77 has no rtpmap and no static entry; it keeps a slot with no
        // codec binding
        let formats: Vec<String> = ["77"].iter().map(|s| s.to_string()).collect();
        let map = PayloadMap::new(&formats, &attrs());
        let entry = map.get(77).unwrap();
        assert_eq!(entry.entry, None);
    }

    #[test]
    fn test_static_table() {
        assert_eq!(lookup_static(0).unwrap().format, "PCMU");
        assert_eq!(lookup_static(9).unwrap().rate, Some(8000));
        assert_eq!(lookup_static(1), None);
        assert_eq!(lookup_static(101), None);
    }
}
