//! SDP text parsing.
//!
//! [`SdpReader`] turns raw text into a cursor over de-blanked lines;
//! [`SdpParser`] consumes one and builds a
//! [`SessionDescription`](crate::SessionDescription). Both hold transient
//! state scoped to a single parse call.

pub mod reader;
pub mod sdp_parser;

pub use reader::SdpReader;
pub use sdp_parser::SdpParser;
