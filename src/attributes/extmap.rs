//! RTP header extension mapping attribute value (`a=extmap:...`)

use crate::attributes::Direction;
use crate::error::IResult;
use crate::{parse_num, token, ParseError};
use bytes::Bytes;
use bytesstr::BytesStr;
use nom::bytes::complete::take_while1;
use nom::character::complete::char;
use nom::combinator::opt;
use nom::sequence::preceded;
use std::fmt;

/// URI identifying an RTP header extension.
///
/// Any URI is accepted, the extensions commonly used in WebRTC are available
/// as constants for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtMapUri(BytesStr);

impl ExtMapUri {
    /// Header extension for absolute send time, see
    /// [abs-send-time](http://www.webrtc.org/experiments/rtp-hdrext/abs-send-time)
    pub const ABS_SEND_TIME: &'static str =
        "http://www.webrtc.org/experiments/rtp-hdrext/abs-send-time";

    /// Header extension for transport-wide sequence numbers, see
    /// [draft-holmer-rmcat-transport-wide-cc-extensions](http://www.ietf.org/id/draft-holmer-rmcat-transport-wide-cc-extensions)
    pub const TRANSPORT_SEQUENCE_NUMBER: &'static str =
        "http://www.ietf.org/id/draft-holmer-rmcat-transport-wide-cc-extensions-01";

    /// Header extension identifying the media section within a transport, see
    /// [draft-ietf-mmusic-sdp-bundle-negotiation](https://tools.ietf.org/html/draft-ietf-mmusic-sdp-bundle-negotiation-49#section-15)
    pub const MID: &'static str = "urn:ietf:params:rtp-hdrext:sdes:mid";

    /// Header extension for RIDs, see
    /// [draft-ietf-avtext-rid](https://tools.ietf.org/html/draft-ietf-avtext-rid-09)
    pub const RTP_STREAM_ID: &'static str = "urn:ietf:params:rtp-hdrext:sdes:rtp-stream-id";

    /// Header extension for repaired RIDs, see
    /// [draft-ietf-mmusic-rid](https://tools.ietf.org/html/draft-ietf-mmusic-rid-15)
    pub const REPAIRED_RTP_STREAM_ID: &'static str =
        "urn:ietf:params:rtp-hdrext:sdes:repaired-rtp-stream-id";

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ExtMapUri {
    fn from(uri: &str) -> Self {
        ExtMapUri(BytesStr::from(uri))
    }
}

impl PartialEq<&str> for ExtMapUri {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Display for ExtMapUri {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Activation of a single RTP header extension, decoded from the value of an
/// `extmap` attribute with the `extmap:` prefix already stripped
///
/// ```text
/// a=extmap:<value>["/"<direction>] <URI> <extensionattributes>
/// ```
///
/// [RFC5285](https://www.rfc-editor.org/rfc/rfc5285.html#section-5)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtMap {
    /// Extension identifier in the range \[1, 256\]
    pub id: u16,

    pub direction: Option<Direction>,

    pub uri: ExtMapUri,

    /// Verbatim extension attribute tail, not further decoded
    pub extension_attributes: Option<BytesStr>,
}

impl ExtMap {
    pub fn parse<'i>(src: &Bytes, i: &'i str) -> IResult<&'i str, Self> {
        parse_extmap(src, i).map_err(|err| err.map(|err| err.or_field("extmap", i)))
    }
}

fn parse_extmap<'i>(src: &Bytes, i: &'i str) -> IResult<&'i str, ExtMap> {
    let (i, id_token) = take_while1(|c: char| c != '/' && !c.is_ascii_whitespace())(i)?;

    let id: u16 = parse_num("<value>", id_token).map_err(nom::Err::Failure)?;
    if !(1..=256).contains(&id) {
        return Err(nom::Err::Failure(ParseError::new("<value>", id_token)));
    }

    let (i, direction) = opt(preceded(char('/'), Direction::parse))(i)?;
    let (i, uri) = preceded(char(' '), token)(i)?;
    let (i, extension_attributes) = opt(preceded(char(' '), take_while1(|_: char| true)))(i)?;

    if !i.is_empty() {
        return Err(nom::Err::Failure(ParseError::new("extmap", i)));
    }

    Ok((
        "",
        ExtMap {
            id,
            direction,
            uri: ExtMapUri(BytesStr::from_parse(src, uri)),
            extension_attributes: extension_attributes
                .map(|attributes| BytesStr::from_parse(src, attributes)),
        },
    ))
}

impl fmt::Display for ExtMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id)?;

        if let Some(direction) = self.direction {
            write!(f, "/{direction}")?;
        }

        write!(f, " {}", self.uri)?;

        if let Some(attributes) = &self.extension_attributes {
            write!(f, " {attributes}")?;
        }

        Ok(())
    }
}
