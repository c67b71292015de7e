//! ICE candidate attribute value (`a=candidate:...`)

use crate::error::IResult;
use crate::{num, parse_num, token, ParseError};
use bytes::Bytes;
use bytesstr::BytesStr;
use nom::character::complete::char;
use nom::multi::many0;
use nom::sequence::preceded;
use std::fmt;

/// Candidate kind (`<cand-type>`)
///
/// `host`, `srflx`, `prflx` and `relay` are defined, but the grammar allows
/// any extension token, so unknown kinds are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateKind(BytesStr);

impl CandidateKind {
    pub const HOST: &'static str = "host";
    pub const SRFLX: &'static str = "srflx";
    pub const PRFLX: &'static str = "prflx";
    pub const RELAY: &'static str = "relay";

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CandidateKind {
    fn from(kind: &str) -> Self {
        CandidateKind(BytesStr::from(kind))
    }
}

impl PartialEq<&str> for CandidateKind {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ICE candidate, decoded from the value of a `candidate` attribute with the
/// `candidate:` prefix already stripped
///
/// [draft-ietf-mmusic-ice-sip-sdp](https://tools.ietf.org/html/draft-ietf-mmusic-ice-sip-sdp-24#section-4.1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IceCandidate {
    /// ID grouping candidates of the same base address
    pub foundation: BytesStr,

    /// Component of the media stream, RTP is 1 and RTCP is 2
    pub component: u16,

    /// Transport protocol, usually UDP or TCP
    pub transport: BytesStr,

    pub priority: u32,

    /// Address of the candidate, IP or FQDN, stored verbatim
    pub address: BytesStr,

    pub port: u16,

    pub kind: CandidateKind,

    /// Transport address the candidate was derived from.
    ///
    /// Only present together with [`IceCandidate::related_port`].
    pub related_address: Option<BytesStr>,
    pub related_port: Option<u16>,

    /// Trailing extension key/value pairs (`tcptype active`, ...)
    pub extension_attributes: Vec<(BytesStr, BytesStr)>,
}

impl IceCandidate {
    pub fn parse<'i>(src: &Bytes, i: &'i str) -> IResult<&'i str, Self> {
        parse_candidate(src, i).map_err(|err| err.map(|err| err.or_field("candidate", i)))
    }
}

fn parse_candidate<'i>(src: &Bytes, i: &'i str) -> IResult<&'i str, IceCandidate> {
    let (i, foundation) = token(i)?;
    let (i, component) = preceded(char(' '), num("<component-id>"))(i)?;
    let (i, transport) = preceded(char(' '), token)(i)?;
    let (i, priority) = preceded(char(' '), num("<priority>"))(i)?;
    let (i, address) = preceded(char(' '), token)(i)?;
    let (i, port) = preceded(char(' '), num("<port>"))(i)?;

    let (i, marker) = preceded(char(' '), token)(i)?;
    if marker != "typ" {
        return Err(nom::Err::Failure(ParseError::new("<cand-type>", marker)));
    }

    let (i, kind) = preceded(char(' '), token)(i)?;

    let (i, tail) = many0(preceded(char(' '), token))(i)?;
    if !i.is_empty() {
        return Err(nom::Err::Failure(ParseError::new("candidate", i)));
    }

    let mut rest = tail.as_slice();
    let mut related_address = None;
    let mut related_port = None;

    if rest.first().copied() == Some("raddr") {
        if rest.len() < 4 || rest[2] != "rport" {
            return Err(nom::Err::Failure(ParseError::new(
                "<rel-addr>",
                rest.join(" "),
            )));
        }

        related_address = Some(BytesStr::from_parse(src, rest[1]));
        related_port = Some(parse_num("<rel-port>", rest[3]).map_err(nom::Err::Failure)?);

        rest = &rest[4..];
    }

    if rest.len() % 2 != 0 {
        return Err(nom::Err::Failure(ParseError::new(
            "<extension-att-value>",
            rest[rest.len() - 1],
        )));
    }

    let extension_attributes = rest
        .chunks(2)
        .map(|pair| {
            (
                BytesStr::from_parse(src, pair[0]),
                BytesStr::from_parse(src, pair[1]),
            )
        })
        .collect();

    Ok((
        "",
        IceCandidate {
            foundation: BytesStr::from_parse(src, foundation),
            component,
            transport: BytesStr::from_parse(src, transport),
            priority,
            address: BytesStr::from_parse(src, address),
            port,
            kind: CandidateKind(BytesStr::from_parse(src, kind)),
            related_address,
            related_port,
            extension_attributes,
        },
    ))
}

impl fmt::Display for IceCandidate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} typ {}",
            self.foundation,
            self.component,
            self.transport,
            self.priority,
            self.address,
            self.port,
            self.kind
        )?;

        if let Some(related_address) = &self.related_address {
            write!(f, " raddr {related_address}")?;
        }

        if let Some(related_port) = &self.related_port {
            write!(f, " rport {related_port}")?;
        }

        for (key, value) in &self.extension_attributes {
            write!(f, " {key} {value}")?;
        }

        Ok(())
    }
}
