use bytes::Bytes;
use bytesstr::BytesStr;
use std::fmt;

mod candidate;
mod direction;
mod extmap;

pub use candidate::{CandidateKind, IceCandidate};
pub use direction::Direction;
pub use extmap::{ExtMap, ExtMapUri};

/// Attribute key, the part of an `a=` line before the optional `:`.
///
/// The vocabulary is open, unregistered keys are kept verbatim. The keys
/// registered with [IANA](http://www.iana.org/assignments/sdp-parameters/sdp-parameters.xhtml)
/// are available as constants for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeKey(BytesStr);

impl AttributeKey {
    pub const CANDIDATE: &'static str = "candidate";
    pub const EXTMAP: &'static str = "extmap";
    pub const FINGERPRINT: &'static str = "fingerprint";
    pub const FMTP: &'static str = "fmtp";
    pub const GROUP: &'static str = "group";
    pub const ICE_LITE: &'static str = "ice-lite";
    pub const ICE_MISMATCH: &'static str = "ice-mismatch";
    pub const ICE_OPTIONS: &'static str = "ice-options";
    pub const ICE_PWD: &'static str = "ice-pwd";
    pub const ICE_UFRAG: &'static str = "ice-ufrag";
    pub const INACTIVE: &'static str = "inactive";
    pub const MAX_MESSAGE_SIZE: &'static str = "max-message-size";
    pub const MID: &'static str = "mid";
    pub const MSID: &'static str = "msid";
    /// Legacy key only used by Plan B semantics
    pub const MSID_SEMANTIC: &'static str = "msid-semantic";
    pub const RECVONLY: &'static str = "recvonly";
    pub const RTCP: &'static str = "rtcp";
    pub const RTCP_FB: &'static str = "rtcp-fb";
    pub const RTCP_MUX: &'static str = "rtcp-mux";
    pub const RTCP_RSIZE: &'static str = "rtcp-rsize";
    pub const RTPMAP: &'static str = "rtpmap";
    pub const SCTP_PORT: &'static str = "sctp-port";
    pub const SENDONLY: &'static str = "sendonly";
    pub const SENDRECV: &'static str = "sendrecv";
    pub const SETUP: &'static str = "setup";
    pub const SSRC: &'static str = "ssrc";
    pub const SSRC_GROUP: &'static str = "ssrc-group";

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AttributeKey {
    fn from(key: &str) -> Self {
        AttributeKey(BytesStr::from(key))
    }
}

impl From<BytesStr> for AttributeKey {
    fn from(key: BytesStr) -> Self {
        AttributeKey(key)
    }
}

impl PartialEq<&str> for AttributeKey {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `key[:value]` pair of an `a=` line
///
/// ```text
/// a=<attribute>
/// a=<attribute>:<value>
/// ```
///
/// Values are stored verbatim; the ICE candidate and extmap value grammars
/// are decoded on demand with [`IceCandidate::parse`] and [`ExtMap::parse`].
///
/// [RFC4566](https://www.rfc-editor.org/rfc/rfc4566.html#section-5.13)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: AttributeKey,

    /// Present if the `:` separator was, may be empty
    pub value: Option<BytesStr>,
}

impl Attribute {
    pub fn parse(src: &Bytes, line: &str) -> Self {
        match line.split_once(':') {
            None => Self {
                key: AttributeKey(BytesStr::from_parse(src, line)),
                value: None,
            },
            Some((key, value)) => Self {
                key: AttributeKey(BytesStr::from_parse(src, key)),
                value: Some(BytesStr::from_parse(src, value)),
            },
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a={}", self.key)?;

        if let Some(value) = &self.value {
            write!(f, ":{value}")?;
        }

        Ok(())
    }
}
