use crate::error::IResult;
use crate::{digits, token, ParseError};
use bytes::Bytes;
use bytesstr::BytesStr;
use nom::bytes::complete::take_while1;
use nom::character::complete::char;
use nom::combinator::{map, opt};
use nom::multi::{many1, separated_list1};
use nom::sequence::preceded;
use std::fmt;

/// Media kind (`<media>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Audio,
    Video,
    Text,
    Application,
    Message,
}

impl MediaKind {
    pub fn parse(i: &str) -> IResult<&str, Self> {
        let (rem, token) = token(i)?;

        let kind = match token {
            "audio" => MediaKind::Audio,
            "video" => MediaKind::Video,
            "text" => MediaKind::Text,
            "application" => MediaKind::Application,
            "message" => MediaKind::Message,
            _ => return Err(nom::Err::Failure(ParseError::new("<media>", token))),
        };

        Ok((rem, kind))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
            MediaKind::Text => "text",
            MediaKind::Application => "application",
            MediaKind::Message => "message",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One token of the `<proto>` column, joined with `/` on the wire
/// (`UDP/TLS/RTP/SAVPF`).
///
/// The vocabulary is open, unregistered tokens are kept verbatim. The
/// registered ones are available as constants for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proto(BytesStr);

impl Proto {
    pub const UDP: &'static str = "UDP";
    pub const RTP: &'static str = "RTP";
    pub const AVP: &'static str = "AVP";
    pub const SAVP: &'static str = "SAVP";
    pub const AVPF: &'static str = "AVPF";
    pub const SAVPF: &'static str = "SAVPF";
    pub const TLS: &'static str = "TLS";
    pub const DTLS: &'static str = "DTLS";
    pub const SCTP: &'static str = "SCTP";

    pub fn parse(src: &Bytes) -> impl Fn(&str) -> IResult<&str, Self> + '_ {
        move |i| {
            map(
                take_while1(|c: char| c != '/' && !c.is_ascii_whitespace()),
                |proto| Proto(BytesStr::from_parse(src, proto)),
            )(i)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Proto {
    fn from(proto: &str) -> Self {
        Proto(BytesStr::from(proto))
    }
}

impl PartialEq<&str> for Proto {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Display for Proto {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Port of the `m=` line with the optional number-of-ports range
/// (`49170/2`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangedPort {
    pub value: u16,
    pub range: Option<u32>,
}

impl RangedPort {
    pub fn parse(i: &str) -> IResult<&str, Self> {
        let (i, value) = digits("<port>")(i)?;
        let (i, range) = opt(preceded(char('/'), digits("<number of ports>")))(i)?;

        Ok((i, RangedPort { value, range }))
    }
}

impl fmt::Display for RangedPort {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)?;

        if let Some(range) = self.range {
            write!(f, "/{range}")?;
        }

        Ok(())
    }
}

/// Media field (`m=`)
///
/// ```text
/// m=<media> <port>/<number of ports> <proto> <fmt> ...
/// ```
///
/// [RFC4566](https://www.rfc-editor.org/rfc/rfc4566.html#section-5.14)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaName {
    pub kind: MediaKind,
    pub port: RangedPort,

    /// Transport protocol tokens, at least one
    pub protos: Vec<Proto>,

    /// Format descriptions, at least one; usually RTP payload type numbers
    pub formats: Vec<BytesStr>,
}

impl MediaName {
    pub fn parse<'i>(src: &Bytes, i: &'i str) -> IResult<&'i str, Self> {
        let (i, kind) = MediaKind::parse(i)?;
        let (i, port) = preceded(char(' '), RangedPort::parse)(i)?;
        let (i, protos) = preceded(char(' '), separated_list1(char('/'), Proto::parse(src)))(i)?;
        let (i, formats) = many1(preceded(
            char(' '),
            map(token, |format| BytesStr::from_parse(src, format)),
        ))(i)?;

        Ok((
            i,
            MediaName {
                kind,
                port,
                protos,
                formats,
            },
        ))
    }
}

impl fmt::Display for MediaName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "m={} {} ", self.kind, self.port)?;

        for (n, proto) in self.protos.iter().enumerate() {
            if n > 0 {
                f.write_str("/")?;
            }

            write!(f, "{proto}")?;
        }

        for format in &self.formats {
            write!(f, " {format}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn media_name() {
        let input = BytesStr::from_static("audio 49170 RTP/AVP 0");

        let (rem, media_name) = MediaName::parse(input.as_ref(), &input).unwrap();

        assert!(rem.is_empty());

        assert_eq!(media_name.kind, MediaKind::Audio);
        assert_eq!(media_name.port.value, 49170);
        assert_eq!(media_name.port.range, None);
        assert_eq!(media_name.protos, [Proto::from("RTP"), Proto::from("AVP")]);
        assert_eq!(media_name.formats, ["0"]);
    }

    #[test]
    fn media_name_ranged_port() {
        let input = BytesStr::from_static("video 49170/2 RTP/AVP 31");

        let (rem, media_name) = MediaName::parse(input.as_ref(), &input).unwrap();

        assert!(rem.is_empty());

        assert_eq!(media_name.port.value, 49170);
        assert_eq!(media_name.port.range, Some(2));
    }

    #[test]
    fn media_name_dtls_sctp() {
        let input = BytesStr::from_static("application 54111 UDP/DTLS/SCTP webrtc-datachannel");

        let (rem, media_name) = MediaName::parse(input.as_ref(), &input).unwrap();

        assert!(rem.is_empty());

        assert_eq!(media_name.kind, MediaKind::Application);
        assert_eq!(
            media_name.protos,
            [Proto::from("UDP"), Proto::from("DTLS"), Proto::from("SCTP")]
        );
        assert_eq!(media_name.formats, ["webrtc-datachannel"]);
    }

    #[test]
    fn media_name_unregistered_proto() {
        let input = BytesStr::from_static("audio 49170 FOO/BAR 0");

        let (_, media_name) = MediaName::parse(input.as_ref(), &input).unwrap();

        assert_eq!(media_name.protos, [Proto::from("FOO"), Proto::from("BAR")]);
    }

    #[test]
    fn media_name_unknown_kind() {
        let input = BytesStr::from_static("image 49170 RTP/AVP 0");

        let err = MediaName::parse(input.as_ref(), &input).unwrap_err();

        match err {
            nom::Err::Failure(err) => {
                assert_eq!(err.field, "<media>");
                assert_eq!(err.found, "image");
            }
            _ => panic!("{:?}", err),
        }
    }

    #[test]
    fn media_name_without_formats() {
        let input = BytesStr::from_static("audio 49170 RTP/AVP");

        assert!(MediaName::parse(input.as_ref(), &input).is_err());
    }

    #[test]
    fn media_name_port_out_of_range() {
        let input = BytesStr::from_static("audio 70000 RTP/AVP 0");

        assert!(MediaName::parse(input.as_ref(), &input).is_err());
    }

    #[test]
    fn media_name_print() {
        let media_name = MediaName {
            kind: MediaKind::Audio,
            port: RangedPort {
                value: 49170,
                range: Some(2),
            },
            protos: vec![Proto::from("RTP"), Proto::from("AVP")],
            formats: vec![BytesStr::from_static("0"), BytesStr::from_static("8")],
        };

        assert_eq!(media_name.to_string(), "m=audio 49170/2 RTP/AVP 0 8");
    }
}
