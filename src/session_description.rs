use crate::parser::Parser;
use crate::{
    Attribute, Bandwidth, ConnectionInformation, MediaDescription, Origin, ParseError,
    TimeDescription, TimeZone,
};
use bytesstr::BytesStr;
use std::fmt;

/// Controls how the line splitter treats input before the grammar runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseConfig {
    /// Strip a single trailing carriage return from every line, accepting
    /// CRLF line endings in addition to bare LF.
    ///
    /// Off by default: a stray `\r` stays part of the line's last field and
    /// fails whichever grammar it ends up in.
    pub accept_crlf: bool,
}

/// A session description. Can be parsed from its text form using
/// [`SessionDescription::parse`] and serialized back using the
/// [`fmt::Display`] implementation.
///
/// Lines are kept in the fixed order of RFC4566 section 5; serializing
/// re-emits them in exactly that order, joined with `\n`.
///
/// [RFC4566](https://www.rfc-editor.org/rfc/rfc4566.html#section-5)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDescription {
    /// Protocol version (v field), required to be 0 on parse
    pub version: u64,

    /// Origin (o field)
    pub origin: Origin,

    /// Session name (s field), required but may be empty
    pub name: BytesStr,

    /// Optional session description (i field)
    pub information: Option<BytesStr>,

    /// Optional URI of the session description (u field)
    pub uri: Option<BytesStr>,

    /// Optional contact email address (e field), stored verbatim
    pub email: Option<BytesStr>,

    /// Optional contact phone number (p field), stored verbatim
    pub phone: Option<BytesStr>,

    /// Optional connection (c field), may instead appear in every media
    /// description
    pub connection: Option<ConnectionInformation>,

    /// Bandwidths (b fields)
    pub bandwidths: Vec<Bandwidth>,

    /// Time descriptions (t fields with their r fields), at least one
    pub time_descriptions: Vec<TimeDescription>,

    /// Time zone adjustments (z field)
    pub time_zones: Vec<TimeZone>,

    /// Optional encryption key (k field), stored verbatim
    pub encryption_key: Option<BytesStr>,

    /// Session level attributes (a fields)
    pub attributes: Vec<Attribute>,

    /// Media descriptions (m blocks)
    pub media_descriptions: Vec<MediaDescription>,
}

impl SessionDescription {
    pub fn parse(src: &BytesStr) -> Result<Self, ParseError> {
        Self::parse_with(src, ParseConfig::default())
    }

    pub fn parse_with(src: &BytesStr, config: ParseConfig) -> Result<Self, ParseError> {
        Parser::new(src, config).parse()
    }
}

impl fmt::Display for SessionDescription {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "v={}", self.version)?;
        write!(f, "\n{}", self.origin)?;
        write!(f, "\ns={}", self.name)?;

        if let Some(information) = &self.information {
            write!(f, "\ni={information}")?;
        }

        if let Some(uri) = &self.uri {
            write!(f, "\nu={uri}")?;
        }

        if let Some(email) = &self.email {
            write!(f, "\ne={email}")?;
        }

        if let Some(phone) = &self.phone {
            write!(f, "\np={phone}")?;
        }

        if let Some(connection) = &self.connection {
            write!(f, "\n{connection}")?;
        }

        for bandwidth in &self.bandwidths {
            write!(f, "\n{bandwidth}")?;
        }

        for time_description in &self.time_descriptions {
            write!(f, "\n{time_description}")?;
        }

        if !self.time_zones.is_empty() {
            f.write_str("\nz=")?;

            for (n, time_zone) in self.time_zones.iter().enumerate() {
                if n > 0 {
                    f.write_str(" ")?;
                }

                write!(f, "{time_zone}")?;
            }
        }

        if let Some(encryption_key) = &self.encryption_key {
            write!(f, "\nk={encryption_key}")?;
        }

        for attribute in &self.attributes {
            write!(f, "\n{attribute}")?;
        }

        for media_description in &self.media_descriptions {
            write!(f, "\n{media_description}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        Address, AddressType, AttributeKey, BandwidthType, CandidateKind, IceCandidate, MediaKind,
        MediaName, NetworkType, Proto, RangedPort, RepeatTime, Timing,
    };

    const SOURCE: &str = "v=0
o=jdoe 2890844526 2890842807 IN IP4 10.47.16.5
s=SDP Seminar
i=A Seminar on the session description protocol
u=http://www.example.com/seminars/sdp.pdf
e=j.doe@example.com (Jane Doe)
p=+1 617 555-6011
c=IN IP4 224.2.17.12/127
b=AS:128
t=2873397496 2873404696
r=604800 3600 0 90000
z=2882844526 -3600 2898848070 0
k=clear:ab8c4df8b8f4as8v8iuy8re
a=recvonly
m=audio 49170 RTP/AVP 0
i=audio stream
c=IN IP4 224.2.17.14/127
b=AS:64
k=prompt
a=rtpmap:0 PCMU/8000
m=video 51372/2 RTP/AVP 99
a=rtpmap:99 h263-1998/90000";

    #[test]
    fn session() {
        let input = BytesStr::from_static(SOURCE);

        let session = SessionDescription::parse(&input).unwrap();

        assert_eq!(session.version, 0);
        assert_eq!(session.origin.username, "jdoe");
        assert_eq!(session.origin.session_id, 2890844526);
        assert_eq!(session.name, "SDP Seminar");
        assert_eq!(
            session.information.unwrap(),
            "A Seminar on the session description protocol"
        );
        assert_eq!(session.uri.unwrap(), "http://www.example.com/seminars/sdp.pdf");
        assert_eq!(session.email.unwrap(), "j.doe@example.com (Jane Doe)");
        assert_eq!(session.phone.unwrap(), "+1 617 555-6011");

        let connection = session.connection.unwrap();
        assert_eq!(connection.network_type, NetworkType::Internet);
        let address = connection.address.unwrap();
        assert_eq!(address.address, "224.2.17.12");
        assert_eq!(address.ttl, Some(127));

        assert_eq!(session.bandwidths.len(), 1);
        assert_eq!(session.bandwidths[0].type_, BandwidthType::As);
        assert_eq!(session.bandwidths[0].bandwidth, 128);

        assert_eq!(session.time_descriptions.len(), 1);
        let time_description = &session.time_descriptions[0];
        assert_eq!(time_description.timing.start, 2873397496);
        assert_eq!(time_description.timing.stop, 2873404696);
        assert_eq!(time_description.repeat_times.len(), 1);
        assert_eq!(time_description.repeat_times[0].offsets, [0, 90000]);

        assert_eq!(session.time_zones.len(), 2);
        assert_eq!(session.time_zones[0].offset, -3600);

        assert_eq!(
            session.encryption_key.unwrap(),
            "clear:ab8c4df8b8f4as8v8iuy8re"
        );

        assert_eq!(session.attributes.len(), 1);
        assert_eq!(session.attributes[0].key, AttributeKey::RECVONLY);
        assert_eq!(session.attributes[0].value, None);

        assert_eq!(session.media_descriptions.len(), 2);

        let audio = &session.media_descriptions[0];
        assert_eq!(audio.name.kind, MediaKind::Audio);
        assert_eq!(audio.name.port.value, 49170);
        assert_eq!(audio.title.clone().unwrap(), "audio stream");
        assert!(audio.connection.is_some());
        assert_eq!(audio.bandwidths[0].bandwidth, 64);
        assert_eq!(audio.encryption_key.clone().unwrap(), "prompt");
        assert_eq!(audio.attributes[0].key, AttributeKey::RTPMAP);

        let video = &session.media_descriptions[1];
        assert_eq!(video.name.kind, MediaKind::Video);
        assert_eq!(video.name.port.value, 51372);
        assert_eq!(video.name.port.range, Some(2));
        assert_eq!(video.name.formats, ["99"]);
    }

    #[test]
    fn session_print_round_trip() {
        let input = BytesStr::from_static(SOURCE);

        let session = SessionDescription::parse(&input).unwrap();

        assert_eq!(session.to_string(), SOURCE);
    }

    #[test]
    fn session_reparse_normalized_time_units() {
        let input = BytesStr::from_static(
            "v=0
o=jdoe 2890844526 2890842807 IN IP4 10.47.16.5
s=-
t=2873397496 2873404696
r=7d 1h 0 25h
z=2882844526 -1h 2898848070 0",
        );

        let session = SessionDescription::parse(&input).unwrap();

        assert_eq!(session.time_descriptions[0].repeat_times[0].interval, 604800);
        assert_eq!(session.time_zones[0].offset, -3600);

        let serialized = BytesStr::from(session.to_string());
        let reparsed = SessionDescription::parse(&serialized).unwrap();

        assert_eq!(reparsed, session);
    }

    #[test]
    fn minimal_session() {
        let input = BytesStr::from_static(
            "v=0
o=- 1 1 IN IP4 127.0.0.1
s=-
t=0 0",
        );

        let session = SessionDescription::parse(&input).unwrap();

        assert_eq!(session.information, None);
        assert_eq!(session.uri, None);
        assert_eq!(session.email, None);
        assert_eq!(session.phone, None);
        assert_eq!(session.connection, None);
        assert!(session.bandwidths.is_empty());
        assert_eq!(
            session.time_descriptions,
            [TimeDescription {
                timing: Timing { start: 0, stop: 0 },
                repeat_times: vec![],
            }]
        );
        assert!(session.time_zones.is_empty());
        assert_eq!(session.encryption_key, None);
        assert!(session.attributes.is_empty());
        assert!(session.media_descriptions.is_empty());
    }

    #[test]
    fn empty_session_name() {
        let input = BytesStr::from_static("v=0\no=- 1 1 IN IP4 127.0.0.1\ns=\nt=0 0");

        let session = SessionDescription::parse(&input).unwrap();

        assert_eq!(session.name, "");
    }

    #[test]
    fn multiple_time_descriptions() {
        let input = BytesStr::from_static(
            "v=0
o=- 1 1 IN IP4 127.0.0.1
s=-
t=3034423619 3042462419
r=604800 3600 0
t=3034423619 3042462419
r=7d 1h 0
r=604800 3600 90000",
        );

        let session = SessionDescription::parse(&input).unwrap();

        assert_eq!(session.time_descriptions.len(), 2);
        assert_eq!(session.time_descriptions[0].repeat_times.len(), 1);
        assert_eq!(session.time_descriptions[1].repeat_times.len(), 2);
    }

    #[test]
    fn missing_version() {
        let input = BytesStr::from_static("o=- 1 1 IN IP4 127.0.0.1\ns=-\nt=0 0");

        let err = SessionDescription::parse(&input).unwrap_err();

        assert_eq!(err.field, "v=");
    }

    #[test]
    fn version_not_zero() {
        let input = BytesStr::from_static("v=1\no=- 1 1 IN IP4 127.0.0.1\ns=-\nt=0 0");

        let err = SessionDescription::parse(&input).unwrap_err();

        assert_eq!(err.field, "<proto-version>");
        assert_eq!(err.found, "1");
    }

    #[test]
    fn origin_too_few_fields() {
        let input = BytesStr::from_static("v=0\no=- 1 1 IN IP4\ns=-\nt=0 0");

        assert!(SessionDescription::parse(&input).is_err());
    }

    #[test]
    fn timing_not_numeric() {
        let input = BytesStr::from_static("v=0\no=- 1 1 IN IP4 127.0.0.1\ns=-\nt=now 0");

        let err = SessionDescription::parse(&input).unwrap_err();

        assert_eq!(err.field, "<start-time>");
        assert_eq!(err.found, "now");
    }

    #[test]
    fn missing_time_description() {
        let input = BytesStr::from_static("v=0\no=- 1 1 IN IP4 127.0.0.1\ns=-");

        let err = SessionDescription::parse(&input).unwrap_err();

        assert_eq!(err.field, "t=");
        assert_eq!(err.found, "end of input");
    }

    #[test]
    fn attribute_before_time_description() {
        let input = BytesStr::from_static("v=0\no=- 1 1 IN IP4 127.0.0.1\ns=-\na=recvonly\nt=0 0");

        let err = SessionDescription::parse(&input).unwrap_err();

        assert_eq!(err.field, "t=");
        assert_eq!(err.found, "a=recvonly");
    }

    #[test]
    fn media_too_few_fields() {
        let input = BytesStr::from_static(
            "v=0\no=- 1 1 IN IP4 127.0.0.1\ns=-\nt=0 0\nm=audio 49170 RTP/AVP",
        );

        assert!(SessionDescription::parse(&input).is_err());
    }

    #[test]
    fn trailing_junk_line() {
        let input = BytesStr::from_static("v=0\no=- 1 1 IN IP4 127.0.0.1\ns=-\nt=0 0\nx=what");

        let err = SessionDescription::parse(&input).unwrap_err();

        assert_eq!(err.found, "x=what");
    }

    #[test]
    fn unknown_attributes_preserved() {
        let input = BytesStr::from_static(
            "v=0
o=- 1 1 IN IP4 127.0.0.1
s=-
t=0 0
a=x-custom:some value
a=x-flag",
        );

        let session = SessionDescription::parse(&input).unwrap();

        assert_eq!(session.attributes[0].key, "x-custom");
        assert_eq!(session.attributes[0].value.clone().unwrap(), "some value");
        assert_eq!(session.attributes[1].key, "x-flag");

        assert_eq!(session.to_string(), &*input);
    }

    #[test]
    fn crlf_rejected_by_default() {
        let input = BytesStr::from_static("v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\n");

        assert!(SessionDescription::parse(&input).is_err());
    }

    #[test]
    fn crlf_accepted_with_config() {
        let input = BytesStr::from_static("v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\n");

        let session =
            SessionDescription::parse_with(&input, ParseConfig { accept_crlf: true }).unwrap();

        assert_eq!(session.name, "-");
        assert_eq!(session.time_descriptions.len(), 1);
    }

    #[test]
    fn media_scoped_attributes() {
        let input = BytesStr::from_static(
            "v=0
o=- 1 1 IN IP4 127.0.0.1
s=-
t=0 0
a=group:BUNDLE 0
m=audio 9 UDP/TLS/RTP/SAVPF 111
a=mid:0
a=rtcp-mux",
        );

        let session = SessionDescription::parse(&input).unwrap();

        assert_eq!(session.attributes.len(), 1);
        assert_eq!(session.attributes[0].key, AttributeKey::GROUP);

        let media = &session.media_descriptions[0];
        assert_eq!(media.attributes.len(), 2);
        assert_eq!(media.attributes[0].key, AttributeKey::MID);
        assert_eq!(media.attributes[1].key, AttributeKey::RTCP_MUX);
    }

    #[test]
    fn candidate_attribute_decoded_on_demand() {
        let input = BytesStr::from_static(
            "v=0
o=- 1 1 IN IP4 127.0.0.1
s=-
t=0 0
m=audio 9 UDP/TLS/RTP/SAVPF 111
a=candidate:1 1 UDP 2130706431 198.51.100.1 8998 typ host",
        );

        let session = SessionDescription::parse(&input).unwrap();

        let attribute = &session.media_descriptions[0].attributes[0];
        assert_eq!(attribute.key, AttributeKey::CANDIDATE);

        let value = attribute.value.as_ref().unwrap();
        let (_, candidate) = IceCandidate::parse(value.as_ref(), value).unwrap();

        assert_eq!(candidate.kind, CandidateKind::HOST);
        assert_eq!(candidate.address, "198.51.100.1");
        assert_eq!(candidate.port, 8998);
    }

    #[test]
    fn hand_built_round_trip() {
        let session = SessionDescription {
            version: 0,
            origin: Origin {
                username: "-".into(),
                session_id: 4858251974351650128,
                session_version: 2,
                network_type: NetworkType::Internet,
                address_type: AddressType::Ip4,
                unicast_address: BytesStr::from_static("127.0.0.1"),
            },
            name: BytesStr::from_static("-"),
            information: None,
            uri: None,
            email: None,
            phone: None,
            connection: Some(ConnectionInformation {
                network_type: NetworkType::Internet,
                address_type: AddressType::Ip4,
                address: Some(Address {
                    address: BytesStr::from_static("224.2.36.42"),
                    ttl: Some(127),
                    range: None,
                }),
            }),
            bandwidths: vec![Bandwidth {
                type_: BandwidthType::As,
                bandwidth: 128,
            }],
            time_descriptions: vec![TimeDescription {
                timing: Timing { start: 0, stop: 0 },
                repeat_times: vec![RepeatTime {
                    interval: 604800,
                    duration: 3600,
                    offsets: vec![0],
                }],
            }],
            time_zones: vec![TimeZone {
                adjustment_time: 2882844526,
                offset: -3600,
            }],
            encryption_key: None,
            attributes: vec![Attribute {
                key: AttributeKey::from("ice-ufrag"),
                value: Some(BytesStr::from_static("8hhY")),
            }],
            media_descriptions: vec![MediaDescription {
                name: MediaName {
                    kind: MediaKind::Audio,
                    port: RangedPort {
                        value: 49170,
                        range: None,
                    },
                    protos: vec![Proto::from("RTP"), Proto::from("AVP")],
                    formats: vec![BytesStr::from_static("0")],
                },
                title: None,
                connection: None,
                bandwidths: vec![],
                encryption_key: None,
                attributes: vec![Attribute {
                    key: AttributeKey::from("ptime"),
                    value: Some(BytesStr::from_static("20")),
                }],
            }],
        };

        let serialized = BytesStr::from(session.to_string());

        assert_eq!(SessionDescription::parse(&serialized).unwrap(), session);
    }

    #[test]
    fn session_print() {
        let input = BytesStr::from_static("v=0\no=- 1 1 IN IP4 127.0.0.1\ns=-\nt=0 0");

        let session = SessionDescription::parse(&input).unwrap();

        assert_eq!(session.to_string(), "v=0\no=- 1 1 IN IP4 127.0.0.1\ns=-\nt=0 0");
    }
}
