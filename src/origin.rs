use crate::error::IResult;
use crate::{num, token, AddressType, NetworkType};
use bytes::Bytes;
use bytesstr::BytesStr;
use nom::character::complete::char;
use nom::sequence::preceded;
use std::fmt;

/// Origin field (`o=`)
///
/// ```text
/// o=<username> <sess-id> <sess-version> <nettype> <addrtype> <unicast-address>
/// ```
///
/// [RFC4566](https://www.rfc-editor.org/rfc/rfc4566.html#section-5.2)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    /// Username of the session's originator, `-` if unset
    pub username: BytesStr,

    /// Globally unique session identifier
    pub session_id: u64,

    /// The version of the session, changes with each modification/renegotiation
    pub session_version: u64,

    pub network_type: NetworkType,
    pub address_type: AddressType,

    /// Address the session was created from, stored verbatim
    pub unicast_address: BytesStr,
}

impl Origin {
    pub fn parse<'i>(src: &Bytes, i: &'i str) -> IResult<&'i str, Self> {
        let (i, username) = token(i)?;
        let (i, session_id) = preceded(char(' '), num("<sess-id>"))(i)?;
        let (i, session_version) = preceded(char(' '), num("<sess-version>"))(i)?;
        let (i, network_type) = preceded(char(' '), NetworkType::parse)(i)?;
        let (i, address_type) = preceded(char(' '), AddressType::parse)(i)?;
        let (i, unicast_address) = preceded(char(' '), token)(i)?;

        Ok((
            i,
            Origin {
                username: BytesStr::from_parse(src, username),
                session_id,
                session_version,
                network_type,
                address_type,
                unicast_address: BytesStr::from_parse(src, unicast_address),
            },
        ))
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "o={} {} {} {} {} {}",
            self.username,
            self.session_id,
            self.session_version,
            self.network_type,
            self.address_type,
            self.unicast_address
        )
    }
}
