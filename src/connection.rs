use crate::error::IResult;
use crate::{Address, AddressType, NetworkType};
use bytes::Bytes;
use nom::character::complete::char;
use nom::combinator::opt;
use nom::sequence::preceded;
use std::fmt;

/// Connection field (`c=`)
///
/// ```text
/// c=<nettype> <addrtype> <connection-address>
/// ```
///
/// The connection address itself is optional, multicast addresses carry
/// `/`-separated TTL/count suffixes which are kept in [`Address`].
///
/// [RFC4566](https://www.rfc-editor.org/rfc/rfc4566.html#section-5.7)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInformation {
    pub network_type: NetworkType,
    pub address_type: AddressType,
    pub address: Option<Address>,
}

impl ConnectionInformation {
    pub fn parse<'i>(src: &Bytes, i: &'i str) -> IResult<&'i str, Self> {
        let (i, network_type) = NetworkType::parse(i)?;
        let (i, address_type) = preceded(char(' '), AddressType::parse)(i)?;
        let (i, address) = opt(preceded(char(' '), Address::parse(src, address_type)))(i)?;

        Ok((
            i,
            ConnectionInformation {
                network_type,
                address_type,
                address,
            },
        ))
    }
}

impl fmt::Display for ConnectionInformation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "c={} {}", self.network_type, self.address_type)?;

        if let Some(address) = &self.address {
            write!(f, " {address}")?;
        }

        Ok(())
    }
}
