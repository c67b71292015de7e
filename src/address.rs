use crate::error::IResult;
use crate::{slash_num, token, ParseError};
use bytes::Bytes;
use bytesstr::BytesStr;
use nom::bytes::complete::take_while1;
use nom::combinator::opt;
use std::fmt;

/// Network type tag (`<nettype>`), `IN` is the only registered value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkType {
    Internet,
}

impl NetworkType {
    pub fn parse(i: &str) -> IResult<&str, Self> {
        let (rem, token) = token(i)?;

        match token {
            "IN" => Ok((rem, NetworkType::Internet)),
            _ => Err(nom::Err::Failure(ParseError::new("<nettype>", token))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkType::Internet => "IN",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Address type tag (`<addrtype>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressType {
    Ip4,
    Ip6,
}

impl AddressType {
    pub fn parse(i: &str) -> IResult<&str, Self> {
        let (rem, token) = token(i)?;

        match token {
            "IP4" => Ok((rem, AddressType::Ip4)),
            "IP6" => Ok((rem, AddressType::Ip6)),
            _ => Err(nom::Err::Failure(ParseError::new("<addrtype>", token))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AddressType::Ip4 => "IP4",
            AddressType::Ip6 => "IP6",
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection address with its optional multicast suffixes
///
/// ```text
/// <base multicast address>[/<ttl>]/<number of addresses>
/// ```
///
/// The TTL suffix is only valid for IP4 addresses, IP6 multicast addresses
/// carry the address count alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub address: BytesStr,
    pub ttl: Option<u32>,
    pub range: Option<u32>,
}

impl Address {
    pub fn parse<'s>(
        src: &'s Bytes,
        address_type: AddressType,
    ) -> impl Fn(&str) -> IResult<&str, Self> + 's {
        move |i| {
            let (i, address) =
                take_while1(|c: char| c != '/' && !c.is_ascii_whitespace())(i)?;

            let (i, ttl, range) = match address_type {
                AddressType::Ip4 => {
                    let (i, ttl) = opt(slash_num("<ttl>"))(i)?;

                    if ttl.is_some() {
                        let (i, range) = opt(slash_num("<number of addresses>"))(i)?;
                        (i, ttl, range)
                    } else {
                        (i, None, None)
                    }
                }
                AddressType::Ip6 => {
                    let (i, range) = opt(slash_num("<number of addresses>"))(i)?;
                    (i, None, range)
                }
            };

            Ok((
                i,
                Address {
                    address: BytesStr::from_parse(src, address),
                    ttl,
                    range,
                },
            ))
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.address)?;

        if let Some(ttl) = self.ttl {
            write!(f, "/{ttl}")?;
        }

        if let Some(range) = self.range {
            write!(f, "/{range}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn network_type() {
        let (rem, nt) = NetworkType::parse("IN").unwrap();

        assert!(rem.is_empty());
        assert_eq!(nt, NetworkType::Internet);
    }

    #[test]
    fn network_type_unknown() {
        assert!(NetworkType::parse("ATM").is_err());
    }

    #[test]
    fn address_type() {
        let (rem, at) = AddressType::parse("IP6").unwrap();

        assert!(rem.is_empty());
        assert_eq!(at, AddressType::Ip6);
    }

    #[test]
    fn address_type_unknown() {
        assert!(AddressType::parse("IPX").is_err());
    }

    #[test]
    fn address_plain() {
        let input = BytesStr::from_static("224.2.36.42");

        let (rem, address) = Address::parse(input.as_ref(), AddressType::Ip4)(&input).unwrap();

        assert!(rem.is_empty());
        assert_eq!(address.address, "224.2.36.42");
        assert_eq!(address.ttl, None);
        assert_eq!(address.range, None);
    }

    #[test]
    fn address_ttl_range() {
        let input = BytesStr::from_static("224.2.36.42/127/3");

        let (rem, address) = Address::parse(input.as_ref(), AddressType::Ip4)(&input).unwrap();

        assert!(rem.is_empty());
        assert_eq!(address.ttl, Some(127));
        assert_eq!(address.range, Some(3));
    }

    #[test]
    fn address_ip6_range() {
        let input = BytesStr::from_static("ff15::101/3");

        let (rem, address) = Address::parse(input.as_ref(), AddressType::Ip6)(&input).unwrap();

        assert!(rem.is_empty());
        assert_eq!(address.address, "ff15::101");
        assert_eq!(address.ttl, None);
        assert_eq!(address.range, Some(3));
    }

    #[test]
    fn address_ttl_not_numeric() {
        let input = BytesStr::from_static("224.2.36.42/high");

        assert!(Address::parse(input.as_ref(), AddressType::Ip4)(&input).is_err());
    }

    #[test]
    fn address_print() {
        let address = Address {
            address: BytesStr::from_static("224.2.36.42"),
            ttl: Some(127),
            range: None,
        };

        assert_eq!(address.to_string(), "224.2.36.42/127");
    }
}
