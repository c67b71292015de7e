#![warn(unreachable_pub)]

//! SDP ([RFC4566](https://www.rfc-editor.org/rfc/rfc4566.html)) session
//! description parsing & serialization, together with codecs for the ICE
//! candidate and extmap attribute-value grammars.

use error::IResult;
use nom::bytes::complete::take_while1;
use nom::character::complete::{char, digit1};
use nom::sequence::preceded;
use std::str::FromStr;

mod address;
mod attributes;
mod bandwidth;
mod connection;
mod error;
mod media;
mod media_description;
mod origin;
mod parser;
mod session_description;
mod time;

pub use address::{Address, AddressType, NetworkType};
pub use attributes::{
    Attribute, AttributeKey, CandidateKind, Direction, ExtMap, ExtMapUri, IceCandidate,
};
pub use bandwidth::{Bandwidth, BandwidthType};
pub use connection::ConnectionInformation;
pub use error::ParseError;
pub use media::{MediaKind, MediaName, Proto, RangedPort};
pub use media_description::MediaDescription;
pub use origin::Origin;
pub use session_description::{ParseConfig, SessionDescription};
pub use time::{RepeatTime, TimeDescription, TimeZone, Timing};

fn not_whitespace(c: char) -> bool {
    !c.is_ascii_whitespace()
}

fn token(i: &str) -> IResult<&str, &str> {
    take_while1(not_whitespace)(i)
}

/// Converts a single whitespace-delimited token into `T`, naming `field` and
/// the token in the error. Only plain base-10 digit runs are accepted, no
/// sign, no leading `+`.
fn parse_num<T: FromStr>(field: &'static str, token: &str) -> Result<T, ParseError> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::new(field, token));
    }

    token.parse().map_err(|_| ParseError::new(field, token))
}

/// Numeric field standing alone between separators.
///
/// Reports absence of the token as a recoverable error so repetitions
/// terminate cleanly; a present but malformed token fails the whole parse.
fn num<T: FromStr>(field: &'static str) -> impl Fn(&str) -> IResult<&str, T> {
    move |i| {
        let (rem, token) = token(i)?;

        match parse_num(field, token) {
            Ok(value) => Ok((rem, value)),
            Err(err) => Err(nom::Err::Failure(err)),
        }
    }
}

/// Numeric field embedded in a larger token (`<port>/<range>` and friends),
/// consuming only the digit run.
fn digits<T: FromStr>(field: &'static str) -> impl Fn(&str) -> IResult<&str, T> {
    move |i| {
        let (rem, run) = digit1::<_, ParseError>(i).map_err(|_| {
            nom::Err::Failure(ParseError::new(field, i.split(' ').next().unwrap_or(i)))
        })?;

        match run.parse() {
            Ok(value) => Ok((rem, value)),
            Err(_) => Err(nom::Err::Failure(ParseError::new(field, run))),
        }
    }
}

fn slash_num<T: FromStr>(field: &'static str) -> impl Fn(&str) -> IResult<&str, T> {
    move |i| preceded(char('/'), digits(field))(i)
}
