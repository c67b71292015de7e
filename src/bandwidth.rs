use crate::error::IResult;
use crate::{num, ParseError};
use nom::bytes::complete::take_while1;
use nom::character::complete::char;
use nom::sequence::preceded;
use std::fmt;

/// Bandwidth type tag (`<bwtype>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandwidthType {
    /// Conference total
    Ct,

    /// Application specific
    As,
}

impl BandwidthType {
    pub fn parse(i: &str) -> IResult<&str, Self> {
        let (rem, token) = take_while1(|c: char| c != ':' && !c.is_ascii_whitespace())(i)?;

        match token {
            "CT" => Ok((rem, BandwidthType::Ct)),
            "AS" => Ok((rem, BandwidthType::As)),
            _ => Err(nom::Err::Failure(ParseError::new("<bwtype>", token))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BandwidthType::Ct => "CT",
            BandwidthType::As => "AS",
        }
    }
}

impl fmt::Display for BandwidthType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bandwidth field (`b=`)
///
/// ```text
/// b=<bwtype>:<bandwidth>
/// ```
///
/// [RFC4566](https://www.rfc-editor.org/rfc/rfc4566.html#section-5.8)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bandwidth {
    pub type_: BandwidthType,

    /// The bandwidth, interpreted as kilobits per second
    pub bandwidth: u64,
}

impl Bandwidth {
    pub fn parse(i: &str) -> IResult<&str, Self> {
        let (i, type_) = BandwidthType::parse(i)?;
        let (i, bandwidth) = preceded(char(':'), num("<bandwidth>"))(i)?;

        Ok((i, Bandwidth { type_, bandwidth }))
    }
}

impl fmt::Display for Bandwidth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "b={}:{}", self.type_, self.bandwidth)
    }
}
