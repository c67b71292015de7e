//! Media direction tokens (`sendrecv`, `sendonly`, `recvonly`, `inactive`)

use crate::error::IResult;
use crate::{token, ParseError};
use std::fmt;

/// Direction suffix of an extmap attribute, restricting the extension to
/// one transmission direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    SendRecv,
    SendOnly,
    RecvOnly,
    Inactive,
}

impl Direction {
    pub fn parse(i: &str) -> IResult<&str, Self> {
        let (rem, token) = token(i)?;

        let direction = match token {
            "sendrecv" => Direction::SendRecv,
            "sendonly" => Direction::SendOnly,
            "recvonly" => Direction::RecvOnly,
            "inactive" => Direction::Inactive,
            _ => return Err(nom::Err::Failure(ParseError::new("<direction>", token))),
        };

        Ok((rem, direction))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::SendRecv => "sendrecv",
            Direction::SendOnly => "sendonly",
            Direction::RecvOnly => "recvonly",
            Direction::Inactive => "inactive",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
