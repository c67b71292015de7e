use crate::error::IResult;
use crate::{num, token, ParseError};
use nom::character::complete::char;
use nom::multi::{many1, separated_list0};
use nom::sequence::preceded;
use std::fmt;

/// Decodes the typed-time grammar shared by repeat times and time zone
/// offsets: a base-10 integer, optionally negative, optionally scaled by a
/// `d` (days), `h` (hours) or `m` (minutes) suffix into seconds.
fn typed_time(field: &'static str) -> impl Fn(&str) -> IResult<&str, i64> {
    move |i| {
        let (rem, token) = token(i)?;

        let (digits, scale) = match token.as_bytes().last() {
            Some(b'd') => (&token[..token.len() - 1], 86400),
            Some(b'h') => (&token[..token.len() - 1], 3600),
            Some(b'm') => (&token[..token.len() - 1], 60),
            _ => (token, 1),
        };

        let (negative, digits) = match digits.strip_prefix('-') {
            Some(digits) => (true, digits),
            None => (false, digits),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(nom::Err::Failure(ParseError::new(field, token)));
        }

        let value = digits
            .parse::<i64>()
            .ok()
            .and_then(|value| value.checked_mul(scale))
            .ok_or_else(|| nom::Err::Failure(ParseError::new(field, token)))?;

        Ok((rem, if negative { -value } else { value }))
    }
}

/// Timing field (`t=`)
///
/// ```text
/// t=<start-time> <stop-time>
/// ```
///
/// Both times are in seconds since January 1 1900 UTC, 0 meaning unbounded.
///
/// [RFC4566](https://www.rfc-editor.org/rfc/rfc4566.html#section-5.9)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timing {
    pub start: u64,
    pub stop: u64,
}

impl Timing {
    pub fn parse(i: &str) -> IResult<&str, Self> {
        let (i, start) = num("<start-time>")(i)?;
        let (i, stop) = preceded(char(' '), num("<stop-time>"))(i)?;

        Ok((i, Timing { start, stop }))
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "t={} {}", self.start, self.stop)
    }
}

/// Repeat field (`r=`)
///
/// ```text
/// r=<repeat interval> <active duration> <offsets from start-time>
/// ```
///
/// All values use the typed-time grammar and are stored normalized to
/// seconds, suffix spellings from the wire are not retained.
///
/// [RFC4566](https://www.rfc-editor.org/rfc/rfc4566.html#section-5.10)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatTime {
    pub interval: i64,
    pub duration: i64,

    /// Offsets from the timing's start, at least one
    pub offsets: Vec<i64>,
}

impl RepeatTime {
    pub fn parse(i: &str) -> IResult<&str, Self> {
        let (i, interval) = typed_time("<repeat interval>")(i)?;
        let (i, duration) = preceded(char(' '), typed_time("<active duration>"))(i)?;
        let (i, offsets) = many1(preceded(char(' '), typed_time("<offsets from start-time>")))(i)?;

        Ok((
            i,
            RepeatTime {
                interval,
                duration,
                offsets,
            },
        ))
    }
}

impl fmt::Display for RepeatTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "r={} {}", self.interval, self.duration)?;

        for offset in &self.offsets {
            write!(f, " {offset}")?;
        }

        Ok(())
    }
}

/// One `t=` line with the `r=` lines following it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeDescription {
    pub timing: Timing,
    pub repeat_times: Vec<RepeatTime>,
}

impl fmt::Display for TimeDescription {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.timing)?;

        for repeat_time in &self.repeat_times {
            write!(f, "\n{repeat_time}")?;
        }

        Ok(())
    }
}

/// Single adjustment of the time zone field (`z=`)
///
/// ```text
/// z=<adjustment time> <offset> <adjustment time> <offset> ...
/// ```
///
/// The line holds any number of pairs inline, [`TimeZone::parse_line`]
/// decodes all of them.
///
/// [RFC4566](https://www.rfc-editor.org/rfc/rfc4566.html#section-5.11)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeZone {
    pub adjustment_time: u64,
    pub offset: i64,
}

impl TimeZone {
    pub fn parse(i: &str) -> IResult<&str, Self> {
        let (i, adjustment_time) = num("<adjustment time>")(i)?;
        let (i, offset) = preceded(char(' '), typed_time("<offset>"))(i)?;

        Ok((
            i,
            TimeZone {
                adjustment_time,
                offset,
            },
        ))
    }

    pub fn parse_line(i: &str) -> IResult<&str, Vec<Self>> {
        separated_list0(char(' '), TimeZone::parse)(i)
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.adjustment_time, self.offset)
    }
}
