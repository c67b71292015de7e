use crate::error::IResult;
use crate::session_description::ParseConfig;
use crate::{
    parse_num, Attribute, Bandwidth, ConnectionInformation, MediaDescription, MediaName, Origin,
    ParseError, RepeatTime, SessionDescription, TimeDescription, TimeZone, Timing,
};
use bytes::Bytes;
use bytesstr::BytesStr;
use nom::Finish;

/// Runs a line's value grammar to completion, turning leftover input into a
/// wrong-field-count error and naming otherwise anonymous failures after the
/// line's tag.
fn parse_full<T>(tag: &'static str, line: &str, parsed: IResult<&str, T>) -> Result<T, ParseError> {
    match parsed.finish() {
        Ok(("", value)) => Ok(value),
        Ok((rem, _)) => Err(ParseError::new(tag, rem)),
        Err(err) => Err(err.or_field(tag, line)),
    }
}

/// Cursor over the input's lines, consumed by the fixed section sequence of
/// [`Parser::parse`].
///
/// Each section either takes the current line (matching tag, valid value),
/// reports absence without advancing (optional section, tag mismatch or end
/// of input) or fails the whole parse.
pub(crate) struct Parser<'s> {
    src: &'s BytesStr,
    lines: Vec<&'s str>,
    index: usize,
}

impl<'s> Parser<'s> {
    pub(crate) fn new(src: &'s BytesStr, config: ParseConfig) -> Self {
        let lines = src
            .split('\n')
            .map(|line| {
                if config.accept_crlf {
                    line.strip_suffix('\r').unwrap_or(line)
                } else {
                    line
                }
            })
            .filter(|line| !line.is_empty())
            .collect();

        Parser {
            src,
            lines,
            index: 0,
        }
    }

    fn bytes(&self) -> &'s Bytes {
        self.src.as_ref()
    }

    fn current(&self) -> Option<&'s str> {
        self.lines.get(self.index).copied()
    }

    /// Takes the current line's value if it carries `tag`, advancing past it.
    fn value_of(&mut self, tag: &str) -> Option<&'s str> {
        let value = self.current()?.strip_prefix(tag)?;
        self.index += 1;
        Some(value)
    }

    fn expect(&mut self, tag: &'static str) -> Result<&'s str, ParseError> {
        self.value_of(tag)
            .ok_or_else(|| ParseError::new(tag, self.current().unwrap_or("end of input")))
    }

    fn plain_value(&mut self, tag: &str) -> Option<BytesStr> {
        self.value_of(tag)
            .map(|value| BytesStr::from_parse(self.bytes(), value))
    }

    pub(crate) fn parse(mut self) -> Result<SessionDescription, ParseError> {
        let version = self.version()?;
        let origin = self.origin()?;
        let name = self.expect("s=")?;
        let name = BytesStr::from_parse(self.bytes(), name);
        let information = self.plain_value("i=");
        let uri = self.plain_value("u=");
        let email = self.plain_value("e=");
        let phone = self.plain_value("p=");
        let connection = self.connection()?;
        let bandwidths = self.bandwidths()?;
        let time_descriptions = self.time_descriptions()?;
        let time_zones = self.time_zones()?;
        let encryption_key = self.plain_value("k=");
        let attributes = self.attributes();
        let media_descriptions = self.media_descriptions()?;

        if let Some(line) = self.current() {
            return Err(ParseError::new("m=", line));
        }

        Ok(SessionDescription {
            version,
            origin,
            name,
            information,
            uri,
            email,
            phone,
            connection,
            bandwidths,
            time_descriptions,
            time_zones,
            encryption_key,
            attributes,
            media_descriptions,
        })
    }

    fn version(&mut self) -> Result<u64, ParseError> {
        let value = self.expect("v=")?;

        let version = parse_num("<proto-version>", value)?;
        if version != 0 {
            return Err(ParseError::new("<proto-version>", value));
        }

        Ok(version)
    }

    fn origin(&mut self) -> Result<Origin, ParseError> {
        let value = self.expect("o=")?;
        parse_full("o=", value, Origin::parse(self.bytes(), value))
    }

    fn connection(&mut self) -> Result<Option<ConnectionInformation>, ParseError> {
        let Some(value) = self.value_of("c=") else {
            return Ok(None);
        };

        parse_full("c=", value, ConnectionInformation::parse(self.bytes(), value)).map(Some)
    }

    fn bandwidths(&mut self) -> Result<Vec<Bandwidth>, ParseError> {
        let mut bandwidths = Vec::new();

        while let Some(value) = self.value_of("b=") {
            bandwidths.push(parse_full("b=", value, Bandwidth::parse(value))?);
        }

        Ok(bandwidths)
    }

    fn time_descriptions(&mut self) -> Result<Vec<TimeDescription>, ParseError> {
        let mut time_descriptions = Vec::new();

        while let Some(value) = self.value_of("t=") {
            let timing = parse_full("t=", value, Timing::parse(value))?;

            let mut repeat_times = Vec::new();
            while let Some(value) = self.value_of("r=") {
                repeat_times.push(parse_full("r=", value, RepeatTime::parse(value))?);
            }

            time_descriptions.push(TimeDescription {
                timing,
                repeat_times,
            });
        }

        if time_descriptions.is_empty() {
            return Err(ParseError::new(
                "t=",
                self.current().unwrap_or("end of input"),
            ));
        }

        Ok(time_descriptions)
    }

    fn time_zones(&mut self) -> Result<Vec<TimeZone>, ParseError> {
        let Some(value) = self.value_of("z=") else {
            return Ok(Vec::new());
        };

        parse_full("z=", value, TimeZone::parse_line(value))
    }

    fn attributes(&mut self) -> Vec<Attribute> {
        let mut attributes = Vec::new();

        while let Some(value) = self.value_of("a=") {
            attributes.push(Attribute::parse(self.bytes(), value));
        }

        attributes
    }

    fn media_descriptions(&mut self) -> Result<Vec<MediaDescription>, ParseError> {
        let mut media_descriptions = Vec::new();

        while let Some(value) = self.value_of("m=") {
            let name = parse_full("m=", value, MediaName::parse(self.bytes(), value))?;

            media_descriptions.push(MediaDescription {
                name,
                title: self.plain_value("i="),
                connection: self.connection()?,
                bandwidths: self.bandwidths()?,
                encryption_key: self.plain_value("k="),
                attributes: self.attributes(),
            });
        }

        Ok(media_descriptions)
    }
}
