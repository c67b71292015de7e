use std::fmt;

/// Error returned when parsing a session description or one of the
/// attribute-value grammars fails.
///
/// `field` names the part of the grammar that was violated using the
/// grammar's own field names (`<sess-id>`, `<cand-type>`, `o=`, ...),
/// `found` carries the offending input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: `{found}`")]
pub struct ParseError {
    pub field: &'static str,
    pub found: String,
}

impl ParseError {
    pub(crate) fn new(field: &'static str, found: impl Into<String>) -> Self {
        ParseError {
            field,
            found: found.into(),
        }
    }

    /// Attaches a field name to errors that bubbled up from bare nom
    /// combinators without one.
    pub(crate) fn or_field(self, field: &'static str, found: &str) -> Self {
        if self.field.is_empty() {
            ParseError::new(field, found)
        } else {
            self
        }
    }
}

pub(crate) type IResult<I, O> = nom::IResult<I, O, ParseError>;

impl<'i> nom::error::ParseError<&'i str> for ParseError {
    fn from_error_kind(input: &'i str, _: nom::error::ErrorKind) -> Self {
        ParseError::new("", input)
    }

    fn append(_: &'i str, _: nom::error::ErrorKind, other: Self) -> Self {
        other
    }
}

impl<'i, E: fmt::Display> nom::error::FromExternalError<&'i str, E> for ParseError {
    fn from_external_error(input: &'i str, _: nom::error::ErrorKind, _: E) -> Self {
        ParseError::new("", input)
    }
}
