//! Shared cssparser plumbing for the image grammar.
//!
//! Internal parsers speak `cssparser::ParseError` with string payloads so
//! error messages survive until the public boundary, where they are turned
//! into [`crate::error::ParseError`] with source locations attached.

use cssparser::{BasicParseErrorKind, ParseErrorKind, Parser, ParserInput};

use crate::error::ParseError as PublicParseError;

/// Error type threaded through the internal parsers.
pub(crate) type ValueParseError<'i> = cssparser::ParseError<'i, String>;

pub(crate) type ValueResult<'i, T> = Result<T, ValueParseError<'i>>;

/// Builds a custom error at the parser's current location.
pub(crate) fn error<'i, T>(input: &Parser<'i, '_>, message: impl Into<String>) -> ValueResult<'i, T> {
  Err(input.new_custom_error(message.into()))
}

/// Converts an internal error into the public, location-carrying form.
pub(crate) fn to_public(err: ValueParseError<'_>) -> PublicParseError {
  let message = match err.kind {
    ParseErrorKind::Custom(message) => message,
    ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(ref t)) => {
      format!("Unexpected token: {t:?}")
    }
    ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => "Unexpected end of input".to_string(),
    ParseErrorKind::Basic(ref kind) => format!("{kind:?}"),
  };
  PublicParseError::InvalidImage {
    message,
    line: err.location.line,
    column: err.location.column,
  }
}

/// Runs a parser over a standalone string, requiring it to consume all input.
pub(crate) fn parse_entirely<T>(
  css: &str,
  parse: impl for<'i, 't> FnOnce(&mut Parser<'i, 't>) -> ValueResult<'i, T>,
) -> Result<T, PublicParseError> {
  let mut input = ParserInput::new(css);
  let mut parser = Parser::new(&mut input);
  let result = parse(&mut parser).map_err(to_public)?;
  parser
    .expect_exhausted()
    .map_err(|e| to_public(e.into()))?;
  Ok(result)
}
