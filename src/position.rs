//! `<position>` values for `radial-gradient(... at <position>, ...)`
//!
//! Keywords resolve to percentages (`left` = 0%, `center` = 50%,
//! `right`/`bottom` = 100%) at parse time, matching how the toolkit's
//! position values behave once computed. A single component centers the
//! other axis.

use std::fmt;

use cssparser::{Parser, Token};

use crate::number::Number;
use crate::parse::{error, ValueResult};

/// A resolved 2D position; each axis is a length or percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
  pub x: Number,
  pub y: Number,
}

impl Position {
  /// The default `center` position (50% 50%).
  pub const CENTER: Self = Self {
    x: Number::percent(50.0),
    y: Number::percent(50.0),
  };

  pub fn resolve_x(&self, width: f64) -> f64 {
    self.x.resolve(width)
  }

  pub fn resolve_y(&self, height: f64) -> f64 {
    self.y.resolve(height)
  }

  pub fn lerp(&self, other: &Position, progress: f64) -> Option<Position> {
    Some(Position {
      x: self.x.lerp(&other.x, progress)?,
      y: self.y.lerp(&other.y, progress)?,
    })
  }

  /// Parses `[ left | center | right | <length-percentage> ]
  /// [ top | center | bottom | <length-percentage> ]?`.
  pub(crate) fn parse<'i, 't>(input: &mut Parser<'i, 't>) -> ValueResult<'i, Position> {
    let x = Self::parse_component(input, "left", "right")?;
    let y = if Self::component_follows(input) {
      Self::parse_component(input, "top", "bottom")?
    } else {
      Number::percent(50.0)
    };
    Ok(Position { x, y })
  }

  fn component_follows(input: &mut Parser) -> bool {
    let state = input.state();
    let ok = match input.next() {
      Ok(Token::Ident(name)) => matches!(&**name, "top" | "bottom" | "center"),
      Ok(Token::Percentage { .. }) | Ok(Token::Dimension { .. }) => true,
      Ok(Token::Number { value, .. }) => *value == 0.0,
      _ => false,
    };
    input.reset(&state);
    ok
  }

  fn parse_component<'i, 't>(
    input: &mut Parser<'i, 't>,
    start: &str,
    end: &str,
  ) -> ValueResult<'i, Number> {
    let state = input.state();
    if let Ok(token) = input.next() {
      if let Token::Ident(name) = token {
        if &**name == start {
          return Ok(Number::percent(0.0));
        }
        if &**name == end {
          return Ok(Number::percent(100.0));
        }
        if &**name == "center" {
          return Ok(Number::percent(50.0));
        }
        let name = name.to_string();
        return error(input, format!("Invalid position keyword '{name}'"));
      }
    }
    input.reset(&state);
    Number::parse_length(input)
  }
}

impl fmt::Display for Position {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.x, self.y)
  }
}

impl Default for Position {
  fn default() -> Self {
    Self::CENTER
  }
}
