//! Dimension values used by the image grammar
//!
//! Gradient stop offsets are lengths or percentages; linear gradient
//! directions can be angles. Angles are canonicalized to degrees at parse
//! time so printed values round-trip unit-for-unit.

use std::fmt;

use cssparser::{Parser, Token};

use crate::parse::{error, ValueResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
  /// Device-independent pixels
  Px,
  /// Percentage of the reference length
  Percent,
  /// Degrees (angles only)
  Deg,
}

/// A number with a unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number {
  pub value: f64,
  pub unit: Unit,
}

impl Number {
  pub const fn px(value: f64) -> Self {
    Self {
      value,
      unit: Unit::Px,
    }
  }

  pub const fn percent(value: f64) -> Self {
    Self {
      value,
      unit: Unit::Percent,
    }
  }

  pub const fn deg(value: f64) -> Self {
    Self {
      value,
      unit: Unit::Deg,
    }
  }

  /// Resolves against a reference length: percentages scale, pixels pass
  /// through. Angles have no reference and resolve to their raw value.
  pub fn resolve(&self, reference: f64) -> f64 {
    match self.unit {
      Unit::Px | Unit::Deg => self.value,
      Unit::Percent => self.value / 100.0 * reference,
    }
  }

  pub fn is_percent(&self) -> bool {
    self.unit == Unit::Percent
  }

  /// Interpolates between two numbers of the same unit. A unit mismatch
  /// yields `None` and the caller falls back to a cross-fade.
  pub fn lerp(&self, other: &Number, progress: f64) -> Option<Number> {
    if self.unit != other.unit {
      return None;
    }
    Some(Number {
      value: self.value + (other.value - self.value) * progress,
      unit: self.unit,
    })
  }

  /// Lookahead for a length or percentage token.
  pub(crate) fn can_parse_length(input: &mut Parser) -> bool {
    let state = input.state();
    let ok = match input.next() {
      Ok(Token::Percentage { .. }) => true,
      Ok(Token::Dimension { unit, .. }) => &**unit == "px",
      Ok(Token::Number { value, .. }) => *value == 0.0,
      _ => false,
    };
    input.reset(&state);
    ok
  }

  /// Lookahead for an angle token.
  pub(crate) fn can_parse_angle(input: &mut Parser) -> bool {
    let state = input.state();
    let ok = match input.next() {
      Ok(Token::Dimension { unit, .. }) => {
        matches!(&**unit, "deg" | "grad" | "rad" | "turn")
      }
      Ok(Token::Number { value, .. }) => *value == 0.0,
      _ => false,
    };
    input.reset(&state);
    ok
  }

  /// Parses a `<length> | <percentage>`. Only `px` lengths are part of the
  /// image grammar; unitless zero is accepted as `0px`.
  pub(crate) fn parse_length<'i, 't>(input: &mut Parser<'i, 't>) -> ValueResult<'i, Number> {
    match input.next()?.clone() {
      Token::Percentage { unit_value, .. } => Ok(Number::percent(unit_value as f64 * 100.0)),
      Token::Dimension {
        value, ref unit, ..
      } => {
        if &**unit == "px" {
          Ok(Number::px(value as f64))
        } else {
          error(input, format!("Unsupported length unit '{unit}'"))
        }
      }
      Token::Number { value, .. } if value == 0.0 => Ok(Number::px(0.0)),
      ref t => error(input, format!("Expected a length or percentage, got {t:?}")),
    }
  }

  /// Parses an `<angle>`, canonicalized to degrees.
  pub(crate) fn parse_angle<'i, 't>(input: &mut Parser<'i, 't>) -> ValueResult<'i, Number> {
    match input.next()?.clone() {
      Token::Dimension {
        value, ref unit, ..
      } => {
        let value = value as f64;
        let degrees = match &**unit {
          "deg" => value,
          "grad" => value * 360.0 / 400.0,
          "rad" => value.to_degrees(),
          "turn" => value * 360.0,
          _ => return error(input, format!("Unsupported angle unit '{unit}'")),
        };
        Ok(Number::deg(degrees))
      }
      Token::Number { value, .. } if value == 0.0 => Ok(Number::deg(0.0)),
      ref t => error(input, format!("Expected an angle, got {t:?}")),
    }
  }
}

impl fmt::Display for Number {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.unit {
      Unit::Px => write!(f, "{}px", self.value),
      Unit::Percent => write!(f, "{}%", self.value),
      Unit::Deg => write!(f, "{}deg", self.value),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parse::parse_entirely;

  #[test]
  fn test_parse_length() {
    let n = parse_entirely("10px", Number::parse_length).unwrap();
    assert_eq!(n, Number::px(10.0));
    let n = parse_entirely("25%", Number::parse_length).unwrap();
    assert_eq!(n, Number::percent(25.0));
    assert!(parse_entirely("10em", Number::parse_length).is_err());
  }

  #[test]
  fn test_angle_canonicalization() {
    let n = parse_entirely("0.25turn", Number::parse_angle).unwrap();
    assert_eq!(n, Number::deg(90.0));
    let n = parse_entirely("200grad", Number::parse_angle).unwrap();
    assert_eq!(n, Number::deg(180.0));
  }

  #[test]
  fn test_resolve() {
    assert_eq!(Number::percent(50.0).resolve(200.0), 100.0);
    assert_eq!(Number::px(13.0).resolve(200.0), 13.0);
  }

  #[test]
  fn test_lerp_requires_matching_units() {
    assert_eq!(
      Number::px(0.0).lerp(&Number::px(10.0), 0.5),
      Some(Number::px(5.0))
    );
    assert_eq!(Number::px(0.0).lerp(&Number::percent(10.0), 0.5), None);
  }
}
