//! `linear-gradient(...)` and `repeating-linear-gradient(...)`
//!
//! Directions are either a `to <side>` bitmask or an angle in degrees
//! (0 = up, clockwise). The gradient line runs through the center of the
//! box; its endpoints come from the perpendicular construction below, so
//! corner directions hit the corners exactly. Repeating gradients tile the
//! window spanned by their outermost explicit offsets.

use std::fmt;

use cssparser::{Parser, Token};
use tiny_skia::{Point, SpreadMode, Transform};

use crate::canvas::Canvas;
use crate::image::{repeating_start_end, resolve_stops, to_gradient_stops, ColorStop};
use crate::number::Number;
use crate::parse::{error, ValueResult};

pub const SIDE_TOP: u8 = 1 << 0;
pub const SIDE_RIGHT: u8 = 1 << 1;
pub const SIDE_BOTTOM: u8 = 1 << 2;
pub const SIDE_LEFT: u8 = 1 << 3;

#[derive(Debug, Clone, PartialEq)]
pub enum LinearDirection {
  /// Bitmask of `SIDE_*` bits the gradient runs towards.
  Side(u8),
  /// Angle in degrees, canonicalized at parse time.
  Angle(Number),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
  pub repeating: bool,
  pub direction: LinearDirection,
  pub stops: Vec<ColorStop>,
}

impl LinearGradient {
  pub(crate) fn parse<'i, 't>(
    input: &mut Parser<'i, 't>,
    repeating: bool,
  ) -> ValueResult<'i, LinearGradient> {
    let direction = if input.try_parse(|i| i.expect_ident_matching("to")).is_ok() {
      let mut side = 0u8;
      for _ in 0..2 {
        let Some(bit) = side_keyword(input) else {
          break;
        };
        let axis = if bit & (SIDE_LEFT | SIDE_RIGHT) != 0 {
          SIDE_LEFT | SIDE_RIGHT
        } else {
          SIDE_TOP | SIDE_BOTTOM
        };
        if side & axis != 0 {
          return error(input, "Duplicate side for gradient direction");
        }
        side |= bit;
      }
      if side == 0 {
        return error(input, "Expected a side that the gradient should go to");
      }
      input.expect_comma()?;
      LinearDirection::Side(side)
    } else if Number::can_parse_angle(input) {
      let angle = Number::parse_angle(input)?;
      input.expect_comma()?;
      LinearDirection::Angle(angle)
    } else {
      LinearDirection::Side(SIDE_BOTTOM)
    };

    let mut stops = vec![ColorStop::parse(input)?];
    while input.try_parse(|i| i.expect_comma()).is_ok() {
      stops.push(ColorStop::parse(input)?);
    }

    Ok(LinearGradient {
      repeating,
      direction,
      stops,
    })
  }

  pub(crate) fn print(&self, out: &mut impl fmt::Write) -> fmt::Result {
    if self.repeating {
      out.write_str("repeating-linear-gradient(")?;
    } else {
      out.write_str("linear-gradient(")?;
    }
    match &self.direction {
      // "to bottom" is the default and is omitted.
      LinearDirection::Side(side) if *side == SIDE_BOTTOM => {}
      LinearDirection::Side(side) => {
        out.write_str("to")?;
        if side & SIDE_TOP != 0 {
          out.write_str(" top")?;
        }
        if side & SIDE_BOTTOM != 0 {
          out.write_str(" bottom")?;
        }
        if side & SIDE_LEFT != 0 {
          out.write_str(" left")?;
        }
        if side & SIDE_RIGHT != 0 {
          out.write_str(" right")?;
        }
        out.write_str(", ")?;
      }
      LinearDirection::Angle(angle) => write!(out, "{angle}, ")?,
    }
    for (i, stop) in self.stops.iter().enumerate() {
      if i > 0 {
        out.write_str(", ")?;
      }
      stop.print(out)?;
    }
    out.write_str(")")
  }

  /// Component-wise interpolation; `None` when the shapes differ and the
  /// caller must cross-fade instead.
  pub(crate) fn transition(
    &self,
    other: &LinearGradient,
    progress: f64,
  ) -> Option<LinearGradient> {
    if self.repeating != other.repeating || self.stops.len() != other.stops.len() {
      return None;
    }
    let direction = match (&self.direction, &other.direction) {
      (LinearDirection::Side(a), LinearDirection::Side(b)) if a == b => LinearDirection::Side(*a),
      (LinearDirection::Angle(a), LinearDirection::Angle(b)) => {
        LinearDirection::Angle(a.lerp(b, progress)?)
      }
      _ => return None,
    };
    let stops = self
      .stops
      .iter()
      .zip(&other.stops)
      .map(|(a, b)| a.lerp(b, progress))
      .collect::<Option<Vec<_>>>()?;
    Some(LinearGradient {
      repeating: self.repeating,
      direction,
      stops,
    })
  }

  fn angle_degrees(&self, width: f64, height: f64) -> f64 {
    match &self.direction {
      LinearDirection::Side(side) => match *side {
        // Pure sides are special-cased to avoid rounding.
        SIDE_RIGHT => 90.0,
        SIDE_LEFT => 270.0,
        SIDE_TOP => 0.0,
        SIDE_BOTTOM => 180.0,
        side => {
          let a = if side & SIDE_TOP != 0 { -width } else { width };
          let b = if side & SIDE_LEFT != 0 { -height } else { height };
          a.atan2(b).to_degrees() + 90.0
        }
      },
      LinearDirection::Angle(angle) => angle.value,
    }
  }

  pub(crate) fn draw(&self, canvas: &mut Canvas, width: f64, height: f64) {
    let angle = self.angle_degrees(width, height);
    let (x, y) = compute_start_point(angle, width, height);
    let length = x.hypot(y);
    let (start, end) = if self.repeating {
      repeating_start_end(&self.stops, length)
    } else {
      (0.0, 1.0)
    };
    let resolved = resolve_stops(&self.stops, length, start, end);

    let solid = |canvas: &mut Canvas, color| {
      canvas.fill_rect(0.0, 0.0, width, height, color);
    };
    if end <= start || resolved.len() < 2 {
      if let Some((_, color)) = resolved.last() {
        solid(canvas, *color);
      }
      return;
    }

    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let from = Point::from_xy(
      (center_x + x * (start - 0.5)) as f32,
      (center_y + y * (start - 0.5)) as f32,
    );
    let to = Point::from_xy(
      (center_x + x * (end - 0.5)) as f32,
      (center_y + y * (end - 0.5)) as f32,
    );
    let mode = if self.repeating {
      SpreadMode::Repeat
    } else {
      SpreadMode::Pad
    };
    match tiny_skia::LinearGradient::new(
      from,
      to,
      to_gradient_stops(&resolved),
      mode,
      Transform::identity(),
    ) {
      Some(shader) => canvas.fill_rect_shader(0.0, 0.0, width, height, shader),
      // Coincident endpoints degenerate to the last stop's color.
      None => {
        if let Some((_, color)) = resolved.last() {
          solid(canvas, *color);
        }
      }
    }
  }
}

fn side_keyword(input: &mut Parser) -> Option<u8> {
  let state = input.state();
  let side = match input.next() {
    Ok(Token::Ident(name)) => match name.as_ref() {
      "left" => Some(SIDE_LEFT),
      "right" => Some(SIDE_RIGHT),
      "top" => Some(SIDE_TOP),
      "bottom" => Some(SIDE_BOTTOM),
      _ => None,
    },
    _ => None,
  };
  if side.is_none() {
    input.reset(&state);
  }
  side
}

/// The gradient-line endpoint for `angle` degrees in a `width` × `height`
/// box, relative to the center. 0 degrees points up, angles grow
/// clockwise, and corner angles land exactly on corners.
fn compute_start_point(angle_in_degrees: f64, width: f64, height: f64) -> (f64, f64) {
  let mut angle = angle_in_degrees % 360.0;
  if angle < 0.0 {
    angle += 360.0;
  }
  if angle == 0.0 {
    return (0.0, -height);
  }
  if angle == 90.0 {
    return (width, 0.0);
  }
  if angle == 180.0 {
    return (0.0, height);
  }
  if angle == 270.0 {
    return (-width, 0.0);
  }

  // The tangent is, confusingly, the x/y quotient.
  let perpendicular = (angle * std::f64::consts::PI / 180.0).tan();
  let slope = -1.0 / perpendicular;

  let width = if angle > 180.0 { -width } else { width };
  let height = if !(90.0..=270.0).contains(&angle) {
    -height
  } else {
    height
  };

  // c of the perpendicular's y = mx + c, through the flipped corner.
  let c = height - perpendicular * width;
  let x = c / (slope - perpendicular);
  let y = perpendicular * x + c;
  (x, y)
}
