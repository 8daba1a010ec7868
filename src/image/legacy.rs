//! Legacy `-ctk-gradient(...)` values
//!
//! The pre-CSS gradient syntax: explicit start and end points in unit-box
//! coordinates (0 to 1, with `left`/`right`/`top`/`bottom`/`center`
//! keywords) and explicit stop positions via `from()`, `to()` and
//! `color-stop()`. Radial gradients carry a start and end radius, also in
//! unit-box terms. Drawing stretches the unit box over the target area.

use std::fmt;

use cssparser::{Parser, Token};
use tiny_skia::{Point, SpreadMode, Transform};

use crate::canvas::Canvas;
use crate::color::Rgba;
use crate::parse::{error, ValueResult};

#[derive(Debug, Clone, PartialEq)]
pub struct LegacyGradient {
  pub radial: bool,
  pub start: (f64, f64),
  pub end: (f64, f64),
  pub start_radius: f64,
  pub end_radius: f64,
  /// `(position, color)` with positions in the unit range.
  pub stops: Vec<(f64, Rgba)>,
}

impl LegacyGradient {
  pub(crate) fn parse<'i, 't>(input: &mut Parser<'i, 't>) -> ValueResult<'i, LegacyGradient> {
    let kind = input.expect_ident()?.clone();
    let radial = match kind.as_ref() {
      "linear" => false,
      "radial" => true,
      _ => return error(input, format!("Unknown gradient kind '{kind}'")),
    };

    input.expect_comma()?;
    let start = parse_coords(input)?;
    input.expect_comma()?;
    let (start_radius, end, end_radius) = if radial {
      let start_radius = input.expect_number()? as f64;
      input.expect_comma()?;
      let end = parse_coords(input)?;
      input.expect_comma()?;
      let end_radius = input.expect_number()? as f64;
      (start_radius, end, end_radius)
    } else {
      (0.0, parse_coords(input)?, 0.0)
    };

    let mut stops = Vec::new();
    while input.try_parse(|i| i.expect_comma()).is_ok() {
      stops.push(parse_stop(input)?);
    }

    Ok(LegacyGradient {
      radial,
      start,
      end,
      start_radius,
      end_radius,
      stops,
    })
  }

  pub(crate) fn print(&self, out: &mut impl fmt::Write) -> fmt::Result {
    out.write_str("-ctk-gradient(")?;
    if self.radial {
      write!(
        out,
        "radial, {} {}, {}, {} {}, {}",
        self.start.0, self.start.1, self.start_radius, self.end.0, self.end.1, self.end_radius
      )?;
    } else {
      write!(
        out,
        "linear, {} {}, {} {}",
        self.start.0, self.start.1, self.end.0, self.end.1
      )?;
    }
    for (position, color) in &self.stops {
      out.write_str(", ")?;
      if *position == 0.0 {
        out.write_str("from(")?;
        color.print(out)?;
      } else if *position == 1.0 {
        out.write_str("to(")?;
        color.print(out)?;
      } else {
        write!(out, "color-stop({position}, ")?;
        color.print(out)?;
      }
      out.write_str(")")?;
    }
    out.write_str(")")
  }

  pub(crate) fn draw(&self, canvas: &mut Canvas, width: f64, height: f64) {
    // Clamp stop positions into the unit range, never decreasing.
    let mut resolved: Vec<(f32, Rgba)> = Vec::with_capacity(self.stops.len());
    let mut offset: f64 = 0.0;
    for (position, color) in &self.stops {
      let position = position.clamp(0.0, 1.0).max(offset);
      offset = position;
      resolved.push((position as f32, *color));
    }

    let solid = |canvas: &mut Canvas, color| {
      canvas.fill_rect(0.0, 0.0, width, height, color);
    };
    if resolved.len() < 2 {
      if let Some((_, color)) = resolved.last() {
        solid(canvas, *color);
      }
      return;
    }

    // Unit-box coordinates stretched over the target area.
    let transform = Transform::from_scale(width as f32, height as f32);
    let stops = crate::image::to_gradient_stops(&resolved);
    let shader = if self.radial {
      tiny_skia::RadialGradient::new(
        Point::from_xy(self.start.0 as f32, self.start.1 as f32),
        Point::from_xy(self.end.0 as f32, self.end.1 as f32),
        self.end_radius.max(f64::EPSILON) as f32,
        stops,
        SpreadMode::Pad,
        transform,
      )
    } else {
      tiny_skia::LinearGradient::new(
        Point::from_xy(self.start.0 as f32, self.start.1 as f32),
        Point::from_xy(self.end.0 as f32, self.end.1 as f32),
        stops,
        SpreadMode::Pad,
        transform,
      )
    };
    match shader {
      Some(shader) => canvas.fill_rect_shader(0.0, 0.0, width, height, shader),
      None => {
        if let Some((_, color)) = resolved.last() {
          solid(canvas, *color);
        }
      }
    }
  }
}

fn parse_coords<'i, 't>(input: &mut Parser<'i, 't>) -> ValueResult<'i, (f64, f64)> {
  let x = parse_coord(input, "left", "right")?;
  let y = parse_coord(input, "top", "bottom")?;
  Ok((x, y))
}

fn parse_coord<'i, 't>(
  input: &mut Parser<'i, 't>,
  low: &str,
  high: &str,
) -> ValueResult<'i, f64> {
  match input.next()?.clone() {
    Token::Ident(ref name) => {
      if name.as_ref() == low {
        Ok(0.0)
      } else if name.as_ref() == high {
        Ok(1.0)
      } else if name.as_ref() == "center" {
        Ok(0.5)
      } else {
        error(input, format!("Invalid gradient coordinate '{name}'"))
      }
    }
    Token::Number { value, .. } => Ok(value as f64),
    ref t => error(input, format!("Expected a gradient coordinate, got {t:?}")),
  }
}

fn parse_stop<'i, 't>(input: &mut Parser<'i, 't>) -> ValueResult<'i, (f64, Rgba)> {
  let name = match input.next()?.clone() {
    Token::Function(name) => name,
    ref t => return error(input, format!("Expected a color stop, got {t:?}")),
  };
  match name.as_ref() {
    "from" => input.parse_nested_block(|args| Ok((0.0, Rgba::parse(args)?))),
    "to" => input.parse_nested_block(|args| Ok((1.0, Rgba::parse(args)?))),
    "color-stop" => input.parse_nested_block(|args| {
      let position = args.expect_number()? as f64;
      args.expect_comma()?;
      let color = Rgba::parse(args)?;
      Ok((position, color))
    }),
    _ => error(input, format!("Unknown color stop function '{name}'")),
  }
}
