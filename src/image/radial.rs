//! `radial-gradient(...)` and `repeating-radial-gradient(...)`
//!
//! The shape defaults to an ellipse, except that a single explicit size
//! implies a circle. Keyword sizes measure from the gradient center to the
//! box sides or corners; explicit circle sizes cannot be percentages
//! because a circle has no axis to resolve them against. Ellipses are
//! drawn as a circle of the horizontal radius, squashed vertically through
//! the shader transform.

use std::fmt;

use cssparser::{Parser, Token};
use tiny_skia::{Point, SpreadMode, Transform};

use crate::canvas::Canvas;
use crate::image::{repeating_start_end, resolve_stops, to_gradient_stops, ColorStop};
use crate::number::Number;
use crate::parse::{error, ValueResult};
use crate::position::Position;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RadialSize {
  ClosestSide,
  FarthestSide,
  ClosestCorner,
  FarthestCorner,
  /// Explicit radii; the second is always present for ellipses and never
  /// for circles.
  Explicit(Number, Option<Number>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
  pub repeating: bool,
  pub circle: bool,
  pub size: RadialSize,
  pub position: Position,
  pub stops: Vec<ColorStop>,
}

impl RadialGradient {
  pub(crate) fn parse<'i, 't>(
    input: &mut Parser<'i, 't>,
    repeating: bool,
  ) -> ValueResult<'i, RadialGradient> {
    let mut shape: Option<bool> = None;
    let mut keyword: Option<RadialSize> = None;
    let mut first_size: Option<Number> = None;
    let mut second_size: Option<Number> = None;

    loop {
      if shape.is_none()
        && input
          .try_parse(|i| i.expect_ident_matching("circle"))
          .is_ok()
      {
        shape = Some(true);
      } else if shape.is_none()
        && input
          .try_parse(|i| i.expect_ident_matching("ellipse"))
          .is_ok()
      {
        shape = Some(false);
      } else if keyword.is_none() && first_size.is_none() {
        if let Some(size) = size_keyword(input) {
          keyword = Some(size);
        } else if Number::can_parse_length(input) {
          first_size = Some(Number::parse_length(input)?);
          if Number::can_parse_length(input) {
            second_size = Some(Number::parse_length(input)?);
          }
        } else {
          break;
        }
      } else {
        break;
      }
    }

    let has_position = input.try_parse(|i| i.expect_ident_matching("at")).is_ok();
    let position = if has_position {
      Position::parse(input)?
    } else {
      Position::CENTER
    };
    if has_position || shape.is_some() || keyword.is_some() || first_size.is_some() {
      input.expect_comma()?;
    }

    let circle = match shape {
      Some(circle) => circle,
      // A single explicit size implies a circle.
      None => first_size.is_some() && second_size.is_none(),
    };
    if circle {
      if second_size.is_some() {
        return error(input, "Circular gradients can only have one size");
      }
      if first_size.is_some_and(|s| s.is_percent()) {
        return error(
          input,
          "Circular gradients cannot use percentages for their size",
        );
      }
    }
    let size = match (keyword, first_size) {
      (Some(keyword), _) => keyword,
      (None, Some(first)) => {
        let second = if circle {
          None
        } else {
          Some(second_size.unwrap_or(first))
        };
        RadialSize::Explicit(first, second)
      }
      (None, None) => RadialSize::FarthestCorner,
    };

    let mut stops = vec![ColorStop::parse(input)?];
    while input.try_parse(|i| i.expect_comma()).is_ok() {
      stops.push(ColorStop::parse(input)?);
    }

    Ok(RadialGradient {
      repeating,
      circle,
      size,
      position,
      stops,
    })
  }

  pub(crate) fn print(&self, out: &mut impl fmt::Write) -> fmt::Result {
    if self.repeating {
      out.write_str("repeating-radial-gradient(")?;
    } else {
      out.write_str("radial-gradient(")?;
    }
    if self.circle {
      out.write_str("circle ")?;
    }
    match &self.size {
      RadialSize::ClosestSide => out.write_str("closest-side")?,
      RadialSize::FarthestSide => out.write_str("farthest-side")?,
      RadialSize::ClosestCorner => out.write_str("closest-corner")?,
      RadialSize::FarthestCorner => out.write_str("farthest-corner")?,
      RadialSize::Explicit(first, second) => {
        write!(out, "{first}")?;
        if let Some(second) = second {
          write!(out, " {second}")?;
        }
      }
    }
    write!(out, " at {}, ", self.position)?;
    for (i, stop) in self.stops.iter().enumerate() {
      if i > 0 {
        out.write_str(", ")?;
      }
      stop.print(out)?;
    }
    out.write_str(")")
  }

  /// Component-wise interpolation; `None` when the shapes differ.
  pub(crate) fn transition(
    &self,
    other: &RadialGradient,
    progress: f64,
  ) -> Option<RadialGradient> {
    if self.repeating != other.repeating
      || self.circle != other.circle
      || self.stops.len() != other.stops.len()
    {
      return None;
    }
    let size = match (&self.size, &other.size) {
      (RadialSize::Explicit(a0, a1), RadialSize::Explicit(b0, b1)) => {
        let second = match (a1, b1) {
          (None, None) => None,
          (Some(a1), Some(b1)) => Some(a1.lerp(b1, progress)?),
          _ => return None,
        };
        RadialSize::Explicit(a0.lerp(b0, progress)?, second)
      }
      (a, b) if a == b => *a,
      _ => return None,
    };
    let stops = self
      .stops
      .iter()
      .zip(&other.stops)
      .map(|(a, b)| a.lerp(b, progress))
      .collect::<Option<Vec<_>>>()?;
    Some(RadialGradient {
      repeating: self.repeating,
      circle: self.circle,
      size,
      position: self.position.lerp(&other.position, progress)?,
      stops,
    })
  }

  /// Horizontal radius and vertical squash factor for a gradient centered
  /// at `(x, y)` in a `width` × `height` box.
  fn radius_and_yscale(&self, x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
    let (radius, ry) = match &self.size {
      RadialSize::Explicit(first, second) => {
        let radius = first.resolve(width);
        let ry = match second {
          Some(second) => second.resolve(height),
          None => radius,
        };
        (radius, ry)
      }
      RadialSize::ClosestSide => {
        if self.circle {
          let r = x.min(width - x).min(y.min(height - y));
          (r, r)
        } else {
          (x.min(width - x), y.min(height - y))
        }
      }
      RadialSize::FarthestSide => {
        if self.circle {
          let r = x.max(width - x).max(y.max(height - y));
          (r, r)
        } else {
          (x.max(width - x), y.max(height - y))
        }
      }
      RadialSize::ClosestCorner => {
        if self.circle {
          let r = x.min(width - x).hypot(y.min(height - y));
          (r, r)
        } else {
          // Side distances set the aspect; sqrt(2) stretches the ellipse
          // through the nearest corner.
          let rx = x.min(width - x);
          let ry = y.min(height - y);
          (rx * std::f64::consts::SQRT_2, ry * std::f64::consts::SQRT_2)
        }
      }
      RadialSize::FarthestCorner => {
        if self.circle {
          let r = x.max(width - x).hypot(y.max(height - y));
          (r, r)
        } else {
          let rx = x.max(width - x);
          let ry = y.max(height - y);
          (rx * std::f64::consts::SQRT_2, ry * std::f64::consts::SQRT_2)
        }
      }
    };
    let yscale = if radius > 0.0 { ry / radius } else { 1.0 };
    (radius.max(1.0), yscale)
  }

  /// Fills the box with the gradient. The radial shader has no inner
  /// radius, so repeating gradients tile the `[0, end]` window: offsets
  /// below the first explicit stop pad with its color instead of
  /// repeating inward. Gradients whose first stop sits at 0 render
  /// exactly.
  pub(crate) fn draw(&self, canvas: &mut Canvas, width: f64, height: f64) {
    let x = self.position.resolve_x(width);
    let y = self.position.resolve_y(height);
    let (radius, yscale) = self.radius_and_yscale(x, y, width, height);

    let (start, end) = if self.repeating {
      repeating_start_end(&self.stops, radius)
    } else {
      (0.0, 1.0)
    };
    let end = end.max(start);
    // Stops are normalized over [0, end] so the shader radius can carry
    // the repeat length; positions below the first offset pad.
    let resolved = resolve_stops(&self.stops, radius, 0.0, end);

    let solid = |canvas: &mut Canvas, color| {
      canvas.fill_rect(0.0, 0.0, width, height, color);
    };
    if end <= 0.0 || resolved.len() < 2 || yscale <= 0.0 {
      if let Some((_, color)) = resolved.last() {
        solid(canvas, *color);
      } else if let Some(stop) = self.stops.last() {
        solid(canvas, stop.color);
      }
      return;
    }

    let mode = if self.repeating {
      SpreadMode::Repeat
    } else {
      SpreadMode::Pad
    };
    let center = Point::from_xy(0.0, 0.0);
    let transform =
      Transform::from_translate(x as f32, y as f32).pre_scale(1.0, yscale as f32);
    match tiny_skia::RadialGradient::new(
      center,
      center,
      (radius * end) as f32,
      to_gradient_stops(&resolved),
      mode,
      transform,
    ) {
      Some(shader) => canvas.fill_rect_shader(0.0, 0.0, width, height, shader),
      None => {
        if let Some((_, color)) = resolved.last() {
          solid(canvas, *color);
        }
      }
    }
  }
}

fn size_keyword(input: &mut Parser) -> Option<RadialSize> {
  let state = input.state();
  let size = match input.next() {
    Ok(Token::Ident(name)) => match name.as_ref() {
      "closest-side" => Some(RadialSize::ClosestSide),
      "farthest-side" => Some(RadialSize::FarthestSide),
      "closest-corner" => Some(RadialSize::ClosestCorner),
      "farthest-corner" => Some(RadialSize::FarthestCorner),
      _ => None,
    },
    _ => None,
  };
  if size.is_none() {
    input.reset(&state);
  }
  size
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::color::Rgba;

  fn gradient(css: &str) -> RadialGradient {
    match crate::image::Image::parse_str(css).unwrap() {
      crate::image::Image::Radial(radial) => radial,
      other => panic!("expected a radial gradient, got {other:?}"),
    }
  }

  #[test]
  fn test_single_size_implies_circle() {
    let g = gradient("radial-gradient(10px, red, blue)");
    assert!(g.circle);
    assert_eq!(g.size, RadialSize::Explicit(Number::px(10.0), None));
  }

  #[test]
  fn test_two_sizes_imply_ellipse() {
    let g = gradient("radial-gradient(10px 20px, red, blue)");
    assert!(!g.circle);
    assert_eq!(
      g.size,
      RadialSize::Explicit(Number::px(10.0), Some(Number::px(20.0)))
    );
  }

  #[test]
  fn test_default_is_ellipse_at_center() {
    let g = gradient("radial-gradient(red, blue)");
    assert!(!g.circle);
    assert_eq!(g.size, RadialSize::FarthestCorner);
    assert_eq!(g.position, Position::CENTER);
    assert_eq!(g.stops[0].color, Rgba::RED);
  }

  #[test]
  fn test_circle_rejects_percentage_size() {
    assert!(crate::image::Image::parse_str("radial-gradient(circle 50%, red, blue)").is_err());
    assert!(crate::image::Image::parse_str("radial-gradient(50%, red, blue)").is_err());
  }

  #[test]
  fn test_keyword_sizes() {
    let g = gradient("radial-gradient(circle closest-side at left, red, blue)");
    assert!(g.circle);
    assert_eq!(g.size, RadialSize::ClosestSide);
    assert_eq!(g.position.resolve_x(100.0), 0.0);
    assert_eq!(g.position.resolve_y(100.0), 50.0);
  }

  #[test]
  fn test_farthest_corner_radius() {
    let g = gradient("radial-gradient(circle, red, blue)");
    let (radius, yscale) = g.radius_and_yscale(50.0, 50.0, 100.0, 100.0);
    assert!((radius - 50.0 * std::f64::consts::SQRT_2).abs() < 1e-9);
    assert_eq!(yscale, 1.0);
  }

  #[test]
  fn test_ellipse_side_yscale() {
    let g = gradient("radial-gradient(ellipse closest-side, red, blue)");
    let (radius, yscale) = g.radius_and_yscale(50.0, 25.0, 100.0, 50.0);
    assert_eq!(radius, 50.0);
    assert_eq!(yscale, 0.5);
  }
}
