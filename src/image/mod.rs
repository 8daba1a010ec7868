//! Polymorphic CSS image values
//!
//! [`Image`] is the tagged union behind every CSS property that accepts an
//! image: plain `url(...)` references, themed icons, recolorable symbolic
//! assets, scale sets, gradients (modern and legacy), cross-fades, the
//! `image(...)` fallback list, and already-rasterized surfaces. The variant
//! modules own their grammar, printing, computation and drawing; this
//! module owns the dispatch and the operations every variant shares.

pub mod cross_fade;
pub mod fallback;
pub mod icon_theme;
pub mod legacy;
pub mod linear;
pub mod radial;
pub mod recolor;
pub mod scaled;
pub mod sizing;
pub mod surface;
pub mod url;

use std::fmt;

use cssparser::{Parser, ParserInput, Token};
use tiny_skia::{GradientStop, Pixmap};

use crate::canvas::Canvas;
use crate::color::Rgba;
use crate::number::Number;
use crate::parse::{error, parse_entirely, ValueResult};
use crate::snapshot::StyleSnapshot;
use crate::surface::Surface;

pub use cross_fade::CrossFade;
pub use fallback::FallbackImage;
pub use icon_theme::IconThemeImage;
pub use legacy::LegacyGradient;
pub use linear::LinearGradient;
pub use radial::RadialGradient;
pub use recolor::{PaletteValue, RecolorImage};
pub use scaled::ScaledImage;
pub use surface::SurfaceImage;
pub use url::UrlImage;

/// Every function name the image grammar recognizes. Matching is exact and
/// case-sensitive.
const FUNCTIONS: &[&str] = &[
  "url",
  "linear-gradient",
  "repeating-linear-gradient",
  "radial-gradient",
  "repeating-radial-gradient",
  "cross-fade",
  "image",
  "-ctk-gradient",
  "-ctk-icontheme",
  "-ctk-recolor",
  "-ctk-scaled",
  "-ctk-win32-theme-part",
];

/// A CSS image value.
#[derive(Debug, Clone)]
pub enum Image {
  /// `url(...)`
  Url(UrlImage),
  /// `-ctk-icontheme(...)`
  IconTheme(IconThemeImage),
  /// `-ctk-recolor(...)`
  Recolor(RecolorImage),
  /// `-ctk-scaled(...)`
  Scaled(ScaledImage),
  /// `linear-gradient(...)` / `repeating-linear-gradient(...)`
  Linear(LinearGradient),
  /// `radial-gradient(...)` / `repeating-radial-gradient(...)`
  Radial(RadialGradient),
  /// Legacy `-ctk-gradient(...)`
  Gradient(LegacyGradient),
  /// `cross-fade(...)`
  CrossFade(CrossFade),
  /// `image(...)`
  Fallback(FallbackImage),
  /// A rasterized surface, produced by `compute` for loaded resources.
  Surface(SurfaceImage),
}

impl Image {
  /// Parses an image value from a standalone string, requiring the whole
  /// input to be consumed. Input that does not start an image production
  /// at all yields [`ParseError::NotAnImage`](crate::error::ParseError),
  /// so a cascade can fall through to other value types.
  pub fn parse_str(css: &str) -> Result<Image, crate::error::ParseError> {
    if !Image::can_parse_str(css) {
      return Err(crate::error::ParseError::NotAnImage);
    }
    parse_entirely(css, Image::parse)
  }

  /// Whether `css` starts an image production. This only inspects the
  /// first token; it says nothing about the arguments being valid.
  pub fn can_parse_str(css: &str) -> bool {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    Image::can_parse(&mut parser)
  }

  /// Side-effect-free lookahead: does an image production start here?
  /// The parser is restored to its starting position.
  pub fn can_parse(input: &mut Parser) -> bool {
    let state = input.state();
    let ok = match input.next() {
      Ok(Token::UnquotedUrl(_)) => true,
      Ok(Token::Function(name)) => FUNCTIONS.contains(&name.as_ref()),
      _ => false,
    };
    input.reset(&state);
    ok
  }

  pub(crate) fn parse<'i, 't>(input: &mut Parser<'i, 't>) -> ValueResult<'i, Image> {
    let location = input.current_source_location();
    let token = input.next()?.clone();
    match token {
      Token::UnquotedUrl(ref raw) => Ok(Image::Url(UrlImage::new(raw.as_ref()))),
      Token::Function(ref name) => {
        let name = name.clone();
        match name.as_ref() {
          "url" => input.parse_nested_block(|args| {
            let url = args.expect_string()?.as_ref().to_string();
            Ok(Image::Url(UrlImage::new(&url)))
          }),
          "linear-gradient" => input
            .parse_nested_block(|args| LinearGradient::parse(args, false))
            .map(Image::Linear),
          "repeating-linear-gradient" => input
            .parse_nested_block(|args| LinearGradient::parse(args, true))
            .map(Image::Linear),
          "radial-gradient" => input
            .parse_nested_block(|args| RadialGradient::parse(args, false))
            .map(Image::Radial),
          "repeating-radial-gradient" => input
            .parse_nested_block(|args| RadialGradient::parse(args, true))
            .map(Image::Radial),
          "cross-fade" => input
            .parse_nested_block(CrossFade::parse)
            .map(Image::CrossFade),
          "image" => input
            .parse_nested_block(FallbackImage::parse)
            .map(Image::Fallback),
          "-ctk-gradient" => input
            .parse_nested_block(LegacyGradient::parse)
            .map(Image::Gradient),
          "-ctk-icontheme" => input
            .parse_nested_block(IconThemeImage::parse)
            .map(Image::IconTheme),
          "-ctk-recolor" => input
            .parse_nested_block(RecolorImage::parse)
            .map(Image::Recolor),
          "-ctk-scaled" => input
            .parse_nested_block(ScaledImage::parse)
            .map(Image::Scaled),
          "-ctk-win32-theme-part" => error(
            input,
            "-ctk-win32-theme-part is not supported on this platform",
          ),
          _ => Err(location.new_custom_error(format!("Unknown image function '{name}'"))),
        }
      }
      ref t => Err(location.new_custom_error(format!("Expected an image value, got {t:?}"))),
    }
  }

  /// Writes the canonical CSS representation. Printed values reparse to
  /// equal values.
  pub fn print(&self, out: &mut impl fmt::Write) -> fmt::Result {
    match self {
      Image::Url(v) => v.print(out),
      Image::IconTheme(v) => v.print(out),
      Image::Recolor(v) => v.print(out),
      Image::Scaled(v) => v.print(out),
      Image::Linear(v) => v.print(out),
      Image::Radial(v) => v.print(out),
      Image::Gradient(v) => v.print(out),
      Image::CrossFade(v) => v.print(out),
      Image::Fallback(v) => v.print(out),
      Image::Surface(_) => Ok(()),
    }
  }

  pub fn to_css_string(&self) -> String {
    self.to_string()
  }

  /// Resolves the value against a style snapshot. Pure: returns a new
  /// value and never mutates `self`. Load failures are reported through
  /// the snapshot and collapse into empty surfaces.
  pub fn compute(&self, property_id: u32, snapshot: &dyn StyleSnapshot) -> Image {
    match self {
      Image::Url(v) => v.compute(snapshot),
      Image::IconTheme(v) => Image::IconTheme(v.compute(snapshot)),
      Image::Recolor(v) => v.compute(snapshot),
      Image::Scaled(v) => Image::Scaled(v.compute(property_id, snapshot)),
      // Gradient colors are concrete at parse time, so computing a
      // gradient is a copy.
      Image::Linear(v) => Image::Linear(v.clone()),
      Image::Radial(v) => Image::Radial(v.clone()),
      Image::Gradient(v) => Image::Gradient(v.clone()),
      Image::CrossFade(v) => Image::CrossFade(v.compute(property_id, snapshot)),
      Image::Fallback(v) => Image::Fallback(v.compute(property_id, snapshot)),
      Image::Surface(v) => Image::Surface(v.clone()),
    }
  }

  /// Structural equality. Values of different variants are never equal.
  pub fn equal(&self, other: &Image) -> bool {
    match (self, other) {
      (Image::Url(a), Image::Url(b)) => a.url == b.url,
      // Icon-theme images compare by name: the icon theme itself is
      // ambient state, not part of the value.
      (Image::IconTheme(a), Image::IconTheme(b)) => a.name == b.name,
      (Image::Recolor(a), Image::Recolor(b)) => a == b,
      (Image::Scaled(a), Image::Scaled(b)) => a.equal(b),
      (Image::Linear(a), Image::Linear(b)) => a == b,
      (Image::Radial(a), Image::Radial(b)) => a == b,
      (Image::Gradient(a), Image::Gradient(b)) => a == b,
      (Image::CrossFade(a), Image::CrossFade(b)) => a.equal(b),
      (Image::Fallback(a), Image::Fallback(b)) => a.equal(b),
      (Image::Surface(a), Image::Surface(b)) => a.equal(b),
      _ => false,
    }
  }

  /// Intrinsic width in pixels, 0 when the value has none.
  pub fn width(&self) -> u32 {
    match self {
      Image::Scaled(v) => v.width(),
      Image::Fallback(v) => v.width(),
      Image::Surface(v) => v.width(),
      _ => 0,
    }
  }

  /// Intrinsic height in pixels, 0 when the value has none.
  pub fn height(&self) -> u32 {
    match self {
      Image::Scaled(v) => v.height(),
      Image::Fallback(v) => v.height(),
      Image::Surface(v) => v.height(),
      _ => 0,
    }
  }

  /// Intrinsic aspect ratio (width / height), 0 when undefined.
  pub fn aspect_ratio(&self) -> f64 {
    match self {
      // Icons are nominally square whatever raster comes back.
      Image::IconTheme(_) => 1.0,
      Image::CrossFade(_) => 0.0,
      Image::Scaled(v) => v.aspect_ratio(),
      Image::Fallback(v) => v.aspect_ratio(),
      _ => {
        let (w, h) = (self.width(), self.height());
        if w > 0 && h > 0 {
          w as f64 / h as f64
        } else {
          0.0
        }
      }
    }
  }

  /// Resolves the concrete size per the CSS default sizing algorithm.
  /// `specified_*` of 0 means "auto"; the defaults must be positive.
  pub fn concrete_size(
    &self,
    specified_width: f64,
    specified_height: f64,
    default_width: f64,
    default_height: f64,
  ) -> (f64, f64) {
    sizing::concrete_size(self, specified_width, specified_height, default_width, default_height)
  }

  /// Interpolates from `self` towards `end` for an animated property.
  /// Returns `None` when no sensible interpolation exists.
  pub fn transition(
    &self,
    end: Option<&Image>,
    property_id: u32,
    progress: f64,
  ) -> Option<Image> {
    let _ = property_id;
    if progress <= 0.0 {
      return Some(self.clone());
    }
    if progress >= 1.0 {
      return end.cloned();
    }
    let Some(end) = end else {
      return Some(Image::CrossFade(CrossFade::for_transition(
        self.clone(),
        None,
        progress,
      )));
    };
    if self.equal(end) {
      return Some(self.clone());
    }
    match (self, end) {
      (Image::Linear(a), Image::Linear(b)) => {
        if let Some(result) = a.transition(b, progress) {
          return Some(Image::Linear(result));
        }
      }
      (Image::Radial(a), Image::Radial(b)) => {
        if let Some(result) = a.transition(b, progress) {
          return Some(Image::Radial(result));
        }
      }
      _ => {}
    }
    Some(Image::CrossFade(CrossFade::for_transition(
      self.clone(),
      Some(end.clone()),
      progress,
    )))
  }

  /// Draws the value into a `width` × `height` box at the canvas origin.
  /// The canvas state is saved and restored around the call.
  ///
  /// # Panics
  ///
  /// Panics when either dimension is not positive; callers resolve sizes
  /// through [`Image::concrete_size`] first.
  pub fn draw(&self, canvas: &mut Canvas, width: f64, height: f64) {
    assert!(
      width > 0.0 && height > 0.0,
      "image draw requires positive dimensions, got {width} x {height}"
    );
    canvas.save();
    match self {
      // Not rasterizable before compute.
      Image::Url(_) | Image::Recolor(_) => {}
      Image::IconTheme(v) => v.draw(canvas, width, height),
      Image::Scaled(v) => v.draw(canvas, width, height),
      Image::Linear(v) => v.draw(canvas, width, height),
      Image::Radial(v) => v.draw(canvas, width, height),
      Image::Gradient(v) => v.draw(canvas, width, height),
      Image::CrossFade(v) => v.draw(canvas, width, height),
      Image::Fallback(v) => v.draw(canvas, width, height),
      Image::Surface(v) => v.draw(canvas, width, height),
    }
    canvas.restore();
  }

  /// Rasterizes the value into a fresh surface of the given size.
  ///
  /// # Panics
  ///
  /// Panics when either dimension is zero.
  pub fn materialize(&self, width: u32, height: u32) -> Surface {
    assert!(
      width > 0 && height > 0,
      "materialize requires positive dimensions, got {width} x {height}"
    );
    let Some(mut pixmap) = Pixmap::new(width, height) else {
      return Surface::empty();
    };
    {
      let mut canvas = Canvas::new(&mut pixmap);
      self.draw(&mut canvas, width as f64, height as f64);
    }
    Surface::from_pixmap(pixmap)
  }
}

impl fmt::Display for Image {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.print(f)
  }
}

/// One gradient color stop: a color with an optional explicit offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
  pub color: Rgba,
  pub offset: Option<Number>,
}

impl ColorStop {
  pub(crate) fn parse<'i, 't>(input: &mut Parser<'i, 't>) -> ValueResult<'i, ColorStop> {
    let color = Rgba::parse(input)?;
    let offset = if Number::can_parse_length(input) {
      Some(Number::parse_length(input)?)
    } else {
      None
    };
    Ok(ColorStop { color, offset })
  }

  pub(crate) fn print(&self, out: &mut impl fmt::Write) -> fmt::Result {
    self.color.print(out)?;
    if let Some(offset) = &self.offset {
      write!(out, " {offset}")?;
    }
    Ok(())
  }

  /// Component-wise interpolation. Fails when one stop has an explicit
  /// offset and the other does not, or the offsets have different units.
  pub(crate) fn lerp(&self, other: &ColorStop, progress: f64) -> Option<ColorStop> {
    let offset = match (&self.offset, &other.offset) {
      (None, None) => None,
      (Some(a), Some(b)) => Some(a.lerp(b, progress)?),
      _ => return None,
    };
    Some(ColorStop {
      color: self.color.lerp(other.color, progress as f32),
      offset,
    })
  }
}

/// The `[start, end]` offset window a repeating gradient tiles, as
/// fractions of `length`. Non-repeating gradients use `[0, 1]`.
pub(crate) fn repeating_start_end(stops: &[ColorStop], length: f64) -> (f64, f64) {
  if stops.len() < 2 {
    return (0.0, 1.0);
  }
  let start = stops[0].offset.map_or(0.0, |o| o.resolve(length) / length);
  let mut end = start;
  for stop in stops {
    if let Some(offset) = stop.offset {
      end = end.max(offset.resolve(length) / length);
    }
  }
  if stops[stops.len() - 1].offset.is_none() {
    end = end.max(1.0);
  }
  (start, end)
}

/// Normalizes color stops into `(position, color)` pairs over the
/// `[start, end]` window. An offset-less first stop sits at 0, an
/// offset-less last stop at 1, interior offset-less stops are distributed
/// evenly between their resolved neighbors, and explicit positions are
/// clamped so the sequence never decreases.
pub(crate) fn resolve_stops(
  stops: &[ColorStop],
  length: f64,
  start: f64,
  end: f64,
) -> Vec<(f32, Rgba)> {
  let span = end - start;
  let mut resolved = Vec::with_capacity(stops.len());
  let mut offset = start;
  let mut last: i32 = -1;
  for (i, stop) in stops.iter().enumerate() {
    let pos = match stop.offset {
      Some(o) => o.resolve(length) / length,
      None if i == 0 => 0.0,
      None if i + 1 == stops.len() => 1.0,
      None => continue,
    };
    let pos = pos.max(offset);
    let step = (pos - offset) / (i as i64 - last as i64) as f64;
    for j in (last + 1)..=(i as i32) {
      offset += step;
      let t = if span == 0.0 {
        0.0
      } else {
        (offset - start) / span
      };
      resolved.push((t.clamp(0.0, 1.0) as f32, stops[j as usize].color));
    }
    offset = pos;
    last = i as i32;
  }
  resolved
}

/// Converts resolved stops into tiny-skia gradient stops.
pub(crate) fn to_gradient_stops(resolved: &[(f32, Rgba)]) -> Vec<GradientStop> {
  resolved
    .iter()
    .map(|(position, color)| GradientStop::new(*position, color.to_skia()))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn stops(specs: &[(Rgba, Option<Number>)]) -> Vec<ColorStop> {
    specs
      .iter()
      .map(|(color, offset)| ColorStop {
        color: *color,
        offset: *offset,
      })
      .collect()
  }

  #[test]
  fn test_can_parse_leaves_tokens_in_place() {
    let mut input = ParserInput::new("linear-gradient(red, blue)");
    let mut parser = Parser::new(&mut input);
    assert!(Image::can_parse(&mut parser));
    // The lookahead consumed nothing, so parsing still succeeds.
    assert!(Image::parse(&mut parser).is_ok());

    let mut input = ParserInput::new("10px");
    let mut parser = Parser::new(&mut input);
    assert!(!Image::can_parse(&mut parser));
  }

  #[test]
  fn test_offsetless_stops_distribute_evenly() {
    let stops = stops(&[
      (Rgba::RED, None),
      (Rgba::WHITE, None),
      (Rgba::BLUE, None),
    ]);
    let resolved = resolve_stops(&stops, 100.0, 0.0, 1.0);
    let positions: Vec<f32> = resolved.iter().map(|(p, _)| *p).collect();
    assert_eq!(positions, vec![0.0, 0.5, 1.0]);
  }

  #[test]
  fn test_explicit_positions_clamp_non_decreasing() {
    let stops = stops(&[
      (Rgba::RED, Some(Number::percent(60.0))),
      (Rgba::BLUE, Some(Number::percent(20.0))),
    ]);
    let resolved = resolve_stops(&stops, 100.0, 0.0, 1.0);
    let positions: Vec<f32> = resolved.iter().map(|(p, _)| *p).collect();
    assert_eq!(positions, vec![0.6, 0.6]);
  }

  #[test]
  fn test_repeating_window_from_outermost_offsets() {
    let with_offsets = stops(&[
      (Rgba::RED, Some(Number::percent(25.0))),
      (Rgba::BLUE, Some(Number::percent(75.0))),
    ]);
    assert_eq!(repeating_start_end(&with_offsets, 100.0), (0.25, 0.75));

    // An offset-less last stop extends the window to cover [.., 1].
    let open_ended = stops(&[(Rgba::RED, Some(Number::percent(25.0))), (Rgba::BLUE, None)]);
    assert_eq!(repeating_start_end(&open_ended, 100.0), (0.25, 1.0));
  }
}
