//! `image(...)` fallback lists
//!
//! A list of candidate images with an optional trailing color. `compute`
//! resolves every candidate and remembers the first one that produced a
//! usable (non-empty) result; drawing uses it, falling back to the color,
//! and as a last resort to the opaque red broken-image marker.

use std::fmt;
use std::sync::Arc;

use cssparser::Parser;

use crate::canvas::Canvas;
use crate::color::Rgba;
use crate::image::Image;
use crate::parse::{error, ValueResult};
use crate::snapshot::StyleSnapshot;

#[derive(Debug, Clone)]
pub struct FallbackImage {
  pub children: Vec<Arc<Image>>,
  pub color: Option<Rgba>,
  /// Index of the first usable child after compute, -1 before (or when
  /// every candidate failed).
  pub used: i32,
}

impl FallbackImage {
  pub(crate) fn parse<'i, 't>(input: &mut Parser<'i, 't>) -> ValueResult<'i, FallbackImage> {
    let mut children = Vec::new();
    let mut color = None;
    loop {
      if color.is_some() {
        return error(input, "The color must be the last image() argument");
      }
      if Image::can_parse(input) {
        children.push(Arc::new(Image::parse(input)?));
      } else if Rgba::can_parse(input) {
        color = Some(Rgba::parse(input)?);
      } else {
        return error(input, "Expected an image or a color");
      }
      if input.is_exhausted() {
        break;
      }
      input.expect_comma()?;
    }
    Ok(FallbackImage {
      children,
      color,
      used: -1,
    })
  }

  pub(crate) fn print(&self, out: &mut impl fmt::Write) -> fmt::Result {
    out.write_str("image(")?;
    let mut first = true;
    for child in &self.children {
      if !first {
        out.write_str(", ")?;
      }
      child.print(out)?;
      first = false;
    }
    if let Some(color) = &self.color {
      if !first {
        out.write_str(", ")?;
      }
      color.print(out)?;
    }
    out.write_str(")")
  }

  pub(crate) fn compute(&self, property_id: u32, snapshot: &dyn StyleSnapshot) -> FallbackImage {
    let children: Vec<Arc<Image>> = self
      .children
      .iter()
      .map(|child| Arc::new(child.compute(property_id, snapshot)))
      .collect();
    // A load failure computes to the empty surface; skip those.
    let used = children
      .iter()
      .position(|child| !matches!(&**child, Image::Surface(s) if s.surface().is_empty()))
      .map_or(-1, |i| i as i32);
    FallbackImage {
      children,
      color: self.color,
      used,
    }
  }

  fn used_child(&self) -> Option<&Image> {
    if self.used >= 0 {
      self.children.get(self.used as usize).map(|c| &**c)
    } else {
      None
    }
  }

  pub fn equal(&self, other: &FallbackImage) -> bool {
    self.used == other.used
      && self.color == other.color
      && self.children.len() == other.children.len()
      && self
        .children
        .iter()
        .zip(&other.children)
        .all(|(a, b)| a.equal(b))
  }

  pub fn width(&self) -> u32 {
    self.used_child().map_or(0, Image::width)
  }

  pub fn height(&self) -> u32 {
    self.used_child().map_or(0, Image::height)
  }

  pub fn aspect_ratio(&self) -> f64 {
    self.used_child().map_or(0.0, Image::aspect_ratio)
  }

  pub(crate) fn draw(&self, canvas: &mut Canvas, width: f64, height: f64) {
    if let Some(child) = self.used_child() {
      child.draw(canvas, width, height);
    } else if let Some(color) = self.color {
      canvas.fill_rect(0.0, 0.0, width, height, color);
    } else {
      canvas.fill_rect(0.0, 0.0, width, height, Rgba::RED);
    }
  }
}
