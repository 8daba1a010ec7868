//! `-ctk-scaled(...)` image values
//!
//! A list of per-density variants of the same image, index `n` drawn on
//! displays with scale `n + 1`. Only the selected child is computed; the
//! others stay untouched behind shared pointers, so an unused 2x variant
//! is never loaded.

use std::fmt;
use std::sync::Arc;

use cssparser::Parser;

use crate::canvas::Canvas;
use crate::image::Image;
use crate::parse::ValueResult;
use crate::snapshot::StyleSnapshot;

#[derive(Debug, Clone)]
pub struct ScaledImage {
  pub children: Vec<Arc<Image>>,
  /// 1-based index of the child in effect; 1 until computed.
  pub scale: usize,
}

impl ScaledImage {
  pub(crate) fn parse<'i, 't>(input: &mut Parser<'i, 't>) -> ValueResult<'i, ScaledImage> {
    let mut children = Vec::new();
    loop {
      children.push(Arc::new(Image::parse(input)?));
      if input.is_exhausted() {
        break;
      }
      input.expect_comma()?;
    }
    Ok(ScaledImage { children, scale: 1 })
  }

  pub(crate) fn print(&self, out: &mut impl fmt::Write) -> fmt::Result {
    out.write_str("-ctk-scaled(")?;
    for (i, child) in self.children.iter().enumerate() {
      if i > 0 {
        out.write_str(", ")?;
      }
      child.print(out)?;
    }
    out.write_str(")")
  }

  fn selected(&self) -> &Image {
    &self.children[self.scale - 1]
  }

  /// Selects the child for the snapshot's scale (clamped to the available
  /// variants) and computes only that one.
  pub(crate) fn compute(&self, property_id: u32, snapshot: &dyn StyleSnapshot) -> ScaledImage {
    let scale = (snapshot.scale() as usize).clamp(1, self.children.len());
    let children = self
      .children
      .iter()
      .enumerate()
      .map(|(i, child)| {
        if i + 1 == scale {
          Arc::new(child.compute(property_id, snapshot))
        } else {
          Arc::clone(child)
        }
      })
      .collect();
    ScaledImage { children, scale }
  }

  pub fn equal(&self, other: &ScaledImage) -> bool {
    self.scale == other.scale
      && self.children.len() == other.children.len()
      && self
        .children
        .iter()
        .zip(&other.children)
        .all(|(a, b)| a.equal(b))
  }

  /// Intrinsic size in nominal pixels: the selected child's raster divided
  /// by its density.
  pub fn width(&self) -> u32 {
    self.selected().width() / self.scale as u32
  }

  pub fn height(&self) -> u32 {
    self.selected().height() / self.scale as u32
  }

  pub fn aspect_ratio(&self) -> f64 {
    self.selected().aspect_ratio()
  }

  pub(crate) fn draw(&self, canvas: &mut Canvas, width: f64, height: f64) {
    self.selected().draw(canvas, width, height);
  }
}
