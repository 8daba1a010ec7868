//! `cross-fade(...)` image values
//!
//! A blend of two images at a given progress. In CSS it is written with a
//! percentage first; the animation machinery also creates cross-fades for
//! transitions between values that cannot be interpolated component-wise,
//! including fading a value out against nothing.
//!
//! Drawing composites the start image at weight `1 - p` and the end image
//! at weight `p` with additive (plus-lighter) blending, so two opaque
//! inputs stay opaque at every progress.

use std::fmt;
use std::sync::Arc;

use cssparser::Parser;
use tiny_skia::{BlendMode, FilterQuality};

use crate::canvas::Canvas;
use crate::image::Image;
use crate::parse::ValueResult;
use crate::snapshot::StyleSnapshot;

#[derive(Debug, Clone)]
pub struct CrossFade {
  pub start: Arc<Image>,
  pub end: Option<Arc<Image>>,
  /// Blend progress in [0, 1]: 0 is all start, 1 is all end.
  pub progress: f64,
}

impl CrossFade {
  pub(crate) fn for_transition(start: Image, end: Option<Image>, progress: f64) -> CrossFade {
    CrossFade {
      start: Arc::new(start),
      end: end.map(Arc::new),
      progress: progress.clamp(0.0, 1.0),
    }
  }

  pub(crate) fn parse<'i, 't>(input: &mut Parser<'i, 't>) -> ValueResult<'i, CrossFade> {
    let progress = input.expect_percentage()? as f64;
    input.expect_comma()?;
    let start = Image::parse(input)?;
    let end = if input.try_parse(|i| i.expect_comma()).is_ok() {
      Some(Arc::new(Image::parse(input)?))
    } else {
      None
    };
    Ok(CrossFade {
      start: Arc::new(start),
      end,
      progress: progress.clamp(0.0, 1.0),
    })
  }

  pub(crate) fn print(&self, out: &mut impl fmt::Write) -> fmt::Result {
    write!(out, "cross-fade({}%, ", self.progress * 100.0)?;
    self.start.print(out)?;
    if let Some(end) = &self.end {
      out.write_str(", ")?;
      end.print(out)?;
    }
    out.write_str(")")
  }

  pub(crate) fn compute(&self, property_id: u32, snapshot: &dyn StyleSnapshot) -> CrossFade {
    CrossFade {
      start: Arc::new(self.start.compute(property_id, snapshot)),
      end: self
        .end
        .as_ref()
        .map(|end| Arc::new(end.compute(property_id, snapshot))),
      progress: self.progress,
    }
  }

  pub fn equal(&self, other: &CrossFade) -> bool {
    if self.progress != other.progress || !self.start.equal(&other.start) {
      return false;
    }
    match (&self.end, &other.end) {
      (Some(a), Some(b)) => a.equal(b),
      (None, None) => true,
      _ => false,
    }
  }

  pub(crate) fn draw(&self, canvas: &mut Canvas, width: f64, height: f64) {
    let target_width = width.ceil() as u32;
    let target_height = height.ceil() as u32;
    if target_width == 0 || target_height == 0 {
      return;
    }
    let start = self.start.materialize(target_width, target_height);
    canvas.draw_surface(
      &start,
      0.0,
      0.0,
      (1.0 - self.progress) as f32,
      FilterQuality::Nearest,
      BlendMode::SourceOver,
    );
    if let Some(end) = &self.end {
      let end = end.materialize(target_width, target_height);
      canvas.draw_surface(
        &end,
        0.0,
        0.0,
        self.progress as f32,
        FilterQuality::Nearest,
        BlendMode::Plus,
      );
    }
  }
}
