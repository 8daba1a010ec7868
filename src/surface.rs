//! Raster surfaces
//!
//! A [`Surface`] wraps a decoded, premultiplied pixel buffer. Loaders and
//! the icon theme produce surfaces; `compute` wraps them in the surface
//! image variant. The zero-sized surface is representable (tiny-skia
//! pixmaps cannot be empty, so it is simply the absence of a pixmap) and
//! is what load failures collapse into.

use std::sync::Arc;

use tiny_skia::Pixmap;

use crate::color::Rgba;

/// A shared, immutable raster.
#[derive(Debug, Clone)]
pub struct Surface {
  pixmap: Option<Arc<Pixmap>>,
}

impl Surface {
  /// The 0×0 surface produced by failed loads.
  pub fn empty() -> Self {
    Self { pixmap: None }
  }

  pub fn from_pixmap(pixmap: Pixmap) -> Self {
    Self {
      pixmap: Some(Arc::new(pixmap)),
    }
  }

  /// Builds a surface from straight (unpremultiplied) RGBA bytes in
  /// row-major order. Returns the empty surface when the dimensions are
  /// zero or do not match the data length.
  pub fn from_rgba8(width: u32, height: u32, data: &[u8]) -> Self {
    if data.len() != width as usize * height as usize * 4 {
      return Self::empty();
    }
    let Some(mut pixmap) = Pixmap::new(width, height) else {
      return Self::empty();
    };
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(data.chunks_exact(4)) {
      *dst = tiny_skia::ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
    }
    Self::from_pixmap(pixmap)
  }

  /// A width×height surface filled with one color. Handy for tests and
  /// builtin fallbacks.
  pub fn solid(width: u32, height: u32, color: Rgba) -> Self {
    let Some(mut pixmap) = Pixmap::new(width, height) else {
      return Self::empty();
    };
    pixmap.fill(color.to_skia());
    Self::from_pixmap(pixmap)
  }

  pub fn width(&self) -> u32 {
    self.pixmap.as_ref().map_or(0, |p| p.width())
  }

  pub fn height(&self) -> u32 {
    self.pixmap.as_ref().map_or(0, |p| p.height())
  }

  pub fn is_empty(&self) -> bool {
    self.pixmap.is_none()
  }

  pub fn pixmap(&self) -> Option<&Pixmap> {
    self.pixmap.as_deref()
  }

  /// Identity comparison: two surfaces are the same raster when they share
  /// the pixel buffer (or are both empty).
  pub fn same_raster(&self, other: &Surface) -> bool {
    match (&self.pixmap, &other.pixmap) {
      (Some(a), Some(b)) => Arc::ptr_eq(a, b),
      (None, None) => true,
      _ => false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_surface_reports_zero() {
    let s = Surface::empty();
    assert_eq!((s.width(), s.height()), (0, 0));
    assert!(s.is_empty());
  }

  #[test]
  fn test_solid_surface() {
    let s = Surface::solid(4, 2, Rgba::RED);
    assert_eq!((s.width(), s.height()), (4, 2));
    let px = s.pixmap().unwrap().pixels()[0].demultiply();
    assert_eq!((px.red(), px.green(), px.blue(), px.alpha()), (255, 0, 0, 255));
  }

  #[test]
  fn test_same_raster_is_identity() {
    let a = Surface::solid(2, 2, Rgba::RED);
    let b = Surface::solid(2, 2, Rgba::RED);
    assert!(a.same_raster(&a.clone()));
    assert!(!a.same_raster(&b));
    assert!(Surface::empty().same_raster(&Surface::empty()));
  }
}
