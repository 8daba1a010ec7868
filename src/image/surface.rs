//! Surface image values
//!
//! The computed form of every loaded resource: a premultiplied raster plus
//! a one-entry cache of its most recent scaled copy, so repeated draws at
//! the same size rescale once and then blit. There is no CSS syntax for
//! this variant; `compute` is the only producer.

use std::sync::Mutex;

use tiny_skia::{BlendMode, FilterQuality};

use crate::canvas::Canvas;
use crate::surface::Surface;

#[derive(Debug)]
struct ScaledCopy {
  width: u64,
  height: u64,
  surface: Surface,
}

#[derive(Debug)]
pub struct SurfaceImage {
  surface: Surface,
  // Keyed by the exact requested draw size; replaced on mismatch.
  cache: Mutex<Option<ScaledCopy>>,
}

impl Clone for SurfaceImage {
  fn clone(&self) -> Self {
    // The cache is a drawing detail, not part of the value.
    Self::new(self.surface.clone())
  }
}

impl SurfaceImage {
  pub fn new(surface: Surface) -> Self {
    Self {
      surface,
      cache: Mutex::new(None),
    }
  }

  pub fn surface(&self) -> &Surface {
    &self.surface
  }

  pub fn width(&self) -> u32 {
    self.surface.width()
  }

  pub fn height(&self) -> u32 {
    self.surface.height()
  }

  /// Surfaces compare by raster identity, not pixel content.
  pub fn equal(&self, other: &SurfaceImage) -> bool {
    self.surface.same_raster(&other.surface)
  }

  pub(crate) fn draw(&self, canvas: &mut Canvas, width: f64, height: f64) {
    if self.surface.is_empty() {
      return;
    }
    let native_width = self.surface.width() as f64;
    let native_height = self.surface.height() as f64;
    if width == native_width && height == native_height {
      canvas.draw_surface(
        &self.surface,
        0.0,
        0.0,
        1.0,
        FilterQuality::Nearest,
        BlendMode::SourceOver,
      );
      return;
    }
    let scaled = self.scaled_copy(width, height);
    canvas.draw_surface(
      &scaled,
      0.0,
      0.0,
      1.0,
      FilterQuality::Nearest,
      BlendMode::SourceOver,
    );
  }

  /// Returns the cached scaled copy for this draw size, rescaling and
  /// replacing the cache entry when the size changed.
  fn scaled_copy(&self, width: f64, height: f64) -> Surface {
    let key = (width.to_bits(), height.to_bits());
    let mut cache = match self.cache.lock() {
      Ok(guard) => guard,
      Err(poisoned) => poisoned.into_inner(),
    };
    if let Some(entry) = cache.as_ref() {
      if (entry.width, entry.height) == key {
        return entry.surface.clone();
      }
    }
    let scaled = self.rescale(width, height);
    *cache = Some(ScaledCopy {
      width: key.0,
      height: key.1,
      surface: scaled.clone(),
    });
    scaled
  }

  fn rescale(&self, width: f64, height: f64) -> Surface {
    let target_width = width.ceil() as u32;
    let target_height = height.ceil() as u32;
    let Some(mut pixmap) = tiny_skia::Pixmap::new(target_width, target_height) else {
      return Surface::empty();
    };
    {
      let mut canvas = Canvas::new(&mut pixmap);
      canvas.scale(
        width / self.surface.width() as f64,
        height / self.surface.height() as f64,
      );
      canvas.draw_surface(
        &self.surface,
        0.0,
        0.0,
        1.0,
        FilterQuality::Bilinear,
        BlendMode::SourceOver,
      );
    }
    Surface::from_pixmap(pixmap)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::color::Rgba;

  #[test]
  fn test_scaled_copy_is_cached_per_size() {
    let image = SurfaceImage::new(Surface::solid(4, 4, Rgba::RED));
    let first = image.scaled_copy(8.0, 8.0);
    let again = image.scaled_copy(8.0, 8.0);
    assert!(first.same_raster(&again));

    // A different size evicts the entry.
    let other = image.scaled_copy(2.0, 2.0);
    assert!(!first.same_raster(&other));
    let back = image.scaled_copy(8.0, 8.0);
    assert!(!first.same_raster(&back));
  }

  #[test]
  fn test_clone_shares_raster_but_not_cache() {
    let image = SurfaceImage::new(Surface::solid(4, 4, Rgba::RED));
    let copy = image.clone();
    assert!(image.equal(&copy));
  }

  #[test]
  fn test_empty_surface_draws_nothing() {
    let image = SurfaceImage::new(Surface::empty());
    let mut pixmap = tiny_skia::Pixmap::new(4, 4).unwrap();
    let mut canvas = Canvas::new(&mut pixmap);
    image.draw(&mut canvas, 4.0, 4.0);
    assert!(pixmap.pixels().iter().all(|p| p.alpha() == 0));
  }
}
