//! The CSS default sizing algorithm
//!
//! Resolves the concrete size an image is drawn at from its intrinsic
//! dimensions, the size the property specified, and the default (usually
//! the element box). Specified dimensions of 0 mean "auto".

use crate::image::Image;

/// Resolves the concrete size of `image`.
///
/// # Panics
///
/// Panics when a default dimension is not positive or a specified
/// dimension is negative.
pub fn concrete_size(
  image: &Image,
  specified_width: f64,
  specified_height: f64,
  default_width: f64,
  default_height: f64,
) -> (f64, f64) {
  assert!(
    default_width > 0.0 && default_height > 0.0,
    "concrete size requires positive defaults, got {default_width} x {default_height}"
  );
  assert!(
    specified_width >= 0.0 && specified_height >= 0.0,
    "specified dimensions cannot be negative"
  );

  // Both dimensions specified: nothing to resolve.
  if specified_width > 0.0 && specified_height > 0.0 {
    return (specified_width, specified_height);
  }

  let image_width = image.width() as f64;
  let image_height = image.height() as f64;
  let aspect = image.aspect_ratio();

  if specified_width == 0.0 && specified_height == 0.0 {
    // Aspect ratio but no intrinsic dimensions: fit the default box,
    // preserving the ratio.
    if aspect > 0.0 && image_width == 0.0 && image_height == 0.0 {
      if aspect * default_height > default_width {
        return (default_width, default_width / aspect);
      }
      return (default_height * aspect, default_height);
    }
    let width = if image_width > 0.0 {
      image_width
    } else if aspect > 0.0 {
      image_height * aspect
    } else {
      default_width
    };
    let height = if image_height > 0.0 {
      image_height
    } else if aspect > 0.0 {
      image_width / aspect
    } else {
      default_height
    };
    return (width, height);
  }

  // Exactly one dimension specified: derive the other from the aspect
  // ratio when there is one, else from the intrinsic size, else the
  // default.
  if specified_width > 0.0 {
    let height = if aspect > 0.0 {
      specified_width / aspect
    } else if image_height > 0.0 {
      image_height
    } else {
      default_height
    };
    (specified_width, height)
  } else {
    let width = if aspect > 0.0 {
      specified_height * aspect
    } else if image_width > 0.0 {
      image_width
    } else {
      default_width
    };
    (width, specified_height)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::image::Image;

  fn gradient() -> Image {
    // No intrinsic dimensions, no aspect ratio.
    Image::parse_str("linear-gradient(red, blue)").unwrap()
  }

  fn icon() -> Image {
    // Aspect ratio 1.0, no intrinsic dimensions.
    Image::parse_str("-ctk-icontheme(\"edit-copy\")").unwrap()
  }

  fn raster(width: u32, height: u32) -> Image {
    use crate::image::SurfaceImage;
    use crate::surface::Surface;
    Image::Surface(SurfaceImage::new(Surface::solid(
      width,
      height,
      crate::color::Rgba::RED,
    )))
  }

  #[test]
  fn test_specified_dimensions_win() {
    assert_eq!(
      concrete_size(&raster(10, 10), 30.0, 40.0, 100.0, 100.0),
      (30.0, 40.0)
    );
  }

  #[test]
  fn test_intrinsic_dimensions_ignore_defaults() {
    assert_eq!(
      concrete_size(&raster(32, 16), 0.0, 0.0, 100.0, 100.0),
      (32.0, 16.0)
    );
  }

  #[test]
  fn test_no_intrinsics_fall_back_to_defaults() {
    assert_eq!(
      concrete_size(&gradient(), 0.0, 0.0, 120.0, 80.0),
      (120.0, 80.0)
    );
  }

  #[test]
  fn test_aspect_only_fits_default_box() {
    // Square icon in a square box.
    assert_eq!(
      concrete_size(&icon(), 0.0, 0.0, 100.0, 100.0),
      (100.0, 100.0)
    );
    // Wide box: height limits.
    assert_eq!(concrete_size(&icon(), 0.0, 0.0, 200.0, 100.0), (100.0, 100.0));
    // Tall box: width limits.
    assert_eq!(concrete_size(&icon(), 0.0, 0.0, 100.0, 200.0), (100.0, 100.0));
  }

  #[test]
  fn test_one_dimension_derives_from_aspect() {
    assert_eq!(concrete_size(&icon(), 50.0, 0.0, 100.0, 100.0), (50.0, 50.0));
    assert_eq!(concrete_size(&icon(), 0.0, 30.0, 100.0, 100.0), (30.0, 30.0));
  }

  #[test]
  fn test_one_dimension_scales_intrinsic_by_aspect() {
    // 32x16 raster has aspect 2.0, so the free dimension follows it.
    assert_eq!(
      concrete_size(&raster(32, 16), 64.0, 0.0, 100.0, 100.0),
      (64.0, 32.0)
    );
  }

  #[test]
  fn test_one_dimension_without_aspect_uses_default() {
    assert_eq!(
      concrete_size(&gradient(), 64.0, 0.0, 100.0, 80.0),
      (64.0, 80.0)
    );
    assert_eq!(
      concrete_size(&gradient(), 0.0, 40.0, 100.0, 80.0),
      (100.0, 40.0)
    );
  }
}
