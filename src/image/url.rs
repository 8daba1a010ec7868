//! `url(...)` image values

use std::fmt;

use crate::error::Error;
use crate::image::{Image, SurfaceImage};
use crate::snapshot::StyleSnapshot;
use crate::surface::Surface;

/// An unresolved resource reference. `compute` loads it through the
/// snapshot's loader and replaces it with a surface; until then it has no
/// intrinsic size and draws nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlImage {
  pub url: String,
}

impl UrlImage {
  pub fn new(url: &str) -> Self {
    Self {
      url: url.to_string(),
    }
  }

  pub(crate) fn print(&self, out: &mut impl fmt::Write) -> fmt::Result {
    out.write_str("url(")?;
    cssparser::serialize_string(&self.url, out)?;
    out.write_str(")")
  }

  pub(crate) fn compute(&self, snapshot: &dyn StyleSnapshot) -> Image {
    match snapshot.loader().load(&self.url, snapshot.scale()) {
      Ok(surface) => Image::Surface(SurfaceImage::new(surface)),
      Err(e) => {
        snapshot.emit_error("url", &Error::Load(e));
        Image::Surface(SurfaceImage::new(Surface::empty()))
      }
    }
  }
}
