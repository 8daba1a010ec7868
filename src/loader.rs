//! Resource loading for `url(...)` image values
//!
//! Loading is pluggable so embedders can serve resources from bundles or
//! test fixtures. The default [`FileLoader`] reads from disk and decodes
//! with the `image` crate.

use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

use crate::error::LoadError;
use crate::surface::Surface;

/// Fetches and decodes the resource behind a URL.
pub trait ImageLoader: fmt::Debug + Send + Sync {
  /// Loads `url` at the given display scale. Loaders that keep assets per
  /// density may use `scale` to pick a variant; [`FileLoader`] ignores it.
  fn load(&self, url: &str, scale: u32) -> Result<Surface, LoadError>;
}

/// Decodes an in-memory encoded image (PNG, JPEG, GIF) into a premultiplied
/// surface. `url` is only used in error messages.
pub fn decode(bytes: &[u8], url: &str) -> Result<Surface, LoadError> {
  let decoded = image::load_from_memory(bytes).map_err(|e| LoadError::Decode {
    url: url.to_string(),
    message: e.to_string(),
  })?;
  let rgba = decoded.to_rgba8();
  Ok(Surface::from_rgba8(rgba.width(), rgba.height(), rgba.as_raw()))
}

/// Loads images from the local filesystem.
///
/// `file:` URLs resolve absolutely; anything without a scheme is treated as
/// a path relative to the configured base directory (or the process working
/// directory). Other schemes are rejected.
#[derive(Debug, Default)]
pub struct FileLoader {
  base: Option<PathBuf>,
}

impl FileLoader {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_base(base: impl Into<PathBuf>) -> Self {
    Self {
      base: Some(base.into()),
    }
  }

  fn resolve(&self, raw: &str) -> Result<PathBuf, LoadError> {
    match Url::parse(raw) {
      Ok(parsed) if parsed.scheme() == "file" => {
        parsed.to_file_path().map_err(|_| LoadError::NotFound {
          url: raw.to_string(),
          message: "file URL has no usable path".to_string(),
        })
      }
      Ok(_) => Err(LoadError::Unsupported {
        url: raw.to_string(),
      }),
      // Not an absolute URL: treat it as a filesystem path.
      Err(_) => {
        let path = Path::new(raw);
        Ok(match &self.base {
          Some(base) if path.is_relative() => base.join(path),
          _ => path.to_path_buf(),
        })
      }
    }
  }
}

impl ImageLoader for FileLoader {
  fn load(&self, url: &str, _scale: u32) -> Result<Surface, LoadError> {
    let path = self.resolve(url)?;
    let bytes = std::fs::read(&path).map_err(|e| LoadError::NotFound {
      url: url.to_string(),
      message: e.to_string(),
    })?;
    decode(&bytes, url)
  }
}
