//! Icon-theme oracle
//!
//! The image subsystem never walks icon directories itself. It asks an
//! [`IconTheme`] to look a name up and to rasterize the result, and treats
//! whatever comes back as an opaque surface. `load_symbolic` recolors
//! symbolic assets with the caller's palette; non-symbolic assets pass
//! through unchanged.

use std::fmt;

use crate::error::LoadError;
use crate::snapshot::SymbolicColors;
use crate::surface::Surface;

/// Options for [`IconTheme::lookup`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IconLookupFlags {
  /// Allow builtin fallback assets when the theme has no match.
  pub use_builtin: bool,
}

/// Where a looked-up icon comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconSource {
  /// A themed icon resolved by name at a nominal size.
  Named { name: String, size: i32 },
  /// A concrete file, as used by `-ctk-recolor(url(...))`.
  File { path: String },
}

/// The result of a successful lookup, ready to be rasterized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconInfo {
  pub source: IconSource,
  /// Pixel-density factor the raster should be produced at.
  pub scale: u32,
  /// Whether the asset is symbolic and should be recolored.
  pub is_symbolic: bool,
}

impl IconInfo {
  /// An icon backed directly by a file. Recoloring applies, which is what
  /// `-ctk-recolor` wants.
  pub fn for_file(path: &str, scale: u32) -> Self {
    Self {
      source: IconSource::File {
        path: path.to_string(),
      },
      scale: scale.max(1),
      is_symbolic: true,
    }
  }
}

/// Resolves icon names to assets and rasterizes them.
pub trait IconTheme: fmt::Debug + Send + Sync {
  /// Finds the best match for `name` at the given nominal size and scale.
  fn lookup(&self, name: &str, size: i32, scale: u32, flags: IconLookupFlags) -> Option<IconInfo>;

  /// Rasterizes a looked-up icon. Symbolic assets are recolored with
  /// `colors`; others are returned as-is.
  fn load_symbolic(&self, info: &IconInfo, colors: &SymbolicColors) -> Result<Surface, LoadError>;
}
