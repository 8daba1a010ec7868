//! Shared fixtures for the image-value integration tests: an in-memory
//! loader, a toy icon theme, and a configurable style snapshot that
//! records emitted errors.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use ctk_css_image::error::{Error, LoadError};
use ctk_css_image::icon_theme::{IconInfo, IconLookupFlags, IconSource, IconTheme};
use ctk_css_image::image::PaletteValue;
use ctk_css_image::loader::ImageLoader;
use ctk_css_image::snapshot::{StyleSnapshot, SymbolicColors};
use ctk_css_image::surface::Surface;
use ctk_css_image::Rgba;

/// Serves surfaces from an in-memory map; anything else fails to load.
#[derive(Debug, Default)]
pub struct MemoryLoader {
  entries: HashMap<String, Surface>,
}

impl MemoryLoader {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with(mut self, url: &str, surface: Surface) -> Self {
    self.entries.insert(url.to_string(), surface);
    self
  }
}

impl ImageLoader for MemoryLoader {
  fn load(&self, url: &str, _scale: u32) -> Result<Surface, LoadError> {
    self.entries.get(url).cloned().ok_or_else(|| LoadError::NotFound {
      url: url.to_string(),
      message: "no such fixture".to_string(),
    })
  }
}

/// Icon theme knowing a fixed set of names. Named icons rasterize as
/// squares of the nominal size times scale, filled with the foreground
/// color; file-backed (recolor) icons rasterize as 16x16 squares in the
/// palette's success color so recoloring is observable.
#[derive(Debug, Default)]
pub struct MapIconTheme {
  names: Vec<String>,
}

impl MapIconTheme {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with(mut self, name: &str) -> Self {
    self.names.push(name.to_string());
    self
  }
}

impl IconTheme for MapIconTheme {
  fn lookup(&self, name: &str, size: i32, scale: u32, _flags: IconLookupFlags) -> Option<IconInfo> {
    if !self.names.iter().any(|n| n == name) {
      return None;
    }
    Some(IconInfo {
      source: IconSource::Named {
        name: name.to_string(),
        size,
      },
      scale: scale.max(1),
      is_symbolic: true,
    })
  }

  fn load_symbolic(&self, info: &IconInfo, colors: &SymbolicColors) -> Result<Surface, LoadError> {
    match &info.source {
      IconSource::Named { size, .. } => {
        let edge = (*size as u32) * info.scale;
        Ok(Surface::solid(edge, edge, colors.fg))
      }
      IconSource::File { path } => {
        if path.ends_with(".missing") {
          return Err(LoadError::NotFound {
            url: path.clone(),
            message: "no such fixture".to_string(),
          });
        }
        let edge = 16 * info.scale;
        Ok(Surface::solid(edge, edge, colors.success))
      }
    }
  }
}

/// A style snapshot with test knobs for every input `compute` reads.
#[derive(Debug)]
pub struct TestSnapshot {
  pub scale: u32,
  pub color: Rgba,
  pub palette: PaletteValue,
  pub loader: Arc<MemoryLoader>,
  pub theme: Arc<MapIconTheme>,
  pub errors: RefCell<Vec<String>>,
}

impl Default for TestSnapshot {
  fn default() -> Self {
    Self {
      scale: 1,
      color: Rgba::BLACK,
      palette: PaletteValue::Default,
      loader: Arc::new(MemoryLoader::new()),
      theme: Arc::new(MapIconTheme::new()),
      errors: RefCell::new(Vec::new()),
    }
  }
}

impl TestSnapshot {
  pub fn with_loader(loader: MemoryLoader) -> Self {
    Self {
      loader: Arc::new(loader),
      ..Self::default()
    }
  }

  pub fn with_theme(theme: MapIconTheme) -> Self {
    Self {
      theme: Arc::new(theme),
      ..Self::default()
    }
  }

  pub fn error_count(&self) -> usize {
    self.errors.borrow().len()
  }
}

impl StyleSnapshot for TestSnapshot {
  fn scale(&self) -> u32 {
    self.scale
  }

  fn current_color(&self) -> Rgba {
    self.color
  }

  fn palette_color(&self, name: &str) -> Option<Rgba> {
    match &self.palette {
      PaletteValue::Colors(entries) => entries
        .iter()
        .find(|(entry, _)| entry == name)
        .map(|(_, color)| *color),
      PaletteValue::Default => None,
    }
  }

  fn icon_palette(&self) -> PaletteValue {
    self.palette.clone()
  }

  fn icon_theme(&self) -> Arc<dyn IconTheme> {
    self.theme.clone()
  }

  fn loader(&self) -> Arc<dyn ImageLoader> {
    self.loader.clone()
  }

  fn emit_error(&self, section: &str, error: &Error) {
    self.errors.borrow_mut().push(format!("{section}: {error}"));
  }
}

/// Reads back a straight (demultiplied) RGBA pixel.
pub fn pixel(surface: &Surface, x: u32, y: u32) -> (u8, u8, u8, u8) {
  let pixmap = surface.pixmap().expect("surface should have pixels");
  let px = pixmap.pixels()[(y * pixmap.width() + x) as usize].demultiply();
  (px.red(), px.green(), px.blue(), px.alpha())
}
