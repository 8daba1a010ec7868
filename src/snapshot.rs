//! Style snapshots
//!
//! A [`StyleSnapshot`] is the read-only view of the style cascade at the
//! moment `compute` runs: the display scale, the current foreground color,
//! the icon palette, the icon-theme and loader oracles, and a channel for
//! non-fatal errors. `compute` is a pure function of the image value and
//! this snapshot.

use std::sync::Arc;

use crate::color::Rgba;
use crate::error::Error;
use crate::icon_theme::IconTheme;
use crate::image::recolor::PaletteValue;
use crate::loader::ImageLoader;

/// Immutable view of the style cascade used by `compute`.
pub trait StyleSnapshot {
  /// Pixel-density factor of the current display, `>= 1`.
  fn scale(&self) -> u32 {
    1
  }

  /// The current foreground color; also the default for missing palette
  /// entries.
  fn current_color(&self) -> Rgba {
    Rgba::BLACK
  }

  /// Looks up a named color in the current icon palette.
  fn palette_color(&self, _name: &str) -> Option<Rgba> {
    None
  }

  /// The current icon-palette value (what `-ctk-recolor` falls back to
  /// when no explicit palette is given).
  fn icon_palette(&self) -> PaletteValue {
    PaletteValue::Default
  }

  /// The icon-theme oracle.
  fn icon_theme(&self) -> Arc<dyn IconTheme>;

  /// The resource loader used by `url(...)` values.
  fn loader(&self) -> Arc<dyn ImageLoader>;

  /// Reports a non-fatal failure (load error, missing asset) without
  /// aborting the compute pipeline.
  fn emit_error(&self, _section: &str, _error: &Error) {}
}

/// The four color slots of a symbolic icon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolicColors {
  pub fg: Rgba,
  pub success: Rgba,
  pub warning: Rgba,
  pub error: Rgba,
}

impl SymbolicColors {
  /// Resolves the symbolic palette against a snapshot. An explicit
  /// palette overrides the snapshot's; entries missing from whichever
  /// palette applies default to the foreground color.
  pub fn resolve(snapshot: &dyn StyleSnapshot, palette: Option<&PaletteValue>) -> Self {
    let fg = snapshot.current_color();
    let lookup = |name: &str| -> Option<Rgba> {
      match palette {
        Some(PaletteValue::Colors(entries)) => entries
          .iter()
          .find(|(entry, _)| entry == name)
          .map(|(_, color)| *color),
        Some(PaletteValue::Default) | None => snapshot.palette_color(name),
      }
    };
    Self {
      fg,
      success: lookup("success").unwrap_or(fg),
      warning: lookup("warning").unwrap_or(fg),
      error: lookup("error").unwrap_or(fg),
    }
  }
}
