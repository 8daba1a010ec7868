//! `-ctk-icontheme(...)` image values
//!
//! A named icon resolved through the current icon theme. Parsing only
//! records the name; `compute` captures the theme, scale and symbolic
//! palette so drawing needs no further style access. The icon is looked up
//! lazily at draw time because the nominal size depends on the box it is
//! drawn into.

use std::fmt;
use std::sync::Arc;

use cssparser::{Parser, Token};
use tiny_skia::{BlendMode, FilterQuality};

use crate::canvas::Canvas;
use crate::icon_theme::{IconLookupFlags, IconTheme};
use crate::parse::{error, ValueResult};
use crate::snapshot::{StyleSnapshot, SymbolicColors};

#[derive(Debug, Clone)]
pub(crate) struct ComputedIcon {
  theme: Arc<dyn IconTheme>,
  scale: u32,
  colors: SymbolicColors,
}

#[derive(Debug, Clone)]
pub struct IconThemeImage {
  pub name: String,
  computed: Option<ComputedIcon>,
}

impl IconThemeImage {
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      computed: None,
    }
  }

  /// Accepts a quoted string or a bare identifier.
  pub(crate) fn parse<'i, 't>(input: &mut Parser<'i, 't>) -> ValueResult<'i, IconThemeImage> {
    match input.next()?.clone() {
      Token::QuotedString(ref name) | Token::Ident(ref name) => {
        Ok(IconThemeImage::new(name.as_ref()))
      }
      ref t => error(input, format!("Expected an icon name, got {t:?}")),
    }
  }

  pub(crate) fn print(&self, out: &mut impl fmt::Write) -> fmt::Result {
    out.write_str("-ctk-icontheme(")?;
    cssparser::serialize_string(&self.name, out)?;
    out.write_str(")")
  }

  pub(crate) fn compute(&self, snapshot: &dyn StyleSnapshot) -> IconThemeImage {
    IconThemeImage {
      name: self.name.clone(),
      computed: Some(ComputedIcon {
        theme: snapshot.icon_theme(),
        scale: snapshot.scale().max(1),
        colors: SymbolicColors::resolve(snapshot, None),
      }),
    }
  }

  /// Draws the icon centered in the box at the largest integer size that
  /// fits. Uncomputed values and failed lookups draw nothing.
  pub(crate) fn draw(&self, canvas: &mut Canvas, width: f64, height: f64) {
    let Some(computed) = &self.computed else {
      return;
    };
    let size = width.min(height).floor();
    if size < 1.0 {
      return;
    }
    let flags = IconLookupFlags { use_builtin: true };
    let Some(info) = computed
      .theme
      .lookup(&self.name, size as i32, computed.scale, flags)
    else {
      return;
    };
    let surface = match computed.theme.load_symbolic(&info, &computed.colors) {
      Ok(surface) => surface,
      Err(_) => return,
    };
    if surface.is_empty() {
      return;
    }
    // The raster is scale x larger than its nominal size; center it and
    // scale back down so it occupies nominal pixels.
    let scale = computed.scale as f64;
    canvas.translate(width / 2.0, height / 2.0);
    canvas.scale(1.0 / scale, 1.0 / scale);
    canvas.draw_surface(
      &surface,
      -(surface.width() as f64) / 2.0,
      -(surface.height() as f64) / 2.0,
      1.0,
      FilterQuality::Bilinear,
      BlendMode::SourceOver,
    );
  }
}
