//! `-ctk-recolor(...)` image values
//!
//! A symbolic asset recolored with a palette. The optional second argument
//! overrides the ambient icon palette; without it the snapshot's palette
//! applies. `compute` rasterizes immediately, so the computed form is a
//! plain surface.

use std::fmt;

use cssparser::Parser;

use crate::color::Rgba;
use crate::error::Error;
use crate::icon_theme::IconInfo;
use crate::image::{Image, SurfaceImage};
use crate::parse::{error, ValueResult};
use crate::snapshot::{StyleSnapshot, SymbolicColors};
use crate::surface::Surface;

/// An icon palette: either the ambient default or explicit name-color
/// pairs.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteValue {
  Default,
  Colors(Vec<(String, Rgba)>),
}

impl PaletteValue {
  pub(crate) fn parse<'i, 't>(input: &mut Parser<'i, 't>) -> ValueResult<'i, PaletteValue> {
    if input
      .try_parse(|i| i.expect_ident_matching("default"))
      .is_ok()
    {
      return Ok(PaletteValue::Default);
    }
    let mut entries = Vec::new();
    loop {
      let name = input.expect_ident()?.as_ref().to_string();
      let color = Rgba::parse(input)?;
      entries.push((name, color));
      if input.is_exhausted() {
        break;
      }
      input.expect_comma()?;
    }
    Ok(PaletteValue::Colors(entries))
  }

  pub(crate) fn print(&self, out: &mut impl fmt::Write) -> fmt::Result {
    match self {
      PaletteValue::Default => out.write_str("default"),
      PaletteValue::Colors(entries) => {
        for (i, (name, color)) in entries.iter().enumerate() {
          if i > 0 {
            out.write_str(", ")?;
          }
          write!(out, "{name} ")?;
          color.print(out)?;
        }
        Ok(())
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecolorImage {
  pub url: String,
  pub palette: Option<PaletteValue>,
}

impl RecolorImage {
  pub(crate) fn parse<'i, 't>(input: &mut Parser<'i, 't>) -> ValueResult<'i, RecolorImage> {
    let url = input.expect_url()?.as_ref().to_string();
    let palette = if input.try_parse(|i| i.expect_comma()).is_ok() {
      Some(PaletteValue::parse(input)?)
    } else {
      None
    };
    if !input.is_exhausted() {
      return error(input, "Expected end of -ctk-recolor() arguments");
    }
    Ok(RecolorImage { url, palette })
  }

  pub(crate) fn print(&self, out: &mut impl fmt::Write) -> fmt::Result {
    out.write_str("-ctk-recolor(url(")?;
    cssparser::serialize_string(&self.url, out)?;
    out.write_str(")")?;
    if let Some(palette) = &self.palette {
      out.write_str(", ")?;
      palette.print(out)?;
    }
    out.write_str(")")
  }

  pub(crate) fn compute(&self, snapshot: &dyn StyleSnapshot) -> Image {
    let palette = match &self.palette {
      Some(palette) => palette.clone(),
      None => snapshot.icon_palette(),
    };
    let colors = SymbolicColors::resolve(snapshot, Some(&palette));
    let info = IconInfo::for_file(&self.url, snapshot.scale().max(1));
    match snapshot.icon_theme().load_symbolic(&info, &colors) {
      Ok(surface) => Image::Surface(SurfaceImage::new(surface)),
      Err(e) => {
        snapshot.emit_error("-ctk-recolor", &Error::Load(e));
        Image::Surface(SurfaceImage::new(Surface::empty()))
      }
    }
  }
}
