//! RGBA colors for image values
//!
//! Colors inside image values (gradient stops, `image(...)` fallback
//! colors, palette entries) are concrete at parse time. Parsing works on
//! cssparser tokens and accepts hex, `rgb()`/`rgba()`, `hsl()`/`hsla()`
//! and the common named colors; printing emits the canonical
//! `rgb(r,g,b)` / `rgba(r,g,b,a)` form, which reparses to an equal value.

use std::fmt;

use cssparser::{Parser, Token};

use crate::parse::{error, ValueResult};

/// RGBA color.
///
/// R, G, B are 0-255; alpha is 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
  /// Red component (0-255)
  pub r: u8,
  /// Green component (0-255)
  pub g: u8,
  /// Blue component (0-255)
  pub b: u8,
  /// Alpha component (0.0-1.0)
  pub a: f32,
}

impl Rgba {
  /// Fully transparent black
  pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0.0);
  /// Opaque black
  pub const BLACK: Self = Self::new(0, 0, 0, 1.0);
  /// Opaque white
  pub const WHITE: Self = Self::new(255, 255, 255, 1.0);
  /// Opaque red; also the broken-image marker color
  pub const RED: Self = Self::new(255, 0, 0, 1.0);
  /// Opaque blue
  pub const BLUE: Self = Self::new(0, 0, 255, 1.0);

  pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
    Self { r, g, b, a }
  }

  pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
    Self::new(r, g, b, 1.0)
  }

  /// Converts to a tiny-skia color for paints and gradient stops.
  pub fn to_skia(self) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba(
      self.r as f32 / 255.0,
      self.g as f32 / 255.0,
      self.b as f32 / 255.0,
      self.a.clamp(0.0, 1.0),
    )
    .unwrap_or(tiny_skia::Color::TRANSPARENT)
  }

  /// Channel-wise linear interpolation, `t` in [0,1].
  pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
    let ch = |a: u8, b: u8| -> u8 {
      (a as f32 + (b as f32 - a as f32) * t)
        .round()
        .clamp(0.0, 255.0) as u8
    };
    Rgba {
      r: ch(self.r, other.r),
      g: ch(self.g, other.g),
      b: ch(self.b, other.b),
      a: (self.a + (other.a - self.a) * t).clamp(0.0, 1.0),
    }
  }

  /// Side-effect-free lookahead: does a color token come next?
  pub(crate) fn can_parse(input: &mut Parser) -> bool {
    let state = input.state();
    let ok = match input.next() {
      Ok(Token::Hash(_)) | Ok(Token::IDHash(_)) => true,
      Ok(Token::Ident(name)) => named_color(name).is_some() || &**name == "transparent",
      Ok(Token::Function(name)) => matches!(&**name, "rgb" | "rgba" | "hsl" | "hsla"),
      _ => false,
    };
    input.reset(&state);
    ok
  }

  /// Parses a color from the token stream.
  pub(crate) fn parse<'i, 't>(input: &mut Parser<'i, 't>) -> ValueResult<'i, Rgba> {
    let location = input.current_source_location();
    let token = input.next()?.clone();
    match token {
      Token::Hash(ref value) | Token::IDHash(ref value) => match parse_hex(value) {
        Some(color) => Ok(color),
        None => error(input, format!("Invalid hex color '#{value}'")),
      },
      Token::Ident(ref name) => {
        if &**name == "transparent" {
          return Ok(Rgba::TRANSPARENT);
        }
        match named_color(name) {
          Some(color) => Ok(color),
          None => Err(location.new_custom_error(format!("Unknown color name '{name}'"))),
        }
      }
      Token::Function(ref name) => {
        let name = name.clone();
        input.parse_nested_block(|args| match &*name {
          "rgb" | "rgba" => parse_rgb_function(args),
          "hsl" | "hsla" => parse_hsl_function(args),
          _ => error(args, format!("'{name}' is not a color function")),
        })
      }
      ref t => Err(location.new_custom_error(format!("Expected a color, got {t:?}"))),
    }
  }

  /// Writes the canonical CSS representation.
  pub(crate) fn print(&self, out: &mut impl fmt::Write) -> fmt::Result {
    if self.a >= 1.0 {
      write!(out, "rgb({},{},{})", self.r, self.g, self.b)
    } else {
      write!(out, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
  }
}

impl fmt::Display for Rgba {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.print(f)
  }
}

fn parse_rgb_function<'i, 't>(args: &mut Parser<'i, 't>) -> ValueResult<'i, Rgba> {
  let r = parse_channel(args)?;
  args.expect_comma()?;
  let g = parse_channel(args)?;
  args.expect_comma()?;
  let b = parse_channel(args)?;
  let a = if args.is_exhausted() {
    1.0
  } else {
    args.expect_comma()?;
    parse_alpha(args)?
  };
  Ok(Rgba::new(r, g, b, a))
}

fn parse_hsl_function<'i, 't>(args: &mut Parser<'i, 't>) -> ValueResult<'i, Rgba> {
  let h = match args.next()?.clone() {
    Token::Number { value, .. } => value,
    Token::Dimension {
      value, ref unit, ..
    } if &**unit == "deg" => value,
    ref t => return error(args, format!("Expected hue, got {t:?}")),
  };
  args.expect_comma()?;
  let s = args.expect_percentage()?;
  args.expect_comma()?;
  let l = args.expect_percentage()?;
  let a = if args.is_exhausted() {
    1.0
  } else {
    args.expect_comma()?;
    parse_alpha(args)?
  };
  let (r, g, b) = hsl_to_rgb(h, s.clamp(0.0, 1.0), l.clamp(0.0, 1.0));
  Ok(Rgba::new(r, g, b, a))
}

fn parse_channel<'i, 't>(args: &mut Parser<'i, 't>) -> ValueResult<'i, u8> {
  match args.next()?.clone() {
    Token::Number { value, .. } => Ok(value.round().clamp(0.0, 255.0) as u8),
    Token::Percentage { unit_value, .. } => {
      Ok((unit_value * 255.0).round().clamp(0.0, 255.0) as u8)
    }
    ref t => error(args, format!("Expected a color channel, got {t:?}")),
  }
}

fn parse_alpha<'i, 't>(args: &mut Parser<'i, 't>) -> ValueResult<'i, f32> {
  match args.next()?.clone() {
    Token::Number { value, .. } => Ok(value.clamp(0.0, 1.0)),
    Token::Percentage { unit_value, .. } => Ok(unit_value.clamp(0.0, 1.0)),
    ref t => error(args, format!("Expected an alpha value, got {t:?}")),
  }
}

fn parse_hex(value: &str) -> Option<Rgba> {
  let nibble = |c: u8| -> Option<u8> { (c as char).to_digit(16).map(|d| d as u8) };
  let bytes = value.as_bytes();
  match bytes.len() {
    3 | 4 => {
      let mut c = [0u8; 4];
      for (i, &b) in bytes.iter().enumerate() {
        let n = nibble(b)?;
        c[i] = n << 4 | n;
      }
      let a = if bytes.len() == 4 {
        c[3] as f32 / 255.0
      } else {
        1.0
      };
      Some(Rgba::new(c[0], c[1], c[2], a))
    }
    6 | 8 => {
      let mut c = [255u8; 4];
      for i in 0..bytes.len() / 2 {
        c[i] = nibble(bytes[i * 2])? << 4 | nibble(bytes[i * 2 + 1])?;
      }
      let a = if bytes.len() == 8 {
        c[3] as f32 / 255.0
      } else {
        1.0
      };
      Some(Rgba::new(c[0], c[1], c[2], a))
    }
    _ => None,
  }
}

/// HSL to RGB conversion. Hue in degrees, saturation/lightness in [0,1].
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
  let h = h.rem_euclid(360.0) / 360.0;
  let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
  let p = 2.0 * l - q;
  let hue = |mut t: f32| -> f32 {
    if t < 0.0 {
      t += 1.0;
    }
    if t > 1.0 {
      t -= 1.0;
    }
    if t < 1.0 / 6.0 {
      p + (q - p) * 6.0 * t
    } else if t < 0.5 {
      q
    } else if t < 2.0 / 3.0 {
      p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
      p
    }
  };
  let to_byte = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
  (
    to_byte(hue(h + 1.0 / 3.0)),
    to_byte(hue(h)),
    to_byte(hue(h - 1.0 / 3.0)),
  )
}

fn named_color(name: &str) -> Option<Rgba> {
  let rgb = |r, g, b| Some(Rgba::rgb(r, g, b));
  match name {
    "black" => rgb(0, 0, 0),
    "silver" => rgb(192, 192, 192),
    "gray" | "grey" => rgb(128, 128, 128),
    "white" => rgb(255, 255, 255),
    "maroon" => rgb(128, 0, 0),
    "red" => rgb(255, 0, 0),
    "purple" => rgb(128, 0, 128),
    "fuchsia" | "magenta" => rgb(255, 0, 255),
    "green" => rgb(0, 128, 0),
    "lime" => rgb(0, 255, 0),
    "olive" => rgb(128, 128, 0),
    "yellow" => rgb(255, 255, 0),
    "navy" => rgb(0, 0, 128),
    "blue" => rgb(0, 0, 255),
    "teal" => rgb(0, 128, 128),
    "aqua" | "cyan" => rgb(0, 255, 255),
    "orange" => rgb(255, 165, 0),
    "brown" => rgb(165, 42, 42),
    "pink" => rgb(255, 192, 203),
    "gold" => rgb(255, 215, 0),
    "indigo" => rgb(75, 0, 130),
    "violet" => rgb(238, 130, 238),
    "khaki" => rgb(240, 230, 140),
    "coral" => rgb(255, 127, 80),
    "salmon" => rgb(250, 128, 114),
    "turquoise" => rgb(64, 224, 208),
    "crimson" => rgb(220, 20, 60),
    "chocolate" => rgb(210, 105, 30),
    "tomato" => rgb(255, 99, 71),
    "orchid" => rgb(218, 112, 214),
    "beige" => rgb(245, 245, 220),
    "ivory" => rgb(255, 255, 240),
    "lavender" => rgb(230, 230, 250),
    "plum" => rgb(221, 160, 221),
    "tan" => rgb(210, 180, 140),
    "sienna" => rgb(160, 82, 45),
    "slategray" | "slategrey" => rgb(112, 128, 144),
    "darkgray" | "darkgrey" => rgb(169, 169, 169),
    "lightgray" | "lightgrey" => rgb(211, 211, 211),
    "darkred" => rgb(139, 0, 0),
    "darkgreen" => rgb(0, 100, 0),
    "darkblue" => rgb(0, 0, 139),
    _ => None,
  }
}
