//! Parsing and printing of image values.
//!
//! Printed values must reparse to equal values, so most cases here assert
//! the canonical form and round-trip it once.

use ctk_css_image::image::Image;

fn parse(css: &str) -> Image {
  Image::parse_str(css).unwrap_or_else(|e| panic!("{css:?} should parse: {e}"))
}

fn round_trips(css: &str) {
  let image = parse(css);
  let printed = image.to_css_string();
  let reparsed = Image::parse_str(&printed)
    .unwrap_or_else(|e| panic!("printed form {printed:?} should reparse: {e}"));
  assert!(
    image.equal(&reparsed),
    "{css:?} printed as {printed:?} but the reparse is not equal"
  );
  // Printing is canonical: the second print matches the first.
  assert_eq!(reparsed.to_css_string(), printed);
}

// ---------------------------------------------------------------------------
// url
// ---------------------------------------------------------------------------

#[test]
fn test_url_forms() {
  let unquoted = parse("url(foo.png)");
  let quoted = parse("url(\"foo.png\")");
  assert!(unquoted.equal(&quoted));
  assert_eq!(unquoted.to_css_string(), "url(\"foo.png\")");
  assert_eq!(unquoted.width(), 0);
  assert_eq!(unquoted.aspect_ratio(), 0.0);
}

#[test]
fn test_url_escaping_round_trips() {
  round_trips("url(\"we ird\\\" name.png\")");
}

// ---------------------------------------------------------------------------
// gradients
// ---------------------------------------------------------------------------

#[test]
fn test_linear_gradient_canonical_forms() {
  assert_eq!(
    parse("linear-gradient(to bottom, red, blue)").to_css_string(),
    "linear-gradient(rgb(255,0,0), rgb(0,0,255))"
  );
  assert_eq!(
    parse("linear-gradient(to top right, red 25%, blue)").to_css_string(),
    "linear-gradient(to top right, rgb(255,0,0) 25%, rgb(0,0,255))"
  );
  assert_eq!(
    parse("repeating-linear-gradient(0.25turn, red, blue 10px)").to_css_string(),
    "repeating-linear-gradient(90deg, rgb(255,0,0), rgb(0,0,255) 10px)"
  );
}

#[test]
fn test_linear_gradient_round_trips() {
  round_trips("linear-gradient(red, blue)");
  round_trips("linear-gradient(45deg, red, green, blue)");
  round_trips("linear-gradient(to left, red 10px, blue 90%)");
  round_trips("repeating-linear-gradient(to top, red, blue 50%)");
}

#[test]
fn test_linear_gradient_rejects_bad_directions() {
  assert!(Image::parse_str("linear-gradient(to, red, blue)").is_err());
  assert!(Image::parse_str("linear-gradient(to left right, red, blue)").is_err());
  assert!(Image::parse_str("linear-gradient(to top bottom, red, blue)").is_err());
}

#[test]
fn test_radial_gradient_round_trips() {
  round_trips("radial-gradient(red, blue)");
  round_trips("radial-gradient(circle closest-side at left top, red, blue)");
  round_trips("radial-gradient(10px 20px at 25% 75%, red, blue 80%)");
  round_trips("repeating-radial-gradient(circle 16px, red, blue 8px)");
}

#[test]
fn test_legacy_gradient_round_trips() {
  round_trips("-ctk-gradient(linear, left top, right bottom, from(red), to(blue))");
  round_trips("-ctk-gradient(radial, center center, 0, center center, 1, from(red), color-stop(0.5, green), to(blue))");
}

// ---------------------------------------------------------------------------
// cross-fade, image(), scaled, icons
// ---------------------------------------------------------------------------

#[test]
fn test_cross_fade_one_and_two_images() {
  round_trips("cross-fade(25%, url(\"a.png\"), url(\"b.png\"))");
  round_trips("cross-fade(50%, url(\"a.png\"))");
  let image = parse("cross-fade(25%, url(a.png), url(b.png))");
  assert_eq!(image.width(), 0);
  assert_eq!(image.aspect_ratio(), 0.0);
}

#[test]
fn test_fallback_list_with_trailing_color() {
  // A candidate list with a final fallback color.
  let image = parse("image(url(a.png), url(b.svg), #ff0000)");
  assert_eq!(
    image.to_css_string(),
    "image(url(\"a.png\"), url(\"b.svg\"), rgb(255,0,0))"
  );
  assert_eq!(image.width(), 0);
  round_trips("image(url(a.png), url(b.svg), #ff0000)");
  round_trips("image(rgba(0,0,0,0.5))");
}

#[test]
fn test_fallback_color_must_be_last() {
  assert!(Image::parse_str("image(#ff0000, url(a.png))").is_err());
  assert!(Image::parse_str("image()").is_err());
}

#[test]
fn test_scaled_round_trips() {
  round_trips("-ctk-scaled(url(\"a.png\"), url(\"a@2.png\"))");
  round_trips("-ctk-scaled(linear-gradient(red, blue))");
}

#[test]
fn test_icontheme_accepts_ident_and_string() {
  let from_ident = parse("-ctk-icontheme(edit-copy)");
  let from_string = parse("-ctk-icontheme(\"edit-copy\")");
  assert!(from_ident.equal(&from_string));
  assert_eq!(from_ident.to_css_string(), "-ctk-icontheme(\"edit-copy\")");
  assert_eq!(from_ident.aspect_ratio(), 1.0);
}

#[test]
fn test_recolor_with_palette() {
  round_trips("-ctk-recolor(url(\"img.symbolic.png\"))");
  round_trips("-ctk-recolor(url(\"img.symbolic.png\"), default)");
  round_trips("-ctk-recolor(url(\"img.symbolic.png\"), success #00ff00, error #ff0000)");
}

// ---------------------------------------------------------------------------
// dispatch
// ---------------------------------------------------------------------------

#[test]
fn test_unknown_and_unsupported_functions() {
  assert!(Image::parse_str("conic-gradient(red, blue)").is_err());
  assert!(Image::parse_str("-ctk-win32-theme-part(button, 1 1)").is_err());
  assert!(Image::parse_str("red").is_err());
}

#[test]
fn test_can_parse_str_is_a_pure_lookahead() {
  assert!(Image::can_parse_str("url(a.png)"));
  assert!(Image::can_parse_str("linear-gradient(red, blue)"));
  assert!(Image::can_parse_str("-ctk-icontheme(\"go-home\")"));
  // A recognized prefix is enough; the arguments are not checked.
  assert!(Image::can_parse_str("linear-gradient(to nowhere)"));
  assert!(!Image::can_parse_str("red"));
  assert!(!Image::can_parse_str("10px"));
  assert!(!Image::can_parse_str("conic-gradient(red, blue)"));
  assert!(!Image::can_parse_str(""));
}

#[test]
fn test_non_image_values_report_not_an_image() {
  // The cascade distinguishes "not an image at all" from a malformed
  // image so it can try other value types.
  for css in ["red", "10px", "conic-gradient(red, blue)"] {
    assert!(
      matches!(
        Image::parse_str(css),
        Err(ctk_css_image::ParseError::NotAnImage)
      ),
      "{css:?}"
    );
  }
  assert!(matches!(
    Image::parse_str("linear-gradient(to nowhere, red, blue)"),
    Err(ctk_css_image::ParseError::InvalidImage { .. })
  ));
}

#[test]
fn test_function_names_are_case_sensitive() {
  assert!(Image::parse_str("LINEAR-GRADIENT(red, blue)").is_err());
  assert!(Image::parse_str("URL(\"foo.png\")").is_err());
}

#[test]
fn test_trailing_tokens_are_rejected() {
  assert!(Image::parse_str("linear-gradient(red, blue) extra").is_err());
  assert!(Image::parse_str("linear-gradient(red, blue,)").is_err());
}

#[test]
fn test_parse_errors_carry_location() {
  let err = Image::parse_str("linear-gradient(to nowhere, red, blue)").unwrap_err();
  match err {
    ctk_css_image::ParseError::InvalidImage { line, .. } => assert_eq!(line, 0),
    other => panic!("unexpected error {other:?}"),
  }
}

#[test]
fn test_equal_is_reflexive_and_variant_strict() {
  let values = [
    "url(a.png)",
    "-ctk-icontheme(\"go-home\")",
    "linear-gradient(red, blue)",
    "radial-gradient(circle, red, blue)",
    "cross-fade(50%, url(a.png), url(b.png))",
    "image(url(a.png), #ff0000)",
    "-ctk-scaled(url(a.png), url(b.png))",
    "-ctk-gradient(linear, 0 0, 1 1, from(red), to(blue))",
    "-ctk-recolor(url(\"x.symbolic.png\"))",
  ];
  let parsed: Vec<Image> = values.iter().map(|css| parse(css)).collect();
  for (i, a) in parsed.iter().enumerate() {
    for (j, b) in parsed.iter().enumerate() {
      assert_eq!(a.equal(b), i == j, "{:?} vs {:?}", values[i], values[j]);
    }
  }
}
