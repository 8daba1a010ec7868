//! Concrete sizing of image values through the default sizing algorithm,
//! driven by the intrinsic dimensions each variant reports.

mod common;

use common::{MemoryLoader, TestSnapshot};
use ctk_css_image::image::Image;
use ctk_css_image::surface::Surface;
use ctk_css_image::Rgba;

fn parse(css: &str) -> Image {
  Image::parse_str(css).unwrap_or_else(|e| panic!("{css:?} should parse: {e}"))
}

#[test]
fn test_loaded_surface_uses_intrinsic_size() {
  let snapshot =
    TestSnapshot::with_loader(MemoryLoader::new().with("a.png", Surface::solid(48, 24, Rgba::RED)));
  let computed = parse("url(a.png)").compute(0, &snapshot);
  assert_eq!(computed.concrete_size(0.0, 0.0, 100.0, 100.0), (48.0, 24.0));
  // One specified dimension follows the 2:1 aspect ratio.
  assert_eq!(computed.concrete_size(96.0, 0.0, 100.0, 100.0), (96.0, 48.0));
  assert_eq!(computed.concrete_size(0.0, 12.0, 100.0, 100.0), (24.0, 12.0));
}

#[test]
fn test_gradient_fills_the_default_box() {
  let gradient = parse("linear-gradient(red, blue)");
  assert_eq!(gradient.concrete_size(0.0, 0.0, 300.0, 150.0), (300.0, 150.0));
  assert_eq!(gradient.concrete_size(50.0, 0.0, 300.0, 150.0), (50.0, 150.0));
}

#[test]
fn test_cross_fade_has_no_intrinsic_size() {
  let fade = parse("cross-fade(50%, url(a.png), url(b.png))");
  assert_eq!((fade.width(), fade.height()), (0, 0));
  assert_eq!(fade.aspect_ratio(), 0.0);
  assert_eq!(fade.concrete_size(0.0, 0.0, 64.0, 32.0), (64.0, 32.0));
}

#[test]
fn test_fallback_inherits_the_used_child_size() {
  let snapshot =
    TestSnapshot::with_loader(MemoryLoader::new().with("ok.png", Surface::solid(32, 32, Rgba::BLUE)));
  let computed = parse("image(url(missing.png), url(ok.png))").compute(0, &snapshot);
  assert_eq!(computed.concrete_size(0.0, 0.0, 100.0, 100.0), (32.0, 32.0));
}

#[test]
fn test_scaled_reports_nominal_size() {
  let loader = MemoryLoader::new().with("a@2.png", Surface::solid(64, 32, Rgba::RED));
  let mut snapshot = TestSnapshot::with_loader(loader);
  snapshot.scale = 2;
  let computed = parse("-ctk-scaled(url(a.png), url(a@2.png))").compute(0, &snapshot);
  assert_eq!(computed.concrete_size(0.0, 0.0, 100.0, 100.0), (32.0, 16.0));
}

#[test]
#[should_panic(expected = "positive defaults")]
fn test_non_positive_defaults_are_a_usage_error() {
  parse("linear-gradient(red, blue)").concrete_size(0.0, 0.0, 0.0, 100.0);
}
