//! 2D drawing context
//!
//! A thin cairo-like layer over a tiny-skia pixmap: a transform stack with
//! save/restore, rectangular clipping, solid and shader fills, and surface
//! blits with opacity and blend modes. Image values draw through this type
//! only, keeping them independent of the backend.

use tiny_skia::{
  BlendMode, FillRule, FilterQuality, Mask, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Shader,
  Transform,
};

use crate::color::Rgba;
use crate::surface::Surface;

#[derive(Clone)]
struct CanvasState {
  transform: Transform,
  clip: Option<Mask>,
}

/// Drawing context over an owned-elsewhere pixmap.
pub struct Canvas<'a> {
  pixmap: &'a mut Pixmap,
  state: CanvasState,
  stack: Vec<CanvasState>,
}

impl<'a> Canvas<'a> {
  pub fn new(pixmap: &'a mut Pixmap) -> Self {
    Self {
      pixmap,
      state: CanvasState {
        transform: Transform::identity(),
        clip: None,
      },
      stack: Vec::new(),
    }
  }

  pub fn width(&self) -> u32 {
    self.pixmap.width()
  }

  pub fn height(&self) -> u32 {
    self.pixmap.height()
  }

  /// Pushes the current transform and clip.
  pub fn save(&mut self) {
    self.stack.push(self.state.clone());
  }

  /// Pops the most recently saved state. Unbalanced restores are ignored.
  pub fn restore(&mut self) {
    if let Some(state) = self.stack.pop() {
      self.state = state;
    }
  }

  pub fn translate(&mut self, tx: f64, ty: f64) {
    self.state.transform = self.state.transform.pre_translate(tx as f32, ty as f32);
  }

  pub fn scale(&mut self, sx: f64, sy: f64) {
    self.state.transform = self.state.transform.pre_scale(sx as f32, sy as f32);
  }

  /// Intersects the clip with a rectangle in the current user space.
  pub fn clip_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
    let Some(rect) = Rect::from_xywh(x as f32, y as f32, width as f32, height as f32) else {
      return;
    };
    let path = PathBuilder::from_rect(rect);
    match self.state.clip.as_mut() {
      Some(mask) => {
        mask.intersect_path(&path, FillRule::Winding, false, self.state.transform);
      }
      None => {
        let Some(mut mask) = Mask::new(self.pixmap.width(), self.pixmap.height()) else {
          return;
        };
        mask.fill_path(&path, FillRule::Winding, false, self.state.transform);
        self.state.clip = Some(mask);
      }
    }
  }

  /// Fills a rectangle with a solid color.
  pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = false;
    self.fill_rect_paint(x, y, width, height, &paint);
  }

  /// Fills a rectangle with a shader whose coordinates live in the current
  /// user space.
  pub fn fill_rect_shader(&mut self, x: f64, y: f64, width: f64, height: f64, shader: Shader) {
    let paint = Paint {
      shader,
      anti_alias: false,
      ..Paint::default()
    };
    self.fill_rect_paint(x, y, width, height, &paint);
  }

  fn fill_rect_paint(&mut self, x: f64, y: f64, width: f64, height: f64, paint: &Paint) {
    let Some(rect) = Rect::from_xywh(x as f32, y as f32, width as f32, height as f32) else {
      return;
    };
    self.pixmap.fill_rect(
      rect,
      paint,
      self.state.transform,
      self.state.clip.as_ref(),
    );
  }

  /// Blits a surface with its top-left corner at `(x, y)` in user space.
  pub fn draw_surface(
    &mut self,
    surface: &Surface,
    x: f64,
    y: f64,
    opacity: f32,
    quality: FilterQuality,
    blend_mode: BlendMode,
  ) {
    let Some(pixmap) = surface.pixmap() else {
      return;
    };
    let paint = PixmapPaint {
      opacity: opacity.clamp(0.0, 1.0),
      blend_mode,
      quality,
    };
    self.pixmap.draw_pixmap(
      0,
      0,
      pixmap.as_ref(),
      &paint,
      self.state.transform.pre_translate(x as f32, y as f32),
      self.state.clip.as_ref(),
    );
  }
}
