//! CSS image values: parsing, computation and rendering.
//!
//! This crate implements the image-value subsystem of a CSS-styled
//! toolkit: the polymorphic [`Image`] type covers `url(...)` references,
//! themed and recolorable icons, scale sets, linear and radial gradients
//! (including the legacy `-ctk-gradient` syntax), cross-fades and
//! `image(...)` fallback lists.
//!
//! The lifecycle is parse, compute, draw: [`Image::parse_str`] builds a
//! value from CSS, [`Image::compute`] resolves it against a
//! [`StyleSnapshot`] (loading resources and rasterizing icons along the
//! way), and [`Image::draw`] renders the computed value into a [`Canvas`]
//! backed by a tiny-skia pixmap.
//!
//! ```
//! use ctk_css_image::Image;
//!
//! let image = Image::parse_str("linear-gradient(to right, red, blue)").unwrap();
//! let surface = image.materialize(64, 32);
//! assert_eq!((surface.width(), surface.height()), (64, 32));
//! ```

pub mod canvas;
pub mod color;
pub mod error;
pub mod icon_theme;
pub mod image;
pub mod loader;
pub mod number;
pub mod position;
pub mod snapshot;
pub mod surface;

mod parse;

pub use canvas::Canvas;
pub use color::Rgba;
pub use error::{Error, LoadError, ParseError, Result};
pub use icon_theme::{IconInfo, IconLookupFlags, IconSource, IconTheme};
pub use image::sizing::concrete_size;
pub use image::Image;
pub use loader::{FileLoader, ImageLoader};
pub use number::{Number, Unit};
pub use position::Position;
pub use snapshot::{StyleSnapshot, SymbolicColors};
pub use surface::Surface;
