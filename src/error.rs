//! Error types for the CSS image subsystem
//!
//! Only `parse` fails visibly; `compute` and `draw` are total. Load and
//! lookup failures are reported through the style snapshot's error channel
//! and collapse into empty surfaces so the draw pipeline keeps going.
//!
//! All errors use the `thiserror` crate for minimal boilerplate and
//! proper error trait implementations.

use thiserror::Error;

/// Result type alias for image-value operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
  /// CSS image grammar error
  #[error("Parse error: {0}")]
  Parse(#[from] ParseError),

  /// Resource loading or decoding error
  #[error("Load error: {0}")]
  Load(#[from] LoadError),
}

/// Errors produced while parsing the CSS image grammar.
///
/// These are recoverable: the style cascade normally reacts by trying a
/// different value production.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
  /// Invalid image value syntax
  #[error("Invalid image at line {line}, column {column}: {message}")]
  InvalidImage {
    message: String,
    line: u32,
    column: u32,
  },

  /// The upcoming tokens are not an image production at all
  #[error("Not an image value")]
  NotAnImage,
}

/// Errors raised while loading or decoding image resources.
///
/// These never escape `compute`; they travel through the snapshot's error
/// channel instead.
#[derive(Error, Debug, Clone)]
pub enum LoadError {
  /// The referenced resource could not be read
  #[error("Failed to read '{url}': {message}")]
  NotFound { url: String, message: String },

  /// The resource was read but could not be decoded
  #[error("Failed to decode '{url}': {message}")]
  Decode { url: String, message: String },

  /// Icon-theme lookup came back empty
  #[error("No icon named '{name}' in icon theme")]
  MissingAsset { name: String },

  /// The loader does not handle this kind of reference
  #[error("Unsupported image reference '{url}'")]
  Unsupported { url: String },
}
