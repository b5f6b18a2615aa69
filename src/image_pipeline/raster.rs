//! Raster module
//!
//! Pixel containers, the compositing canvas used by the resampling stages,
//! and format-agnostic reading of drawing-surface snapshots.

mod canvas;
mod decoded_image_reader;
mod reader;
pub mod types;

pub use canvas::{Canvas, RectF};
pub(crate) use canvas::quantize;
pub use decoded_image_reader::DecodedImageReader;
pub use reader::RasterReader;
pub use types::{IntensityField, PixelVector, Raster};
