//! Snapshot reader backed by the `image` crate.
//!
//! Drawing surfaces are usually exported as PNG; JPEG, BMP and TIFF are
//! accepted as well. Every format is expanded to 8-bit RGBA so transparent
//! regions composite to black in the downsampler.

use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::raster::reader::RasterReader;
use crate::image_pipeline::raster::types::Raster;

pub struct DecodedImageReader;

impl RasterReader for DecodedImageReader {
    fn read_raster(&self, data: &[u8]) -> Result<Raster> {
        debug!("Decoding snapshot, {} bytes", data.len());

        let decoded = image::load_from_memory(data)
            .map_err(|e| PipelineError::DecodeError(e.to_string()))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();

        debug!("Decoded snapshot: {}x{}", width, height);

        Raster::from_rgba(width as usize, height as usize, rgba.into_raw())
    }
}
