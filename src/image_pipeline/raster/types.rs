//! Pixel container types shared by all stages

use image::{Rgba, RgbaImage};
use serde::Serialize;

use crate::image_pipeline::common::constants::PIXEL_COUNT;
use crate::image_pipeline::common::error::{PipelineError, Result};

/// An immutable 8-bit RGBA image.
///
/// Every stage takes a `&Raster` and returns a fresh one, so a snapshot of the
/// drawing surface is never observed while it changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    /// RGBA pixel data interleaved [R, G, B, A, R, G, B, A, ...]
    data: Vec<u8>,
}

impl Raster {
    pub const CHANNELS: usize = 4;

    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        check_layout(width, height, Self::CHANNELS, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_rgb(width: usize, height: usize, data: &[u8]) -> Result<Self> {
        check_layout(width, height, 3, data.len())?;
        let data = data
            .chunks_exact(3)
            .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], u8::MAX])
            .collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_gray(width: usize, height: usize, data: &[u8]) -> Result<Self> {
        check_layout(width, height, 1, data.len())?;
        let data = data.iter().flat_map(|&v| [v, v, v, u8::MAX]).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// An opaque black raster. Callers guarantee non-zero dimensions.
    pub(crate) fn black(width: usize, height: usize) -> Self {
        let data = [0, 0, 0, u8::MAX].repeat(width * height);
        Self {
            width,
            height,
            data,
        }
    }

    pub(crate) fn from_raw_parts(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height * Self::CHANNELS);
        Self {
            width,
            height,
            data,
        }
    }

    /// Composites onto opaque black, so transparent pixels read as no ink.
    pub(crate) fn flatten_to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let [r, g, b, a] = self.pixel(x as usize, y as usize);
            let over_black = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
            Rgba([over_black(r), over_black(g), over_black(b), u8::MAX])
        })
    }

    pub(crate) fn from_image(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self::from_raw_parts(width as usize, height as usize, image.into_raw())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_rgba(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * Self::CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    pub fn put_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let i = (y * self.width + x) * Self::CHANNELS;
        self.data[i..i + Self::CHANNELS].copy_from_slice(&rgba);
    }

    /// Mean of the RGB channels on the 0-255 scale. Alpha does not take part.
    pub fn intensity(&self, x: usize, y: usize) -> f32 {
        let [r, g, b, _] = self.pixel(x, y);
        (r as f32 + g as f32 + b as f32) / 3.0
    }

    pub fn intensity_field(&self) -> IntensityField {
        let values = self
            .data
            .chunks_exact(Self::CHANNELS)
            .map(|px| (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0 / 255.0)
            .collect();
        IntensityField {
            width: self.width,
            height: self.height,
            values,
        }
    }
}

fn check_layout(width: usize, height: usize, channels: usize, len: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(PipelineError::InvalidDimensions(width, height));
    }
    let expected = width * height * channels;
    if len != expected {
        return Err(PipelineError::BufferSizeMismatch {
            expected,
            actual: len,
        });
    }
    Ok(())
}

/// Normalized intensities in [0, 1], row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityField {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl IntensityField {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[y * self.width + x]
    }

    pub(crate) fn into_values(self) -> Vec<f32> {
        self.values
    }
}

/// The classifier input: exactly 784 intensities in [0, 1], index `y * 28 + x`.
///
/// Serializes as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PixelVector(Vec<f32>);

impl PixelVector {
    pub const LEN: usize = PIXEL_COUNT;

    pub(crate) fn from_values_unchecked(values: Vec<f32>) -> Self {
        debug_assert_eq!(values.len(), Self::LEN);
        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<f32>> for PixelVector {
    type Error = PipelineError;

    fn try_from(values: Vec<f32>) -> Result<Self> {
        if values.len() != Self::LEN {
            return Err(PipelineError::InvalidPixelCount(values.len()));
        }
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..=1.0).contains(*v))
        {
            return Err(PipelineError::PixelOutOfRange { index, value });
        }
        Ok(Self(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimensions_rejected() {
        let result = Raster::from_rgba(0, 5, Vec::new());
        assert!(matches!(result.unwrap_err(), PipelineError::InvalidDimensions(0, 5)));
    }

    #[test]
    fn test_short_buffer_rejected() {
        let result = Raster::from_rgb(2, 2, &[0u8; 11]);
        assert!(matches!(
            result.unwrap_err(),
            PipelineError::BufferSizeMismatch { expected: 12, actual: 11 }
        ));
    }

    #[test]
    fn test_gray_and_rgb_are_opaque() {
        let gray = Raster::from_gray(2, 1, &[10, 200]).unwrap();
        assert_eq!(gray.pixel(1, 0), [200, 200, 200, 255]);

        let rgb = Raster::from_rgb(1, 1, &[1, 2, 3]).unwrap();
        assert_eq!(rgb.pixel(0, 0), [1, 2, 3, 255]);
    }

    #[test]
    fn test_intensity_ignores_alpha() {
        let raster = Raster::from_rgba(1, 1, vec![30, 60, 90, 0]).unwrap();
        assert_eq!(raster.intensity(0, 0), 60.0);

        let field = raster.intensity_field();
        assert!((field.get(0, 0) - 60.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_flatten_composites_over_black() {
        let raster = Raster::from_rgba(2, 1, vec![200, 100, 50, 255, 200, 100, 50, 128]).unwrap();

        let image = raster.flatten_to_image();

        assert_eq!(image.get_pixel(0, 0).0, [200, 100, 50, 255]);
        assert_eq!(image.get_pixel(1, 0).0, [100, 50, 25, 255]);
        assert_eq!(Raster::from_image(image).pixel(1, 0), [100, 50, 25, 255]);
    }

    #[test]
    fn test_pixel_vector_length_enforced() {
        let result = PixelVector::try_from(vec![0.0; 783]);
        assert!(matches!(result.unwrap_err(), PipelineError::InvalidPixelCount(783)));

        let vector = PixelVector::try_from(vec![0.5; 784]).unwrap();
        assert_eq!(vector.len(), 784);
    }

    #[test]
    fn test_pixel_vector_range_enforced() {
        let mut values = vec![0.0; 784];
        values[100] = 1.5;
        let result = PixelVector::try_from(values);
        assert!(matches!(
            result.unwrap_err(),
            PipelineError::PixelOutOfRange { index: 100, .. }
        ));
    }

    #[test]
    fn test_pixel_vector_serializes_as_array() {
        let vector = PixelVector::try_from(vec![0.0; 784]).unwrap();
        let json = serde_json::to_string(&vector).unwrap();
        assert!(json.starts_with("[0.0,"));
        assert_eq!(json.matches(',').count(), 783);
    }
}
