use crate::image_pipeline::common::constants::CANVAS_SIZE;
use crate::image_pipeline::raster::{PixelVector, Raster};

/// Flattens the final 28x28 raster row-major into RGB-mean / 255 values.
pub fn emit(raster: &Raster) -> PixelVector {
    debug_assert_eq!((raster.width(), raster.height()), (CANVAS_SIZE, CANVAS_SIZE));
    let values = raster
        .intensity_field()
        .into_values()
        .into_iter()
        .map(|v| v.clamp(0.0, 1.0))
        .collect();
    PixelVector::from_values_unchecked(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_layout() {
        let mut raster = Raster::black(CANVAS_SIZE, CANVAS_SIZE);
        raster.put_pixel(5, 2, [255, 255, 255, 255]);
        raster.put_pixel(27, 27, [0, 0, 255, 255]);

        let pixels = emit(&raster);
        assert_eq!(pixels.len(), PixelVector::LEN);
        assert_eq!(pixels.as_slice()[2 * 28 + 5], 1.0);
        assert!((pixels.as_slice()[783] - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(pixels.as_slice().iter().filter(|&&v| v > 0.0).count(), 2);
    }
}
