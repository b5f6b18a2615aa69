use image::imageops::{self, FilterType};

use crate::image_pipeline::common::constants::CANVAS_SIZE;
use crate::image_pipeline::raster::Raster;

/// Resamples a snapshot of any size onto an opaque black 28x28 raster.
///
/// The snapshot is flattened over black first, then resized with a triangle
/// filter whose support widens with the reduction ratio.
pub fn downsample(source: &Raster) -> Raster {
    let flattened = source.flatten_to_image();
    let size = CANVAS_SIZE as u32;
    Raster::from_image(imageops::resize(&flattened, size, size, FilterType::Triangle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_source_gives_black_frame() {
        let source = Raster::from_gray(300, 200, &vec![0u8; 300 * 200]).unwrap();
        let out = downsample(&source);
        assert_eq!(out, Raster::black(CANVAS_SIZE, CANVAS_SIZE));
    }

    #[test]
    fn test_working_size_is_passed_through() {
        let mut source = Raster::black(CANVAS_SIZE, CANVAS_SIZE);
        source.put_pixel(3, 17, [90, 120, 150, 255]);
        assert_eq!(downsample(&source), source);
    }

    #[test]
    fn test_shrinking_keeps_ink_local() {
        // 56x56 -> 28x28: a 2x2 block lands on (5, 5), a lone pixel near (20, 1)
        let mut source = Raster::black(56, 56);
        for (x, y) in [(10, 10), (11, 10), (10, 11), (11, 11), (40, 2)] {
            source.put_pixel(x, y, [255, 255, 255, 255]);
        }
        let out = downsample(&source);

        assert_eq!((out.width(), out.height()), (CANVAS_SIZE, CANVAS_SIZE));
        let block = out.intensity(5, 5);
        assert!(block > 100.0, "block = {block}");
        let lone = out.intensity(20, 1);
        assert!(lone > 0.0 && lone < block, "lone = {lone}");
        assert_eq!(out.intensity(8, 5), 0.0);
        assert_eq!(out.intensity(5, 8), 0.0);
    }

    #[test]
    fn test_non_square_source_is_stretched() {
        let mut source = Raster::black(56, 28);
        source.put_pixel(55, 27, [255, 255, 255, 255]);
        let out = downsample(&source);
        assert!(out.intensity(27, 27) > 50.0);
    }

    #[test]
    fn test_transparent_background_composites_to_black() {
        let source = Raster::from_rgba(10, 10, [255, 255, 255, 0].repeat(100)).unwrap();
        assert_eq!(downsample(&source), Raster::black(CANVAS_SIZE, CANVAS_SIZE));
    }
}
