use crate::image_pipeline::common::constants::BLUR_SIGMA;
use crate::image_pipeline::raster::{Raster, quantize};

/// Kernel half-width; taps beyond 3 sigma are negligible.
const RADIUS: usize = (BLUR_SIGMA * 3.0 + 0.999) as usize;

fn kernel() -> [f32; 2 * RADIUS + 1] {
    let mut weights = [0.0f32; 2 * RADIUS + 1];
    for (i, w) in weights.iter_mut().enumerate() {
        let d = i as f32 - RADIUS as f32;
        *w = (-(d * d) / (2.0 * BLUR_SIGMA * BLUR_SIGMA)).exp();
    }
    let sum: f32 = weights.iter().sum();
    weights.iter_mut().for_each(|w| *w /= sum);
    weights
}

/// Separable Gaussian blur of the colour channels.
///
/// Zero padding rather than edge clamping: pixels beyond the frame count as
/// black, so the outermost ring darkens slightly. Alpha is carried over
/// unchanged.
pub fn smooth(raster: &Raster) -> Raster {
    let (width, height) = (raster.width(), raster.height());
    let kernel = kernel();
    let rgba = raster.as_rgba();

    let mut horizontal = vec![0.0f32; width * height * 3];
    for y in 0..height {
        for x in 0..width {
            for (k, &w) in kernel.iter().enumerate() {
                let Some(sx) = (x + k).checked_sub(RADIUS).filter(|&sx| sx < width) else {
                    continue;
                };
                let s = (y * width + sx) * Raster::CHANNELS;
                let o = (y * width + x) * 3;
                for c in 0..3 {
                    horizontal[o + c] += w * rgba[s + c] as f32;
                }
            }
        }
    }

    let mut data = Vec::with_capacity(rgba.len());
    for y in 0..height {
        for x in 0..width {
            let mut acc = [0.0f32; 3];
            for (k, &w) in kernel.iter().enumerate() {
                let Some(sy) = (y + k).checked_sub(RADIUS).filter(|&sy| sy < height) else {
                    continue;
                };
                let s = (sy * width + x) * 3;
                for c in 0..3 {
                    acc[c] += w * horizontal[s + c];
                }
            }
            let alpha = rgba[(y * width + x) * Raster::CHANNELS + 3];
            let [r, g, b] = acc.map(quantize);
            data.extend_from_slice(&[r, g, b, alpha]);
        }
    }
    Raster::from_raw_parts(width, height, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::common::constants::CANVAS_SIZE;

    #[test]
    fn test_kernel_is_normalized_and_symmetric() {
        let k = kernel();
        assert_eq!(k.len(), 5);
        assert!((k.iter().sum::<f32>() - 1.0).abs() < 1e-6);
        assert_eq!(k[0], k[4]);
        assert_eq!(k[1], k[3]);
        assert!(k[2] > 0.75 && k[2] < 0.8);
    }

    #[test]
    fn test_point_spreads_to_neighbours() {
        let mut raster = Raster::black(CANVAS_SIZE, CANVAS_SIZE);
        raster.put_pixel(14, 14, [255, 255, 255, 255]);
        let out = smooth(&raster);

        let center = out.intensity(14, 14);
        assert!(center > 100.0 && center < 255.0, "center = {center}");
        let side = out.intensity(15, 14);
        assert!(side > 10.0 && side < center);
        for (x, y) in [(13, 14), (14, 13), (14, 15)] {
            assert_eq!(out.intensity(x, y), side);
        }
        assert_eq!(out.intensity(17, 14), 0.0);
    }

    #[test]
    fn test_flat_interior_is_preserved() {
        let values = [200u8; CANVAS_SIZE * CANVAS_SIZE];
        let raster = Raster::from_gray(CANVAS_SIZE, CANVAS_SIZE, &values).unwrap();
        let out = smooth(&raster);
        assert_eq!(out.intensity(14, 14), 200.0);
        assert!(out.intensity(0, 0) < 200.0);
        assert_eq!(out.pixel(0, 0)[3], 255);
    }

    #[test]
    fn test_black_stays_black() {
        let raster = Raster::black(CANVAS_SIZE, CANVAS_SIZE);
        assert_eq!(smooth(&raster), raster);
    }
}
