use crate::image_pipeline::common::constants::{CANVAS_SIZE, CENTER};
use crate::image_pipeline::raster::{Canvas, IntensityField, Raster, RectF};

/// Intensity-weighted mean position of a raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub cx: f64,
    pub cy: f64,
    /// Sum of normalized intensities
    pub mass: f64,
}

impl Centroid {
    /// `None` for an all-black field, where the mean position is undefined.
    pub fn of(field: &IntensityField) -> Option<Self> {
        let mut sum_x = 0.0f64;
        let mut sum_y = 0.0f64;
        let mut mass = 0.0f64;
        for y in 0..field.height() {
            for x in 0..field.width() {
                let val = field.get(x, y) as f64;
                sum_x += x as f64 * val;
                sum_y += y as f64 * val;
                mass += val;
            }
        }
        if mass == 0.0 {
            return None;
        }
        Some(Self {
            cx: sum_x / mass,
            cy: sum_y / mass,
            mass,
        })
    }
}

/// Sub-pixel shift applied to move the centroid onto (14, 14).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translation {
    pub dx: f64,
    pub dy: f64,
}

impl Translation {
    pub fn towards_center(centroid: &Centroid) -> Self {
        Self {
            dx: CENTER - centroid.cx,
            dy: CENTER - centroid.cy,
        }
    }
}

/// Translates `raster` so its centre of mass sits on (14, 14), returning the
/// centroid it was moved by.
///
/// Content pushed past the frame is clipped. A massless raster is returned
/// unchanged.
pub fn recenter(raster: &Raster) -> (Raster, Option<Centroid>) {
    let Some(centroid) = Centroid::of(&raster.intensity_field()) else {
        return (raster.clone(), None);
    };
    let translation = Translation::towards_center(&centroid);

    let mut canvas = Canvas::new(CANVAS_SIZE, CANVAS_SIZE);
    canvas.fill_black();
    canvas.draw_image(
        raster,
        RectF::covering(raster),
        RectF::new(
            translation.dx as f32,
            translation.dy as f32,
            raster.width() as f32,
            raster.height() as f32,
        ),
    );
    (canvas.to_raster(), Some(centroid))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with(lit: &[(usize, usize, u8)]) -> Raster {
        let mut raster = Raster::black(CANVAS_SIZE, CANVAS_SIZE);
        for &(x, y, v) in lit {
            raster.put_pixel(x, y, [v, v, v, 255]);
        }
        raster
    }

    fn centroid(raster: &Raster) -> Centroid {
        Centroid::of(&raster.intensity_field()).unwrap()
    }

    #[test]
    fn test_zero_mass_is_identity() {
        let raster = Raster::black(CANVAS_SIZE, CANVAS_SIZE);
        let (out, moved_by) = recenter(&raster);
        assert_eq!(out, raster);
        assert_eq!(moved_by, None);
    }

    #[test]
    fn test_weighted_mean_position() {
        let raster = frame_with(&[(2, 4, 255), (6, 4, 255), (6, 10, 255)]);
        let c = centroid(&raster);
        assert!((c.cx - 14.0 / 3.0).abs() < 1e-9);
        assert!((c.cy - 6.0).abs() < 1e-9);
        assert!((c.mass - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_integer_shift_is_exact() {
        let lit: Vec<_> = (2..5)
            .flat_map(|x| (20..23).map(move |y| (x, y, 255)))
            .collect();
        let (out, moved_by) = recenter(&frame_with(&lit));

        let translation = Translation::towards_center(&moved_by.unwrap());
        assert_eq!(translation, Translation { dx: 11.0, dy: -7.0 });
        let expected: Vec<_> = (13..16)
            .flat_map(|x| (13..16).map(move |y| (x, y, 255)))
            .collect();
        assert_eq!(out, frame_with(&expected));
    }

    #[test]
    fn test_sub_pixel_shift_lands_on_center() {
        let raster = frame_with(&[(3, 5, 255), (4, 5, 255), (4, 6, 120)]);
        let (out, moved_by) = recenter(&raster);
        let translation = Translation::towards_center(&moved_by.unwrap());
        assert!(translation.dx.fract() != 0.0);

        let c = centroid(&out);
        assert!((c.cx - 14.0).abs() <= 0.5, "cx = {}", c.cx);
        assert!((c.cy - 14.0).abs() <= 0.5, "cy = {}", c.cy);
    }

    #[test]
    fn test_already_centered_is_untouched() {
        let raster = frame_with(&[(13, 14, 255), (15, 14, 255), (14, 13, 255), (14, 15, 255)]);
        let (out, moved_by) = recenter(&raster);
        let translation = Translation::towards_center(&moved_by.unwrap());
        assert_eq!(translation, Translation { dx: 0.0, dy: 0.0 });
        assert_eq!(out, raster);
    }
}
