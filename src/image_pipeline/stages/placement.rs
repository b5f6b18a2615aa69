use crate::image_pipeline::common::constants::{CANVAS_SIZE, DIGIT_BOX};
use crate::image_pipeline::raster::{Canvas, Raster, RectF};
use crate::image_pipeline::stages::bounding_box::BoundingBox;

/// Where the cropped ink lands in the fresh 28x28 frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub source: BoundingBox,
    pub scale: f64,
    pub digit_width: f64,
    pub digit_height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Placement {
    /// Scales the long side of `bbox` to 20 pixels. Offsets are floored, so an
    /// odd leftover margin puts the extra pixel on the right or bottom.
    pub fn for_box(bbox: BoundingBox) -> Self {
        let box_width = bbox.width() as f64;
        let box_height = bbox.height() as f64;
        let scale = DIGIT_BOX / box_width.max(box_height);
        let digit_width = box_width * scale;
        let digit_height = box_height * scale;
        let frame = CANVAS_SIZE as f64;

        Self {
            source: bbox,
            scale,
            digit_width,
            digit_height,
            offset_x: ((frame - digit_width) / 2.0).floor(),
            offset_y: ((frame - digit_height) / 2.0).floor(),
        }
    }

    pub fn destination(&self) -> RectF {
        RectF::new(
            self.offset_x as f32,
            self.offset_y as f32,
            self.digit_width as f32,
            self.digit_height as f32,
        )
    }
}

/// Draws the cropped region into a black frame at `placement`.
pub fn place_digit(raster: &Raster, placement: &Placement) -> Raster {
    let mut canvas = Canvas::new(CANVAS_SIZE, CANVAS_SIZE);
    canvas.fill_black();
    canvas.draw_image(raster, placement.source.as_rect(), placement.destination());
    canvas.to_raster()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::stages::bounding_box::extract_bounding_box;

    fn frame_with(lit: &[(usize, usize)]) -> Raster {
        let mut raster = Raster::black(CANVAS_SIZE, CANVAS_SIZE);
        for &(x, y) in lit {
            raster.put_pixel(x, y, [255, 255, 255, 255]);
        }
        raster
    }

    #[test]
    fn test_single_pixel_fills_centered_square() {
        let raster = frame_with(&[(3, 25)]);
        let bbox = extract_bounding_box(&raster).unwrap();
        let placement = Placement::for_box(bbox);

        assert_eq!(placement.scale, 20.0);
        assert_eq!((placement.offset_x, placement.offset_y), (4.0, 4.0));

        let out = place_digit(&raster, &placement);
        for y in 0..CANVAS_SIZE {
            for x in 0..CANVAS_SIZE {
                let inside = (4..24).contains(&x) && (4..24).contains(&y);
                assert_eq!(out.intensity(x, y), if inside { 255.0 } else { 0.0 }, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_long_axis_is_twenty() {
        let bbox = BoundingBox { min_x: 2, min_y: 7, max_x: 7, max_y: 9 };
        let placement = Placement::for_box(bbox);

        assert!((placement.digit_width - 20.0).abs() < 1e-9);
        assert!((placement.digit_height - 20.0 * 3.0 / 6.0).abs() < 1e-9);
        assert_eq!((placement.offset_x, placement.offset_y), (4.0, 9.0));
    }

    #[test]
    fn test_offset_is_floored() {
        // 3 wide, 2 tall: height 13.33, margin 14.67 / 2 = 7.33
        let bbox = BoundingBox { min_x: 0, min_y: 0, max_x: 2, max_y: 1 };
        let placement = Placement::for_box(bbox);

        assert!((placement.digit_height - 40.0 / 3.0).abs() < 1e-9);
        assert_eq!(placement.offset_y, 7.0);
        assert_eq!(placement.offset_x, 4.0);
    }

    #[test]
    fn test_full_frame_ink_is_shrunk() {
        let raster = frame_with(&[(0, 0), (27, 27)]);
        let bbox = extract_bounding_box(&raster).unwrap();
        let placement = Placement::for_box(bbox);
        assert!(placement.scale < 1.0);

        let out = place_digit(&raster, &placement);
        assert_eq!((out.width(), out.height()), (CANVAS_SIZE, CANVAS_SIZE));
        assert!(out.intensity(4, 4) > 0.0);
        assert!(out.intensity(23, 23) > 0.0);
        assert_eq!(out.intensity(3, 3), 0.0);
        assert_eq!(out.intensity(24, 24), 0.0);
        assert_eq!(out.intensity(14, 14), 0.0);
    }

    #[test]
    fn test_output_only_inside_destination() {
        let raster = frame_with(&[(10, 4), (11, 4), (12, 4), (10, 20)]);
        let placement = Placement::for_box(extract_bounding_box(&raster).unwrap());
        let out = place_digit(&raster, &placement);
        let dst = placement.destination();

        for y in 0..CANVAS_SIZE {
            for x in 0..CANVAS_SIZE {
                let outside = (x as f32) + 1.0 <= dst.x
                    || (x as f32) >= dst.right()
                    || (y as f32) + 1.0 <= dst.y
                    || (y as f32) >= dst.bottom();
                if outside {
                    assert_eq!(out.intensity(x, y), 0.0, "({x}, {y})");
                }
            }
        }
    }
}
