use crate::image_pipeline::common::constants::INK_THRESHOLD;
use crate::image_pipeline::raster::{Raster, RectF};

/// Tight inclusive box around every ink pixel.
///
/// Only constructed when at least one ink pixel exists, so `min <= max` on
/// both axes always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl BoundingBox {
    fn at(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn include(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn width(&self) -> usize {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> usize {
        self.max_y - self.min_y + 1
    }

    pub fn as_rect(&self) -> RectF {
        RectF::new(
            self.min_x as f32,
            self.min_y as f32,
            self.width() as f32,
            self.height() as f32,
        )
    }
}

/// Scans for pixels whose RGB mean exceeds the ink threshold.
///
/// Returns `None` when nothing was drawn; the pipeline stops there.
pub fn extract_bounding_box(raster: &Raster) -> Option<BoundingBox> {
    let mut bbox: Option<BoundingBox> = None;
    for y in 0..raster.height() {
        for x in 0..raster.width() {
            if raster.intensity(x, y) <= INK_THRESHOLD {
                continue;
            }
            match bbox.as_mut() {
                Some(b) => b.include(x, y),
                None => bbox = Some(BoundingBox::at(x, y)),
            }
        }
    }
    bbox
}
