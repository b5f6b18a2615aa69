//! Minimal 2D compositing surface.
//!
//! Implements the subset of drawing-context behaviour the normalization
//! stages rely on: an opaque black fill and a smoothed, scaled `draw_image`
//! from a source rectangle to a fractional destination rectangle.

use crate::image_pipeline::raster::types::Raster;

/// Axis-aligned rectangle in continuous pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole extent of `raster`.
    pub fn covering(raster: &Raster) -> Self {
        Self::new(0.0, 0.0, raster.width() as f32, raster.height() as f32)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Premultiplied RGBA working buffer with channels on the 0-255 scale.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl Canvas {
    /// A fully transparent canvas.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height * Raster::CHANNELS],
        }
    }

    pub fn fill_black(&mut self) {
        for px in self.data.chunks_exact_mut(Raster::CHANNELS) {
            px.copy_from_slice(&[0.0, 0.0, 0.0, 255.0]);
        }
    }

    /// Composites `src_rect` of `src` onto `dst_rect` with source-over blending.
    ///
    /// Minified axes are area-averaged and magnified axes are sampled
    /// bilinearly, clamped to the source rectangle. Destination pixels only
    /// partly inside `dst_rect` receive proportional coverage.
    pub fn draw_image(&mut self, src: &Raster, src_rect: RectF, dst_rect: RectF) {
        if src_rect.is_empty() || dst_rect.is_empty() {
            return;
        }

        let columns = AxisSpan {
            dst_start: dst_rect.x,
            dst_end: dst_rect.right(),
            src_start: src_rect.x,
            src_end: src_rect.right(),
            src_len: src.width(),
        }
        .taps(self.width);
        let rows = AxisSpan {
            dst_start: dst_rect.y,
            dst_end: dst_rect.bottom(),
            src_start: src_rect.y,
            src_end: src_rect.bottom(),
            src_len: src.height(),
        }
        .taps(self.height);

        let pixels = src.as_rgba();
        for row in &rows {
            for column in &columns {
                let coverage = row.coverage * column.coverage;
                if coverage <= 0.0 {
                    continue;
                }

                let mut sample = [0.0f32; 4];
                for &(sy, wy) in &row.weights {
                    for &(sx, wx) in &column.weights {
                        let i = (sy * src.width() + sx) * Raster::CHANNELS;
                        let alpha = pixels[i + 3] as f32;
                        let w = wx * wy;
                        let premultiply = alpha / 255.0;
                        sample[0] += w * pixels[i] as f32 * premultiply;
                        sample[1] += w * pixels[i + 1] as f32 * premultiply;
                        sample[2] += w * pixels[i + 2] as f32 * premultiply;
                        sample[3] += w * alpha;
                    }
                }

                let o = (row.index * self.width + column.index) * Raster::CHANNELS;
                let keep = 1.0 - sample[3] / 255.0 * coverage;
                for c in 0..Raster::CHANNELS {
                    self.data[o + c] = sample[c] * coverage + self.data[o + c] * keep;
                }
            }
        }
    }

    /// Quantizes to 8-bit, un-premultiplying colour.
    pub fn to_raster(&self) -> Raster {
        let data = self
            .data
            .chunks_exact(Raster::CHANNELS)
            .flat_map(|px| {
                let alpha = px[3];
                if alpha <= 0.0 {
                    return [0, 0, 0, 0];
                }
                let unpremultiply = 255.0 / alpha;
                [
                    quantize(px[0] * unpremultiply),
                    quantize(px[1] * unpremultiply),
                    quantize(px[2] * unpremultiply),
                    quantize(alpha),
                ]
            })
            .collect();
        Raster::from_raw_parts(self.width, self.height, data)
    }
}

pub(crate) fn quantize(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// One axis of a `draw_image` call.
struct AxisSpan {
    dst_start: f32,
    dst_end: f32,
    src_start: f32,
    src_end: f32,
    src_len: usize,
}

/// Source indices and weights contributing to one destination pixel.
struct Tap {
    index: usize,
    coverage: f32,
    weights: Vec<(usize, f32)>,
}

impl AxisSpan {
    fn taps(&self, dst_len: usize) -> Vec<Tap> {
        let first = self.dst_start.floor().max(0.0) as usize;
        let last = self.dst_end.ceil().clamp(0.0, dst_len as f32) as usize;
        (first..last)
            .filter_map(|p| {
                let lo = (p as f32).max(self.dst_start);
                let hi = (p as f32 + 1.0).min(self.dst_end);
                if hi <= lo {
                    return None;
                }
                Some(Tap {
                    index: p,
                    coverage: hi - lo,
                    weights: self.weights(p, lo, hi),
                })
            })
            .collect()
    }

    fn scale(&self) -> f32 {
        (self.src_end - self.src_start) / (self.dst_end - self.dst_start)
    }

    fn to_source(&self, d: f32) -> f32 {
        self.src_start + (d - self.dst_start) * self.scale()
    }

    fn weights(&self, p: usize, lo: f32, hi: f32) -> Vec<(usize, f32)> {
        let max_index = self.src_len - 1;
        if self.scale() > 1.0 {
            // Box filter over the footprint of the covered part of the pixel.
            let a = self.to_source(lo);
            let b = self.to_source(hi);
            let span = b - a;
            let start = a.floor().max(0.0) as usize;
            let end = (b.ceil().max(0.0) as usize).min(self.src_len);
            (start..end)
                .filter_map(|i| {
                    let overlap = (i as f32 + 1.0).min(b) - (i as f32).max(a);
                    (overlap > 0.0).then(|| (i.min(max_index), overlap / span))
                })
                .collect()
        } else {
            let lowest = (self.src_start.floor().max(0.0) as usize).min(max_index);
            let highest = (self.src_end.ceil() as usize)
                .saturating_sub(1)
                .clamp(lowest, max_index);
            let position = self.to_source(p as f32 + 0.5) - 0.5;
            let base = position.floor();
            let t = position - base;
            let clamp = |i: f32| (i.max(lowest as f32) as usize).min(highest);
            vec![(clamp(base), 1.0 - t), (clamp(base + 1.0), t)]
        }
    }
}
