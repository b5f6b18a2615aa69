//! Fixed geometry of the MNIST input convention.
//!
//! These match the preprocessing the classifier was trained against and are
//! deliberately not configurable.

/// Side length of the working and output raster.
pub const CANVAS_SIZE: usize = 28;

/// Number of values in an emitted pixel vector.
pub const PIXEL_COUNT: usize = CANVAS_SIZE * CANVAS_SIZE;

/// Long-axis length of the digit after re-placement.
pub const DIGIT_BOX: f64 = 20.0;

/// Target position of the centre of mass.
pub const CENTER: f64 = 14.0;

/// RGB-mean intensity (0-255) a pixel must exceed to count as ink.
pub const INK_THRESHOLD: f32 = 10.0;

/// Standard deviation, in pixels, of the final smoothing blur.
pub const BLUR_SIGMA: f32 = 0.5;
