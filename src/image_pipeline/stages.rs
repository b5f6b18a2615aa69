//! Normalization stages
//!
//! Each stage is a pure function from an immutable raster to a new value.
//! [`DigitPipeline`](crate::image_pipeline::DigitPipeline) runs them in order:
//! downsample, bounding box, placement, recenter, smooth, emit.

pub mod bounding_box;
pub mod downsample;
pub mod emit;
pub mod placement;
pub mod recenter;
pub mod smooth;

pub use bounding_box::{BoundingBox, extract_bounding_box};
pub use downsample::downsample;
pub use emit::emit;
pub use placement::{Placement, place_digit};
pub use recenter::{Centroid, Translation, recenter};
pub use smooth::smooth;
