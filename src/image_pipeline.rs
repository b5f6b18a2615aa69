//! Digit normalization pipeline
//!
//! Turns a snapshot of a freehand drawing into the 28x28 intensity vector an
//! MNIST-trained classifier expects: downsample, crop to the ink, rescale the
//! long side to 20 pixels, move the centre of mass to (14, 14), blur lightly,
//! flatten.

pub mod common;
pub mod conversions;
pub mod raster;
pub mod stages;
pub mod tiff;

pub use common::{
    PipelineConfig,
    PipelineConfigBuilder,
    PipelineError,
    PipelineTimings,
    Result,
};

pub use raster::{
    DecodedImageReader,
    IntensityField,
    PixelVector,
    Raster,
    RasterReader,
};

pub use tiff::{
    StandardTiffWriter,
    TiffCompression,
    TiffWriter,
};

pub use conversions::{
    DigitPipeline,
    NormalizedDigit,
    PipelineOutcome,
};
