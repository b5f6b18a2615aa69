use crate::image_pipeline::raster::{PixelVector, Raster};
use crate::image_pipeline::stages::{BoundingBox, Centroid, Placement, Translation};

/// Terminal state of one pipeline run.
#[derive(Debug, Clone)]
pub enum PipelineOutcome {
    /// No ink above the threshold; nothing should be sent to the classifier.
    Aborted,
    Emitted(NormalizedDigit),
}

impl PipelineOutcome {
    pub fn digit(&self) -> Option<&NormalizedDigit> {
        match self {
            Self::Aborted => None,
            Self::Emitted(digit) => Some(digit),
        }
    }

    pub fn into_digit(self) -> Option<NormalizedDigit> {
        match self {
            Self::Aborted => None,
            Self::Emitted(digit) => Some(digit),
        }
    }

    pub fn pixels(&self) -> Option<&PixelVector> {
        self.digit().map(|d| &d.pixels)
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}

/// A normalized digit together with the intermediate measurements that
/// produced it.
#[derive(Debug, Clone)]
pub struct NormalizedDigit {
    pub bounding_box: BoundingBox,
    pub placement: Placement,
    /// Centre of mass after placement, before translation
    pub centroid: Option<Centroid>,
    /// `None` when the placed raster had no mass
    pub translation: Option<Translation>,
    /// Final smoothed 28x28 raster
    pub raster: Raster,
    pub pixels: PixelVector,
}
