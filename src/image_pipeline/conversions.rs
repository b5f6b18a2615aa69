//! Pipeline conversions module
//!
//! Orchestrates the normalization stages from a drawing-surface snapshot to
//! the classifier's pixel vector.

mod digit_pipeline;
mod outcome;


pub use digit_pipeline::DigitPipeline;
pub use outcome::{NormalizedDigit, PipelineOutcome};
