//! Common utilities module
//!
//! Shared error type, fixed geometry of the MNIST frame, pipeline
//! configuration and per-stage timing.

pub mod config;
pub mod constants;
pub mod error;
pub mod timing;

pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use error::{PipelineError, Result};
pub use timing::{PipelineTimings, StepTiming, Timer};
