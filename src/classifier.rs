//! Classification service boundary
//!
//! Ships a normalized [`PixelVector`](crate::image_pipeline::PixelVector) to
//! the external digit classifier and interprets its reply.

mod client;
mod config;
mod error;
mod http_client;
mod recognizer;
mod types;


pub use client::Classifier;
pub use config::{ClassifierConfig, ClassifierConfigBuilder};
pub use error::PredictError;
pub use http_client::HttpClassifier;
pub use recognizer::{DigitRecognizer, Recognition};
pub use types::{Prediction, PredictRequest, parse_response};
