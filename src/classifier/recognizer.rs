use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, instrument};

use crate::classifier::client::Classifier;
use crate::classifier::error::PredictError;
use crate::classifier::types::Prediction;
use crate::image_pipeline::{DigitPipeline, NormalizedDigit, PipelineOutcome, PixelVector, Raster};

#[derive(Debug, Clone)]
pub enum Recognition {
    /// The snapshot held no ink; the classifier was not called.
    NothingDrawn,
    Predicted {
        digit: NormalizedDigit,
        prediction: Prediction,
    },
}

/// Normalizes snapshots and classifies them, one request at a time.
pub struct DigitRecognizer<C: Classifier> {
    pipeline: DigitPipeline,
    classifier: C,
    in_flight: AtomicBool,
}

impl<C: Classifier> DigitRecognizer<C> {
    pub fn new(pipeline: DigitPipeline, classifier: C) -> Self {
        Self {
            pipeline,
            classifier,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn pipeline(&self) -> &DigitPipeline {
        &self.pipeline
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    #[instrument(skip_all)]
    pub fn recognize(&self, snapshot: &Raster) -> Result<Recognition, PredictError> {
        let digit = match self.pipeline.normalize(snapshot)? {
            PipelineOutcome::Aborted => return Ok(Recognition::NothingDrawn),
            PipelineOutcome::Emitted(digit) => digit,
        };
        let prediction = self.classify(&digit.pixels)?;
        Ok(Recognition::Predicted { digit, prediction })
    }

    /// Sends `pixels` to the classifier unless another request is still
    /// outstanding, in which case this returns [`PredictError::Busy`] at once.
    pub fn classify(&self, pixels: &PixelVector) -> Result<Prediction, PredictError> {
        let _guard = InFlight::acquire(&self.in_flight).ok_or(PredictError::Busy)?;
        let prediction = self.classifier.predict(pixels)?;
        info!(label = prediction.label, "Digit classified");
        Ok(prediction)
    }
}

/// Held for the duration of one classifier call.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
