use thiserror::Error;

use crate::image_pipeline::PipelineError;

#[derive(Error, Debug)]
pub enum PredictError {
    /// The service answered with an `error` payload; shown verbatim.
    #[error("{0}")]
    Classifier(String),

    #[error("could not reach classification service")]
    Connectivity { reason: String },

    #[error("a prediction is already in flight")]
    Busy,

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl PredictError {
    pub(crate) fn connectivity(reason: impl ToString) -> Self {
        Self::Connectivity {
            reason: reason.to_string(),
        }
    }
}
