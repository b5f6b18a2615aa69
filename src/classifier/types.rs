use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classifier::error::PredictError;
use crate::image_pipeline::PixelVector;

/// Request body: `{"pixels": [784 floats]}`
#[derive(Debug, Serialize)]
pub struct PredictRequest<'a> {
    pub pixels: &'a PixelVector,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictResponse {
    Prediction { prediction: i64 },
    Error { error: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prediction {
    pub label: u8,
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Prediction: {}", self.label)
    }
}

/// Interprets a response body.
///
/// Anything other than a digit label or an error message counts as a
/// connectivity failure, since the service did not answer meaningfully.
pub fn parse_response(body: &str) -> Result<Prediction, PredictError> {
    let response: PredictResponse = serde_json::from_str(body)
        .map_err(|e| PredictError::connectivity(format!("malformed response: {e}")))?;
    match response {
        PredictResponse::Prediction { prediction } => u8::try_from(prediction)
            .ok()
            .filter(|label| *label <= 9)
            .map(|label| Prediction { label })
            .ok_or_else(|| {
                PredictError::connectivity(format!("label {prediction} is not a digit"))
            }),
        PredictResponse::Error { error } => Err(PredictError::Classifier(error)),
    }
}
