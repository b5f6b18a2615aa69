use tracing::{debug, instrument, warn};

use crate::classifier::client::Classifier;
use crate::classifier::config::ClassifierConfig;
use crate::classifier::error::PredictError;
use crate::classifier::types::{PredictRequest, Prediction, parse_response};
use crate::image_pipeline::PixelVector;

/// Blocking JSON client for the `/predict` endpoint.
pub struct HttpClassifier {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpClassifier {
    pub fn new(config: &ClassifierConfig) -> Result<Self, PredictError> {
        let mut builder = reqwest::blocking::Client::builder().timeout(config.timeout);
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(PredictError::connectivity)?;
        Ok(Self {
            client,
            endpoint: config.endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Classifier for HttpClassifier {
    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    fn predict(&self, pixels: &PixelVector) -> Result<Prediction, PredictError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&PredictRequest { pixels })
            .send()
            .map_err(|e| {
                warn!(error = %e, "Classification request failed");
                PredictError::connectivity(e)
            })?;

        // The service reports rejected input in the body, so the status alone
        // does not decide the outcome.
        let status = response.status();
        let body = response.text().map_err(PredictError::connectivity)?;
        debug!(%status, bytes = body.len(), "Classifier responded");

        parse_response(&body)
    }
}
