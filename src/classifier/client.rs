use crate::classifier::error::PredictError;
use crate::classifier::types::Prediction;
use crate::image_pipeline::PixelVector;

pub trait Classifier {
    fn predict(&self, pixels: &PixelVector) -> Result<Prediction, PredictError>;
}
