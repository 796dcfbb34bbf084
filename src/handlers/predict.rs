//! Prediction handlers

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::model::Prediction;
use crate::{dataset, AppState};

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub data: FeatureInput,
}

/// A single feature vector, or a batch of rows. The dashboard sends a
/// one-row batch; only the first row is classified either way.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FeatureInput {
    Vector(Vec<f32>),
    Batch(Vec<Vec<f32>>),
}

impl FeatureInput {
    fn into_row(self) -> ApiResult<Vec<f32>> {
        let row = match self {
            FeatureInput::Vector(row) => row,
            FeatureInput::Batch(mut rows) => {
                if rows.is_empty() {
                    return Err(ApiError::Validation("'data' contains no rows".to_string()));
                }
                rows.swap_remove(0)
            }
        };

        if row.is_empty() {
            return Err(ApiError::Validation(
                "'data' contains no features".to_string(),
            ));
        }
        Ok(row)
    }
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: Prediction,
}

#[derive(Debug, Serialize)]
pub struct RandomPredictResponse {
    pub true_label: LabelBody,
    pub prediction: Prediction,
}

#[derive(Debug, Serialize)]
pub struct LabelBody {
    pub class: &'static str,
}

/// Classify a caller-supplied feature vector
pub async fn predict(
    State(state): State<AppState>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> ApiResult<Json<PredictResponse>> {
    let Json(request) = body.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

    let features = state.preprocess.apply(request.data.into_row()?);
    let probs = state.classifier.class_probs(&features)?;

    Ok(Json(PredictResponse {
        prediction: Prediction::from_probs(probs),
    }))
}

/// Classify a random row from the on-disk test set, returning the
/// ground-truth label alongside the prediction
pub async fn predict_random(
    State(state): State<AppState>,
) -> ApiResult<Json<RandomPredictResponse>> {
    let sample = dataset::sample_random(&state.config.test_data_dir)?;

    let features = state.preprocess.apply(sample.features);
    let probs = state.classifier.class_probs(&features)?;

    Ok(Json(RandomPredictResponse {
        true_label: LabelBody {
            class: sample.label.as_str(),
        },
        prediction: Prediction::from_probs(probs),
    }))
}
