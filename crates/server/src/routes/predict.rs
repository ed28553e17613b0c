use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use crate::telemetry::record_prediction;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use classifier::Probabilities;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Body of `POST /predict`. A missing `text` is treated as empty.
#[derive(Debug, Default, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub text: String,
}

/// Response of `POST /predict`.
///
/// `probabilities` keeps model class order and lists every label once.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub predicted_emotion: String,
    pub probabilities: Probabilities,
}

pub async fn predict(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> ServerResult<Json<PredictResponse>> {
    let Json(request) = body.map_err(|rejection| {
        ServerError::from_rejection(rejection.status(), rejection.body_text(), state.config.max_body_size_mb)
    })?;

    let started = Instant::now();
    let prediction = state.model.predict(&request.text).await?;
    record_prediction("predict", &prediction.label, started.elapsed());

    Ok(Json(PredictResponse {
        predicted_emotion: prediction.label,
        probabilities: prediction.probabilities,
    }))
}
