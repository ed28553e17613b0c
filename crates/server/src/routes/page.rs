use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use crate::telemetry::record_prediction;
use crate::templates::render_index;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::response::Html;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;

/// Form body of `POST /`.
#[derive(Debug, Deserialize)]
pub struct PageForm {
    pub raw_text: Option<String>,
}

/// `GET /`: the empty form.
pub async fn show_form(State(state): State<Arc<ServerState>>) -> ServerResult<Html<String>> {
    Ok(Html(render_index(&state.templates, None)?))
}

/// `POST /`: classify `raw_text` and render the result with its chart.
pub async fn submit_form(
    State(state): State<Arc<ServerState>>,
    form: Result<Form<PageForm>, FormRejection>,
) -> ServerResult<Html<String>> {
    let Form(form) = form.map_err(|rejection| {
        ServerError::from_rejection(rejection.status(), rejection.body_text(), state.config.max_body_size_mb)
    })?;
    let raw_text = form
        .raw_text
        .ok_or_else(|| ServerError::BadRequest("missing form field 'raw_text'".to_string()))?;

    let started = Instant::now();
    let analysis = emotext::analyze(state.model.as_ref(), &raw_text).await?;
    record_prediction("page", analysis.label(), started.elapsed());

    let payload = emotext::present(analysis, &state.chart)?;
    Ok(Html(render_index(&state.templates, Some(&payload))?))
}
