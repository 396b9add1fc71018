//! Axum route handlers for the brief endpoints.

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    Form, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::brief::{assembler, snapshot};
use crate::errors::AppError;
use crate::models::BriefRequest;
use crate::render;
use crate::state::AppState;

/// Form body for POST /generate. A missing required field is rejected by the
/// extractor before the handler runs.
#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    pub business_name: String,
    pub website: String,
    pub category: String,
    pub location: String,
    #[serde(default)]
    pub user_input: String,
}

impl From<GenerateForm> for BriefRequest {
    fn from(form: GenerateForm) -> Self {
        BriefRequest {
            business_name: form.business_name,
            website: form.website,
            category: form.category,
            location: form.location,
            goal: form.user_input,
        }
    }
}

/// GET /
///
/// Serves the static submission form.
pub async fn handle_form() -> Html<&'static str> {
    Html(render::form_page())
}

/// POST /generate
///
/// Full pipeline: assemble → overwrite the shared latest brief → snapshot to
/// disk → respond with the rendered brief HTML. External-service failures are
/// masked with fallbacks inside the assembler; a snapshot write failure fails
/// the request.
pub async fn handle_generate(
    State(state): State<AppState>,
    Form(form): Form<GenerateForm>,
) -> Result<Html<String>, AppError> {
    if form.business_name.trim().is_empty() {
        return Err(AppError::Validation(
            "business_name cannot be empty".to_string(),
        ));
    }

    let request = BriefRequest::from(form);
    info!("generating brief for '{}'", request.business_name);

    let assembly =
        assembler::assemble(state.llm.as_ref(), state.places.as_ref(), &request).await;
    if assembly.is_degraded() {
        for degradation in &assembly.degradations {
            warn!(
                stage = ?degradation.stage,
                reason = %degradation.reason,
                "external call degraded to fallback"
            );
        }
    }

    let brief = assembly.brief;
    *state.latest_brief.write().await = Some(brief.clone());

    let path = snapshot::write(&state.config.snapshot_dir, &brief)
        .await
        .map_err(AppError::Snapshot)?;
    info!("brief snapshot written to {}", path.display());

    Ok(Html(render::brief_page(
        &brief.business,
        &brief.summary,
        &brief.connections,
    )))
}

/// GET /api/brief
///
/// The current brief as JSON, or an empty object before the first generate.
pub async fn handle_latest_brief(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let latest = state.latest_brief.read().await;
    let body = match latest.as_ref() {
        Some(brief) => serde_json::to_value(brief).map_err(anyhow::Error::from)?,
        None => json!({}),
    };
    Ok(Json(body))
}

/// GET /download
///
/// Renders the current brief (or empty defaults) and returns it as a PDF
/// attachment. A conversion failure fails the request.
pub async fn handle_download(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let html = {
        let latest = state.latest_brief.read().await;
        match latest.as_ref() {
            Some(brief) => render::brief_page(&brief.business, &brief.summary, &brief.connections),
            None => render::brief_page("Business", "", &[]),
        }
    };

    let pdf = state.pdf.convert(&html).await?;
    info!("serving {} byte PDF", pdf.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"sleft_signals_brief.pdf\"",
            ),
        ],
        pdf,
    ))
}
