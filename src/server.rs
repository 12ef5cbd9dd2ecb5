//! HTTP surface around the gap engine and the rewrite service

use crate::error::ResumeGapError;
use crate::input::text_extractor::extract_pdf_text;
use crate::output::render::{substitute_sections, PdfRenderer};
use crate::processing::sections::extract_summary_and_skills;
use crate::processing::GapEngine;
use crate::rewrite::{RewriteRequest, RewriteService, RewrittenSections};
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

/// Largest accepted resume upload
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Shared per-process state; the engine is read-only after start-up.
pub struct AppState<R> {
    pub engine: Arc<GapEngine>,
    pub rewriter: Option<Arc<R>>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            rewriter: self.rewriter.clone(),
        }
    }
}

impl<R> AppState<R> {
    pub fn new(engine: GapEngine, rewriter: Option<R>) -> Self {
        Self {
            engine: Arc::new(engine),
            rewriter: rewriter.map(Arc::new),
        }
    }
}

/// Both fields are optional so that a missing one is reported as invalid
/// input rather than a generic body rejection.
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub resume_text: Option<String>,
    pub job_text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompareResponse {
    pub missing_keywords: Vec<String>,
    pub coverage: f32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RewriteResponse {
    pub missing_keywords: Vec<String>,
    pub coverage: f32,
    pub summary: String,
    pub skills: String,
    pub rewritten_resume: String,
}

impl IntoResponse for ResumeGapError {
    fn into_response(self) -> Response {
        let status = match &self {
            ResumeGapError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ResumeGapError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ResumeGapError::Rewrite(_) | ResumeGapError::Network(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}

/// GET /health
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-gap"
    }))
}

/// POST /api/v1/compare
pub async fn compare_handler<R>(
    State(state): State<AppState<R>>,
    Json(payload): Json<CompareRequest>,
) -> Result<Json<CompareResponse>, ResumeGapError> {
    let comparison = state
        .engine
        .try_compare(payload.resume_text.as_deref(), payload.job_text.as_deref())?;

    Ok(Json(CompareResponse {
        coverage: comparison.coverage(),
        missing_keywords: comparison.missing_keywords.into_vec(),
    }))
}

struct RewriteOutcome {
    missing_keywords: Vec<String>,
    coverage: f32,
    rewritten: RewrittenSections,
    rewritten_resume: String,
}

/// Validate the texts, then run gap analysis, section extraction and the
/// rewrite, and splice the result back into the resume text.
async fn rewrite_resume<R>(
    state: &AppState<R>,
    resume_text: Option<&str>,
    job_text: Option<&str>,
) -> Result<RewriteOutcome, ResumeGapError>
where
    R: RewriteService + Send + Sync + 'static,
{
    let comparison = state.engine.try_compare(resume_text, job_text)?;
    let rewriter = state.rewriter.clone().ok_or_else(|| {
        ResumeGapError::Configuration("No rewrite service is configured".to_string())
    })?;

    let resume_text = resume_text.unwrap_or_default();
    let coverage = comparison.coverage();
    let sections = extract_summary_and_skills(resume_text);
    let missing_keywords = comparison.missing_keywords.into_vec();
    let request = RewriteRequest {
        job_description: job_text.unwrap_or_default().to_string(),
        summary: sections.summary_text().to_string(),
        skills: sections.skills_text().to_string(),
        missing_keywords: missing_keywords.clone(),
    };

    let rewritten = rewriter.rewrite(&request).await?;
    let rewritten_resume = substitute_sections(resume_text, &sections, &rewritten);

    Ok(RewriteOutcome {
        missing_keywords,
        coverage,
        rewritten,
        rewritten_resume,
    })
}

/// POST /api/v1/rewrite
pub async fn rewrite_handler<R>(
    State(state): State<AppState<R>>,
    Json(payload): Json<CompareRequest>,
) -> Result<Json<RewriteResponse>, ResumeGapError>
where
    R: RewriteService + Send + Sync + 'static,
{
    let outcome = rewrite_resume(&state, payload.resume_text.as_deref(), payload.job_text.as_deref()).await?;

    Ok(Json(RewriteResponse {
        missing_keywords: outcome.missing_keywords,
        coverage: outcome.coverage,
        summary: outcome.rewritten.summary,
        skills: outcome.rewritten.skills,
        rewritten_resume: outcome.rewritten_resume,
    }))
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> ResumeGapError {
    ResumeGapError::InvalidInput(format!("Malformed multipart body: {}", err))
}

/// POST /api/v1/optimize-resume
///
/// Multipart form with a `file` field holding the resume PDF and a
/// `job_description` text field. Responds with the optimized resume as a
/// new PDF; the missing keywords are echoed in `x-missing-keywords`.
pub async fn optimize_resume_handler<R>(
    State(state): State<AppState<R>>,
    mut multipart: Multipart,
) -> Result<Response, ResumeGapError>
where
    R: RewriteService + Send + Sync + 'static,
{
    let mut pdf_bytes = None;
    let mut job_description = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => pdf_bytes = Some(field.bytes().await.map_err(multipart_error)?),
            "job_description" => job_description = Some(field.text().await.map_err(multipart_error)?),
            _ => {}
        }
    }

    let pdf_bytes =
        pdf_bytes.ok_or_else(|| ResumeGapError::InvalidInput("Missing 'file' field".to_string()))?;
    if !pdf_bytes.starts_with(b"%PDF") {
        return Err(ResumeGapError::UnsupportedFormat(
            "Uploaded resume is not a PDF document".to_string(),
        ));
    }

    let resume_text = extract_pdf_text(&pdf_bytes)
        .map_err(|e| ResumeGapError::PdfExtraction(format!("Failed to extract text from upload: {}", e)))?;
    let outcome = rewrite_resume(&state, Some(&resume_text), job_description.as_deref()).await?;

    let document = PdfRenderer::new().render_to_bytes(&outcome.rewritten_resume, "Optimized Resume")?;
    info!(
        "Optimized uploaded resume: {} missing keywords, {} byte PDF",
        outcome.missing_keywords.len(),
        document.len()
    );

    let mut response = (
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"optimized_resume.pdf\""),
        ],
        document,
    )
        .into_response();

    if let Ok(value) = HeaderValue::from_str(&outcome.missing_keywords.join(",")) {
        response.headers_mut().insert("x-missing-keywords", value);
    }

    Ok(response)
}

pub fn build_router<R>(state: AppState<R>) -> Router
where
    R: RewriteService + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/compare", post(compare_handler::<R>))
        .route("/api/v1/rewrite", post(rewrite_handler::<R>))
        .route(
            "/api/v1/optimize-resume",
            post(optimize_resume_handler::<R>).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .with_state(state)
}

pub async fn serve<R>(state: AppState<R>, addr: &str) -> anyhow::Result<()>
where
    R: RewriteService + Send + Sync + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
