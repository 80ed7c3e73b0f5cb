use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{self, skills_catalog, ExtractionError};
use crate::models::{CandidateRecord, JobDescription};
use crate::screening::notify::notify_if_enabled;
use crate::screening::pipeline::{
    decode_uploads, run_screening, validate_batch, ResumeDocument, ScreeningResults,
    SkippedDocument, UploadedDocument,
};
use crate::screening::report::render_summary_report;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScreeningRequest {
    #[serde(default)]
    pub job: JobDescription,
    pub resumes: Vec<ResumeDocument>,
}

#[derive(Serialize)]
pub struct SkillsResponse {
    pub count: usize,
    pub skills: &'static [&'static str],
}

/// POST /api/v1/screenings
pub async fn handle_screen(
    State(state): State<AppState>,
    payload: Result<Json<ScreeningRequest>, JsonRejection>,
) -> Result<Json<ScreeningResults>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    validate_batch(req.resumes.len(), &state.config)?;
    let results = screen_documents(&state, req.job, req.resumes, vec![], Instant::now()).await?;
    Ok(Json(results))
}

/// POST /api/v1/screenings/report
pub async fn handle_report(
    State(state): State<AppState>,
    payload: Result<Json<ScreeningRequest>, JsonRejection>,
) -> Result<String, AppError> {
    let Json(req) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    validate_batch(req.resumes.len(), &state.config)?;
    let results = screen_documents(&state, req.job, req.resumes, vec![], Instant::now()).await?;
    Ok(render_summary_report(&results))
}

/// POST /api/v1/screenings/upload
///
/// Multipart body: one `job` part holding the job description as JSON, and one
/// `resume` part per document.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScreeningResults>, AppError> {
    let started = Instant::now();
    let mut job: Option<JobDescription> = None;
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("job") => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("unreadable job part: {e}")))?;
                let parsed = serde_json::from_str(&raw)
                    .map_err(|e| AppError::Validation(format!("job part is not valid JSON: {e}")))?;
                job = Some(parsed);
            }
            Some("resume") => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("resume_{}", uploads.len() + 1));
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("unreadable resume part '{file_name}': {e}"))
                })?;
                uploads.push(UploadedDocument { file_name, bytes });
            }
            other => info!("Ignoring unexpected multipart field {other:?}"),
        }
    }

    let job = job.ok_or_else(|| AppError::Validation("missing 'job' part".to_string()))?;
    validate_batch(uploads.len(), &state.config)?;

    let (documents, skipped) = decode_uploads(
        uploads,
        state.text_extractor.clone(),
        state.config.max_resume_bytes(),
    )
    .await;

    let results = screen_documents(&state, job, documents, skipped, started).await?;
    Ok(Json(results))
}

/// POST /api/v1/extract
///
/// Extraction preview for a single decoded document. Nothing is scored.
pub async fn handle_extract(
    State(state): State<AppState>,
    payload: Result<Json<ResumeDocument>, JsonRejection>,
) -> Result<Json<CandidateRecord>, AppError> {
    let Json(doc) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let limit = state.config.max_resume_bytes();
    if doc.text.len() > limit {
        let err = ExtractionError::TooLarge {
            size: doc.text.len(),
            limit,
        };
        return Err(AppError::UnprocessableEntity(err.to_string()));
    }

    let record = extraction::extract(&doc.text, &doc.file_name)
        .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;
    Ok(Json(record))
}

/// GET /api/v1/skills
pub async fn handle_skills() -> Json<SkillsResponse> {
    let skills = skills_catalog::canonical_skills();
    Json(SkillsResponse {
        count: skills.len(),
        skills,
    })
}

/// Extraction and scoring are CPU-bound, so the batch runs on the blocking pool.
async fn screen_documents(
    state: &AppState,
    job: JobDescription,
    documents: Vec<ResumeDocument>,
    skipped: Vec<SkippedDocument>,
    started: Instant,
) -> Result<ScreeningResults, AppError> {
    let scorer = Arc::clone(&state.scorer);
    let max_bytes = state.config.max_resume_bytes();

    let results = tokio::task::spawn_blocking(move || {
        run_screening(&job, documents, skipped, scorer.as_ref(), max_bytes, started)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("screening task failed: {e}")))??;

    notify_if_enabled(&results, &state.config.email);
    Ok(results)
}
