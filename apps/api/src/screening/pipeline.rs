//! Screening pipeline — decode → extract → score → rank for one batch of resumes.
//!
//! Documents are independent: a document that cannot be decoded or extracted is
//! recorded as skipped and the batch continues with the rest. Output order never
//! depends on task completion order; equal scores keep submission order.

use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::extraction::{self, ExtractionError, TextExtractor};
use crate::models::{CandidateRecord, JobDescription, ScoredCandidate};
use crate::ranking::aggregator::Statistics;
use crate::ranking::rank;
use crate::ranking::reasoning::{agent_reasoning, AgentReasoning};
use crate::scoring::CandidateScorer;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// A resume whose text has already been decoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub file_name: String,
    pub text: String,
}

/// A raw uploaded resume, not yet decoded.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedDocument {
    pub file_name: String,
    pub reason: String,
}

/// Full result of one screening run, as consumed by reports and notifications.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningResults {
    pub job_id: String,
    pub job_title: String,
    pub company: String,
    pub analysis_date: DateTime<Utc>,
    /// Seconds.
    pub processing_time: f64,
    /// Documents successfully parsed.
    pub total_resumes: usize,
    pub candidates: Vec<ScoredCandidate>,
    pub top_matches: Vec<ScoredCandidate>,
    pub statistics: Statistics,
    pub agent_reasoning: AgentReasoning,
    pub skipped_documents: Vec<SkippedDocument>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

pub fn validate_batch(document_count: usize, config: &Config) -> Result<(), AppError> {
    if document_count == 0 {
        return Err(AppError::Validation(
            "at least one resume is required".to_string(),
        ));
    }
    if document_count > config.max_candidates {
        return Err(AppError::Validation(format!(
            "{document_count} resumes submitted, at most {} allowed per screening",
            config.max_candidates
        )));
    }
    Ok(())
}

/// Decodes uploads on the blocking pool, one task per document. Results are
/// collected in submission order.
pub async fn decode_uploads(
    uploads: Vec<UploadedDocument>,
    extractor: Arc<dyn TextExtractor>,
    max_bytes: usize,
) -> (Vec<ResumeDocument>, Vec<SkippedDocument>) {
    let mut tasks = Vec::with_capacity(uploads.len());
    for upload in uploads {
        let extractor = Arc::clone(&extractor);
        let file_name = upload.file_name.clone();
        let handle = tokio::task::spawn_blocking(move || {
            if upload.bytes.len() > max_bytes {
                return Err(ExtractionError::TooLarge {
                    size: upload.bytes.len(),
                    limit: max_bytes,
                });
            }
            extractor.extract_text(&upload.file_name, &upload.bytes)
        });
        tasks.push((file_name, handle));
    }

    let mut documents = Vec::new();
    let mut skipped = Vec::new();
    for (file_name, handle) in tasks {
        let outcome = handle
            .await
            .unwrap_or_else(|e| Err(ExtractionError::Decode(format!("decoder task failed: {e}"))));
        match outcome {
            Ok(text) => documents.push(ResumeDocument { file_name, text }),
            Err(e) => skipped.push(skip(file_name, &e)),
        }
    }

    (documents, skipped)
}

/// Extracts every document, skipping those that are oversize or unusable.
pub fn extract_batch(
    documents: Vec<ResumeDocument>,
    max_bytes: usize,
    skipped: &mut Vec<SkippedDocument>,
) -> Vec<CandidateRecord> {
    let mut records = Vec::with_capacity(documents.len());
    for doc in documents {
        let outcome = if doc.text.len() > max_bytes {
            Err(ExtractionError::TooLarge {
                size: doc.text.len(),
                limit: max_bytes,
            })
        } else {
            extraction::extract(&doc.text, &doc.file_name)
        };
        match outcome {
            Ok(record) => records.push(record),
            Err(e) => skipped.push(skip(doc.file_name, &e)),
        }
    }
    records
}

/// Scores and ranks the documents that survive extraction.
///
/// Fails only when no document could be parsed at all.
pub fn run_screening(
    job: &JobDescription,
    documents: Vec<ResumeDocument>,
    mut skipped: Vec<SkippedDocument>,
    scorer: &dyn CandidateScorer,
    max_bytes: usize,
    started: Instant,
) -> Result<ScreeningResults, AppError> {
    let records = extract_batch(documents, max_bytes, &mut skipped);
    if records.is_empty() {
        return Err(AppError::UnprocessableEntity(format!(
            "no resume could be processed ({} skipped)",
            skipped.len()
        )));
    }
    info!(
        "Successfully processed {} resumes ({} skipped)",
        records.len(),
        skipped.len()
    );

    info!(
        "Analyzing candidates against '{}' with {} scorer",
        job.title,
        scorer.backend()
    );
    let scored: Vec<ScoredCandidate> = records
        .into_iter()
        .map(|record| scorer.score(record, job))
        .collect();

    let ranked = rank(scored);
    let now = Utc::now();

    let results = ScreeningResults {
        job_id: format!("job_{}", now.format("%Y%m%d_%H%M%S")),
        job_title: non_empty_or(&job.title, "Unknown Position"),
        company: non_empty_or(&job.company, "Unknown Company"),
        analysis_date: now,
        processing_time: started.elapsed().as_secs_f64(),
        total_resumes: ranked.candidates.len(),
        candidates: ranked.candidates,
        top_matches: ranked.top_matches,
        statistics: ranked.statistics,
        agent_reasoning: agent_reasoning(),
        skipped_documents: skipped,
    };

    info!(
        "Screening {} completed in {:.2}s",
        results.job_id, results.processing_time
    );
    Ok(results)
}

fn skip(file_name: String, error: &ExtractionError) -> SkippedDocument {
    warn!("Skipping {file_name}: {error}");
    SkippedDocument {
        file_name,
        reason: error.to_string(),
    }
}

fn non_empty_or(value: &str, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}
