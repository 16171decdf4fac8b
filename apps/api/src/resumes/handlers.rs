//! Axum route handlers for the Resume API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::strategy::ExtractionReport;
use crate::models::resume::ResumeRecord;
use crate::resumes::upload::{extract_upload, read_upload};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
    pub strategy: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PipelineResponse {
    pub extraction: ExtractionReport,
    pub summary: SummaryResponse,
}

/// POST /api/v1/resumes/extract
///
/// Accepts a multipart `file` (PDF or DOCX) and returns the extracted record
/// for review. The client posts the corrected record to `/summary`.
pub async fn handle_extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractionReport>, AppError> {
    let request_id = Uuid::new_v4();
    async move {
        let upload = read_upload(&mut multipart, state.config.max_upload_bytes).await?;
        info!(filename = %upload.filename, "extracting resume");
        let text = extract_upload(upload, &state.config.upload_dir).await?;
        let report = state.extractor.extract(&text).await?;
        Ok::<_, AppError>(Json(report))
    }
    .instrument(info_span!("extract", %request_id))
    .await
}

/// POST /api/v1/resumes/summary
///
/// Renders a (possibly user-corrected) record as a professional summary.
pub async fn handle_summary(
    State(state): State<AppState>,
    Json(record): Json<ResumeRecord>,
) -> Result<Json<SummaryResponse>, AppError> {
    let record = record.tidy();
    let summary = state.summarizer.synthesize(&record).await?;
    Ok(Json(SummaryResponse {
        summary,
        strategy: state.summarizer.name(),
    }))
}

/// POST /api/v1/resumes/pipeline
///
/// Upload → extraction → summary in one call, without a correction step.
pub async fn handle_pipeline(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PipelineResponse>, AppError> {
    let request_id = Uuid::new_v4();
    async move {
        let upload = read_upload(&mut multipart, state.config.max_upload_bytes).await?;
        info!(filename = %upload.filename, "running full pipeline");
        let text = extract_upload(upload, &state.config.upload_dir).await?;
        let extraction = state.extractor.extract(&text).await?;
        let summary = state.summarizer.synthesize(&extraction.record).await?;
        Ok::<_, AppError>(Json(PipelineResponse {
            extraction,
            summary: SummaryResponse {
                summary,
                strategy: state.summarizer.name(),
            },
        }))
    }
    .instrument(info_span!("pipeline", %request_id))
    .await
}
