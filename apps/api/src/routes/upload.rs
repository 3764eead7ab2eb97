//! POST /upload — the only business endpoint.
//!
//! received → file validated → text extracted → analyzed → responded.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde_json::Value;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

const FILE_FIELD: &str = "file";
const JOB_APPLICATION_FIELD: &str = "job_application";

/// The uploaded file, alive only for the duration of the request.
#[derive(Debug)]
pub struct UploadedResume {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Parsed multipart body.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub resume: Option<UploadedResume>,
    /// Empty string when the field is absent.
    pub job_application: String,
}

/// POST /upload
///
/// Multipart body: `file` (the PDF) and optional `job_application` text.
/// Returns the model's evaluation JSON unchanged.
///
/// A body that is not `multipart/form-data` at all (empty, urlencoded, JSON)
/// carries no file, so it gets the same `No file uploaded` answer.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, AppError> {
    let request_id = Uuid::new_v4();
    evaluate_upload(state, multipart)
        .instrument(info_span!("upload", %request_id))
        .await
}

async fn evaluate_upload(
    state: AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, AppError> {
    let multipart = multipart.map_err(|rejection| {
        debug!("Upload body is not multipart: {}", rejection.body_text());
        AppError::NoFile
    })?;
    let form = read_form(multipart).await?;
    let resume = form.resume.ok_or(AppError::NoFile)?;
    if resume.file_name.is_empty() {
        return Err(AppError::NoSelectedFile);
    }

    info!(
        "Received resume '{}' ({} bytes, job application: {})",
        resume.file_name,
        resume.bytes.len(),
        if form.job_application.is_empty() { "no" } else { "yes" }
    );

    let resume_text = state.extractor.extract(resume.bytes).await?;
    let evaluation = state
        .analyzer
        .analyze(&resume_text, &form.job_application)
        .await?;

    Ok(Json(evaluation))
}

/// Reads the fields this endpoint cares about; anything else is skipped.
/// The first occurrence of a repeated field wins.
async fn read_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();
    let mut job_application: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(FILE_FIELD) if form.resume.is_none() => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                form.resume = Some(UploadedResume { file_name, bytes });
            }
            Some(JOB_APPLICATION_FIELD) if job_application.is_none() => {
                job_application = Some(field.text().await?);
            }
            _ => {}
        }
    }

    form.job_application = job_application.unwrap_or_default();
    Ok(form)
}
