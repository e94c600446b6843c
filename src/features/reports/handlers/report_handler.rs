use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::Redirect,
};
use chrono::Utc;
use tracing::debug;

use crate::core::error::AppError;
use crate::features::reports::dtos::{
    is_image_mime_type_allowed, non_blank, parse_form_int, SubmitComplaintDto,
    ALLOWED_IMAGE_MIME_TYPES, MAX_IMAGE_SIZE,
};
use crate::features::reports::models::CreateReportImage;
use crate::features::reports::services::ReportService;
use crate::shared::constants::ANONYMOUS_USER_ID;
use crate::shared::validation::sanitize_filename;

/// Submit a complaint
///
/// Accepts multipart/form-data with:
/// - `ID`: submitting user id (blank for anonymous)
/// - `Category`, `Severity`, `Description`, `Location`
/// - `Images` / `Images[]`: zero or more photos
///
/// Redirects to the submitter's page once the report and all photos are stored.
pub async fn submit_complaint(
    State(service): State<Arc<ReportService>>,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let mut dto = SubmitComplaintDto::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        multipart_error("Failed to read multipart data", e)
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "Images" | "Images[]" => {
                // An empty file input still submits a part, without a filename
                let Some(raw_name) = field.file_name().filter(|n| !n.is_empty()) else {
                    continue;
                };
                let file_name = sanitize_filename(raw_name);

                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                if !is_image_mime_type_allowed(&content_type) {
                    return Err(AppError::BadRequest(format!(
                        "File type '{}' is not allowed. Allowed types: {}",
                        content_type,
                        ALLOWED_IMAGE_MIME_TYPES.join(", ")
                    )));
                }

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read image bytes: {}", e);
                    multipart_error("Failed to read image data", e)
                })?;

                if data.len() > MAX_IMAGE_SIZE {
                    return Err(image_too_large());
                }

                dto.images.push(CreateReportImage {
                    data: data.to_vec(),
                    file_name,
                    mime_type: content_type,
                });
            }
            "ID" | "Category" | "Severity" | "Description" | "Location" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read {} field: {}", field_name, e))
                })?;

                match field_name.as_str() {
                    "ID" => dto.user_id = parse_form_int("ID", &text)?,
                    "Severity" => dto.severity = parse_form_int("Severity", &text)?,
                    "Category" => dto.category = non_blank(text),
                    "Description" => dto.description = non_blank(text),
                    _ => dto.location = non_blank(text),
                }
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let user_id = dto.user_id;
    service.submit(dto, Utc::now()).await?;

    Ok(Redirect::to(&user_page_path(user_id)))
}

fn image_too_large() -> AppError {
    AppError::BadRequest(format!(
        "Image too large. Maximum size is {} bytes ({} MB)",
        MAX_IMAGE_SIZE,
        MAX_IMAGE_SIZE / 1024 / 1024
    ))
}

/// A body cut off by the request size limit reads as an oversized upload
fn multipart_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return image_too_large();
    }
    AppError::BadRequest(format!("{}: {}", context, err))
}

/// Page a submitter lands on after a complaint
pub fn user_page_path(user_id: i32) -> String {
    if user_id == ANONYMOUS_USER_ID {
        "/anonymous".to_string()
    } else {
        format!("/user/{}", user_id)
    }
}
