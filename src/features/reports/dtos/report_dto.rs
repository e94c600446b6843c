use base64::prelude::*;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::features::reports::models::{Report, ReportImage};

/// Label shown for a report marked resolved
pub const RESOLVED_LABEL: &str = "Resolved";

/// Label shown for a report still open
pub const NOT_RESOLVED_LABEL: &str = "Not Resolved";

/// MIME type used when an image row has none recorded
const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Display-ready report, as consumed by the page templates
#[derive(Debug, Clone, Serialize)]
pub struct ReportViewDto {
    pub report_id: i32,
    pub category: Option<String>,
    pub severity: i32,
    pub description: Option<String>,
    pub location: String,
    pub submitted_at: DateTime<Utc>,
    /// Relative age, e.g. "3 hours ago"
    pub t_diff: String,
    /// "Resolved" or "Not Resolved"
    pub resolved: &'static str,
    pub admin_notes: Option<String>,
    pub images: Vec<ImageViewDto>,
}

/// Image ready for inline display as a data URI
#[derive(Debug, Clone, Serialize)]
pub struct ImageViewDto {
    pub img_name: String,
    pub mime_type: String,
    pub b64: String,
}

impl ReportViewDto {
    /// Build the view of `report` as seen at `now`.
    pub fn build(report: Report, images: Vec<ReportImage>, now: DateTime<Utc>) -> Self {
        Self {
            report_id: report.report_id,
            category: report.category,
            severity: report.severity,
            description: report.description,
            location: report.location,
            t_diff: humanize_elapsed(now, report.submitted_at),
            submitted_at: report.submitted_at,
            resolved: resolution_label(report.resolved),
            admin_notes: report.admin_notes,
            images: images.into_iter().filter_map(ImageViewDto::encode).collect(),
        }
    }
}

impl ImageViewDto {
    /// Encode a stored image; rows without a payload yield `None`.
    pub fn encode(image: ReportImage) -> Option<Self> {
        let data = image.img.filter(|bytes| !bytes.is_empty())?;

        Some(Self {
            img_name: image.img_name,
            mime_type: image
                .mime_type
                .unwrap_or_else(|| FALLBACK_MIME_TYPE.to_string()),
            b64: BASE64_STANDARD.encode(data),
        })
    }
}

/// Render the time between `then` and `now` as "N days/hours/minutes ago".
///
/// Uses whole units only (floor). Timestamps in the future count as zero.
pub fn humanize_elapsed(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let elapsed = (now - then).max(Duration::zero());

    if elapsed.num_days() > 0 {
        format!("{} days ago", elapsed.num_days())
    } else if elapsed.num_hours() > 0 {
        format!("{} hours ago", elapsed.num_hours())
    } else {
        format!("{} minutes ago", elapsed.num_minutes())
    }
}

pub fn resolution_label(resolved: bool) -> &'static str {
    if resolved {
        RESOLVED_LABEL
    } else {
        NOT_RESOLVED_LABEL
    }
}
