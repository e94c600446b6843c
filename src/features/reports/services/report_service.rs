use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{ReportViewDto, SubmitComplaintDto};
use crate::features::reports::models::{CreateReport, Report};
use crate::features::reports::repositories::ReportStore;
use crate::shared::constants::{RECENT_REPORTS_LIMIT, RECENT_REPORTS_WINDOW_HOURS};

/// Service for report operations
pub struct ReportService {
    store: Arc<dyn ReportStore>,
    default_location: String,
}

impl ReportService {
    pub fn new(store: Arc<dyn ReportStore>, default_location: String) -> Self {
        Self {
            store,
            default_location,
        }
    }

    /// Up to 10 reports from the 24 hours before `now`, newest first
    pub async fn recent_reports(&self, now: DateTime<Utc>) -> Result<Vec<ReportViewDto>> {
        let since = now - Duration::hours(RECENT_REPORTS_WINDOW_HOURS);
        let mut reports = self.store.list_recent(since, RECENT_REPORTS_LIMIT).await?;

        // Holds even if the store's clock and ours disagree
        reports.retain(|r| r.submitted_at >= since);
        reports.truncate(RECENT_REPORTS_LIMIT as usize);

        self.present(reports, now).await
    }

    /// Every report submitted by `user_id`, newest first
    pub async fn user_reports(
        &self,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Vec<ReportViewDto>> {
        let reports = self.store.list_by_user(user_id).await?;
        self.present(reports, now).await
    }

    /// Every report, newest first
    pub async fn all_reports(&self, now: DateTime<Utc>) -> Result<Vec<ReportViewDto>> {
        let reports = self.store.list_all().await?;
        self.present(reports, now).await
    }

    /// Store a complaint and its photos, returning the new report id
    pub async fn submit(&self, dto: SubmitComplaintDto, now: DateTime<Utc>) -> Result<i32> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let report = CreateReport {
            user_id: dto.user_id,
            category: dto.category,
            severity: dto.severity,
            description: dto.description,
            location: dto
                .location
                .unwrap_or_else(|| self.default_location.clone()),
            submitted_at: now,
        };

        let report_id = self.store.create_with_images(&report, &dto.images).await?;

        tracing::info!(
            "Created report: {} for user: {} with {} image(s)",
            report_id,
            report.user_id,
            dto.images.len()
        );

        Ok(report_id)
    }

    /// Attach images and convert rows to their display form
    async fn present(
        &self,
        reports: Vec<Report>,
        now: DateTime<Utc>,
    ) -> Result<Vec<ReportViewDto>> {
        let mut items = Vec::with_capacity(reports.len());
        for report in reports {
            let images = self.store.list_images(report.report_id).await?;
            items.push(ReportViewDto::build(report, images, now));
        }

        Ok(items)
    }
}
