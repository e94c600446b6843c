use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{CreateReport, CreateReportImage, Report, ReportImage};

/// Column list shared by every report query
const REPORT_COLUMNS: &str =
    "report_id, user_id, category, severity, descr, locat, t_period, resolved, admin_notes";

/// Persistence seam for reports and their images
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// All reports, newest first
    async fn list_all(&self) -> Result<Vec<Report>>;

    /// Reports submitted at or after `since`, newest first, at most `limit`
    async fn list_recent(&self, since: DateTime<Utc>, limit: i64) -> Result<Vec<Report>>;

    /// One user's reports, newest first
    async fn list_by_user(&self, user_id: i32) -> Result<Vec<Report>>;

    /// Images attached to a report, in upload order
    async fn list_images(&self, report_id: i32) -> Result<Vec<ReportImage>>;

    /// Insert a report and its images atomically, returning the new report id
    async fn create_with_images(
        &self,
        report: &CreateReport,
        images: &[CreateReportImage],
    ) -> Result<i32>;
}

/// Postgres-backed report store
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn list_all(&self) -> Result<Vec<Report>> {
        let sql = format!("SELECT {REPORT_COLUMNS} FROM reports ORDER BY t_period DESC");

        sqlx::query_as::<_, Report>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list reports: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list_recent(&self, since: DateTime<Utc>, limit: i64) -> Result<Vec<Report>> {
        let sql = format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE t_period >= $1 ORDER BY t_period DESC LIMIT $2"
        );

        sqlx::query_as::<_, Report>(&sql)
            .bind(since)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list recent reports: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list_by_user(&self, user_id: i32) -> Result<Vec<Report>> {
        let sql = format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE user_id = $1 ORDER BY t_period DESC"
        );

        sqlx::query_as::<_, Report>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list reports for user {}: {:?}", user_id, e);
                AppError::Database(e)
            })
    }

    async fn list_images(&self, report_id: i32) -> Result<Vec<ReportImage>> {
        sqlx::query_as::<_, ReportImage>(
            r#"
            SELECT report_id, img, img_name, mime_type
            FROM images
            WHERE report_id = $1
            ORDER BY image_id
            "#,
        )
        .bind(report_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list images for report {}: {:?}", report_id, e);
            AppError::Database(e)
        })
    }

    async fn create_with_images(
        &self,
        report: &CreateReport,
        images: &[CreateReportImage],
    ) -> Result<i32> {
        // Dropping the transaction without commit rolls back every insert
        let mut tx = self.pool.begin().await?;

        let report_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO reports (user_id, category, severity, descr, locat, t_period, resolved)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE)
            RETURNING report_id
            "#,
        )
        .bind(report.user_id)
        .bind(&report.category)
        .bind(report.severity)
        .bind(&report.description)
        .bind(&report.location)
        .bind(report.submitted_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert report: {:?}", e);
            AppError::Database(e)
        })?;

        for image in images {
            sqlx::query(
                r#"
                INSERT INTO images (report_id, img, img_name, mime_type)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(report_id)
            .bind(&image.data)
            .bind(&image.file_name)
            .bind(&image.mime_type)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to insert image '{}' for report {}: {:?}",
                    image.file_name,
                    report_id,
                    e
                );
                AppError::Database(e)
            })?;
        }

        tx.commit().await?;

        Ok(report_id)
    }
}
