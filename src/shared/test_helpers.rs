use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::core::config::WeatherConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::User;
use crate::features::auth::password::hash_password;
use crate::features::auth::{AuthService, UserStore};
use crate::features::pages::PageState;
use crate::features::reports::models::{CreateReport, CreateReportImage, Report, ReportImage};
use crate::features::reports::{ReportService, ReportStore};
use crate::features::weather::WeatherService;
use crate::shared::templates::TemplateEngine;

pub fn template_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates/pages")
}

pub fn png_image(file_name: &str) -> CreateReportImage {
    CreateReportImage {
        data: vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a],
        file_name: file_name.to_string(),
        mime_type: "image/png".to_string(),
    }
}

/// Weather settings pointing at a port nothing listens on
pub fn unreachable_weather_config() -> WeatherConfig {
    WeatherConfig {
        api_key: "test-key".to_string(),
        city: "Sacramento".to_string(),
        base_url: "http://127.0.0.1:1/weather".to_string(),
        units: "imperial".to_string(),
    }
}

/// Serve `router` on an ephemeral local port, returning its base URL
pub async fn spawn_stub_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Page state over in-memory stores, with the weather provider unreachable
pub fn test_page_state(
    reports: Arc<InMemoryReportStore>,
    users: Arc<InMemoryUserStore>,
) -> PageState {
    PageState {
        report_service: Arc::new(ReportService::new(reports, "Sacramento".to_string())),
        auth_service: Arc::new(AuthService::new(users)),
        weather_service: Arc::new(WeatherService::new(unreachable_weather_config()).unwrap()),
        templates: Arc::new(TemplateEngine::from_dir(template_dir()).unwrap()),
    }
}

#[derive(Default)]
struct ReportTables {
    reports: Vec<Report>,
    images: Vec<ReportImage>,
    last_id: i32,
}

/// Report store kept in memory; a failed submission leaves no rows, like a rolled-back transaction
#[derive(Default)]
pub struct InMemoryReportStore {
    tables: Mutex<ReportTables>,
    fail_image_inserts: bool,
}

impl InMemoryReportStore {
    /// Store whose image inserts always fail
    pub fn failing_image_inserts() -> Self {
        Self {
            fail_image_inserts: true,
            ..Default::default()
        }
    }

    pub fn seed_report(&self, user_id: i32, submitted_at: DateTime<Utc>, resolved: bool) -> i32 {
        let mut tables = self.tables.lock().unwrap();
        tables.last_id += 1;
        let report_id = tables.last_id;
        tables.reports.push(Report {
            report_id,
            user_id,
            category: Some(format!("Category {}", report_id)),
            severity: 1,
            description: None,
            location: "Sacramento".to_string(),
            submitted_at,
            resolved,
            admin_notes: None,
        });
        report_id
    }

    pub fn seed_report_with(&self, user_id: i32, category: &str, submitted_at: DateTime<Utc>) -> i32 {
        let report_id = self.seed_report(user_id, submitted_at, false);
        let mut tables = self.tables.lock().unwrap();
        if let Some(report) = tables.reports.iter_mut().find(|r| r.report_id == report_id) {
            report.category = Some(category.to_string());
        }
        report_id
    }

    pub fn seed_image(&self, report_id: i32, img: Option<Vec<u8>>, img_name: &str) {
        self.tables.lock().unwrap().images.push(ReportImage {
            report_id,
            img,
            img_name: img_name.to_string(),
            mime_type: Some("image/png".to_string()),
        });
    }

    pub fn report(&self, report_id: i32) -> Option<Report> {
        let tables = self.tables.lock().unwrap();
        tables
            .reports
            .iter()
            .find(|r| r.report_id == report_id)
            .cloned()
    }

    pub fn latest_report(&self) -> Option<Report> {
        let tables = self.tables.lock().unwrap();
        tables.reports.iter().max_by_key(|r| r.report_id).cloned()
    }

    pub fn report_count(&self) -> usize {
        self.tables.lock().unwrap().reports.len()
    }

    pub fn images_for(&self, report_id: i32) -> Vec<ReportImage> {
        let tables = self.tables.lock().unwrap();
        tables
            .images
            .iter()
            .filter(|i| i.report_id == report_id)
            .cloned()
            .collect()
    }

    fn newest_first(&self, keep: impl Fn(&Report) -> bool) -> Vec<Report> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<Report> = tables.reports.iter().filter(|r| keep(r)).cloned().collect();
        rows.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        rows
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn list_all(&self) -> Result<Vec<Report>> {
        Ok(self.newest_first(|_| true))
    }

    async fn list_recent(&self, since: DateTime<Utc>, limit: i64) -> Result<Vec<Report>> {
        let mut rows = self.newest_first(|r| r.submitted_at >= since);
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn list_by_user(&self, user_id: i32) -> Result<Vec<Report>> {
        Ok(self.newest_first(|r| r.user_id == user_id))
    }

    async fn list_images(&self, report_id: i32) -> Result<Vec<ReportImage>> {
        Ok(self.images_for(report_id))
    }

    async fn create_with_images(
        &self,
        report: &CreateReport,
        images: &[CreateReportImage],
    ) -> Result<i32> {
        if self.fail_image_inserts && !images.is_empty() {
            return Err(AppError::Database(sqlx::Error::Protocol(
                "image insert failed".to_string(),
            )));
        }

        let mut tables = self.tables.lock().unwrap();
        tables.last_id += 1;
        let report_id = tables.last_id;

        tables.reports.push(Report {
            report_id,
            user_id: report.user_id,
            category: report.category.clone(),
            severity: report.severity,
            description: report.description.clone(),
            location: report.location.clone(),
            submitted_at: report.submitted_at,
            resolved: false,
            admin_notes: None,
        });
        tables.images.extend(images.iter().map(|image| ReportImage {
            report_id,
            img: Some(image.data.clone()),
            img_name: image.file_name.clone(),
            mime_type: Some(image.mime_type.clone()),
        }));

        Ok(report_id)
    }
}

/// User store kept in memory
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn add_user(&self, user_id: i32, user_name: &str, password: &str) {
        let password_hash = hash_password(password).unwrap();
        self.users.lock().unwrap().push(User {
            user_id,
            user_name: user_name.to_string(),
            password_hash,
        });
    }

    /// A row whose `pass` column still holds a plaintext password
    pub fn add_plaintext_user(&self, user_id: i32, user_name: &str, password: &str) {
        self.users.lock().unwrap().push(User {
            user_id,
            user_name: user_name.to_string(),
            password_hash: password.to_string(),
        });
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_name(&self, user_name: &str) -> Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.user_name == user_name).cloned())
    }

    async fn find_by_id(&self, user_id: i32) -> Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.user_id == user_id).cloned())
    }
}
