use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for report
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub report_id: i32,
    pub user_id: i32,
    pub category: Option<String>,
    pub severity: i32,
    #[sqlx(rename = "descr")]
    pub description: Option<String>,
    #[sqlx(rename = "locat")]
    pub location: String,
    #[sqlx(rename = "t_period")]
    pub submitted_at: DateTime<Utc>,
    pub resolved: bool,
    pub admin_notes: Option<String>,
}

/// Data for creating a new report
#[derive(Debug, Clone)]
pub struct CreateReport {
    pub user_id: i32,
    pub category: Option<String>,
    pub severity: i32,
    pub description: Option<String>,
    pub location: String,
    pub submitted_at: DateTime<Utc>,
}
