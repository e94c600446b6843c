use sqlx::FromRow;

/// Database model for an image attached to a report
#[derive(Debug, Clone, FromRow)]
pub struct ReportImage {
    pub report_id: i32,
    pub img: Option<Vec<u8>>,
    pub img_name: String,
    pub mime_type: Option<String>,
}

/// Image payload to store alongside a new report
#[derive(Debug, Clone)]
pub struct CreateReportImage {
    pub data: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}
