mod report;
mod report_image;

pub use report::{CreateReport, Report};
pub use report_image::{CreateReportImage, ReportImage};
