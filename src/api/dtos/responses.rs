use serde::Serialize;

use crate::domain::models::batch::BatchReport;

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Outcome of a single-record write: a status line plus the stored row.
#[derive(Serialize)]
pub struct RecordResponse<T> {
    pub message: String,
    pub data: T,
}

#[derive(Serialize)]
pub struct BulkUpdateResponse<T> {
    pub message: String,
    #[serde(flatten)]
    pub report: BatchReport<T>,
}

impl<T> From<BatchReport<T>> for BulkUpdateResponse<T> {
    fn from(report: BatchReport<T>) -> Self {
        let message = if report.failed == 0 {
            "All records updated successfully".to_string()
        } else {
            format!("{} updated, {} failed", report.updated, report.failed)
        };
        Self { message, report }
    }
}
