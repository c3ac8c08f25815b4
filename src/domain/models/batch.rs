use serde::Serialize;
use tracing::warn;

use crate::error::AppError;

/// Outcome of one record inside a bulk update.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchItemResult<T> {
    Updated { id: i64, record: T },
    Failed { id: i64, error: String },
}

impl<T> BatchItemResult<T> {
    pub fn from_write(id: i64, result: Result<Option<T>, AppError>) -> Self {
        match result {
            Ok(Some(record)) => BatchItemResult::Updated { id, record },
            Ok(None) => BatchItemResult::Failed {
                id,
                error: format!("No record with id {} was updated", id),
            },
            Err(e) => {
                warn!("Bulk update of record {} failed: {:?}", id, e);
                BatchItemResult::Failed { id, error: e.public_message() }
            }
        }
    }

    pub fn is_updated(&self) -> bool {
        matches!(self, BatchItemResult::Updated { .. })
    }
}

#[derive(Debug, Serialize)]
pub struct BatchReport<T> {
    pub updated: usize,
    pub failed: usize,
    pub results: Vec<BatchItemResult<T>>,
}

impl<T> From<Vec<BatchItemResult<T>>> for BatchReport<T> {
    fn from(results: Vec<BatchItemResult<T>>) -> Self {
        let updated = results.iter().filter(|r| r.is_updated()).count();
        Self {
            updated,
            failed: results.len() - updated,
            results,
        }
    }
}
