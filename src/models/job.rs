use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terminal outcome of a job, as stored and served by `GET /result/{job_id}`.
///
/// There is no `processing` variant: a job that is still running simply has
/// no record yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum JobRecord {
    Completed {
        text: String,
        page_count: usize,
        processed_at: DateTime<Utc>,
    },
    Error {
        error: String,
        processed_at: DateTime<Utc>,
    },
}

impl JobRecord {
    pub fn completed(text: String, page_count: usize) -> Self {
        JobRecord::Completed {
            text,
            page_count,
            processed_at: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        JobRecord::Error {
            error: message.into(),
            processed_at: Utc::now(),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, JobRecord::Completed { .. })
    }
}

/// Body of `POST /process-pdf`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRequest {
    pub pdf_url: String,
    #[serde(default)]
    pub job_id: Option<String>,
}
