use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use crate::errors::{ExtractionError, ProcessorError};
use crate::extractor::{ExtractedText, PdfExtractor};
use crate::fetcher::Fetcher;
use crate::models::JobRecord;
use crate::storage::ResultStore;

/// Runs fetch → extract → store for one job at a time, each on its own task.
pub struct JobRunner {
    store: Arc<dyn ResultStore>,
    fetcher: Arc<dyn Fetcher>,
    extractor: PdfExtractor,
    limiter: Option<Arc<Semaphore>>,
}

impl JobRunner {
    /// `max_concurrent == 0` leaves the number of in-flight jobs unbounded.
    pub fn new(
        store: Arc<dyn ResultStore>,
        fetcher: Arc<dyn Fetcher>,
        extractor: PdfExtractor,
        max_concurrent: usize,
    ) -> Self {
        let limiter = (max_concurrent > 0).then(|| Arc::new(Semaphore::new(max_concurrent)));
        Self {
            store,
            fetcher,
            extractor,
            limiter,
        }
    }

    /// Launch a job in the background. The returned handle may be dropped;
    /// the job still runs to completion and writes its record.
    ///
    /// The work runs on an inner task so that a panic anywhere in fetching or
    /// extraction is observed here and still produces an `error` record.
    pub fn spawn(self: &Arc<Self>, job_id: String, pdf_url: String) -> JoinHandle<()> {
        let runner = Arc::clone(self);
        tokio::spawn(async move {
            let worker = Arc::clone(&runner);
            let url = pdf_url.clone();
            let record = match tokio::spawn(async move { worker.run(&url).await }).await {
                Ok(record) => record,
                Err(e) => {
                    tracing::error!("Job '{}' runner crashed: {}", job_id, e);
                    JobRecord::error(format!("Job runner crashed: {}", e))
                }
            };
            runner.finish(&job_id, &pdf_url, record).await;
        })
    }

    /// Produce the terminal record for `pdf_url` without storing it.
    pub async fn run(&self, pdf_url: &str) -> JobRecord {
        let _permit = match &self.limiter {
            Some(limiter) => Arc::clone(limiter).acquire_owned().await.ok(),
            None => None,
        };

        match self.process(pdf_url).await {
            Ok(extracted) => JobRecord::completed(extracted.text, extracted.page_count),
            Err(e) => JobRecord::error(e.to_string()),
        }
    }

    async fn process(&self, pdf_url: &str) -> Result<ExtractedText, ProcessorError> {
        let bytes = self.fetcher.fetch(pdf_url).await?;

        // lopdf parsing is CPU-bound
        let extractor = self.extractor.clone();
        let extracted = tokio::task::spawn_blocking(move || extractor.extract(&bytes))
            .await
            .map_err(ExtractionError::from)??;
        Ok(extracted)
    }

    async fn finish(&self, job_id: &str, pdf_url: &str, record: JobRecord) {
        match &record {
            JobRecord::Completed { page_count, .. } => {
                tracing::info!(
                    "Job '{}' completed ({} pages from {})",
                    job_id,
                    page_count,
                    pdf_url
                );
            }
            JobRecord::Error { error, .. } => {
                tracing::warn!("Job '{}' failed: {}", job_id, error);
            }
        }

        if let Err(e) = self.store.put(job_id, record).await {
            tracing::error!("Failed to store result for job '{}': {}", job_id, e);
        }
    }
}
