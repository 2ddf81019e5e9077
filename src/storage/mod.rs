pub mod memory;

use async_trait::async_trait;

use crate::errors::ProcessorError;
use crate::models::JobRecord;

pub use memory::InMemoryResultStore;

/// Where job outcomes live between the runner writing them and clients
/// polling for them.
///
/// Records are write-once: after `put` succeeds for an id, that id's record
/// never changes. `reserve` marks an id as in flight so that two runners can
/// never be launched for the same id; a reserved id still reads as `None`.
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn get(&self, job_id: &str) -> Result<Option<JobRecord>, ProcessorError>;
    async fn reserve(&self, job_id: &str) -> Result<(), ProcessorError>;
    async fn put(&self, job_id: &str, record: JobRecord) -> Result<(), ProcessorError>;
}
