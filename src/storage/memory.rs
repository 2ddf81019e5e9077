use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::ProcessorError;
use crate::models::JobRecord;
use crate::storage::ResultStore;

#[derive(Debug, Clone)]
enum Slot {
    InFlight,
    Done(JobRecord),
}

/// Process-local job store. Nothing is evicted and nothing survives a
/// restart.
#[derive(Default)]
pub struct InMemoryResultStore {
    slots: RwLock<HashMap<String, Slot>>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn get(&self, job_id: &str) -> Result<Option<JobRecord>, ProcessorError> {
        let slots = self.slots.read().await;
        Ok(match slots.get(job_id) {
            Some(Slot::Done(record)) => Some(record.clone()),
            Some(Slot::InFlight) | None => None,
        })
    }

    async fn reserve(&self, job_id: &str) -> Result<(), ProcessorError> {
        let mut slots = self.slots.write().await;
        match slots.get(job_id) {
            Some(Slot::InFlight) => Err(ProcessorError::Conflict(format!(
                "Job '{}' is already being processed",
                job_id
            ))),
            Some(Slot::Done(_)) => Err(ProcessorError::Conflict(format!(
                "Job '{}' already has a result",
                job_id
            ))),
            None => {
                slots.insert(job_id.to_string(), Slot::InFlight);
                Ok(())
            }
        }
    }

    async fn put(&self, job_id: &str, record: JobRecord) -> Result<(), ProcessorError> {
        let mut slots = self.slots.write().await;
        if let Some(Slot::Done(_)) = slots.get(job_id) {
            return Err(ProcessorError::Conflict(format!(
                "Job '{}' already has a result",
                job_id
            )));
        }
        slots.insert(job_id.to_string(), Slot::Done(record));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn test_get_unknown_returns_none() {
        let store = InMemoryResultStore::new();
        assert!(store.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reserved_id_reads_as_absent() {
        let store = InMemoryResultStore::new();
        store.reserve("job-1").await.unwrap();
        assert!(store.get("job-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = InMemoryResultStore::new();
        store.reserve("job-1").await.unwrap();
        let record = JobRecord::completed("text".to_string(), 2);
        store.put("job-1", record.clone()).await.unwrap();
        assert_eq!(store.get("job-1").await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_put_without_reservation_is_allowed() {
        let store = InMemoryResultStore::new();
        store.put("direct", JobRecord::error("boom")).await.unwrap();
        assert!(store.get("direct").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_terminal_record_is_write_once() {
        let store = InMemoryResultStore::new();
        let first = JobRecord::completed("first".to_string(), 1);
        store.put("job-1", first.clone()).await.unwrap();

        let result = store.put("job-1", JobRecord::error("second")).await;
        assert!(matches!(result, Err(ProcessorError::Conflict(_))));
        assert_eq!(store.get("job-1").await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_reserve_twice_conflicts() {
        let store = InMemoryResultStore::new();
        store.reserve("job-1").await.unwrap();
        let result = store.reserve("job-1").await;
        assert!(matches!(result, Err(ProcessorError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_reserve_after_completion_conflicts() {
        let store = InMemoryResultStore::new();
        store.put("job-1", JobRecord::error("boom")).await.unwrap();
        let result = store.reserve("job-1").await;
        assert!(matches!(result, Err(ProcessorError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_concurrent_writes_to_distinct_ids() {
        let store = Arc::new(InMemoryResultStore::new());
        let mut handles = Vec::new();
        for i in 0..50 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let id = format!("job-{}", i);
                store.reserve(&id).await.unwrap();
                store
                    .put(&id, JobRecord::completed(format!("text {}", i), i))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        for i in 0..50 {
            match store.get(&format!("job-{}", i)).await.unwrap() {
                Some(JobRecord::Completed {
                    text, page_count, ..
                }) => {
                    assert_eq!(text, format!("text {}", i));
                    assert_eq!(page_count, i);
                }
                other => panic!("Expected completed record, got: {:?}", other),
            }
        }
    }
}
