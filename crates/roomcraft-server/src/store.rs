//! Render job store.
//!
//! The scheduler addresses jobs strictly by id with exactly one writer per
//! id, so the store only needs safe concurrent insert/lookup. It is a trait
//! so a durable backing store can replace the in-memory map without touching
//! scheduler logic.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use roomcraft_core::{JobId, RenderJob};

/// Keyed storage for render jobs.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Insert or replace a job record.
    async fn put(&self, job: RenderJob);

    /// Fetch a snapshot of a job by id.
    async fn get(&self, id: &JobId) -> Option<RenderJob>;

    /// Snapshot all stored jobs.
    async fn list(&self) -> Vec<RenderJob>;
}

/// In-memory job store. Process-lifetime only; not durable across restarts.
#[derive(Default)]
pub struct MemoryJobStore {
    jobs: RwLock<HashMap<JobId, RenderJob>>,
}

impl MemoryJobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn put(&self, job: RenderJob) {
        self.jobs.write().await.insert(job.id.clone(), job);
    }

    async fn get(&self, id: &JobId) -> Option<RenderJob> {
        self.jobs.read().await.get(id).cloned()
    }

    async fn list(&self) -> Vec<RenderJob> {
        self.jobs.read().await.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomcraft_core::DesignId;

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let store = MemoryJobStore::new();
        let job = RenderJob::new(DesignId::new("d1"));
        let id = job.id.clone();

        store.put(job.clone()).await;
        assert_eq!(store.get(&id).await, Some(job));
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_get_unknown_is_none() {
        let store = MemoryJobStore::new();
        assert!(store.get(&JobId::new("missing")).await.is_none());
    }

    #[tokio::test]
    async fn test_put_replaces_record() {
        let store = MemoryJobStore::new();
        let mut job = RenderJob::new(DesignId::new("d1"));
        let id = job.id.clone();
        store.put(job.clone()).await;

        job.start().unwrap();
        store.put(job).await;

        let stored = store.get(&id).await.unwrap();
        assert!(stored.status.is_active());
        assert_eq!(store.list().await.len(), 1);
    }
}
