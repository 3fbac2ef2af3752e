//! Render scheduler.
//!
//! Owns the render-job lifecycle: accepts submissions, spawns non-blocking
//! execution, and drives every job to a terminal state. The execution task is
//! the error boundary for provider failures; callers only ever observe job
//! state through polling.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{error, info, warn};

use roomcraft_core::{Design, DesignPlan, JobId, RenderJob};
use roomcraft_provider::AiProvider;

use crate::store::JobStore;

/// Scheduler errors.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("Render job not found: {0}")]
    JobNotFound(JobId),
}

/// Render scheduler.
///
/// One execution task is spawned per submission with a fresh job id, so each
/// record has exactly one writer. Jobs are not cancellable once submitted;
/// a client may stop polling but the job still runs to a terminal state.
pub struct RenderScheduler {
    store: Arc<dyn JobStore>,
    provider: Arc<dyn AiProvider>,
    renders_dir: PathBuf,
    public_url: String,
    render_timeout: Duration,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl RenderScheduler {
    /// Create a new scheduler.
    pub fn new(
        store: Arc<dyn JobStore>,
        provider: Arc<dyn AiProvider>,
        renders_dir: PathBuf,
        public_url: impl Into<String>,
        render_timeout: Duration,
    ) -> Self {
        Self {
            store,
            provider,
            renders_dir,
            public_url: public_url.into(),
            render_timeout,
            handles: Mutex::new(Vec::new()),
        }
    }

    /// Submit a render job for a design.
    ///
    /// Creates a `pending` record, schedules execution without blocking the
    /// caller, and returns the pending snapshot immediately. Design existence
    /// is the caller's concern; no job is created for an unknown design.
    pub async fn submit(&self, design: &Design) -> RenderJob {
        let job = RenderJob::new(design.id.clone());
        self.store.put(job.clone()).await;

        info!(job_id = %job.id, design_id = %design.id, "Render job submitted");

        let handle = tokio::spawn(execute(
            Arc::clone(&self.store),
            Arc::clone(&self.provider),
            job.clone(),
            design.plan.clone(),
            self.renders_dir.clone(),
            self.public_url.clone(),
            self.render_timeout,
        ));
        self.handles.lock().await.push(handle);

        job
    }

    /// Current snapshot of a job. Pure read; repeated polling is
    /// side-effect free.
    pub async fn status(&self, id: &JobId) -> Result<RenderJob, SchedulerError> {
        self.store
            .get(id)
            .await
            .ok_or_else(|| SchedulerError::JobNotFound(id.clone()))
    }

    /// Snapshot every stored job.
    pub async fn list_jobs(&self) -> Vec<RenderJob> {
        self.store.list().await
    }

    /// Await every execution task spawned so far.
    ///
    /// Lets tests (and shutdown) wait deterministically instead of sleeping.
    pub async fn drain(&self) {
        let handles: Vec<_> = std::mem::take(&mut *self.handles.lock().await);
        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Render task panicked");
            }
        }
    }
}

/// Run one job to its terminal state.
///
/// Every failure path (provider error, timeout, filesystem error) is caught
/// here and recorded on the job; nothing propagates past this boundary.
async fn execute(
    store: Arc<dyn JobStore>,
    provider: Arc<dyn AiProvider>,
    mut job: RenderJob,
    plan: DesignPlan,
    renders_dir: PathBuf,
    public_url: String,
    render_timeout: Duration,
) {
    if let Err(e) = job.start() {
        error!(job_id = %job.id, error = %e, "Refusing to run job in unexpected state");
        return;
    }
    store.put(job.clone()).await;

    match run_render(&*provider, &plan, &renders_dir, &job.id, render_timeout).await {
        Ok(filename) => {
            let image_url = format!("{public_url}/static/renders/{filename}");
            if job.complete(&image_url).is_ok() {
                info!(job_id = %job.id, image_url = %image_url, "Render job completed");
            }
        }
        Err(reason) => {
            warn!(job_id = %job.id, error = %reason, "Render job failed");
            let _ = job.fail(reason);
        }
    }
    store.put(job).await;
}

/// Render the plan and write the image, returning the output filename.
async fn run_render(
    provider: &dyn AiProvider,
    plan: &DesignPlan,
    renders_dir: &Path,
    job_id: &JobId,
    render_timeout: Duration,
) -> Result<String, String> {
    let image = match timeout(render_timeout, provider.render_design(plan)).await {
        Ok(Ok(image)) => image,
        Ok(Err(e)) => return Err(e.to_string()),
        Err(_) => {
            return Err(format!(
                "Render timed out after {}s",
                render_timeout.as_secs()
            ))
        }
    };

    tokio::fs::create_dir_all(renders_dir)
        .await
        .map_err(|e| format!("Failed to create renders dir: {e}"))?;

    let filename = format!("{job_id}.png");
    tokio::fs::write(renders_dir.join(&filename), &image)
        .await
        .map_err(|e| format!("Failed to write render output: {e}"))?;

    Ok(filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryJobStore;
    use async_trait::async_trait;
    use roomcraft_core::{DesignId, JobStatus, RoomAnalysis, RoomId};
    use roomcraft_provider::ProviderError;
    use serde_json::json;

    enum RenderMode {
        Ok,
        Fail,
        Stall,
    }

    struct TestProvider {
        mode: RenderMode,
    }

    #[async_trait]
    impl AiProvider for TestProvider {
        async fn analyze_room(
            &self,
            _image: &[u8],
            _filename: &str,
        ) -> Result<RoomAnalysis, ProviderError> {
            Err(ProviderError::Generation("not used in these tests".into()))
        }

        async fn generate_design(
            &self,
            _analysis: &RoomAnalysis,
            _style: &str,
            _preferences: &serde_json::Value,
        ) -> Result<DesignPlan, ProviderError> {
            Err(ProviderError::Generation("not used in these tests".into()))
        }

        async fn render_design(&self, _plan: &DesignPlan) -> Result<Vec<u8>, ProviderError> {
            match self.mode {
                RenderMode::Ok => Ok(vec![0x89, b'P', b'N', b'G']),
                RenderMode::Fail => Err(ProviderError::Generation("GPU on fire".into())),
                RenderMode::Stall => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(Vec::new())
                }
            }
        }
    }

    fn design() -> Design {
        let plan = DesignPlan {
            style: "modern".to_string(),
            furniture: vec![],
            layout_notes: String::new(),
            color_palette: vec![],
            estimated_cost_usd: 0.0,
        };
        Design::new(RoomId::new("r1"), "modern", plan, json!({}))
    }

    fn scheduler(mode: RenderMode, render_timeout: Duration) -> RenderScheduler {
        let renders_dir = std::env::temp_dir()
            .join("roomcraft-tests")
            .join(JobId::generate().into_inner());
        RenderScheduler::new(
            Arc::new(MemoryJobStore::new()),
            Arc::new(TestProvider { mode }),
            renders_dir,
            "http://localhost:8000",
            render_timeout,
        )
    }

    #[tokio::test]
    async fn test_submit_then_done_with_image() {
        let scheduler = scheduler(RenderMode::Ok, Duration::from_secs(5));
        let design = design();

        let snapshot = scheduler.submit(&design).await;
        assert_eq!(snapshot.status, JobStatus::Pending);
        assert!(snapshot.image_url.is_none());
        assert!(snapshot.error.is_none());

        scheduler.drain().await;

        let job = scheduler.status(&snapshot.id).await.unwrap();
        assert_eq!(job.status, JobStatus::Done);
        let url = job.image_url.unwrap();
        assert!(url.ends_with(&format!("/static/renders/{}.png", snapshot.id)));
        assert!(job.error.is_none());
    }

    #[tokio::test]
    async fn test_provider_failure_resolves_to_failed() {
        let scheduler = scheduler(RenderMode::Fail, Duration::from_secs(5));
        let snapshot = scheduler.submit(&design()).await;
        scheduler.drain().await;

        let job = scheduler.status(&snapshot.id).await.unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert!(job.error.unwrap().contains("GPU on fire"));
        assert!(job.image_url.is_none());
    }

    #[tokio::test]
    async fn test_stalled_provider_resolves_to_failed() {
        let scheduler = scheduler(RenderMode::Stall, Duration::from_millis(20));
        let snapshot = scheduler.submit(&design()).await;
        scheduler.drain().await;

        let job = scheduler.status(&snapshot.id).await.unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert!(job.error.unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_unknown_job_is_not_found() {
        let scheduler = scheduler(RenderMode::Ok, Duration::from_secs(5));
        let result = scheduler.status(&JobId::new("missing")).await;
        assert!(matches!(result, Err(SchedulerError::JobNotFound(_))));
    }

    #[tokio::test]
    async fn test_terminal_job_polls_identically() {
        let scheduler = scheduler(RenderMode::Ok, Duration::from_secs(5));
        let snapshot = scheduler.submit(&design()).await;
        scheduler.drain().await;

        let first = scheduler.status(&snapshot.id).await.unwrap();
        let second = scheduler.status(&snapshot.id).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_each_submission_gets_a_fresh_job() {
        let scheduler = scheduler(RenderMode::Ok, Duration::from_secs(5));
        let design = design();

        let first = scheduler.submit(&design).await;
        let second = scheduler.submit(&design).await;
        assert_ne!(first.id, second.id);

        scheduler.drain().await;
        assert_eq!(
            scheduler.status(&first.id).await.unwrap().status,
            JobStatus::Done
        );
        assert_eq!(
            scheduler.status(&second.id).await.unwrap().status,
            JobStatus::Done
        );
    }
}
