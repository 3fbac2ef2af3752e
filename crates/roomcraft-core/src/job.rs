//! Render job record and its state transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CoreError, DesignId, JobId, JobStatus};

/// A render job: one asynchronous unit of work producing an image for a design.
///
/// The record is created `pending` on submission and mutated only by the task
/// that owns it. Transitions go `pending -> processing -> done | failed` and
/// never regress; a terminal record is immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderJob {
    /// Unique job identifier, minted fresh per submission.
    pub id: JobId,

    /// Design this job renders.
    pub design_id: DesignId,

    /// Current job status.
    pub status: JobStatus,

    /// Public URL of the rendered image. Set iff status is `Done`.
    pub image_url: Option<String>,

    /// Human-readable failure text. Set iff status is `Failed`.
    pub error: Option<String>,

    /// When the job was submitted.
    pub created_at: DateTime<Utc>,

    /// When the record last changed.
    pub updated_at: DateTime<Utc>,
}

impl RenderJob {
    /// Create a new pending job for a design.
    pub fn new(design_id: DesignId) -> Self {
        let now = Utc::now();
        Self {
            id: JobId::generate(),
            design_id,
            status: JobStatus::Pending,
            image_url: None,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Flip the job from `Pending` to `Processing`.
    pub fn start(&mut self) -> Result<(), CoreError> {
        self.transition(JobStatus::Pending, JobStatus::Processing)?;
        Ok(())
    }

    /// Flip the job from `Processing` to `Done`, recording the image URL.
    pub fn complete(&mut self, image_url: impl Into<String>) -> Result<(), CoreError> {
        self.transition(JobStatus::Processing, JobStatus::Done)?;
        self.image_url = Some(image_url.into());
        Ok(())
    }

    /// Flip the job from `Processing` to `Failed`, recording the error text.
    pub fn fail(&mut self, error: impl Into<String>) -> Result<(), CoreError> {
        self.transition(JobStatus::Processing, JobStatus::Failed)?;
        self.error = Some(error.into());
        Ok(())
    }

    fn transition(&mut self, from: JobStatus, to: JobStatus) -> Result<(), CoreError> {
        if self.status != from {
            return Err(CoreError::InvalidTransition {
                from: self.status.to_string(),
                to: to.to_string(),
            });
        }
        self.status = to;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_success() {
        let mut job = RenderJob::new(DesignId::new("d1"));
        assert_eq!(job.status, JobStatus::Pending);

        job.start().unwrap();
        assert_eq!(job.status, JobStatus::Processing);

        job.complete("http://localhost/static/renders/x.png").unwrap();
        assert_eq!(job.status, JobStatus::Done);
        assert!(job.image_url.is_some());
        assert!(job.error.is_none());
    }

    #[test]
    fn test_lifecycle_failure() {
        let mut job = RenderJob::new(DesignId::new("d1"));
        job.start().unwrap();
        job.fail("render timed out").unwrap();

        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(job.error.as_deref(), Some("render timed out"));
        assert!(job.image_url.is_none());
    }

    #[test]
    fn test_terminal_is_immutable() {
        let mut job = RenderJob::new(DesignId::new("d1"));
        job.start().unwrap();
        job.complete("http://x/y.png").unwrap();

        assert!(matches!(
            job.fail("late failure"),
            Err(CoreError::InvalidTransition { .. })
        ));
        assert!(job.start().is_err());
        assert_eq!(job.status, JobStatus::Done);
        assert!(job.error.is_none());
    }

    #[test]
    fn test_cannot_skip_processing() {
        let mut job = RenderJob::new(DesignId::new("d1"));
        assert!(job.complete("http://x/y.png").is_err());
        assert_eq!(job.status, JobStatus::Pending);
    }
}
