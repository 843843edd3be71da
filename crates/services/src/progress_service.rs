use std::sync::Arc;

use chrono::{DateTime, Utc};
use course_core::model::{LearnerId, LearnerProfile, SectionId};
use providers::ProgressStore;

use crate::Clock;
use crate::error::ProgressError;

/// Stamps and records section completions.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    progress: Arc<dyn ProgressStore>,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, progress: Arc<dyn ProgressStore>) -> Self {
        Self { clock, progress }
    }

    /// Record a passed section quiz. Returns the stamped completion time.
    ///
    /// The append is an idempotent union: recording a section that is
    /// already in the learner's set changes nothing, so callers may fire
    /// it again for an already-completed section without harm.
    ///
    /// # Errors
    ///
    /// Backend failures; `NotFound` when no profile document exists.
    pub async fn complete_section(
        &self,
        learner_id: &LearnerId,
        section_id: &SectionId,
    ) -> Result<DateTime<Utc>, ProgressError> {
        let completed_at = self.clock.now();
        self.progress
            .append_completed_section(learner_id, section_id, completed_at)
            .await?;
        tracing::info!(learner = %learner_id, section = %section_id, "section completed");
        Ok(completed_at)
    }

    /// Fetch the learner's profile as the backend currently has it.
    ///
    /// # Errors
    ///
    /// Backend failures; a missing profile is `Ok(None)`.
    pub async fn profile(
        &self,
        learner_id: &LearnerId,
    ) -> Result<Option<LearnerProfile>, ProgressError> {
        Ok(self.progress.load_profile(learner_id).await?)
    }
}
