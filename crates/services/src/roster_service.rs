use std::sync::Arc;

use course_core::model::LearnerProfile;
use providers::ProgressStore;

use crate::error::RosterError;

/// Learner roster queries for the admin view.
#[derive(Clone)]
pub struct RosterService {
    progress: Arc<dyn ProgressStore>,
}

impl RosterService {
    #[must_use]
    pub fn new(progress: Arc<dyn ProgressStore>) -> Self {
        Self { progress }
    }

    /// Profiles ordered by email, at most `limit` of them.
    ///
    /// # Errors
    ///
    /// Backend failures, including `PermissionDenied` from backends that
    /// restrict the listing to admins.
    pub async fn learners(&self, limit: u32) -> Result<Vec<LearnerProfile>, RosterError> {
        Ok(self.progress.list_profiles(limit).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::model::LearnerRole;
    use course_core::time::fixed_now;
    use providers::{IdentityProvider, InMemoryProvider};

    #[tokio::test]
    async fn roster_lists_saved_profiles() {
        let provider = Arc::new(InMemoryProvider::new());
        for email in ["mia@example.com", "ada@example.com"] {
            let credentials = provider.sign_up(email, "hunter22").await.unwrap();
            let profile = LearnerProfile::new(
                credentials.learner_id.clone(),
                credentials.email.clone(),
                LearnerRole::Learner,
                fixed_now(),
            )
            .unwrap();
            provider.save_profile(&profile).await.unwrap();
        }

        let service = RosterService::new(provider);
        let roster = service.learners(10).await.unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].email(), "ada@example.com");
    }
}
