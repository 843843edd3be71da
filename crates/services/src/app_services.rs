use std::sync::Arc;

use providers::Providers;
use providers::rest::HostedConfig;

use crate::Clock;
use crate::auth_service::AuthService;
use crate::course_service::CourseService;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;
use crate::roster_service::RosterService;

/// Assembles the app-facing services over a chosen backend.
#[derive(Clone)]
pub struct AppServices {
    auth: Arc<AuthService>,
    progress: Arc<ProgressService>,
    courses: Arc<CourseService>,
    roster: Arc<RosterService>,
}

impl AppServices {
    /// Build services over an already-constructed backend.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the built-in catalog fails validation.
    pub fn with_providers(providers: &Providers, clock: Clock) -> Result<Self, AppServicesError> {
        let auth = Arc::new(AuthService::new(
            clock,
            Arc::clone(&providers.identity),
            Arc::clone(&providers.progress),
        ));
        let progress = Arc::new(ProgressService::new(
            clock,
            Arc::clone(&providers.progress),
        ));
        let courses = Arc::new(CourseService::workshop()?);
        let roster = Arc::new(RosterService::new(Arc::clone(&providers.progress)));
        Ok(Self {
            auth,
            progress,
            courses,
            roster,
        })
    }

    /// Throwaway in-memory backend, for tests and the demo launch mode.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the built-in catalog fails validation.
    pub fn in_memory(clock: Clock) -> Result<Self, AppServicesError> {
        Self::with_providers(&Providers::in_memory(), clock)
    }

    /// Build services backed by local `SQLite`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if connection, migration, or catalog
    /// validation fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let providers = Providers::sqlite(db_url).await?;
        Self::with_providers(&providers, clock)
    }

    /// Build services backed by the hosted APIs.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` for invalid hosted configuration or
    /// catalog validation failures.
    pub fn new_hosted(config: HostedConfig, clock: Clock) -> Result<Self, AppServicesError> {
        let providers = Providers::hosted(config)?;
        Self::with_providers(&providers, clock)
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn courses(&self) -> Arc<CourseService> {
        Arc::clone(&self.courses)
    }

    #[must_use]
    pub fn roster(&self) -> Arc<RosterService> {
        Arc::clone(&self.roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::time::fixed_clock;

    #[tokio::test]
    async fn in_memory_services_compose_end_to_end() {
        let services = AppServices::in_memory(fixed_clock()).unwrap();

        let profile = services
            .auth()
            .sign_up("ada@example.com", "hunter22")
            .await
            .unwrap();

        let course_service = services.courses();
        let course = &course_service.courses()[0];
        let first_section = course.section(0).unwrap().id().clone();
        services
            .progress()
            .complete_section(profile.id(), &first_section)
            .await
            .unwrap();

        let refreshed = services
            .progress()
            .profile(profile.id())
            .await
            .unwrap()
            .expect("profile");
        assert!(!course.is_section_locked(refreshed.completed(), 1));

        let roster = services.roster().learners(10).await.unwrap();
        assert_eq!(roster.len(), 1);
    }
}
