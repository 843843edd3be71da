use std::sync::Arc;

use course_core::model::LearnerProfile;
use services::{AuthService, CourseService, ProgressService, RosterService};

use crate::platform::LinkOpenerRef;

pub trait UiApp: Send + Sync {
    fn auth(&self) -> Arc<AuthService>;
    fn progress(&self) -> Arc<ProgressService>;
    fn courses(&self) -> Arc<CourseService>;
    fn roster(&self) -> Arc<RosterService>;
    fn link_opener(&self) -> LinkOpenerRef;
}

/// Where the app is in its sign-in lifecycle.
///
/// Held in a root `Signal` provided by [`crate::App`]; views read it for
/// guards and the current profile, and write it on sign-in/out and after a
/// recorded completion. Session state is always explicit; there is no
/// ambient "current user".
#[derive(Clone, Debug, PartialEq)]
pub enum SessionState {
    /// Launch-time restore has not resolved yet.
    Loading,
    SignedOut,
    SignedIn(LearnerProfile),
}

impl SessionState {
    #[must_use]
    pub fn profile(&self) -> Option<&LearnerProfile> {
        match self {
            SessionState::SignedIn(profile) => Some(profile),
            SessionState::Loading | SessionState::SignedOut => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }
}

#[derive(Clone)]
pub struct AppContext {
    auth: Arc<AuthService>,
    progress: Arc<ProgressService>,
    courses: Arc<CourseService>,
    roster: Arc<RosterService>,
    link_opener: LinkOpenerRef,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            auth: app.auth(),
            progress: app.progress(),
            courses: app.courses(),
            roster: app.roster(),
            link_opener: app.link_opener(),
        }
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

    #[must_use]
    pub fn link_opener(&self) -> LinkOpenerRef {
        Arc::clone(&self.link_opener)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
