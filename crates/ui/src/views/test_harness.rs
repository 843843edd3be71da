//! SSR harness for driving views over in-memory backends.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};

use course_core::model::{LearnerId, LearnerProfile, LearnerRole, SectionId};
use course_core::time::{fixed_clock, fixed_now};
use providers::{ProgressStore, ProviderError};
use services::{AppServices, AuthService, CourseService, ProgressService, RosterService};

use super::course::QuizTestHandles;
use super::{AdminView, CourseView, DashboardView, LoginView};
use crate::context::{AppContext, SessionState, UiApp, build_app_context};
use crate::platform::{LinkOpenerRef, UiLinkOpener};
use crate::vm::QuizIntent;

/// Which view the harness mounts at its single route.
#[derive(Clone, PartialEq)]
pub(crate) enum ViewKind {
    Login,
    Dashboard,
    Course(String),
    Admin,
}

/// Swallows open-link requests; tests never launch a browser.
struct NullOpener;

impl UiLinkOpener for NullOpener {
    fn open_url(&self, _url: &str) {}
}

/// A progress store whose every call fails, for the error-banner paths.
pub(crate) struct FailingStore;

#[async_trait]
impl ProgressStore for FailingStore {
    async fn load_profile(
        &self,
        _learner_id: &LearnerId,
    ) -> Result<Option<LearnerProfile>, ProviderError> {
        Err(ProviderError::Connection("store offline".to_string()))
    }

    async fn save_profile(&self, _profile: &LearnerProfile) -> Result<(), ProviderError> {
        Err(ProviderError::Connection("store offline".to_string()))
    }

    async fn append_completed_section(
        &self,
        _learner_id: &LearnerId,
        _section_id: &SectionId,
        _completed_at: DateTime<Utc>,
    ) -> Result<(), ProviderError> {
        Err(ProviderError::Connection("store offline".to_string()))
    }

    async fn list_profiles(&self, _limit: u32) -> Result<Vec<LearnerProfile>, ProviderError> {
        Err(ProviderError::Connection("store offline".to_string()))
    }
}

struct TestApp {
    services: AppServices,
    opener: LinkOpenerRef,
}

impl UiApp for TestApp {
    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn courses(&self) -> Arc<CourseService> {
        self.services.courses()
    }

    fn roster(&self) -> Arc<RosterService> {
        self.services.roster()
    }

    fn link_opener(&self) -> LinkOpenerRef {
        Arc::clone(&self.opener)
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    context: AppContext,
    session: SessionState,
    kind: ViewKind,
    quiz: QuizTestHandles,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for HarnessProps {}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::Login => rsx! {
            LoginView {}
        },
        ViewKind::Dashboard => rsx! {
            DashboardView {}
        },
        ViewKind::Course(course_id) => rsx! {
            CourseView { course_id }
        },
        ViewKind::Admin => rsx! {
            AdminView {}
        },
    }
}

#[component]
fn ViewRouterHarness(props: HarnessProps) -> Element {
    use_context_provider(|| props.context.clone());
    use_context_provider(|| Signal::new(props.session.clone()));
    use_context_provider(|| props.quiz.clone());
    use_context_provider(|| props.kind.clone());
    rsx! { Router::<TestRoute> {} }
}

pub(crate) struct ViewHarness {
    dom: VirtualDom,
    services: AppServices,
    quiz: QuizTestHandles,
}

impl ViewHarness {
    /// Mounts `kind` over fresh in-memory backends.
    pub(crate) fn mount(kind: ViewKind, session: SessionState) -> Self {
        let services = AppServices::in_memory(fixed_clock()).expect("in-memory services");
        Self::mount_with(kind, session, services)
    }

    /// Mounts `kind` over prepared backends, e.g. with seeded accounts.
    pub(crate) fn mount_with(kind: ViewKind, session: SessionState, services: AppServices) -> Self {
        let app: Arc<dyn UiApp> = Arc::new(TestApp {
            services: services.clone(),
            opener: Arc::new(NullOpener),
        });
        let quiz = QuizTestHandles::default();
        let props = HarnessProps {
            context: build_app_context(&app),
            session,
            kind,
            quiz: quiz.clone(),
        };

        let mut dom = VirtualDom::new_with_props(ViewRouterHarness, props);
        dom.rebuild_in_place();
        let mut harness = Self {
            dom,
            services,
            quiz,
        };
        harness.drive();
        harness
    }

    pub(crate) fn services(&self) -> &AppServices {
        &self.services
    }

    /// Flushes queued events and renders synchronously.
    pub(crate) fn drive(&mut self) {
        self.dom.process_events();
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Lets spawned futures (resources, completion writes) make progress,
    /// then renders.
    pub(crate) async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub(crate) fn html(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    /// Sends an intent to the mounted quiz panel and renders.
    pub(crate) fn dispatch_quiz(&mut self, intent: QuizIntent) {
        self.quiz.dispatch().call(intent);
        self.drive();
    }

    pub(crate) fn quiz_total(&self) -> usize {
        let vm = self.quiz.vm();
        let state = vm.read();
        state.as_ref().expect("an active quiz run").total()
    }

    /// Display index of the correct option for the current question.
    pub(crate) fn correct_option(&self) -> usize {
        let vm = self.quiz.vm();
        let state = vm.read();
        let run = state.as_ref().expect("an active quiz run");
        run.options()
            .iter()
            .position(|option| option.correct)
            .expect("one correct option")
    }

    /// Display index of some wrong option for the current question.
    pub(crate) fn wrong_option(&self) -> usize {
        let vm = self.quiz.vm();
        let state = vm.read();
        let run = state.as_ref().expect("an active quiz run");
        run.options()
            .iter()
            .position(|option| !option.correct)
            .expect("a wrong option")
    }
}

/// Creates a learner account, and with it a profile document, on the
/// harness backends.
pub(crate) async fn sign_up_learner(services: &AppServices, email: &str) -> LearnerProfile {
    services
        .auth()
        .sign_up(email, "hunter22")
        .await
        .expect("sign up test learner")
}

/// A detached learner profile for session injection in views that never
/// touch the backend.
pub(crate) fn learner_profile() -> LearnerProfile {
    LearnerProfile::new(
        LearnerId::new("learner-1").expect("id"),
        "ada@example.com",
        LearnerRole::Learner,
        fixed_now(),
    )
    .expect("learner profile")
}

/// A profile carrying the admin role, for the admin-only view.
pub(crate) fn admin_profile() -> LearnerProfile {
    LearnerProfile::new(
        LearnerId::new("admin-1").expect("id"),
        "admin@example.com",
        LearnerRole::Admin,
        fixed_now(),
    )
    .expect("admin profile")
}
