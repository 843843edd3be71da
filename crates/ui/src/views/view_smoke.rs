//! Render-level smoke tests over the SSR harness.

use std::sync::Arc;

use course_core::model::SectionId;
use course_core::time::fixed_clock;
use providers::{InMemoryProvider, Providers};
use services::AppServices;

use super::test_harness::{
    FailingStore, ViewHarness, ViewKind, admin_profile, learner_profile, sign_up_learner,
};
use crate::context::SessionState;
use crate::vm::QuizIntent;

const LOCK_TEXT: &str = "Complete the previous section quiz to unlock.";

#[tokio::test(flavor = "current_thread")]
async fn login_renders_both_credential_forms() {
    let harness = ViewHarness::mount(ViewKind::Login, SessionState::SignedOut);

    let html = harness.html();
    assert!(html.contains("Campus"));
    assert!(html.contains("Sign in"));
    assert!(html.contains("Create account"));
    assert!(html.contains("Email"));
    assert!(html.contains("Password"));
    // The in-memory backend supports federated sign-in, so the token
    // entry must be offered.
    assert!(html.contains("Workspace sign-on token"));
}

#[tokio::test(flavor = "current_thread")]
async fn a_loading_session_shows_the_placeholder() {
    let harness = ViewHarness::mount(ViewKind::Dashboard, SessionState::Loading);

    let html = harness.html();
    assert!(html.contains("Loading your courses…"));
    assert!(!html.contains("Day 1"));
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_shows_one_card_per_day() {
    let harness = ViewHarness::mount(
        ViewKind::Dashboard,
        SessionState::SignedIn(learner_profile()),
    );

    let html = harness.html();
    assert!(html.contains("Day 1 — Foundations"));
    assert!(html.contains("Day 2 — In Practice"));
    assert!(html.contains("Start course"));
    assert!(html.contains("0 of 6 sections completed"));
}

#[tokio::test(flavor = "current_thread")]
async fn course_page_gates_later_sections() {
    let harness = ViewHarness::mount(
        ViewKind::Course("day1".to_string()),
        SessionState::SignedIn(learner_profile()),
    );

    let html = harness.html();
    assert!(html.contains("Welcome to Generative AI"));
    // Only the first section carries a quiz panel; the other two are
    // locked behind it.
    assert!(html.contains("Question 1 of 3"));
    assert_eq!(html.matches(LOCK_TEXT).count(), 2);
    assert!(html.contains("AI toolbox"));
    assert!(html.contains("ChatGPT"));
}

#[tokio::test(flavor = "current_thread")]
async fn an_unknown_course_shows_a_way_back() {
    let harness = ViewHarness::mount(
        ViewKind::Course("day999".to_string()),
        SessionState::SignedIn(learner_profile()),
    );

    let html = harness.html();
    assert!(html.contains("This course does not exist."));
    assert!(html.contains("Back to the dashboard"));
}

#[tokio::test(flavor = "current_thread")]
async fn passing_a_quiz_records_the_completion_and_unlocks_the_next_section() {
    let services = AppServices::in_memory(fixed_clock()).expect("in-memory services");
    let learner = sign_up_learner(&services, "ada@example.com").await;
    let mut harness = ViewHarness::mount_with(
        ViewKind::Course("day1".to_string()),
        SessionState::SignedIn(learner.clone()),
        services,
    );

    let total = harness.quiz_total();
    for _ in 0..total {
        let pick = harness.correct_option();
        harness.dispatch_quiz(QuizIntent::Select(pick));
        harness.dispatch_quiz(QuizIntent::Advance);
    }
    // Let the completion write land, then render the updated session.
    harness.drive_async().await;
    harness.drive();

    let html = harness.html();
    assert!(html.contains("Nice work! Section completed."));
    assert!(html.contains("✓ Section completed"));
    assert_eq!(html.matches(LOCK_TEXT).count(), 1);

    let refreshed = harness
        .services()
        .progress()
        .profile(learner.id())
        .await
        .expect("profile load")
        .expect("profile exists");
    assert_eq!(refreshed.completed().len(), 1);
    assert!(
        refreshed
            .completed()
            .contains(&SectionId::new("intro-to-genai").expect("id"))
    );
}

#[tokio::test(flavor = "current_thread")]
async fn a_failed_run_restarts_with_a_notice() {
    let services = AppServices::in_memory(fixed_clock()).expect("in-memory services");
    let learner = sign_up_learner(&services, "ada@example.com").await;
    let mut harness = ViewHarness::mount_with(
        ViewKind::Course("day1".to_string()),
        SessionState::SignedIn(learner.clone()),
        services,
    );

    // Miss the first question, ace the rest.
    let total = harness.quiz_total();
    let wrong = harness.wrong_option();
    harness.dispatch_quiz(QuizIntent::Select(wrong));
    harness.dispatch_quiz(QuizIntent::Advance);
    for _ in 1..total {
        let pick = harness.correct_option();
        harness.dispatch_quiz(QuizIntent::Select(pick));
        harness.dispatch_quiz(QuizIntent::Advance);
    }

    let html = harness.html();
    assert!(html.contains("You scored 2 of 3."));
    assert!(html.contains("A perfect score unlocks the next section"));
    assert!(html.contains("Question 1 of 3"));

    let refreshed = harness
        .services()
        .progress()
        .profile(learner.id())
        .await
        .expect("profile load")
        .expect("profile exists");
    assert!(refreshed.completed().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn a_failed_completion_write_surfaces_on_the_page() {
    let providers = Providers {
        identity: Arc::new(InMemoryProvider::new()),
        progress: Arc::new(FailingStore),
    };
    let services = AppServices::with_providers(&providers, fixed_clock()).expect("services");
    let mut harness = ViewHarness::mount_with(
        ViewKind::Course("day1".to_string()),
        SessionState::SignedIn(learner_profile()),
        services,
    );

    let total = harness.quiz_total();
    for _ in 0..total {
        let pick = harness.correct_option();
        harness.dispatch_quiz(QuizIntent::Select(pick));
        harness.dispatch_quiz(QuizIntent::Advance);
    }
    harness.drive_async().await;
    harness.drive();

    let html = harness.html();
    assert!(html.contains("Your progress could not be saved."));
    assert!(html.contains("Take the quiz again"));
    // The section stays active rather than flipping to completed.
    assert_eq!(html.matches(LOCK_TEXT).count(), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn admin_roster_lists_every_learner() {
    let services = AppServices::in_memory(fixed_clock()).expect("in-memory services");
    sign_up_learner(&services, "ada@example.com").await;
    sign_up_learner(&services, "grace@example.com").await;
    let mut harness = ViewHarness::mount_with(
        ViewKind::Admin,
        SessionState::SignedIn(admin_profile()),
        services,
    );
    harness.drive_async().await;

    let html = harness.html();
    assert!(html.contains("ada@example.com"));
    assert!(html.contains("grace@example.com"));
    assert!(html.contains("Nov 14, 2023"));
    assert!(html.contains("0 of 6"));
}
