use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use course_core::model::{CourseId, SectionId};

use super::quiz_panel::QuizPanel;
use super::sidebar::{CourseSidebar, scroll_to};
use crate::context::{AppContext, SessionState};
use crate::routes::Route;
use crate::vm::{CELEBRATION_MS, SectionDisplay, map_section_items, markdown_to_html};

const SAVE_ERROR: &str = "Your progress could not be saved. Pass the quiz again to record it.";

/// One workshop day: every section in reading order, gated by the quiz of
/// the section before it.
#[component]
pub fn CourseView(course_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let mut session = use_context::<Signal<SessionState>>();
    let navigator = use_navigator();

    use_effect(move || {
        if matches!(&*session.read(), SessionState::SignedOut) {
            navigator.replace(Route::Login {});
        }
    });

    let mut page_error = use_signal(|| None::<String>);
    let mut celebrating = use_signal(|| false);

    let progress = ctx.progress();
    let on_section_passed = use_callback(move |section_id: SectionId| {
        // A pass over an already-completed section is a review; nothing to
        // record. The borrow ends before the spawn below.
        let learner_id = match &*session.read() {
            SessionState::SignedIn(profile) if !profile.completed().contains(&section_id) => {
                profile.id().clone()
            }
            _ => return,
        };
        let progress = progress.clone();
        spawn(async move {
            match progress.complete_section(&learner_id, &section_id).await {
                Ok(_) => {
                    page_error.set(None);
                    if let SessionState::SignedIn(profile) = &mut *session.write() {
                        profile.mark_complete(section_id);
                    }
                    celebrating.set(true);
                    spawn(async move {
                        tokio::time::sleep(Duration::from_millis(CELEBRATION_MS)).await;
                        celebrating.set(false);
                    });
                }
                Err(_) => page_error.set(Some(SAVE_ERROR.to_string())),
            }
        });
    });

    let Some(profile) = session.read().profile().cloned() else {
        return rsx! {
            div { class: "page-placeholder", "Loading the course…" }
        };
    };

    let courses = ctx.courses();
    let course = course_id
        .parse::<CourseId>()
        .ok()
        .and_then(|id| courses.course(&id).cloned());
    let Some(course) = course else {
        return rsx! {
            div { class: "page",
                div { class: "page-banner page-banner--error", "This course does not exist." }
                Link { class: "btn", to: Route::Dashboard {}, "Back to the dashboard" }
            }
        };
    };

    let items = map_section_items(&course, profile.completed());

    let cards = course
        .sections()
        .iter()
        .zip(items.iter())
        .map(|(section, item)| {
            let section_id = section.id().clone();
            let next_id = items.get(item.index + 1).map(|next| next.id.clone());
            let number = item.index + 1;
            let body = match item.display {
                SectionDisplay::Locked => String::new(),
                _ => markdown_to_html(section.body()),
            };
            let card_class = if item.display == SectionDisplay::Locked {
                "section-card section-card--locked"
            } else {
                "section-card"
            };

            rsx! {
                section { class: "{card_class}", id: "section-{item.id}", key: "{item.id}",
                    header { class: "section-card-header",
                        span { class: "section-card-number", "{number}" }
                        h2 { class: "section-card-title", "{item.title}" }
                    }
                    match item.display {
                        SectionDisplay::Locked => rsx! {
                            div { class: "section-lock-overlay",
                                span { class: "section-lock-icon", "🔒" }
                                p { "Complete the previous section quiz to unlock." }
                            }
                        },
                        SectionDisplay::Completed => rsx! {
                            div { class: "section-body", dangerous_inner_html: "{body}" }
                            div { class: "section-done",
                                span { class: "section-done-note", "✓ Section completed" }
                                if let Some(next) = next_id {
                                    button {
                                        class: "btn btn-ghost",
                                        onclick: move |_| scroll_to(&next),
                                        "Continue to the next section"
                                    }
                                }
                            }
                        },
                        SectionDisplay::Active => rsx! {
                            div { class: "section-body", dangerous_inner_html: "{body}" }
                            if section.has_quiz() {
                                QuizPanel {
                                    questions: section.questions().to_vec(),
                                    on_passed: move |_| on_section_passed.call(section_id.clone()),
                                }
                            }
                        },
                    }
                }
            }
        });

    let error_banner = page_error.read().clone();
    let show_celebration = *celebrating.read();

    rsx! {
        div { class: "page course-page",
            if let Some(message) = error_banner {
                div { class: "page-banner page-banner--error", "{message}" }
            }
            if show_celebration {
                div { class: "page-banner page-banner--celebrate",
                    "Nice work! Section completed. 🎉"
                }
            }
            div { class: "course-layout",
                CourseSidebar { course_title: course.title().to_string(), items: items.clone() }
                div { class: "course-sections", {cards} }
            }
        }
    }
}
