use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::{AppContext, SessionState};
use crate::routes::Route;
use crate::vm::map_course_card;

/// Course overview: one card per workshop day plus overall progress.
#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<Signal<SessionState>>();
    let navigator = use_navigator();

    use_effect(move || {
        if matches!(&*session.read(), SessionState::SignedOut) {
            navigator.replace(Route::Login {});
        }
    });

    let Some(profile) = session.read().profile().cloned() else {
        return rsx! {
            div { class: "page-placeholder", "Loading your courses…" }
        };
    };

    let courses = ctx.courses();
    let total = courses.total_sections();
    let done = profile.completed().len();

    let cards = courses.courses().iter().map(|course| {
        let card = map_course_card(course, profile.completed());
        let course_id = card.id.clone();
        rsx! {
            article { class: "course-card", key: "{card.id}",
                h2 { class: "course-card-title", "{card.title}" }
                p { class: "course-card-summary", "{card.summary}" }
                div { class: "course-card-progress",
                    div { class: "progress-track",
                        div { class: "progress-fill", style: "width: {card.percent}%" }
                    }
                    span { class: "progress-text", "{card.completed} of {card.total} sections · {card.percent}%" }
                }
                Link {
                    class: "btn btn-primary",
                    to: Route::Course { course_id },
                    "{card.action_label}"
                }
            }
        }
    });

    rsx! {
        div { class: "page dashboard",
            header { class: "view-header",
                h1 { "Welcome back" }
                p { class: "view-subtitle",
                    "{profile.email()} · {done} of {total} sections completed"
                }
            }
            div { class: "course-grid", {cards} }
        }
    }
}
