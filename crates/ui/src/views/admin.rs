use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::RosterError;

use crate::context::{AppContext, SessionState};
use crate::routes::Route;
use crate::vm::{RosterRowVm, map_roster_rows};

const ROSTER_LIMIT: u32 = 200;
const ROSTER_ERROR: &str = "Something went wrong. Please try again.";

/// Roster of every learner and their progress. Admin accounts only;
/// everyone else lands back on the dashboard.
#[component]
pub fn AdminView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<Signal<SessionState>>();
    let navigator = use_navigator();

    use_effect(move || match &*session.read() {
        SessionState::SignedOut => {
            navigator.replace(Route::Login {});
        }
        SessionState::SignedIn(profile) if !profile.role().is_admin() => {
            navigator.replace(Route::Dashboard {});
        }
        _ => {}
    });

    let roster = ctx.roster();
    let total = ctx.courses().total_sections();
    let resource = use_resource(move || {
        let roster = roster.clone();
        async move {
            let learners = roster.learners(ROSTER_LIMIT).await?;
            Ok::<_, RosterError>(map_roster_rows(&learners, total))
        }
    });

    let Some(profile) = session.read().profile().cloned() else {
        return rsx! {
            div { class: "page-placeholder", "Loading…" }
        };
    };
    if !profile.role().is_admin() {
        return rsx! {
            div { class: "page-placeholder", "Redirecting…" }
        };
    }

    rsx! {
        div { class: "page admin",
            header { class: "view-header",
                h1 { "Learners" }
                p { class: "view-subtitle", "Everyone signed up for the workshop." }
            }
            match roster_state(resource) {
                RosterState::Loading => rsx! {
                    div { class: "page-placeholder", "Loading the roster…" }
                },
                RosterState::Failed => rsx! {
                    div { class: "page-banner page-banner--error", "{ROSTER_ERROR}" }
                },
                RosterState::Ready(rows) => rsx! {
                    table { class: "roster",
                        thead {
                            tr {
                                th { "Email" }
                                th { "Role" }
                                th { "Joined" }
                                th { "Progress" }
                            }
                        }
                        tbody {
                            {rows.iter().map(|row| rsx! {
                                tr { key: "{row.email}",
                                    td { "{row.email}" }
                                    td {
                                        span { class: "role-pill", "{row.role_label}" }
                                    }
                                    td { "{row.joined}" }
                                    td { "{row.completed} of {row.total} · {row.percent}%" }
                                }
                            })}
                        }
                    }
                },
            }
        }
    }
}

/// Render-ready snapshot of the roster resource. Backend failures collapse
/// to one banner; the learner reloads the page instead of retrying here.
enum RosterState {
    Loading,
    Failed,
    Ready(Vec<RosterRowVm>),
}

fn roster_state(resource: Resource<Result<Vec<RosterRowVm>, RosterError>>) -> RosterState {
    match resource.state().cloned() {
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(rows)) => RosterState::Ready(rows.clone()),
            _ => RosterState::Failed,
        },
        _ => RosterState::Loading,
    }
}
