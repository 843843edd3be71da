use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};

use crate::context::{AppContext, SessionState};
use crate::views::{AdminView, CourseView, DashboardView, LoginView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", LoginView)] Login {},
        #[route("/dashboard", DashboardView)] Dashboard {},
        #[route("/course/:course_id", CourseView)] Course { course_id: String },
        #[route("/admin", AdminView)] Admin {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            TopBar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn TopBar() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let session = use_context::<Signal<SessionState>>();
    let profile = session.read().profile().cloned();

    let sign_out = use_callback(move |()| {
        let auth = ctx.auth();
        let mut session = session;
        spawn(async move {
            // A failed backend sign-out still ends the local session.
            let _ = auth.sign_out().await;
            session.set(SessionState::SignedOut);
            navigator.replace(Route::Login {});
        });
    });

    rsx! {
        header { class: "topbar",
            span { class: "topbar-brand", "Campus" }
            if let Some(profile) = profile {
                nav { class: "topbar-links",
                    Link { to: Route::Dashboard {}, "Dashboard" }
                    if profile.role().is_admin() {
                        Link { to: Route::Admin {}, "Admin" }
                    }
                }
                div { class: "topbar-session",
                    span { class: "topbar-email", "{profile.email()}" }
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: move |_| sign_out.call(()),
                        "Sign out"
                    }
                }
            }
        }
    }
}
