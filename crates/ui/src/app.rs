use dioxus::prelude::*;
use dioxus_router::Router;

use crate::context::{AppContext, SessionState};
use crate::routes::Route;

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let mut session = use_context_provider(|| Signal::new(SessionState::Loading));

    // Restore the previous session once at launch. A failed restore lands on
    // the login page; the failure resurfaces on the next sign-in attempt.
    use_future(move || {
        let auth = ctx.auth();
        async move {
            let next = match auth.restore().await {
                Ok(Some(profile)) => SessionState::SignedIn(profile),
                Ok(None) | Err(_) => SessionState::SignedOut,
            };
            session.set(next);
        }
    });

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        // Stable OS/window title. Per-route headings render inside the pages.
        document::Title { "Campus" }

        // A single root container for global layout CSS hooks.
        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
