use dioxus::prelude::*;
use dioxus_router::use_navigator;

use services::{AuthError, MIN_PASSWORD_LEN};

use crate::context::{AppContext, SessionState};
use crate::routes::Route;

/// Which credential form is showing.
#[derive(Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    SignIn,
    SignUp,
}

/// Sign-in / sign-up screen. Signed-in learners are sent straight to the
/// dashboard.
#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut session = use_context::<Signal<SessionState>>();
    let navigator = use_navigator();

    use_effect(move || {
        if matches!(&*session.read(), SessionState::SignedIn(_)) {
            navigator.replace(Route::Dashboard {});
        }
    });

    let mut mode = use_signal(|| AuthMode::SignIn);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut sso_token = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let auth = ctx.auth();
    let supports_federated = auth.supports_federated();

    let submit_auth = auth.clone();
    let submit = use_callback(move |_: ()| {
        if *busy.read() {
            return;
        }
        let address = email.read().trim().to_string();
        let secret = password.read().clone();
        if address.is_empty() || secret.is_empty() {
            error.set(Some("Enter an email address and a password.".to_string()));
            return;
        }
        busy.set(true);
        error.set(None);
        let auth = submit_auth.clone();
        let current_mode = *mode.read();
        spawn(async move {
            let outcome = match current_mode {
                AuthMode::SignIn => auth.sign_in(&address, &secret).await,
                AuthMode::SignUp => auth.sign_up(&address, &secret).await,
            };
            busy.set(false);
            match outcome {
                Ok(profile) => {
                    session.set(SessionState::SignedIn(profile));
                    navigator.replace(Route::Dashboard {});
                }
                Err(err) => error.set(Some(auth_message(&err))),
            }
        });
    });

    let sso_auth = auth;
    let submit_sso = use_callback(move |_: ()| {
        if *busy.read() {
            return;
        }
        let token = sso_token.read().trim().to_string();
        if token.is_empty() {
            error.set(Some(
                "Paste the sign-on token from your workspace portal.".to_string(),
            ));
            return;
        }
        busy.set(true);
        error.set(None);
        let auth = sso_auth.clone();
        spawn(async move {
            let outcome = auth.sign_in_federated(&token).await;
            busy.set(false);
            match outcome {
                Ok(profile) => {
                    session.set(SessionState::SignedIn(profile));
                    navigator.replace(Route::Dashboard {});
                }
                Err(err) => error.set(Some(auth_message(&err))),
            }
        });
    });

    if session.read().is_loading() {
        return rsx! {
            div { class: "page-placeholder", "Checking your session…" }
        };
    }

    let current_mode = *mode.read();
    let banner = error.read().clone();
    let is_busy = *busy.read();

    rsx! {
        div { class: "login",
            div { class: "login-card",
                h1 { class: "login-title", "Campus" }
                p { class: "login-subtitle", "Two days of hands-on generative AI." }

                div { class: "login-tabs",
                    button {
                        class: if current_mode == AuthMode::SignIn { "login-tab login-tab--active" } else { "login-tab" },
                        onclick: move |_| {
                            mode.set(AuthMode::SignIn);
                            error.set(None);
                        },
                        "Sign in"
                    }
                    button {
                        class: if current_mode == AuthMode::SignUp { "login-tab login-tab--active" } else { "login-tab" },
                        onclick: move |_| {
                            mode.set(AuthMode::SignUp);
                            error.set(None);
                        },
                        "Create account"
                    }
                }

                label { class: "field",
                    span { class: "field-label", "Email" }
                    input {
                        class: "field-input",
                        r#type: "email",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                label { class: "field",
                    span { class: "field-label", "Password" }
                    input {
                        class: "field-input",
                        r#type: "password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                if current_mode == AuthMode::SignUp {
                    p { class: "field-hint", "Use at least {MIN_PASSWORD_LEN} characters." }
                }

                if let Some(message) = banner {
                    p { class: "login-error", "{message}" }
                }

                button {
                    class: "btn btn-primary login-submit",
                    disabled: is_busy,
                    onclick: move |_| submit.call(()),
                    if current_mode == AuthMode::SignUp { "Create account" } else { "Sign in" }
                }

                if supports_federated {
                    div { class: "login-divider", span { "or" } }
                    label { class: "field",
                        span { class: "field-label", "Workspace sign-on token" }
                        input {
                            class: "field-input",
                            value: "{sso_token}",
                            oninput: move |evt| sso_token.set(evt.value()),
                        }
                    }
                    button {
                        class: "btn login-sso",
                        disabled: is_busy,
                        onclick: move |_| submit_sso.call(()),
                        "Continue with workspace sign-on"
                    }
                }
            }
        }
    }
}

/// Maps backend auth failures onto learner-facing text.
fn auth_message(err: &AuthError) -> String {
    match err {
        AuthError::InvalidCredentials
        | AuthError::EmailTaken
        | AuthError::WeakPassword
        | AuthError::FederatedUnsupported => err.to_string(),
        _ => "Could not reach the account service. Please try again.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use providers::ProviderError;

    use super::*;

    #[test]
    fn credential_problems_are_reported_verbatim() {
        assert_eq!(
            auth_message(&AuthError::InvalidCredentials),
            "invalid email or password"
        );
        assert_eq!(
            auth_message(&AuthError::EmailTaken),
            "an account with this email already exists"
        );
    }

    #[test]
    fn backend_failures_collapse_to_one_message() {
        let err = AuthError::Provider(ProviderError::Connection("boom".to_string()));
        assert!(auth_message(&err).starts_with("Could not reach"));
    }
}
