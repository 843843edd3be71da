use std::sync::Arc;

use course_core::model::{LearnerProfile, LearnerRole};
use providers::{Credentials, IdentityProvider, ProgressStore, ProviderError};

use crate::Clock;
use crate::error::AuthError;

/// Minimum accepted password length on sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Sign-in and sign-up flows, plus the first-sign-in profile bootstrap.
///
/// Every successful identity operation ends with a loaded profile: the
/// identity backend proves who signed in, and if no profile document
/// exists yet a default one (role `Learner`, nothing completed) is
/// written before the session is reported up.
#[derive(Clone)]
pub struct AuthService {
    clock: Clock,
    identity: Arc<dyn IdentityProvider>,
    progress: Arc<dyn ProgressStore>,
}

impl AuthService {
    #[must_use]
    pub fn new(
        clock: Clock,
        identity: Arc<dyn IdentityProvider>,
        progress: Arc<dyn ProgressStore>,
    ) -> Self {
        Self {
            clock,
            identity,
            progress,
        }
    }

    /// Create an account and sign it in.
    ///
    /// # Errors
    ///
    /// `WeakPassword` before the backend is contacted; `EmailTaken` and
    /// backend failures after.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<LearnerProfile, AuthError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }
        let credentials = self
            .identity
            .sign_up(email, password)
            .await
            .map_err(identity_error)?;
        self.ensure_profile(&credentials).await
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` for a bad email/password pair; backend
    /// failures otherwise.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<LearnerProfile, AuthError> {
        let credentials = self
            .identity
            .sign_in(email, password)
            .await
            .map_err(identity_error)?;
        self.ensure_profile(&credentials).await
    }

    /// Exchange an external SSO token for a session.
    ///
    /// # Errors
    ///
    /// `FederatedUnsupported` on backends without SSO;
    /// `InvalidCredentials` for a rejected token.
    pub async fn sign_in_federated(&self, token: &str) -> Result<LearnerProfile, AuthError> {
        let credentials = self
            .identity
            .sign_in_federated(token)
            .await
            .map_err(identity_error)?;
        self.ensure_profile(&credentials).await
    }

    /// Whether the login view should offer single sign-on.
    #[must_use]
    pub fn supports_federated(&self) -> bool {
        self.identity.supports_federated()
    }

    /// Restore the session from a previous launch, if any.
    ///
    /// # Errors
    ///
    /// Backend failures; a missing session is `Ok(None)`.
    pub async fn restore(&self) -> Result<Option<LearnerProfile>, AuthError> {
        let restored = self
            .identity
            .restore_session()
            .await
            .map_err(AuthError::Provider)?;
        let Some(credentials) = restored else {
            return Ok(None);
        };
        self.ensure_profile(&credentials).await.map(Some)
    }

    /// End the current session.
    ///
    /// # Errors
    ///
    /// Backend failures.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.identity.sign_out().await.map_err(AuthError::Provider)
    }

    async fn ensure_profile(&self, credentials: &Credentials) -> Result<LearnerProfile, AuthError> {
        let existing = self
            .progress
            .load_profile(&credentials.learner_id)
            .await
            .map_err(AuthError::Provider)?;
        if let Some(profile) = existing {
            return Ok(profile);
        }

        tracing::info!(learner = %credentials.learner_id, "bootstrapping profile on first sign-in");
        let profile = LearnerProfile::new(
            credentials.learner_id.clone(),
            credentials.email.clone(),
            LearnerRole::Learner,
            self.clock.now(),
        )?;
        self.progress
            .save_profile(&profile)
            .await
            .map_err(AuthError::Provider)?;
        Ok(profile)
    }
}

fn identity_error(e: ProviderError) -> AuthError {
    match e {
        ProviderError::InvalidCredentials => AuthError::InvalidCredentials,
        ProviderError::EmailTaken => AuthError::EmailTaken,
        ProviderError::Unsupported(_) => AuthError::FederatedUnsupported,
        other => AuthError::Provider(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::time::{fixed_clock, fixed_now};
    use providers::{InMemoryProvider, Providers};

    fn service() -> (AuthService, Arc<InMemoryProvider>) {
        let provider = Arc::new(InMemoryProvider::new());
        let providers = Providers {
            identity: provider.clone(),
            progress: provider.clone(),
        };
        let service = AuthService::new(fixed_clock(), providers.identity, providers.progress);
        (service, provider)
    }

    #[tokio::test]
    async fn sign_up_bootstraps_a_default_profile() {
        let (service, _provider) = service();

        let profile = service.sign_up("ada@example.com", "hunter22").await.unwrap();
        assert_eq!(profile.email(), "ada@example.com");
        assert_eq!(profile.role(), LearnerRole::Learner);
        assert!(profile.completed().is_empty());
        assert_eq!(profile.created_at(), fixed_now());
    }

    #[tokio::test]
    async fn short_password_never_reaches_the_backend() {
        let (service, provider) = service();

        let err = service.sign_up("ada@example.com", "short").await.unwrap_err();
        assert!(matches!(err, AuthError::WeakPassword));

        // The backend saw nothing: the email is still available.
        assert!(service.sign_up("ada@example.com", "longenough").await.is_ok());
        drop(provider);
    }

    #[tokio::test]
    async fn sign_in_keeps_the_existing_profile() {
        let (service, provider) = service();

        let mut created = service.sign_up("ada@example.com", "hunter22").await.unwrap();
        created.mark_complete(course_core::model::SectionId::new("intro-to-genai").unwrap());
        provider.save_profile(&created).await.unwrap();
        service.sign_out().await.unwrap();

        let profile = service.sign_in("ada@example.com", "hunter22").await.unwrap();
        assert_eq!(profile.completed().len(), 1);
    }

    #[tokio::test]
    async fn bad_password_maps_to_invalid_credentials() {
        let (service, _provider) = service();

        service.sign_up("ada@example.com", "hunter22").await.unwrap();
        let err = service.sign_in("ada@example.com", "nope").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn duplicate_email_maps_to_email_taken() {
        let (service, _provider) = service();

        service.sign_up("ada@example.com", "hunter22").await.unwrap();
        let err = service.sign_up("ada@example.com", "hunter23").await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn restore_reports_the_signed_in_learner() {
        let (service, _provider) = service();

        assert!(service.restore().await.unwrap().is_none());

        let created = service.sign_up("ada@example.com", "hunter22").await.unwrap();
        let restored = service.restore().await.unwrap().expect("active session");
        assert_eq!(restored.id(), created.id());

        service.sign_out().await.unwrap();
        assert!(service.restore().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn federated_token_flow_signs_in() {
        let (service, provider) = service();
        provider
            .register_federated_token("sso-token", "mia@example.com")
            .unwrap();

        assert!(service.supports_federated());
        let profile = service.sign_in_federated("sso-token").await.unwrap();
        assert_eq!(profile.email(), "mia@example.com");

        let err = service.sign_in_federated("bogus").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    mod unsupported_backend {
        use super::*;
        use async_trait::async_trait;

        struct NoSso;

        #[async_trait]
        impl IdentityProvider for NoSso {
            async fn sign_up(&self, _: &str, _: &str) -> Result<Credentials, ProviderError> {
                Err(ProviderError::Connection("unused".into()))
            }
            async fn sign_in(&self, _: &str, _: &str) -> Result<Credentials, ProviderError> {
                Err(ProviderError::Connection("unused".into()))
            }
            async fn sign_in_federated(&self, _: &str) -> Result<Credentials, ProviderError> {
                Err(ProviderError::Unsupported("federated sign-in"))
            }
            fn supports_federated(&self) -> bool {
                false
            }
            async fn restore_session(&self) -> Result<Option<Credentials>, ProviderError> {
                Ok(None)
            }
            async fn sign_out(&self) -> Result<(), ProviderError> {
                Ok(())
            }
        }

        #[tokio::test]
        async fn unsupported_maps_to_federated_unsupported() {
            let progress = Arc::new(InMemoryProvider::new());
            let service = AuthService::new(fixed_clock(), Arc::new(NoSso), progress);

            assert!(!service.supports_federated());
            let err = service.sign_in_federated("token").await.unwrap_err();
            assert!(matches!(err, AuthError::FederatedUnsupported));
        }
    }
}
