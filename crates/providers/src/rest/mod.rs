use std::env;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use course_core::model::LearnerId;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

use crate::provider::{Credentials, IdentityProvider, ProgressStore, ProviderError, Providers};

mod documents;
mod identity;

/// Connection settings for the hosted backend.
#[derive(Clone, Debug)]
pub struct HostedConfig {
    pub identity_url: String,
    pub profiles_url: String,
    pub api_key: String,
    /// Where to cache the refresh token between launches. `None` disables
    /// session restore for this backend.
    pub session_cache: Option<PathBuf>,
}

impl HostedConfig {
    /// Reads `CAMPUS_API_KEY`, `CAMPUS_IDENTITY_URL`, `CAMPUS_PROFILES_URL`
    /// and the optional `CAMPUS_SESSION_CACHE`. Returns `None` when the
    /// hosted backend is not configured at all.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("CAMPUS_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let identity_url = env::var("CAMPUS_IDENTITY_URL").ok()?;
        let profiles_url = env::var("CAMPUS_PROFILES_URL").ok()?;
        let session_cache = env::var("CAMPUS_SESSION_CACHE").ok().map(PathBuf::from);
        Some(Self {
            identity_url,
            profiles_url,
            api_key,
            session_cache,
        })
    }

    /// # Errors
    ///
    /// Returns `HostedInitError` when either base URL does not parse.
    pub fn validate(&self) -> Result<(), HostedInitError> {
        Url::parse(&self.identity_url).map_err(|source| HostedInitError::InvalidUrl {
            which: "identity",
            source,
        })?;
        Url::parse(&self.profiles_url).map_err(|source| HostedInitError::InvalidUrl {
            which: "profiles",
            source,
        })?;
        Ok(())
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HostedInitError {
    #[error("invalid {which} base URL: {source}")]
    InvalidUrl {
        which: &'static str,
        source: url::ParseError,
    },
}

/// One signed-in hosted account, tokens included.
#[derive(Clone, Debug)]
pub(crate) struct HostedSession {
    pub learner_id: LearnerId,
    pub email: String,
    pub id_token: String,
    pub refresh_token: String,
}

impl HostedSession {
    pub(crate) fn credentials(&self) -> Credentials {
        Credentials {
            learner_id: self.learner_id.clone(),
            email: self.email.clone(),
        }
    }
}

/// Remote backend speaking the hosted identity and profile-document APIs.
pub struct HostedProvider {
    client: Client,
    config: HostedConfig,
    session: Mutex<Option<HostedSession>>,
}

impl HostedProvider {
    #[must_use]
    pub fn new(config: HostedConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            session: Mutex::new(None),
        }
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn config(&self) -> &HostedConfig {
        &self.config
    }

    pub(crate) fn session_snapshot(&self) -> Result<Option<HostedSession>, ProviderError> {
        let session = self
            .session
            .lock()
            .map_err(|e| ProviderError::Connection(e.to_string()))?;
        Ok(session.clone())
    }

    pub(crate) fn set_session(&self, value: Option<HostedSession>) -> Result<(), ProviderError> {
        let mut session = self
            .session
            .lock()
            .map_err(|e| ProviderError::Connection(e.to_string()))?;
        *session = value;
        Ok(())
    }

    /// Bearer token for document calls. Unauthenticated access to profile
    /// documents is a permission failure, not a connection one.
    pub(crate) fn bearer_token(&self) -> Result<String, ProviderError> {
        self.session_snapshot()?
            .map(|session| session.id_token)
            .ok_or(ProviderError::PermissionDenied)
    }
}

impl Providers {
    /// Build `Providers` backed by the hosted APIs.
    ///
    /// # Errors
    ///
    /// Returns `HostedInitError` when the configured base URLs are invalid.
    pub fn hosted(config: HostedConfig) -> Result<Self, HostedInitError> {
        config.validate()?;
        let provider = Arc::new(HostedProvider::new(config));
        let identity: Arc<dyn IdentityProvider> = provider.clone();
        let progress: Arc<dyn ProgressStore> = provider;
        Ok(Self { identity, progress })
    }
}

pub(crate) fn transport(e: reqwest::Error) -> ProviderError {
    ProviderError::Connection(e.to_string())
}

pub(crate) fn status_error(status: StatusCode) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::PermissionDenied,
        StatusCode::NOT_FOUND => ProviderError::NotFound,
        other => ProviderError::Connection(format!("unexpected HTTP status {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(identity: &str, profiles: &str) -> HostedConfig {
        HostedConfig {
            identity_url: identity.into(),
            profiles_url: profiles.into(),
            api_key: "test-key".into(),
            session_cache: None,
        }
    }

    #[test]
    fn valid_urls_pass_validation() {
        let config = config("https://identity.example.com/v1", "https://api.example.com/v1");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn garbage_url_fails_validation() {
        let config = config("not a url", "https://api.example.com/v1");
        assert!(matches!(
            config.validate(),
            Err(HostedInitError::InvalidUrl {
                which: "identity",
                ..
            })
        ));
    }

    #[test]
    fn status_mapping_covers_auth_and_missing() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED),
            ProviderError::PermissionDenied
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN),
            ProviderError::PermissionDenied
        ));
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND),
            ProviderError::NotFound
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY),
            ProviderError::Connection(_)
        ));
    }
}
