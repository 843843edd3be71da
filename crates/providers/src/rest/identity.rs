use std::fs;
use std::path::Path;

use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};

use super::{HostedProvider, HostedSession, status_error, transport};
use crate::provider::{Credentials, IdentityProvider, ProviderError, normalize_email};

fn ser<E: core::fmt::Display>(e: E) -> ProviderError {
    ProviderError::Serialization(e.to_string())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordAuthRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IdpAuthRequest<'a> {
    idp_token: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    grant_type: &'static str,
    refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    local_id: String,
    email: String,
    id_token: String,
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Refresh token cached on disk between launches. The short-lived id
/// token is never written out.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CachedSession {
    refresh_token: String,
}

fn auth_error_from(status: StatusCode, body: &str) -> ProviderError {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        return match parsed.error.message.as_str() {
            "EMAIL_EXISTS" => ProviderError::EmailTaken,
            "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS"
            | "INVALID_IDP_TOKEN" => ProviderError::InvalidCredentials,
            "OPERATION_NOT_ALLOWED" | "USER_DISABLED" => ProviderError::PermissionDenied,
            other => ProviderError::Connection(format!("identity API error: {other}")),
        };
    }
    status_error(status)
}

async fn read_auth_response(response: Response) -> Result<AuthResponse, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.map_err(transport)?;
        return Err(auth_error_from(status, &body));
    }
    response.json::<AuthResponse>().await.map_err(ser)
}

fn read_cached_session(path: &Path) -> Option<CachedSession> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

fn write_cached_session(path: &Path, session: &HostedSession) {
    let cached = CachedSession {
        refresh_token: session.refresh_token.clone(),
    };
    let result = serde_json::to_string(&cached)
        .map_err(|e| e.to_string())
        .and_then(|json| fs::write(path, json).map_err(|e| e.to_string()));
    if let Err(reason) = result {
        tracing::warn!(path = %path.display(), %reason, "failed to cache session");
    }
}

fn remove_cached_session(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), reason = %e, "failed to clear session cache");
        }
    }
}

impl HostedProvider {
    fn identity_endpoint(&self, name: &str) -> String {
        format!(
            "{}/{name}?key={}",
            self.config().identity_url.trim_end_matches('/'),
            self.config().api_key
        )
    }

    async fn password_auth(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> Result<Credentials, ProviderError> {
        let response = self
            .client()
            .post(self.identity_endpoint(endpoint))
            .json(&PasswordAuthRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(transport)?;
        let auth = read_auth_response(response).await?;
        self.adopt(auth)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Credentials, ProviderError> {
        let response = self
            .client()
            .post(self.identity_endpoint("token"))
            .json(&RefreshRequest {
                grant_type: "refresh_token",
                refresh_token,
            })
            .send()
            .await
            .map_err(transport)?;
        let auth = read_auth_response(response).await?;
        self.adopt(auth)
    }

    /// Installs a fresh auth response as the current session.
    fn adopt(&self, auth: AuthResponse) -> Result<Credentials, ProviderError> {
        let session = HostedSession {
            learner_id: course_core::model::LearnerId::new(auth.local_id).map_err(ser)?,
            email: auth.email,
            id_token: auth.id_token,
            refresh_token: auth.refresh_token,
        };
        if let Some(path) = self.config().session_cache.as_deref() {
            write_cached_session(path, &session);
        }
        let credentials = session.credentials();
        self.set_session(Some(session))?;
        Ok(credentials)
    }
}

#[async_trait::async_trait]
impl IdentityProvider for HostedProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Credentials, ProviderError> {
        self.password_auth("accounts:signUp", &normalize_email(email), password)
            .await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Credentials, ProviderError> {
        self.password_auth("accounts:signInWithPassword", &normalize_email(email), password)
            .await
    }

    async fn sign_in_federated(&self, token: &str) -> Result<Credentials, ProviderError> {
        let response = self
            .client()
            .post(self.identity_endpoint("accounts:signInWithIdp"))
            .json(&IdpAuthRequest {
                idp_token: token,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(transport)?;
        let auth = read_auth_response(response).await?;
        self.adopt(auth)
    }

    fn supports_federated(&self) -> bool {
        true
    }

    async fn restore_session(&self) -> Result<Option<Credentials>, ProviderError> {
        if let Some(session) = self.session_snapshot()? {
            return Ok(Some(session.credentials()));
        }
        let Some(path) = self.config().session_cache.clone() else {
            return Ok(None);
        };
        let Some(cached) = read_cached_session(&path) else {
            return Ok(None);
        };
        // An expired or revoked refresh token just means no session;
        // launch proceeds signed out.
        match self.refresh(&cached.refresh_token).await {
            Ok(credentials) => Ok(Some(credentials)),
            Err(reason) => {
                tracing::warn!(%reason, "session restore failed, starting signed out");
                remove_cached_session(&path);
                Ok(None)
            }
        }
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.set_session(None)?;
        if let Some(path) = self.config().session_cache.as_deref() {
            remove_cached_session(path);
        }
        Ok(())
    }
}
