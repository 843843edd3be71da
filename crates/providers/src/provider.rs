//! Backend abstractions for identity and learner progress.
//!
//! The service layer talks to these traits only; concrete backends
//! (in-memory, SQLite, hosted REST) live behind them and are selected
//! once at launch. Keeping the surface this narrow is what lets the
//! whole app run unchanged against a throwaway in-memory double, a
//! local database file, or the hosted API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use course_core::model::{LearnerId, LearnerProfile, SectionId};
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by provider implementations.
///
/// Backends map their native failures onto these variants so the
/// layers above can render one message per failure kind without
/// knowing which backend produced it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("record not found")]
    NotFound,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("an account with this email already exists")]
    EmailTaken,
    #[error("not allowed for this account")]
    PermissionDenied,
    #[error("{0} is not supported by this backend")]
    Unsupported(&'static str),
    #[error("backend connection failed: {0}")]
    Connection(String),
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Proof of a signed-in account, as reported by an identity backend.
///
/// This is deliberately not a [`LearnerProfile`]: identity backends
/// know who signed in, while the profile document lives with the
/// progress store and may not exist yet for a brand-new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub learner_id: LearnerId,
    pub email: String,
}

/// Account lifecycle: sign-up, sign-in, session restore, sign-out.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Creates a new account and signs it in.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Credentials, ProviderError>;

    /// Signs in to an existing account with email and password.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Credentials, ProviderError>;

    /// Signs in with a token minted by an external identity provider,
    /// creating the account on first use.
    ///
    /// Backends without federated support return
    /// [`ProviderError::Unsupported`]; callers should consult
    /// [`supports_federated`](Self::supports_federated) before offering
    /// the option in the UI.
    async fn sign_in_federated(&self, token: &str) -> Result<Credentials, ProviderError>;

    /// Whether [`sign_in_federated`](Self::sign_in_federated) can succeed
    /// on this backend.
    fn supports_federated(&self) -> bool;

    /// Returns the signed-in account from a previous launch, if the
    /// backend persisted one.
    async fn restore_session(&self) -> Result<Option<Credentials>, ProviderError>;

    /// Ends the current session.
    async fn sign_out(&self) -> Result<(), ProviderError>;
}

/// Learner profile documents and the completed-sections record.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Loads one learner's profile, or `None` when no profile document
    /// exists yet for the id.
    async fn load_profile(
        &self,
        learner_id: &LearnerId,
    ) -> Result<Option<LearnerProfile>, ProviderError>;

    /// Writes a full profile document, creating or replacing it.
    async fn save_profile(&self, profile: &LearnerProfile) -> Result<(), ProviderError>;

    /// Appends one section to the learner's completed set.
    ///
    /// Union semantics: appending a section that is already recorded is
    /// a no-op, not an error, so retries and double-fires upstream stay
    /// harmless. The profile document must already exist.
    async fn append_completed_section(
        &self,
        learner_id: &LearnerId,
        section_id: &SectionId,
        completed_at: DateTime<Utc>,
    ) -> Result<(), ProviderError>;

    /// Profiles for the admin roster, ordered by email.
    async fn list_profiles(&self, limit: u32) -> Result<Vec<LearnerProfile>, ProviderError>;
}

// ─── IN-MEMORY BACKEND ────────────────────────────────────────────────────────

pub(crate) fn normalize_email(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

struct Account {
    learner_id: LearnerId,
    email: String,
    password: String,
}

/// Process-local backend used for tests and the `memory` launch mode.
///
/// Everything lives in mutexed maps; nothing survives a restart.
pub struct InMemoryProvider {
    accounts: Mutex<HashMap<String, Account>>,
    profiles: Mutex<HashMap<LearnerId, LearnerProfile>>,
    session: Mutex<Option<Credentials>>,
    federated_tokens: Mutex<HashMap<String, String>>,
}

impl InMemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            profiles: Mutex::new(HashMap::new()),
            session: Mutex::new(None),
            federated_tokens: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a token that [`sign_in_federated`] will accept for the
    /// given email, mimicking an external identity provider.
    ///
    /// [`sign_in_federated`]: IdentityProvider::sign_in_federated
    pub fn register_federated_token(
        &self,
        token: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<(), ProviderError> {
        let mut tokens = self
            .federated_tokens
            .lock()
            .map_err(|e| ProviderError::Connection(e.to_string()))?;
        tokens.insert(token.into(), normalize_email(&email.into()));
        Ok(())
    }

    fn fresh_learner_id() -> Result<LearnerId, ProviderError> {
        LearnerId::new(Uuid::new_v4().to_string())
            .map_err(|e| ProviderError::Serialization(e.to_string()))
    }

    fn set_session(&self, credentials: &Credentials) -> Result<(), ProviderError> {
        let mut session = self
            .session
            .lock()
            .map_err(|e| ProviderError::Connection(e.to_string()))?;
        *session = Some(credentials.clone());
        Ok(())
    }

    fn account_credentials(account: &Account) -> Credentials {
        Credentials {
            learner_id: account.learner_id.clone(),
            email: account.email.clone(),
        }
    }
}

impl Default for InMemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Credentials, ProviderError> {
        let key = normalize_email(email);
        let credentials = {
            let mut accounts = self
                .accounts
                .lock()
                .map_err(|e| ProviderError::Connection(e.to_string()))?;
            if accounts.contains_key(&key) {
                return Err(ProviderError::EmailTaken);
            }
            let account = Account {
                learner_id: Self::fresh_learner_id()?,
                email: key.clone(),
                password: password.to_string(),
            };
            let credentials = Self::account_credentials(&account);
            accounts.insert(key, account);
            credentials
        };
        self.set_session(&credentials)?;
        Ok(credentials)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Credentials, ProviderError> {
        let key = normalize_email(email);
        let credentials = {
            let accounts = self
                .accounts
                .lock()
                .map_err(|e| ProviderError::Connection(e.to_string()))?;
            let account = accounts.get(&key).ok_or(ProviderError::InvalidCredentials)?;
            if account.password != password {
                return Err(ProviderError::InvalidCredentials);
            }
            Self::account_credentials(account)
        };
        self.set_session(&credentials)?;
        Ok(credentials)
    }

    async fn sign_in_federated(&self, token: &str) -> Result<Credentials, ProviderError> {
        let email = {
            let tokens = self
                .federated_tokens
                .lock()
                .map_err(|e| ProviderError::Connection(e.to_string()))?;
            tokens
                .get(token)
                .cloned()
                .ok_or(ProviderError::InvalidCredentials)?
        };
        let credentials = {
            let mut accounts = self
                .accounts
                .lock()
                .map_err(|e| ProviderError::Connection(e.to_string()))?;
            match accounts.get(&email) {
                Some(account) => Self::account_credentials(account),
                None => {
                    // Federated identities auto-provision an account
                    // with no usable password.
                    let account = Account {
                        learner_id: Self::fresh_learner_id()?,
                        email: email.clone(),
                        password: Uuid::new_v4().to_string(),
                    };
                    let credentials = Self::account_credentials(&account);
                    accounts.insert(email, account);
                    credentials
                }
            }
        };
        self.set_session(&credentials)?;
        Ok(credentials)
    }

    fn supports_federated(&self) -> bool {
        true
    }

    async fn restore_session(&self) -> Result<Option<Credentials>, ProviderError> {
        let session = self
            .session
            .lock()
            .map_err(|e| ProviderError::Connection(e.to_string()))?;
        Ok(session.clone())
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        let mut session = self
            .session
            .lock()
            .map_err(|e| ProviderError::Connection(e.to_string()))?;
        *session = None;
        Ok(())
    }
}

#[async_trait]
impl ProgressStore for InMemoryProvider {
    async fn load_profile(
        &self,
        learner_id: &LearnerId,
    ) -> Result<Option<LearnerProfile>, ProviderError> {
        let profiles = self
            .profiles
            .lock()
            .map_err(|e| ProviderError::Connection(e.to_string()))?;
        Ok(profiles.get(learner_id).cloned())
    }

    async fn save_profile(&self, profile: &LearnerProfile) -> Result<(), ProviderError> {
        let mut profiles = self
            .profiles
            .lock()
            .map_err(|e| ProviderError::Connection(e.to_string()))?;
        profiles.insert(profile.id().clone(), profile.clone());
        Ok(())
    }

    async fn append_completed_section(
        &self,
        learner_id: &LearnerId,
        section_id: &SectionId,
        _completed_at: DateTime<Utc>,
    ) -> Result<(), ProviderError> {
        let mut profiles = self
            .profiles
            .lock()
            .map_err(|e| ProviderError::Connection(e.to_string()))?;
        let profile = profiles.get_mut(learner_id).ok_or(ProviderError::NotFound)?;
        profile.mark_complete(section_id.clone());
        Ok(())
    }

    async fn list_profiles(&self, limit: u32) -> Result<Vec<LearnerProfile>, ProviderError> {
        let profiles = self
            .profiles
            .lock()
            .map_err(|e| ProviderError::Connection(e.to_string()))?;
        let mut all: Vec<LearnerProfile> = profiles.values().cloned().collect();
        all.sort_by(|a, b| a.email().cmp(b.email()));
        all.truncate(limit as usize);
        Ok(all)
    }
}

// ─── AGGREGATE ────────────────────────────────────────────────────────────────

/// Aggregate handle passing both backend facets around as trait objects.
#[derive(Clone)]
pub struct Providers {
    pub identity: Arc<dyn IdentityProvider>,
    pub progress: Arc<dyn ProgressStore>,
}

impl Providers {
    /// Both facets backed by one [`InMemoryProvider`].
    #[must_use]
    pub fn in_memory() -> Self {
        let provider = Arc::new(InMemoryProvider::new());
        Self {
            identity: provider.clone(),
            progress: provider,
        }
    }
}
