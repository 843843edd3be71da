use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::{LearnerId, SectionId};
use crate::model::progress::CompletionSet;

/// Access level attached to a learner's profile document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearnerRole {
    #[default]
    Learner,
    Admin,
}

impl LearnerRole {
    /// Stable string form used by the persistence backends.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LearnerRole::Learner => "learner",
            LearnerRole::Admin => "admin",
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, LearnerRole::Admin)
    }
}

impl fmt::Display for LearnerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LearnerRole {
    type Err = LearnerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "learner" => Ok(LearnerRole::Learner),
            "admin" => Ok(LearnerRole::Admin),
            other => Err(LearnerError::UnknownRole(other.to_string())),
        }
    }
}

/// A learner's profile document: identity, role, and completed sections.
///
/// This is the domain shape of the backend's per-learner document; the
/// providers crate maps its own records into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearnerProfile {
    id: LearnerId,
    email: String,
    role: LearnerRole,
    completed: CompletionSet,
    created_at: DateTime<Utc>,
}

impl LearnerProfile {
    /// Create a fresh profile, as bootstrapped on first sign-in.
    ///
    /// # Errors
    ///
    /// Returns `LearnerError::InvalidEmail` if the email lacks a non-empty
    /// local part and domain around a single `@`.
    pub fn new(
        id: LearnerId,
        email: impl Into<String>,
        role: LearnerRole,
        created_at: DateTime<Utc>,
    ) -> Result<Self, LearnerError> {
        Self::from_persisted(id, email, role, CompletionSet::new(), created_at)
    }

    /// Rebuild a profile from a persistence backend.
    ///
    /// # Errors
    ///
    /// Returns `LearnerError::InvalidEmail` for a malformed email.
    pub fn from_persisted(
        id: LearnerId,
        email: impl Into<String>,
        role: LearnerRole,
        completed: CompletionSet,
        created_at: DateTime<Utc>,
    ) -> Result<Self, LearnerError> {
        let email = validate_email(email.into())?;
        Ok(Self {
            id,
            email,
            role,
            completed,
            created_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> &LearnerId {
        &self.id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn role(&self) -> LearnerRole {
        self.role
    }

    #[must_use]
    pub fn completed(&self) -> &CompletionSet {
        &self.completed
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Record a completion locally. Returns `true` when newly added.
    ///
    /// Mirrors the idempotent append the progress store performs; the UI
    /// updates its copy of the profile with this after a successful write.
    pub fn mark_complete(&mut self, section: SectionId) -> bool {
        self.completed.mark_complete(section)
    }
}

fn validate_email(raw: String) -> Result<String, LearnerError> {
    let email = raw.trim().to_string();
    let Some((local, domain)) = email.split_once('@') else {
        return Err(LearnerError::InvalidEmail(email));
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(LearnerError::InvalidEmail(email));
    }
    Ok(email)
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LearnerError {
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("unknown role: {0}")]
    UnknownRole(String),
}

// ─── TESTS ─────────────────────────────────────────────────────────────────────
