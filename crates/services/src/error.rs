//! Shared error types for the services crate.

use thiserror::Error;

use course_core::catalog::CatalogError;
use course_core::model::LearnerError;
use providers::ProviderError;
use providers::rest::HostedInitError;
use providers::sqlite::SqliteInitError;

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("an account with this email already exists")]
    EmailTaken,
    #[error("password must be at least 6 characters")]
    WeakPassword,
    #[error("this backend does not support single sign-on")]
    FederatedUnsupported,
    #[error(transparent)]
    Learner(#[from] LearnerError),
    #[error(transparent)]
    Provider(ProviderError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Errors emitted by `RosterService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RosterError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Errors emitted by the quiz run state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("section has no quiz questions")]
    NoQuestions,
    #[error("answer already revealed for this question")]
    AlreadyRevealed,
    #[error("no answer revealed yet")]
    NotRevealed,
    #[error("option index {index} out of range for {count} options")]
    OptionOutOfRange { index: usize, count: usize },
    #[error("quiz already passed")]
    Finished,
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Hosted(#[from] HostedInitError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
