#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth_service;
pub mod course_service;
pub mod error;
pub mod progress_service;
pub mod quiz;
pub mod roster_service;

pub use course_core::Clock;

pub use app_services::AppServices;
pub use auth_service::{AuthService, MIN_PASSWORD_LEN};
pub use course_service::CourseService;
pub use error::{AppServicesError, AuthError, ProgressError, QuizError, RosterError};
pub use progress_service::ProgressService;
pub use quiz::{QuizAdvance, QuizPhase, QuizRun, ShuffledOption};
pub use roster_service::RosterService;
