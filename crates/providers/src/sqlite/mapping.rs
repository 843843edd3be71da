use chrono::{DateTime, Utc};
use course_core::model::{CompletionSet, LearnerId, LearnerProfile, LearnerRole, SectionId};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::provider::ProviderError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> ProviderError {
    ProviderError::Serialization(e.to_string())
}

pub(crate) fn learner_id_from_text(raw: &str) -> Result<LearnerId, ProviderError> {
    LearnerId::new(raw).map_err(ser)
}

pub(crate) fn section_id_from_text(raw: &str) -> Result<SectionId, ProviderError> {
    SectionId::new(raw).map_err(ser)
}

pub(crate) fn parse_role(raw: &str) -> Result<LearnerRole, ProviderError> {
    raw.parse()
        .map_err(|_| ProviderError::Serialization(format!("invalid role: {raw}")))
}

/// Columns of one `learners` row, before the completed set is attached.
pub(crate) struct LearnerRow {
    pub id: LearnerId,
    pub email: String,
    pub role: LearnerRole,
    pub created_at: DateTime<Utc>,
}

pub(crate) fn map_learner_row(row: &SqliteRow) -> Result<LearnerRow, ProviderError> {
    let id: String = row.try_get("id").map_err(ser)?;
    let role: String = row.try_get("role").map_err(ser)?;
    Ok(LearnerRow {
        id: learner_id_from_text(&id)?,
        email: row.try_get("email").map_err(ser)?,
        role: parse_role(&role)?,
        created_at: row.try_get("created_at").map_err(ser)?,
    })
}

pub(crate) fn profile_from_parts(
    row: LearnerRow,
    completed: CompletionSet,
) -> Result<LearnerProfile, ProviderError> {
    LearnerProfile::from_persisted(row.id, row.email, row.role, completed, row.created_at)
        .map_err(ser)
}
