use std::collections::HashMap;

use chrono::{DateTime, Utc};
use course_core::model::{CompletionSet, LearnerId, LearnerProfile, SectionId};
use sqlx::Row;

use super::SqliteProvider;
use super::mapping::{map_learner_row, profile_from_parts, section_id_from_text, ser};
use crate::provider::{ProgressStore, ProviderError};

fn conn(e: sqlx::Error) -> ProviderError {
    ProviderError::Connection(e.to_string())
}

impl SqliteProvider {
    async fn completed_for(&self, learner_id: &LearnerId) -> Result<CompletionSet, ProviderError> {
        let rows = sqlx::query(
            "SELECT section_id FROM completed_sections WHERE learner_id = ?1 ORDER BY section_id",
        )
        .bind(learner_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut completed = CompletionSet::new();
        for row in rows {
            let raw: String = row.try_get("section_id").map_err(ser)?;
            completed.mark_complete(section_id_from_text(&raw)?);
        }
        Ok(completed)
    }
}

#[async_trait::async_trait]
impl ProgressStore for SqliteProvider {
    async fn load_profile(
        &self,
        learner_id: &LearnerId,
    ) -> Result<Option<LearnerProfile>, ProviderError> {
        let row = sqlx::query("SELECT id, email, role, created_at FROM learners WHERE id = ?1")
            .bind(learner_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;
        let Some(row) = row else {
            return Ok(None);
        };

        let parts = map_learner_row(&row)?;
        let completed = self.completed_for(learner_id).await?;
        profile_from_parts(parts, completed).map(Some)
    }

    async fn save_profile(&self, profile: &LearnerProfile) -> Result<(), ProviderError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;

        // created_at and password_hash are set at account creation and
        // survive later profile writes.
        sqlx::query(
            r"
            INSERT INTO learners (id, email, password_hash, role, created_at)
            VALUES (?1, ?2, NULL, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                email = excluded.email,
                role = excluded.role
            ",
        )
        .bind(profile.id().as_str())
        .bind(profile.email())
        .bind(profile.role().as_str())
        .bind(profile.created_at())
        .execute(&mut *tx)
        .await
        .map_err(conn)?;

        for section in profile.completed().iter() {
            sqlx::query(
                r"
                INSERT INTO completed_sections (learner_id, section_id, completed_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(learner_id, section_id) DO NOTHING
                ",
            )
            .bind(profile.id().as_str())
            .bind(section.as_str())
            .bind(Utc::now())
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
        }

        tx.commit().await.map_err(conn)
    }

    async fn append_completed_section(
        &self,
        learner_id: &LearnerId,
        section_id: &SectionId,
        completed_at: DateTime<Utc>,
    ) -> Result<(), ProviderError> {
        let exists = sqlx::query("SELECT 1 FROM learners WHERE id = ?1")
            .bind(learner_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;
        if exists.is_none() {
            return Err(ProviderError::NotFound);
        }

        // Re-appending an already-recorded section keeps its original
        // completed_at stamp.
        sqlx::query(
            r"
            INSERT INTO completed_sections (learner_id, section_id, completed_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(learner_id, section_id) DO NOTHING
            ",
        )
        .bind(learner_id.as_str())
        .bind(section_id.as_str())
        .bind(completed_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;
        Ok(())
    }

    async fn list_profiles(&self, limit: u32) -> Result<Vec<LearnerProfile>, ProviderError> {
        let learner_rows = sqlx::query(
            r"
            SELECT id, email, role, created_at FROM learners
            ORDER BY email ASC
            LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let section_rows = sqlx::query("SELECT learner_id, section_id FROM completed_sections")
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;

        let mut by_learner: HashMap<String, CompletionSet> = HashMap::new();
        for row in section_rows {
            let learner: String = row.try_get("learner_id").map_err(ser)?;
            let section: String = row.try_get("section_id").map_err(ser)?;
            by_learner
                .entry(learner)
                .or_default()
                .mark_complete(section_id_from_text(&section)?);
        }

        let mut profiles = Vec::with_capacity(learner_rows.len());
        for row in learner_rows {
            let parts = map_learner_row(&row)?;
            let completed = by_learner
                .remove(parts.id.as_str())
                .unwrap_or_default();
            profiles.push(profile_from_parts(parts, completed)?);
        }
        Ok(profiles)
    }
}
