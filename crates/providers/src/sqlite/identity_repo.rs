use chrono::Utc;
use course_core::model::{LearnerId, LearnerRole};
use sqlx::Row;
use uuid::Uuid;

use super::SqliteProvider;
use super::mapping::{learner_id_from_text, ser};
use crate::provider::{Credentials, IdentityProvider, ProviderError, normalize_email};

fn conn(e: sqlx::Error) -> ProviderError {
    ProviderError::Connection(e.to_string())
}

impl SqliteProvider {
    async fn write_session(&self, learner_id: &LearnerId) -> Result<(), ProviderError> {
        sqlx::query(
            r"
            INSERT INTO local_sessions (slot, learner_id, signed_in_at)
            VALUES (0, ?1, ?2)
            ON CONFLICT(slot) DO UPDATE SET
                learner_id = excluded.learner_id,
                signed_in_at = excluded.signed_in_at
            ",
        )
        .bind(learner_id.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(conn)?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl IdentityProvider for SqliteProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Credentials, ProviderError> {
        let email = normalize_email(email);

        let existing = sqlx::query("SELECT 1 FROM learners WHERE email = ?1")
            .bind(&email)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;
        if existing.is_some() {
            return Err(ProviderError::EmailTaken);
        }

        let learner_id = LearnerId::new(Uuid::new_v4().to_string()).map_err(ser)?;
        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(ser)?;

        sqlx::query(
            r"
            INSERT INTO learners (id, email, password_hash, role, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(learner_id.as_str())
        .bind(&email)
        .bind(&password_hash)
        .bind(LearnerRole::Learner.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        self.write_session(&learner_id).await?;
        Ok(Credentials { learner_id, email })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Credentials, ProviderError> {
        let email = normalize_email(email);

        let row = sqlx::query("SELECT id, password_hash FROM learners WHERE email = ?1")
            .bind(&email)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;
        // A missing account and a wrong password report the same error.
        let Some(row) = row else {
            return Err(ProviderError::InvalidCredentials);
        };

        let Some(password_hash) = row
            .try_get::<Option<String>, _>("password_hash")
            .map_err(ser)?
        else {
            return Err(ProviderError::InvalidCredentials);
        };
        if !bcrypt::verify(password, &password_hash).map_err(ser)? {
            return Err(ProviderError::InvalidCredentials);
        }

        let learner_id = learner_id_from_text(&row.try_get::<String, _>("id").map_err(ser)?)?;
        self.write_session(&learner_id).await?;
        Ok(Credentials { learner_id, email })
    }

    async fn sign_in_federated(&self, _token: &str) -> Result<Credentials, ProviderError> {
        Err(ProviderError::Unsupported("federated sign-in"))
    }

    fn supports_federated(&self) -> bool {
        false
    }

    async fn restore_session(&self) -> Result<Option<Credentials>, ProviderError> {
        let row = sqlx::query(
            r"
            SELECT l.id, l.email
            FROM local_sessions s
            JOIN learners l ON l.id = s.learner_id
            WHERE s.slot = 0
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        match row {
            Some(row) => {
                let learner_id =
                    learner_id_from_text(&row.try_get::<String, _>("id").map_err(ser)?)?;
                let email: String = row.try_get("email").map_err(ser)?;
                Ok(Some(Credentials { learner_id, email }))
            }
            None => Ok(None),
        }
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        sqlx::query("DELETE FROM local_sessions WHERE slot = 0")
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(())
    }
}
