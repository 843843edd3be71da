use chrono::{DateTime, Utc};
use course_core::model::{CompletionSet, LearnerId, LearnerProfile, SectionId};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::{HostedProvider, status_error, transport};
use crate::provider::{ProgressStore, ProviderError};

fn ser<E: core::fmt::Display>(e: E) -> ProviderError {
    ProviderError::Serialization(e.to_string())
}

/// Wire shape of one profile document.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileDoc {
    id: String,
    email: String,
    role: String,
    completed_sections: Vec<String>,
    created_at: DateTime<Utc>,
}

impl ProfileDoc {
    fn from_profile(profile: &LearnerProfile) -> Self {
        Self {
            id: profile.id().as_str().to_string(),
            email: profile.email().to_string(),
            role: profile.role().as_str().to_string(),
            completed_sections: profile
                .completed()
                .iter()
                .map(|section| section.as_str().to_string())
                .collect(),
            created_at: profile.created_at(),
        }
    }

    fn into_profile(self) -> Result<LearnerProfile, ProviderError> {
        let id = LearnerId::new(self.id).map_err(ser)?;
        let role = self.role.parse().map_err(ser)?;
        let mut completed = CompletionSet::new();
        for raw in self.completed_sections {
            completed.mark_complete(SectionId::new(raw).map_err(ser)?);
        }
        LearnerProfile::from_persisted(id, self.email, role, completed, self.created_at)
            .map_err(ser)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AppendSectionRequest<'a> {
    section_id: &'a str,
    completed_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ProfileListResponse {
    profiles: Vec<ProfileDoc>,
}

impl HostedProvider {
    fn profiles_endpoint(&self, suffix: &str) -> String {
        format!(
            "{}/profiles{suffix}",
            self.config().profiles_url.trim_end_matches('/')
        )
    }
}

#[async_trait::async_trait]
impl ProgressStore for HostedProvider {
    async fn load_profile(
        &self,
        learner_id: &LearnerId,
    ) -> Result<Option<LearnerProfile>, ProviderError> {
        let response = self
            .client()
            .get(self.profiles_endpoint(&format!("/{}", learner_id.as_str())))
            .bearer_auth(self.bearer_token()?)
            .send()
            .await
            .map_err(transport)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }
        let doc: ProfileDoc = response.json().await.map_err(ser)?;
        doc.into_profile().map(Some)
    }

    async fn save_profile(&self, profile: &LearnerProfile) -> Result<(), ProviderError> {
        let response = self
            .client()
            .put(self.profiles_endpoint(&format!("/{}", profile.id().as_str())))
            .bearer_auth(self.bearer_token()?)
            .json(&ProfileDoc::from_profile(profile))
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }
        Ok(())
    }

    async fn append_completed_section(
        &self,
        learner_id: &LearnerId,
        section_id: &SectionId,
        completed_at: DateTime<Utc>,
    ) -> Result<(), ProviderError> {
        // The endpoint has union semantics server-side, so re-sending an
        // already-recorded section succeeds without duplicating it.
        let response = self
            .client()
            .post(self.profiles_endpoint(&format!(
                "/{}/completed-sections",
                learner_id.as_str()
            )))
            .bearer_auth(self.bearer_token()?)
            .json(&AppendSectionRequest {
                section_id: section_id.as_str(),
                completed_at,
            })
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }
        Ok(())
    }

    async fn list_profiles(&self, limit: u32) -> Result<Vec<LearnerProfile>, ProviderError> {
        let response = self
            .client()
            .get(self.profiles_endpoint(&format!("?limit={limit}")))
            .bearer_auth(self.bearer_token()?)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }
        let body: ProfileListResponse = response.json().await.map_err(ser)?;
        body.profiles
            .into_iter()
            .map(ProfileDoc::into_profile)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::model::LearnerRole;
    use course_core::time::fixed_now;

    #[test]
    fn profile_doc_roundtrips_through_the_wire_shape() {
        let mut profile = LearnerProfile::new(
            LearnerId::new("uid-1").unwrap(),
            "ada@example.com",
            LearnerRole::Admin,
            fixed_now(),
        )
        .unwrap();
        profile.mark_complete(SectionId::new("intro-to-genai").unwrap());

        let doc = ProfileDoc::from_profile(&profile);
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"completedSections\""));
        assert!(json.contains("\"role\":\"admin\""));

        let parsed: ProfileDoc = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.into_profile().unwrap(), profile);
    }

    #[test]
    fn malformed_role_is_a_serialization_error() {
        let json = r#"{
            "id": "uid-1",
            "email": "ada@example.com",
            "role": "superuser",
            "completedSections": [],
            "createdAt": "2023-11-14T22:13:20Z"
        }"#;
        let doc: ProfileDoc = serde_json::from_str(json).unwrap();
        assert!(matches!(
            doc.into_profile(),
            Err(ProviderError::Serialization(_))
        ));
    }
}
