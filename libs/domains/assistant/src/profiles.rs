//! Clinician profile lookup.
//!
//! Profiles are read-only metadata about the requester. They come from a
//! static in-memory table or an external HTTP source; unknown ids are
//! handled by the service layer with a placeholder, never an error.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use uuid::Uuid;

use crate::error::{AssistantError, AssistantResult};
use crate::models::ClinicianProfile;

/// Trait for clinician profile sources
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    /// Look up a profile by clinician id. `Ok(None)` means unknown.
    async fn lookup(&self, clinician_id: Uuid) -> AssistantResult<Option<ClinicianProfile>>;
}

/// Static in-memory profile table.
#[derive(Debug, Clone, Default)]
pub struct StaticProfileDirectory {
    profiles: HashMap<Uuid, ClinicianProfile>,
}

impl StaticProfileDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, profile: ClinicianProfile) -> Self {
        self.profiles.insert(profile.clinician_id, profile);
        self
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[async_trait]
impl ProfileDirectory for StaticProfileDirectory {
    async fn lookup(&self, clinician_id: Uuid) -> AssistantResult<Option<ClinicianProfile>> {
        Ok(self.profiles.get(&clinician_id).cloned())
    }
}

/// Profile source backed by an external HTTP service
/// (`GET {base_url}/clinicians/{id}`).
pub struct HttpProfileDirectory {
    client: Client,
    base_url: String,
}

impl HttpProfileDirectory {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl ProfileDirectory for HttpProfileDirectory {
    async fn lookup(&self, clinician_id: Uuid) -> AssistantResult<Option<ClinicianProfile>> {
        let response = self
            .client
            .get(format!("{}/clinicians/{}", self.base_url, clinician_id))
            .send()
            .await
            .map_err(|e| AssistantError::Profile(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AssistantError::Profile(format!(
                "Profile service error ({}): {}",
                status, error_text
            )));
        }

        let profile = response
            .json::<ClinicianProfile>()
            .await
            .map_err(|e| AssistantError::Profile(e.to_string()))?;

        Ok(Some(profile))
    }
}
