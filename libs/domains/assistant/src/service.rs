use std::sync::Arc;

use uuid::Uuid;

use domain_patients::{PatientMatch, PatientService, VectorRepository};

use crate::error::{AssistantError, AssistantResult};
use crate::generation::GenerativeProvider;
use crate::models::{AssistantAnswer, ChatReply, ClinicianProfile, ScheduledTask};
use crate::profiles::ProfileDirectory;
use crate::queue::TaskQueue;

/// Returned when the generative provider answers with no usable text.
pub const FALLBACK_SUMMARY: &str = "No summary available.";

/// Service layer for narrative generation and conversational orchestration.
///
/// The chat pipeline runs strictly sequentially: profile lookup, query
/// embedding + similarity search (delegated to the patients service),
/// one generation call, response composition. Any step's failure
/// surfaces unchanged; there are no partial results and no retries.
pub struct AssistantService<R: VectorRepository> {
    patients: Arc<PatientService<R>>,
    generator: Arc<dyn GenerativeProvider>,
    profiles: Arc<dyn ProfileDirectory>,
    queue: Option<Arc<dyn TaskQueue>>,
}

impl<R: VectorRepository> AssistantService<R> {
    pub fn new(
        patients: Arc<PatientService<R>>,
        generator: Arc<dyn GenerativeProvider>,
        profiles: Arc<dyn ProfileDirectory>,
    ) -> Self {
        Self {
            patients,
            generator,
            profiles,
            queue: None,
        }
    }

    pub fn with_task_queue(mut self, queue: Arc<dyn TaskQueue>) -> Self {
        self.queue = Some(queue);
        self
    }

    /// Generate a summary of arbitrary data with the fixed prompt template.
    ///
    /// An empty generation result is not an error; the fallback string is
    /// returned instead.
    pub async fn summarize(&self, data: Option<serde_json::Value>) -> AssistantResult<String> {
        let data = data.ok_or_else(|| AssistantError::Validation("Missing data".to_string()))?;

        let prompt = format!("Summarize the following text: {}", render_data(&data));

        let text = self.generator.generate(&prompt).await?;

        Ok(text.unwrap_or_else(|| FALLBACK_SUMMARY.to_string()))
    }

    /// The conversational pipeline: profile, search, prompt, generate.
    ///
    /// Unknown clinician ids get a placeholder profile rather than an
    /// error. The optional score threshold is forwarded to the store
    /// untouched.
    pub async fn answer(
        &self,
        clinician_id: Option<Uuid>,
        query: Option<String>,
        score_threshold: Option<f32>,
    ) -> AssistantResult<AssistantAnswer> {
        let (clinician_id, query) = match (clinician_id, query) {
            (Some(id), Some(query)) if !query.trim().is_empty() => (id, query),
            _ => {
                return Err(AssistantError::Validation(
                    "Missing required fields".to_string(),
                ))
            }
        };

        let profile = self
            .profiles
            .lookup(clinician_id)
            .await?
            .unwrap_or_else(|| ClinicianProfile::placeholder(clinician_id));

        let matches = self
            .patients
            .search_similar(Some(query.clone()), score_threshold)
            .await?;

        let prompt = build_answer_prompt(&profile, &query, &matches)?;

        let answer = self
            .generator
            .generate(&prompt)
            .await?
            .unwrap_or_else(|| FALLBACK_SUMMARY.to_string());

        Ok(AssistantAnswer {
            query,
            answer,
            matches,
            profile,
        })
    }

    /// Same pipeline as [`answer`](Self::answer), reshaped to the
    /// original chat reply.
    pub async fn chat(
        &self,
        clinician_id: Option<Uuid>,
        query: Option<String>,
    ) -> AssistantResult<ChatReply> {
        Ok(self.answer(clinician_id, query, None).await?.into())
    }

    /// Enqueue one follow-up task against the configured queue.
    pub async fn schedule_follow_up(&self) -> AssistantResult<ScheduledTask> {
        let queue = self
            .queue
            .as_ref()
            .ok_or_else(|| AssistantError::Config("No task queue configured".to_string()))?;

        let task_name = queue.enqueue().await?;

        Ok(ScheduledTask {
            message: "Task scheduled successfully".to_string(),
            task_name,
        })
    }
}

fn render_data(data: &serde_json::Value) -> String {
    match data {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn build_answer_prompt(
    profile: &ClinicianProfile,
    query: &str,
    matches: &[PatientMatch],
) -> AssistantResult<String> {
    let profile_json = serde_json::to_string(profile)?;
    let matches_json = serde_json::to_string(matches)?;

    Ok(format!(
        "You are assisting a clinician.\n\
         Clinician profile: {profile_json}\n\
         Question: {query}\n\
         Related patient records: {matches_json}\n\
         Answer the question for this clinician using the related records."
    ))
}
