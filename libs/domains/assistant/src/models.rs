use domain_patients::PatientMatch;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Clinician metadata looked up by identifier; read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClinicianProfile {
    pub clinician_id: Uuid,
    pub specialization: String,
    pub preferences: ProfilePreferences,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProfilePreferences {
    pub language: String,
    pub treatment_approach: String,
}

impl ClinicianProfile {
    /// Generic stand-in used when an identifier has no known profile.
    /// Unknown clinicians are not an error; the pipeline proceeds with
    /// this placeholder.
    pub fn placeholder(clinician_id: Uuid) -> Self {
        Self {
            clinician_id,
            specialization: "general practice".to_string(),
            preferences: ProfilePreferences {
                language: "en".to_string(),
                treatment_approach: "standard".to_string(),
            },
        }
    }
}

/// Composed answer for the full conversational endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssistantAnswer {
    pub query: String,
    pub answer: String,
    pub matches: Vec<PatientMatch>,
    pub profile: ClinicianProfile,
}

/// Reduced reply shape kept for the original chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatReply {
    pub response: String,
    pub context: ClinicianProfile,
}

impl From<AssistantAnswer> for ChatReply {
    fn from(answer: AssistantAnswer) -> Self {
        Self {
            response: answer.answer,
            context: answer.profile,
        }
    }
}

/// Acknowledgment for an enqueued follow-up task.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduledTask {
    pub message: String,
    pub task_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_profile_keeps_requested_id() {
        let id = Uuid::new_v4();
        let profile = ClinicianProfile::placeholder(id);
        assert_eq!(profile.clinician_id, id);
        assert_eq!(profile.specialization, "general practice");
        assert_eq!(profile.preferences.language, "en");
    }

    #[test]
    fn test_chat_reply_keeps_answer_and_profile() {
        let profile = ClinicianProfile::placeholder(Uuid::new_v4());
        let answer = AssistantAnswer {
            query: "q".to_string(),
            answer: "a".to_string(),
            matches: vec![],
            profile: profile.clone(),
        };

        let reply: ChatReply = answer.into();
        assert_eq!(reply.response, "a");
        assert_eq!(reply.context, profile);
    }
}
