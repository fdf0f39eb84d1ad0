//! Clinician Assistant Domain Library
//!
//! Narrative generation and conversational orchestration on top of the
//! patients domain: summaries via the generative-language provider,
//! clinician profile lookup, and the chat pipeline that stitches
//! profile + similarity search + generation into one answer.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┐
//! │ AssistantService  │  ← summarize / answer / chat / schedule
//! └───┬─────┬─────┬───┘
//!     │     │     │
//!     │     │     └──────────────────┐
//! ┌───▼───────────┐ ┌───────────────▼──┐ ┌──────────────┐
//! │ PatientService │ │GenerativeProvider│ │ProfileDirectory│
//! │ (patients crate)│ │    (trait)      │ │    (trait)    │
//! └────────────────┘ └───────┬─────────┘ └──────┬────────┘
//!                            │                  │
//!                    ┌───────▼───────┐  ┌───────▼─────────┐
//!                    │ GeminiProvider │  │ Static / Http   │
//!                    └────────────────┘  │ directories     │
//!                                        └─────────────────┘
//! ```

pub mod error;
pub mod generation;
pub mod handlers;
pub mod models;
pub mod profiles;
pub mod queue;
pub mod service;

// Re-export commonly used types
pub use error::{AssistantError, AssistantResult};
pub use generation::{GeminiConfig, GeminiProvider, GenerativeProvider};
pub use handlers::AssistantApiDoc;
pub use models::{AssistantAnswer, ChatReply, ClinicianProfile, ProfilePreferences, ScheduledTask};
pub use profiles::{HttpProfileDirectory, ProfileDirectory, StaticProfileDirectory};
pub use queue::{HttpTaskQueue, TaskQueue};
pub use service::{AssistantService, FALLBACK_SUMMARY};
