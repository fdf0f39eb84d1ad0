//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Base document carrying the service metadata
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Clinician Assistant API",
        version = "0.1.0",
        description = "Orchestration backend over a vector store, an embedding provider, and a generative-language provider",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    tags(
        (name = "patients", description = "Patient record ingestion and similarity search"),
        (name = "assistant", description = "Summaries and conversational answers")
    )
)]
struct BaseDoc;

/// Combined OpenAPI documentation for all endpoints.
///
/// The domain docs already carry the public (absolute) paths, so they are
/// merged rather than nested under a prefix.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = BaseDoc::openapi();
        doc.merge(domain_patients::PatientsApiDoc::openapi());
        doc.merge(domain_assistant::AssistantApiDoc::openapi());
        doc
    }
}
