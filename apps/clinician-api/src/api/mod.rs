//! API routes module
//!
//! Wires the domain routers and the app-level endpoints together. The
//! endpoint paths are the public contract, so everything mounts at the
//! root.

pub mod health;
pub mod root;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(domain_patients::handlers::router(state.patients.clone()))
        .merge(domain_assistant::handlers::router(state.assistant.clone()))
        .merge(root::router())
        .merge(health::router(state.clone()))
}
