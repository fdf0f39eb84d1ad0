//! Welcome endpoint

use axum::{routing::get, Router};

pub fn router() -> Router {
    Router::new().route("/", get(home))
}

async fn home() -> &'static str {
    "Welcome to Clinician AI assistant!"
}
