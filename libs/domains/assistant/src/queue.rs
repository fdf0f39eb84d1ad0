//! Follow-up task scheduling.
//!
//! Thin client for an external task-queue service. The queue owns
//! execution; this side only enqueues and reports the task name.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AssistantError, AssistantResult};

/// Trait for follow-up task queues
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskQueue: Send + Sync {
    /// Enqueue one follow-up task and return its name.
    async fn enqueue(&self) -> AssistantResult<String>;
}

/// Task queue backed by a plain HTTP endpoint.
pub struct HttpTaskQueue {
    client: Client,
    url: String,
}

impl HttpTaskQueue {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }
}

#[derive(Debug, Serialize)]
struct EnqueueRequest {
    task_name: String,
    http_method: &'static str,
}

#[async_trait]
impl TaskQueue for HttpTaskQueue {
    async fn enqueue(&self) -> AssistantResult<String> {
        let task_name = format!("task-{}", Uuid::new_v4());

        let response = self
            .client
            .post(&self.url)
            .json(&EnqueueRequest {
                task_name: task_name.clone(),
                http_method: "POST",
            })
            .send()
            .await
            .map_err(|e| AssistantError::Queue(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AssistantError::Queue(format!(
                "Task queue error ({}): {}",
                status, error_text
            )));
        }

        Ok(task_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_enqueue_returns_task_name() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let queue = HttpTaskQueue::new(server.url());
        let task_name = queue.enqueue().await.unwrap();

        assert!(task_name.starts_with("task-"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_enqueue_surfaces_queue_error() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/")
            .with_status(503)
            .with_body("queue full")
            .create_async()
            .await;

        let queue = HttpTaskQueue::new(server.url());
        let err = queue.enqueue().await.unwrap_err();

        assert!(matches!(err, AssistantError::Queue(_)));
        assert!(err.to_string().contains("queue full"));
    }
}
