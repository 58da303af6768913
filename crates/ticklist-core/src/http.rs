use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::Serialize;
use ticklist_shared::{ReorderRequest, TaskCreate, TaskDto, TaskId, TaskPatch, TasksEnvelope};
use tracing::{debug, trace};

use crate::api::TaskApi;
use crate::error::ApiError;

/// The shutdown request is fire-and-forget; a dying server may never answer.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

/// [`TaskApi`] over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: reqwest::Client,
    base: Url,
}

impl HttpTaskApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|source| ApiError::Transport {
                endpoint: base_url.to_string(),
                source,
            })?;
        Self::with_client(client, base_url)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ApiError::Transport {
                endpoint: base_url.to_string(),
                source,
            })?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            client,
            base: normalize_base(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base.join(path).map_err(|err| ApiError::InvalidUrl {
            url: format!("{}{path}", self.base),
            reason: err.to_string(),
        })
    }

    async fn send(&self, method: Method, path: &str, body: Option<String>) -> Result<String, ApiError> {
        self.send_within(method, path, body, None).await
    }

    #[tracing::instrument(skip(self, body), fields(base = %self.base))]
    async fn send_within(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<String, ApiError> {
        let url = self.endpoint(path)?;
        let endpoint = format!("{method} {}", url.path());

        let mut request = self.client.request(method, url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        if let Some(body) = body {
            trace!(%endpoint, body = %body, "request body");
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = request.send().await.map_err(|source| ApiError::Transport {
            endpoint: endpoint.clone(),
            source,
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|source| ApiError::Transport {
            endpoint: endpoint.clone(),
            source,
        })?;

        debug!(%endpoint, status = status.as_u16(), bytes = text.len(), "response received");

        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }

    async fn send_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        payload: &T,
    ) -> Result<String, ApiError> {
        let body = serde_json::to_string(payload).map_err(|source| ApiError::Encode {
            endpoint: path.to_string(),
            source,
        })?;
        self.send(method, path, Some(body)).await
    }
}

#[async_trait(?Send)]
impl TaskApi for HttpTaskApi {
    async fn list_tasks(&self) -> Result<Vec<TaskDto>, ApiError> {
        let text = self.send(Method::GET, "api/tasks", None).await?;
        let envelope: TasksEnvelope =
            serde_json::from_str(&text).map_err(|source| ApiError::Decode {
                endpoint: "GET /api/tasks".to_string(),
                source,
            })?;
        Ok(envelope.tasks)
    }

    async fn create_task(&self, task: &TaskCreate) -> Result<(), ApiError> {
        self.send_json(Method::POST, "api/tasks", task).await?;
        Ok(())
    }

    async fn update_task(&self, uuid: &TaskId, patch: &TaskPatch) -> Result<(), ApiError> {
        self.send_json(Method::PUT, &task_path(uuid), patch).await?;
        Ok(())
    }

    async fn delete_task(&self, uuid: &TaskId) -> Result<(), ApiError> {
        self.send(Method::DELETE, &task_path(uuid), None).await?;
        Ok(())
    }

    async fn reorder(&self, order: &[TaskId]) -> Result<(), ApiError> {
        let payload = ReorderRequest {
            order: order.to_vec(),
        };
        self.send_json(Method::POST, "api/reorder", &payload).await?;
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), ApiError> {
        self.send_within(
            Method::POST,
            "api/shutdown",
            Some("{}".to_string()),
            Some(SHUTDOWN_TIMEOUT),
        )
        .await?;
        Ok(())
    }
}

fn task_path(uuid: &TaskId) -> String {
    format!("api/tasks/{uuid}")
}

/// Parses the base URL and makes sure it ends in `/` so that relative
/// endpoint paths are joined below it.
fn normalize_base(raw: &str) -> Result<Url, ApiError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };

    Url::parse(&with_slash).map_err(|err| ApiError::InvalidUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })
}
