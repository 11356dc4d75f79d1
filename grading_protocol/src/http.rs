//! Transport-neutral HTTP request/response descriptions.
//!
//! The host owns the actual HTTP stack; this crate only describes what to
//! send and interprets what came back.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// Protocol error
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("malformed response body: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request for the host to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post_json<T: Serialize>(path: impl Into<String>, body: &T) -> Result<Self, ProtocolError> {
        let body = serde_json::to_string(body).map_err(ProtocolError::Encode)?;
        Ok(Self {
            method: HttpMethod::Post,
            path: path.into(),
            headers: vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())],
            body: Some(body),
        })
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_bearer(self, token: &str) -> Self {
        self.with_header(AUTHORIZATION, format!("Bearer {}", token))
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// What the host got back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok_json<T: Serialize>(body: &T) -> Result<Self, ProtocolError> {
        let body = serde_json::to_string(body).map_err(ProtocolError::Encode)?;
        Ok(Self::new(200, body))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ProtocolError> {
        serde_json::from_str(&self.body).map_err(ProtocolError::Decode)
    }

    /// Human-readable explanation from an error body, if the server sent one.
    /// Looks at `error`, then `detail`, then `message`.
    pub fn server_detail(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(&self.body).ok()?;
        ["error", "detail", "message"]
            .iter()
            .filter_map(|field| value.get(field).and_then(|v| v.as_str()))
            .find(|text| !text.trim().is_empty())
            .map(str::to_string)
    }
}

/// Endpoint path templates; `{task_id}` is substituted per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub task: String,
    pub task_run: String,
    pub task_submit: String,
    pub authoring_run: String,
}

impl Endpoints {
    pub fn task_path(&self, task_id: u64) -> String {
        resolve(&self.task, task_id)
    }

    pub fn task_run_path(&self, task_id: u64) -> String {
        resolve(&self.task_run, task_id)
    }

    pub fn task_submit_path(&self, task_id: u64) -> String {
        resolve(&self.task_submit, task_id)
    }

    pub fn authoring_run_path(&self) -> &str {
        &self.authoring_run
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            task: "/api/tasks/{task_id}".to_string(),
            task_run: "/api/tasks/{task_id}/run".to_string(),
            task_submit: "/api/tasks/{task_id}/submit".to_string(),
            authoring_run: "/api/admin/run-query".to_string(),
        }
    }
}

fn resolve(template: &str, task_id: u64) -> String {
    template.replace("{task_id}", &task_id.to_string())
}
