//! Request and response bodies of the grading service.

use serde::{Deserialize, Serialize};

use crate::row::QueryResult;

/// What a run is evaluated against: an explicit table selection (authoring)
/// or the tables bound to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryContext {
    Tables(Vec<String>),
    Task(u64),
}

impl QueryContext {
    /// A table selection with nothing selected is not a usable context.
    pub fn is_present(&self) -> bool {
        match self {
            QueryContext::Tables(tables) => !tables.is_empty(),
            QueryContext::Task(_) => true,
        }
    }
}

/// Body of a run request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    pub context: QueryContext,
}

/// Body of a submit request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub query: String,
}

/// Body of a run response.
///
/// The authoring endpoint reports failures in `error`, the task endpoint in
/// `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<QueryResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RunResponse {
    pub fn ok(results: QueryResult) -> Self {
        Self {
            success: true,
            results: Some(results),
            error: None,
            message: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            results: None,
            error: Some(error.into()),
            message: None,
        }
    }

    /// Server explanation of a failure, `error` preferred over `message`.
    pub fn failure_message(&self) -> Option<&str> {
        non_blank(self.error.as_deref()).or_else(|| non_blank(self.message.as_deref()))
    }
}

/// Body of a submit response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmitResponse {
    pub fn message(&self) -> Option<&str> {
        non_blank(self.message.as_deref())
    }
}

/// Outcome of a submission the grader understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub success: bool,
    pub message: Option<String>,
}

/// Column of a table the task's query runs against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default)]
    pub constraints: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaTable {
    pub table_name: String,
    #[serde(default)]
    pub columns: Vec<SchemaColumn>,
}

/// Column the expected result must contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default)]
    pub description: String,
}

/// Task metadata, including the persisted solved flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetail {
    pub id: u64,
    pub name: String,
    pub difficulty: String,
    pub description: String,
    #[serde(default)]
    pub solved: bool,
    #[serde(default)]
    pub schema: Vec<SchemaTable>,
    #[serde(default)]
    pub result_schema: Vec<ResultColumn>,
    #[serde(default)]
    pub columns_info: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
