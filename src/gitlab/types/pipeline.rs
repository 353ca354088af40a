use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{PipelineSource, PipelineStatus, UserState};

/// Pipeline summary as returned by `/projects/:id/pipelines`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireProjectPipeline {
    pub id: u64,
    pub iid: u64,
    pub project_id: u64,
    pub sha: String,
    #[serde(rename = "ref")]
    pub ref_: String,
    pub status: PipelineStatus,
    pub source: PipelineSource,
    pub created_at: String,
    pub updated_at: String,
    pub web_url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WirePipelineUser {
    pub id: u64,
    pub username: String,
    pub name: String,
    pub state: UserState,
    pub avatar_url: Option<String>,
    pub web_url: String,
}

/// The label fields are opaque until the API documents their schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireDetailedStatus {
    pub icon: Value,
    pub text: Value,
    pub label: Value,
    pub group: Value,
    pub tooltip: Value,
    pub has_details: bool,
    #[serde(default)]
    pub details_path: Option<String>,
    #[serde(default)]
    pub illustration: Option<Value>,
    #[serde(default)]
    pub favicon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WirePipeline {
    pub id: u64,
    pub iid: u64,
    pub project_id: u64,
    pub name: Option<String>,
    pub sha: String,
    #[serde(rename = "ref")]
    pub ref_: String,
    pub status: PipelineStatus,
    pub source: PipelineSource,
    pub created_at: String,
    pub updated_at: String,
    pub web_url: String,
    pub before_sha: Option<String>,
    pub tag: bool,
    pub yaml_errors: Option<Value>,
    pub user: WirePipelineUser,
    pub started_at: Option<String>,
    pub finished_at: Option<String>,
    pub committed_at: Option<String>,
    pub duration: Option<f64>,
    pub queued_duration: Option<f64>,
    pub coverage: Option<Value>,
    pub detailed_status: WireDetailedStatus,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WirePipelineVariable {
    pub key: String,
    #[serde(default)]
    pub variable_type: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPipeline {
    pub id: u64,
    pub iid: u64,
    pub project_id: u64,
    pub sha: String,
    #[serde(rename = "ref")]
    pub ref_: String,
    pub status: PipelineStatus,
    pub source: PipelineSource,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub web_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineUser {
    pub id: u64,
    pub username: String,
    pub name: String,
    pub state: UserState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub web_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedStatus {
    pub icon: Value,
    pub text: Value,
    pub label: Value,
    pub group: Value,
    pub tooltip: Value,
    pub has_details: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    pub id: u64,
    pub iid: u64,
    pub project_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub sha: String,
    #[serde(rename = "ref")]
    pub ref_: String,
    pub status: PipelineStatus,
    pub source: PipelineSource,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub web_url: String,
    /// Absent for the first pipeline on a ref.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_sha: Option<String>,
    pub tag: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaml_errors: Option<Value>,
    pub user: PipelineUser,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queued_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<Value>,
    pub detailed_status: DetailedStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineVariable {
    pub key: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_type: Option<String>,
}
