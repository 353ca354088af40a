use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{
    Artifact, ArtifactsFile, FailureReason, JobStatus, PipelineStatus, RunnerStatus, RunnerType,
    UserState, WireArtifact, WireArtifactsFile,
};

// Wire shapes, as returned by `/projects/:id/jobs` and friends.

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireJobCommit {
    pub author_email: String,
    pub author_name: String,
    pub created_at: String,
    pub id: String,
    pub message: String,
    pub short_id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireJobPipeline {
    pub id: u64,
    pub project_id: u64,
    #[serde(rename = "ref")]
    pub ref_: String,
    pub sha: String,
    pub status: PipelineStatus,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireJobRunner {
    pub id: u64,
    pub description: String,
    #[serde(default)]
    pub ip_address: Option<String>,
    pub active: bool,
    pub paused: bool,
    pub is_shared: bool,
    pub runner_type: RunnerType,
    pub name: Option<String>,
    pub online: bool,
    pub status: RunnerStatus,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireJobRunnerManager {
    pub id: u64,
    pub system_id: String,
    pub version: String,
    pub revision: String,
    pub platform: String,
    pub architecture: String,
    pub created_at: String,
    pub contacted_at: String,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub status: Option<RunnerStatus>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireJobUser {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub state: UserState,
    pub avatar_url: Option<String>,
    pub web_url: String,
    pub created_at: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub public_email: Option<String>,
    #[serde(default)]
    pub skype: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub twitter: String,
    #[serde(default)]
    pub website_url: String,
    #[serde(default)]
    pub organization: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireJobProject {
    pub ci_job_token_scope_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireJob {
    pub commit: WireJobCommit,
    /// Schema not published by the API; kept opaque.
    pub coverage: Option<Value>,
    #[serde(default)]
    pub archived: bool,
    pub allow_failure: bool,
    pub created_at: String,
    /// `null` until the job starts.
    pub started_at: Option<String>,
    /// `null` while the job is pending or running.
    pub finished_at: Option<String>,
    pub erased_at: Option<String>,
    pub duration: Option<f64>,
    pub queued_duration: Option<f64>,
    /// Omitted for jobs that produced no artifacts.
    #[serde(default)]
    pub artifacts_file: Option<WireArtifactsFile>,
    #[serde(default)]
    pub artifacts: Vec<WireArtifact>,
    #[serde(default)]
    pub artifacts_expire_at: Option<String>,
    pub tag_list: Vec<String>,
    pub id: u64,
    pub name: String,
    pub pipeline: WireJobPipeline,
    #[serde(rename = "ref")]
    pub ref_: String,
    pub runner: Option<WireJobRunner>,
    pub runner_manager: Option<WireJobRunnerManager>,
    pub stage: String,
    pub status: JobStatus,
    #[serde(default)]
    pub failure_reason: Option<FailureReason>,
    pub tag: bool,
    pub web_url: String,
    pub project: WireJobProject,
    pub user: WireJobUser,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireDownstreamPipeline {
    pub id: u64,
    pub sha: String,
    #[serde(rename = "ref")]
    pub ref_: String,
    pub status: PipelineStatus,
    pub created_at: String,
    pub updated_at: String,
    pub web_url: String,
}

/// A bridge job: every job field plus the pipeline it triggered.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireTriggerJob {
    #[serde(flatten)]
    pub job: WireJob,
    pub downstream_pipeline: WireDownstreamPipeline,
}

// Domain shapes handed to callers.

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCommit {
    pub author_email: String,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    pub id: String,
    pub message: String,
    pub short_id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPipeline {
    pub id: u64,
    pub project_id: u64,
    #[serde(rename = "ref")]
    pub ref_: String,
    pub sha: String,
    pub status: PipelineStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRunner {
    pub id: u64,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    pub active: bool,
    pub paused: bool,
    pub is_shared: bool,
    pub runner_type: RunnerType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub online: bool,
    pub status: RunnerStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRunnerManager {
    pub id: u64,
    pub system_id: String,
    pub version: String,
    pub revision: String,
    pub platform: String,
    pub architecture: String,
    pub created_at: DateTime<Utc>,
    pub contacted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RunnerStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobUser {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub state: UserState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub web_url: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_email: Option<String>,
    pub skype: String,
    pub linkedin: String,
    pub twitter: String,
    pub website_url: String,
    pub organization: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobProject {
    pub ci_job_token_scope_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub commit: JobCommit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<Value>,
    pub allow_failure: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub erased_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queued_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts_file: Option<ArtifactsFile>,
    pub artifacts: Vec<Artifact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts_expire_at: Option<DateTime<Utc>>,
    pub tag_list: Vec<String>,
    pub id: u64,
    pub name: String,
    pub pipeline: JobPipeline,
    #[serde(rename = "ref")]
    pub ref_: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runner: Option<JobRunner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runner_manager: Option<JobRunnerManager>,
    pub stage: String,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<FailureReason>,
    pub tag: bool,
    pub web_url: String,
    pub project: JobProject,
    pub user: JobUser,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownstreamPipeline {
    pub id: u64,
    pub sha: String,
    #[serde(rename = "ref")]
    pub ref_: String,
    pub status: PipelineStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub web_url: String,
}

/// Serialises as a flat object: all job fields plus `downstreamPipeline`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerJob {
    #[serde(flatten)]
    pub job: Job,
    pub downstream_pipeline: DownstreamPipeline,
}

impl std::ops::Deref for TriggerJob {
    type Target = Job;

    fn deref(&self) -> &Job {
        &self.job
    }
}
