use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Declares a vocabulary that is both a JSON value and a query parameter
/// value, keeping the wire spelling in one place.
///
/// A trailing `#[unknown] Variant,` adds a catch-all that absorbs values the
/// platform introduces later. It is never produced by `FromStr` and is not
/// listed in `ALL`.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $wire:literal,)+
            #[unknown]
            $unknown:ident,
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
            /// Sent by a newer GitLab than this crate knows about.
            #[serde(other, rename = "unknown")]
            $unknown,
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::$unknown => "unknown",
                }
            }
        }

        wire_enum!(@text $name);
    };
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $wire:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        wire_enum!(@text $name);
    };
    (@text $name:ident) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str() == value)
                    .ok_or_else(|| {
                        let expected: Vec<_> = Self::ALL.iter().map(|v| v.as_str()).collect();
                        format!(
                            "invalid {} `{value}`, expected one of: {}",
                            stringify!($name),
                            expected.join(", ")
                        )
                    })
            }
        }
    };
}

wire_enum! {
    /// Field a listing is ordered by.
    pub enum OrderBy {
        Id => "id",
        Status => "status",
        Ref => "ref",
        UpdatedAt => "updated_at",
        UserId => "user_id",
    }
}

wire_enum! {
    pub enum SortOrder {
        Asc => "asc",
        Desc => "desc",
    }
}

wire_enum! {
    pub enum PipelineStatus {
        Created => "created",
        WaitingForResource => "waiting_for_resource",
        Preparing => "preparing",
        Pending => "pending",
        Running => "running",
        Success => "success",
        Failed => "failed",
        Canceling => "canceling",
        Canceled => "canceled",
        Skipped => "skipped",
        Manual => "manual",
        Scheduled => "scheduled",
        #[unknown]
        Unknown,
    }
}

wire_enum! {
    /// What triggered a pipeline.
    pub enum PipelineSource {
        Api => "api",
        Chat => "chat",
        External => "external",
        ExternalPullRequestEvent => "external_pull_request_event",
        MergeRequestEvent => "merge_request_event",
        OndemandDastScan => "ondemand_dast_scan",
        OndemandDastValidation => "ondemand_dast_validation",
        ParentPipeline => "parent_pipeline",
        Pipeline => "pipeline",
        Push => "push",
        Schedule => "schedule",
        SecurityOrchestrationPolicy => "security_orchestration_policy",
        Trigger => "trigger",
        Web => "web",
        Webide => "webide",
        #[unknown]
        Unknown,
    }
}

wire_enum! {
    pub enum PipelineScope {
        Running => "running",
        Pending => "pending",
        Finished => "finished",
        Branches => "branches",
        Tags => "tags",
    }
}

wire_enum! {
    pub enum JobStatus {
        Created => "created",
        WaitingForResource => "waiting_for_resource",
        Preparing => "preparing",
        Pending => "pending",
        Running => "running",
        Success => "success",
        Failed => "failed",
        Canceling => "canceling",
        Canceled => "canceled",
        Skipped => "skipped",
        Manual => "manual",
        Scheduled => "scheduled",
        #[unknown]
        Unknown,
    }
}

wire_enum! {
    /// Job states accepted by the `scope[]` filter.
    pub enum JobScope {
        Created => "created",
        Pending => "pending",
        Running => "running",
        Failed => "failed",
        Success => "success",
        Canceled => "canceled",
        Skipped => "skipped",
        WaitingForResource => "waiting_for_resource",
        Manual => "manual",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserState {
    Active,
    Blocked,
    Deactivated,
    BlockedPendingApproval,
    Banned,
    LdapBlocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunnerType {
    InstanceType,
    GroupType,
    ProjectType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunnerStatus {
    Online,
    Offline,
    Stale,
    NeverContacted,
    Active,
    Paused,
}

/// Why a job failed. The platform keeps adding reasons; unrecognised ones
/// decode as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    Always,
    UnknownFailure,
    ScriptFailure,
    ApiFailure,
    StuckOrTimeoutFailure,
    RunnerSystemFailure,
    RunnerUnsupported,
    StaleSchedule,
    JobExecutionTimeout,
    ArchivedFailure,
    UnmetPrerequisites,
    SchedulerFailure,
    DataIntegrityFailure,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactFileType {
    Archive,
    Metadata,
    Trace,
    Junit,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactFileFormat {
    Zip,
    Gzip,
    Raw,
}

/// Artifact entry as sent by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireArtifact {
    pub file_type: ArtifactFileType,
    pub size: u64,
    pub filename: String,
    pub file_format: Option<ArtifactFileFormat>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireArtifactsFile {
    pub filename: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub file_type: ArtifactFileType,
    pub size: u64,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_format: Option<ArtifactFileFormat>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactsFile {
    pub filename: String,
    pub size: u64,
}
