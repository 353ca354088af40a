mod core;
mod jobs;
mod pipelines;

pub use self::core::GitLabClient;
pub use jobs::{BridgesRequest, JobClient, PipelineJobsRequest, ProjectJobsRequest};
pub use pipelines::{PipelineClient, ProjectPipelinesRequest};
