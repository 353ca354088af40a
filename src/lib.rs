//! Typed client for the GitLab CI/CD REST API.
//!
//! Requests are composed from orthogonal parameter groups (pagination,
//! ordering, filters), sent once, classified by status, and the wire JSON is
//! mapped into domain types with parsed timestamps and explicit optionality.
//!
//! ```no_run
//! use efficient_gitlab::{ClientConfig, GitLabClient, ProjectPipelinesRequest};
//!
//! # async fn example() -> efficient_gitlab::Result<()> {
//! let client = GitLabClient::new(ClientConfig::new("glpat-xxxx"))?;
//! let pipelines = client
//!     .pipelines()
//!     .list_project(&ProjectPipelinesRequest::new(278964))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod gitlab;

pub use auth::Token;
pub use config::ClientConfig;
pub use error::{ApiErrorKind, GitLabError, Result};
pub use gitlab::client::{
    BridgesRequest, GitLabClient, JobClient, PipelineClient, PipelineJobsRequest,
    ProjectJobsRequest, ProjectPipelinesRequest,
};
pub use gitlab::mapper::Mapper;
pub use gitlab::query::{BridgeFilter, Order, Pagination, PipelineFilter, PipelineJobFilter, Query};
