use crate::error::Result;
use crate::gitlab::mapper::{map_job, map_trigger_job, Mapper};
use crate::gitlab::query::{BridgeFilter, Order, Pagination, PipelineJobFilter, Query};
use crate::gitlab::types::{Job, TriggerJob, WireJob, WireTriggerJob};

use super::core::{not_implemented, Endpoint, GitLabClient};

/// `GET /projects/:id/jobs`
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectJobsRequest {
    pub project_id: u64,
    pub pagination: Pagination,
    pub order: Order,
}

impl ProjectJobsRequest {
    pub fn new(project_id: u64) -> Self {
        Self {
            project_id,
            pagination: Pagination::default(),
            order: Order::default(),
        }
    }

    #[must_use]
    pub fn pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    #[must_use]
    pub fn order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint::new(
            "project jobs",
            format!("project {}", self.project_id),
            format!("projects/{}/jobs", self.project_id),
        )
    }

    fn query(&self) -> Query {
        Query::compose(&[&self.pagination, &self.order])
    }
}

/// `GET /projects/:id/pipelines/:pipeline_id/jobs`
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineJobsRequest {
    pub project_id: u64,
    pub pipeline_id: u64,
    pub pagination: Pagination,
    pub order: Order,
    pub filter: PipelineJobFilter,
}

impl PipelineJobsRequest {
    pub fn new(project_id: u64, pipeline_id: u64) -> Self {
        Self {
            project_id,
            pipeline_id,
            pagination: Pagination::default(),
            order: Order::default(),
            filter: PipelineJobFilter::default(),
        }
    }

    #[must_use]
    pub fn pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    #[must_use]
    pub fn order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: PipelineJobFilter) -> Self {
        self.filter = filter;
        self
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint::new(
            "pipeline jobs",
            format!("project {}, pipeline {}", self.project_id, self.pipeline_id),
            format!("projects/{}/pipelines/{}/jobs", self.project_id, self.pipeline_id),
        )
    }

    fn query(&self) -> Query {
        Query::compose(&[&self.pagination, &self.order, &self.filter])
    }
}

/// `GET /projects/:id/pipelines/:pipeline_id/bridges`
#[derive(Debug, Clone, PartialEq)]
pub struct BridgesRequest {
    pub project_id: u64,
    pub pipeline_id: u64,
    pub pagination: Pagination,
    pub order: Order,
    pub filter: BridgeFilter,
}

impl BridgesRequest {
    pub fn new(project_id: u64, pipeline_id: u64) -> Self {
        Self {
            project_id,
            pipeline_id,
            pagination: Pagination::default(),
            order: Order::default(),
            filter: BridgeFilter::default(),
        }
    }

    #[must_use]
    pub fn pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    #[must_use]
    pub fn order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: BridgeFilter) -> Self {
        self.filter = filter;
        self
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint::new(
            "pipeline bridges",
            format!("project {}, pipeline {}", self.project_id, self.pipeline_id),
            format!("projects/{}/pipelines/{}/bridges", self.project_id, self.pipeline_id),
        )
    }

    fn query(&self) -> Query {
        Query::compose(&[&self.pagination, &self.order, &self.filter])
    }
}

fn job_endpoint(project_id: u64, job_id: u64) -> Endpoint {
    Endpoint::new(
        "job",
        format!("project {project_id}, job {job_id}"),
        format!("projects/{project_id}/jobs/{job_id}"),
    )
}

/// Job operations, borrowed from a [`GitLabClient`].
#[derive(Debug, Clone, Copy)]
pub struct JobClient<'a> {
    client: &'a GitLabClient,
}

impl<'a> JobClient<'a> {
    pub(crate) fn new(client: &'a GitLabClient) -> Self {
        Self { client }
    }

    /// Lists a project's jobs.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, any non-200 status, a malformed body, or a
    /// job that cannot be mapped. No partial results are returned.
    pub async fn list_project(&self, request: &ProjectJobsRequest) -> Result<Vec<Job>> {
        self.list_project_with(request, map_job).await
    }

    pub async fn list_project_with<M: Mapper<WireJob>>(
        &self,
        request: &ProjectJobsRequest,
        mapper: M,
    ) -> Result<Vec<M::Output>> {
        self.client
            .fetch_list(&request.endpoint(), &request.query(), mapper)
            .await
    }

    /// Lists the jobs of one pipeline.
    pub async fn list_pipeline(&self, request: &PipelineJobsRequest) -> Result<Vec<Job>> {
        self.list_pipeline_with(request, map_job).await
    }

    pub async fn list_pipeline_with<M: Mapper<WireJob>>(
        &self,
        request: &PipelineJobsRequest,
        mapper: M,
    ) -> Result<Vec<M::Output>> {
        self.client
            .fetch_list(&request.endpoint(), &request.query(), mapper)
            .await
    }

    /// Lists the bridge jobs of one pipeline, each with its downstream pipeline.
    pub async fn list_bridges(&self, request: &BridgesRequest) -> Result<Vec<TriggerJob>> {
        self.list_bridges_with(request, map_trigger_job).await
    }

    pub async fn list_bridges_with<M: Mapper<WireTriggerJob>>(
        &self,
        request: &BridgesRequest,
        mapper: M,
    ) -> Result<Vec<M::Output>> {
        self.client
            .fetch_list(&request.endpoint(), &request.query(), mapper)
            .await
    }

    pub async fn get(&self, project_id: u64, job_id: u64) -> Result<Job> {
        self.get_with(project_id, job_id, map_job).await
    }

    pub async fn get_with<M: Mapper<WireJob>>(
        &self,
        project_id: u64,
        job_id: u64,
        mapper: M,
    ) -> Result<M::Output> {
        self.client
            .fetch_one(&job_endpoint(project_id, job_id), &Query::new(), mapper)
            .await
    }

    /// Not implemented yet; always returns [`GitLabError::NotImplemented`](crate::GitLabError::NotImplemented).
    pub async fn log(&self, _project_id: u64, _job_id: u64) -> Result<String> {
        not_implemented("jobs.log")
    }

    /// Not implemented yet.
    pub async fn cancel(&self, _project_id: u64, _job_id: u64) -> Result<Job> {
        not_implemented("jobs.cancel")
    }

    /// Not implemented yet.
    pub async fn retry(&self, _project_id: u64, _job_id: u64) -> Result<Job> {
        not_implemented("jobs.retry")
    }

    /// Not implemented yet.
    pub async fn erase(&self, _project_id: u64, _job_id: u64) -> Result<Job> {
        not_implemented("jobs.erase")
    }

    /// Not implemented yet.
    pub async fn run(&self, _project_id: u64, _job_id: u64) -> Result<Job> {
        not_implemented("jobs.run")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gitlab::types::{JobScope, OrderBy, SortOrder};

    #[test]
    fn test_project_jobs_query_has_only_wire_keys() {
        let request = ProjectJobsRequest::new(1)
            .pagination(Pagination::new(2, 50))
            .order(Order::new(OrderBy::Id, SortOrder::Asc));
        let query = request.query();

        assert_eq!(
            query.to_pairs(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("per_page".to_string(), "50".to_string()),
                ("order_by".to_string(), "id".to_string()),
                ("sort".to_string(), "asc".to_string()),
            ]
        );
    }

    #[test]
    fn test_pipeline_jobs_query_adds_filter() {
        let request = PipelineJobsRequest::new(1, 6).filter(PipelineJobFilter {
            include_retried: Some(true),
            scope: vec![JobScope::Failed],
        });
        let query = request.query();

        assert_eq!(query.get_str("page"), Some("1"));
        assert_eq!(query.get_str("per_page"), Some("20"));
        assert_eq!(query.get_str("include_retried"), Some("true"));
        assert!(query.contains_key("scope"));
        assert_eq!(request.endpoint().to_string(), "pipeline jobs (project 1, pipeline 6)");
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(
            ProjectJobsRequest::new(3).endpoint(),
            Endpoint::new("project jobs", "project 3".into(), "projects/3/jobs".into())
        );
        assert_eq!(
            BridgesRequest::new(3, 9).endpoint(),
            Endpoint::new(
                "pipeline bridges",
                "project 3, pipeline 9".into(),
                "projects/3/pipelines/9/bridges".into()
            )
        );
        assert_eq!(job_endpoint(3, 11).to_string(), "job (project 3, job 11)");
    }
}
