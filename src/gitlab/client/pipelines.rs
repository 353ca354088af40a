use serde_json::Value;

use crate::error::Result;
use crate::gitlab::mapper::{map_pipeline, map_pipeline_variable, map_project_pipeline, Mapper};
use crate::gitlab::query::{Order, Pagination, PipelineFilter, Query};
use crate::gitlab::types::{
    Pipeline, PipelineVariable, ProjectPipeline, WirePipeline, WirePipelineVariable,
    WireProjectPipeline,
};

use super::core::{not_implemented, Endpoint, GitLabClient};

/// `GET /projects/:id/pipelines`
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPipelinesRequest {
    pub project_id: u64,
    pub pagination: Pagination,
    pub order: Order,
    pub filter: PipelineFilter,
}

impl ProjectPipelinesRequest {
    pub fn new(project_id: u64) -> Self {
        Self {
            project_id,
            pagination: Pagination::default(),
            order: Order::default(),
            filter: PipelineFilter::default(),
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
    pub fn filter(mut self, filter: PipelineFilter) -> Self {
        self.filter = filter;
        self
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint::new(
            "project pipelines",
            format!("project {}", self.project_id),
            format!("projects/{}/pipelines", self.project_id),
        )
    }

    fn query(&self) -> Query {
        Query::compose(&[&self.pagination, &self.order, &self.filter])
    }
}

fn pipeline_endpoint(project_id: u64, pipeline_id: u64) -> Endpoint {
    Endpoint::new(
        "pipeline",
        format!("project {project_id}, pipeline {pipeline_id}"),
        format!("projects/{project_id}/pipelines/{pipeline_id}"),
    )
}

fn latest_endpoint(project_id: u64) -> Endpoint {
    Endpoint::new(
        "latest pipeline",
        format!("project {project_id}"),
        format!("projects/{project_id}/pipelines/latest"),
    )
}

fn variables_endpoint(project_id: u64, pipeline_id: u64) -> Endpoint {
    Endpoint::new(
        "pipeline variables",
        format!("project {project_id}, pipeline {pipeline_id}"),
        format!("projects/{project_id}/pipelines/{pipeline_id}/variables"),
    )
}

/// Pipeline operations, borrowed from a [`GitLabClient`].
#[derive(Debug, Clone, Copy)]
pub struct PipelineClient<'a> {
    client: &'a GitLabClient,
}

impl<'a> PipelineClient<'a> {
    pub(crate) fn new(client: &'a GitLabClient) -> Self {
        Self { client }
    }

    /// Lists a project's pipelines as summaries.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, any non-200 status, a malformed body, or a
    /// pipeline that cannot be mapped.
    pub async fn list_project(
        &self,
        request: &ProjectPipelinesRequest,
    ) -> Result<Vec<ProjectPipeline>> {
        self.list_project_with(request, map_project_pipeline).await
    }

    pub async fn list_project_with<M: Mapper<WireProjectPipeline>>(
        &self,
        request: &ProjectPipelinesRequest,
        mapper: M,
    ) -> Result<Vec<M::Output>> {
        self.client
            .fetch_list(&request.endpoint(), &request.query(), mapper)
            .await
    }

    pub async fn get(&self, project_id: u64, pipeline_id: u64) -> Result<Pipeline> {
        self.get_with(project_id, pipeline_id, map_pipeline).await
    }

    pub async fn get_with<M: Mapper<WirePipeline>>(
        &self,
        project_id: u64,
        pipeline_id: u64,
        mapper: M,
    ) -> Result<M::Output> {
        self.client
            .fetch_one(&pipeline_endpoint(project_id, pipeline_id), &Query::new(), mapper)
            .await
    }

    /// Most recent pipeline on the project's default branch.
    pub async fn latest(&self, project_id: u64) -> Result<Pipeline> {
        self.latest_with(project_id, map_pipeline).await
    }

    pub async fn latest_with<M: Mapper<WirePipeline>>(
        &self,
        project_id: u64,
        mapper: M,
    ) -> Result<M::Output> {
        self.client
            .fetch_one(&latest_endpoint(project_id), &Query::new(), mapper)
            .await
    }

    pub async fn variables(
        &self,
        project_id: u64,
        pipeline_id: u64,
    ) -> Result<Vec<PipelineVariable>> {
        self.variables_with(project_id, pipeline_id, map_pipeline_variable)
            .await
    }

    pub async fn variables_with<M: Mapper<WirePipelineVariable>>(
        &self,
        project_id: u64,
        pipeline_id: u64,
        mapper: M,
    ) -> Result<Vec<M::Output>> {
        self.client
            .fetch_list(&variables_endpoint(project_id, pipeline_id), &Query::new(), mapper)
            .await
    }

    /// Not implemented yet; always returns [`GitLabError::NotImplemented`](crate::GitLabError::NotImplemented).
    pub async fn test_report(&self, _project_id: u64, _pipeline_id: u64) -> Result<Value> {
        not_implemented("pipelines.test_report")
    }

    /// Not implemented yet.
    pub async fn test_report_summary(&self, _project_id: u64, _pipeline_id: u64) -> Result<Value> {
        not_implemented("pipelines.test_report_summary")
    }

    /// Not implemented yet.
    pub async fn create(&self, _project_id: u64, _ref_: &str) -> Result<Pipeline> {
        not_implemented("pipelines.create")
    }

    /// Not implemented yet.
    pub async fn retry(&self, _project_id: u64, _pipeline_id: u64) -> Result<Pipeline> {
        not_implemented("pipelines.retry")
    }

    /// Not implemented yet.
    pub async fn cancel(&self, _project_id: u64, _pipeline_id: u64) -> Result<Pipeline> {
        not_implemented("pipelines.cancel")
    }

    /// Not implemented yet.
    pub async fn delete(&self, _project_id: u64, _pipeline_id: u64) -> Result<()> {
        not_implemented("pipelines.delete")
    }

    /// Not implemented yet.
    pub async fn update_metadata(
        &self,
        _project_id: u64,
        _pipeline_id: u64,
        _name: &str,
    ) -> Result<Pipeline> {
        not_implemented("pipelines.update_metadata")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gitlab::types::PipelineStatus;

    #[test]
    fn test_project_pipelines_query_merges_groups() {
        let request = ProjectPipelinesRequest::new(21).filter(PipelineFilter {
            status: Some(PipelineStatus::Failed),
            username: Some("root".to_string()),
            ..PipelineFilter::default()
        });
        let keys: Vec<_> = request.query().keys().collect();

        assert_eq!(
            keys,
            vec!["page", "per_page", "order_by", "sort", "status", "username"]
        );
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(
            pipeline_endpoint(12, 34).to_string(),
            "pipeline (project 12, pipeline 34)"
        );
        assert_eq!(latest_endpoint(12).to_string(), "latest pipeline (project 12)");
        assert_eq!(
            variables_endpoint(12, 34),
            Endpoint::new(
                "pipeline variables",
                "project 12, pipeline 34".into(),
                "projects/12/pipelines/34/variables".into()
            )
        );
    }
}
