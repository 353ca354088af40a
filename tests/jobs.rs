//! Job and bridge operations against a mocked GitLab instance.

mod common;

use efficient_gitlab::gitlab::types::{
    FailureReason, JobScope, JobStatus, PipelineStatus, RunnerType, WireJob,
};
use efficient_gitlab::{
    BridgeFilter, BridgesRequest, GitLabError, Pagination, PipelineJobFilter, PipelineJobsRequest,
    ProjectJobsRequest,
};
use mockito::Matcher;

use common::{client, BRIDGES, JOB, TOKEN};

fn job_list() -> String {
    format!("[{JOB}]")
}

#[tokio::test]
async fn test_list_project_jobs_uses_default_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v4/projects/1/jobs")
        .match_header("private-token", TOKEN)
        .match_query(Matcher::Exact(
            "page=1&per_page=20&order_by=updated_at&sort=desc".into(),
        ))
        .with_status(200)
        .with_body(job_list())
        .create_async()
        .await;

    let jobs = client(&server)
        .jobs()
        .list_project(&ProjectJobsRequest::new(1))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(jobs.len(), 1);
    let job = &jobs[0];
    assert_eq!(job.id, 7);
    assert_eq!(job.status, JobStatus::Failed);
    assert_eq!(job.failure_reason, Some(FailureReason::ScriptFailure));
    assert_eq!(job.coverage, None);
    assert_eq!(job.erased_at, None);
    assert_eq!(job.artifacts.len(), 4);
    assert_eq!(job.user.bio, None);
    assert_eq!(job.user.public_email.as_deref(), Some(""));

    let runner = job.runner.as_ref().unwrap();
    assert_eq!(runner.runner_type, RunnerType::InstanceType);
    assert_eq!(runner.name, None);
    let manager = job.runner_manager.as_ref().unwrap();
    assert_eq!(manager.contacted_at.to_rfc3339(), "2024-05-07T06:30:09.355+00:00");
}

#[tokio::test]
async fn test_list_pipeline_jobs_sends_scope_array() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v4/projects/1/pipelines/6/jobs")
        .match_query(Matcher::Exact(
            "page=1&per_page=50&order_by=updated_at&sort=desc&include_retried=true\
             &scope%5B%5D=failed&scope%5B%5D=canceled"
                .into(),
        ))
        .with_status(200)
        .with_body(job_list())
        .create_async()
        .await;

    let request = PipelineJobsRequest::new(1, 6)
        .pagination(Pagination::new(1, 50))
        .filter(PipelineJobFilter {
            include_retried: Some(true),
            scope: vec![JobScope::Failed, JobScope::Canceled],
        });
    let jobs = client(&server)
        .jobs()
        .list_pipeline(&request)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(jobs[0].pipeline.id, 6);
    assert_eq!(jobs[0].pipeline.status, PipelineStatus::Pending);
}

#[tokio::test]
async fn test_running_jobs_decode_without_finish_time() {
    let running = JOB
        .replacen("\"status\": \"failed\"", "\"status\": \"running\"", 1)
        .replacen(
            "\"finished_at\": \"2015-12-24T17:54:27.895Z\"",
            "\"finished_at\": null",
            1,
        );
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v4/projects/1/pipelines/6/jobs")
        .match_query(Matcher::Exact(
            "page=1&per_page=20&order_by=updated_at&sort=desc&scope%5B%5D=running".into(),
        ))
        .with_status(200)
        .with_body(format!("[{running}]"))
        .create_async()
        .await;

    let request = PipelineJobsRequest::new(1, 6).filter(PipelineJobFilter {
        include_retried: None,
        scope: vec![JobScope::Running],
    });
    let jobs = client(&server)
        .jobs()
        .list_pipeline(&request)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].status, JobStatus::Running);
    assert_eq!(jobs[0].finished_at, None);
    assert!(jobs[0].started_at.is_some());
}

#[tokio::test]
async fn test_list_bridges_maps_downstream_pipeline() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v4/projects/1/pipelines/6/bridges")
        .match_query(Matcher::UrlEncoded("scope[]".into(), "success".into()))
        .with_status(200)
        .with_body(BRIDGES)
        .create_async()
        .await;

    let request = BridgesRequest::new(1, 6).filter(BridgeFilter {
        scope: vec![JobScope::Success],
    });
    let bridges = client(&server)
        .jobs()
        .list_bridges(&request)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(bridges.len(), 1);
    let bridge = &bridges[0];
    assert_eq!(bridge.name, "downstream");
    assert_eq!(bridge.runner, None);
    assert_eq!(bridge.failure_reason, None);
    assert_eq!(bridge.downstream_pipeline.id, 5);
    assert_eq!(bridge.downstream_pipeline.status, PipelineStatus::Pending);

    let out = serde_json::to_value(bridge).unwrap();
    assert_eq!(out["downstreamPipeline"]["id"], serde_json::json!(5));
    assert_eq!(out["stage"], serde_json::json!("deploy"));
}

#[tokio::test]
async fn test_get_job_sends_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v4/projects/1/jobs/7")
        .match_header("private-token", TOKEN)
        .with_status(200)
        .with_body(JOB)
        .create_async()
        .await;

    let job = client(&server).jobs().get(1, 7).await.unwrap();

    mock.assert_async().await;
    assert_eq!(job.name, "teaspoon");
    assert_eq!(job.tag_list, vec!["docker runner", "ubuntu18"]);
}

#[tokio::test]
async fn test_unauthorized_job_request() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v4/projects/1/jobs/7")
        .with_status(401)
        .with_body(r#"{"message":"401 Unauthorized"}"#)
        .create_async()
        .await;

    let err = client(&server).jobs().get(1, 7).await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(err.to_string().contains("job (project 1, job 7)"));
}

#[tokio::test]
async fn test_one_bad_entity_fails_the_whole_list() {
    let broken = JOB.replacen(
        "\"finished_at\": \"2015-12-24T17:54:27.895Z\"",
        "\"finished_at\": \"yesterday\"",
        1,
    );
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v4/projects/1/jobs")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(format!("[{JOB}, {broken}]"))
        .create_async()
        .await;

    let err = client(&server)
        .jobs()
        .list_project(&ProjectJobsRequest::new(1))
        .await
        .unwrap_err();

    match err {
        GitLabError::InvalidTimestamp { field, value, .. } => {
            assert_eq!(field, "finished_at");
            assert_eq!(value, "yesterday");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_custom_mapper_for_job_listing() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v4/projects/1/jobs")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(job_list())
        .create_async()
        .await;

    let names = client(&server)
        .jobs()
        .list_project_with(
            &ProjectJobsRequest::new(1),
            |wire: WireJob| -> efficient_gitlab::Result<(u64, String)> {
                Ok((wire.id, wire.stage))
            },
        )
        .await
        .unwrap();

    assert_eq!(names, vec![(7, "test".to_string())]);
}

#[tokio::test]
async fn test_lifecycle_stubs_do_not_touch_the_network() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client(&server);
    let jobs = client.jobs();

    assert!(jobs.log(1, 7).await.unwrap_err().is_not_implemented());
    assert!(jobs.cancel(1, 7).await.unwrap_err().is_not_implemented());
    assert!(jobs.retry(1, 7).await.unwrap_err().is_not_implemented());
    assert!(jobs.erase(1, 7).await.unwrap_err().is_not_implemented());
    assert!(jobs.run(1, 7).await.unwrap_err().is_not_implemented());

    mock.assert_async().await;
}
