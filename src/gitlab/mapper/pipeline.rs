use super::{parse_optional_timestamp, parse_timestamp};
use crate::error::Result;
use crate::gitlab::types::{
    DetailedStatus, Pipeline, PipelineUser, PipelineVariable, ProjectPipeline, WireDetailedStatus,
    WirePipeline, WirePipelineUser, WirePipelineVariable, WireProjectPipeline,
};

/// `before_sha` value the API uses when there is no previous commit.
pub const NULL_SHA: &str = "0000000000000000000000000000000000000000";

pub fn map_project_pipeline(pipeline: WireProjectPipeline) -> Result<ProjectPipeline> {
    Ok(ProjectPipeline {
        id: pipeline.id,
        iid: pipeline.iid,
        project_id: pipeline.project_id,
        sha: pipeline.sha,
        ref_: pipeline.ref_,
        status: pipeline.status,
        source: pipeline.source,
        created_at: parse_timestamp("created_at", &pipeline.created_at)?,
        updated_at: parse_timestamp("updated_at", &pipeline.updated_at)?,
        web_url: pipeline.web_url,
    })
}

pub fn map_pipeline(pipeline: WirePipeline) -> Result<Pipeline> {
    Ok(Pipeline {
        id: pipeline.id,
        iid: pipeline.iid,
        project_id: pipeline.project_id,
        name: pipeline.name,
        sha: pipeline.sha,
        ref_: pipeline.ref_,
        status: pipeline.status,
        source: pipeline.source,
        created_at: parse_timestamp("created_at", &pipeline.created_at)?,
        updated_at: parse_timestamp("updated_at", &pipeline.updated_at)?,
        web_url: pipeline.web_url,
        before_sha: previous_sha(pipeline.before_sha),
        tag: pipeline.tag,
        yaml_errors: pipeline.yaml_errors,
        user: map_user(pipeline.user),
        started_at: parse_optional_timestamp("started_at", pipeline.started_at.as_deref())?,
        finished_at: parse_optional_timestamp("finished_at", pipeline.finished_at.as_deref())?,
        committed_at: parse_optional_timestamp("committed_at", pipeline.committed_at.as_deref())?,
        duration: pipeline.duration,
        queued_duration: pipeline.queued_duration,
        coverage: pipeline.coverage,
        detailed_status: map_detailed_status(pipeline.detailed_status),
    })
}

pub fn map_pipeline_variable(variable: WirePipelineVariable) -> Result<PipelineVariable> {
    Ok(PipelineVariable {
        key: variable.key,
        value: variable.value,
        variable_type: variable.variable_type,
    })
}

fn previous_sha(before_sha: Option<String>) -> Option<String> {
    before_sha.filter(|sha| sha != NULL_SHA)
}

fn map_user(user: WirePipelineUser) -> PipelineUser {
    PipelineUser {
        id: user.id,
        username: user.username,
        name: user.name,
        state: user.state,
        avatar_url: user.avatar_url,
        web_url: user.web_url,
    }
}

fn map_detailed_status(status: WireDetailedStatus) -> DetailedStatus {
    DetailedStatus {
        icon: status.icon,
        text: status.text,
        label: status.label,
        group: status.group,
        tooltip: status.tooltip,
        has_details: status.has_details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gitlab::types::{PipelineSource, PipelineStatus, UserState};
    use serde_json::{json, Value};

    const PIPELINE: &str = include_str!("../../../tests/fixtures/pipeline.json");

    fn pipeline_json() -> Value {
        serde_json::from_str(PIPELINE).unwrap()
    }

    fn wire_pipeline(value: Value) -> WirePipeline {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_map_pipeline() {
        let pipeline = map_pipeline(wire_pipeline(pipeline_json())).unwrap();

        assert_eq!(pipeline.id, 46);
        assert_eq!(pipeline.iid, 11);
        assert_eq!(pipeline.project_id, 1);
        assert_eq!(pipeline.name.as_deref(), Some("Build pipeline"));
        assert_eq!(pipeline.status, PipelineStatus::Success);
        assert_eq!(pipeline.source, PipelineSource::Push);
        assert_eq!(pipeline.user.state, UserState::Active);
        assert_eq!(pipeline.committed_at, None);
        assert_eq!(pipeline.coverage, Some(json!("30.0")));
        assert_eq!(pipeline.yaml_errors, None);
        assert_eq!(pipeline.duration, Some(123.65));
        assert_eq!(
            pipeline.finished_at.unwrap().to_rfc3339(),
            "2016-08-11T11:32:35.145+00:00"
        );
        assert_eq!(pipeline.detailed_status.icon, json!("status_success"));
        assert!(pipeline.detailed_status.has_details);
    }

    #[test]
    fn test_running_pipeline_has_no_finish_time() {
        let mut value = pipeline_json();
        value["status"] = json!("running");
        value["started_at"] = Value::Null;
        value["finished_at"] = Value::Null;
        value["duration"] = Value::Null;
        let pipeline = map_pipeline(wire_pipeline(value)).unwrap();

        assert_eq!(pipeline.status, PipelineStatus::Running);
        assert_eq!(pipeline.started_at, None);
        assert_eq!(pipeline.finished_at, None);

        let out = serde_json::to_value(&pipeline).unwrap();
        assert!(out.get("finishedAt").is_none());
        assert!(out.get("finished_at").is_none());
    }

    #[test]
    fn test_null_sha_before_sha_is_absent() {
        let mut value = pipeline_json();
        value["before_sha"] = json!(NULL_SHA);
        assert_eq!(map_pipeline(wire_pipeline(value)).unwrap().before_sha, None);

        let mut value = pipeline_json();
        value["before_sha"] = Value::Null;
        assert_eq!(map_pipeline(wire_pipeline(value)).unwrap().before_sha, None);
    }

    #[test]
    fn test_real_before_sha_is_kept_verbatim() {
        for sha in [
            "8a24fb3c5877a6d0b611ca41fc86edc174593e2b",
            "0000000000000000000000000000000000000001",
            "ffffffffffffffffffffffffffffffffffffffff",
        ] {
            let mut value = pipeline_json();
            value["before_sha"] = json!(sha);
            let pipeline = map_pipeline(wire_pipeline(value)).unwrap();
            assert_eq!(pipeline.before_sha.as_deref(), Some(sha));
        }
    }

    #[test]
    fn test_committed_at_is_parsed_when_present() {
        let mut value = pipeline_json();
        value["committed_at"] = json!("2022-09-21T01:04:59Z");
        let pipeline = map_pipeline(wire_pipeline(value)).unwrap();
        assert_eq!(
            pipeline.committed_at.unwrap().to_rfc3339(),
            "2022-09-21T01:04:59+00:00"
        );
    }

    #[test]
    fn test_opaque_fields_pass_through() {
        let mut value = pipeline_json();
        value["yaml_errors"] = json!("jobs:build config contains unknown keys: scriptt");
        value["coverage"] = json!("78.5");
        value["detailed_status"]["tooltip"] = json!({ "nested": [1, 2] });
        let pipeline = map_pipeline(wire_pipeline(value)).unwrap();

        assert_eq!(
            pipeline.yaml_errors,
            Some(json!("jobs:build config contains unknown keys: scriptt"))
        );
        assert_eq!(pipeline.coverage, Some(json!("78.5")));
        assert_eq!(pipeline.detailed_status.tooltip, json!({ "nested": [1, 2] }));
    }

    #[test]
    fn test_serialised_pipeline_drops_wire_only_fields() {
        let mut value = pipeline_json();
        value["before_sha"] = json!("8a24fb3c5877a6d0b611ca41fc86edc174593e2b");
        let pipeline = map_pipeline(wire_pipeline(value)).unwrap();
        let out = serde_json::to_value(&pipeline).unwrap();

        assert_eq!(out["beforeSha"], json!("8a24fb3c5877a6d0b611ca41fc86edc174593e2b"));
        assert_eq!(out["detailedStatus"]["hasDetails"], json!(true));
        assert!(out["detailedStatus"].get("favicon").is_none());
        assert!(out["detailedStatus"].get("details_path").is_none());
        assert!(out.get("committedAt").is_none());
        assert!(out.get("project_id").is_none());
        assert_eq!(out["projectId"], json!(1));
    }

    #[test]
    fn test_map_project_pipeline() {
        let wire: WireProjectPipeline = serde_json::from_value(json!({
            "id": 47,
            "iid": 12,
            "project_id": 1,
            "status": "pending",
            "source": "push",
            "ref": "new-pipeline",
            "sha": "a91957a858320c0e17f3a0eca7cfacbff50ea29a",
            "web_url": "https://example.com/foo/bar/pipelines/47",
            "created_at": "2016-08-11T11:28:34.085Z",
            "updated_at": "2016-08-11T11:32:35.169Z"
        }))
        .unwrap();

        let pipeline = map_project_pipeline(wire).unwrap();
        assert_eq!(pipeline.id, 47);
        assert_eq!(pipeline.ref_, "new-pipeline");
        assert_eq!(pipeline.status, PipelineStatus::Pending);
        assert_eq!(pipeline.updated_at.to_rfc3339(), "2016-08-11T11:32:35.169+00:00");
    }

    #[test]
    fn test_map_pipeline_variable() {
        let wire: WirePipelineVariable = serde_json::from_value(json!({
            "key": "RUN_NIGHTLY_BUILD",
            "variable_type": "env_var",
            "value": "true"
        }))
        .unwrap();
        let variable = map_pipeline_variable(wire).unwrap();
        assert_eq!(variable.key, "RUN_NIGHTLY_BUILD");
        assert_eq!(variable.value, "true");
        assert_eq!(variable.variable_type.as_deref(), Some("env_var"));

        let out = serde_json::to_value(&variable).unwrap();
        assert_eq!(out["variableType"], json!("env_var"));
    }
}
