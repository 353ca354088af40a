use super::{map_nullable, parse_optional_timestamp, parse_timestamp};
use crate::error::Result;
use crate::gitlab::types::{
    Artifact, ArtifactsFile, DownstreamPipeline, Job, JobCommit, JobPipeline, JobProject,
    JobRunner, JobRunnerManager, JobUser, TriggerJob, WireArtifact, WireArtifactsFile,
    WireDownstreamPipeline, WireJob, WireJobCommit, WireJobPipeline, WireJobProject,
    WireJobRunner, WireJobRunnerManager, WireJobUser, WireTriggerJob,
};

/// Default mapper for plain jobs.
pub fn map_job(job: WireJob) -> Result<Job> {
    Ok(Job {
        commit: map_commit(job.commit)?,
        coverage: job.coverage,
        allow_failure: job.allow_failure,
        created_at: parse_timestamp("created_at", &job.created_at)?,
        started_at: parse_optional_timestamp("started_at", job.started_at.as_deref())?,
        finished_at: parse_optional_timestamp("finished_at", job.finished_at.as_deref())?,
        erased_at: parse_optional_timestamp("erased_at", job.erased_at.as_deref())?,
        duration: job.duration,
        queued_duration: job.queued_duration,
        artifacts_file: job.artifacts_file.map(map_artifacts_file),
        artifacts: job.artifacts.into_iter().map(map_artifact).collect(),
        artifacts_expire_at: parse_optional_timestamp(
            "artifacts_expire_at",
            job.artifacts_expire_at.as_deref(),
        )?,
        tag_list: job.tag_list,
        id: job.id,
        name: job.name,
        pipeline: map_job_pipeline(job.pipeline),
        ref_: job.ref_,
        runner: job.runner.map(map_runner),
        runner_manager: map_nullable(job.runner_manager, map_runner_manager)?,
        stage: job.stage,
        status: job.status,
        failure_reason: job.failure_reason,
        tag: job.tag,
        web_url: job.web_url,
        project: map_project(job.project),
        user: map_user(job.user)?,
    })
}

/// Default mapper for bridge jobs: the plain job mapping plus the
/// downstream pipeline.
pub fn map_trigger_job(trigger: WireTriggerJob) -> Result<TriggerJob> {
    Ok(TriggerJob {
        job: map_job(trigger.job)?,
        downstream_pipeline: map_downstream_pipeline(trigger.downstream_pipeline)?,
    })
}

fn map_commit(commit: WireJobCommit) -> Result<JobCommit> {
    Ok(JobCommit {
        author_email: commit.author_email,
        author_name: commit.author_name,
        created_at: parse_timestamp("commit.created_at", &commit.created_at)?,
        id: commit.id,
        message: commit.message,
        short_id: commit.short_id,
        title: commit.title,
    })
}

fn map_job_pipeline(pipeline: WireJobPipeline) -> JobPipeline {
    JobPipeline {
        id: pipeline.id,
        project_id: pipeline.project_id,
        ref_: pipeline.ref_,
        sha: pipeline.sha,
        status: pipeline.status,
    }
}

fn map_runner(runner: WireJobRunner) -> JobRunner {
    JobRunner {
        id: runner.id,
        description: runner.description,
        ip_address: runner.ip_address,
        active: runner.active,
        paused: runner.paused,
        is_shared: runner.is_shared,
        runner_type: runner.runner_type,
        name: runner.name,
        online: runner.online,
        status: runner.status,
    }
}

fn map_runner_manager(manager: WireJobRunnerManager) -> Result<JobRunnerManager> {
    Ok(JobRunnerManager {
        id: manager.id,
        system_id: manager.system_id,
        version: manager.version,
        revision: manager.revision,
        platform: manager.platform,
        architecture: manager.architecture,
        created_at: parse_timestamp("runner_manager.created_at", &manager.created_at)?,
        contacted_at: parse_timestamp("runner_manager.contacted_at", &manager.contacted_at)?,
        ip_address: manager.ip_address,
        status: manager.status,
    })
}

fn map_user(user: WireJobUser) -> Result<JobUser> {
    Ok(JobUser {
        id: user.id,
        name: user.name,
        username: user.username,
        state: user.state,
        avatar_url: user.avatar_url,
        web_url: user.web_url,
        created_at: parse_timestamp("user.created_at", &user.created_at)?,
        bio: user.bio,
        location: user.location,
        public_email: user.public_email,
        skype: user.skype,
        linkedin: user.linkedin,
        twitter: user.twitter,
        website_url: user.website_url,
        organization: user.organization,
    })
}

fn map_project(project: WireJobProject) -> JobProject {
    JobProject {
        ci_job_token_scope_enabled: project.ci_job_token_scope_enabled,
    }
}

fn map_artifact(artifact: WireArtifact) -> Artifact {
    Artifact {
        file_type: artifact.file_type,
        size: artifact.size,
        filename: artifact.filename,
        file_format: artifact.file_format,
    }
}

fn map_artifacts_file(file: WireArtifactsFile) -> ArtifactsFile {
    ArtifactsFile {
        filename: file.filename,
        size: file.size,
    }
}

fn map_downstream_pipeline(pipeline: WireDownstreamPipeline) -> Result<DownstreamPipeline> {
    Ok(DownstreamPipeline {
        id: pipeline.id,
        sha: pipeline.sha,
        ref_: pipeline.ref_,
        status: pipeline.status,
        created_at: parse_timestamp("downstream_pipeline.created_at", &pipeline.created_at)?,
        updated_at: parse_timestamp("downstream_pipeline.updated_at", &pipeline.updated_at)?,
        web_url: pipeline.web_url,
    })
}
