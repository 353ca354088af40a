#![allow(dead_code)]

use efficient_gitlab::{ClientConfig, GitLabClient};
use mockito::ServerGuard;

pub const TOKEN: &str = "glpat-test-token";

pub const JOB: &str = include_str!("../fixtures/job.json");
pub const BRIDGES: &str = include_str!("../fixtures/bridges.json");
pub const PIPELINE: &str = include_str!("../fixtures/pipeline.json");
pub const PROJECT_PIPELINES: &str = include_str!("../fixtures/project_pipelines.json");
pub const VARIABLES: &str = include_str!("../fixtures/variables.json");

pub fn client(server: &ServerGuard) -> GitLabClient {
    GitLabClient::new(ClientConfig::new(TOKEN).with_host(server.url())).unwrap()
}
