pub mod client;
pub mod mapper;
pub mod query;
pub mod types;

pub use client::GitLabClient;
