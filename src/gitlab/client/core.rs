use std::fmt;

use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ApiErrorKind, GitLabError, Result};
use crate::gitlab::mapper::Mapper;
use crate::gitlab::query::Query;

use super::jobs::JobClient;
use super::pipelines::PipelineClient;

/// `HeaderName::from_static` only accepts lower-case names.
const TOKEN_HEADER: &str = "private-token";

/// Handle on one GitLab instance.
///
/// Cheap to clone; clones share the connection pool. Configuration is fixed
/// at construction, so independent handles for different hosts or tokens can
/// coexist.
#[derive(Debug, Clone)]
pub struct GitLabClient {
    http: Client,
    api_url: Url,
}

impl GitLabClient {
    /// # Errors
    ///
    /// Returns [`GitLabError::Config`] if the host or API path do not form a
    /// valid URL, the token is not a valid header value, or the HTTP client
    /// cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut token = HeaderValue::from_str(config.token.as_str())
            .map_err(|e| GitLabError::Config(format!("Invalid token header value: {e}")))?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(TOKEN_HEADER), token);

        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| GitLabError::Config(format!("Failed to create HTTP client: {e}")))?;

        let api_url = api_base_url(&config.host, &config.api_path)?;

        Ok(Self { http, api_url })
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub fn pipelines(&self) -> PipelineClient<'_> {
        PipelineClient::new(self)
    }

    pub fn jobs(&self) -> JobClient<'_> {
        JobClient::new(self)
    }

    fn resource_url(&self, endpoint: &Endpoint) -> Result<Url> {
        self.api_url
            .join(&endpoint.path)
            .map_err(|e| GitLabError::Config(format!("Invalid resource URL: {e}")))
    }

    /// Issues exactly one GET and hands back the untouched response.
    pub(crate) async fn send(
        &self,
        endpoint: &Endpoint,
        query: &Query,
    ) -> Result<reqwest::Response> {
        let url = self.resource_url(endpoint)?;
        debug!("GET {url} ({endpoint}) query={:?}", query.to_pairs());

        let response = self.http.get(url).query(&query.to_pairs()).send().await?;
        Ok(response)
    }

    pub(crate) async fn fetch<W: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        query: &Query,
    ) -> Result<W> {
        let response = self.send(endpoint, query).await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        classify(endpoint, status, &body)
    }

    pub(crate) async fn fetch_one<W, M>(
        &self,
        endpoint: &Endpoint,
        query: &Query,
        mapper: M,
    ) -> Result<M::Output>
    where
        W: DeserializeOwned,
        M: Mapper<W>,
    {
        let wire: W = self.fetch(endpoint, query).await?;
        mapper.map(wire)
    }

    /// All-or-nothing: the first element that fails to map fails the call.
    pub(crate) async fn fetch_list<W, M>(
        &self,
        endpoint: &Endpoint,
        query: &Query,
        mapper: M,
    ) -> Result<Vec<M::Output>>
    where
        W: DeserializeOwned,
        M: Mapper<W>,
    {
        let wire: Vec<W> = self.fetch(endpoint, query).await?;
        debug!("{endpoint}: mapping {} entities", wire.len());
        wire.into_iter().map(|item| mapper.map(item)).collect()
    }
}

fn api_base_url(host: &str, api_path: &str) -> Result<Url> {
    let mut host = host.trim().to_string();
    if !host.ends_with('/') {
        host.push('/');
    }
    let base = Url::parse(&host).map_err(|e| GitLabError::Config(format!("Invalid host URL: {e}")))?;
    if base.cannot_be_a_base() {
        return Err(GitLabError::Config(format!("Host is not a base URL: {host}")));
    }

    let api_path = api_path.trim_matches('/');
    if api_path.is_empty() {
        return Ok(base);
    }
    base.join(&format!("{api_path}/"))
        .map_err(|e| GitLabError::Config(format!("Invalid API path: {e}")))
}

/// Resource being requested: relative path under the API prefix plus a
/// human-readable description used in logs and errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Endpoint {
    resource: &'static str,
    target: String,
    path: String,
}

impl Endpoint {
    pub(crate) fn new(resource: &'static str, target: String, path: String) -> Self {
        Self {
            resource,
            target,
            path,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.resource, self.target)
    }
}

/// Anything but `200` is a failure; a `200` body must decode as `W`.
pub(crate) fn classify<W: DeserializeOwned>(
    endpoint: &Endpoint,
    status: u16,
    body: &[u8],
) -> Result<W> {
    if status != 200 {
        warn!("{endpoint} responded with status {status}");
        return Err(GitLabError::RequestFailed {
            endpoint: endpoint.to_string(),
            status,
            kind: ApiErrorKind::from_status(status),
        });
    }

    debug!("{endpoint} responded with status 200 ({} bytes)", body.len());
    serde_json::from_slice(body).map_err(|source| GitLabError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

pub(crate) fn not_implemented<T>(operation: &'static str) -> Result<T> {
    debug!("{operation} called but is not implemented");
    Err(GitLabError::NotImplemented(operation))
}
