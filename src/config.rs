use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::auth::Token;

pub const DEFAULT_HOST: &str = "https://gitlab.com";
pub const DEFAULT_API_PATH: &str = "api/v4";

const CONFIG_STEM: &str = "efficient-gitlab";
const CONFIG_EXTENSIONS: [&str; 4] = ["toml", "json", "yaml", "yml"];

/// Immutable settings held by a [`GitLabClient`](crate::GitLabClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub token: Token,
    pub host: String,
    pub api_path: String,
    /// Passed straight to the HTTP transport; `None` keeps its default.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(token: impl Into<Token>) -> Self {
        Self {
            token: token.into(),
            host: DEFAULT_HOST.to_string(),
            api_path: DEFAULT_API_PATH.to_string(),
            timeout: None,
            user_agent: format!("{CONFIG_STEM}/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    #[must_use]
    pub fn with_api_path(mut self, api_path: impl Into<String>) -> Self {
        self.api_path = api_path.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// File-backed settings for the command line tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub gitlab: GitLabConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitLabConfig {
    /// Personal access token
    pub token: Option<String>,

    /// GitLab instance base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// REST API prefix below the base URL
    #[serde(default = "default_api_path")]
    pub api_path: String,

    /// Request timeout; unset leaves the transport default
    pub timeout_secs: Option<u64>,

    /// Project used when none is given on the command line
    pub project: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Default for GitLabConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: default_base_url(),
            api_path: default_api_path(),
            timeout_secs: None,
            project: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_HOST.to_string()
}

fn default_api_path() -> String {
    DEFAULT_API_PATH.to_string()
}

impl GitLabConfig {
    /// Builds client settings, with `token` taking precedence over the file.
    pub fn client_config(&self, token: Option<Token>) -> Result<ClientConfig> {
        let token = token
            .or_else(|| self.token.as_deref().map(Token::from))
            .filter(|token| !token.is_empty())
            .context("No GitLab token configured (use --token, GITLAB_TOKEN or the config file)")?;

        let mut config = ClientConfig::new(token)
            .with_host(self.base_url.clone())
            .with_api_path(self.api_path.clone());
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

impl Config {
    /// Load configuration.
    ///
    /// Searches in this order:
    /// 1. Specified path
    /// 2. `./efficient-gitlab.{toml,json,yaml,yml}`
    /// 3. `<user config dir>/efficient-gitlab/config.{toml,json,yaml,yml}`
    ///
    /// Returns default configuration if no file is found.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_path(path);
        }

        let found = find_in_dir(Path::new("."), CONFIG_STEM).or_else(|| {
            dirs::config_dir().and_then(|dir| find_in_dir(&dir.join(CONFIG_STEM), "config"))
        });

        match found {
            Some(path) => {
                log::debug!("Using config file: {}", path.display());
                Self::load_from_path(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        match extension {
            "toml" => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            "json" => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display())),
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            _ => toml::from_str(&contents)
                .or_else(|_| serde_json::from_str(&contents))
                .or_else(|_| serde_yaml::from_str(&contents))
                .with_context(|| format!("Failed to parse config file: {}", path.display())),
        }
    }
}

fn find_in_dir(dir: &Path, stem: &str) -> Option<PathBuf> {
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|candidate| candidate.is_file())
}
