use std::fmt;

use thiserror::Error;

/// Coarse classification of a non-200 response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Unauthorized,
    Forbidden,
    NotFound,
    RateLimited,
    Server,
    Other,
}

impl ApiErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            500..=599 => Self::Server,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not found",
            Self::RateLimited => "rate limited",
            Self::Server => "server error",
            Self::Other => "unexpected status",
        };
        f.write_str(text)
    }
}

#[derive(Error, Debug)]
pub enum GitLabError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to fetch {endpoint}: status {status} ({kind})")]
    RequestFailed {
        endpoint: String,
        status: u16,
        kind: ApiErrorKind,
    },

    #[error("Malformed response for {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid timestamp in `{field}`: {value:?}")]
    InvalidTimestamp {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Operation not implemented yet: {0}")]
    NotImplemented(&'static str),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl GitLabError {
    /// HTTP status of a non-200 response, if that is what this error is.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented(_))
    }
}

pub type Result<T> = std::result::Result<T, GitLabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_status() {
        assert_eq!(ApiErrorKind::from_status(401), ApiErrorKind::Unauthorized);
        assert_eq!(ApiErrorKind::from_status(403), ApiErrorKind::Forbidden);
        assert_eq!(ApiErrorKind::from_status(404), ApiErrorKind::NotFound);
        assert_eq!(ApiErrorKind::from_status(429), ApiErrorKind::RateLimited);
        assert_eq!(ApiErrorKind::from_status(502), ApiErrorKind::Server);
        assert_eq!(ApiErrorKind::from_status(204), ApiErrorKind::Other);
        assert_eq!(ApiErrorKind::from_status(400), ApiErrorKind::Other);
    }

    #[test]
    fn test_request_failed_display_keeps_status() {
        let err = GitLabError::RequestFailed {
            endpoint: "pipeline (project 12, pipeline 34)".to_string(),
            status: 404,
            kind: ApiErrorKind::NotFound,
        };
        let text = err.to_string();
        assert!(text.contains("project 12"));
        assert!(text.contains("pipeline 34"));
        assert!(text.contains("404"));
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_not_implemented_is_distinct() {
        let err = GitLabError::NotImplemented("jobs.cancel");
        assert!(err.is_not_implemented());
        assert_eq!(err.status(), None);
    }
}
