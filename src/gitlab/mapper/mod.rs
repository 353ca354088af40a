//! Wire-to-domain conversion.
//!
//! Every listing and get operation takes a [`Mapper`]. The default mappers
//! live here; any `Fn(Wire) -> Result<T>` can replace them wholesale.

mod job;
mod pipeline;

use chrono::{DateTime, Utc};

use crate::error::{GitLabError, Result};

pub use job::{map_job, map_trigger_job};
pub use pipeline::{map_pipeline, map_pipeline_variable, map_project_pipeline};

/// Converts one wire entity into the caller's chosen representation.
pub trait Mapper<W> {
    type Output;

    fn map(&self, wire: W) -> Result<Self::Output>;
}

impl<W, T, F> Mapper<W> for F
where
    F: Fn(W) -> Result<T>,
{
    type Output = T;

    fn map(&self, wire: W) -> Result<T> {
        self(wire)
    }
}

/// Parses a timestamp the API always sends.
pub(crate) fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|source| GitLabError::InvalidTimestamp {
            field,
            value: value.to_owned(),
            source,
        })
}

/// Parses a timestamp the API may send as `null`.
pub(crate) fn parse_optional_timestamp(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<DateTime<Utc>>> {
    value.map(|v| parse_timestamp(field, v)).transpose()
}

/// Maps a nullable nested entity: `null` stays absent, anything else is
/// mapped in full.
pub(crate) fn map_nullable<W, T>(
    wire: Option<W>,
    map: impl FnOnce(W) -> Result<T>,
) -> Result<Option<T>> {
    wire.map(map).transpose()
}
