use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;

use super::types::{
    JobScope, OrderBy, PipelineScope, PipelineSource, PipelineStatus, SortOrder,
};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Single(String),
    /// Sent as repeated `key[]=value` pairs.
    Many(Vec<String>),
}

/// Flat, insertion-ordered mapping of wire parameter name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: IndexMap<&'static str, QueryValue>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges parameter groups left to right into one query.
    ///
    /// # Panics
    ///
    /// If two groups emit the same wire key.
    pub fn compose(groups: &[&dyn QueryGroup]) -> Self {
        let mut query = Self::new();
        for group in groups {
            group.append_to(&mut query);
        }
        query
    }

    fn insert(&mut self, key: &'static str, value: QueryValue) {
        // Groups own disjoint keys; a repeat means two groups disagree on a key.
        assert!(
            !self.params.contains_key(key),
            "query key `{key}` set by more than one parameter group"
        );
        self.params.insert(key, value);
    }

    pub fn set(&mut self, key: &'static str, value: impl ToString) {
        self.insert(key, QueryValue::Single(value.to_string()));
    }

    /// Sets `key` only when a value was provided.
    pub fn set_opt<T: ToString>(&mut self, key: &'static str, value: Option<T>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    /// Sets a multi-valued key; an empty list leaves the key out.
    pub fn set_many<I, T>(&mut self, key: &'static str, values: I)
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        let values: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
        if !values.is_empty() {
            self.insert(key, QueryValue::Many(values));
        }
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.params.get(key)
    }

    /// Convenience for single-valued keys.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.params.get(key) {
            Some(QueryValue::Single(value)) => Some(value),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.params.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Pairs ready for URL encoding.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.params.len());
        for (key, value) in &self.params {
            match value {
                QueryValue::Single(value) => pairs.push(((*key).to_string(), value.clone())),
                QueryValue::Many(values) => {
                    let array_key = format!("{key}[]");
                    pairs.extend(values.iter().map(|v| (array_key.clone(), v.clone())));
                }
            }
        }
        pairs
    }
}

/// One orthogonal concern (pagination, ordering, a filter) contributing
/// query parameters under keys it alone owns.
pub trait QueryGroup {
    /// Every wire key this group may emit.
    fn keys(&self) -> &'static [&'static str];

    fn append_to(&self, query: &mut Query);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl QueryGroup for Pagination {
    fn keys(&self) -> &'static [&'static str] {
        &["page", "per_page"]
    }

    fn append_to(&self, query: &mut Query) {
        query.set("page", self.page);
        query.set("per_page", self.per_page);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub by: OrderBy,
    pub sort: SortOrder,
}

impl Order {
    pub fn new(by: OrderBy, sort: SortOrder) -> Self {
        Self { by, sort }
    }
}

impl Default for Order {
    fn default() -> Self {
        Self {
            by: OrderBy::UpdatedAt,
            sort: SortOrder::Desc,
        }
    }
}

impl QueryGroup for Order {
    fn keys(&self) -> &'static [&'static str] {
        &["order_by", "sort"]
    }

    fn append_to(&self, query: &mut Query) {
        query.set("order_by", self.by);
        query.set("sort", self.sort);
    }
}

fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Filters for listing a project's pipelines. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineFilter {
    pub name: Option<String>,
    pub ref_: Option<String>,
    pub scope: Option<PipelineScope>,
    pub sha: Option<String>,
    pub source: Option<PipelineSource>,
    pub status: Option<PipelineStatus>,
    pub updated_after: Option<DateTime<Utc>>,
    pub updated_before: Option<DateTime<Utc>>,
    pub username: Option<String>,
    pub yaml_errors: Option<bool>,
}

impl QueryGroup for PipelineFilter {
    fn keys(&self) -> &'static [&'static str] {
        &[
            "name",
            "ref",
            "scope",
            "sha",
            "source",
            "status",
            "updated_after",
            "updated_before",
            "username",
            "yaml_errors",
        ]
    }

    fn append_to(&self, query: &mut Query) {
        query.set_opt("name", self.name.as_deref());
        query.set_opt("ref", self.ref_.as_deref());
        query.set_opt("scope", self.scope);
        query.set_opt("sha", self.sha.as_deref());
        query.set_opt("source", self.source);
        query.set_opt("status", self.status);
        query.set_opt("updated_after", self.updated_after.as_ref().map(format_timestamp));
        query.set_opt("updated_before", self.updated_before.as_ref().map(format_timestamp));
        query.set_opt("username", self.username.as_deref());
        query.set_opt("yaml_errors", self.yaml_errors);
    }
}

/// Filters for listing the jobs of one pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineJobFilter {
    pub include_retried: Option<bool>,
    pub scope: Vec<JobScope>,
}

impl QueryGroup for PipelineJobFilter {
    fn keys(&self) -> &'static [&'static str] {
        &["include_retried", "scope"]
    }

    fn append_to(&self, query: &mut Query) {
        query.set_opt("include_retried", self.include_retried);
        query.set_many("scope", &self.scope);
    }
}

/// Filters for listing the bridge (trigger) jobs of one pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeFilter {
    pub scope: Vec<JobScope>,
}

impl QueryGroup for BridgeFilter {
    fn keys(&self) -> &'static [&'static str] {
        &["scope"]
    }

    fn append_to(&self, query: &mut Query) {
        query.set_many("scope", &self.scope);
    }
}
