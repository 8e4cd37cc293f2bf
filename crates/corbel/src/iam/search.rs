//! Paged resource search.
//!
//! The platform exposes search through `api:` query parameters: a JSON
//! query expression, a zero-based page number, a page size, and an optional
//! sort. [`Search`] builds those parameters and fetches one page at a time.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;

use crate::client::Client;
use crate::error::Error;
use crate::http::endpoints::IAM;

/// Default number of results per page.
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Sort direction for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// A paged search over a platform resource collection.
///
/// Built from [`Client::user_search`] or [`Client::group_search`]; chain
/// conditions, then call [`Search::page`] for each page of results.
#[derive(Debug)]
pub struct Search<'a, T> {
    client: &'a Client,
    resource: &'static str,
    eq: BTreeMap<String, String>,
    like: BTreeMap<String, String>,
    page_size: u32,
    sort: Option<(String, SortOrder)>,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T> Search<'a, T> {
    pub(crate) fn new(client: &'a Client, resource: &'static str) -> Self {
        Self {
            client,
            resource,
            eq: BTreeMap::new(),
            like: BTreeMap::new(),
            page_size: DEFAULT_PAGE_SIZE,
            sort: None,
            _marker: PhantomData,
        }
    }

    /// Require a field to equal a value.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.eq.insert(field.into(), value.into());
        self
    }

    /// Require a field to match a pattern.
    pub fn like(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.like.insert(field.into(), value.into());
        self
    }

    /// Set the number of results per page (default 10).
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Sort results by a field.
    pub fn sort_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some((field.into(), order));
        self
    }

    /// Build the `api:` query parameters for one page.
    fn query_params(&self, page: u32) -> Vec<(String, String)> {
        let mut params = Vec::new();

        let mut conditions: Vec<Value> = Vec::new();
        if !self.eq.is_empty() {
            conditions.push(json!({ "$eq": self.eq }));
        }
        if !self.like.is_empty() {
            conditions.push(json!({ "$like": self.like }));
        }
        if !conditions.is_empty() {
            params.push((
                "api:query".to_string(),
                Value::Array(conditions).to_string(),
            ));
        }

        params.push(("api:page".to_string(), page.to_string()));
        params.push(("api:pageSize".to_string(), self.page_size.to_string()));

        if let Some((field, order)) = &self.sort {
            params.push((
                "api:sort".to_string(),
                json!({ field: order.as_str() }).to_string(),
            ));
        }

        params
    }
}

impl<'a, T: DeserializeOwned> Search<'a, T> {
    /// Fetch one page of results (zero-based).
    pub async fn page(&self, page: u32) -> Result<Vec<T>, Error> {
        debug!(resource = self.resource, page, "Searching");

        let token = self.client.bearer_token().await?;
        let params = self.query_params(page);
        self.client
            .http()
            .query_authed(IAM, self.resource, &params, &token)
            .await
    }
}
