//! Paginated listings over the Pro API.
//!
//! A [`Paginator`] fetches `start_page` first to learn the total count, then
//! requests every remaining page in one concurrent batch through the client's
//! [`Dispatcher`](crate::dispatch::Dispatcher).

use std::collections::VecDeque;
use std::marker::PhantomData;
use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt};
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::api_client::ApiClient;
use crate::dispatch::{CallArgs, Outcome};
use crate::error::{Result, SdkError};
use crate::models::ApiModel;
use crate::observability::metrics::get_metrics;
use crate::pro_api::expressions::{FilterExpression, SortExpression};
use crate::utils::constants::{DEFAULT_PAGE_SIZE, MAX_LISTING_PAGES};

/// Query keys owned by the paginator itself.
const RESERVED_PARAMS: &[&str] = &["page", "page-size"];

/// Caller-facing paging knobs accepted by the endpoint wrappers.
#[derive(Debug, Clone)]
pub struct PageOptions {
    pub start_page: u32,
    /// inclusive
    pub end_page: Option<u32>,
    pub page_size: u32,
    pub sort: Option<SortExpression>,
    pub filter: Option<FilterExpression>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self { start_page: 0, end_page: None, page_size: DEFAULT_PAGE_SIZE, sort: None, filter: None }
    }
}

#[derive(Debug, Clone)]
pub struct PaginationRequest {
    /// path below `/api`, starting with the API version
    pub resource_path: String,
    pub start_page: u32,
    pub end_page: Option<u32>,
    pub page_size: u32,
    pub sort: Option<SortExpression>,
    pub filter: Option<FilterExpression>,
    pub extra_params: Vec<(String, String)>,
}

impl PaginationRequest {
    pub fn new(resource_path: impl Into<String>) -> Self {
        Self::with_options(resource_path, PageOptions::default())
    }

    pub fn with_options(resource_path: impl Into<String>, options: PageOptions) -> Self {
        Self {
            resource_path: resource_path.into(),
            start_page: options.start_page,
            end_page: options.end_page,
            page_size: options.page_size,
            sort: options.sort,
            filter: options.filter,
            extra_params: Vec::new(),
        }
    }

    pub fn extra_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.push((key.into(), value.into()));
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.resource_path.trim().is_empty() {
            return Err(SdkError::validation("resource path must not be empty"));
        }
        if self.page_size == 0 {
            return Err(SdkError::validation("page size must be greater than 0"));
        }
        if let Some(end) = self.end_page {
            if end < self.start_page {
                return Err(SdkError::validation(format!(
                    "end page {} is before start page {}",
                    end, self.start_page
                )));
            }
        }
        if let Some((key, _)) = self.extra_params.iter().find(|(k, _)| RESERVED_PARAMS.contains(&k.as_str())) {
            return Err(SdkError::validation(format!("'{}' is set by the paginator and cannot be overridden", key)));
        }
        Ok(())
    }

    /// Query string for one page. Extra parameters win over `sort` and `filter`,
    /// never over the paging keys.
    pub fn query_params(&self, page: u32) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_owned(), page.to_string()),
            ("page-size".to_owned(), self.page_size.to_string()),
        ];
        if let Some(sort) = &self.sort {
            params.push(("sort".to_owned(), sort.to_string()));
        }
        if let Some(filter) = &self.filter {
            params.push(("filter".to_owned(), filter.to_string()));
        }
        for (key, value) in &self.extra_params {
            if RESERVED_PARAMS.contains(&key.as_str()) {
                continue;
            }
            params.retain(|(k, _)| k != key);
            params.push((key.clone(), value.clone()));
        }
        params
    }

    /// Server total, capped at the last item of `end_page`.
    pub fn effective_total(&self, total_count: u64) -> u64 {
        match self.end_page {
            Some(end) => total_count.min((u64::from(end) + 1) * u64::from(self.page_size)),
            None => total_count,
        }
    }

    /// Page indexes still to fetch after the probe page returned `probe_count` items.
    ///
    /// Fails when the reported total would need more than [`MAX_LISTING_PAGES`] requests
    /// or page indexes past `u32::MAX`.
    pub fn remaining_pages(&self, total_count: u64, probe_count: usize) -> Result<Vec<u32>> {
        if probe_count == 0 || self.page_size == 0 {
            return Ok(Vec::new());
        }
        let page_size = u64::from(self.page_size);
        let covered = (u64::from(self.start_page) * page_size).saturating_add(probe_count as u64);
        let total = self.effective_total(total_count);
        if total <= covered {
            return Ok(Vec::new());
        }
        let count = (total - covered).div_ceil(page_size);
        let last = u32::try_from(count)
            .ok()
            .filter(|_| count <= MAX_LISTING_PAGES)
            .and_then(|count| self.start_page.checked_add(count))
            .ok_or_else(|| {
                SdkError::validation(format!(
                    "total count {} needs {} more pages of {}, more than a listing may fetch",
                    total_count, count, self.page_size
                ))
            })?;
        Ok((self.start_page + 1..=last).collect())
    }
}

/// One fetched page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub page: u32,
    /// number of items in this page
    pub page_count: usize,
    pub total_count: u64,
    pub results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(rename = "totalCount")]
    total_count: u64,
    #[serde(default)]
    results: Vec<Value>,
}

pub struct Paginator<T> {
    client: ApiClient,
    request: Arc<PaginationRequest>,
    _model: PhantomData<fn() -> T>,
}

impl<T: ApiModel> Paginator<T> {
    /// Fails before any request if the paging parameters are inconsistent.
    pub fn new(client: ApiClient, request: PaginationRequest) -> Result<Self> {
        request.validate()?;
        Ok(Self { client, request: Arc::new(request), _model: PhantomData })
    }

    pub fn request(&self) -> &PaginationRequest {
        &self.request
    }

    pub async fn fetch_page(&self, page: u32) -> Result<Page<T>> {
        fetch_page(&self.client, &self.request, page).await
    }

    /// Every item in `[start_page, end_page]`, in page order.
    ///
    /// A failed page fails the whole call with [`SdkError::IncompleteResults`] instead of
    /// leaving a gap in the list.
    pub async fn collect(self) -> Result<Vec<T>> {
        let probe = self.fetch_page(self.request.start_page).await?;
        let remaining = self.request.remaining_pages(probe.total_count, probe.page_count)?;

        let mut pages = vec![probe];
        let mut failed_pages = Vec::new();
        let mut reason = String::new();
        for outcome in dispatch_pages::<T>(&self.client, &self.request, &remaining, Some(true)).await {
            match outcome {
                Outcome::Success(page) => pages.push(page),
                Outcome::Failure(failure) => {
                    if failed_pages.is_empty() {
                        reason = failure.error.to_string();
                    }
                    failed_pages.push(remaining[failure.index]);
                }
            }
        }
        if !failed_pages.is_empty() {
            return Err(SdkError::IncompleteResults { failed_pages, reason });
        }

        pages.sort_by_key(|p| p.page);
        Ok(pages.into_iter().flat_map(|p| p.results).collect())
    }

    /// Lazy, single-pass stream of pages: the probe page first, then the rest of the batch.
    ///
    /// Failed pages surface as `Err` items when the client returns exceptions, and are
    /// skipped otherwise.
    pub fn pages(self) -> BoxStream<'static, Result<Page<T>>> {
        let Paginator { client, request, .. } = self;
        stream::unfold(Stage::Probe, move |stage| {
            let client = client.clone();
            let request = request.clone();
            async move {
                let mut stage = stage;
                loop {
                    match stage {
                        Stage::Probe => {
                            return match fetch_page::<T>(&client, &request, request.start_page).await {
                                Ok(probe) => match request.remaining_pages(probe.total_count, probe.page_count) {
                                    Ok(remaining) => Some((Ok(probe), Stage::Dispatch(remaining))),
                                    Err(e) => Some((Err(e), Stage::Done)),
                                },
                                Err(e) => Some((Err(e), Stage::Done)),
                            };
                        }
                        Stage::Dispatch(pages) => {
                            if pages.is_empty() {
                                return None;
                            }
                            let outcomes = dispatch_pages::<T>(&client, &request, &pages, None).await;
                            stage = Stage::Drain(outcomes.into_iter().map(Outcome::into_result).collect());
                        }
                        Stage::Drain(mut queue) => {
                            return queue.pop_front().map(|item| (item, Stage::Drain(queue)));
                        }
                        Stage::Done => return None,
                    }
                }
            }
        })
        .boxed()
    }
}

enum Stage<T> {
    Probe,
    Dispatch(Vec<u32>),
    Drain(VecDeque<Result<Page<T>>>),
    Done,
}

async fn fetch_page<T: ApiModel>(client: &ApiClient, request: &PaginationRequest, page: u32) -> Result<Page<T>> {
    let query = request.query_params(page);
    let response = client
        .pro_api_request(Method::GET, &request.resource_path, Some(&query), None, None)
        .await?;
    let raw: RawPage = response.json()?;
    let results = raw.results.into_iter().map(T::parse).collect::<Result<Vec<_>>>()?;

    get_metrics().await.pagination_pages.inc();
    debug!(path = %request.resource_path, page, items = results.len(), total = raw.total_count, "page fetched");
    Ok(Page { page, page_count: results.len(), total_count: raw.total_count, results })
}

async fn dispatch_pages<T: ApiModel>(
    client: &ApiClient,
    request: &Arc<PaginationRequest>,
    pages: &[u32],
    return_exceptions: Option<bool>,
) -> Vec<Outcome<Page<T>>> {
    if pages.is_empty() {
        return Vec::new();
    }
    let handler_client = client.clone();
    let handler_request = request.clone();
    let arguments = pages.iter().map(|page| CallArgs::Single(*page)).collect();

    client
        .dispatcher()
        .dispatch(
            move |args: CallArgs<u32>| {
                let client = handler_client.clone();
                let request = handler_request.clone();
                async move {
                    let page = page_argument(args)?;
                    fetch_page::<T>(&client, &request, page).await
                }
            },
            arguments,
            None,
            return_exceptions,
        )
        .await
}

fn page_argument(args: CallArgs<u32>) -> Result<u32> {
    match args {
        CallArgs::Single(page) => Ok(page),
        CallArgs::Named(named) => named
            .get("page")
            .and_then(Value::as_u64)
            .and_then(|page| u32::try_from(page).ok())
            .ok_or_else(|| {
                warn!(args = ?named, "paged call without a usable 'page' argument");
                SdkError::validation("missing 'page' argument")
            }),
    }
}
