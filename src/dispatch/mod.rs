//! Concurrent request dispatcher.
//!
//! Fans a handler out over a list of argument sets on the tokio runtime, with
//! a semaphore bounding how many calls are in flight. The dispatcher waits for
//! every call before returning and reports results in argument order, never in
//! completion order.

use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use serde_json::{Map, Value};
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::client::response::ApiResponse;
use crate::error::{Result, SdkError};
use crate::models::ApiModel;
use crate::observability::metrics::get_metrics;

/// Arguments for one dispatched call.
#[derive(Debug, Clone)]
pub enum CallArgs<A> {
    Single(A),
    Named(Map<String, Value>),
}

/// What a handler hands back: an already built model or a raw response still to be parsed.
#[derive(Debug)]
pub enum Reply<M> {
    Model(M),
    Raw(ApiResponse),
}

impl<M: ApiModel> Reply<M> {
    pub fn into_model(self) -> Result<M> {
        match self {
            Reply::Model(model) => Ok(model),
            Reply::Raw(response) => M::from_response(&response),
        }
    }
}

#[derive(Debug)]
pub struct CallFailure {
    /// position of the failed call in the argument list
    pub index: usize,
    pub error: SdkError,
}

#[derive(Debug)]
pub enum Outcome<T> {
    Success(T),
    Failure(CallFailure),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn into_result(self) -> Result<T> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(failure) => Err(failure.error),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    max_concurrency: usize,
    return_exceptions: bool,
}

impl Dispatcher {
    /// `max_concurrency` is a ceiling no caller override can exceed.
    pub fn new(max_concurrency: usize, return_exceptions: bool) -> Self {
        Self { max_concurrency: max_concurrency.max(1), return_exceptions }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    pub fn effective_concurrency(&self, requested: Option<usize>) -> usize {
        match requested {
            Some(n) if n > 0 => n.min(self.max_concurrency),
            _ => self.max_concurrency,
        }
    }

    /// Run `handler` once per argument set and wait for all of them.
    ///
    /// With `return_exceptions` (defaulting to the dispatcher setting) every call yields an
    /// [`Outcome`] at its argument's position. Without it failed calls are dropped, so the
    /// output can be shorter than the input.
    pub async fn dispatch<A, R, F, Fut>(
        &self,
        handler: F,
        arguments: Vec<CallArgs<A>>,
        max_concurrency: Option<usize>,
        return_exceptions: Option<bool>,
    ) -> Vec<Outcome<R>>
    where
        A: Send + 'static,
        R: Send + 'static,
        F: Fn(CallArgs<A>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R>> + Send + 'static,
    {
        let limit = self.effective_concurrency(max_concurrency);
        let return_exceptions = return_exceptions.unwrap_or(self.return_exceptions);
        let semaphore = Arc::new(Semaphore::new(limit));
        let handler = Arc::new(handler);

        info!(calls = arguments.len(), max_concurrency = limit, "ConcurrentAPIRequest");
        let handles: Vec<_> = arguments
            .into_iter()
            .map(|args| {
                let semaphore = semaphore.clone();
                let handler = handler.clone();
                tokio::spawn(async move {
                    let _permit = semaphore
                        .acquire_owned()
                        .await
                        .map_err(|e| SdkError::Dispatch(e.to_string()))?;
                    handler(args).await
                })
            })
            .collect();

        let joined = join_all(handles).await;

        let metrics = get_metrics().await;
        let mut outcomes = Vec::with_capacity(joined.len());
        for (index, result) in joined.into_iter().enumerate() {
            let result = result.unwrap_or_else(|e| Err(SdkError::Dispatch(e.to_string())));
            match result {
                Ok(value) => {
                    metrics.dispatch_calls.with_label_values(&["success"]).inc();
                    outcomes.push(Outcome::Success(value));
                }
                Err(error) => {
                    metrics.dispatch_calls.with_label_values(&["failure"]).inc();
                    warn!(index, error = %error, "concurrent call failed");
                    if return_exceptions {
                        outcomes.push(Outcome::Failure(CallFailure { index, error }));
                    }
                }
            }
        }
        outcomes
    }

    /// Like [`dispatch`](Self::dispatch), turning raw responses into `M`.
    pub async fn dispatch_models<A, M, F, Fut>(
        &self,
        handler: F,
        arguments: Vec<CallArgs<A>>,
        max_concurrency: Option<usize>,
        return_exceptions: Option<bool>,
    ) -> Vec<Outcome<M>>
    where
        A: Send + 'static,
        M: ApiModel,
        F: Fn(CallArgs<A>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Reply<M>>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        self.dispatch(
            move |args| {
                let handler = handler.clone();
                async move { handler(args).await?.into_model() }
            },
            arguments,
            max_concurrency,
            return_exceptions,
        )
        .await
    }
}
