use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use tracing::info;
use std::sync::Arc;
use tokio::sync::OnceCell;


// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE.get_or_init(|| async {
        info!("Initializing Metrics ...");
        Metrics::new()}
    ).await
}

/// Render every registered metric in the prometheus text format.
pub async fn gather() -> String {
    let metrics = get_metrics().await;
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if encoder.encode(&metrics.registry.gather(), &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}


#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Request metrics
    pub api_requests: IntCounterVec,
    pub api_request_duration: HistogramVec,
    pub api_request_retries: IntCounterVec,

    // Token metrics
    pub token_requests: IntCounterVec,
    pub token_request_failures: IntCounterVec,

    // Dispatch / pagination metrics
    pub dispatch_calls: IntCounterVec,
    pub pagination_pages: IntCounter,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("devicecloud".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            // Requests
            api_requests: IntCounterVec::new(Opts::new("api_requests_total", "Requests by api, method and status"),&["api", "method", "status"],).unwrap(),
            api_request_duration: HistogramVec::new(HistogramOpts::new("api_request_duration_seconds", "Request duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 15.0]),&["api"],).unwrap(),
            api_request_retries: IntCounterVec::new(Opts::new("api_request_retries_total", "Transport retries by api and method"),&["api", "method"],).unwrap(),

            // Tokens
            token_requests: IntCounterVec::new(Opts::new("token_requests_total", "Token lookups by kind and action"),&["kind", "action"],).unwrap(),
            token_request_failures: IntCounterVec::new(Opts::new("token_request_failures_total", "Failed token requests by kind"),&["kind"],).unwrap(),

            // Dispatch
            dispatch_calls: IntCounterVec::new(Opts::new("dispatch_calls_total", "Dispatched calls by outcome"),&["outcome"],).unwrap(),
            pagination_pages: IntCounter::new("pagination_pages_total", "Pages fetched by paginators").unwrap(),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.api_requests.clone())).unwrap();
        reg.register(Box::new(metrics.api_request_duration.clone())).unwrap();
        reg.register(Box::new(metrics.api_request_retries.clone())).unwrap();
        reg.register(Box::new(metrics.token_requests.clone())).unwrap();
        reg.register(Box::new(metrics.token_request_failures.clone())).unwrap();
        reg.register(Box::new(metrics.dispatch_calls.clone())).unwrap();
        reg.register(Box::new(metrics.pagination_pages.clone())).unwrap();

        metrics
    }
}
