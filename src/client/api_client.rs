use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use serde_json::Value;
use tracing::{error, info};

use crate::auth::provider::CredentialsProvider;
use crate::auth::token::AccessToken;
use crate::classic_api::ClassicApi;
use crate::client::response::ApiResponse;
use crate::client::session::Session;
use crate::config::settings::SessionConfig;
use crate::dispatch::Dispatcher;
use crate::error::{Result, SdkError};
use crate::observability::metrics::get_metrics;
use crate::pro_api::ProApi;
use crate::resilience::retry::RetrySettings;
use crate::utils::constants::{CLASSIC_API_PREFIX, PRO_API_PREFIX};

enum RequestBody<'a> {
    Xml(&'a str),
    Json(&'a Value),
}

struct ClientInner {
    server: String,
    port: u16,
    session: Session,
    credentials: CredentialsProvider,
    config: SessionConfig,
    retry: RetrySettings,
}

/// Entry point of the SDK. Cheap to clone; clones share the session and the token cache.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.session.base_url)
            .field("credentials", self.inner.credentials.kind())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(server: &str, port: u16, credentials: CredentialsProvider, config: SessionConfig) -> Result<Self> {
        let session = Session::build(server, port, &config)?;
        credentials.attach_session(session.clone());
        info!(server, port, "API client initialized");

        Ok(Self {
            inner: Arc::new(ClientInner {
                server: server.to_owned(),
                port,
                session,
                credentials,
                retry: RetrySettings::from_session(&config),
                config,
            }),
        })
    }

    pub fn server(&self) -> &str {
        &self.inner.server
    }

    pub fn port(&self) -> u16 {
        self.inner.port
    }

    pub fn base_server_url(&self) -> &str {
        &self.inner.session.base_url
    }

    pub fn session_config(&self) -> &SessionConfig {
        &self.inner.config
    }

    pub fn credentials(&self) -> &CredentialsProvider {
        &self.inner.credentials
    }

    pub async fn get_access_token(&self) -> Result<AccessToken> {
        self.inner.credentials.get_access_token().await
    }

    /// A dispatcher bounded by this client's `max_concurrency`.
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.inner.config.max_concurrency, self.inner.config.return_exceptions)
    }

    pub fn classic_api(&self) -> ClassicApi {
        ClassicApi::new(self.clone())
    }

    pub fn pro_api(&self) -> ProApi {
        ProApi::new(self.clone())
    }

    /// Send a request to `/JSSResource/<resource_path>`. String `data` is sent as XML.
    pub async fn classic_api_request(
        &self,
        method: Method,
        resource_path: &str,
        data: Option<&str>,
        override_headers: Option<&HashMap<String, String>>,
    ) -> Result<ApiResponse> {
        let url = self.api_url(CLASSIC_API_PREFIX, resource_path);
        let body = data.filter(|_| method == Method::POST || method == Method::PUT).map(RequestBody::Xml);
        info!(method = %method, path = resource_path, "ClassicAPIRequest");
        self.execute("classic", method, url, &[], body, override_headers).await
    }

    /// Send a request to `/api/<resource_path>`. JSON `data` is sent on POST, PUT and PATCH.
    pub async fn pro_api_request(
        &self,
        method: Method,
        resource_path: &str,
        query: Option<&[(String, String)]>,
        data: Option<&Value>,
        override_headers: Option<&HashMap<String, String>>,
    ) -> Result<ApiResponse> {
        let url = self.api_url(PRO_API_PREFIX, resource_path);
        let body = data
            .filter(|_| method == Method::POST || method == Method::PUT || method == Method::PATCH)
            .map(RequestBody::Json);
        info!(method = %method, path = resource_path, "ProAPIRequest");
        self.execute("pro", method, url, query.unwrap_or(&[]), body, override_headers).await
    }

    fn api_url(&self, prefix: &str, resource_path: &str) -> String {
        self.inner
            .session
            .url(&format!("/{}/{}", prefix, resource_path.trim_start_matches('/')))
    }

    async fn execute(
        &self,
        api: &'static str,
        method: Method,
        url: String,
        query: &[(String, String)],
        body: Option<RequestBody<'_>>,
        override_headers: Option<&HashMap<String, String>>,
    ) -> Result<ApiResponse> {
        let headers = match override_headers {
            Some(overrides) => to_header_map(overrides)?,
            None => HeaderMap::new(),
        };
        let token = self.inner.credentials.get_token().await?;
        let resend_on_timeout = is_idempotent(&method);
        let started = Instant::now();
        let mut attempts: u32 = 0;

        let result = self
            .inner
            .retry
            .run_with_retry(
                || {
                    attempts += 1;
                    let mut request = self
                        .inner
                        .session
                        .http
                        .request(method.clone(), &url)
                        .headers(headers.clone())
                        .bearer_auth(&token);
                    if !query.is_empty() {
                        request = request.query(query);
                    }
                    if let Some(secs) = self.inner.config.timeout {
                        request = request.timeout(Duration::from_secs(secs));
                    }
                    request = match &body {
                        Some(RequestBody::Xml(xml)) => request
                            .header(CONTENT_TYPE, "text/xml")
                            .body(xml.to_string()),
                        Some(RequestBody::Json(value)) => request.json(value),
                        None => request,
                    };
                    send(request)
                },
                |err| is_transient(err, resend_on_timeout),
            )
            .await;

        let metrics = get_metrics().await;
        if attempts > 1 {
            metrics
                .api_request_retries
                .with_label_values(&[api, method.as_str()])
                .inc_by(u64::from(attempts - 1));
        }
        metrics
            .api_request_duration
            .with_label_values(&[api])
            .observe(started.elapsed().as_secs_f64());
        let status = match &result {
            Ok(response) => response.status.as_u16().to_string(),
            Err(_) => "error".to_owned(),
        };
        metrics
            .api_requests
            .with_label_values(&[api, method.as_str(), status.as_str()])
            .inc();

        let response = result?;
        if !response.is_success() {
            error!(status = %response.status, url = %response.url, body = %response.text(), "request failed");
        }
        response.error_for_status()
    }
}

async fn send(request: RequestBuilder) -> Result<ApiResponse> {
    ApiResponse::read(request.send().await?).await
}

/// A timed out request may already have been processed, so only idempotent
/// methods are sent again after a timeout. Connect failures never reached the server.
fn is_transient(err: &SdkError, resend_on_timeout: bool) -> bool {
    matches!(err, SdkError::Transport(e) if e.is_connect() || (resend_on_timeout && e.is_timeout()))
}

fn is_idempotent(method: &Method) -> bool {
    !matches!(*method, Method::POST | Method::PATCH)
}

/// Caller headers, minus the ones the client always sets itself.
fn to_header_map(overrides: &HashMap<String, String>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in overrides {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| SdkError::validation(format!("invalid header name '{}'", name)))?;
        if name == AUTHORIZATION || name == CONTENT_TYPE {
            continue;
        }
        let value = HeaderValue::from_str(value)
            .map_err(|_| SdkError::validation(format!("invalid value for header '{}'", name)))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_headers_are_dropped() {
        let overrides = HashMap::from([
            ("authorization".to_string(), "Basic abc".to_string()),
            ("Content-Type".to_string(), "application/xml".to_string()),
            ("X-Custom".to_string(), "1".to_string()),
        ]);
        let headers = to_header_map(&overrides).unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("x-custom").unwrap(), "1");
    }

    #[test]
    fn post_and_patch_are_not_resent_after_timeouts() {
        assert!(!is_idempotent(&Method::POST));
        assert!(!is_idempotent(&Method::PATCH));
        assert!(is_idempotent(&Method::GET));
        assert!(is_idempotent(&Method::PUT));
        assert!(is_idempotent(&Method::DELETE));
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let overrides = HashMap::from([("bad header".to_string(), "1".to_string())]);
        assert!(matches!(to_header_map(&overrides), Err(SdkError::Validation(_))));
    }
}
