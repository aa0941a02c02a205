use std::fs;
use std::path::Path;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE};
use reqwest::{Certificate, Client};
use tracing::debug;

use crate::config::settings::SessionConfig;
use crate::error::{Result, SdkError};

/// Shared HTTP transport: one pooled client plus the server's base URL.
#[derive(Debug, Clone)]
pub struct Session {
    pub http: Client,
    pub base_url: String,
}

impl Session {
    pub fn build(server: &str, port: u16, config: &SessionConfig) -> Result<Self> {
        let base_url = format!("{}://{}:{}", config.scheme.as_str(), server, port);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(cookie_file) = &config.cookie {
            let cookies = parse_cookie_file(cookie_file)?;
            if !cookies.is_empty() {
                let value = cookies
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect::<Vec<_>>()
                    .join("; ");
                let value = HeaderValue::from_str(&value)
                    .map_err(|_| SdkError::config("cookie file contains invalid header characters"))?;
                headers.insert(COOKIE, value);
            }
        }

        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .pool_max_idle_per_host(config.max_concurrency)
            .danger_accept_invalid_certs(!config.verify);

        if config.verify {
            if let Some(bundle) = &config.ca_cert_bundle {
                let pem = fs::read(bundle).map_err(|e| {
                    SdkError::config(format!("cannot read CA bundle '{}': {}", bundle.display(), e))
                })?;
                builder = builder.add_root_certificate(Certificate::from_pem(&pem)?);
            }
        }

        debug!(base_url = %base_url, "HTTP session ready");
        Ok(Self { http: builder.build()?, base_url })
    }

    /// Absolute URL for a path starting with '/'.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Read `name=value` pairs from the `#HttpOnly_` lines of a text cookie file.
pub fn parse_cookie_file(path: &Path) -> Result<Vec<(String, String)>> {
    let content = fs::read_to_string(path)
        .map_err(|e| SdkError::config(format!("cannot read cookie file '{}': {}", path.display(), e)))?;

    Ok(content
        .lines()
        .filter(|line| line.starts_with("#HttpOnly_"))
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            match (fields.get(5), fields.get(6)) {
                (Some(name), Some(value)) => Some((name.to_string(), value.to_string())),
                _ => None,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::Scheme;
    use std::io::Write;

    #[test]
    fn base_url_uses_scheme_and_port() {
        let config = SessionConfig { scheme: Scheme::Http, ..SessionConfig::default() };
        let session = Session::build("localhost", 8080, &config).unwrap();
        assert_eq!(session.base_url, "http://localhost:8080");
        assert_eq!(session.url("/api/v1/auth/token"), "http://localhost:8080/api/v1/auth/token");
    }

    #[test]
    fn cookie_file_keeps_http_only_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# Netscape HTTP Cookie File").unwrap();
        writeln!(file, "#HttpOnly_example.com\tFALSE\t/\tTRUE\t0\tAPBALANCEID\taws.usw2.node1").unwrap();
        writeln!(file, "example.com\tFALSE\t/\tTRUE\t0\tplain\tignored").unwrap();

        let cookies = parse_cookie_file(file.path()).unwrap();
        assert_eq!(cookies, vec![("APBALANCEID".to_string(), "aws.usw2.node1".to_string())]);
    }
}
