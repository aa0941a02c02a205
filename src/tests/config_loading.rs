#[cfg(test)]
mod tests {

    use std::io::Write;

    use serial_test::serial;
    use tempfile::NamedTempFile;

    use crate::auth::provider::CredentialsKind;
    use crate::config::client::{CredentialsConfig, SecretValue};
    use crate::config::loader::{file_to_config, parse_config};
    use crate::config::settings::{LogFormat, Scheme};
    use crate::error::SdkError;

    fn write_yaml(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn full_config_file_is_loaded() {
        let file = write_yaml(
            r#"
server: example.devicecloud.test
port: 8443
credentials:
  type: api_client
  client_id: { value: "abc" }
  client_secret: { value: "s3cr3t" }
session:
  timeout: 30
  max_retries: 2
  max_concurrency: 10
  return_exceptions: false
  retry:
    base_delay_ms: 100
    max_delay_ms: 800
logging:
  level: debug
  format: json
"#,
        );

        let config = file_to_config(file.path()).unwrap();
        assert_eq!(config.server, "example.devicecloud.test");
        assert_eq!(config.port, 8443);
        assert_eq!(config.session.timeout, Some(30));
        assert_eq!(config.session.max_retries, 2);
        assert_eq!(config.session.max_concurrency, 10);
        assert!(!config.session.return_exceptions);
        assert_eq!(config.session.scheme, Scheme::Https);
        assert!(config.session.verify);

        let logging = config.logging.as_ref().unwrap();
        assert_eq!(logging.level, "debug");
        assert_eq!(logging.format, LogFormat::Json);

        let client = config.build_client().unwrap();
        assert_eq!(client.base_server_url(), "https://example.devicecloud.test:8443");
        assert!(matches!(client.credentials().kind(), CredentialsKind::ApiClient(_)));
        assert!(client.credentials().is_attached());
        assert_eq!(client.dispatcher().max_concurrency(), 10);
    }

    #[test]
    fn minimal_config_gets_defaults() {
        let config = parse_config(
            r#"
server: jss.example.test
credentials:
  type: basic
  username: { value: "admin" }
  password: { value: "pw" }
"#,
        )
        .unwrap();

        assert_eq!(config.port, 443);
        assert_eq!(config.session.max_concurrency, 5);
        assert_eq!(config.session.max_retries, 0);
        assert!(config.session.return_exceptions);
        assert!(config.session.user_agent.starts_with("DeviceCloudSDK/"));
        assert_eq!(config.logging.unwrap().level, "info");
    }

    #[test]
    #[serial]
    fn env_placeholders_are_expanded() {
        std::env::set_var("DEVICE_CLOUD_TEST_SERVER", "from-env.example.test");
        let file = write_yaml(
            r#"
server: ${DEVICE_CLOUD_TEST_SERVER}
port: ${DEVICE_CLOUD_TEST_PORT_UNSET:9443}
credentials:
  type: basic
  username: { value: "admin" }
  password: { value: "pw" }
"#,
        );

        let config = file_to_config(file.path()).unwrap();
        std::env::remove_var("DEVICE_CLOUD_TEST_SERVER");

        assert_eq!(config.server, "from-env.example.test");
        assert_eq!(config.port, 9443);
    }

    #[test]
    #[serial]
    fn secrets_resolve_from_env_and_file() {
        std::env::set_var("DEVICE_CLOUD_TEST_CLIENT_ID", "id-from-env");
        let mut secret_file = NamedTempFile::new().unwrap();
        writeln!(secret_file, "secret-from-file").unwrap();

        let credentials = CredentialsConfig::ApiClient {
            client_id: SecretValue::FromEnv { from_env: "DEVICE_CLOUD_TEST_CLIENT_ID".into() },
            client_secret: SecretValue::FromFile { path: secret_file.path().display().to_string() },
        };
        let provider = credentials.into_provider().unwrap();
        std::env::remove_var("DEVICE_CLOUD_TEST_CLIENT_ID");

        match provider.kind() {
            CredentialsKind::ApiClient(c) => assert_eq!(c.client_id, "id-from-env"),
            other => panic!("unexpected credentials {other:?}"),
        }
        assert_eq!(SecretValue::FromFile { path: secret_file.path().display().to_string() }.resolve().unwrap(), "secret-from-file");
    }

    #[test]
    #[serial]
    fn missing_env_secret_is_a_credentials_error() {
        std::env::remove_var("DEVICE_CLOUD_TEST_MISSING");
        let secret = SecretValue::FromEnv { from_env: "DEVICE_CLOUD_TEST_MISSING".into() };
        assert!(matches!(secret.resolve(), Err(SdkError::Credentials(_))));
    }

    #[test]
    fn invalid_config_reports_every_problem() {
        let err = parse_config(
            r#"
server: "https://with-scheme.example.test"
port: 0
credentials:
  type: basic
  username: { value: "" }
  password: { value: "pw" }
session:
  max_concurrency: 0
  retry:
    base_delay_ms: 500
    max_delay_ms: 100
logging:
  level: loud
"#,
        )
        .unwrap_err();

        let message = match err {
            SdkError::Config(message) => message,
            other => panic!("unexpected error {other:?}"),
        };
        for expected in ["server", "port", "max_concurrency", "max_delay_ms", "username", "logging.level"] {
            assert!(message.contains(expected), "missing '{}' in: {}", expected, message);
        }
    }

    #[test]
    fn malformed_yaml_is_a_config_error() {
        assert!(matches!(parse_config("server: [unterminated"), Err(SdkError::Config(_))));
    }

    #[test]
    fn unknown_credentials_type_is_rejected() {
        let result = parse_config(
            r#"
server: jss.example.test
credentials:
  type: kerberos
"#,
        );
        assert!(matches!(result, Err(SdkError::Config(_))));
    }
}
