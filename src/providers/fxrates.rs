use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::config::RatesProviderConfig;
use crate::core::rates::{FetchError, RateProvider, RateSnapshot};

/// Fetches the latest rate table from an fxratesapi-compatible endpoint.
pub struct FxRatesProvider {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl FxRatesProvider {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Self {
        FxRatesProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout,
        }
    }

    pub fn from_config(config: &RatesProviderConfig) -> Self {
        Self::new(
            &config.base_url,
            config.resolved_api_key(),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[derive(Debug, Deserialize)]
struct FxRatesResponse {
    #[serde(default)]
    success: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    description: Option<String>,
    #[serde(flatten)]
    snapshot: RateSnapshot,
}

/// JSON truthiness: `null`, `false`, `0` and empty strings, arrays or objects are false.
fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

impl FxRatesResponse {
    fn succeeded(&self) -> bool {
        self.success.as_ref().is_some_and(is_truthy)
    }

    fn failure_reason(&self) -> Option<String> {
        self.description.clone().or_else(|| {
            self.error.as_ref().map(|e| match e {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
        })
    }
}

#[async_trait]
impl RateProvider for FxRatesProvider {
    #[instrument(name = "FxRatesFetch", skip(self), fields(base_url = %self.base_url))]
    async fn fetch_rates(&self) -> Result<RateSnapshot, FetchError> {
        let url = format!("{}/latest", self.base_url);
        debug!("Requesting exchange rates from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("fxconv/0.1")
            .timeout(self.timeout)
            .build()?;

        let mut request = client.get(&url).header("Accept", "application/json");
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        } else {
            debug!("No API key configured, sending anonymous request");
        }

        let response = request.send().await?;
        debug!(status = %response.status(), "Received rates response");

        if !response.status().is_success() {
            return Err(FetchError::Http(response.status()));
        }

        let text = response.text().await?;
        let data: FxRatesResponse = serde_json::from_str(&text)?;

        if !data.succeeded() {
            return Err(FetchError::Unsuccessful(data.failure_reason()));
        }

        debug!(
            base = %data.snapshot.base,
            count = data.snapshot.rates.len(),
            "Parsed exchange rates"
        );
        Ok(data.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn provider(uri: &str) -> FxRatesProvider {
        FxRatesProvider::new(uri, None, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_successful_rates_fetch() {
        let mock_response = r#"{
            "success": true,
            "base": "USD",
            "date": "2024-05-01T10:00:00.000Z",
            "timestamp": 1714557600,
            "rates": {"EUR": 0.93, "GBP": 0.8, "JPY": 157.5}
        }"#;
        let mock_server = create_mock_server(200, mock_response).await;

        let snapshot = provider(&mock_server.uri()).fetch_rates().await.unwrap();
        assert_eq!(snapshot.base, "USD");
        assert_eq!(snapshot.rates.len(), 3);
        assert_eq!(snapshot.rates["EUR"], 0.93);
        assert_eq!(snapshot.timestamp, Some(1714557600));
        assert_eq!(snapshot.date.as_deref(), Some("2024-05-01T10:00:00.000Z"));
    }

    #[tokio::test]
    async fn test_missing_base_and_rates_default() {
        let mock_server = create_mock_server(200, r#"{"success": true}"#).await;

        let snapshot = provider(&mock_server.uri()).fetch_rates().await.unwrap();
        assert_eq!(snapshot.base, "USD");
        assert!(snapshot.rates.is_empty());
    }

    #[tokio::test]
    async fn test_api_key_sent_as_bearer_token() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"success": true, "rates": {"EUR": 0.9}}"#),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = FxRatesProvider::new(
            &mock_server.uri(),
            Some("test-key".to_string()),
            Duration::from_secs(5),
        );
        let snapshot = provider.fetch_rates().await.unwrap();
        assert_eq!(snapshot.rates["EUR"], 0.9);
    }

    #[tokio::test]
    async fn test_success_false_is_unsuccessful() {
        let mock_response = r#"{
            "success": false,
            "error": "invalid_key",
            "description": "The API key is invalid"
        }"#;
        let mock_server = create_mock_server(200, mock_response).await;

        let result = provider(&mock_server.uri()).fetch_rates().await;
        match result {
            Err(FetchError::Unsuccessful(reason)) => {
                assert_eq!(reason.as_deref(), Some("The API key is invalid"));
            }
            other => panic!("Expected unsuccessful fetch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_success_flag_is_unsuccessful() {
        let mock_server = create_mock_server(200, r#"{"rates": {"EUR": 0.9}}"#).await;

        let result = provider(&mock_server.uri()).fetch_rates().await;
        assert!(matches!(result, Err(FetchError::Unsuccessful(None))));
        assert_eq!(result.unwrap_err().to_string(), "Fetch unsuccessful");
    }

    #[tokio::test]
    async fn test_truthy_success_flag_is_accepted() {
        let mock_server =
            create_mock_server(200, r#"{"success": 1, "rates": {"EUR": 0.9}}"#).await;

        let snapshot = provider(&mock_server.uri()).fetch_rates().await.unwrap();
        assert_eq!(snapshot.rates["EUR"], 0.9);
    }

    #[tokio::test]
    async fn test_falsy_success_flag_is_unsuccessful() {
        for body in [
            r#"{"success": 0, "rates": {"EUR": 0.9}}"#,
            r#"{"success": "", "rates": {"EUR": 0.9}}"#,
            r#"{"success": null, "rates": {"EUR": 0.9}}"#,
        ] {
            let mock_server = create_mock_server(200, body).await;
            let result = provider(&mock_server.uri()).fetch_rates().await;
            assert!(
                matches!(result, Err(FetchError::Unsuccessful(None))),
                "{body} gave {result:?}"
            );
        }
    }

    #[test]
    fn test_is_truthy() {
        use serde_json::json;
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(2.5)));
        assert!(is_truthy(&json!("ok")));
        assert!(is_truthy(&json!([0])));
        assert!(is_truthy(&json!({"a": 1})));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"success": true}"#)
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&mock_server)
            .await;

        let provider = FxRatesProvider::new(&mock_server.uri(), None, Duration::from_millis(300));
        let started = std::time::Instant::now();
        let result = provider.fetch_rates().await;

        match result {
            Err(FetchError::Network(e)) => assert!(e.is_timeout(), "Expected timeout, got {e}"),
            other => panic!("Expected network timeout, got {other:?}"),
        }
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_http_error_response() {
        let mock_server = create_mock_server(500, "").await;

        let result = provider(&mock_server.uri()).fetch_rates().await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 500 Internal Server Error"
        );
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_server = create_mock_server(200, "<html>not json</html>").await;

        let result = provider(&mock_server.uri()).fetch_rates().await;
        assert!(matches!(result, Err(FetchError::Decode(_))));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse rates response")
        );
    }

    #[tokio::test]
    async fn test_network_error() {
        // Nothing listens on the discard port.
        let provider = provider("http://127.0.0.1:9");
        let result = provider.fetch_rates().await;
        assert!(matches!(result, Err(FetchError::Network(_))));
    }

    #[test]
    fn test_from_config_trims_trailing_slash() {
        let config = RatesProviderConfig {
            base_url: "http://example.com/fx/".to_string(),
            ..Default::default()
        };
        let provider = FxRatesProvider::from_config(&config);
        assert_eq!(provider.base_url, "http://example.com/fx");
        assert_eq!(provider.timeout, Duration::from_secs(30));
    }
}
