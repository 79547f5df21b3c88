use crate::core::{CurrencyKey, IndicatorProvider, IndicatorSeries};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Reads indicator series from the mindicador.cl REST API (`{base_url}/api/{key}`).
pub struct MindicadorProvider {
    base_url: String,
    client: reqwest::Client,
}

impl MindicadorProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("cambio/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn endpoint(&self, key: CurrencyKey) -> String {
        format!("{}/api/{}", self.base_url, key)
    }
}

#[async_trait]
impl IndicatorProvider for MindicadorProvider {
    #[instrument(name = "MindicadorFetch", skip(self), fields(key = %key))]
    async fn fetch_series(&self, key: CurrencyKey) -> Result<IndicatorSeries> {
        let url = self.endpoint(key);
        debug!("Requesting indicator from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for {} URL: {}", e, key, url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Error fetching {}: {}", url, status));
        }

        let response_text = response
            .text()
            .await
            .with_context(|| format!("Failed to get response text for {key}"))?;

        let series: IndicatorSeries = serde_json::from_str(&response_text).with_context(|| {
            format!("Failed to parse mindicador response for {key}. Response: '{response_text}'")
        })?;

        debug!(
            points = series.points().len(),
            latest = ?series.latest_value(),
            "Received indicator series"
        );
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(key: &str, status_code: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/api/{key}")))
            .respond_with(ResponseTemplate::new(status_code).set_body_string(body))
            .mount(&mock_server)
            .await;
        mock_server
    }

    const MOCK_JSON: &str = r#"{
        "version": "1.7.0",
        "autor": "mindicador.cl",
        "codigo": "dolar",
        "nombre": "Dólar observado",
        "unidad_medida": "Pesos",
        "serie": [
            {"fecha": "2025-01-03T03:00:00.000Z", "valor": 990.45},
            {"fecha": "2025-01-02T03:00:00.000Z", "valor": 994.11}
        ]
    }"#;

    #[tokio::test]
    async fn test_fetch_series() {
        let mock_server = create_mock_server("dolar", 200, MOCK_JSON).await;
        let provider = MindicadorProvider::new(&mock_server.uri()).unwrap();

        let series = provider.fetch_series(CurrencyKey::Dolar).await.unwrap();

        assert_eq!(series.latest_value(), Some(990.45));
        assert_eq!(series.points()[1].date, "2025-01-02T03:00:00.000Z");
    }

    #[tokio::test]
    async fn test_fetch_series_without_serie_field() {
        let mock_server = create_mock_server("uf", 200, r#"{"codigo": "uf"}"#).await;
        let provider = MindicadorProvider::new(&mock_server.uri()).unwrap();

        let series = provider.fetch_series(CurrencyKey::Uf).await.unwrap();
        assert_eq!(series.latest_value(), None);
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let mock_server = create_mock_server("euro", 500, "oops").await;
        let provider = MindicadorProvider::new(&mock_server.uri()).unwrap();

        let err = provider.fetch_series(CurrencyKey::Euro).await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_reported() {
        let mock_server = create_mock_server("utm", 200, "<html>maintenance</html>").await;
        let provider = MindicadorProvider::new(&mock_server.uri()).unwrap();

        let err = provider.fetch_series(CurrencyKey::Utm).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse mindicador response for utm"));
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let provider = MindicadorProvider::new("https://mindicador.cl/").unwrap();
        assert_eq!(
            provider.endpoint(CurrencyKey::Bitcoin),
            "https://mindicador.cl/api/bitcoin"
        );
    }
}
