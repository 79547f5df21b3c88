use cambio::app::Session;
use cambio::core::history::HistoryStore;
use cambio::core::{CurrencyKey, Direction, RefreshOutcome};
use cambio::providers::MindicadorProvider;
use cambio::store::KeyValueStore;
use std::fs;
use std::sync::Arc;
use tracing::info;

mod test_utils {
    use cambio::core::CurrencyKey;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn series_json(key: CurrencyKey, latest: f64) -> String {
        let points: Vec<String> = (0..12)
            .map(|i| {
                format!(
                    r#"{{"fecha": "2025-01-{:02}T03:00:00.000Z", "valor": {}}}"#,
                    20 - i,
                    latest - i as f64
                )
            })
            .collect();
        format!(
            r#"{{"version": "1.7.0", "codigo": "{key}", "serie": [{}]}}"#,
            points.join(",")
        )
    }

    /// Serves every indicator; `failing` answers with HTTP 500 instead.
    pub async fn create_mindicador_server(failing: Option<CurrencyKey>) -> MockServer {
        let mock_server = MockServer::start().await;
        for (key, latest) in [
            (CurrencyKey::Dolar, 900.0),
            (CurrencyKey::Euro, 1000.0),
            (CurrencyKey::Utm, 67_000.0),
            (CurrencyKey::Uf, 38_000.0),
            (CurrencyKey::Bitcoin, 90_000_000.0),
        ] {
            let response = if failing == Some(key) {
                ResponseTemplate::new(500).set_body_string("Internal Server Error")
            } else {
                ResponseTemplate::new(200).set_body_string(series_json(key, latest))
            };
            Mock::given(method("GET"))
                .and(path(format!("/api/{key}")))
                .respond_with(response)
                .mount(&mock_server)
                .await;
        }
        mock_server
    }
}

fn write_config(dir: &std::path::Path, base_url: &str) -> std::path::PathBuf {
    let config_path = dir.join("config.yaml");
    let config_content = format!(
        r#"
        providers:
          mindicador:
            base_url: {}
        data_path: {}
    "#,
        base_url,
        dir.join("data").display()
    );
    fs::write(&config_path, config_content).expect("Failed to write config file");
    config_path
}

#[test_log::test(tokio::test)]
async fn test_convert_pipeline_against_mock_api() {
    let mock_server = test_utils::create_mindicador_server(None).await;
    let provider = Arc::new(MindicadorProvider::new(&mock_server.uri()).unwrap());
    let store = KeyValueStore::in_memory();
    let session = Session::new(provider, HistoryStore::new(store.collection_or_memory("history")));

    assert_eq!(
        session.refresh_rates().await.unwrap(),
        RefreshOutcome::Updated
    );
    let rates = session.rates().await;
    info!(?rates, "Fetched rates from mock server");
    assert_eq!(rates.get(CurrencyKey::Dolar), Some(900.0));
    assert_eq!(rates.get(CurrencyKey::Bitcoin), Some(90_000_000.0));

    let to_dollars = session
        .convert(100.0, CurrencyKey::Dolar, Direction::LocalToForeign)
        .await
        .unwrap();
    assert_eq!(to_dollars.display, "0,11 DOLAR");

    let to_pesos = session
        .convert(50.0, CurrencyKey::Dolar, Direction::ForeignToLocal)
        .await
        .unwrap();
    assert_eq!(to_pesos.display, "45.000 CLP");

    let entries = session.history().entries().await;
    assert_eq!(entries.len(), 2);
    assert!(entries[0].ends_with(" - 50 DOLAR → 45.000 CLP"));
    assert!(entries[1].ends_with(" - CLP 100 → 0,11 DOLAR"));
}

#[test_log::test(tokio::test)]
async fn test_one_failing_endpoint_blocks_every_rate() {
    let mock_server = test_utils::create_mindicador_server(Some(CurrencyKey::Uf)).await;
    let provider = Arc::new(MindicadorProvider::new(&mock_server.uri()).unwrap());
    let session = Session::new(
        provider,
        HistoryStore::new(KeyValueStore::in_memory().collection_or_memory("history")),
    );

    assert!(session.refresh_rates().await.is_err());
    assert!(session.rates().await.is_empty());

    // Nothing can be converted, and nothing is recorded
    assert!(
        session
            .convert(100.0, CurrencyKey::Dolar, Direction::LocalToForeign)
            .await
            .is_err()
    );
    assert!(session.history().entries().await.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_mock() {
    let mock_server = test_utils::create_mindicador_server(None).await;
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path(), &mock_server.uri());

    let result = cambio::run_command(
        cambio::AppCommand::Convert {
            amount: "50".to_string(),
            currency: CurrencyKey::Euro,
            direction: Direction::ForeignToLocal,
            chart: true,
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Convert command failed with: {:?}",
        result.err()
    );

    let result = cambio::run_command(cambio::AppCommand::Rates, Some(config_path.to_str().unwrap()))
        .await;
    assert!(result.is_ok(), "Rates command failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_history_persists_across_runs() {
    let mock_server = test_utils::create_mindicador_server(None).await;
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path(), &mock_server.uri());

    for amount in ["100", "50"] {
        let result = cambio::run_command(
            cambio::AppCommand::Convert {
                amount: amount.to_string(),
                currency: CurrencyKey::Dolar,
                direction: Direction::LocalToForeign,
                chart: false,
            },
            Some(config_path.to_str().unwrap()),
        )
        .await;
        assert!(result.is_ok(), "Convert command failed with: {:?}", result.err());
    }

    let store = KeyValueStore::open(&temp_dir.path().join("data"));
    let history = HistoryStore::new(store.collection_or_memory("history"));
    let entries = history.entries().await;
    info!(?entries, "History after two runs");
    assert_eq!(entries.len(), 2);
    assert!(entries[0].ends_with(" - CLP 50 → 0,06 DOLAR"));
    assert!(entries[1].ends_with(" - CLP 100 → 0,11 DOLAR"));
}

#[test_log::test(tokio::test)]
async fn test_refresh_failure_is_not_fatal() {
    let mock_server = test_utils::create_mindicador_server(Some(CurrencyKey::Bitcoin)).await;
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path(), &mock_server.uri());

    let result = cambio::run_command(
        cambio::AppCommand::Convert {
            amount: "100".to_string(),
            currency: CurrencyKey::Dolar,
            direction: Direction::LocalToForeign,
            chart: false,
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Convert command failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_missing_config_file_fails() {
    let result = cambio::run_command(
        cambio::AppCommand::History,
        Some("/definitely/not/here/config.yaml"),
    )
    .await;
    assert!(result.is_err());
}
