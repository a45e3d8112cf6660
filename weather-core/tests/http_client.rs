//! Integration tests for HttpUpstreamClient using wiremock.

use weather_core::{HttpUpstreamClient, UpstreamClient, UpstreamConfig, UpstreamError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> HttpUpstreamClient {
    HttpUpstreamClient::new(&UpstreamConfig::default()).unwrap()
}

#[tokio::test]
async fn test_fetch_returns_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/points/40,70"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "properties": { "forecast": "https://api.weather.gov/gridpoints/TOP/31,80/forecast" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/points/40,70", mock_server.uri());
    let body = client().fetch(&url).await.unwrap();

    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        value["properties"]["forecast"],
        "https://api.weather.gov/gridpoints/TOP/31,80/forecast"
    );
}

#[tokio::test]
async fn test_fetch_sends_user_agent() {
    let mock_server = MockServer::start().await;

    let cfg = UpstreamConfig {
        user_agent: "weather-proxy-test (ops@example.com)".into(),
        timeout_secs: Some(5),
    };

    Mock::given(method("GET"))
        .and(path("/ping"))
        .and(header("user-agent", "weather-proxy-test (ops@example.com)"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpUpstreamClient::new(&cfg).unwrap();
    let body = client
        .fetch(&format!("{}/ping", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(body, b"pong");
}

#[tokio::test]
async fn test_fetch_non_success_status_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/points/0,0"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "title": "Data Unavailable For Requested Point"
        })))
        .mount(&mock_server)
        .await;

    let url = format!("{}/points/0,0", mock_server.uri());
    let err = client().fetch(&url).await.unwrap_err();

    match err {
        UpstreamError::Status { url: failed, status } => {
            assert_eq!(failed, url);
            assert_eq!(status.as_u16(), 404);
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_connection_refused_is_transport_error() {
    // Grab a free port, then close it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let url = format!("http://127.0.0.1:{port}/points/40,70");

    let err = client().fetch(&url).await.unwrap_err();

    assert!(matches!(err, UpstreamError::Transport { .. }));
    assert_eq!(err.url(), url);
}
