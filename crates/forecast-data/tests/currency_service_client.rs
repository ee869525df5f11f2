//! 환율 서비스 클라이언트 통합 테스트 (mockito 서버 사용).

use forecast_core::CurrencyServiceConfig;
use forecast_data::{CurrencyServiceClient, DataError, RateSource};
use mockito::Matcher;
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

const RATES_BODY: &str =
    r#"{"base":"USD","timestamp":1640995200,"rates":{"EUR":0.85,"GBP":0.73},"provider":"test"}"#;

fn client_for(url: String) -> CurrencyServiceClient {
    let config = CurrencyServiceConfig {
        base_url: url,
        timeout_secs: 5,
    };
    CurrencyServiceClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_get_rates_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/rates/USD")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(RATES_BODY)
        .create_async()
        .await;

    let client = client_for(server.url());
    let snapshot = client
        .get_rates("USD", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(snapshot.base, "USD");
    assert_eq!(snapshot.timestamp, 1640995200);
    assert_eq!(snapshot.provider, "test");
    assert_eq!(snapshot.rate("EUR"), Some(0.85));
    assert_eq!(snapshot.rate("GBP"), Some(0.73));
    assert_eq!(snapshot.rate("JPY"), None);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_rates_http_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/v1/rates/USD")
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let client = client_for(server.url());
    let err = client
        .get_rates("USD", &CancellationToken::new())
        .await
        .unwrap_err();

    match &err {
        DataError::Status { status, body } => {
            assert_eq!(*status, 500);
            assert_eq!(body, "Internal Server Error");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_get_rates_invalid_json() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/v1/rates/USD")
        .with_status(200)
        .with_body("invalid json")
        .create_async()
        .await;

    let client = client_for(server.url());
    let err = client
        .get_rates("USD", &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, DataError::Parse(_)));
}

#[tokio::test]
async fn test_get_rates_with_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/rates")
        .match_query(Matcher::UrlEncoded("base".into(), "USD".into()))
        .with_status(200)
        .with_body(RATES_BODY)
        .create_async()
        .await;

    let client = client_for(server.url());
    let snapshot = client
        .get_rates_with_query("USD", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(snapshot.rates.len(), 2);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_health_check() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/health")
        .with_status(200)
        .with_body(r#"{"status":"ok"}"#)
        .create_async()
        .await;

    let client = client_for(server.url());
    assert!(client.health_check(&CancellationToken::new()).await.is_ok());
}

#[tokio::test]
async fn test_health_check_unhealthy() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/health")
        .with_status(503)
        .create_async()
        .await;

    let client = client_for(server.url());
    let err = client
        .health_check(&CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "currency service health check failed with status: 503"
    );
}

#[tokio::test]
async fn test_cancelled_before_response() {
    let server = mockito::Server::new_async().await;
    let client = client_for(server.url());

    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = client.get_rates("USD", &cancel).await.unwrap_err();
    assert!(matches!(err, DataError::Cancelled));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let client = client_for("http://127.0.0.1:1".to_string());
    let err = client
        .get_rates("USD", &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, DataError::Network(_)));
}

/// 헤더와 본문 일부만 보내고 멈추는 업스트림.
async fn spawn_stalled_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = socket.read(&mut buf).await;
        let head = "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 200\r\n\r\n";
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(br#"{"base":"USD","#).await.unwrap();
        socket.flush().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_cancelled_while_reading_body() {
    let client = client_for(spawn_stalled_upstream().await);
    let cancel = CancellationToken::new();

    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        canceller.cancel();
    });

    let started = Instant::now();
    let err = client.get_rates("USD", &cancel).await.unwrap_err();

    assert!(matches!(err, DataError::Cancelled), "unexpected error: {:?}", err);
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn test_base_currency_cannot_escape_rates_path() {
    let mut server = mockito::Server::new_async().await;
    let health = server
        .mock("GET", "/health")
        .with_status(200)
        .with_body(RATES_BODY)
        .expect(0)
        .create_async()
        .await;
    let rates = server
        .mock("GET", Matcher::Regex(r"^/api/v1/rates/\.\.%2F".to_string()))
        .with_status(404)
        .with_body("unknown currency")
        .create_async()
        .await;

    let client = client_for(server.url());
    let err = client
        .get_rates("../../health", &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, DataError::Status { status: 404, .. }));
    health.assert_async().await;
    rates.assert_async().await;
}

#[tokio::test]
async fn test_base_currency_query_characters_are_escaped() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(r"^/api/v1/rates/USD%3Fx".to_string()))
        .with_status(404)
        .with_body("unknown currency")
        .create_async()
        .await;

    let client = client_for(server.url());
    let err = client
        .get_rates("USD?x=1", &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, DataError::Status { status: 404, .. }));
    mock.assert_async().await;
}
