//! 환율 예측 API 서버.
//!
//! 설정을 로드하고 업스트림 환율 서비스 클라이언트로 예측 서비스를 구성한 뒤
//! Axum 서버를 시작합니다.

use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use forecast_api::{create_router, setup_metrics_recorder, AppState};
use forecast_core::{init_logging, AppConfig, LogConfig};
use forecast_data::CurrencyServiceClient;
use forecast_engine::{ForecastSettings, ForecastingService};

/// 설정 파일 경로 환경 변수.
const CONFIG_PATH_ENV: &str = "FX_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    // OpenAPI 내보내기 처리 (서버 시작 전)
    if handle_export_openapi()? {
        return Ok(());
    }

    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = AppConfig::load(&config_path)
        .with_context(|| format!("failed to load configuration from {}", config_path))?;

    init_logging(LogConfig::from_settings(&config.logging))
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    info!("Starting FX forecast API server...");

    let metrics_handle = setup_metrics_recorder().context("failed to install metrics recorder")?;
    info!("Prometheus metrics recorder initialized");

    let addr = config.server.socket_addr().map_err(|e| {
        error!(
            host = %config.server.host,
            port = config.server.port,
            error = %e,
            "Invalid socket address, check FX__SERVER__HOST and FX__SERVER__PORT"
        );
        e
    })?;

    let client = CurrencyServiceClient::new(&config.currency_service)
        .context("failed to create currency service client")?;
    info!(
        base_url = %client.base_url(),
        timeout_secs = config.currency_service.timeout_secs,
        "Currency service client configured"
    );

    let settings = ForecastSettings::from_config(&config.forecast);
    info!(
        default_periods = settings.default_periods,
        supported = settings.supported_currencies.len(),
        "Forecast settings loaded"
    );
    let service = ForecastingService::new(Arc::new(client), settings);

    // 전역 종료 토큰 (진행 중인 업스트림 호출에 전파)
    let shutdown_token = CancellationToken::new();
    let state = Arc::new(AppState::new(service, config).with_shutdown(shutdown_token.clone()));
    info!(version = %state.version, "Application state initialized");

    let app = create_router(state, metrics_handle);

    info!(%addr, "API server listening");
    info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);
    info!("Metrics available at http://{}/metrics", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_token))
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// OpenAPI 스펙 내보내기 처리.
///
/// `--export-openapi` 플래그 또는 `EXPORT_OPENAPI` 환경변수가 설정된 경우
/// OpenAPI JSON 스펙을 stdout으로 출력하고 `true`를 반환합니다.
fn handle_export_openapi() -> anyhow::Result<bool> {
    use forecast_api::openapi::ApiDoc;
    use utoipa::OpenApi as _;

    let export_flag = std::env::args().any(|arg| arg == "--export-openapi");
    let export_env = std::env::var("EXPORT_OPENAPI")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    if !(export_flag || export_env) {
        return Ok(false);
    }

    let json = serde_json::to_string_pretty(&ApiDoc::openapi())?;
    println!("{}", json);
    Ok(true)
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM을 받으면 종료 토큰을 취소합니다.
async fn shutdown_signal(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    shutdown_token.cancel();
    info!("Shutdown signal propagated to in-flight requests");
}
