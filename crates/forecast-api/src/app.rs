//! 전체 라우터 조립.
//!
//! API 라우터, `/metrics`, OpenAPI 문서에 미들웨어 스택을 적용합니다.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    middleware,
    routing::get,
    Router,
};
use forecast_core::ServerConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::middleware::{
    metrics_layer, request_id_layer, security_headers_layer, REQUEST_ID_HEADER,
};
use crate::openapi::openapi_router;
use crate::routes::create_api_router;
use crate::state::AppState;

/// /metrics 엔드포인트 핸들러.
async fn metrics_handler(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}

/// CORS 레이어 생성.
///
/// 허용 origin 목록이 비어 있거나 유효한 항목이 없으면 모든 origin을 허용합니다.
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        if !config.cors_origins.is_empty() {
            warn!("cors_origins contains no valid origins, allowing any");
        }
        AllowOrigin::any()
    } else {
        info!(count = origins.len(), "CORS configured with allowed origins");
        AllowOrigin::list(origins)
    };

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            request_id.clone(),
        ])
        .expose_headers([request_id])
        .max_age(Duration::from_secs(3600))
}

/// 전체 라우터 생성.
///
/// 레이어는 안쪽부터 metrics(라우트 단위) → trace → timeout(408) → 동시 요청 제한 →
/// 보안 헤더 → 요청 ID → CORS 순으로 감쌉니다.
pub fn create_router(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let server = state.config.server.clone();

    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    Router::new()
        .merge(metrics_router)
        .merge(create_api_router().with_state(state))
        .merge(openapi_router())
        // MatchedPath는 라우팅 이후에만 존재하므로 route_layer로 적용
        .route_layer(middleware::from_fn(metrics_layer))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.request_timeout_secs),
        ))
        .layer(GlobalConcurrencyLimitLayer::new(
            server.max_concurrent_requests.max(1),
        ))
        .layer(middleware::from_fn(security_headers_layer))
        .layer(middleware::from_fn(request_id_layer))
        .layer(cors_layer(&server))
}
