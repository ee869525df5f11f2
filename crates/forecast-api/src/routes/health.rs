//! 헬스 체크 endpoint.
//!
//! 로드밸런서나 오케스트레이션 시스템(Kubernetes 등)에서 사용됩니다.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::state::AppState;

/// 헬스 체크 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// 서비스 상태 ("healthy")
    pub status: String,

    /// 현재 시각
    pub timestamp: DateTime<Utc>,

    /// API 버전
    pub version: String,

    /// 사람이 읽기 쉬운 업타임 (예: "1h2m3s")
    pub uptime: String,

    /// 서버 업타임(초)
    pub uptime_secs: i64,
}

/// 준비 상태 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadinessResponse {
    /// 전체 상태 ("ready" | "unavailable")
    pub status: String,

    pub version: String,

    pub timestamp: DateTime<Utc>,

    /// 환율 소스 상태
    pub rate_source: ComponentStatus,
}

/// 컴포넌트 상태.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentStatus {
    /// 컴포넌트 이름
    pub name: String,

    /// 상태 ("up" | "down")
    pub status: String,

    /// 추가 정보
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentStatus {
    pub fn up(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: "up".to_string(),
            message: None,
        }
    }

    pub fn down(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: "down".to_string(),
            message: Some(message.into()),
        }
    }
}

/// 업타임을 "1h2m3s" 형식으로 변환합니다.
pub fn format_uptime(secs: i64) -> String {
    let secs = secs.max(0);
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// 헬스 체크 (liveness probe용).
///
/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "서버 정상", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let uptime_secs = state.uptime_secs();

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: state.version.clone(),
        uptime: format_uptime(uptime_secs),
        uptime_secs,
    })
}

/// 준비 상태 체크 (readiness probe용).
///
/// 업스트림 환율 서비스에 헬스 체크를 보내 응답 가능 여부를 확인합니다.
/// GET /health/ready
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "요청 처리 가능", body = ReadinessResponse),
        (status = 503, description = "환율 소스 사용 불가", body = ReadinessResponse)
    ),
    tag = "health"
)]
pub async fn health_ready(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let cancel = state.request_token();
    let source = state.service.rate_source_name().to_string();

    let (status_code, status, rate_source) =
        match state.service.check_rate_source(&cancel).await {
            Ok(()) => (StatusCode::OK, "ready", ComponentStatus::up(source)),
            Err(e) => {
                tracing::warn!(error = %e, "Rate source health check failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "unavailable",
                    ComponentStatus::down(source, e.to_string()),
                )
            }
        };

    let response = ReadinessResponse {
        status: status.to_string(),
        version: state.version.clone(),
        timestamp: Utc::now(),
        rate_source,
    };

    (status_code, Json(response))
}

/// 헬스 체크 라우터 생성.
pub fn health_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(health_check))
        .route("/ready", get(health_ready))
}
