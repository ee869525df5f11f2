//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 환율 소스 포함 헬스 체크 (readiness)
//! - `/api/v1/forecast` - 예측, 추세 분석, 캐시 관리
//! - `/api/v1/currencies` - 지원 통화, 현재 환율

pub mod currencies;
pub mod forecast;
pub mod health;

pub use currencies::{currencies_router, CurrenciesResponse, RatesResponse};
pub use forecast::{forecast_router, CacheStatsResponse, MessageResponse, TrendQuery};
pub use health::{health_router, ComponentStatus, HealthResponse, ReadinessResponse};

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/health", health_router())
        .nest("/api/v1/forecast", forecast_router())
        .nest("/api/v1/currencies", currencies_router())
}
