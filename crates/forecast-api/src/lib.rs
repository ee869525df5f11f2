//! # Forecast API
//!
//! 환율 예측 서비스의 REST API 서버입니다.
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`app`]: 미들웨어 스택을 포함한 전체 라우터 조립
//! - [`middleware`]: 요청 ID, 보안 헤더, HTTP 메트릭
//! - [`metrics`]: Prometheus 메트릭 수집
//! - [`openapi`]: OpenAPI 문서

pub mod app;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use app::create_router;
pub use error::{ApiErrorResponse, ApiResult};
pub use metrics::{detached_metrics_handle, setup_metrics_recorder};
pub use routes::create_api_router;
pub use state::AppState;
