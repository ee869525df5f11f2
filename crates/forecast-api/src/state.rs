//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! Arc로 래핑되어 Axum의 State extractor로 핸들러에 주입됩니다.

use forecast_core::AppConfig;
use forecast_engine::ForecastingService;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 예측 서비스 (캐시 포함)
    pub service: Arc<ForecastingService>,

    /// 로드된 설정
    pub config: Arc<AppConfig>,

    /// 서버 시작 시각
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,

    /// 프로세스 종료 토큰. 진행 중인 업스트림 호출은 자식 토큰으로 취소됩니다.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(service: ForecastingService, config: AppConfig) -> Self {
        Self {
            service: Arc::new(service),
            config: Arc::new(config),
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            shutdown: CancellationToken::new(),
        }
    }

    /// 종료 토큰을 지정합니다.
    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// 요청 하나에 쓸 취소 토큰.
    pub fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }
}
