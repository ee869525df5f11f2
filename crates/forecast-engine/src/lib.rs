//! # Forecast Engine
//!
//! 환율 예측 계산과 캐싱 엔진입니다.
//!
//! - [`validator`]: 요청 검증과 지원 통화 집합
//! - [`models`]: 세 가지 외삽 모델 (linear, exponential, moving_average)
//! - [`cache`]: 요청 형태를 키로 하는 인메모리 응답 캐시
//! - [`service`]: 검증 → 캐시 → 환율 조회 → 예측 → 저장 오케스트레이션

pub mod cache;
pub mod error;
pub mod models;
pub mod service;
pub mod validator;

pub use cache::{cache_key, CacheStats, ForecastCache};
pub use error::{ForecastError, ForecastResult, ValidationError};
pub use models::{ForecastModel, Projection};
pub use service::{ForecastSettings, ForecastingService};
pub use validator::{
    validate_forecast_request, validate_multi_currency_request, SupportedCurrencies,
    MAX_FORECAST_PERIODS,
};
