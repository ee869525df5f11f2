//! OpenAPI 문서화 설정.
//!
//! utoipa로 REST API의 OpenAPI 3.0 스펙을 생성하고
//! `/api-docs/openapi.json`에서 JSON으로 제공합니다.
//!
//! 새 엔드포인트를 추가할 때:
//!
//! 1. 응답/요청 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)` 섹션에 추가

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use forecast_core::{
    ForecastPeriod, ForecastRequest, ForecastResponse, MultiCurrencyForecastRequest,
    MultiCurrencyForecastResponse, TrendAnalysis, TrendDirection,
};

use crate::error::ApiErrorResponse;
use crate::routes::{
    CacheStatsResponse, ComponentStatus, CurrenciesResponse, HealthResponse, MessageResponse,
    RatesResponse, ReadinessResponse,
};

/// FX Forecast API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "FX Forecast API",
        version = "1.0.0",
        description = r#"
# 환율 예측 REST API

현재 환율 하나를 기준으로 단기 환율을 외삽합니다.

## 모델

- **linear**: 기간당 0.1% 선형 증가 (신뢰도 0.7)
- **exponential**: 기간당 0.2% 복리 증가 (신뢰도 0.6)
- **moving_average**: ±1% 사인 진동 (신뢰도 0.5)
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8082", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크 - 서버 상태 확인"),
        (name = "forecast", description = "예측 - 환율 예측, 추세 분석, 캐시 관리"),
        (name = "currencies", description = "통화 - 지원 통화 및 현재 환율")
    ),
    components(
        schemas(
            // ===== Health =====
            HealthResponse,
            ReadinessResponse,
            ComponentStatus,

            // ===== Common =====
            ApiErrorResponse,
            MessageResponse,

            // ===== Forecast =====
            ForecastRequest,
            ForecastResponse,
            ForecastPeriod,
            MultiCurrencyForecastRequest,
            MultiCurrencyForecastResponse,
            TrendAnalysis,
            TrendDirection,
            CacheStatsResponse,

            // ===== Currencies =====
            CurrenciesResponse,
            RatesResponse,
        )
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::health::health_ready,
        crate::routes::forecast::generate_forecast,
        crate::routes::forecast::generate_multi_currency_forecast,
        crate::routes::forecast::analyze_trend,
        crate::routes::forecast::clear_cache,
        crate::routes::forecast::cache_stats,
        crate::routes::currencies::list_currencies,
        crate::routes::currencies::get_rates,
    )
)]
pub struct ApiDoc;

/// OpenAPI JSON 스펙 핸들러.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// `/api-docs/openapi.json` 라우터 생성.
pub fn openapi_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_valid() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string_pretty(&spec).unwrap();

        assert!(json.contains("FX Forecast API"));
        assert!(json.contains("/health/ready"));
        assert!(json.contains("/api/v1/forecast/multi-currency"));
        assert!(json.contains("/api/v1/forecast/trend/{base}/{target}"));
        assert!(json.contains("/api/v1/currencies/rates/{base}"));
    }

    #[test]
    fn test_openapi_contains_schemas() {
        let json = serde_json::to_string(&ApiDoc::openapi()).unwrap();

        assert!(json.contains("ForecastRequest"));
        assert!(json.contains("MultiCurrencyForecastResponse"));
        assert!(json.contains("TrendAnalysis"));
        assert!(json.contains("ApiErrorResponse"));
    }
}
