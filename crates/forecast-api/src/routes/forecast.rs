//! 예측 endpoint.
//!
//! - `POST /api/v1/forecast` - 단일 통화쌍 예측
//! - `POST /api/v1/forecast/multi-currency` - 다중 통화 예측
//! - `GET /api/v1/forecast/trend/{base}/{target}` - 추세 분석
//! - `DELETE /api/v1/forecast/cache` - 캐시 비우기
//! - `GET /api/v1/forecast/cache/stats` - 캐시 통계

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{delete, get, post},
    Json, Router,
};
use forecast_core::{
    ForecastRequest, ForecastResponse, MultiCurrencyForecastRequest,
    MultiCurrencyForecastResponse, TrendAnalysis,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use utoipa::ToSchema;

use crate::error::{forecast_error, json_rejection, query_rejection, ApiErrorResponse, ApiResult};
use crate::state::AppState;

/// 추세 분석 쿼리 파라미터.
#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    /// 분석 기간 수 (생략 시 설정된 기본값)
    pub periods: Option<i32>,
}

/// 단순 메시지 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// 캐시 통계 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CacheStatsResponse {
    /// 저장된 항목 수
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub stores: u64,
    /// 적중률 (0.0 ~ 1.0)
    pub hit_rate: f64,
}

/// 단일 통화쌍 예측.
///
/// POST /api/v1/forecast
#[utoipa::path(
    post,
    path = "/api/v1/forecast",
    request_body = ForecastRequest,
    responses(
        (status = 200, description = "예측 성공", body = ForecastResponse),
        (status = 400, description = "잘못된 요청", body = ApiErrorResponse),
        (status = 404, description = "환율 데이터에 대상 통화 없음", body = ApiErrorResponse),
        (status = 502, description = "환율 서비스 오류", body = ApiErrorResponse),
        (status = 504, description = "환율 서비스 타임아웃", body = ApiErrorResponse)
    ),
    tag = "forecast"
)]
pub async fn generate_forecast(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ForecastRequest>, JsonRejection>,
) -> ApiResult<Json<ForecastResponse>> {
    let Json(request) = payload.map_err(json_rejection)?;
    debug!(
        base = %request.base_currency,
        target = %request.target_currency,
        "Forecast request"
    );

    let cancel = state.request_token();
    let response = state
        .service
        .generate_forecast(&request, &cancel)
        .await
        .map_err(forecast_error)?;

    Ok(Json(response))
}

/// 다중 통화 예측.
///
/// 환율 데이터에 없는 통화는 결과에서 빠집니다.
/// POST /api/v1/forecast/multi-currency
#[utoipa::path(
    post,
    path = "/api/v1/forecast/multi-currency",
    request_body = MultiCurrencyForecastRequest,
    responses(
        (status = 200, description = "예측 성공", body = MultiCurrencyForecastResponse),
        (status = 400, description = "잘못된 요청", body = ApiErrorResponse),
        (status = 502, description = "환율 서비스 오류", body = ApiErrorResponse)
    ),
    tag = "forecast"
)]
pub async fn generate_multi_currency_forecast(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MultiCurrencyForecastRequest>, JsonRejection>,
) -> ApiResult<Json<MultiCurrencyForecastResponse>> {
    let Json(request) = payload.map_err(json_rejection)?;

    let cancel = state.request_token();
    let response = state
        .service
        .generate_multi_currency_forecast(&request, &cancel)
        .await
        .map_err(forecast_error)?;

    Ok(Json(response))
}

/// 통화쌍 추세 분석.
///
/// GET /api/v1/forecast/trend/{base}/{target}?periods=30
#[utoipa::path(
    get,
    path = "/api/v1/forecast/trend/{base}/{target}",
    params(
        ("base" = String, Path, description = "기준 통화 (예: USD)"),
        ("target" = String, Path, description = "대상 통화 (예: EUR)"),
        ("periods" = Option<i32>, Query, description = "분석 기간 수 (기본값 30)")
    ),
    responses(
        (status = 200, description = "분석 성공", body = TrendAnalysis),
        (status = 400, description = "잘못된 periods", body = ApiErrorResponse),
        (status = 404, description = "환율 데이터에 대상 통화 없음", body = ApiErrorResponse)
    ),
    tag = "forecast"
)]
pub async fn analyze_trend(
    State(state): State<Arc<AppState>>,
    Path((base, target)): Path<(String, String)>,
    query: Result<Query<TrendQuery>, QueryRejection>,
) -> ApiResult<Json<TrendAnalysis>> {
    let Query(query) = query.map_err(query_rejection)?;
    let periods = query
        .periods
        .unwrap_or_else(|| i32::try_from(state.config.forecast.default_periods).unwrap_or(30));

    let cancel = state.request_token();
    let analysis = state
        .service
        .analyze_trend(&base, &target, periods, &cancel)
        .await
        .map_err(forecast_error)?;

    Ok(Json(analysis))
}

/// 예측 캐시 비우기.
///
/// DELETE /api/v1/forecast/cache
#[utoipa::path(
    delete,
    path = "/api/v1/forecast/cache",
    responses(
        (status = 200, description = "캐시 비움", body = MessageResponse)
    ),
    tag = "forecast"
)]
pub async fn clear_cache(State(state): State<Arc<AppState>>) -> Json<MessageResponse> {
    state.service.clear_cache().await;
    Json(MessageResponse {
        message: "Cache cleared successfully".to_string(),
    })
}

/// 예측 캐시 통계.
///
/// GET /api/v1/forecast/cache/stats
#[utoipa::path(
    get,
    path = "/api/v1/forecast/cache/stats",
    responses(
        (status = 200, description = "캐시 통계", body = CacheStatsResponse)
    ),
    tag = "forecast"
)]
pub async fn cache_stats(State(state): State<Arc<AppState>>) -> Json<CacheStatsResponse> {
    let stats = state.service.cache_stats().await;
    Json(CacheStatsResponse {
        entries: stats.entries,
        hits: stats.hits,
        misses: stats.misses,
        stores: stats.stores,
        hit_rate: stats.hit_rate(),
    })
}

/// 예측 라우터 생성.
pub fn forecast_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(generate_forecast))
        .route("/multi-currency", post(generate_multi_currency_forecast))
        .route("/trend/{base}/{target}", get(analyze_trend))
        .route("/cache", delete(clear_cache))
        .route("/cache/stats", get(cache_stats))
}
