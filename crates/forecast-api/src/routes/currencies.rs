//! 통화 endpoint.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use forecast_data::RatesSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::{forecast_error, ApiErrorResponse, ApiResult};
use crate::state::AppState;

/// 지원 통화 목록 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CurrenciesResponse {
    pub currencies: Vec<String>,
}

/// 현재 환율 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RatesResponse {
    /// 기준 통화
    pub base: String,
    /// 업스트림 기준 시각 (유닉스 초)
    pub timestamp: i64,
    /// 통화 코드 → 환율
    pub rates: HashMap<String, f64>,
    /// 데이터 제공자
    pub provider: String,
}

impl From<RatesSnapshot> for RatesResponse {
    fn from(snapshot: RatesSnapshot) -> Self {
        Self {
            base: snapshot.base,
            timestamp: snapshot.timestamp,
            rates: snapshot.rates,
            provider: snapshot.provider,
        }
    }
}

/// 지원 통화 목록.
///
/// GET /api/v1/currencies
#[utoipa::path(
    get,
    path = "/api/v1/currencies",
    responses(
        (status = 200, description = "지원 통화 목록", body = CurrenciesResponse)
    ),
    tag = "currencies"
)]
pub async fn list_currencies(State(state): State<Arc<AppState>>) -> Json<CurrenciesResponse> {
    Json(CurrenciesResponse {
        currencies: state.service.supported_currencies().to_vec(),
    })
}

/// 기준 통화의 현재 환율.
///
/// GET /api/v1/currencies/rates/{base}
#[utoipa::path(
    get,
    path = "/api/v1/currencies/rates/{base}",
    params(
        ("base" = String, Path, description = "기준 통화 (예: USD)")
    ),
    responses(
        (status = 200, description = "현재 환율", body = RatesResponse),
        (status = 502, description = "환율 서비스 오류", body = ApiErrorResponse)
    ),
    tag = "currencies"
)]
pub async fn get_rates(
    State(state): State<Arc<AppState>>,
    Path(base): Path<String>,
) -> ApiResult<Json<RatesResponse>> {
    let cancel = state.request_token();
    let snapshot = state
        .service
        .current_rates(&base, &cancel)
        .await
        .map_err(forecast_error)?;

    Ok(Json(snapshot.into()))
}

/// 통화 라우터 생성.
pub fn currencies_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_currencies))
        .route("/rates/{base}", get(get_rates))
}
