//! 환율 소스 Provider.

mod currency_service;

pub use currency_service::CurrencyServiceClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

use crate::error::DataResult;

/// 특정 기준 통화의 환율 스냅샷.
///
/// 업스트림 JSON 형식:
/// `{"base":"USD","timestamp":1640995200,"rates":{"EUR":0.85},"provider":"test"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatesSnapshot {
    /// 기준 통화
    pub base: String,
    /// 업스트림 기준 시각 (유닉스 초)
    pub timestamp: i64,
    /// 대상 통화 → 환율 (기준 통화 1단위당)
    pub rates: HashMap<String, f64>,
    /// 데이터 제공자 이름
    #[serde(default)]
    pub provider: String,
}

impl RatesSnapshot {
    /// 대상 통화의 환율 조회.
    pub fn rate(&self, currency: &str) -> Option<f64> {
        self.rates.get(currency).copied()
    }
}

/// 환율 소스 trait.
///
/// 예측 서비스는 이 trait만 의존하므로 테스트에서는 인메모리 구현으로 대체합니다.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// 소스 이름.
    fn name(&self) -> &str;

    /// 기준 통화의 현재 환율 조회.
    ///
    /// `cancel`이 취소되면 [`DataError::Cancelled`](crate::DataError::Cancelled)로 중단합니다.
    async fn get_rates(&self, base: &str, cancel: &CancellationToken)
        -> DataResult<RatesSnapshot>;

    /// 소스 가용성 확인.
    async fn health_check(&self, cancel: &CancellationToken) -> DataResult<()>;
}
