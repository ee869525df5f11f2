//! 예측 응답 캐시.
//!
//! 요청 형태(기준/대상 통화, 모델, 정수부 금액, 기간 수)를 키로 완성된 응답을 저장합니다.
//! 만료(TTL)는 없으며 명시적인 [`ForecastCache::clear`]로만 비워집니다.

use forecast_core::{ForecastRequest, ForecastResponse};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use crate::models::ForecastModel;

/// 캐시 키 생성.
///
/// 형식: `{base}_{target}_{model}_{trunc(amount)}_{periods}`.
/// 기본값이 적용된 요청을 넘겨야 합니다. 금액은 0 방향으로 버림하며,
/// 정수 타입 범위를 넘는 금액도 서로 구분되도록 실수 그대로 출력합니다.
pub fn cache_key(request: &ForecastRequest, model: ForecastModel) -> String {
    format!(
        "{}_{}_{}_{}_{}",
        request.base_currency,
        request.target_currency,
        model.as_str(),
        request.amount.trunc(),
        request.periods
    )
}

/// 캐시 통계.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// 현재 저장된 항목 수
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    /// 누적 저장 횟수
    pub stores: u64,
}

impl CacheStats {
    /// 적중률 (조회가 없으면 0).
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

/// 인메모리 예측 캐시.
///
/// 읽기는 동시에, 쓰기와 비우기는 배타적으로 수행됩니다.
/// 조회 결과는 복제본이므로 호출자가 캐시 내용을 바꿀 수 없습니다.
#[derive(Debug, Default)]
pub struct ForecastCache {
    entries: RwLock<HashMap<String, ForecastResponse>>,
    hits: AtomicU64,
    misses: AtomicU64,
    stores: AtomicU64,
}

impl ForecastCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 키로 응답을 조회합니다.
    pub async fn get(&self, key: &str) -> Option<ForecastResponse> {
        let found = self.entries.read().await.get(key).cloned();
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// 응답을 저장합니다. 같은 키가 있으면 덮어씁니다.
    pub async fn insert(&self, key: String, response: ForecastResponse) {
        self.entries.write().await.insert(key, response);
        self.stores.fetch_add(1, Ordering::Relaxed);
    }

    /// 모든 항목을 제거합니다.
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        *entries = HashMap::new();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// 현재 통계 스냅샷.
    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len().await,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stores: self.stores.load(Ordering::Relaxed),
        }
    }
}
