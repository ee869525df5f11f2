//! 예측 오케스트레이터.
//!
//! 검증 → 기본값 적용 → 모델 선택 → 캐시 조회 → 환율 조회 → 예측 → 캐시 저장.
//! 업스트림 호출은 요청당 한 번이며 재시도하지 않습니다.

use chrono::Utc;
use forecast_core::{
    ForecastConfig, ForecastRequest, ForecastResponse, MultiCurrencyForecastRequest,
    MultiCurrencyForecastResponse, TrendAnalysis, TrendDirection,
};
use forecast_data::{DataResult, RateSource, RatesSnapshot};
use metrics::counter;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cache::{cache_key, CacheStats, ForecastCache};
use crate::error::{ForecastError, ForecastResult};
use crate::models::ForecastModel;
use crate::validator::{
    validate_forecast_request, validate_multi_currency_request, SupportedCurrencies,
    MAX_FORECAST_PERIODS,
};

/// 추세 분석의 고정 변동성.
const TREND_VOLATILITY: f64 = 0.05;
/// 추세 분석 min/max 밴드 폭 (±5%).
const TREND_BAND: f64 = 0.05;

/// 예측 서비스 설정.
#[derive(Debug, Clone)]
pub struct ForecastSettings {
    /// 요청의 periods가 0일 때 쓸 기간 수
    pub default_periods: u32,
    pub supported_currencies: SupportedCurrencies,
}

impl ForecastSettings {
    /// 설정 섹션에서 생성합니다.
    ///
    /// 기본 기간 수는 요청 한도([`MAX_FORECAST_PERIODS`])를 넘지 않도록 잘라냅니다.
    pub fn from_config(config: &ForecastConfig) -> Self {
        let limit = MAX_FORECAST_PERIODS.unsigned_abs();
        let default_periods = if config.default_periods > limit {
            warn!(
                configured = config.default_periods,
                limit, "forecast.default_periods exceeds the period limit, clamping"
            );
            limit
        } else {
            config.default_periods
        };

        Self {
            default_periods,
            supported_currencies: SupportedCurrencies::new(&config.supported_currencies),
        }
    }
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self::from_config(&ForecastConfig::default())
    }
}

/// 환율 예측 서비스.
///
/// 캐시는 인스턴스가 소유하므로 서비스마다 독립적입니다.
pub struct ForecastingService {
    source: Arc<dyn RateSource>,
    settings: ForecastSettings,
    cache: ForecastCache,
}

impl ForecastingService {
    pub fn new(source: Arc<dyn RateSource>, settings: ForecastSettings) -> Self {
        Self {
            source,
            settings,
            cache: ForecastCache::new(),
        }
    }

    /// 단일 통화쌍 예측.
    ///
    /// 같은 형태의 요청이 캐시에 있으면 업스트림을 호출하지 않고 저장된 응답을 반환합니다.
    pub async fn generate_forecast(
        &self,
        request: &ForecastRequest,
        cancel: &CancellationToken,
    ) -> ForecastResult<ForecastResponse> {
        validate_forecast_request(request, &self.settings.supported_currencies)?;

        let mut request = request.clone();
        request.periods = self.effective_periods(request.periods);
        request.forecast_type = effective_model_name(&request.forecast_type);
        let model: ForecastModel = request.forecast_type.parse()?;

        let key = cache_key(&request, model);
        if let Some(cached) = self.cache.get(&key).await {
            counter!("forecast_cache_lookups_total", "result" => "hit").increment(1);
            debug!(key = %key, "Forecast served from cache");
            return Ok(cached);
        }
        counter!("forecast_cache_lookups_total", "result" => "miss").increment(1);

        let snapshot = self.fetch_rates(&request.base_currency, cancel).await?;
        let current_rate = snapshot
            .rate(&request.target_currency)
            .ok_or_else(|| ForecastError::TargetNotInRates(request.target_currency.clone()))?;

        let generated_at = Utc::now();
        let periods = non_negative(request.periods);
        let projection = model.project(
            current_rate,
            request.amount,
            periods,
            generated_at.date_naive(),
        );

        let response = ForecastResponse {
            base_currency: request.base_currency,
            target_currency: request.target_currency,
            current_rate,
            amount: request.amount,
            forecast_type: request.forecast_type,
            periods,
            forecasts: projection.periods,
            generated_at,
            confidence_score: projection.confidence,
        };

        self.cache.insert(key, response.clone()).await;
        counter!("forecasts_generated_total", "model" => model.as_str()).increment(1);

        info!(
            model = %model,
            base = %response.base_currency,
            target = %response.target_currency,
            periods = periods,
            "Generated forecast"
        );

        Ok(response)
    }

    /// 한 기준 통화에 대한 다중 통화 예측.
    ///
    /// 환율 조회는 한 번만 하고, 환율 데이터에 없는 통화는 건너뜁니다.
    /// 캐시를 사용하지 않습니다.
    pub async fn generate_multi_currency_forecast(
        &self,
        request: &MultiCurrencyForecastRequest,
        cancel: &CancellationToken,
    ) -> ForecastResult<MultiCurrencyForecastResponse> {
        validate_multi_currency_request(request)?;

        let periods = non_negative(self.effective_periods(request.periods));
        let forecast_type = effective_model_name(&request.forecast_type);
        let model: ForecastModel = forecast_type.parse()?;

        let snapshot = self.fetch_rates(&request.base_currency, cancel).await?;

        let generated_at = Utc::now();
        let start_date = generated_at.date_naive();
        let mut currencies = BTreeMap::new();

        for currency in &request.currencies {
            let Some(rate) = snapshot.rate(currency) else {
                warn!(currency = %currency, base = %request.base_currency, "Currency not found in exchange rates, skipping");
                continue;
            };
            let projection = model.project(rate, request.amount, periods, start_date);
            currencies.insert(currency.clone(), projection.periods);
        }

        counter!("forecasts_generated_total", "model" => model.as_str())
            .increment(currencies.len() as u64);

        info!(
            model = %model,
            base = %request.base_currency,
            currencies = currencies.len(),
            "Generated multi-currency forecast"
        );

        Ok(MultiCurrencyForecastResponse {
            base_currency: request.base_currency.clone(),
            amount: request.amount,
            forecast_type,
            periods,
            currencies,
            generated_at,
        })
    }

    /// 통화쌍 추세 분석.
    ///
    /// 과거 시계열 없이 현재 환율만으로 만든 고정 형태의 결과입니다
    /// (횡보, 변동성 0.05, min/max = ±5%).
    pub async fn analyze_trend(
        &self,
        base: &str,
        target: &str,
        periods: i32,
        cancel: &CancellationToken,
    ) -> ForecastResult<TrendAnalysis> {
        let snapshot = self.fetch_rates(base, cancel).await?;
        let current_rate = snapshot
            .rate(target)
            .ok_or_else(|| ForecastError::TargetNotInRates(target.to_string()))?;

        Ok(TrendAnalysis {
            currency_pair: TrendAnalysis::pair_label(base, target),
            trend: TrendDirection::Sideways,
            volatility: TREND_VOLATILITY,
            average_rate: current_rate,
            min_rate: current_rate * (1.0 - TREND_BAND),
            max_rate: current_rate * (1.0 + TREND_BAND),
            analysis_period: periods,
            generated_at: Utc::now(),
        })
    }

    /// 기준 통화의 현재 환율 스냅샷.
    pub async fn current_rates(
        &self,
        base: &str,
        cancel: &CancellationToken,
    ) -> ForecastResult<RatesSnapshot> {
        self.fetch_rates(base, cancel).await
    }

    /// 환율 소스 가용성 확인.
    pub async fn check_rate_source(&self, cancel: &CancellationToken) -> DataResult<()> {
        self.source.health_check(cancel).await
    }

    /// 환율 소스 이름.
    pub fn rate_source_name(&self) -> &str {
        self.source.name()
    }

    /// 설정된 지원 통화 목록.
    pub fn supported_currencies(&self) -> &[String] {
        self.settings.supported_currencies.codes()
    }

    /// 예측 캐시를 비웁니다.
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
        info!("Forecast cache cleared");
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    async fn fetch_rates(
        &self,
        base: &str,
        cancel: &CancellationToken,
    ) -> ForecastResult<RatesSnapshot> {
        debug!(source = self.source.name(), base = %base, "Fetching exchange rates");
        self.source.get_rates(base, cancel).await.map_err(|e| {
            warn!(source = self.source.name(), base = %base, error = %e, "Failed to fetch exchange rates");
            ForecastError::from(e)
        })
    }

    fn effective_periods(&self, periods: i32) -> i32 {
        if periods == 0 {
            i32::try_from(self.settings.default_periods)
                .unwrap_or(MAX_FORECAST_PERIODS)
                .min(MAX_FORECAST_PERIODS)
        } else {
            periods
        }
    }
}

fn effective_model_name(name: &str) -> String {
    if name.is_empty() {
        ForecastModel::default().as_str().to_string()
    } else {
        name.to_string()
    }
}

fn non_negative(periods: i32) -> u32 {
    u32::try_from(periods).unwrap_or(0)
}
