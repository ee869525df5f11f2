//! 예측 요청 검증.

use forecast_core::{ForecastConfig, ForecastRequest, MultiCurrencyForecastRequest};
use std::collections::HashSet;

use crate::error::ValidationError;

/// 요청 가능한 최대 예측 기간 수.
pub const MAX_FORECAST_PERIODS: i32 = 365;

/// 지원 통화 집합.
///
/// 설정 목록의 순서를 유지하며, 조회는 요청 코드와의 정확한 일치로 판단합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedCurrencies {
    codes: Vec<String>,
    lookup: HashSet<String>,
}

impl SupportedCurrencies {
    /// 설정 목록으로 생성합니다. 정규화와 기본 목록 대체가 적용됩니다.
    pub fn new(raw: &[String]) -> Self {
        let mut codes = Vec::new();
        let mut lookup = HashSet::new();
        for code in ForecastConfig::normalize_currencies(raw) {
            if lookup.insert(code.clone()) {
                codes.push(code);
            }
        }
        Self { codes, lookup }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.lookup.contains(code)
    }

    /// 설정 순서대로의 통화 코드.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for SupportedCurrencies {
    fn default() -> Self {
        Self::new(&[])
    }
}

/// 단일 통화쌍 예측 요청 검증.
///
/// `periods == 0`과 빈 모델 이름은 허용됩니다 (기본값은 이후에 적용).
pub fn validate_forecast_request(
    request: &ForecastRequest,
    supported: &SupportedCurrencies,
) -> Result<(), ValidationError> {
    if request.base_currency.is_empty() {
        return Err(ValidationError::MissingBaseCurrency);
    }
    if request.target_currency.is_empty() {
        return Err(ValidationError::MissingTargetCurrency);
    }
    validate_amount_and_periods(request.amount, request.periods)?;

    if !supported.contains(&request.base_currency) {
        return Err(ValidationError::UnsupportedBaseCurrency(
            request.base_currency.clone(),
        ));
    }
    if !supported.contains(&request.target_currency) {
        return Err(ValidationError::UnsupportedTargetCurrency(
            request.target_currency.clone(),
        ));
    }

    Ok(())
}

/// 다중 통화 예측 요청 검증.
///
/// 지원 통화 여부는 확인하지 않습니다. 환율에 없는 통화는 예측 단계에서 건너뜁니다.
pub fn validate_multi_currency_request(
    request: &MultiCurrencyForecastRequest,
) -> Result<(), ValidationError> {
    if request.base_currency.is_empty() {
        return Err(ValidationError::MissingBaseCurrency);
    }
    if request.currencies.is_empty() {
        return Err(ValidationError::NoTargetCurrencies);
    }
    validate_amount_and_periods(request.amount, request.periods)
}

fn validate_amount_and_periods(amount: f64, periods: i32) -> Result<(), ValidationError> {
    if amount.is_nan() || amount <= 0.0 {
        return Err(ValidationError::NonPositiveAmount);
    }
    if periods < 0 {
        return Err(ValidationError::NegativePeriods);
    }
    if periods > MAX_FORECAST_PERIODS {
        return Err(ValidationError::TooManyPeriods);
    }
    Ok(())
}
