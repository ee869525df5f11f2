//! 환율 예측 요청/응답 모델.
//!
//! HTTP 계층과 예측 엔진이 공유하는 값 타입입니다.
//! 응답 타입은 한 번 생성된 뒤 변경되지 않으며, 캐시에는 복제본이 저장됩니다.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 단일 통화쌍 예측 요청.
///
/// `periods == 0`이면 설정된 기본 기간을, `forecast_type`이 비어 있으면
/// `linear`를 사용합니다. 기본값 적용은 검증 이후 서비스에서 수행합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct ForecastRequest {
    /// 기준 통화 (예: "USD")
    pub base_currency: String,
    /// 대상 통화 (예: "EUR")
    pub target_currency: String,
    /// 환산할 금액 (0보다 커야 함)
    pub amount: f64,
    /// 예측 기간 수 (0 = 기본값)
    #[serde(default)]
    pub periods: i32,
    /// 예측 모델 이름 ("linear", "exponential", "moving_average")
    #[serde(default)]
    pub forecast_type: String,
}

impl ForecastRequest {
    /// 기간/모델을 비워 둔 요청 생성.
    pub fn new(
        base_currency: impl Into<String>,
        target_currency: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            base_currency: base_currency.into(),
            target_currency: target_currency.into(),
            amount,
            periods: 0,
            forecast_type: String::new(),
        }
    }

    /// 예측 기간 수를 설정합니다.
    pub fn with_periods(mut self, periods: i32) -> Self {
        self.periods = periods;
        self
    }

    /// 예측 모델 이름을 설정합니다.
    pub fn with_forecast_type(mut self, forecast_type: impl Into<String>) -> Self {
        self.forecast_type = forecast_type.into();
        self
    }
}

/// 예측 시계열의 한 기간.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct ForecastPeriod {
    /// 1부터 시작하는 기간 번호
    pub period: u32,
    /// 예측 일자 (생성일 + period일)
    pub date: NaiveDate,
    /// 예측 환율 (소수점 4자리)
    pub rate: f64,
    /// 예측 환산 금액 (소수점 2자리)
    pub amount: f64,
    /// 직전 기간 대비 변화량 (첫 기간은 0)
    pub change: f64,
    /// 직전 기간 대비 변화율 % (첫 기간은 0)
    pub change_percent: f64,
}

/// 단일 통화쌍 예측 응답.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct ForecastResponse {
    pub base_currency: String,
    pub target_currency: String,
    /// 예측의 기준이 된 현재 환율
    pub current_rate: f64,
    pub amount: f64,
    /// 기본값이 적용된 모델 이름
    pub forecast_type: String,
    /// 기본값이 적용된 기간 수
    pub periods: u32,
    pub forecasts: Vec<ForecastPeriod>,
    pub generated_at: DateTime<Utc>,
    /// 모델별 고정 신뢰도 (0, 1]
    pub confidence_score: f64,
}

/// 다중 통화 예측 요청.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct MultiCurrencyForecastRequest {
    pub base_currency: String,
    /// 예측할 대상 통화 목록 (최소 1개)
    pub currencies: Vec<String>,
    pub amount: f64,
    #[serde(default)]
    pub periods: i32,
    #[serde(default)]
    pub forecast_type: String,
}

impl MultiCurrencyForecastRequest {
    /// 기간/모델을 비워 둔 요청 생성.
    pub fn new<I, S>(base_currency: impl Into<String>, currencies: I, amount: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base_currency: base_currency.into(),
            currencies: currencies.into_iter().map(Into::into).collect(),
            amount,
            periods: 0,
            forecast_type: String::new(),
        }
    }

    /// 예측 기간 수를 설정합니다.
    pub fn with_periods(mut self, periods: i32) -> Self {
        self.periods = periods;
        self
    }

    /// 예측 모델 이름을 설정합니다.
    pub fn with_forecast_type(mut self, forecast_type: impl Into<String>) -> Self {
        self.forecast_type = forecast_type.into();
        self
    }
}

/// 다중 통화 예측 응답.
///
/// 환율 데이터에 없는 통화는 에러 없이 `currencies`에서 빠집니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct MultiCurrencyForecastResponse {
    pub base_currency: String,
    pub amount: f64,
    pub forecast_type: String,
    pub periods: u32,
    /// 통화 코드 → 예측 시계열
    pub currencies: BTreeMap<String, Vec<ForecastPeriod>>,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_when_optional_fields_missing() {
        let json = r#"{"base_currency":"USD","target_currency":"EUR","amount":100.0}"#;
        let req: ForecastRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.periods, 0);
        assert!(req.forecast_type.is_empty());
        assert_eq!(req, ForecastRequest::new("USD", "EUR", 100.0));
    }

    #[test]
    fn test_request_missing_amount_is_rejected() {
        let json = r#"{"base_currency":"USD","target_currency":"EUR"}"#;
        assert!(serde_json::from_str::<ForecastRequest>(json).is_err());
    }

    #[test]
    fn test_period_date_serializes_as_iso_date() {
        let period = ForecastPeriod {
            period: 1,
            date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            rate: 1.2012,
            amount: 1201.2,
            change: 0.0,
            change_percent: 0.0,
        };

        let json = serde_json::to_string(&period).unwrap();
        assert!(json.contains(r#""date":"2024-03-02""#));
    }

    #[test]
    fn test_multi_request_builder() {
        let req = MultiCurrencyForecastRequest::new("USD", ["EUR", "GBP"], 500.0)
            .with_periods(7)
            .with_forecast_type("exponential");

        assert_eq!(req.currencies, vec!["EUR".to_string(), "GBP".to_string()]);
        assert_eq!(req.periods, 7);
        assert_eq!(req.forecast_type, "exponential");
    }
}
