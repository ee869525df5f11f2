//! 예측 엔진 에러 타입.

use forecast_data::DataError;
use thiserror::Error;

/// 예측 결과 타입.
pub type ForecastResult<T> = Result<T, ForecastError>;

/// 요청 검증 실패 사유.
///
/// 검사 순서대로 첫 번째 위반만 보고됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("base currency is required")]
    MissingBaseCurrency,

    #[error("target currency is required")]
    MissingTargetCurrency,

    #[error("amount must be greater than 0")]
    NonPositiveAmount,

    #[error("periods cannot be negative")]
    NegativePeriods,

    #[error("periods cannot exceed 365")]
    TooManyPeriods,

    #[error("base currency {0} is not supported")]
    UnsupportedBaseCurrency(String),

    #[error("target currency {0} is not supported")]
    UnsupportedTargetCurrency(String),

    /// 다중 통화 요청에 대상 통화가 없음
    #[error("at least one target currency is required")]
    NoTargetCurrencies,
}

/// 예측 서비스 에러.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// 요청 검증 실패
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// 알 수 없는 모델 이름
    #[error("unsupported forecast type: {0}")]
    UnsupportedForecastType(String),

    /// 환율 소스 조회 실패
    #[error("failed to fetch exchange rates: {0}")]
    RateSource(#[from] DataError),

    /// 조회한 환율에 대상 통화가 없음
    #[error("target currency {0} not found in exchange rates")]
    TargetNotInRates(String),
}

impl ForecastError {
    /// 호출자 입력이 원인인 에러인지 확인.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ForecastError::Validation(_) | ForecastError::UnsupportedForecastType(_)
        )
    }

    /// 업스트림 환율 소스가 원인인 에러인지 확인.
    pub fn is_dependency_error(&self) -> bool {
        matches!(self, ForecastError::RateSource(_))
    }
}
