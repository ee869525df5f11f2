//! 환율 외삽 모델.
//!
//! 세 모델 모두 현재 환율 하나와 모델별 상수만 사용하는 닫힌 형태의 함수입니다.
//!
//! | 모델 | 기간 n의 환율 | 신뢰도 |
//! |------|---------------|--------|
//! | linear | `r × (1 + 0.001n)` | 0.7 |
//! | exponential | `r × 1.002ⁿ` | 0.6 |
//! | moving_average | `r × (1 + sin(0.1n) × 0.01)` | 0.5 |

mod projection;

pub use projection::Projection;

use std::fmt;
use std::str::FromStr;

use crate::error::ForecastError;

/// 기간당 선형 증가율 (0.1%)
const LINEAR_TREND: f64 = 0.001;
/// 기간당 복리 증가율 (0.2%)
const EXPONENTIAL_GROWTH: f64 = 0.002;
/// 진동 진폭 (1%)
const MOVING_AVERAGE_VOLATILITY: f64 = 0.01;
/// 기간당 위상 증가량
const MOVING_AVERAGE_PHASE: f64 = 0.1;

/// 예측 모델.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ForecastModel {
    #[default]
    Linear,
    Exponential,
    MovingAverage,
}

impl ForecastModel {
    /// 모든 모델 목록.
    pub const ALL: [ForecastModel; 3] = [
        ForecastModel::Linear,
        ForecastModel::Exponential,
        ForecastModel::MovingAverage,
    ];

    /// 요청에서 쓰는 모델 이름.
    pub fn as_str(self) -> &'static str {
        match self {
            ForecastModel::Linear => "linear",
            ForecastModel::Exponential => "exponential",
            ForecastModel::MovingAverage => "moving_average",
        }
    }

    /// 모델별 고정 신뢰도.
    pub fn confidence(self) -> f64 {
        match self {
            ForecastModel::Linear => 0.7,
            ForecastModel::Exponential => 0.6,
            ForecastModel::MovingAverage => 0.5,
        }
    }

    /// 기간 n의 (반올림 전) 환율. n = 0이면 현재 환율입니다.
    pub fn rate_at(self, current_rate: f64, period: u32) -> f64 {
        let n = f64::from(period);
        match self {
            ForecastModel::Linear => current_rate * (1.0 + LINEAR_TREND * n),
            ForecastModel::Exponential => current_rate * (1.0 + EXPONENTIAL_GROWTH).powf(n),
            ForecastModel::MovingAverage => {
                current_rate * (1.0 + (n * MOVING_AVERAGE_PHASE).sin() * MOVING_AVERAGE_VOLATILITY)
            }
        }
    }
}

impl fmt::Display for ForecastModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ForecastModel {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(ForecastModel::Linear),
            "exponential" => Ok(ForecastModel::Exponential),
            "moving_average" => Ok(ForecastModel::MovingAverage),
            other => Err(ForecastError::UnsupportedForecastType(other.to_string())),
        }
    }
}
