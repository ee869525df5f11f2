//! 추세 분석 결과 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 추세 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// 상승
    Upward,
    /// 하락
    Downward,
    /// 횡보
    #[default]
    Sideways,
}

impl TrendDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            TrendDirection::Upward => "upward",
            TrendDirection::Downward => "downward",
            TrendDirection::Sideways => "sideways",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 통화쌍 추세 분석.
///
/// 과거 시계열을 다루지 않으므로 min/max는 현재 환율의 ±5% 밴드로 채워집니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct TrendAnalysis {
    /// "BASE/TARGET" 형식
    pub currency_pair: String,
    pub trend: TrendDirection,
    pub volatility: f64,
    pub average_rate: f64,
    pub min_rate: f64,
    pub max_rate: f64,
    /// 분석 기간 수
    pub analysis_period: i32,
    pub generated_at: DateTime<Utc>,
}

impl TrendAnalysis {
    /// "BASE/TARGET" 통화쌍 라벨 생성.
    pub fn pair_label(base: &str, target: &str) -> String {
        format!("{}/{}", base, target)
    }
}
