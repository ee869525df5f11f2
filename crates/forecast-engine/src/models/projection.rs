//! 기간별 예측 시계열 생성.

use chrono::{Duration, NaiveDate};
use forecast_core::ForecastPeriod;

use super::ForecastModel;

/// 모델 적용 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// 1..=periods 순서의 예측 시계열
    pub periods: Vec<ForecastPeriod>,
    pub confidence: f64,
}

impl ForecastModel {
    /// 현재 환율에서 `periods`개 기간을 외삽합니다.
    ///
    /// 각 기간의 환율은 직전 반올림 값이 아니라 공식에서 직접 계산하고,
    /// 출력 시점에만 반올림합니다 (rate/change 4자리, amount/change_percent 2자리).
    /// 기간 n의 날짜는 `start_date + n일`입니다.
    pub fn project(
        self,
        current_rate: f64,
        amount: f64,
        periods: u32,
        start_date: NaiveDate,
    ) -> Projection {
        let series = (1..=periods)
            .map(|period| {
                let rate = self.rate_at(current_rate, period);

                let (change, change_percent) = if period > 1 {
                    let prev_rate = self.rate_at(current_rate, period - 1);
                    let change = rate - prev_rate;
                    (change, change / prev_rate * 100.0)
                } else {
                    (0.0, 0.0)
                };

                ForecastPeriod {
                    period,
                    date: start_date + Duration::days(i64::from(period)),
                    rate: round_to(rate, 4),
                    amount: round_to(amount * rate, 2),
                    change: round_to(change, 4),
                    change_percent: round_to(change_percent, 2),
                }
            })
            .collect();

        Projection {
            periods: series,
            confidence: self.confidence(),
        }
    }
}

/// 소수점 `places`자리 반올림 (0.5는 0에서 먼 쪽으로).
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_linear_projection() {
        let projection = ForecastModel::Linear.project(1.2, 1000.0, 5, start());

        assert_eq!(projection.periods.len(), 5);
        assert!(approx(projection.confidence, 0.7));

        let first = &projection.periods[0];
        assert_eq!(first.period, 1);
        assert!(approx(first.rate, 1.2012));
        assert!(approx(first.amount, 1201.2));
        assert_eq!(first.change, 0.0);
        assert_eq!(first.change_percent, 0.0);
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());

        let last = &projection.periods[4];
        assert_eq!(last.period, 5);
        assert!(approx(last.rate, 1.206));
        assert!(approx(last.change, 0.0012));
        assert_eq!(last.date, NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
    }

    #[test]
    fn test_exponential_projection() {
        let projection = ForecastModel::Exponential.project(1.2, 1000.0, 5, start());

        assert!(approx(projection.confidence, 0.6));
        assert!(approx(projection.periods[0].rate, 1.2024));
        assert!(approx(projection.periods[0].amount, 1202.4));
        for pair in projection.periods.windows(2) {
            assert!(pair[1].rate > pair[0].rate);
            assert!(pair[1].change_percent > 0.0);
        }
    }

    #[test]
    fn test_moving_average_projection() {
        let projection = ForecastModel::MovingAverage.project(1.0, 100.0, 60, start());

        assert!(approx(projection.confidence, 0.5));
        // sin(0.1) * 0.01
        assert!(approx(projection.periods[0].rate, 1.001));
        // 진동하므로 단조가 아니다
        let rising = projection.periods.windows(2).any(|w| w[1].rate > w[0].rate);
        let falling = projection.periods.windows(2).any(|w| w[1].rate < w[0].rate);
        assert!(rising && falling);
        // ±1% 밴드 안
        assert!(projection
            .periods
            .iter()
            .all(|p| p.rate >= 0.99 && p.rate <= 1.01));
    }

    #[test]
    fn test_zero_periods() {
        for model in ForecastModel::ALL {
            let projection = model.project(1.2, 1000.0, 0, start());
            assert!(projection.periods.is_empty());
            assert!(approx(projection.confidence, model.confidence()));
        }
    }

    #[test]
    fn test_amount_uses_unrounded_rate() {
        // rate 0.123456 * 1.001 = 0.123579456 → 표시 0.1236, amount는 미반올림 환율 기준
        let projection = ForecastModel::Linear.project(0.123456, 1_000_000.0, 1, start());
        let period = &projection.periods[0];

        assert!(approx(period.rate, 0.1236));
        assert!(approx(period.amount, 123579.46));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 4), 1.2346);
        assert_eq!(round_to(2.345, 0), 2.0);
        assert_eq!(round_to(-0.00005, 4), -0.0001);
    }
}
