//! 환율 예측 도메인 모델.

mod forecast;
mod trend;

pub use forecast::*;
pub use trend::*;
