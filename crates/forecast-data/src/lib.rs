//! # Forecast Data
//!
//! 예측에 필요한 현재 환율을 가져오는 데이터 소스 계층입니다.
//!
//! - [`RateSource`]: 환율 소스 추상화 (서비스와 테스트가 공유)
//! - [`CurrencyServiceClient`]: 업스트림 환율 서비스 HTTP 클라이언트

pub mod error;
pub mod provider;

pub use error::{DataError, DataResult};
pub use provider::{CurrencyServiceClient, RateSource, RatesSnapshot};
