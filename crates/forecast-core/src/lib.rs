//! # Forecast Core
//!
//! 환율 예측 서비스의 핵심 도메인 모델과 공통 인프라를 제공합니다:
//! - 예측 요청/응답, 기간별 예측, 추세 분석 타입
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use logging::*;
