//! 설정 관리.
//!
//! 기본값 → 설정 파일(선택) → 환경 변수 순서로 덮어씁니다.
//!
//! # 환경 변수
//!
//! 접두사 `FX`, 구분자 `__`를 사용합니다:
//! - `FX__SERVER__PORT=8082`
//! - `FX__CURRENCY_SERVICE__BASE_URL=http://localhost:8081`
//! - `FX__FORECAST__SUPPORTED_CURRENCIES=USD,EUR,GBP`

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// 설정이 비어 있을 때 사용하는 지원 통화 목록.
pub const DEFAULT_SUPPORTED_CURRENCIES: [&str; 10] = [
    "USD", "EUR", "GBP", "JPY", "CAD", "AUD", "CHF", "CNY", "SEK", "NZD",
];

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
    /// 환율 서비스(업스트림) 설정
    pub currency_service: CurrencyServiceConfig,
    /// 예측 설정
    pub forecast: ForecastConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 전체 타임아웃 (초)
    pub request_timeout_secs: u64,
    /// 동시에 처리할 최대 요청 수
    pub max_concurrent_requests: usize,
    /// 허용할 CORS origin 목록 (비어 있으면 모두 허용)
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8082,
            request_timeout_secs: 30,
            max_concurrent_requests: 10,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// 소켓 주소 반환.
    ///
    /// # Errors
    /// `host:port` 형식이 유효하지 않으면 `AddrParseError`를 반환합니다.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 업스트림 환율 서비스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CurrencyServiceConfig {
    /// 환율 서비스 기본 URL
    pub base_url: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl Default for CurrencyServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8081".to_string(),
            timeout_secs: 30,
        }
    }
}

/// 예측 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// 요청의 periods가 0일 때 사용할 기간 수
    pub default_periods: u32,
    /// 지원 통화 코드
    pub supported_currencies: Vec<String>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            default_periods: 30,
            supported_currencies: DEFAULT_SUPPORTED_CURRENCIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

impl ForecastConfig {
    /// 지원 통화 목록 정규화.
    ///
    /// 공백 제거 후 대문자로 바꾸고 빈 항목은 버립니다.
    /// 남는 항목이 없으면 기본 목록으로 대체합니다.
    pub fn normalize_currencies(raw: &[String]) -> Vec<String> {
        let currencies: Vec<String> = raw
            .iter()
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .collect();

        if currencies.is_empty() {
            DEFAULT_SUPPORTED_CURRENCIES
                .iter()
                .map(|c| c.to_string())
                .collect()
        } else {
            currencies
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let defaults = AppConfig::default();

        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("server.host", defaults.server.host.clone())?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default(
                "server.request_timeout_secs",
                defaults.server.request_timeout_secs,
            )?
            .set_default(
                "server.max_concurrent_requests",
                defaults.server.max_concurrent_requests as u64,
            )?
            .set_default("server.cors_origins", Vec::<String>::new())?
            .set_default("logging.level", defaults.logging.level.clone())?
            .set_default("logging.format", defaults.logging.format.clone())?
            .set_default("currency_service.base_url", defaults.currency_service.base_url.clone())?
            .set_default(
                "currency_service.timeout_secs",
                defaults.currency_service.timeout_secs,
            )?
            .set_default(
                "forecast.default_periods",
                u64::from(defaults.forecast.default_periods),
            )?
            .set_default(
                "forecast.supported_currencies",
                defaults.forecast.supported_currencies.clone(),
            )?
            // 파일에서 로드 (선택)
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("FX")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("forecast.supported_currencies")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            );

        let mut config: AppConfig = builder.build()?.try_deserialize()?;
        config.forecast.supported_currencies =
            ForecastConfig::normalize_currencies(&config.forecast.supported_currencies);

        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load("config/default.toml")
    }
}
