//! 로깅 초기화.
//!
//! 설정의 `logging.level`/`logging.format`을 tracing-subscriber 레이어로 옮깁니다.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 색상이 포함된 사람이 읽기 쉬운 형식 (개발용)
    #[default]
    Pretty,
    /// 로그 집계용 JSON 형식 (운영용)
    Json,
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 로깅 초기화 옵션.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// 로그 레벨 필터 (예: "info", "forecast_engine=debug")
    pub level: String,
    pub format: LogFormat,
}

impl LogConfig {
    /// 애플리케이션 설정의 logging 섹션에서 생성합니다.
    ///
    /// 알 수 없는 형식은 pretty, 알 수 없는 레벨은 info로 처리합니다.
    pub fn from_settings(settings: &LoggingConfig) -> Self {
        Self {
            level: normalize_level(&settings.level),
            format: settings.format.parse().unwrap_or_default(),
        }
    }
}

/// `forecast_api=debug` 같은 지시자 형식은 그대로 통과시킵니다.
fn normalize_level(level: &str) -> String {
    let lowered = level.trim().to_lowercase();
    match lowered.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => lowered,
        other if other.contains('=') => other.to_string(),
        _ => "info".to_string(),
    }
}

/// 주어진 설정으로 로깅 시스템을 초기화합니다.
///
/// `RUST_LOG`가 설정되어 있으면 설정 파일의 레벨보다 우선합니다.
///
/// ```no_run
/// use forecast_core::{init_logging, LogConfig, LoggingConfig};
///
/// init_logging(LogConfig::from_settings(&LoggingConfig::default())).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;
    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format {
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init()?,
        LogFormat::Json => registry.with(fmt::layer().json()).try_init()?,
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init()?,
    }

    tracing::info!(
        format = ?config.format,
        level = %config.level,
        "Logging initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("COMPACT".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_from_settings() {
        let settings = LoggingConfig {
            level: "DEBUG".to_string(),
            format: "json".to_string(),
        };
        let config = LogConfig::from_settings(&settings);

        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_level_and_format_fall_back() {
        let settings = LoggingConfig {
            level: "verbose".to_string(),
            format: "fancy".to_string(),
        };
        let config = LogConfig::from_settings(&settings);

        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn test_directive_level_passes_through() {
        assert_eq!(normalize_level("forecast_api=debug"), "forecast_api=debug");
    }
}
