//! 환율 소스 에러 타입.

use thiserror::Error;

/// 환율 조회 결과 타입.
pub type DataResult<T> = Result<T, DataError>;

/// 환율 소스 관련 에러.
#[derive(Debug, Error)]
pub enum DataError {
    /// 업스트림이 200이 아닌 상태 코드를 반환
    #[error("currency service returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// 헬스 체크 실패
    #[error("currency service health check failed with status: {0}")]
    Unhealthy(u16),

    /// 요청 타임아웃
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// 네트워크/연결 에러
    #[error("Network error: {0}")]
    Network(String),

    /// 응답 파싱 에러
    #[error("Parse error: {0}")]
    Parse(String),

    /// 호출자가 요청을 취소함
    #[error("request cancelled")]
    Cancelled,

    /// 클라이언트 설정 에러
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DataError {
    /// 업스트림 응답 시간 초과인지 확인.
    pub fn is_timeout(&self) -> bool {
        matches!(self, DataError::Timeout(_))
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DataError::Timeout(err.to_string())
        } else if err.is_decode() {
            DataError::Parse(err.to_string())
        } else {
            DataError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let err = DataError::Status {
            status: 500,
            body: "Internal Server Error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "currency service returned status 500: Internal Server Error"
        );
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_is_timeout() {
        assert!(DataError::Timeout("operation timed out".to_string()).is_timeout());
        assert!(!DataError::Cancelled.is_timeout());
        assert!(!DataError::Network("connection refused".to_string()).is_timeout());
    }

    #[test]
    fn test_parse_error_from_serde() {
        let err: DataError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert!(matches!(err, DataError::Parse(_)));
    }
}
