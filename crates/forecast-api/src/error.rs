//! API 에러 응답 타입.
//!
//! 모든 엔드포인트가 같은 JSON 에러 형식을 사용합니다.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::{Method, StatusCode, Uri};
use axum::Json;
use forecast_data::DataError;
use forecast_engine::ForecastError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};
use utoipa::ToSchema;

/// API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "invalid request: amount must be greater than 0",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "VALIDATION_ERROR", "RATE_NOT_FOUND")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 추가 에러 상세 정보
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// 에러 발생 타임스탬프 (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// HTTP 메서드
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// 요청 경로
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ApiErrorResponse {
    /// 타임스탬프를 포함한 에러 생성.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: Some(chrono::Utc::now().timestamp()),
            method: None,
            path: None,
        }
    }

    /// 상세 정보를 포함한 에러 생성.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            details: Some(details),
            ..Self::new(code, message)
        }
    }

    /// 요청 정보(메서드, 경로)를 추가합니다.
    #[must_use]
    pub fn with_request_info(mut self, method: &Method, uri: &Uri) -> Self {
        self.method = Some(method.to_string());
        self.path = Some(uri.path().to_string());
        self
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// 핸들러 에러 타입.
pub type ApiError = (StatusCode, Json<ApiErrorResponse>);

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, ApiError>;

/// 예측 서비스 에러를 HTTP 상태와 에러 코드로 변환합니다.
///
/// | 에러 | 상태 | 코드 |
/// |------|------|------|
/// | 검증 실패 | 400 | `VALIDATION_ERROR` |
/// | 알 수 없는 모델 | 400 | `UNSUPPORTED_FORECAST_TYPE` |
/// | 환율에 대상 통화 없음 | 404 | `RATE_NOT_FOUND` |
/// | 업스트림 타임아웃 | 504 | `RATE_SOURCE_TIMEOUT` |
/// | 요청 취소 | 503 | `REQUEST_CANCELLED` |
/// | 그 외 업스트림 실패 | 502 | `RATE_SOURCE_ERROR` |
pub fn forecast_error(err: ForecastError) -> ApiError {
    let (status, code) = match &err {
        ForecastError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ForecastError::UnsupportedForecastType(_) => {
            (StatusCode::BAD_REQUEST, "UNSUPPORTED_FORECAST_TYPE")
        }
        ForecastError::TargetNotInRates(_) => (StatusCode::NOT_FOUND, "RATE_NOT_FOUND"),
        ForecastError::RateSource(e) if e.is_timeout() => {
            (StatusCode::GATEWAY_TIMEOUT, "RATE_SOURCE_TIMEOUT")
        }
        ForecastError::RateSource(DataError::Cancelled) => {
            (StatusCode::SERVICE_UNAVAILABLE, "REQUEST_CANCELLED")
        }
        ForecastError::RateSource(_) => (StatusCode::BAD_GATEWAY, "RATE_SOURCE_ERROR"),
    };

    if status.is_server_error() {
        error!(code, error = %err, "Service error");
    } else {
        warn!(code, error = %err, "Request rejected");
    }

    (status, Json(ApiErrorResponse::new(code, err.to_string())))
}

/// JSON 본문 파싱 실패를 400 `INVALID_REQUEST`로 변환합니다.
pub fn json_rejection(rejection: JsonRejection) -> ApiError {
    warn!(error = %rejection.body_text(), "Invalid request body");
    (
        StatusCode::BAD_REQUEST,
        Json(ApiErrorResponse::new(
            "INVALID_REQUEST",
            rejection.body_text(),
        )),
    )
}

/// 쿼리 파라미터 파싱 실패를 400 `INVALID_REQUEST`로 변환합니다.
pub fn query_rejection(rejection: QueryRejection) -> ApiError {
    warn!(error = %rejection.body_text(), "Invalid query parameters");
    (
        StatusCode::BAD_REQUEST,
        Json(ApiErrorResponse::new(
            "INVALID_REQUEST",
            rejection.body_text(),
        )),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_engine::ValidationError;

    #[test]
    fn test_api_error_response_new() {
        let error = ApiErrorResponse::new("TEST_ERROR", "Test message");
        assert_eq!(error.code, "TEST_ERROR");
        assert_eq!(error.message, "Test message");
        assert!(error.timestamp.is_some());
        assert!(error.details.is_none());
        assert_eq!(error.to_string(), "[TEST_ERROR] Test message");
    }

    #[test]
    fn test_with_details_and_request_info() {
        let uri: Uri = "/api/v1/forecast".parse().unwrap();
        let error = ApiErrorResponse::with_details(
            "VALIDATION_ERROR",
            "Invalid input",
            serde_json::json!({"field": "amount"}),
        )
        .with_request_info(&Method::POST, &uri);

        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains(r#""method":"POST""#));
        assert!(json.contains(r#""path":"/api/v1/forecast""#));
        assert!(json.contains(r#""field":"amount""#));
    }

    #[test]
    fn test_optional_fields_skipped() {
        let json = serde_json::to_string(&ApiErrorResponse::new("X", "y")).unwrap();
        assert!(!json.contains("details"));
        assert!(!json.contains("method"));
        assert!(!json.contains("path"));
    }

    #[test]
    fn test_forecast_error_mapping() {
        let cases = [
            (
                ForecastError::from(ValidationError::NonPositiveAmount),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                ForecastError::UnsupportedForecastType("arima".into()),
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_FORECAST_TYPE",
            ),
            (
                ForecastError::TargetNotInRates("JPY".into()),
                StatusCode::NOT_FOUND,
                "RATE_NOT_FOUND",
            ),
            (
                ForecastError::from(DataError::Timeout("slow".into())),
                StatusCode::GATEWAY_TIMEOUT,
                "RATE_SOURCE_TIMEOUT",
            ),
            (
                ForecastError::from(DataError::Cancelled),
                StatusCode::SERVICE_UNAVAILABLE,
                "REQUEST_CANCELLED",
            ),
            (
                ForecastError::from(DataError::Status {
                    status: 500,
                    body: "down".into(),
                }),
                StatusCode::BAD_GATEWAY,
                "RATE_SOURCE_ERROR",
            ),
        ];

        for (err, expected_status, expected_code) in cases {
            let (status, Json(body)) = forecast_error(err);
            assert_eq!(status, expected_status);
            assert_eq!(body.code, expected_code);
        }
    }
}
