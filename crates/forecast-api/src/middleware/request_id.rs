//! 요청 ID middleware.
//!
//! 클라이언트가 보낸 `X-Request-ID`를 유지하고, 없으면 UUID v4를 생성합니다.
//! 응답에도 같은 헤더를 붙입니다.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// 요청 ID 헤더 이름.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 요청 extension에 저장되는 요청 ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// 요청 ID를 부여하는 미들웨어 레이어.
pub async fn request_id_layer(mut request: Request, next: Next) -> Response {
    let header = HeaderName::from_static(REQUEST_ID_HEADER);

    let value = request
        .headers()
        .get(&header)
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(generate_request_id);

    if let Ok(id) = value.to_str() {
        request.extensions_mut().insert(RequestId(id.to_string()));
    }

    let mut response = next.run(request).await;
    response.headers_mut().insert(header, value);
    response
}

fn generate_request_id() -> HeaderValue {
    // UUID 문자열은 항상 유효한 헤더 값
    HeaderValue::from_str(&Uuid::new_v4().to_string())
        .unwrap_or_else(|_| HeaderValue::from_static("unknown"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        extract::Extension,
        http::StatusCode,
        middleware,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    async fn echo(Extension(id): Extension<RequestId>) -> String {
        id.0
    }

    fn app() -> Router {
        Router::new()
            .route("/", get(echo))
            .layer(middleware::from_fn(request_id_layer))
    }

    #[tokio::test]
    async fn test_existing_request_id_preserved() {
        let response = app()
            .oneshot(
                axum::http::Request::builder()
                    .uri("/")
                    .header("X-Request-ID", "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-request-id"], "abc-123");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"abc-123");
    }

    #[tokio::test]
    async fn test_request_id_generated() {
        let response = app()
            .oneshot(
                axum::http::Request::builder()
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let id = response.headers()["x-request-id"].to_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }
}
