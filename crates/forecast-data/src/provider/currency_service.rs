//! 업스트림 환율 서비스 HTTP 클라이언트.
//!
//! 엔드포인트:
//! - `GET {base_url}/api/v1/rates/{base}`
//! - `GET {base_url}/api/v1/rates?base={base}`
//! - `GET {base_url}/health`

use async_trait::async_trait;
use forecast_core::CurrencyServiceConfig;
use reqwest::{Client, Response, StatusCode, Url};
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use super::{RateSource, RatesSnapshot};
use crate::error::{DataError, DataResult};

/// 환율 서비스 클라이언트.
#[derive(Debug, Clone)]
pub struct CurrencyServiceClient {
    base_url: String,
    root: Url,
    client: Client,
}

impl CurrencyServiceClient {
    /// 설정으로 클라이언트 생성.
    ///
    /// 요청 타임아웃은 `timeout_secs`를 따릅니다.
    pub fn new(config: &CurrencyServiceConfig) -> DataResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let root = Url::parse(&base_url).map_err(|e| {
            DataError::Config(format!("invalid currency service URL {}: {}", base_url, e))
        })?;
        if root.cannot_be_a_base() {
            return Err(DataError::Config(format!(
                "currency service URL cannot be a base: {}",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DataError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            root,
            client,
        })
    }

    /// 기본 URL 반환.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 기본 URL 뒤에 경로 세그먼트를 붙입니다.
    ///
    /// 세그먼트는 퍼센트 인코딩되므로 `/`, `?`가 경로나 쿼리를 바꾸지 못합니다.
    fn endpoint(&self, segments: &[&str]) -> DataResult<Url> {
        let mut url = self.root.clone();
        url.path_segments_mut()
            .map_err(|_| DataError::Config(format!("cannot extend URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// 쿼리 파라미터 형식으로 환율 조회 (`/api/v1/rates?base=X`).
    pub async fn get_rates_with_query(
        &self,
        base: &str,
        cancel: &CancellationToken,
    ) -> DataResult<RatesSnapshot> {
        let url = self.endpoint(&["api", "v1", "rates"])?;
        debug!(url = %url, base = %base, "GET rates (query)");

        let request = self.client.get(url).query(&[("base", base)]);
        with_cancel(cancel, async move {
            let response = request.send().await?;
            Self::handle_response(response).await
        })
        .await
    }

    /// 응답 처리.
    ///
    /// 200이 아니면 본문을 담은 [`DataError::Status`]를 반환합니다.
    async fn handle_response(response: Response) -> DataResult<RatesSnapshot> {
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Currency service returned non-OK status");
            return Err(DataError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, body = %body, "Failed to parse rates response");
            DataError::Parse(e.to_string())
        })
    }
}

/// 요청 전체(전송과 본문 수신)를 취소 토큰과 경쟁시킵니다.
async fn with_cancel<T, F>(cancel: &CancellationToken, call: F) -> DataResult<T>
where
    F: Future<Output = DataResult<T>>,
{
    tokio::select! {
        _ = cancel.cancelled() => Err(DataError::Cancelled),
        result = call => result,
    }
}

#[async_trait]
impl RateSource for CurrencyServiceClient {
    fn name(&self) -> &str {
        "currency-service"
    }

    async fn get_rates(
        &self,
        base: &str,
        cancel: &CancellationToken,
    ) -> DataResult<RatesSnapshot> {
        let url = self.endpoint(&["api", "v1", "rates", base])?;
        debug!(url = %url, "GET rates");

        let request = self.client.get(url);
        with_cancel(cancel, async move {
            let response = request.send().await?;
            Self::handle_response(response).await
        })
        .await
    }

    async fn health_check(&self, cancel: &CancellationToken) -> DataResult<()> {
        let url = self.endpoint(&["health"])?;
        let request = self.client.get(url);

        with_cancel(cancel, async move {
            let status = request.send().await?.status();
            if status != StatusCode::OK {
                return Err(DataError::Unhealthy(status.as_u16()));
            }
            Ok(())
        })
        .await
    }
}
