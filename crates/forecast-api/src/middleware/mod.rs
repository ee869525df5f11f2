//! API 서버용 HTTP middleware.

mod metrics;
mod request_id;
mod security_headers;

pub use metrics::metrics_layer;
pub use request_id::{request_id_layer, RequestId, REQUEST_ID_HEADER};
pub use security_headers::security_headers_layer;
