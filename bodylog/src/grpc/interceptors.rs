//! gRPC interceptors for request correlation

use tonic::{Request, Status};
use uuid::Uuid;

/// Metadata key carrying the correlation id
pub const REQUEST_ID_KEY: &str = "x-request-id";

/// Request ID interceptor
///
/// Keeps the caller's `x-request-id` or assigns a fresh one, so both log entries
/// of a call can be correlated.
#[allow(clippy::result_large_err)]
pub fn request_id_interceptor(mut req: Request<()>) -> Result<Request<()>, Status> {
    let request_id = request_id(&req).unwrap_or_else(|| Uuid::new_v4().to_string());

    req.metadata_mut().insert(
        REQUEST_ID_KEY,
        request_id
            .parse()
            .map_err(|_| Status::internal("Failed to parse request ID"))?,
    );

    Ok(req)
}

/// Correlation id of a request, if it carries one
pub fn request_id<T>(req: &Request<T>) -> Option<String> {
    req.metadata()
        .get(REQUEST_ID_KEY)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
