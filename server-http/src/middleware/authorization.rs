use crate::api::{api_error, ApiError};
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use clinic::auth::{TokenService, INVALID_TOKEN_MESSAGE};
use std::sync::Arc;
use tracing::debug;

pub const TOKEN_REQUIRED_MESSAGE: &str = "access token required";

/// Reject requests without a valid bearer token.
///
/// Both a missing token and a bad one answer 403. Nothing about the caller is
/// attached to the request; handlers do not know who called them.
pub async fn require_bearer_token(
    State(tokens): State<Arc<TokenService>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token)
        .ok_or_else(|| api_error(StatusCode::FORBIDDEN, TOKEN_REQUIRED_MESSAGE))?;

    if let Err(e) = tokens.verify(token) {
        debug!("{} {} rejected: {}", request.method(), request.uri().path(), e);
        return Err(api_error(StatusCode::FORBIDDEN, INVALID_TOKEN_MESSAGE));
    }

    Ok(next.run(request).await)
}

/// Authorization: Bearer <token>
fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ").map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc123def456"), Some("abc123def456"));
        assert_eq!(extract_bearer_token("Bearer "), Some(""));
        assert_eq!(extract_bearer_token("Basic YWRtaW46YWRtaW4="), None);
        assert_eq!(extract_bearer_token("bearer abc"), None);
        assert_eq!(extract_bearer_token("abc"), None);
    }
}
