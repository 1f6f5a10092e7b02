use axum::http::{HeaderMap, header};

use crate::application::identity::resolver::CallerCredentials;

pub const GUEST_AUTH_HEADER: &str = "guest-auth";

pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

pub fn extract_guest_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(GUEST_AUTH_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

pub fn caller_credentials(headers: &HeaderMap) -> CallerCredentials {
    CallerCredentials {
        bearer: extract_bearer_token(headers),
        guest: extract_guest_header(headers),
    }
}

/// First hop of `x-forwarded-for`, then `x-real-ip`, else loopback.
pub fn extract_client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
        .unwrap_or("127.0.0.1")
        .to_string()
}

/// Reaction key for callers with no credential at all.
pub fn anonymous_key(headers: &HeaderMap) -> String {
    format!("ip:{}", extract_client_ip(headers))
}
