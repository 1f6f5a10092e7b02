use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use redis::AsyncCommands;

use super::caller::extract_client_ip;
use crate::presentation::http::{errors::AppError, state::AppState};

/// Per-IP daily upload counter kept in Redis. Passes everything through
/// when Redis is not configured or the limit is zero.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(redis) = state.redis.as_ref() else {
        return Ok(next.run(request).await);
    };
    let ip = extract_client_ip(request.headers());
    if state.config.rate_limit_uploads_per_ip == 0 || ip == "127.0.0.1" || ip == "::1" {
        return Ok(next.run(request).await);
    }
    let date = chrono::Utc::now().format("%Y-%m-%d").to_string();
    let key = format!("rate_limit:uploads:{}:{}", ip, date);

    let mut conn = redis.get_multiplexed_async_connection().await?;
    let count: u32 = conn.incr(&key, 1_u32).await?;

    if count == 1 {
        let _: () = conn.expire(&key, 86_400).await?;
    }

    if count > state.config.rate_limit_uploads_per_ip {
        tracing::warn!(%ip, count, "Upload rate limit exceeded");
        return Err(AppError::RateLimited);
    }

    Ok(next.run(request).await)
}
