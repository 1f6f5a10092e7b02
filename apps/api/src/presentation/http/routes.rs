use super::{
    handlers::{auth, content, gallery, health, media, social, users},
    middleware::rate_limit::rate_limit_middleware,
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use crate::config::StorageBackend;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Headroom for multipart framing and text fields on top of the file itself.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

fn upload_body_limit(max_file_bytes: usize) -> usize {
    max_file_bytes.saturating_add(MULTIPART_OVERHEAD)
}

pub fn create_router(state: AppState) -> Router {
    let limits = state.media_limits;

    let rate_limited = middleware::from_fn_with_state(state.clone(), rate_limit_middleware);

    let upload_image = post(gallery::upload_image)
        .layer(DefaultBodyLimit::max(upload_body_limit(limits.max_image_bytes)))
        .route_layer(rate_limited.clone());
    let upload_video = post(media::upload_video)
        .layer(DefaultBodyLimit::max(upload_body_limit(limits.max_video_bytes)))
        .route_layer(rate_limited);

    let mut router = Router::new()
        // Health
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        // Accounts
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/admins", get(auth::list_admins))
        // Guest accounts
        .route("/api/users/auth", post(users::guest_auth))
        .route("/api/users/check-username", post(users::check_username))
        // Posts
        .route(
            "/api/content",
            get(content::list_posts).post(content::create_post),
        )
        .route(
            "/api/content/{id}",
            get(content::get_post).delete(content::delete_post),
        )
        .route(
            "/api/content/{id}/comments",
            get(social::get_post_comments).post(social::add_post_comment),
        )
        .route(
            "/api/content/{id}/reactions",
            post(social::toggle_post_reaction),
        )
        // Gallery
        .route("/api/gallery", get(gallery::list_images).merge(upload_image))
        .route(
            "/api/gallery/{id}",
            get(gallery::get_image).delete(gallery::delete_image),
        )
        .route(
            "/api/gallery/{id}/comments",
            get(social::get_image_comments).post(social::add_image_comment),
        )
        .route(
            "/api/gallery/{id}/reactions",
            post(social::toggle_image_reaction),
        )
        // Media
        .route("/api/media/videos", upload_video);

    if let StorageBackend::Local { upload_dir, .. } = &state.config.storage {
        router = router.nest_service("/uploads", ServeDir::new(upload_dir));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
