use super::helpers::{
    bearer, call_json, expect_status, get, multipart_body, read_json, send, send_multipart,
    spawn_app, spawn_app_with, tiny_mp4_bytes, tiny_png_bytes,
};
use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};

fn image_form(content_type: &str, bytes: &[u8]) -> (String, Vec<u8>) {
    multipart_body(
        &[("title", "Harbour at dusk"), ("description", "Fishing boats")],
        "image",
        "harbour.png",
        content_type,
        bytes,
    )
}

#[tokio::test]
async fn admin_uploads_image_and_it_is_served_back() {
    let app = spawn_app().await;
    let png = tiny_png_bytes();

    let res = send_multipart(
        &app.app,
        "/api/gallery",
        Some(&app.admin_token),
        image_form("image/png", &png),
    )
    .await;
    let item: Value = read_json(expect_status(res, StatusCode::CREATED).await).await;
    assert_eq!(item["kind"], "gallery");
    assert_eq!(item["title"], "Harbour at dusk");
    assert_eq!(item["media"]["kind"], "image");
    assert_eq!(item["media"]["content_type"], "image/png");
    assert_eq!(item["media"]["size_bytes"], png.len());
    assert!(item["author_id"].is_null());

    let url = item["media"]["url"].as_str().expect("missing media url");
    assert!(url.starts_with("/uploads/images/"));
    let key = item["media"]["storage_key"].as_str().expect("missing key");
    assert!(app.upload_dir.path().join(key).exists());

    let res = get(&app.app, url).await;
    let res = expect_status(res, StatusCode::OK).await;
    let served = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    assert_eq!(served.as_ref(), png.as_slice());

    let res = get(&app.app, "/api/gallery").await;
    let items: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(items.as_array().map(Vec::len), Some(1));

    let id = item["id"].as_str().unwrap();
    let req = Request::builder()
        .method("DELETE")
        .uri(format!("/api/gallery/{}", id))
        .header(header::AUTHORIZATION, format!("Bearer {}", app.admin_token))
        .body(Body::empty())
        .unwrap();
    expect_status(send(&app.app, req).await, StatusCode::OK).await;
    assert!(!app.upload_dir.path().join(key).exists());

    let res = get(&app.app, &format!("/api/gallery/{}", id)).await;
    let body: Value = read_json(expect_status(res, StatusCode::NOT_FOUND).await).await;
    assert_eq!(body["error"], "Image not found");
}

#[tokio::test]
async fn image_upload_requires_admin() {
    let app = spawn_app().await;
    let res = send_multipart(
        &app.app,
        "/api/gallery",
        None,
        image_form("image/png", &tiny_png_bytes()),
    )
    .await;
    expect_status(res, StatusCode::UNAUTHORIZED).await;
}

#[tokio::test]
async fn declared_type_must_match_file_content() {
    let app = spawn_app().await;

    let res = send_multipart(
        &app.app,
        "/api/gallery",
        Some(&app.admin_token),
        image_form("image/gif", &tiny_png_bytes()),
    )
    .await;
    expect_status(res, StatusCode::BAD_REQUEST).await;

    let res = send_multipart(
        &app.app,
        "/api/gallery",
        Some(&app.admin_token),
        image_form("image/webp", &tiny_png_bytes()),
    )
    .await;
    expect_status(res, StatusCode::BAD_REQUEST).await;

    let res = get(&app.app, "/api/gallery").await;
    let items: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(items, json!([]));
}

#[tokio::test]
async fn oversized_image_is_rejected() {
    let app = spawn_app_with(&[("MAX_IMAGE_BYTES", "32")]).await;
    let png = tiny_png_bytes();
    assert!(png.len() > 32);

    let res = send_multipart(
        &app.app,
        "/api/gallery",
        Some(&app.admin_token),
        image_form("image/png", &png),
    )
    .await;
    let body: Value = read_json(expect_status(res, StatusCode::BAD_REQUEST).await).await;
    assert!(
        body["error"]
            .as_str()
            .is_some_and(|e| e.contains("limit")),
        "unexpected error body: {body}"
    );
}

#[tokio::test]
async fn gallery_items_take_comments_and_reactions() {
    let app = spawn_app().await;
    let res = send_multipart(
        &app.app,
        "/api/gallery",
        Some(&app.admin_token),
        image_form("image/png", &tiny_png_bytes()),
    )
    .await;
    let item: Value = read_json(expect_status(res, StatusCode::CREATED).await).await;
    let id = item["id"].as_str().unwrap();

    let res = call_json(
        &app.app,
        "POST",
        &format!("/api/gallery/{}/reactions", id),
        &[],
        json!({ "type": "heart", "guest_id": "phone-7" }),
    )
    .await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["reactions"]["guest_hearts"], json!(["phone-7"]));

    let res = call_json(
        &app.app,
        "POST",
        &format!("/api/gallery/{}/comments", id),
        &[],
        json!({ "text": "Stunning", "author": "Lea" }),
    )
    .await;
    expect_status(res, StatusCode::CREATED).await;

    let res = get(&app.app, &format!("/api/gallery/{}/comments", id)).await;
    let comments: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(comments.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn uploaded_video_can_back_a_post_and_supports_ranges() {
    let app = spawn_app().await;
    let mp4 = tiny_mp4_bytes();

    let form = multipart_body(&[], "video", "clip.mp4", "video/mp4", &mp4);
    let res = send_multipart(&app.app, "/api/media/videos", Some(&app.admin_token), form).await;
    let uploaded: Value = read_json(expect_status(res, StatusCode::CREATED).await).await;
    let media = uploaded["media"].clone();
    assert_eq!(media["kind"], "video");
    let url = media["url"].as_str().expect("missing url").to_string();

    let req = Request::builder()
        .method("GET")
        .uri(&url)
        .header(header::RANGE, "bytes=0-7")
        .body(Body::empty())
        .unwrap();
    let res = expect_status(send(&app.app, req).await, StatusCode::PARTIAL_CONTENT).await;
    let partial = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    assert_eq!(partial.as_ref(), &mp4[..8]);

    let res = call_json(
        &app.app,
        "POST",
        "/api/content",
        &[bearer(&app.admin_token)],
        json!({
            "title": "Drone flight",
            "description": "Over the fjord",
            "video": media
        }),
    )
    .await;
    let post: Value = read_json(expect_status(res, StatusCode::CREATED).await).await;
    assert_eq!(post["media"]["url"], url.as_str());
}

#[tokio::test]
async fn video_with_wrong_signature_is_rejected() {
    let app = spawn_app().await;
    let form = multipart_body(&[], "video", "clip.mp4", "video/mp4", b"definitely not a video");
    let res = send_multipart(&app.app, "/api/media/videos", Some(&app.admin_token), form).await;
    expect_status(res, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn post_cannot_claim_media_it_does_not_own() {
    let app = spawn_app().await;

    let res = send_multipart(
        &app.app,
        "/api/gallery",
        Some(&app.admin_token),
        image_form("image/png", &tiny_png_bytes()),
    )
    .await;
    let image: Value = read_json(expect_status(res, StatusCode::CREATED).await).await;
    let image_key = image["media"]["storage_key"].as_str().unwrap().to_string();

    let mut borrowed = image["media"].clone();
    borrowed["kind"] = json!("video");
    let res = call_json(
        &app.app,
        "POST",
        "/api/content",
        &[bearer(&app.admin_token)],
        json!({ "title": "Stolen", "description": "Not mine", "video": borrowed }),
    )
    .await;
    expect_status(res, StatusCode::BAD_REQUEST).await;

    let form = multipart_body(&[], "video", "clip.mp4", "video/mp4", &tiny_mp4_bytes());
    let res = send_multipart(&app.app, "/api/media/videos", Some(&app.admin_token), form).await;
    let uploaded: Value = read_json(expect_status(res, StatusCode::CREATED).await).await;
    let video = uploaded["media"].clone();
    let video_key = video["storage_key"].as_str().unwrap().to_string();

    let post_body = json!({ "title": "Ferry", "description": "Crossing", "video": video });
    let res = call_json(&app.app, "POST", "/api/content", &[bearer(&app.admin_token)], post_body.clone()).await;
    let post: Value = read_json(expect_status(res, StatusCode::CREATED).await).await;
    let res = call_json(&app.app, "POST", "/api/content", &[bearer(&app.admin_token)], post_body).await;
    expect_status(res, StatusCode::BAD_REQUEST).await;

    let req = Request::builder()
        .method("DELETE")
        .uri(format!("/api/content/{}", post["id"].as_str().unwrap()))
        .header(header::AUTHORIZATION, format!("Bearer {}", app.admin_token))
        .body(Body::empty())
        .unwrap();
    expect_status(send(&app.app, req).await, StatusCode::OK).await;

    assert!(!app.upload_dir.path().join(&video_key).exists());
    assert!(app.upload_dir.path().join(&image_key).exists());
}
